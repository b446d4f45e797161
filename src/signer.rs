use std::collections::BTreeMap;
use std::convert::TryFrom;

use http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use reqwest::{Body, Request, Url};

use crate::clock::{Clock, SystemClock};
use crate::header::authorization_header;
use crate::nonce::{NonceGenerator, OsRandom, RandomNonce};
use crate::signature;
use crate::{
    SecretsProvider, SignError, SignResult, OAUTH_CONSUMER_KEY, OAUTH_NONCE_KEY,
    OAUTH_SIGNATURE_KEY, OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY,
    OAUTH_VERSION_KEY,
};

pub(crate) const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const HMAC_SHA1: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// Request parameters: one value per name.
pub type Parameters = BTreeMap<String, String>;

/// Signs requests on behalf of a [`SecretsProvider`].
///
/// The timestamp and the nonce come from the injected [`Clock`] and
/// [`NonceGenerator`]; with fixed strategies every output is reproducible.
#[derive(Debug, Clone)]
pub struct Signer<'a, TSecretsProvider, TClock = SystemClock, TNonce = RandomNonce<OsRandom>>
where
    TSecretsProvider: SecretsProvider,
    TClock: Clock,
    TNonce: NonceGenerator,
{
    secrets: &'a TSecretsProvider,
    clock: TClock,
    nonce: TNonce,
}

impl<'a, TSecretsProvider> Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    pub fn new(secrets: &'a TSecretsProvider) -> Self {
        Signer {
            secrets,
            clock: SystemClock,
            nonce: RandomNonce::new(),
        }
    }
}

impl<'a, TSecretsProvider, TClock, TNonce> Signer<'a, TSecretsProvider, TClock, TNonce>
where
    TSecretsProvider: SecretsProvider,
    TClock: Clock,
    TNonce: NonceGenerator,
{
    /// Replace the source of `oauth_timestamp`.
    pub fn with_clock<T>(self, clock: T) -> Signer<'a, TSecretsProvider, T, TNonce>
    where
        T: Clock,
    {
        Signer {
            secrets: self.secrets,
            clock,
            nonce: self.nonce,
        }
    }

    /// Replace the source of `oauth_nonce`.
    pub fn with_nonce_generator<T>(self, nonce: T) -> Signer<'a, TSecretsProvider, TClock, T>
    where
        T: NonceGenerator,
    {
        Signer {
            secrets: self.secrets,
            clock: self.clock,
            nonce,
        }
    }

    /// Fresh oauth_* parameters for one request, without the signature.
    pub fn protocol_parameters(&self) -> SignResult<Parameters> {
        let nonce = self.nonce.generate()?;
        let timestamp = self.clock.timestamp();
        let (consumer_key, _) = self.secrets.get_consumer_key_pair();
        let (token, _) = self.secrets.get_token_option_pair();

        let mut params = Parameters::new();
        params.insert(OAUTH_CONSUMER_KEY.into(), consumer_key.into());
        params.insert(OAUTH_NONCE_KEY.into(), nonce);
        params.insert(OAUTH_SIGNATURE_METHOD_KEY.into(), HMAC_SHA1.into());
        params.insert(OAUTH_TIMESTAMP_KEY.into(), timestamp.to_string());
        if let Some(token) = token {
            params.insert(OAUTH_TOKEN_KEY.into(), token.into());
        }
        params.insert(OAUTH_VERSION_KEY.into(), OAUTH_VERSION.into());
        Ok(params)
    }

    /// Sign a request and return the value of its `Authorization` header.
    ///
    /// `params` are the caller's parameters. oauth_* protocol parameters of
    /// the same name replace them in the signed set.
    pub fn generate_signature(
        &self,
        method: &str,
        base_url: &str,
        params: &Parameters,
    ) -> SignResult<String> {
        let mut oauth_params = self.protocol_parameters()?;

        let mut merged = params.clone();
        for (key, value) in &oauth_params {
            merged.insert(key.clone(), value.clone());
        }

        let (_, consumer_secret) = self.secrets.get_consumer_key_pair();
        let (_, token_secret) = self.secrets.get_token_option_pair();
        let signature = signature::sign(
            consumer_secret,
            token_secret.unwrap_or(""),
            method,
            base_url,
            &merged,
        );
        tracing::debug!(
            method,
            base_url,
            nonce = oauth_params[OAUTH_NONCE_KEY].as_str(),
            timestamp = oauth_params[OAUTH_TIMESTAMP_KEY].as_str(),
            "signed request"
        );

        oauth_params.insert(OAUTH_SIGNATURE_KEY.into(), signature);
        Ok(authorization_header(&oauth_params))
    }

    /// Build a signed, ready-to-send request.
    ///
    /// The body is the urlencoded form of `params`; the request carries the
    /// `Content-Type` and `Authorization` headers. `base_url` must not have a
    /// query string.
    pub fn authorize(&self, method: &str, base_url: &str, params: &Parameters) -> SignResult<Request> {
        let method = parse_method(method)?;
        let url = parse_base_url(base_url)?;

        let authorization = self.generate_signature(method.as_str(), base_url, params)?;
        let authorization = HeaderValue::try_from(authorization)
            .map_err(|_| SignError::InvalidHeader("authorization"))?;
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();

        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));
        headers.insert(AUTHORIZATION, authorization);
        *request.body_mut() = Some(Body::from(body));
        Ok(request)
    }
}

/// Sign a request with the system clock and an OS-random nonce.
pub fn make_authorized_request<T>(
    secrets: &T,
    method: &str,
    base_url: &str,
    params: &Parameters,
) -> SignResult<Request>
where
    T: SecretsProvider,
{
    Signer::new(secrets).authorize(method, base_url, params)
}

fn parse_method(method: &str) -> SignResult<Method> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| SignError::InvalidMethod(method.into()))
}

pub(crate) fn parse_base_url(base_url: &str) -> SignResult<Url> {
    let url = Url::parse(base_url).map_err(|e| SignError::InvalidUrl(base_url.into(), e))?;
    if url.query().is_some() {
        return Err(SignError::QueryInBaseUrl(base_url.into()));
    }
    Ok(url)
}
