// ----------------------------------------------------------------------------
// This source code contains derived artifacts from seanmonstar's `reqwest`.
// for further information(including license information),
// please visit their repository: https://github.com/seanmonstar/reqwest .
// ----------------------------------------------------------------------------
use std::{convert::TryFrom, time::Duration};

use http::{header::AUTHORIZATION, Method};
use reqwest::{
    header::HeaderMap, header::HeaderName, header::HeaderValue, Request,
    RequestBuilder as ReqwestRequestBuilder, Response, Url,
};
use serde::Serialize;

use crate::clock::Clock;
use crate::nonce::NonceGenerator;
use crate::{Parameters, Result, SecretsProvider, SignError, SignResult, Signer};

pub struct RequestBuilder<TSigner>
where
    TSigner: Clone,
{
    method: Method,
    inner: ReqwestRequestBuilder,
    signer: TSigner,
    url: Option<Url>,
    params: Parameters,
}

impl RequestBuilder<()> {
    // ------------------------------------------------------------------------
    // Set signing information

    /// Add the signing information.
    pub fn sign<'a, T>(self, secrets: &'a T) -> RequestBuilder<Signer<'a, T>>
    where
        T: SecretsProvider + Clone,
    {
        self.sign_with(Signer::new(secrets))
    }

    /// Sign with a preconfigured [`Signer`].
    pub fn sign_with<TSigner>(self, signer: TSigner) -> RequestBuilder<TSigner>
    where
        TSigner: Clone,
    {
        RequestBuilder {
            inner: self.inner,
            method: self.method,
            url: self.url,
            params: self.params,
            signer,
        }
    }
}

impl<'a, TSecretsProvider, TClock, TNonce> RequestBuilder<Signer<'a, TSecretsProvider, TClock, TNonce>>
where
    TSecretsProvider: SecretsProvider + Clone,
    TClock: Clock + Clone,
    TNonce: NonceGenerator + Clone,
{
    // ------------------------------------------------------------------------
    // Finish building the request and send it to server with OAuth signature

    /// Constructs the Request and sends it to the target URL, returning a
    /// Response.
    ///
    /// # Errors
    ///
    /// This method fails if the request could not be signed, if there was an
    /// error while sending request, redirect loop was detected or redirect
    /// limit was exhausted.
    pub async fn send(self) -> Result<Response> {
        let builder = self.generate_signature()?;
        Ok(builder.send().await?)
    }

    /// Build the signed `Request` without sending it.
    pub fn build(self) -> Result<Request> {
        let builder = self.generate_signature()?;
        Ok(builder.build()?)
    }

    /// Generate an OAuth signature and return the reqwest's `RequestBuilder`.
    ///
    /// Parameters given through [`RequestBuilder::form`] are signed. The URL
    /// must not carry a query string.
    pub fn generate_signature(self) -> SignResult<ReqwestRequestBuilder> {
        match self.url {
            Some(url) => {
                if url.query().is_some() {
                    return Err(SignError::QueryInBaseUrl(url.into()));
                }
                let authorization =
                    self.signer
                        .generate_signature(self.method.as_str(), url.as_str(), &self.params)?;
                // set AUTHORIZATION header to inner RequestBuilder and return it
                Ok(self.inner.header(AUTHORIZATION, authorization))
            }
            // the inner builder carries the URL error; it surfaces on build/send
            None => Ok(self.inner),
        }
    }
}

impl<TSigner> RequestBuilder<TSigner>
where
    TSigner: Clone,
{
    pub(crate) fn new(
        builder: ReqwestRequestBuilder,
        method: Method,
        url: Option<Url>,
        signer: TSigner,
    ) -> Self {
        RequestBuilder {
            inner: builder,
            method,
            url,
            params: Parameters::new(),
            signer,
        }
    }

    // ------------------------------------------------------------------------
    // Trapped with the wrapper

    /// Send a form body.
    ///
    /// Sets the body to the url encoded serialization of the passed value,
    /// and also sets the `Content-Type: application/x-www-form-urlencoded`
    /// header. The pairs of the body become the signed request parameters;
    /// when a name repeats, the last value wins. Each call replaces the
    /// body and the signed parameters of the previous one.
    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Self {
        self.params.clear();
        match serde_urlencoded::to_string(form) {
            Ok(body) => {
                self.params
                    .extend(url::form_urlencoded::parse(body.as_bytes()).into_owned());
                self.inner = self.inner.form(form);
                self
            }
            Err(_) => self.pass_through(|b| b.form(form)),
        }
    }

    // ------------------------------------------------------------------------
    // Pass-through to inner builder

    fn pass_through<F>(self, f: F) -> Self
    where
        F: FnOnce(ReqwestRequestBuilder) -> ReqwestRequestBuilder,
    {
        RequestBuilder {
            inner: f(self.inner),
            ..self
        }
    }

    /// Add a `Header` to this Request.
    pub fn header<K, V>(self, key: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        self.pass_through(|b| b.header(key, value))
    }

    /// Add a set of Headers to the existing ones on this Request.
    ///
    /// The headers will be merged in to any already set.
    pub fn headers(self, headers: HeaderMap) -> Self {
        self.pass_through(|b| b.headers(headers))
    }

    /// Enables a request timeout.
    ///
    /// The timeout is applied from the when the request starts connecting
    /// until the response body has finished. It affects only this request
    /// and overrides the timeout configured using `ClientBuilder::timeout()`.
    pub fn timeout(self, timeout: Duration) -> Self {
        self.pass_through(|b| b.timeout(timeout))
    }

    /// Attempt to clone the RequestBuilder.
    ///
    /// `None` is returned if the RequestBuilder can not be cloned,
    /// i.e. if the request body is a stream.
    pub fn try_clone(&self) -> Option<Self> {
        self.inner.try_clone().map(|inner| RequestBuilder {
            inner,
            method: self.method.clone(),
            url: self.url.clone(),
            params: self.params.clone(),
            signer: self.signer.clone(),
        })
    }
}
