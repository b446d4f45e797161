// ----------------------------------------------------------------------------
// This source code contains derived artifacts from seanmonstar's `reqwest`.
// for further information(including license information),
// please visit their repository: https://github.com/seanmonstar/reqwest .
// ----------------------------------------------------------------------------
use reqwest::{Client as ReqwestClient, IntoUrl, Method};

use crate::clock::Clock;
use crate::nonce::NonceGenerator;
use crate::{SecretsProvider, Signer};

use super::request::RequestBuilder;

pub trait OAuthClientProvider {
    /// Sign every request with `secrets`, the system clock and a random nonce.
    fn oauth1<'a, T>(self, secrets: &'a T) -> Client<Signer<'a, T>>
    where
        Self: Sized,
        T: SecretsProvider + Clone,
    {
        self.oauth1_with_signer(Signer::new(secrets))
    }

    fn oauth1_with_signer<'a, TSecrets, TClock, TNonce>(
        self,
        signer: Signer<'a, TSecrets, TClock, TNonce>,
    ) -> Client<Signer<'a, TSecrets, TClock, TNonce>>
    where
        Self: Sized,
        TSecrets: SecretsProvider + Clone,
        TClock: Clock + Clone,
        TNonce: NonceGenerator + Clone;
}

#[derive(Debug)]
pub struct Client<TSigner> {
    inner: ReqwestClient,
    signer: TSigner,
}

impl OAuthClientProvider for ReqwestClient {
    fn oauth1_with_signer<'a, TSecrets, TClock, TNonce>(
        self,
        signer: Signer<'a, TSecrets, TClock, TNonce>,
    ) -> Client<Signer<'a, TSecrets, TClock, TNonce>>
    where
        Self: Sized,
        TSecrets: SecretsProvider + Clone,
        TClock: Clock + Clone,
        TNonce: NonceGenerator + Clone,
    {
        Client {
            inner: self,
            signer,
        }
    }
}

impl From<ReqwestClient> for Client<()> {
    fn from(client: ReqwestClient) -> Self {
        Client::new_with_client(client)
    }
}

impl Client<()> {
    /// Constructs a new `Client`.
    ///
    /// This method calls reqwest::Client::new() internally.
    pub fn new() -> Self {
        Client::new_with_client(ReqwestClient::new())
    }

    /// Constructs a new `Client` with specifying inner `reqwest::Client`.
    pub fn new_with_client(client: ReqwestClient) -> Self {
        Client {
            inner: client,
            signer: (),
        }
    }
}

impl Default for Client<()> {
    fn default() -> Self {
        Client::new()
    }
}

impl<T> Client<T>
where
    T: Clone,
{
    /// Convenience method to make a `GET` request to a URL.
    ///
    /// # Errors
    ///
    /// This method fails whenever supplied `Url` cannot be parsed.
    pub fn get<U: IntoUrl + Clone>(&self, url: U) -> RequestBuilder<T> {
        self.request(Method::GET, url)
    }

    /// Convenience method to make a `POST` request to a URL.
    ///
    /// # Errors
    ///
    /// This method fails whenever supplied `Url` cannot be parsed.
    pub fn post<U: IntoUrl + Clone>(&self, url: U) -> RequestBuilder<T> {
        self.request(Method::POST, url)
    }

    /// Start building a `Request` with the `Method` and `Url`.
    ///
    /// Returns a `RequestBuilder<T>`, which will allow setting headers and
    /// request body before sending.
    ///
    /// # Errors
    ///
    /// This method fails whenever supplied `Url` cannot be parsed.
    pub fn request<U: IntoUrl + Clone>(&self, method: Method, url: U) -> RequestBuilder<T> {
        let cloned_url = url.clone().into_url().ok();
        let cloned_method = method.clone();
        RequestBuilder::new(
            self.inner.request(method, url),
            cloned_method,
            cloned_url,
            self.signer.clone(),
        )
    }
}
