use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type SignResult<T> = std::result::Result<T, SignError>;
pub type StreamResult<T> = std::result::Result<T, StreamError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("OAuth sign failed : {0}")]
    Signer(#[from] SignError),
    #[error("tweet stream failed : {0}")]
    Stream(#[from] StreamError),
    #[error("request failed : {0}")]
    Reqwest(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum SignError {
    #[error("could not draw entropy for oauth_nonce : {0}")]
    RandomSource(#[from] rand::Error),
    #[error("invalid HTTP method : {0:?}")]
    InvalidMethod(String),
    #[error("invalid base URL {0:?} : {1}")]
    InvalidUrl(String, url::ParseError),
    #[error("base URL {0:?} carries a query string; merge it into the request parameters instead.")]
    QueryInBaseUrl(String),
    #[error("header {0} could not be attached to the request.")]
    InvalidHeader(&'static str),
}

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("stream endpoint answered with status {0}")]
    Status(StatusCode),
    #[error("malformed tweet record : {0}")]
    Decode(#[from] serde_json::Error),
    #[error("stream ended inside a record ({0} bytes left undecoded)")]
    Truncated(usize),
}
