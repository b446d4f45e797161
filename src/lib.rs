/*!
tgrep: OAuth 1.0a signed requests and a streaming tweet reader on top of
[reqwest](https://crates.io/crates/reqwest).

# Overview

Requests are signed with HMAC-SHA1 as described by RFC 5849. The signing
core is a set of pure functions ([`percent_encode`], [`parameter_string`],
[`signature_base_string`], [`hmac_sha1`], [`authorization_header`])
orchestrated by [`Signer`], which draws `oauth_timestamp` from a [`Clock`]
and `oauth_nonce` from a [`NonceGenerator`]. Swap both for [`FixedClock`]
and [`FixedNonce`] to get reproducible signatures.

# How to use

## Signing a request

```rust
use tgrep::{FixedClock, FixedNonce, Parameters, Secrets, Signer};

let secrets = Secrets::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]")
    .token("[ACCESS_TOKEN]", "[TOKEN_SECRET]");

let mut params = Parameters::new();
params.insert("track".into(), "rust".into());

let signer = Signer::new(&secrets)
    .with_clock(FixedClock(1_318_622_958))
    .with_nonce_generator(FixedNonce::new("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg"));
let request = signer
    .authorize("POST", "https://stream.twitter.com/1.1/statuses/filter.json", &params)
    .unwrap();
assert!(request.headers()["authorization"]
    .to_str()
    .unwrap()
    .starts_with("OAuth oauth_consumer_key="));
```

## Reading the filter stream

```rust,no_run
use tgrep::{OAuthClientProvider, Secrets, TweetReaderFuture};

# async fn run() -> tgrep::Result<()> {
let secrets = Secrets::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]")
    .token("[ACCESS_TOKEN]", "[TOKEN_SECRET]");

let mut stream = reqwest::Client::new()
    // enable OAuth1 request
    .oauth1(&secrets)
    .post("https://stream.twitter.com/1.1/statuses/filter.json")
    .form(&[("track", "ครับ")])
    .send()
    .tweet_stream()
    .await?;

while let Some(tweet) = stream.next_tweet().await {
    let tweet = tweet?;
    println!("{} : {} / {}", tweet.created_at, tweet.text, tweet.user.name);
}
# Ok(())
# }
```
*/
mod client;
mod clock;
mod encoding;
mod error;
mod header;
mod nonce;
mod request;
mod secrets;
mod signature;
mod signer;
mod stream;
mod tweets;

// exposed to external program
pub use client::{Client, OAuthClientProvider};
pub use clock::{Clock, FixedClock, SystemClock};
pub use encoding::percent_encode;
pub use error::{Error, Result, SignError, SignResult, StreamError, StreamResult};
pub use header::authorization_header;
pub use nonce::{
    FixedNonce, NonceGenerator, OsRandom, RandomNonce, RandomSource, NONCE_ENTROPY_BYTES,
};
pub use request::RequestBuilder;
pub use secrets::{Secrets, SecretsProvider};
pub use signature::{hmac_sha1, parameter_string, sign, signature_base_string, signing_key};
pub use signer::{make_authorized_request, Parameters, Signer};
pub use stream::{TweetDecoder, TweetReader, TweetReaderFuture, TweetStream};
pub use tweets::{Contributor, Coordinates, Tweet, User};

// exposed constant variables
/// Represents `oauth_consumer_key`.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_signature`.
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
/// Represents `oauth_signature_method`.
pub const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
