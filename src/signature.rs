//! HMAC-SHA1 signature generation (RFC 5849 section 3.4).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::encoding::percent_encode;

type HmacSha1 = Hmac<Sha1>;

/// Build the HMAC key from the consumer secret and the token secret.
///
/// The token secret may be empty; the `&` separator is always present.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// Normalize request parameters (RFC 5849 section 3.4.1.3.2).
///
/// Keys and values are encoded independently, then the `key=value` pairs
/// are sorted byte-wise and joined with `&`. The container's own iteration
/// order never leaks into the output.
pub fn parameter_string<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs = params
        .into_iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                percent_encode(k.as_ref()),
                percent_encode(v.as_ref())
            )
        })
        .collect::<Vec<String>>();
    pairs.sort();
    pairs.join("&")
}

/// Concatenate method, base URL and parameter string into the text to sign.
///
/// The parameter string is already encoded once; it is encoded again here.
pub fn signature_base_string(method: &str, base_url: &str, parameter_string: &str) -> String {
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(base_url),
        percent_encode(parameter_string)
    )
}

/// Sign `base_string` with `key` and return the base64 encoded digest.
pub fn hmac_sha1(key: &str, base_string: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC-SHA1 accepts keys of any size");
    mac.update(base_string.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Compute the `oauth_signature` value for a fully merged parameter set.
///
/// `params` must contain the caller parameters and every oauth_* protocol
/// parameter, but not `oauth_signature` itself.
pub fn sign<I, K, V>(
    consumer_secret: &str,
    token_secret: &str,
    method: &str,
    base_url: &str,
    params: I,
) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let base_string = signature_base_string(method, base_url, &parameter_string(params));
    tracing::trace!(%base_string, "built signature base string");
    hmac_sha1(&signing_key(consumer_secret, token_secret), &base_string)
}
