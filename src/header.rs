use crate::encoding::percent_encode;

const OAUTH_HEADER_SCHEME: &str = "OAuth";

/// Render the `Authorization` header value from the signed oauth_* set.
///
/// Each entry becomes `key="value"` with both sides percent-encoded; the
/// rendered entries are sorted and joined with `", "`.
pub fn authorization_header<I, K, V>(oauth_params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut parts = oauth_params
        .into_iter()
        .map(|(k, v)| {
            format!(
                "{}=\"{}\"",
                percent_encode(k.as_ref()),
                percent_encode(v.as_ref())
            )
        })
        .collect::<Vec<String>>();
    parts.sort();
    format!("{} {}", OAUTH_HEADER_SCHEME, parts.join(", "))
}
