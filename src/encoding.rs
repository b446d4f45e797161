use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
const TARGETS_FOR_PARAMS: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string as RFC 3986 (and OAuth 1.0a) requires.
///
/// Unreserved characters pass through, every other byte becomes `%XX`.
/// Space is always `%20`, never `+`.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, TARGETS_FOR_PARAMS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_reserved_characters() {
        assert_eq!(
            percent_encode("Ladies + Gentlemen"),
            "Ladies%20%2B%20Gentlemen"
        );
        assert_eq!(
            percent_encode("An encoded string!"),
            "An%20encoded%20string%21"
        );
        assert_eq!(
            percent_encode("Dogs, Cats & Mice"),
            "Dogs%2C%20Cats%20%26%20Mice"
        );
    }

    #[test]
    fn keep_unreserved_characters() {
        assert_eq!(percent_encode("abcXYZ0189"), "abcXYZ0189");
        assert_eq!(percent_encode("-._~"), "-._~");
        assert_eq!(percent_encode(""), "");
    }

    #[test]
    fn encode_multibyte_sequences_bytewise() {
        assert_eq!(percent_encode("☃"), "%E2%98%83");
        assert_eq!(percent_encode("ครับ"), "%E0%B8%84%E0%B8%A3%E0%B8%B1%E0%B8%9A");
    }

    #[test]
    fn never_encode_space_as_plus() {
        assert_eq!(percent_encode(" "), "%20");
        assert_eq!(percent_encode("+"), "%2B");
        assert_eq!(percent_encode("%"), "%25");
    }
}
