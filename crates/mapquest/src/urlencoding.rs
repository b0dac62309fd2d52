//! Percent-decoding for API keys
//!
//! MapQuest hands out keys that are often copied from URLs still encoded
//! (`Fmjtd%7Cluur...`). They are decoded once when the client is built, so the
//! query string encoder does not encode them a second time.

/// Decode `%XX` sequences
///
/// Malformed sequences are kept verbatim and `+` is not treated as a space.
/// Invalid UTF-8 after decoding is replaced with U+FFFD.
pub fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%'
            && let (Some(hi), Some(lo)) = (
                bytes.get(i + 1).copied().and_then(hex_value),
                bytes.get(i + 2).copied().and_then(hex_value),
            )
        {
            out.push((hi << 4) | lo);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// True if the input contains a `%` and therefore may need decoding
pub fn is_encoded(input: &str) -> bool {
    input.contains('%')
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_mapquest_key() {
        assert_eq!(
            decode("Fmjtd%7Cluur2hu7nu%2C2l%3Do5-9w1g9u"),
            "Fmjtd|luur2hu7nu,2l=o5-9w1g9u"
        );
    }

    #[test]
    fn decode_plain_text() {
        assert_eq!(decode("abc-123_test"), "abc-123_test");
    }

    #[test]
    fn decode_keeps_plus() {
        assert_eq!(decode("a+b"), "a+b");
    }

    #[test]
    fn decode_malformed_sequences() {
        assert_eq!(decode("100%"), "100%");
        assert_eq!(decode("%zz"), "%zz");
        assert_eq!(decode("%4"), "%4");
    }

    #[test]
    fn decode_lowercase_hex() {
        assert_eq!(decode("%7c"), "|");
    }

    #[test]
    fn decode_unicode() {
        assert_eq!(decode("M%C3%BCnchen"), "München");
    }

    #[test]
    fn detects_encoding() {
        assert!(is_encoded("a%7Cb"));
        assert!(!is_encoded("a|b"));
    }
}
