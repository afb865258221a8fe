//! Cookie string parsing
//!
//! The backend issues the CSRF token as a cookie; the client reads it back out
//! of a `name=value; name2=value2` cookie string the way the browser layer
//! did: scan for the name, trim surrounding whitespace, percent-decode the
//! value.

use percent_encoding::percent_decode_str;

/// Name of the cookie carrying the CSRF token
pub const CSRF_COOKIE: &str = "csrftoken";

/// Extract a cookie value by name from a cookie string
///
/// Returns `None` when the cookie is absent. Values that fail to decode as
/// UTF-8 after percent-decoding are returned verbatim.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    for part in cookies.split(';') {
        let mut split = part.splitn(2, '=');
        let key = split.next()?.trim();
        if key != name {
            continue;
        }
        let value = split.next()?.trim();
        return Some(
            percent_decode_str(value)
                .decode_utf8()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string()),
        );
    }
    None
}

/// Extract the CSRF token from a cookie string
pub fn csrf_token(cookies: &str) -> Option<String> {
    cookie_value(cookies, CSRF_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cookie() {
        assert_eq!(
            csrf_token("csrftoken=abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_multiple_cookies_with_whitespace() {
        assert_eq!(
            csrf_token("sessionid=s1; csrftoken=abc123; theme=dark"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_percent_decoded_value() {
        assert_eq!(
            cookie_value("next=%2Fpipelines%2F", "next"),
            Some("/pipelines/".to_string())
        );
    }

    #[test]
    fn test_missing_cookie() {
        assert_eq!(csrf_token("sessionid=s1; theme=dark"), None);
    }

    #[test]
    fn test_name_must_match_exactly() {
        // A cookie whose name merely starts with the target must not match
        assert_eq!(csrf_token("csrftoken2=nope; other=x"), None);
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(csrf_token(""), None);
    }

    #[test]
    fn test_value_containing_equals() {
        assert_eq!(
            cookie_value("payload=a=b=c", "payload"),
            Some("a=b=c".to_string())
        );
    }
}
