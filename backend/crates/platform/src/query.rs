//! Query-string helpers

pub use reqwest::Url;

/// Read a single query parameter from a URL
///
/// Returns the first non-empty value for `name`, percent-decoded.
/// An empty value (`?webhook=`) is treated the same as an absent one.
pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Parse an absolute http(s) URL
///
/// Anything with another scheme is rejected.
pub fn parse_http_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_present() {
        let url = Url::parse(
            "https://app.example/?webhook=https%3A%2F%2Fbot.example%2Fhook%3Fid%3D1&x=2",
        )
        .unwrap();
        assert_eq!(
            query_param(&url, "webhook").as_deref(),
            Some("https://bot.example/hook?id=1")
        );
        assert_eq!(query_param(&url, "x").as_deref(), Some("2"));
    }

    #[test]
    fn test_query_param_absent_or_empty() {
        let url = Url::parse("https://app.example/?webhook=").unwrap();
        assert_eq!(query_param(&url, "webhook"), None);

        let url = Url::parse("https://app.example/").unwrap();
        assert_eq!(query_param(&url, "webhook"), None);
    }

    #[test]
    fn test_parse_http_url() {
        assert!(parse_http_url("https://bot.example/hook").is_some());
        assert!(parse_http_url(" http://127.0.0.1:8080/x ").is_some());
        assert!(parse_http_url("ftp://bot.example/hook").is_none());
        assert!(parse_http_url("not a url").is_none());
    }
}
