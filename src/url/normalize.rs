use crate::UrlError;
use url::Url;

/// Normalizes a URL string into the canonical form used for frontier and
/// visited-set bookkeeping
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Require an http or https scheme
/// 3. Require a host
/// 4. Remove the fragment (everything after #)
///
/// The host is kept exactly as parsed. Municipal sites serve the regulation
/// pages from a single fixed host, so `www.` prefixes and subdomains are
/// significant and must not be folded together.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse or validate the URL
///
/// # Examples
///
/// ```
/// use reiki_harvest::url::normalize_url;
///
/// let url = normalize_url("https://www.town.example.lg.jp/reiki/menu.html#top").unwrap();
/// assert_eq!(url.as_str(), "https://www.town.example.lg.jp/reiki/menu.html");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_url() {
        let result = normalize_url("https://example.com/page").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_keeps_www_prefix() {
        let result = normalize_url("https://www.town.example.lg.jp/reiki/").unwrap();
        assert_eq!(result.host_str(), Some("www.town.example.lg.jp"));
    }

    #[test]
    fn test_removes_fragment() {
        let result = normalize_url("https://example.com/page#section").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_fragment_variants_collapse() {
        let a = normalize_url("https://example.com/page#sec1").unwrap();
        let b = normalize_url("https://example.com/page#sec2").unwrap();
        let c = normalize_url("https://example.com/page").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_keeps_query() {
        let result = normalize_url("https://example.com/page?id=3#top").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page?id=3");
    }

    #[test]
    fn test_lowercases_host() {
        let result = normalize_url("https://EXAMPLE.COM/Page").unwrap();
        assert_eq!(result.host_str(), Some("example.com"));
        assert_eq!(result.path(), "/Page");
    }

    #[test]
    fn test_allows_http() {
        let result = normalize_url("http://example.com/page").unwrap();
        assert_eq!(result.scheme(), "http");
    }

    #[test]
    fn test_invalid_scheme() {
        let result = normalize_url("ftp://example.com/page");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_malformed_url() {
        let result = normalize_url("not a url");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_path_becomes_root() {
        let result = normalize_url("https://example.com").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_url("https://example.com/a/b.html#frag").unwrap();
        let twice = normalize_url(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }
}
