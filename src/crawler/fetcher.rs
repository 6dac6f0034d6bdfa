//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - The politeness delay before every request
//! - Retry logic for transient failures
//! - Decoding response bodies that arrive in legacy Japanese encodings

use crate::config::FetchConfig;
use encoding_rs::Encoding;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors from fetching a single page
///
/// Fetch errors are recoverable at the crawl level: the scheduler logs them
/// and moves on to the next frontier entry.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("HTTP {status} fetching {url}")]
    Status {
        /// The URL that was requested
        url: Url,
        /// The status code the server returned
        status: StatusCode,
    },

    /// The request did not complete within the configured timeout
    #[error("Timed out fetching {url}")]
    Timeout {
        /// The URL that was requested
        url: Url,
    },

    /// Any other transport-level failure
    #[error("Request to {url} failed: {source}")]
    Request {
        /// The URL that was requested
        url: Url,
        /// The underlying client error
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Returns true for failures worth retrying: timeouts, connection
    /// errors, and server-side (5xx) statuses. Client errors such as 404
    /// are permanent and retried never.
    fn is_transient(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => status.is_server_error(),
            FetchError::Timeout { .. } => true,
            FetchError::Request { source, .. } => source.is_connect(),
        }
    }
}

/// HTTP fetcher with politeness delay and bounded retries
///
/// One fetcher is built per crawl and shared across all requests so that
/// connection pooling works. Every attempt, including retries, is preceded
/// by the configured delay.
pub struct Fetcher {
    client: Client,
    delay: Duration,
    max_retries: u32,
}

impl Fetcher {
    /// Builds a fetcher from the fetch configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The fetch configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Fetcher)` - Successfully built fetcher
    /// * `Err(reqwest::Error)` - Failed to build the HTTP client
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            delay: Duration::from_millis(config.request_delay_ms),
            max_retries: config.max_retries,
        })
    }

    /// Fetches a page and returns its body decoded to UTF-8
    ///
    /// # Request Flow
    ///
    /// 1. Sleep for the politeness delay
    /// 2. Send the GET request (redirects are followed by the client)
    /// 3. On a transient failure, go back to step 1 up to `max-retries` times
    /// 4. Decode the body using the Content-Type charset or byte-level
    ///    detection
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to fetch
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The decoded page body
    /// * `Err(FetchError)` - The fetch failed after exhausting retries
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let mut attempt = 0;

        loop {
            tokio::time::sleep(self.delay).await;

            match self.try_fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Retrying {} after error: {} (attempt {}/{})",
                        url,
                        e,
                        attempt,
                        self.max_retries
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Performs a single fetch attempt
    async fn try_fetch(&self, url: &Url) -> Result<String, FetchError> {
        tracing::info!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_error(url, e))?;

        Ok(decode_body(&bytes, content_type.as_deref()))
    }
}

/// Maps a reqwest error to a FetchError variant
fn classify_error(url: &Url, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout { url: url.clone() }
    } else {
        FetchError::Request {
            url: url.clone(),
            source: e,
        }
    }
}

/// Decodes a response body into UTF-8 text
///
/// The encoding comes from the Content-Type charset parameter when one is
/// present, otherwise it is detected from the bytes themselves. Municipal
/// regulation sites frequently serve Shift_JIS or EUC-JP pages without a
/// charset parameter. A byte order mark overrides both.
fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = match content_type.and_then(charset_from_content_type) {
        Some(labeled) => labeled,
        None => {
            let mut detector = chardetng::EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        }
    };

    // decode() sniffs the BOM itself, so a BOM-carrying body decodes
    // correctly even when the label disagrees
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(
            "Replaced malformed byte sequences while decoding as {}",
            actual.name()
        );
    }

    text.into_owned()
}

/// Extracts the charset parameter from a Content-Type header value
fn charset_from_content_type(value: &str) -> Option<&'static Encoding> {
    value
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, charset)| Encoding::for_label(charset.trim().trim_matches('"').as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{EUC_JP, SHIFT_JIS, UTF_8};

    fn create_test_config() -> FetchConfig {
        FetchConfig {
            user_agent: "TestAgent/1.0".to_string(),
            request_delay_ms: 0,
            timeout_secs: 5,
            max_retries: 1,
        }
    }

    #[test]
    fn test_build_fetcher() {
        let config = create_test_config();
        let fetcher = Fetcher::new(&config);
        assert!(fetcher.is_ok());
    }

    #[test]
    fn test_charset_from_content_type() {
        assert_eq!(
            charset_from_content_type("text/html; charset=utf-8"),
            Some(UTF_8)
        );
        assert_eq!(
            charset_from_content_type("text/html; charset=Shift_JIS"),
            Some(SHIFT_JIS)
        );
        assert_eq!(
            charset_from_content_type("text/html; CHARSET=\"EUC-JP\""),
            Some(EUC_JP)
        );
        assert_eq!(charset_from_content_type("text/html"), None);
        assert_eq!(
            charset_from_content_type("text/html; charset=bogus-encoding"),
            None
        );
    }

    #[test]
    fn test_decode_utf8_body() {
        let body = "<html><body>例規集</body></html>";
        let decoded = decode_body(body.as_bytes(), Some("text/html; charset=utf-8"));
        assert_eq!(decoded, body);
    }

    #[test]
    fn test_decode_shift_jis_with_charset_header() {
        let original = "<html><body>例規集の目次</body></html>";
        let (bytes, _, _) = SHIFT_JIS.encode(original);

        let decoded = decode_body(&bytes, Some("text/html; charset=Shift_JIS"));
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_shift_jis_without_charset_header() {
        // No charset parameter: detection has to recognize the bytes
        let original = "<html><body>第一条 この条例は、町の例規を定める。</body></html>";
        let (bytes, _, _) = SHIFT_JIS.encode(original);

        let decoded = decode_body(&bytes, Some("text/html"));
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_euc_jp_without_charset_header() {
        let original = "<html><body>第二条 この規則は、公布の日から施行する。</body></html>";
        let (bytes, _, _) = EUC_JP.encode(original);

        let decoded = decode_body(&bytes, None);
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_bom_overrides_charset_header() {
        let original = "<html><body>付属機関</body></html>";
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(original.as_bytes());

        let decoded = decode_body(&bytes, Some("text/html; charset=Shift_JIS"));
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_transient_classification() {
        let url = Url::parse("https://example.com/").unwrap();

        let server_error = FetchError::Status {
            url: url.clone(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert!(server_error.is_transient());

        let not_found = FetchError::Status {
            url: url.clone(),
            status: StatusCode::NOT_FOUND,
        };
        assert!(!not_found.is_transient());

        let timeout = FetchError::Timeout { url };
        assert!(timeout.is_transient());
    }
}
