use serde::Deserialize;

/// Main configuration structure for Reiki-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl traversal configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL the crawl starts from (the regulation section's table of contents)
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Maximum link depth from the start URL; pages at exactly this depth are
    /// the ones converted and persisted
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of Markdown documents to save before stopping
    #[serde(rename = "max-documents", default = "default_max_documents")]
    pub max_documents: usize,

    /// Minimum character count a converted page must reach to be persisted;
    /// shorter pages are treated as menu/stub noise
    #[serde(rename = "min-content-chars", default = "default_min_content_chars")]
    pub min_content_chars: usize,
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Fixed delay applied before every request (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Additional attempts after a transient failure (timeout, connect, 5xx)
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,
}

/// HTML-to-Markdown conversion configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    /// Ordered CSS selectors tried against the page to find the content
    /// region; the first match wins
    #[serde(rename = "content-selectors", default = "default_content_selectors")]
    pub content_selectors: Vec<String>,

    /// CSS selectors for elements removed before conversion
    #[serde(rename = "strip-selectors", default = "default_strip_selectors")]
    pub strip_selectors: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the converted Markdown documents are written to
    #[serde(rename = "markdown-dir", default = "default_markdown_dir")]
    pub markdown_dir: String,

    /// Optional directory for raw HTML snapshots of every fetched page
    #[serde(rename = "raw-html-dir")]
    pub raw_html_dir: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_delay_ms: default_request_delay_ms(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            content_selectors: default_content_selectors(),
            strip_selectors: default_strip_selectors(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            markdown_dir: default_markdown_dir(),
            raw_html_dir: None,
        }
    }
}

fn default_max_depth() -> u32 {
    2
}

fn default_max_documents() -> usize {
    50
}

fn default_min_content_chars() -> usize {
    500
}

fn default_user_agent() -> String {
    // Matches what the target sites see from an ordinary desktop browser
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    1
}

fn default_content_selectors() -> Vec<String> {
    // Regulation sites wrap the article body in div.reiki_body; "main" and
    // "body" are the generic fallbacks
    vec![
        "div.reiki_body".to_string(),
        "main".to_string(),
        "body".to_string(),
    ]
}

fn default_strip_selectors() -> Vec<String> {
    vec![
        "script".to_string(),
        "style".to_string(),
        "nav".to_string(),
        "header".to_string(),
        "footer".to_string(),
    ]
}

fn default_markdown_dir() -> String {
    "data/processed".to_string()
}
