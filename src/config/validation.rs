use crate::config::types::{Config, ConvertConfig, CrawlerConfig, FetchConfig, OutputConfig};
use crate::url::normalize_url;
use crate::ConfigError;
use scraper::Selector;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetch_config(&config.fetch)?;
    validate_convert_config(&config.convert)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    normalize_url(&config.start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start-url: {}", e)))?;

    if config.max_documents < 1 {
        return Err(ConfigError::Validation(format!(
            "max-documents must be >= 1, got {}",
            config.max_documents
        )));
    }

    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates convert configuration
fn validate_convert_config(config: &ConvertConfig) -> Result<(), ConfigError> {
    if config.content_selectors.is_empty() {
        return Err(ConfigError::Validation(
            "content-selectors cannot be empty".to_string(),
        ));
    }

    for selector in config
        .content_selectors
        .iter()
        .chain(config.strip_selectors.iter())
    {
        validate_selector(selector)?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.markdown_dir.is_empty() {
        return Err(ConfigError::Validation(
            "markdown-dir cannot be empty".to_string(),
        ));
    }

    if let Some(dir) = &config.raw_html_dir {
        if dir.is_empty() {
            return Err(ConfigError::Validation(
                "raw-html-dir cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates a single CSS selector string
fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    if selector.is_empty() {
        return Err(ConfigError::InvalidSelector(selector.to_string()));
    }

    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector(selector.to_string()))?;

    Ok(())
}
