//! Raw HTML snapshots
//!
//! When a snapshot directory is configured, every fetched page is also
//! written out as the decoded HTML it was fetched as, menus included.
//! Snapshots make it possible to re-run conversion with different
//! selectors without hitting the site again.

use crate::output::filename::document_stem;
use crate::output::{OutputError, OutputResult};
use std::path::PathBuf;
use url::Url;

/// Writes decoded page HTML into the snapshot directory
pub struct RawHtmlWriter {
    dir: PathBuf,
}

impl RawHtmlWriter {
    /// Creates the snapshot directory and returns the writer
    pub fn new(dir: impl Into<PathBuf>) -> OutputResult<Self> {
        let dir = dir.into();

        std::fs::create_dir_all(&dir).map_err(|source| OutputError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        Ok(Self { dir })
    }

    /// Writes the HTML a page decoded to, named like its Markdown sibling
    pub fn write(&self, url: &Url, html: &str) -> OutputResult<PathBuf> {
        let path = self.dir.join(format!("{}.html", document_stem(url)));

        std::fs::write(&path, html).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_snapshot() {
        let dir = TempDir::new().unwrap();
        let writer = RawHtmlWriter::new(dir.path()).unwrap();

        let url = Url::parse("https://www.town.example.lg.jp/reiki_int/honbun/g1001.html").unwrap();
        let path = writer.write(&url, "<html><body>本文</body></html>").unwrap();

        assert_eq!(path.file_name().unwrap(), "honbun_g1001.html");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<html><body>本文</body></html>"
        );
    }
}
