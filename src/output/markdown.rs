//! Markdown document persistence
//!
//! Each converted page becomes one `.md` file whose first line records the
//! URL it came from, so a document can always be traced back to the page
//! that produced it.

use crate::output::filename::document_stem;
use crate::output::{OutputError, OutputResult};
use std::path::{Path, PathBuf};
use url::Url;

/// A converted page ready to be persisted
#[derive(Debug, Clone)]
pub struct ConvertedDocument {
    /// The URL the page was fetched from
    pub source_url: Url,

    /// The cleaned Markdown body
    pub markdown: String,
}

/// Writes converted documents into the Markdown output directory
///
/// The directory is created when the writer is built, so a crawl fails
/// up front if the output location is unusable.
pub struct DocumentWriter {
    dir: PathBuf,
}

impl DocumentWriter {
    /// Creates the output directory and returns the writer
    ///
    /// # Arguments
    ///
    /// * `dir` - The directory the documents should land in
    ///
    /// # Returns
    ///
    /// * `Ok(DocumentWriter)` - The directory exists and is usable
    /// * `Err(OutputError)` - The directory could not be created
    pub fn new(dir: impl Into<PathBuf>) -> OutputResult<Self> {
        let dir = dir.into();

        std::fs::create_dir_all(&dir).map_err(|source| OutputError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        Ok(Self { dir })
    }

    /// Returns the directory documents are written into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes one document and returns the path it landed at
    ///
    /// The file content is `Source: <url>` followed by a blank line and the
    /// Markdown body. A document whose URL maps to an existing filename
    /// overwrites it.
    ///
    /// # Arguments
    ///
    /// * `document` - The converted document to persist
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - The path of the written file
    /// * `Err(OutputError)` - The write failed
    pub fn write(&self, document: &ConvertedDocument) -> OutputResult<PathBuf> {
        let path = self
            .dir
            .join(format!("{}.md", document_stem(&document.source_url)));

        let content = format!("Source: {}\n\n{}", document.source_url, document.markdown);

        std::fs::write(&path, content).map_err(|source| OutputError::Write {
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

    fn document(url: &str, markdown: &str) -> ConvertedDocument {
        ConvertedDocument {
            source_url: Url::parse(url).unwrap(),
            markdown: markdown.to_string(),
        }
    }

    #[test]
    fn test_write_creates_file_with_source_line() {
        let dir = TempDir::new().unwrap();
        let writer = DocumentWriter::new(dir.path()).unwrap();

        let doc = document(
            "https://www.town.example.lg.jp/reiki_int/honbun/g1001.html",
            "# 例規\n\n第1条",
        );
        let path = writer.write(&doc).unwrap();

        assert_eq!(path.file_name().unwrap(), "honbun_g1001.md");

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Source: https://www.town.example.lg.jp/reiki_int/honbun/g1001.html\n\n# 例規\n\n第1条"
        );
    }

    #[test]
    fn test_new_creates_nested_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data").join("processed");

        let writer = DocumentWriter::new(&nested).unwrap();
        assert!(nested.is_dir());

        let doc = document("https://example.com/a/b.html", "text");
        assert!(writer.write(&doc).is_ok());
    }

    #[test]
    fn test_same_stem_overwrites() {
        let dir = TempDir::new().unwrap();
        let writer = DocumentWriter::new(dir.path()).unwrap();

        writer
            .write(&document("https://example.com/a/b.html", "first"))
            .unwrap();
        let path = writer
            .write(&document("https://example.com/a/b.html", "second"))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("second"));
    }

    #[test]
    fn test_no_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let writer = DocumentWriter::new(dir.path()).unwrap();

        let path = writer
            .write(&document("https://example.com/a/b.html", "body"))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.ends_with('\n'));
    }
}
