//! Filename derivation for saved documents
//!
//! Output filenames come from the document's URL so that a crawl can be
//! re-run and produce the same files. Regulation sites serve thousands of
//! pages named `g1001.html` under different directories, so the parent
//! segment is kept to make the stems distinct.

use url::Url;

/// Derives the output filename stem for a document URL
///
/// # Derivation Steps
///
/// 1. Take the non-empty path segments of the URL (query ignored)
/// 2. Join the last two segments with `_` (just the last if there is only
///    one); a URL with no path segments becomes `index`
/// 3. Strip the trailing extension (final `.` and everything after it)
/// 4. Replace every character outside `A-Z a-z 0-9 . _ -` with `_`
///
/// # Examples
///
/// ```
/// use url::Url;
/// use reiki_harvest::output::document_stem;
///
/// let url = Url::parse("https://www.town.example.lg.jp/reiki_int/honbun/g1001.html").unwrap();
/// assert_eq!(document_stem(&url), "honbun_g1001");
/// ```
pub fn document_stem(url: &Url) -> String {
    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    if segments.is_empty() {
        return "index".to_string();
    }

    let start = segments.len().saturating_sub(2);
    let joined = segments[start..].join("_");

    let sanitized = sanitize(strip_extension(&joined));

    if sanitized.is_empty() {
        "index".to_string()
    } else {
        sanitized
    }
}

/// Removes the final `.ext` suffix, if any
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Replaces filesystem-hostile characters with underscores
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem(s: &str) -> String {
        document_stem(&Url::parse(s).unwrap())
    }

    #[test]
    fn test_last_two_segments_joined() {
        assert_eq!(
            stem("https://www.town.example.lg.jp/reiki_int/honbun/g1001.html"),
            "honbun_g1001"
        );
    }

    #[test]
    fn test_two_segment_path() {
        assert_eq!(
            stem("https://www.town.example.lg.jp/reiki_int/reiki_menu.html"),
            "reiki_int_reiki_menu"
        );
    }

    #[test]
    fn test_single_segment_path() {
        assert_eq!(stem("https://www.town.example.lg.jp/menu.html"), "menu");
    }

    #[test]
    fn test_root_path_is_index() {
        assert_eq!(stem("https://www.town.example.lg.jp/"), "index");
        assert_eq!(stem("https://www.town.example.lg.jp"), "index");
    }

    #[test]
    fn test_extension_stripped_once() {
        assert_eq!(stem("https://example.com/a/b.tar.gz"), "a_b.tar");
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(stem("https://example.com/reiki/dir"), "reiki_dir");
    }

    #[test]
    fn test_query_ignored() {
        assert_eq!(stem("https://example.com/a/b.html?page=2"), "a_b");
    }

    #[test]
    fn test_hostile_characters_replaced() {
        // A space in the path arrives percent-encoded; the percent sign
        // itself is outside the safe set
        assert_eq!(stem("https://example.com/my page.html"), "my_20page");
    }

    #[test]
    fn test_trailing_slash_ignored() {
        assert_eq!(stem("https://example.com/reiki_int/honbun/"), "reiki_int_honbun");
    }

    #[test]
    fn test_same_url_same_stem() {
        let a = stem("https://example.com/reiki_int/honbun/g1001.html");
        let b = stem("https://example.com/reiki_int/honbun/g1001.html");
        assert_eq!(a, b);
    }
}
