//! DOM surgery for the converter: dropping page chrome and picking the
//! content region

use scraper::{Html, Selector};

/// Detaches every element matching one of the strip selectors
///
/// Detached subtrees stay allocated inside the tree but no longer hang off
/// the document root, so later serialization never sees them.
pub(super) fn strip_elements(document: &mut Html, selectors: &[Selector]) {
    let mut doomed = Vec::new();
    for selector in selectors {
        doomed.extend(document.select(selector).map(|element| element.id()));
    }

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Finds the first content selector with a match
///
/// Selectors are tried in configuration order. Returns the matched
/// selector's text together with the serialized HTML of the first element
/// it matched, or None when nothing matches.
pub(super) fn select_content_region<'a>(
    document: &Html,
    selectors: &'a [(String, Selector)],
) -> Option<(&'a str, String)> {
    for (name, selector) in selectors {
        if let Some(element) = document.select(selector).next() {
            return Some((name.as_str(), element.html()));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    #[test]
    fn test_strip_removes_matching_elements() {
        let mut document = Html::parse_document(
            r#"<html><body><script>var tracking = 1;</script><p>Keep me</p></body></html>"#,
        );

        strip_elements(&mut document, &[selector("script")]);

        let html = document.root_element().html();
        assert!(!html.contains("tracking"));
        assert!(html.contains("Keep me"));
    }

    #[test]
    fn test_strip_removes_all_occurrences() {
        let mut document = Html::parse_document(
            r#"<html><body><nav>menu</nav><p>text</p><nav>menu again</nav></body></html>"#,
        );

        strip_elements(&mut document, &[selector("nav")]);

        let html = document.root_element().html();
        assert!(!html.contains("menu"));
    }

    #[test]
    fn test_strip_handles_nested_matches() {
        let mut document = Html::parse_document(
            r#"<html><body><header><nav>menu</nav></header><p>text</p></body></html>"#,
        );

        strip_elements(&mut document, &[selector("header"), selector("nav")]);

        let html = document.root_element().html();
        assert!(!html.contains("menu"));
        assert!(html.contains("text"));
    }

    #[test]
    fn test_select_content_region_first_match_wins() {
        let document = Html::parse_document(
            r#"<html><body><main>general</main><div class="reiki_body">specific</div></body></html>"#,
        );
        let selectors = vec![
            ("div.reiki_body".to_string(), selector("div.reiki_body")),
            ("main".to_string(), selector("main")),
        ];

        let (name, html) = select_content_region(&document, &selectors).unwrap();
        assert_eq!(name, "div.reiki_body");
        assert!(html.contains("specific"));
        assert!(!html.contains("general"));
    }

    #[test]
    fn test_select_content_region_falls_through() {
        let document =
            Html::parse_document(r#"<html><body><main>fallback content</main></body></html>"#);
        let selectors = vec![
            ("div.reiki_body".to_string(), selector("div.reiki_body")),
            ("main".to_string(), selector("main")),
        ];

        let (name, html) = select_content_region(&document, &selectors).unwrap();
        assert_eq!(name, "main");
        assert!(html.contains("fallback content"));
    }

    #[test]
    fn test_select_content_region_no_match() {
        let document = Html::parse_document(r#"<html><body><p>plain</p></body></html>"#);
        let selectors = vec![("article".to_string(), selector("article"))];

        assert!(select_content_region(&document, &selectors).is_none());
    }
}
