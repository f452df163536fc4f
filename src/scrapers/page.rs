use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

/// Parsed listing page: the HTML tree plus its embedded JSON-LD payload.
///
/// Lookups return the first match in document order and `None` when nothing
/// matches; a missing node is the expected failure mode for the extractors
/// downstream, never a panic. An unparseable selector string is treated the
/// same way as a selector that matches nothing.
pub struct PageDocument {
    html: Html,
    json_ld: Option<Value>,
}

impl PageDocument {
    /// Parse a page body; the JSON-LD block is decoded eagerly so a malformed
    /// script only costs the structured-data fields.
    pub fn parse(body: &str, json_ld_selector: &str) -> Self {
        let html = Html::parse_document(body);
        let json_ld = Self::parse_json_ld(&html, json_ld_selector);
        if json_ld.is_none() {
            debug!("no usable JSON-LD block on page");
        }
        Self { html, json_ld }
    }

    fn parse_json_ld(html: &Html, selector: &str) -> Option<Value> {
        let sel = Selector::parse(selector).ok()?;
        let raw: String = html.select(&sel).next()?.text().collect();
        serde_json::from_str(&raw).ok()
    }

    /// Text of the first node matching `selector`.
    pub fn text(&self, selector: &str) -> Option<String> {
        let sel = Selector::parse(selector).ok()?;
        self.html
            .select(&sel)
            .next()
            .map(|el| el.text().collect())
    }

    /// Attribute `name` of the first node matching `selector`.
    pub fn attr(&self, selector: &str, name: &str) -> Option<String> {
        let sel = Selector::parse(selector).ok()?;
        self.html
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr(name))
            .map(str::to_string)
    }

    /// Texts of every node matching `selector`, in document order.
    pub fn texts(&self, selector: &str) -> Vec<String> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.html
            .select(&sel)
            .map(|el| el.text().collect())
            .collect()
    }

    /// The decoded JSON-LD payload, if the page carried a valid one.
    pub fn json_ld(&self) -> Option<&Value> {
        self.json_ld.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

    fn page(body: &str) -> PageDocument {
        PageDocument::parse(body, LD_SELECTOR)
    }

    #[test]
    fn text_returns_first_match_in_document_order() {
        let doc = page("<div><p>primeiro</p><p>segundo</p></div>");
        assert_eq!(doc.text("p"), Some("primeiro".to_string()));
    }

    #[test]
    fn missing_node_is_none_not_a_panic() {
        let doc = page("<div><p>texto</p></div>");
        assert_eq!(doc.text("h1"), None);
        assert_eq!(doc.attr("a", "href"), None);
    }

    #[test]
    fn invalid_selector_behaves_like_no_match() {
        let doc = page("<p>texto</p>");
        assert_eq!(doc.text("p:::"), None);
        assert!(doc.texts("p:::").is_empty());
    }

    #[test]
    fn attr_of_first_match() {
        let doc = page(r#"<div><a href="/um">a</a><a href="/dois">b</a></div>"#);
        assert_eq!(doc.attr("a", "href"), Some("/um".to_string()));
        assert_eq!(doc.attr("a", "rel"), None);
    }

    #[test]
    fn texts_collects_all_matches() {
        let doc = page("<p>um</p><p>dois</p>");
        assert_eq!(doc.texts("p"), vec!["um".to_string(), "dois".to_string()]);
    }

    #[test]
    fn json_ld_decoded_when_valid() {
        let doc = page(
            r#"<script type="application/ld+json">{"@graph":[{"@type":"Place"}]}</script>"#,
        );
        assert!(doc.json_ld().is_some());
    }

    #[test]
    fn malformed_json_ld_is_none() {
        let doc = page(r#"<script type="application/ld+json">{not json</script>"#);
        assert!(doc.json_ld().is_none());
        let doc = page("<p>sem script</p>");
        assert!(doc.json_ld().is_none());
    }
}
