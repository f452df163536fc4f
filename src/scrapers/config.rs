use serde::{Deserialize, Serialize};
use std::time::Duration;

/// CSS selectors for the listing page template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selectors {
    /// Heading in the top section
    pub title: String,
    /// Occupancy status line in the top section
    pub status: String,
    /// Listing code badge
    pub badge: String,
    /// Descriptive paragraph holding the full postal address
    pub address_paragraph: String,
    /// Minimum bid (first price column)
    pub value: String,
    /// Appraisal value (second price column)
    pub evaluation: String,
    /// First list item of the info section
    pub description: String,
    /// First bolded text among the info paragraphs
    pub registration: String,
    /// Bolded text of the second info paragraph
    pub registry: String,
    /// Bolded area line (fourth info paragraph)
    pub area: String,
    /// Auctioneer name in the contact section
    pub contact_name: String,
    /// Auctioneer anchor in the contact section
    pub contact_link: String,
    /// All paragraphs, scanned for the auction date
    pub paragraphs: String,
    /// Structured-data script block
    pub json_ld: String,
}

/// Half-open character range `[start, end)` into a fragment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Character-offset table for the fixed-template fragments.
///
/// The listing template renders these fragments at stable positions; slicing is
/// by character, not byte (the paragraphs carry accented text). A fragment
/// shorter than a span is reported as a template mismatch and yields `None`
/// instead of a garbled slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffsetTable {
    /// Badge text after the 6-character code prefix
    pub source_id: Span,
    /// Leading square meters of the area line
    pub land_area: Span,
    /// Total square meters, 22 characters in
    pub total_area: Span,
    pub address: Span,
    pub neighborhood: Span,
    pub city: Span,
    pub state: Span,
    pub zip_code: Span,
}

/// Immutable site configuration passed into the pipeline.
///
/// Carries everything template-specific: start URLs, the user-agent pool the
/// fetcher rotates through, selectors and character offsets. Swapping this out
/// retargets the scraper at another listing template without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub start_urls: Vec<String>,
    pub user_agents: Vec<String>,
    pub selectors: Selectors,
    pub offsets: OffsetTable,
    /// Pause after every geocoding lookup, per provider usage policy
    pub geocode_cooldown: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            start_urls: vec![
                "https://www.santanderimoveis.com.br/venda/imovel/casa-a-venda-na-rua-lamartine-babo-paulinia-sp-codigo-6663-santander-imoveis/".to_string(),
            ],
            user_agents: vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3".to_string(),
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) AppleWebKit/602.3.12 (KHTML, like Gecko) Version/10.0.3 Safari/602.3.12".to_string(),
            ],
            selectors: Selectors {
                title: "section.main-top h1".to_string(),
                status: "section.main-top div strong".to_string(),
                badge: "span.badge".to_string(),
                address_paragraph: "section.main-top p".to_string(),
                value: "div.values-line-values div strong".to_string(),
                evaluation: "div.values-line-values div:nth-of-type(2) strong".to_string(),
                description: "section.main-info li".to_string(),
                registration: "section.main-info p strong".to_string(),
                registry: "section.main-info p:nth-of-type(2) strong".to_string(),
                area: "section.main-info p:nth-of-type(4) strong".to_string(),
                contact_name: "section.main-atendimento div strong".to_string(),
                contact_link: "section.main-atendimento div a".to_string(),
                paragraphs: "p".to_string(),
                json_ld: r#"script[type="application/ld+json"]"#.to_string(),
            },
            offsets: OffsetTable {
                source_id: Span { start: 6, end: 14 },
                land_area: Span { start: 0, end: 3 },
                total_area: Span { start: 22, end: 25 },
                address: Span { start: 0, end: 23 },
                neighborhood: Span { start: 106, end: 116 },
                city: Span { start: 118, end: 126 },
                state: Span { start: 129, end: 131 },
                zip_code: Span { start: 138, end: 146 },
            },
            geocode_cooldown: Duration::from_secs(1),
        }
    }
}
