use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::warn;

use crate::scrapers::config::{OffsetTable, Span};

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}/\d{2}/\d{4} - \d{2}:\d{2}").unwrap());
static HOST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://[^/]+").unwrap());

/// Postal fields sliced out of the descriptive address paragraph.
///
/// Transient: only valid while the paragraph still follows the listing
/// template the offsets were measured against.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressParts {
    pub address: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl AddressParts {
    /// Free-text geocoding query, country-qualified.
    pub fn geocode_query(&self) -> String {
        format!(
            "{}, {}, {}, {}, Brazil",
            self.address, self.neighborhood, self.city, self.state
        )
    }
}

/// Collapse a price fragment to its digit runs, in order.
///
/// "R$ 1.234,00" becomes "123400": currency symbol, thousands separator and
/// decimal marker are all dropped, so decimal precision is not preserved.
pub fn digits_only(raw: &str) -> String {
    DIGITS_RE.find_iter(raw).map(|m| m.as_str()).collect()
}

/// First `DD/MM/YYYY - HH:MM` occurrence across `texts`, rewritten to
/// `YYYY-MM-DDTHH:MM:00`. `None` when no text carries a real date.
pub fn first_datetime<S: AsRef<str>>(texts: &[S]) -> Option<String> {
    texts.iter().find_map(|t| datetime_in(t.as_ref()))
}

fn datetime_in(text: &str) -> Option<String> {
    let m = DATE_RE.find(text)?;
    let parsed = NaiveDateTime::parse_from_str(m.as_str(), "%d/%m/%Y - %H:%M").ok()?;
    Some(parsed.format("%Y-%m-%dT%H:%M:00").to_string())
}

/// `protocol://host` portion of an absolute URL, `None` for anything else.
pub fn host_prefix(url: &str) -> Option<String> {
    HOST_RE.find(url).map(|m| m.as_str().to_string())
}

/// First whitespace-delimited token.
pub fn first_token(text: &str) -> Option<String> {
    text.split_whitespace().next().map(str::to_string)
}

/// Characters `[span.start, span.end)` of `raw`, or `None` when the fragment is
/// shorter than the span expects.
pub fn char_span(raw: &str, span: Span) -> Option<String> {
    if raw.chars().count() < span.end {
        return None;
    }
    Some(
        raw.chars()
            .skip(span.start)
            .take(span.end - span.start)
            .collect(),
    )
}

/// Slice the address paragraph into postal fields at the configured offsets.
///
/// The template sentinel is the paragraph length: anything shorter than the
/// last span cannot follow the expected layout, so the whole composite is
/// dropped rather than sliced into garbage.
pub fn split_address(paragraph: &str, offsets: &OffsetTable) -> Option<AddressParts> {
    if paragraph.chars().count() < offsets.zip_code.end {
        warn!(
            chars = paragraph.chars().count(),
            "address paragraph shorter than template, dropping postal fields"
        );
        return None;
    }
    Some(AddressParts {
        address: char_span(paragraph, offsets.address)?,
        neighborhood: char_span(paragraph, offsets.neighborhood)?,
        city: char_span(paragraph, offsets.city)?,
        state: char_span(paragraph, offsets.state)?,
        zip_code: char_span(paragraph, offsets.zip_code)?,
    })
}

/// Slice the area line into (land area, total area) at the configured offsets.
pub fn split_area(raw: &str, offsets: &OffsetTable) -> Option<(String, String)> {
    match (
        char_span(raw, offsets.land_area),
        char_span(raw, offsets.total_area),
    ) {
        (Some(land), Some(total)) => Some((land, total)),
        _ => {
            warn!(
                chars = raw.chars().count(),
                "area line shorter than template, dropping areas"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::config::SiteConfig;

    // Matches the offset table in SiteConfig::default exactly.
    const ADDRESS_PARAGRAPH: &str = "Rua Lamartine Babo, 110 - Casa, N° 110, Quadra G, \
        Loteamento Residencial Jardim das Flores Azuis, fundos, Jd. Amélia, Paulínia - SP \
        - CEP:13171-574";

    #[test]
    fn currency_strips_everything_but_digits() {
        assert_eq!(digits_only("R$ 1.234,00"), "123400");
        assert_eq!(digits_only("R$ 180.500,00"), "18050000");
        assert_eq!(digits_only("sem valor"), "");
    }

    #[test]
    fn date_rewritten_to_iso() {
        let texts = vec!["Primeiro leilão: 05/03/2024 - 14:30".to_string()];
        assert_eq!(
            first_datetime(&texts),
            Some("2024-03-05T14:30:00".to_string())
        );
    }

    #[test]
    fn date_takes_first_match_in_order() {
        let texts = vec![
            "sem data".to_string(),
            "Primeiro leilão: 05/03/2024 - 14:30".to_string(),
            "Segundo leilão: 20/03/2024 - 14:30".to_string(),
        ];
        assert_eq!(
            first_datetime(&texts),
            Some("2024-03-05T14:30:00".to_string())
        );
    }

    #[test]
    fn date_absent_or_impossible_yields_none() {
        assert_eq!(first_datetime(&["encerrado".to_string()]), None);
        // Pattern-shaped but not a real calendar date: absent, never garbled.
        assert_eq!(first_datetime(&["99/99/9999 - 99:99".to_string()]), None);
        assert_eq!(first_datetime(&Vec::<String>::new()), None);
    }

    #[test]
    fn host_prefix_of_absolute_url() {
        assert_eq!(
            host_prefix("https://www.santanderimoveis.com.br/venda/imovel/casa-6663/"),
            Some("https://www.santanderimoveis.com.br".to_string())
        );
        assert_eq!(host_prefix("/venda/imovel/casa-6663/"), None);
    }

    #[test]
    fn first_token_of_title() {
        assert_eq!(
            first_token("Casa a venda na Rua Lamartine Babo"),
            Some("Casa".to_string())
        );
        assert_eq!(first_token("   "), None);
    }

    #[test]
    fn char_span_counts_characters_not_bytes() {
        // "Código" is 6 characters but 7 bytes; byte slicing would shift this.
        assert_eq!(
            char_span("Cód.: 12345678 - SP", Span { start: 6, end: 14 }),
            Some("12345678".to_string())
        );
    }

    #[test]
    fn char_span_short_fragment_is_none() {
        assert_eq!(char_span("Cód.: 12", Span { start: 6, end: 14 }), None);
    }

    #[test]
    fn address_paragraph_splits_at_template_offsets() {
        let offsets = SiteConfig::default().offsets;
        let parts = split_address(ADDRESS_PARAGRAPH, &offsets).unwrap();
        assert_eq!(parts.address, "Rua Lamartine Babo, 110");
        assert_eq!(parts.neighborhood, "Jd. Amélia");
        assert_eq!(parts.city, "Paulínia");
        assert_eq!(parts.state, "SP");
        // The zip span is 8 characters wide and truncates the 9-character CEP.
        assert_eq!(parts.zip_code, "13171-57");
    }

    #[test]
    fn short_paragraph_is_a_template_mismatch() {
        let offsets = SiteConfig::default().offsets;
        assert_eq!(split_address("Rua Lamartine Babo, 110", &offsets), None);
    }

    #[test]
    fn area_line_splits_at_template_offsets() {
        let offsets = SiteConfig::default().offsets;
        assert_eq!(
            split_area("250 m² de terreno com 180 m² de área construída", &offsets),
            Some(("250".to_string(), "180".to_string()))
        );
        assert_eq!(split_area("250 m²", &offsets), None);
    }

    #[test]
    fn geocode_query_is_country_qualified() {
        let offsets = SiteConfig::default().offsets;
        let parts = split_address(ADDRESS_PARAGRAPH, &offsets).unwrap();
        assert_eq!(
            parts.geocode_query(),
            "Rua Lamartine Babo, 110, Jd. Amélia, Paulínia, SP, Brazil"
        );
    }
}
