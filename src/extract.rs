//! Citation count extraction from a citation detail page.
//!
//! The page markup is not under our control, so extraction is a fallback
//! chain: structural selectors first, each required to hold a bare integer in
//! a plausible range, then a loose "Cited by N" scan of the raw document.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Tried in order; the first qualifying element wins.
pub const CITATION_SELECTORS: &[&str] = &[
    "div.gsc_oci_value",
    "a.gsc_oci_g_a",
    "div.gsc_value",
    "td.gsc_rsb_std",
    "div.gsc_value_ccl",
];

static CITED_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Cited by[^0-9]*([0-9]+)").expect("valid regex"));

/// Extract a citation count, or `None` when nothing recognizable is present.
pub fn extract_citation_count(html: &str, max_plausible: u32) -> Option<u32> {
    structural_count(html, max_plausible).or_else(|| cited_by_count(html))
}

/// A selector match counts only if its whole text is an integer in
/// `1..max_plausible`; this keeps years and ids out.
pub fn structural_count(html: &str, max_plausible: u32) -> Option<u32> {
    let document = Html::parse_document(html);

    for selector_str in CITATION_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            let text: String = element.text().collect();
            let text = text.trim();
            if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            if let Ok(n) = text.parse::<u32>() {
                if n > 0 && n < max_plausible {
                    return Some(n);
                }
            }
        }
    }

    None
}

pub fn cited_by_count(html: &str) -> Option<u32> {
    CITED_BY.captures(html)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u32 = 10_000;

    #[test]
    fn test_cited_by_fallback() {
        let html = "<html><body><div class=\"other\">Cited by 42</div></body></html>";
        assert_eq!(extract_citation_count(html, MAX), Some(42));
    }

    #[test]
    fn test_cited_by_across_markup() {
        let html = r#"<a href="/scholar?cites=1">CITED BY <b>17</b></a>"#;
        assert_eq!(cited_by_count(html), Some(17));
    }

    #[test]
    fn test_structural_selector_wins() {
        let html = r#"
            <div class="gsc_oci_value">Cited by 99</div>
            <table><tr><td class="gsc_rsb_std">38</td></tr></table>
        "#;
        // the first selector's element is not a bare integer, so the table cell wins
        assert_eq!(extract_citation_count(html, MAX), Some(38));
    }

    #[test]
    fn test_selector_priority() {
        let html = r#"
            <table><tr><td class="gsc_rsb_std">5</td></tr></table>
            <a class="gsc_oci_g_a">7</a>
        "#;
        assert_eq!(structural_count(html, MAX), Some(7));
    }

    #[test]
    fn test_out_of_range_falls_through() {
        let zero = r#"<div class="gsc_oci_value">0</div><p>Cited by 3</p>"#;
        assert_eq!(extract_citation_count(zero, MAX), Some(3));

        let year = r#"<div class="gsc_value">2022</div><div class="gsc_value">12</div>"#;
        assert_eq!(extract_citation_count(year, 2000), Some(12));

        let huge = r#"<div class="gsc_oci_value">10000</div>"#;
        assert_eq!(extract_citation_count(huge, MAX), None);
    }

    #[test]
    fn test_nothing_recognizable() {
        assert_eq!(extract_citation_count("<html><p>hello</p></html>", MAX), None);
        assert_eq!(extract_citation_count("", MAX), None);
    }
}
