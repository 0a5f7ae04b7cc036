//! Pulls the 24K / 10 gram retail price out of an upstream rate page.
//!
//! Upstream layouts change without notice, so matching is deliberately loose:
//! any `<table>` whose text mentions both "10 gram" and "24" qualifies, and
//! inside it the first row whose first cell mentions "10" supplies the price
//! from its second cell. If that cell is not a number the page is a miss;
//! later rows are other products and are never consulted.

use scraper::{ElementRef, Html, Selector};

/// Exclusive bounds for a believable retail quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    pub min: u64,
    pub max: u64,
}

impl PriceBand {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: u64) -> bool {
        self.min < price && price < self.max
    }
}

pub struct PriceExtractor {
    band: PriceBand,
}

impl PriceExtractor {
    pub fn new(band: PriceBand) -> Self {
        Self { band }
    }

    pub fn extract(&self, markup: &str) -> Option<u64> {
        let document = Html::parse_document(markup);
        let tables = selector("table");
        let rows = selector("tr");
        let cells = selector("td");

        for table in document.select(&tables) {
            let table_text = element_text(&table).to_lowercase();
            if !(table_text.contains("10 gram") && table_text.contains("24")) {
                continue;
            }

            for row in table.select(&rows) {
                let cols: Vec<ElementRef> = row.select(&cells).collect();
                if cols.len() < 2 || !element_text(&cols[0]).contains("10") {
                    continue;
                }

                let raw = element_text(&cols[1]);
                let price = normalize_price_text(&raw);
                if price.is_none() {
                    tracing::debug!("Unparseable price cell: {:?}", raw.trim());
                }
                return price;
            }
        }

        None
    }

    /// Out-of-band values are usually a different product (paper gold, per
    /// gram quotes) and are dropped with a warning.
    pub fn validate(&self, price: u64) -> bool {
        if self.band.contains(price) {
            return true;
        }
        tracing::warn!("⚠️ Rejected suspicious price: {}", price);
        false
    }
}

/// Strips the rupee sign, thousands separators and decimal points, then
/// parses what is left as a whole number.
///
/// Decimal points are removed, not honoured: `"₹1,68,450.00"` becomes
/// `16845000`, which the band check then rejects.
pub fn normalize_price_text(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '₹' | ',' | '.'))
        .collect();
    let digits = cleaned.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector")
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> PriceExtractor {
        PriceExtractor::new(PriceBand::new(140_000, 180_000))
    }

    fn rate_page(rows: &str) -> String {
        format!(
            r#"<html><body>
            <table><tr><th>Gram</th><th>24 Carat Gold Today</th></tr>{}</table>
            </body></html>"#,
            rows
        )
    }

    #[test]
    fn test_normalize_price_text_table() {
        let cases = [
            ("1,68,450", Some(168_450)),
            ("₹1,68,450", Some(168_450)),
            ("₹ 1,68,450", Some(168_450)),
            ("₹1,68,450.00", Some(16_845_000)),
            ("  170500  ", Some(170_500)),
            ("78,000", Some(78_000)),
            ("1.5", Some(15)),
            ("", None),
            ("₹", None),
            ("N/A", None),
            ("₹1,68,450 ▲120", None),
            ("-168450", None),
            ("Rs 168450", None),
        ];

        for (raw, expected) in cases {
            assert_eq!(normalize_price_text(raw), expected, "input {:?}", raw);
        }
    }

    #[test]
    fn test_validate_is_exclusive_at_both_ends() {
        let extractor = extractor();
        assert!(!extractor.validate(140_000));
        assert!(extractor.validate(140_001));
        assert!(extractor.validate(168_450));
        assert!(extractor.validate(179_999));
        assert!(!extractor.validate(180_000));
        assert!(!extractor.validate(78_000));
        assert!(!extractor.validate(0));
    }

    #[test]
    fn test_extract_from_qualifying_table() {
        let page = rate_page(
            "<tr><td>1 Gram</td><td>₹16,845</td></tr>\
             <tr><td>10 Gram</td><td>₹1,68,450</td></tr>\
             <tr><td>100 Gram</td><td>₹16,84,500</td></tr>",
        );
        assert_eq!(extractor().extract(&page), Some(168_450));
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        let page = r#"<table>
            <tr><td>10 GRAM</td><td>₹1,70,500</td></tr>
            <tr><td>Purity</td><td>24K</td></tr>
        </table>"#;
        assert_eq!(extractor().extract(page), Some(170_500));
    }

    #[test]
    fn test_table_without_markers_is_skipped() {
        let page = r#"
            <table><tr><td>10 Gram</td><td>₹78,000</td></tr></table>
            <table>
              <tr><th>Gram</th><th>24K Gold</th></tr>
              <tr><td>10 gram</td><td>₹1,65,000</td></tr>
            </table>"#;
        // first table mentions "10 gram" but never "24"
        assert_eq!(extractor().extract(page), Some(165_000));
    }

    #[test]
    fn test_rows_need_two_cells_and_a_ten() {
        let page = rate_page(
            "<tr><td>10 Gram</td></tr>\
             <tr><td>8 Gram</td><td>₹1,34,760</td></tr>\
             <tr><td>10 Gram</td><td>₹1,68,450</td></tr>",
        );
        assert_eq!(extractor().extract(&page), Some(168_450));
    }

    #[test]
    fn test_unparseable_cell_ends_extraction() {
        let page = rate_page(
            "<tr><td>10 Gram</td><td>Call us</td></tr>\
             <tr><td>10 Gram (22K)</td><td>₹1,54,400</td></tr>",
        );
        assert_eq!(extractor().extract(&page), None);

        // a later qualifying table does not rescue the page either
        let page = format!(
            "{}<table><tr><td>10 gram 24K</td><td>₹1,62,000</td></tr></table>",
            rate_page("<tr><td>10 Gram</td><td>N/A</td></tr>")
        );
        assert_eq!(extractor().extract(&page), None);
    }

    #[test]
    fn test_extract_does_not_validate() {
        let page = rate_page("<tr><td>10 Gram</td><td>₹78,000</td></tr>");
        assert_eq!(extractor().extract(&page), Some(78_000));
    }

    #[test]
    fn test_no_table_yields_nothing() {
        assert_eq!(extractor().extract("<html><body>10 gram 24K</body></html>"), None);
        assert_eq!(extractor().extract(""), None);
    }

    #[test]
    fn test_cell_text_includes_nested_markup() {
        let page = rate_page(
            "<tr><td><b>10</b> Gram</td><td><span>₹</span><strong>1,71,200</strong></td></tr>",
        );
        assert_eq!(extractor().extract(&page), Some(171_200));
    }
}
