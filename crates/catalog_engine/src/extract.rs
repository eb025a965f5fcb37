use scraper::{Html, Selector};

/// What a Kattis problem page tells us about the problem.
#[derive(Debug, Clone, PartialEq)]
pub struct KattisPage {
    pub title: Option<String>,
    /// Kattis rating on its own 1.0..=10.0 scale.
    pub rating: Option<f64>,
}

pub trait PageExtractor: Send + Sync {
    fn extract(&self, html: &str) -> KattisPage;
}

/// Reads the first `<h1>` as the title and the difficulty badge as rating.
///
/// Newer pages use `.difficulty_number`, older ones a plain `.difficulty`
/// block. Ratings shown as a range (`2.1 - 3.4`) keep the lower bound.
#[derive(Debug, Default)]
pub struct KattisPageExtractor;

impl PageExtractor for KattisPageExtractor {
    fn extract(&self, html: &str) -> KattisPage {
        let doc = Html::parse_document(html);
        let title = first_text(&doc, "h1");
        let rating = first_text(&doc, ".difficulty_number, .difficulty")
            .as_deref()
            .and_then(leading_number);
        KattisPage { title, rating }
    }
}

fn first_text(doc: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    doc.select(&selector)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

fn leading_number(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    rest[..end].trim_end_matches('.').parse().ok()
}
