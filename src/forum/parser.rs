use scraper::{Html, Selector};

use crate::error::{Error, Result};

pub fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| Error::Config(format!("invalid comment selector '{}': {}", selector, e)))
}

/// Returns the trimmed text of every element matching `selector`, in
/// document order.
pub fn extract_comments(html: &str, selector: &str) -> Result<Vec<String>> {
    let selector = compile_selector(selector)?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect())
}
