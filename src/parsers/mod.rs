pub mod category;
pub mod price;

pub use category::*;
pub use price::*;

use html_escape::decode_html_entities;

/// Clean and normalize text by removing extra whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace_and_entities() {
        assert_eq!(clean_text("  Slim&nbsp;Fit \n\t Jeans  "), "Slim Fit Jeans");
        assert_eq!(clean_text("H&amp;M"), "H&M");
        assert_eq!(clean_text("   "), "");
    }
}
