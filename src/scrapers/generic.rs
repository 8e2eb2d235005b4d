use scraper::Html;

use super::{attr_of_first, resolve_image_url, text_of_first, ScrapedProduct};
use crate::models::DEFAULT_PRODUCT_NAME;
use crate::parsers::extract_price;

/// Best-effort fields from the markup every shop page tends to have:
/// Open Graph / Twitter card meta tags, `<title>`, and the first `<img>`.
pub fn extract_generic(document: &Html, page_url: &str) -> ScrapedProduct {
    let name = meta_content(document, r#"meta[property="og:title"]"#)
        .or_else(|| meta_content(document, r#"meta[name="twitter:title"]"#))
        .or_else(|| meta_content(document, r#"meta[name="title"]"#))
        .or_else(|| text_of_first(document, "title"))
        .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string());

    let price = meta_content(document, r#"meta[property="product:price:amount"]"#)
        .or_else(|| meta_content(document, r#"meta[property="og:price:amount"]"#))
        .map(|text| extract_price(&text))
        .unwrap_or(0.0);

    let image_url = meta_content(document, r#"meta[property="og:image"]"#)
        .or_else(|| meta_content(document, r#"meta[name="twitter:image"]"#))
        .or_else(|| attr_of_first(document, "img", "src"))
        .and_then(|src| resolve_image_url(&src, page_url));

    ScrapedProduct {
        name,
        price,
        image_url,
        ..Default::default()
    }
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    attr_of_first(document, selector, "content")
}
