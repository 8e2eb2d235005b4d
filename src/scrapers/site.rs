use scraper::Html;

use super::{attr_of_first, resolve_image_url, text_of_first, ScrapedProduct};
use crate::config::{Brand, SiteConfig};
use crate::parsers::extract_price;

/// Override generic fields with whatever the shop-specific selectors find.
///
/// A selector that matches nothing, or matches an empty element, leaves the
/// existing value alone.
pub fn apply_site_overrides(
    document: &Html,
    site: &SiteConfig,
    page_url: &str,
    product: &mut ScrapedProduct,
) {
    if let Some(name) = text_of_first(document, site.name_selector) {
        product.name = name;
    }

    if let Some(price_text) = text_of_first(document, site.price_selector) {
        product.price = extract_price(&price_text);
    }

    if let Some(color) = text_of_first(document, site.color_selector) {
        product.color = color;
    }

    if let Some(image_url) = attr_of_first(document, site.image_selector, "src")
        .and_then(|src| resolve_image_url(&src, page_url))
    {
        product.image_url = Some(image_url);
    }

    product.brand = match site.brand {
        Brand::Label(label) => label.to_string(),
        Brand::Selector(selector) => text_of_first(document, selector).unwrap_or_default(),
    };
}
