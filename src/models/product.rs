use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PRODUCT_NAME: &str = "Imported Item";
pub const MAX_NAME_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Tops,
    Bottoms,
    Shoes,
    Outerwear,
    Accessories,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Shoes => "shoes",
            Category::Outerwear => "outerwear",
            Category::Accessories => "accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a scrape hands back. Always populated; check `success` before trusting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductExtractionResult {
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub color: String,
    pub category: Category,
    pub source_url: String,
    /// `data:<mime>;base64,...`
    pub image_data: Option<String>,
    pub success: bool,
}

impl ProductExtractionResult {
    /// The result returned when the page itself could not be fetched.
    pub fn failed(source_url: &str) -> Self {
        Self {
            name: DEFAULT_PRODUCT_NAME.to_string(),
            brand: String::new(),
            price: 0.0,
            color: String::new(),
            category: Category::Tops,
            source_url: source_url.to_string(),
            image_data: None,
            success: false,
        }
    }
}

/// Cut to at most `MAX_NAME_CHARS` characters, never splitting a code point.
pub fn truncate_name(name: &str) -> String {
    name.chars().take(MAX_NAME_CHARS).collect()
}
