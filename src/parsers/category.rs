use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Category;

// Checked in order; the first group that matches decides.
static CATEGORY_KEYWORDS: Lazy<Vec<(Category, Regex)>> = Lazy::new(|| {
    [
        (Category::Tops, r"(?i)shirt|blouse|tee|t-shirt|top|sweater"),
        (Category::Bottoms, r"(?i)pants|jeans|shorts|skirt|trousers"),
        (Category::Shoes, r"(?i)shoe|sneaker|boot|loafer"),
        (Category::Outerwear, r"(?i)jacket|coat|parka|blazer"),
        (Category::Accessories, r"(?i)hat|scarf|bag|belt"),
    ]
    .into_iter()
    .map(|(category, pattern)| {
        (category, Regex::new(pattern).expect("Invalid category regex"))
    })
    .collect()
});

/// Guess a wardrobe category from a product name. Falls back to `Tops`.
pub fn guess_category(name: &str) -> Category {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, re)| re.is_match(name))
        .map(|(category, _)| *category)
        .unwrap_or_default()
}
