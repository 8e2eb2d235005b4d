use once_cell::sync::Lazy;
use regex::Regex;

static NON_PRICE_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^0-9.]")
        .expect("Invalid price regex")
});

/// Parse a price out of free text by dropping everything but digits and dots.
///
/// Never fails: empty, non-numeric or negative-looking input gives `0.0`.
/// Like `parseFloat`, the longest valid numeric prefix of the cleaned text is
/// used, so `"1.299.00"` reads as `1.299`.
pub fn extract_price(price_text: &str) -> f64 {
    let cleaned = NON_PRICE_CHARS.replace_all(price_text, "");
    leading_number(&cleaned)
        .and_then(|n| n.parse::<f64>().ok())
        .filter(|p| p.is_finite() && *p >= 0.0)
        .unwrap_or(0.0)
}

fn leading_number(cleaned: &str) -> Option<&str> {
    let mut seen_dot = false;
    let mut seen_digit = false;
    let mut end = 0;

    for (i, c) in cleaned.char_indices() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if seen_digit {
        Some(cleaned[..end].trim_end_matches('.'))
    } else {
        None
    }
}
