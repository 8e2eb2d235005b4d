use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub database_path: String,
    pub user_agent: String,
    pub page_timeout_secs: u64,
    pub image_timeout_secs: u64,
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            database_path: "closet.db".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_timeout_secs: 10,
            image_timeout_secs: 5,
            bcrypt_cost: crate::auth::BCRYPT_COST,
        }
    }
}

impl Config {
    /// Defaults, then `closet.toml` if present, then `CLOSET_*` environment variables.
    pub fn load() -> Result<Self> {
        let defaults = Config::default();

        let settings = config::Config::builder()
            .set_default("bind_addr", defaults.bind_addr)?
            .set_default("database_path", defaults.database_path)?
            .set_default("user_agent", defaults.user_agent)?
            .set_default("page_timeout_secs", defaults.page_timeout_secs as i64)?
            .set_default("image_timeout_secs", defaults.image_timeout_secs as i64)?
            .set_default("bcrypt_cost", defaults.bcrypt_cost as i64)?
            .add_source(config::File::with_name("closet").required(false))
            .add_source(config::Environment::with_prefix("CLOSET"))
            .build()
            .context("Failed to build configuration")?;

        settings
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }
}

/// Extra selectors for shops we know about. Matches are a bonus, not a guarantee:
/// the markup belongs to third parties and changes without notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    pub domain_suffix: &'static str,
    pub name_selector: &'static str,
    pub price_selector: &'static str,
    pub color_selector: &'static str,
    pub image_selector: &'static str,
    pub brand: Brand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Brand {
    /// Fixed label, the shop sells its own brand.
    Label(&'static str),
    /// Marketplaces: read the brand off the page.
    Selector(&'static str),
}

// Lookup walks this in order, first suffix match wins.
pub static SITE_CONFIGS: Lazy<Vec<SiteConfig>> = Lazy::new(|| {
    vec![
        SiteConfig {
            domain_suffix: "uniqlo.com",
            name_selector: "h1.heading-primary, .product-name",
            price_selector: ".price-value",
            color_selector: ".color-name",
            image_selector: ".product-image img",
            brand: Brand::Label("Uniqlo"),
        },
        SiteConfig {
            domain_suffix: "zara.com",
            name_selector: "h1.product-detail-info__header-name",
            price_selector: ".price__amount-current",
            color_selector: ".product-detail-selected-color",
            image_selector: ".media-image__image",
            brand: Brand::Label("ZARA"),
        },
        SiteConfig {
            domain_suffix: "hm.com",
            name_selector: "h1.product-item-headline",
            price_selector: ".price-value",
            color_selector: ".product-color, [class^=\"ProductDescription-module--colorName--\"]",
            image_selector: ".product-image img, .product-detail-main-image-container img",
            brand: Brand::Label("H&M"),
        },
        SiteConfig {
            domain_suffix: "amazon.com",
            name_selector: "#productTitle",
            price_selector: "#corePrice_feature_div span.a-offscreen, #priceblock_ourprice, #priceblock_dealprice",
            color_selector: "#variation_color_name .selection",
            image_selector: "#imgTagWrapperId img, #landingImage",
            brand: Brand::Selector("#bylineInfo"),
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_suffixes_do_not_overlap() {
        for (i, a) in SITE_CONFIGS.iter().enumerate() {
            for b in SITE_CONFIGS.iter().skip(i + 1) {
                assert!(!a.domain_suffix.ends_with(b.domain_suffix));
                assert!(!b.domain_suffix.ends_with(a.domain_suffix));
            }
        }
    }

    #[test]
    fn default_timeouts_and_cost() {
        let config = Config::default();
        assert_eq!(config.page_timeout(), Duration::from_secs(10));
        assert_eq!(config.image_timeout(), Duration::from_secs(5));
        assert_eq!(config.bcrypt_cost, 10);
    }
}
