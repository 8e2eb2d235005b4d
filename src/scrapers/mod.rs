use anyhow::Result;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

use crate::config::{Config, SiteConfig, SITE_CONFIGS};
use crate::models::{truncate_name, ProductExtractionResult};
use crate::parsers::{clean_text, guess_category};
use crate::utils::http::{create_client, fetch};

mod generic;
mod image;
mod site;

pub use generic::extract_generic;
pub use image::{fetch_image_data_uri, to_data_uri};
pub use site::apply_site_overrides;

/// Fields pulled out of one product page before the image is downloaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedProduct {
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub color: String,
    pub image_url: Option<String>,
}

/// Imports a product page in one pass: page, metadata, site selectors, image.
pub struct ProductScraper {
    client: Client,
    sites: Vec<SiteConfig>,
    page_timeout: Duration,
    image_timeout: Duration,
}

impl ProductScraper {
    pub fn new(config: &Config) -> Result<Self> {
        let client = create_client(&config.user_agent)?;
        Ok(Self::with_client(client, config.page_timeout(), config.image_timeout()))
    }

    pub fn with_client(client: Client, page_timeout: Duration, image_timeout: Duration) -> Self {
        Self {
            client,
            sites: SITE_CONFIGS.clone(),
            page_timeout,
            image_timeout,
        }
    }

    /// Replace the shop table, e.g. to point a selector set at a local server.
    pub fn with_sites(mut self, sites: Vec<SiteConfig>) -> Self {
        self.sites = sites;
        self
    }

    /// Never fails. Callers must look at `success`: when the page cannot be
    /// fetched the placeholder result from [`ProductExtractionResult::failed`]
    /// comes back.
    pub async fn scrape(&self, product_url: &str) -> ProductExtractionResult {
        let site = find_site_config(&self.sites, product_url);
        info!(
            "Scraping {} ({})",
            product_url,
            site.map(|s| s.domain_suffix).unwrap_or("generic")
        );

        let html = match self.fetch_page(product_url).await {
            Ok(html) => html,
            Err(e) => {
                error!("Scraping error for {}: {:#}", product_url, e);
                return ProductExtractionResult::failed(product_url);
            }
        };

        // Html is not Send; keep it out of scope across the image await.
        let product = extract_product(&html, product_url, site);
        let category = guess_category(&product.name);

        let image_data = match &product.image_url {
            Some(image_url) => {
                fetch_image_data_uri(&self.client, image_url, self.image_timeout).await
            }
            None => None,
        };

        ProductExtractionResult {
            name: truncate_name(&product.name),
            brand: product.brand,
            price: product.price,
            color: product.color,
            category,
            source_url: product_url.to_string(),
            image_data,
            success: true,
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = fetch(&self.client, url, self.page_timeout).await?;
        Ok(response.text().await?)
    }
}

/// Generic metadata first, then shop selectors on top when the host is known.
pub fn extract_product(html: &str, page_url: &str, site: Option<&SiteConfig>) -> ScrapedProduct {
    let document = Html::parse_document(html);
    let mut product = extract_generic(&document, page_url);

    if let Some(site) = site {
        apply_site_overrides(&document, site, page_url, &mut product);
    }

    product
}

/// Shop selectors for `url`, if its host ends with one of the known domains.
pub fn site_config_for(url: &str) -> Option<&'static SiteConfig> {
    find_site_config(&SITE_CONFIGS, url)
}

fn find_site_config<'a>(sites: &'a [SiteConfig], url: &str) -> Option<&'a SiteConfig> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    sites.iter().find(|site| host.ends_with(site.domain_suffix))
}

/// Any syntactically valid absolute URL is accepted; there is no allow-list.
pub fn is_valid_product_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

fn first_match<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(selector) => document.select(&selector).next(),
        Err(_) => {
            warn!("Skipping unparseable selector: {}", selector);
            None
        }
    }
}

/// Cleaned text of the first match, `None` when missing or blank.
pub(crate) fn text_of_first(document: &Html, selector: &str) -> Option<String> {
    let element = first_match(document, selector)?;
    let text = clean_text(&element.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

/// Trimmed attribute of the first match, `None` when missing or blank.
pub(crate) fn attr_of_first(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let element = first_match(document, selector)?;
    let value = element.value().attr(attr)?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Absolute URLs pass through; anything else is joined onto the page URL.
pub(crate) fn resolve_image_url(src: &str, page_url: &str) -> Option<String> {
    if src.starts_with("http") {
        return Some(src.to_string());
    }

    let base = Url::parse(page_url).ok()?;
    base.join(src).ok().map(|u| u.to_string())
}
