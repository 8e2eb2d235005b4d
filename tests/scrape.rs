use std::time::Duration;

use closet_tracker::config::{Brand, SiteConfig};
use closet_tracker::models::{Category, ProductExtractionResult};
use closet_tracker::scrapers::ProductScraper;
use closet_tracker::utils::http::create_client;
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn scraper() -> ProductScraper {
    let client = create_client("closet-test").unwrap();
    ProductScraper::with_client(client, Duration::from_secs(2), Duration::from_secs(2))
}

fn local_site() -> SiteConfig {
    SiteConfig {
        domain_suffix: "127.0.0.1",
        name_selector: "h1.product-name",
        price_selector: ".price",
        color_selector: ".color",
        image_selector: ".gallery img",
        brand: Brand::Label("Local Brand"),
    }
}

async fn mount_page(server: &MockServer, route: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(html),
        )
        .mount(server)
        .await;
}

async fn mount_image(server: &MockServer, route: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(bytes.to_vec()),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn unreachable_page_returns_placeholder() {
    let url = "http://127.0.0.1:1/products/42";
    let result = scraper().scrape(url).await;

    assert_eq!(
        result,
        ProductExtractionResult {
            name: "Imported Item".to_string(),
            brand: String::new(),
            price: 0.0,
            color: String::new(),
            category: Category::Tops,
            source_url: url.to_string(),
            image_data: None,
            success: false,
        }
    );
}

#[tokio::test]
async fn server_error_returns_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let url = format!("{}/products/1", server.uri());
    let result = scraper().scrape(&url).await;
    assert_eq!(result, ProductExtractionResult::failed(&url));
}

#[tokio::test]
async fn generic_page_uses_meta_tags_and_inlines_image() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/products/boots",
        r#"<html><head>
            <meta property="og:title" content="Leather Chelsea Boots">
            <meta property="og:image" content="/images/boots.png">
            <meta property="product:price:amount" content="$149.00">
        </head><body><h1 class="product-name">ignored without a site entry</h1></body></html>"#,
    )
    .await;
    mount_image(&server, "/images/boots.png", b"png").await;

    let url = format!("{}/products/boots", server.uri());
    let result = scraper().scrape(&url).await;

    assert_eq!(
        result,
        ProductExtractionResult {
            name: "Leather Chelsea Boots".to_string(),
            brand: String::new(),
            price: 149.0,
            color: String::new(),
            category: Category::Shoes,
            source_url: url.clone(),
            image_data: Some("data:image/png;base64,cG5n".to_string()),
            success: true,
        }
    );
}

#[tokio::test]
async fn configured_site_overrides_only_non_empty_fields() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/p/coat",
        r#"<html><head>
            <meta property="og:title" content="Wool Coat">
            <meta property="og:image" content="/images/og.png">
            <meta property="product:price:amount" content="199.00">
        </head><body>
            <h1 class="product-name">   </h1>
            <span class="price">USD 179.50</span>
            <span class="color">Camel</span>
            <div class="gallery"><img src="/images/coat.png"></div>
        </body></html>"#,
    )
    .await;
    mount_image(&server, "/images/coat.png", b"coat").await;

    let url = format!("{}/p/coat", server.uri());
    let result = scraper()
        .with_sites(vec![local_site()])
        .scrape(&url)
        .await;

    assert!(result.success);
    // blank selector match keeps the meta title
    assert_eq!(result.name, "Wool Coat");
    assert_eq!(result.category, Category::Outerwear);
    assert_eq!(result.price, 179.5);
    assert_eq!(result.color, "Camel");
    assert_eq!(result.brand, "Local Brand");
    assert_eq!(result.image_data.as_deref(), Some("data:image/png;base64,Y29hdA=="));
}

#[tokio::test]
async fn image_failure_does_not_fail_scrape() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/p/scarf",
        r#"<html><head><title>Cashmere Scarf</title></head>
           <body><img src="/missing.jpg"></body></html>"#,
    )
    .await;

    let url = format!("{}/p/scarf", server.uri());
    let result = scraper().scrape(&url).await;

    assert!(result.success);
    assert_eq!(result.name, "Cashmere Scarf");
    assert_eq!(result.category, Category::Accessories);
    assert_eq!(result.image_data, None);
}

#[tokio::test]
async fn long_names_are_truncated() {
    let server = MockServer::start().await;
    let title = "Widget ".repeat(40);
    mount_page(
        &server,
        "/p/long",
        &format!("<html><head><title>{}</title></head><body></body></html>", title),
    )
    .await;

    let url = format!("{}/p/long", server.uri());
    let result = scraper().scrape(&url).await;

    assert!(result.success);
    assert_eq!(result.name.chars().count(), 100);
    assert!(result.name.starts_with("Widget Widget"));
    assert_eq!(result.category, Category::Tops);
}
