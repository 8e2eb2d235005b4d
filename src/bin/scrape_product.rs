use anyhow::Result;
use clap::Parser;

use closet_tracker::config::Config;
use closet_tracker::scrapers::{is_valid_product_url, ProductScraper};

/// Import one product page and print what was found as JSON.
#[derive(Parser, Debug)]
#[command(name = "scrape-product", version)]
struct Args {
    /// Product page URL
    url: String,

    /// Leave the inline image out of the output
    #[arg(long)]
    no_image: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    closet_tracker::init_logging()?;
    let args = Args::parse();

    if !is_valid_product_url(&args.url) {
        anyhow::bail!("Not a valid URL: {}", args.url);
    }

    let config = Config::load()?;
    let scraper = ProductScraper::new(&config)?;

    let mut result = scraper.scrape(&args.url).await;
    if args.no_image {
        result.image_data = None;
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
