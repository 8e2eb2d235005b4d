pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod parsers;
pub mod scrapers;
pub mod storage;
pub mod utils;

/// `RUST_LOG` wins; otherwise this crate logs at info.
pub fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("closet_tracker=info".parse()?),
        )
        .init();

    Ok(())
}
