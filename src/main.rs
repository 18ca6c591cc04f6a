//! pdf-text-store
//!
//! Extracts text from the configured PDF, stores it and prints the stored
//! records back.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pdf_text_store::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "pdf_text_store=info".into()))
        // stdout carries the extracted text and record dump
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting pdf-text-store v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Store: {} ({}.{})", config.store.url, config.store.database, config.store.collection);

    // Unlocked handle: each write locks briefly, so other threads can still log
    let summary = pdf_text_store::run(&config, &mut std::io::stdout()).await?;

    tracing::info!(
        "Done: {} chars from {:?} across {} pages, {} records written, {} read back",
        summary.extracted_chars,
        summary.source,
        summary.page_count,
        summary.outcome.records_written(),
        summary.records_read
    );

    Ok(())
}
