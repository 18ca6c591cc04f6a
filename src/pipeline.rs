//! Extract → persist → verify, wired from configuration

use std::io::Write;

use crate::config::Config;
use crate::error::Result;
use crate::extract::{extract_pdf_text, TextSource};
use crate::ocr::OcrService;
use crate::storage::{self, persist_text, ChunkPolicy, PersistOutcome, TextStore};
use crate::verify::{text_preview, verify_records};

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub source: TextSource,
    pub page_count: usize,
    pub extracted_chars: usize,
    pub outcome: PersistOutcome,
    pub records_read: usize,
}

/// Run the whole pipeline against the configured OCR providers and store
pub async fn run<W: Write>(config: &Config, out: &mut W) -> Result<RunSummary> {
    let ocr = OcrService::new(config.ocr.service_config());
    let store = storage::connect(&config.store).await?;

    run_with(config, &ocr, store.as_ref(), out).await
}

/// Run the pipeline with explicit collaborators
pub async fn run_with<W: Write>(
    config: &Config,
    ocr: &OcrService,
    store: &dyn TextStore,
    out: &mut W,
) -> Result<RunSummary> {
    tracing::info!("Extracting text from {}", config.pdf_path.display());
    let extracted = extract_pdf_text(&config.pdf_path, ocr, config.ocr.dpi).await?;

    writeln!(
        out,
        "Extracted text (first {} characters): {}...",
        config.preview_chars,
        text_preview(&extracted.text, config.preview_chars)
    )?;

    let outcome = persist_text(store, &extracted.text, &ChunkPolicy::default()).await?;
    let records_read = verify_records(store, config.preview_chars, out).await?;

    Ok(RunSummary {
        source: extracted.source,
        page_count: extracted.page_count,
        extracted_chars: extracted.text.chars().count(),
        outcome,
        records_read,
    })
}
