//! Read-back inspection of stored records

use std::io::Write;

use crate::error::Result;
use crate::storage::TextStore;

/// First `max_chars` characters of `text`
pub fn text_preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Print every stored record to `out`
///
/// Returns the number of records read.
pub async fn verify_records<W: Write>(
    store: &dyn TextStore,
    preview_chars: usize,
    out: &mut W,
) -> Result<usize> {
    let records = store.find_all().await?;

    for record in &records {
        match &record.text {
            Some(text) => {
                let chunk_id = record
                    .chunk_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "N/A".to_string());
                writeln!(out, "Chunk ID: {}", chunk_id)?;
                writeln!(out, "Text: {}...", text_preview(text, preview_chars))?;
            }
            None => writeln!(out, "No text was found in the document.")?,
        }
    }

    tracing::debug!("Verified {} records", records.len());
    Ok(records.len())
}
