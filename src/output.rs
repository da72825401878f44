use crate::errors::ConcatError;
use crate::report::Report;
use arboard::Clipboard;
use std::path::Path;
use tokio::fs;
use tracing::info;

pub async fn write_to_file(report: &Report, path: &Path) -> Result<(), ConcatError> {
    fs::write(path, &report.final_text)
        .await
        .map_err(|e| ConcatError::IoError(format!("Failed to save {}: {}", path.display(), e)))?;
    info!("Saved output to {}", path.display());
    Ok(())
}

pub fn copy_to_clipboard(report: &Report) -> Result<(), ConcatError> {
    let mut clipboard =
        Clipboard::new().map_err(|e| ConcatError::ClipboardInitError(e.to_string()))?;
    clipboard
        .set_text(report.final_text.clone())
        .map_err(|e| ConcatError::ClipboardWriteError(e.to_string()))?;
    info!("Copied output to the clipboard");
    Ok(())
}

pub fn print_summary(report: &Report) {
    info!(
        "Words: {}, Characters: {}, Total Length: {} characters",
        report.word_count, report.char_count, report.total_length
    );
}
