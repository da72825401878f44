use crate::cancel::CancelFlag;
use crate::errors::{ConcatError, FileError};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

/// Fire-and-forget notifications for the caller. Delivery must never block
/// the worker, so these travel over an unbounded channel and a dropped
/// receiver is silently tolerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Progress { percent: u8, file: String },
    Status(String),
}

pub type EventSender = UnboundedSender<Event>;

/// Output of one execution: the labeled blob, the files attempted (order
/// preserved), and the per-file failures. A file that failed to read stays in
/// `files` (the manifest shows what was attempted) but contributes no bytes.
#[derive(Debug, Default)]
pub struct ExecutionResult {
    pub concatenated: String,
    pub files: Vec<PathBuf>,
    pub errors: Vec<FileError>,
}

/// Reads each file in discovery order and appends
/// `=== <basename> ===\n<content>\n\n` blocks. Read failures are recorded and
/// the run continues; cancellation halts with no finalized result.
pub async fn execute(
    files: Vec<PathBuf>,
    events: &EventSender,
    cancel: &CancelFlag,
) -> Result<ExecutionResult, ConcatError> {
    let total = files.len();
    if total == 0 {
        return Err(ConcatError::NoFilesFound);
    }

    emit(events, Event::Status("Starting concatenation...".to_owned()));
    let mut concatenated = String::new();
    let mut errors = Vec::new();

    for (index, path) in files.iter().enumerate() {
        if cancel.is_cancelled() {
            debug!("Cancellation observed after {} of {} files", index, total);
            return Err(ConcatError::Cancelled);
        }
        let name = basename(path);
        match fs::read_to_string(path).await {
            Ok(content) => {
                concatenated.push_str(&format!("=== {} ===\n", name));
                concatenated.push_str(&content);
                concatenated.push_str("\n\n");
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                errors.push(FileError {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
        let percent = ((index + 1) * 100 / total) as u8;
        emit(
            events,
            Event::Progress {
                percent,
                file: name.clone(),
            },
        );
        emit(
            events,
            Event::Status(format!("Processing {} ({}/{})", name, index + 1, total)),
        );
    }

    emit(
        events,
        Event::Status("Concatenation completed successfully.".to_owned()),
    );
    Ok(ExecutionResult {
        concatenated,
        files,
        errors,
    })
}

pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn emit(events: &EventSender, event: Event) {
    let _ = events.send(event);
}
