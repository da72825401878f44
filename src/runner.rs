use crate::cancel::CancelFlag;
use crate::concat::{self, EventSender};
use crate::discover::{self, SelectionRequest};
use crate::errors::{ConcatError, FileError};
use crate::git::TrackedFilesResolver;
use crate::manifest;
use crate::report::{self, Report};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Exactly one of these ends every run.
#[derive(Debug)]
pub enum Outcome {
    Success {
        report: Report,
        files: Vec<PathBuf>,
        errors: Vec<FileError>,
    },
    NoFilesFound,
    Cancelled,
    Fatal(String),
}

/// Drives one discovery + concatenation run. Progress and status events go
/// through the supplied channel; the cancel flag may be set at any time after
/// start and is honored with bounded latency.
pub struct Runner {
    events: EventSender,
    cancel: CancelFlag,
}

impl Runner {
    pub fn new(events: EventSender) -> Self {
        Runner {
            events,
            cancel: CancelFlag::new(),
        }
    }

    pub fn with_cancel(events: EventSender, cancel: CancelFlag) -> Self {
        Runner { events, cancel }
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Runs with a fresh git-backed resolver. Tracked state may change
    /// between runs, so resolver caches never outlive a run.
    pub async fn run(&self, request: SelectionRequest) -> Outcome {
        self.run_with_resolver(request, TrackedFilesResolver::new())
            .await
    }

    pub async fn run_with_resolver(
        &self,
        request: SelectionRequest,
        mut resolver: TrackedFilesResolver,
    ) -> Outcome {
        let files = match discover::discover(&request, &mut resolver, &self.cancel).await {
            Ok(files) => files,
            Err(ConcatError::Cancelled) => return Outcome::Cancelled,
            Err(e) => return Outcome::Fatal(e.to_string()),
        };
        if files.is_empty() {
            debug!("Discovery produced no files");
            return Outcome::NoFilesFound;
        }
        info!("Discovered {} files, starting concatenation", files.len());

        let result = match concat::execute(files, &self.events, &self.cancel).await {
            Ok(result) => result,
            Err(ConcatError::Cancelled) => return Outcome::Cancelled,
            Err(e) => return Outcome::Fatal(e.to_string()),
        };

        let root = manifest_root(&request.roots);
        let tree = manifest::build_manifest(&result.files, &root);
        let report = report::assemble(&tree, &result.concatenated);

        let mut errors = result.errors;
        errors.extend(resolver.take_warnings());

        Outcome::Success {
            report,
            files: result.files,
            errors,
        }
    }
}

/// Manifest paths are made relative to the first selected root (its parent
/// when the root is a single file).
fn manifest_root(roots: &[PathBuf]) -> PathBuf {
    match roots.first() {
        Some(root) if root.is_dir() => root.clone(),
        Some(root) => root
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.clone()),
        None => PathBuf::from("."),
    }
}
