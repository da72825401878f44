use crate::cancel::CancelFlag;
use crate::errors::ConcatError;
use crate::git::TrackedFilesResolver;
use crate::rules::FilterRules;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Everything a run needs to know about what to include. Built once before
/// the run starts; the engine never re-reads mutable caller state mid-run.
pub struct SelectionRequest {
    pub roots: Vec<PathBuf>,
    pub tracked_only: bool,
    pub rules: FilterRules,
}

impl SelectionRequest {
    pub fn new(
        roots: Vec<PathBuf>,
        tracked_only: bool,
        ignore_dirs: Vec<String>,
        ignore_files: Vec<String>,
        extensions: Vec<String>,
    ) -> Result<Self, ConcatError> {
        if roots.is_empty() {
            return Err(ConcatError::InvalidSelection(
                "select at least one file or directory".to_owned(),
            ));
        }
        if extensions.is_empty() {
            return Err(ConcatError::InvalidSelection(
                "select at least one file extension".to_owned(),
            ));
        }
        Ok(SelectionRequest {
            roots: roots.into_iter().map(absolutize).collect(),
            tracked_only,
            rules: FilterRules::new(&extensions, &ignore_files, &ignore_dirs),
        })
    }
}

/// Git reports repository roots as absolute, symlink-resolved paths, so the
/// tracked check and the manifest need absolute roots to relativize against.
/// A path that cannot be resolved is kept as-is and skipped during traversal.
fn absolutize(path: PathBuf) -> PathBuf {
    path.canonicalize().unwrap_or(path)
}

/// Walks the selected roots in request order and returns the files that pass
/// every filter, in discovery order (directory entries as the OS lists them).
pub async fn discover(
    request: &SelectionRequest,
    resolver: &mut TrackedFilesResolver,
    cancel: &CancelFlag,
) -> Result<Vec<PathBuf>, ConcatError> {
    let mut files = Vec::new();
    for root in &request.roots {
        if cancel.is_cancelled() {
            return Err(ConcatError::Cancelled);
        }
        if root.is_file() {
            if passes_filters(root, request, resolver).await {
                files.push(root.clone());
            }
        } else if root.is_dir() {
            walk_directory(root, request, resolver, cancel, &mut files).await?;
        } else {
            debug!("Skipping missing path: {}", root.display());
        }
    }
    debug!("Discovered {} files", files.len());
    Ok(files)
}

async fn walk_directory(
    root: &Path,
    request: &SelectionRequest,
    resolver: &mut TrackedFilesResolver,
    cancel: &CancelFlag,
    files: &mut Vec<PathBuf>,
) -> Result<(), ConcatError> {
    let rules = &request.rules;
    // Pruned directories are removed before descent: never read, never
    // error-reported, never counted. Listing failures (permissions, races)
    // are swallowed for that directory; partial access is common.
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !rules.prune_directory(&entry.file_name().to_string_lossy())
        })
        .filter_map(|entry| entry.ok());

    for entry in walker {
        if cancel.is_cancelled() {
            return Err(ConcatError::Cancelled);
        }
        if !entry.file_type().is_file() {
            continue;
        }
        if passes_filters(entry.path(), request, resolver).await {
            trace!("Including {}", entry.path().display());
            files.push(entry.path().to_path_buf());
        }
    }
    Ok(())
}

async fn passes_filters(
    path: &Path,
    request: &SelectionRequest,
    resolver: &mut TrackedFilesResolver,
) -> bool {
    if !request.rules.includes_file(path) {
        return false;
    }
    if request.tracked_only && !resolver.is_tracked(path).await {
        trace!("Excluding untracked file {}", path.display());
        return false;
    }
    true
}
