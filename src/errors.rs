use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConcatError {
    #[error("No files found based on the selected preferences")]
    NoFilesFound,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("Version control command failed: {0}")]
    VcsError(String),

    #[error("Clipboard initialization failed: {0}")]
    ClipboardInitError(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWriteError(String),

    #[error("Settings error: {0}")]
    SettingsError(String),
}

impl From<std::io::Error> for ConcatError {
    fn from(err: std::io::Error) -> Self {
        ConcatError::IoError(err.to_string())
    }
}

/// A per-file failure that does not abort the run. These accumulate into the
/// error report shown after completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}
