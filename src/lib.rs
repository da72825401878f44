pub mod cancel;
pub mod concat;
pub mod discover;
pub mod errors;
pub mod git;
pub mod logger;
pub mod manifest;
pub mod output;
pub mod report;
pub mod rules;
pub mod runner;
pub mod settings;

pub use cancel::CancelFlag;
pub use concat::{Event, ExecutionResult};
pub use discover::SelectionRequest;
pub use errors::{ConcatError, FileError};
pub use runner::{Outcome, Runner};
