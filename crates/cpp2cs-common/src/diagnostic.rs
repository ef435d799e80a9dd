//! Fatal conversion errors.
//!
//! Recoverable conditions (unparseable constructs, unresolved method
//! bodies) are logged and the run continues; only I/O failures around
//! the source and output directories abort a conversion.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Errors that abort a conversion run.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ConvertError {
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory {path}: {source}")]
    #[diagnostic(help("check that the parent directory exists and is writable"))]
    CreateOutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Source directory {path} does not exist")]
    MissingSourceDir { path: String },
}
