//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{LibraryError, Stage};

/// A diagnostic wrapper for library errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct DocDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    pub severity: Severity,
}

fn help_for(stage: Stage) -> &'static str {
    match stage {
        Stage::Open => "Check that the upload file exists and is readable",
        Stage::Parse => "Check that the file is comma separated and uses double quotes",
        Stage::Store => "Check the store directory and its permissions",
    }
}

impl From<LibraryError> for DocDiagnostic {
    fn from(e: LibraryError) -> Self {
        DocDiagnostic {
            message: format!("[{}] on '{}'", e.stage, e.target),
            help: Some(help_for(e.stage).into()),
            source: Some(e.error),
            severity: Severity::Error,
        }
    }
}

impl From<LibraryError> for miette::Report {
    fn from(e: LibraryError) -> Self {
        miette::Report::new(DocDiagnostic::from(e))
    }
}
