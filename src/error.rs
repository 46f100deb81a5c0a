use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a run before any cookie is printed.
#[derive(Debug, Error)]
pub enum CookieError {
    #[error("Incorrect arguments, use the following format: most-active-cookie -f <filename> -d <date>")]
    Usage,

    /// `-h` or `-V` was given; clap renders the text itself.
    #[error("{0}")]
    HelpRequested(clap::Error),

    #[error("Invalid date format '{value}'. Please use yyyy-MM-dd format.")]
    DateFormat { value: String },

    #[error("Error reading the file {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CookieError {
    pub fn source_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CookieError::SourceUnavailable {
            path: path.into(),
            source,
        }
    }
}
