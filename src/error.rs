//! Errors for the account and project stores.
//!
//! Two kinds of failure live here:
//! - Technical errors (I/O, malformed JSON or CSV, a failed import task)
//!   which abort the operation that hit them.
//! - Validation rejections (empty project name, unusable expense amount,
//!   unknown project) which leave the store untouched. A presentation layer
//!   is free to ignore these and treat them as "nothing happened".

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize records: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    CsvAsync(#[from] csv_async::Error),
    #[error("import task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("project name must not be empty")]
    EmptyName,
    #[error("invalid expense amount: {0:?}")]
    InvalidAmount(String),
    #[error("project {0} not found")]
    ProjectNotFound(u32),
    #[error("no project is being edited")]
    NoActiveSession,
    #[error("no free record id left")]
    IdsExhausted,
}

impl Error {
    /// True for rejections that left the store unchanged on purpose.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::EmptyName
                | Error::InvalidAmount(_)
                | Error::ProjectNotFound(_)
                | Error::NoActiveSession
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
