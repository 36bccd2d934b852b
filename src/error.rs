// Library error kinds

use thiserror::Error;

/// Failures the task core can report to its host.
///
/// Operations referencing an unknown task id are not errors; they report
/// `Ok(false)` from the store instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The persisted blob could not be parsed. Recovered inside `load()` by
    /// resetting to an empty collection; hosts normally never see this kind.
    #[error("persisted task data is corrupt: {0}")]
    DataCorruption(#[from] serde_json::Error),

    /// The storage adapter failed to read or write. After a failed write the
    /// in-memory collection stays authoritative for the session.
    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),

    /// Task text was empty after trimming; rejected before any mutation.
    #[error("task text must not be empty")]
    InvalidInput,
}

pub type Result<T> = std::result::Result<T, Error>;
