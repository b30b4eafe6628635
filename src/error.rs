use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutocorrectError {
    #[error("Failed to read dictionary {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to start correction worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("Correction worker for '{0}' exited without a result")]
    WorkerLost(String),
}

pub type Result<T> = std::result::Result<T, AutocorrectError>;
