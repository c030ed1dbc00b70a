use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error(
        "Over-read of {path:?}: {requested} float32 values requested at \
        offset {offset}, but the file is only {size} bytes."
    )]
    OverRead {
        path: PathBuf,
        offset: u64,
        requested: usize,
        size: u64,
    },
    #[error("Size mismatch: expected {expected} bytes, found {found}.")]
    SizeMismatch {
        expected: u64,
        found: u64,
    },
    #[error("Model name \"{0}\" does not end with an integer step suffix.")]
    BadStepSuffix(String),
    #[error("Unrecognized model file extension \"{0}\".")]
    UnrecognizedExtension(String),
    #[error("A checkpoint loader needs a source path.")]
    MissingCheckpointPath,
    #[error("Failed to restore checkpoint {path:?}: {reason}")]
    CheckpointRestore {
        path: PathBuf,
        reason: String,
    },
    #[error("Failed to read data")]
    Io(#[from] std::io::Error),
}
