//! Error types for memory fingerprinting

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Address/length pair is malformed or overflows the address space
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Some byte of the requested range could not be read
    #[error("Unreadable memory: {length} bytes at {start:#x} ({reason})")]
    UnreadableMemory {
        start: u64,
        length: u64,
        reason: String,
    },

    /// The target handle no longer refers to a live, attached process
    #[error("Process unavailable: {0}")]
    ProcessUnavailable(String),

    #[error("Unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Module {0} is not loaded")]
    ModuleNotFound(String),

    #[error("Invalid dump file: {0}")]
    InvalidDump(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn unreadable(start: u64, length: u64, reason: impl Into<String>) -> Self {
        Error::UnreadableMemory {
            start,
            length,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
