#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # scorepack-reader
//!
//! Top-level score package load orchestration.
//!
//! This crate sequences one load: style, chord list, images, the main score
//! document (through the version dispatcher), excerpt assembly, and audio
//! attachment, and returns the captured outcome together with the
//! settings-compatibility data accumulated during the parse.

pub mod config;
pub mod loader;

pub use config::ReaderConfig;
pub use loader::{LoadReport, ScoreReader};

use thiserror::Error;

/// Load outcome kinds.
///
/// All of these are detected locally at the point of failure and returned
/// immediately up the call chain; none are retried and none are downgraded
/// to warnings. Unknown document elements are not errors; they go through
/// the stream's diagnostic channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("cannot open score package at '{path}'")]
    FileOpen { path: String },

    #[error("file is newer than the newest supported format version")]
    TooNew,

    #[error("file is older than the oldest supported format version")]
    TooOld,

    #[error("file is in the abandoned 3.0 intermediate format")]
    Old300Format,

    #[error("document is corrupted: {message}")]
    Corrupted { message: String },

    #[error("document structure is not valid for its format")]
    BadFormat,

    #[error("document is critically corrupted")]
    CriticallyCorrupted,
}

impl Error {
    /// Build a file-open error naming the package path.
    pub fn file_open(path: impl Into<String>) -> Self {
        Self::FileOpen { path: path.into() }
    }
}

impl From<scorepack_format::Error> for Error {
    fn from(e: scorepack_format::Error) -> Self {
        match e {
            scorepack_format::Error::TooNew => Self::TooNew,
            scorepack_format::Error::TooOld => Self::TooOld,
            scorepack_format::Error::Old300Format => Self::Old300Format,
            scorepack_format::Error::Corrupted { message } => Self::Corrupted { message },
            scorepack_format::Error::BadFormat => Self::BadFormat,
            scorepack_format::Error::CriticallyCorrupted => Self::CriticallyCorrupted,
        }
    }
}

/// Crate-local result type for load operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_errors_map_onto_load_outcomes() {
        let mapped: Error = scorepack_format::Error::corrupted("bad byte").into();
        assert_eq!(
            mapped,
            Error::Corrupted {
                message: "bad byte".to_string()
            }
        );

        let mapped: Error = scorepack_format::Error::TooNew.into();
        assert_eq!(mapped, Error::TooNew);
    }
}
