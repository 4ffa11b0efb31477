//! # scorepack-container
//!
//! Score package accessor: named-blob readers and the shared image store.
//!
//! A score package exposes named byte blobs (style, chord list, images,
//! per-excerpt files, audio, main score document). This crate defines the
//! accessor boundary the reader consumes, a directory-backed package
//! implementation, an in-memory implementation for tests and tooling, and
//! the process-wide image cache.

pub mod container;
pub mod directory;
pub mod images;
pub mod memory;

pub use container::ScoreContainer;
pub use directory::DirContainer;
pub use images::ImageStore;
pub use memory::MemContainer;

use thiserror::Error;

/// Errors that can occur when opening a score package
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open package at '{path}': {message}")]
    Open { path: String, message: String },

    #[error("package path '{path}' is not a directory")]
    NotADirectory { path: String },
}

impl Error {
    /// Build an open error with path and cause.
    pub fn open(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Open {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Crate-local result type for container operations.
pub type Result<T> = std::result::Result<T, Error>;
