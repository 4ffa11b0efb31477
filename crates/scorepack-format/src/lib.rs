//! # scorepack-format
//!
//! Document-element stream, version dispatch, and structural parsers for
//! score documents.
//!
//! This crate turns a score document blob into populated model entities. A
//! pull reader exposes the document element by element; the dispatcher finds
//! the root element, validates the format version against the supported
//! band, and routes to exactly one format strategy: one per historical
//! format era, plus the modern parser.

pub mod content;
pub mod dispatch;
pub mod hook;
pub mod legacy;
pub mod modern;
pub mod strategy;
pub mod style_io;
pub mod version;
pub mod xml;

pub use dispatch::{ROOT_ELEMENT, read_document};
pub use hook::{DefaultStyleSeeder, StyleSeeder};
pub use modern::{ModernReader, read_modern};
pub use strategy::{FormatStrategy, StrategyTable};
pub use style_io::{apply_chord_list, apply_style};
pub use version::{ABANDONED_VERSION, MODERN_VERSION, MSC_VERSION, OLDEST_VERSION, parse_version};
pub use xml::{StreamError, XmlStream};

use thiserror::Error;

/// Errors that can occur when reading a score document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
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
    /// Build a corrupted-document error carrying the stream's diagnostic
    /// text verbatim.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted {
            message: message.into(),
        }
    }
}

/// Crate-local result type for format operations.
pub type Result<T> = std::result::Result<T, Error>;
