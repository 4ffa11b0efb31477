#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # scorepack-model
//!
//! In-memory score model, excerpts, and per-load read context.
//!
//! This crate provides the document entities a score package is loaded into:
//! the master score, subordinate excerpt scores, style and chord-list tables,
//! and the transient read context that carries link resolution and
//! settings-compatibility state through one load call.

/// Audio payload attached to a score.
pub mod audio;
/// Chord-symbol descriptions keyed by id.
pub mod chordlist;
/// Per-load read context, link table, and settings-compatibility state.
pub mod context;
/// Excerpt entity binding a subordinate score to its master.
pub mod excerpt;
/// Master and subordinate score documents.
pub mod score;
/// Keyed style table with built-in defaults.
pub mod style;

pub use audio::Audio;
pub use chordlist::{ChordDescription, ChordList};
pub use context::{LinkTarget, ReadContext, SettingsCompat, SettingsMigration};
pub use excerpt::Excerpt;
pub use score::{MasterScore, Measure, Part, Score, Staff, VOICES};
pub use style::{Style, StyleValue};

use thiserror::Error;

/// Errors that can occur when working with the score model
#[derive(Error, Debug)]
pub enum Error {
    #[error("link target not found for id '{id}'")]
    LinkNotFound { id: String },

    #[error("duplicate link id '{id}'")]
    DuplicateLink { id: String },
}

impl Error {
    /// Build a link-not-found error with the unresolved id.
    pub fn link_not_found(id: impl Into<String>) -> Self {
        Self::LinkNotFound { id: id.into() }
    }

    /// Build a duplicate-link error with the colliding id.
    pub fn duplicate_link(id: impl Into<String>) -> Self {
        Self::DuplicateLink { id: id.into() }
    }
}

/// Crate-local result type for model operations.
pub type Result<T> = std::result::Result<T, Error>;
