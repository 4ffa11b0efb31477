//! Excerpt entity binding a subordinate score to its master

use crate::score::Score;
use serde::{Deserialize, Serialize};

/// A named subordinate part/arrangement derived from the master document.
///
/// The excerpt owns its subordinate score; element references inside it are
/// resolved against the master document's identifier space during loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Excerpt {
    /// Excerpt name as enumerated by the container.
    pub name: String,

    /// The owned subordinate document.
    pub score: Score,

    /// Track mapping discovered during parsing: `(subordinate, master)`
    /// track-index pairs in document order.
    pub tracks: Vec<(usize, usize)>,
}

impl Excerpt {
    /// Create an excerpt around a freshly constructed subordinate score.
    pub fn new(score: Score) -> Self {
        Self {
            name: String::new(),
            score,
            tracks: Vec::new(),
        }
    }

    /// Record the track mapping discovered during parsing.
    pub fn set_tracks_mapping(&mut self, tracks: Vec<(usize, usize)>) {
        self.tracks = tracks;
    }

    /// Assign the excerpt's name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
