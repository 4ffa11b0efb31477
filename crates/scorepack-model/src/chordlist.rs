//! Chord-symbol descriptions keyed by id

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One chord-symbol description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordDescription {
    /// Stable id used by chord-symbol references in the document.
    pub id: String,

    /// Symbol as rendered ("maj7", "m", ...).
    pub name: String,
}

/// Chord-symbol table for one document.
///
/// Structural parsing of chord symbols resolves against this table, so it
/// must be populated before the score content is parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChordList {
    chords: BTreeMap<String, ChordDescription>,
}

impl ChordList {
    /// Create an empty chord list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one description.
    pub fn insert(&mut self, description: ChordDescription) {
        self.chords.insert(description.id.clone(), description);
    }

    /// Look up a description by id.
    pub fn get(&self, id: &str) -> Option<&ChordDescription> {
        self.chords.get(id)
    }

    /// Whether no descriptions are present.
    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Number of descriptions.
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    /// Populate the table with the built-in default chord vocabulary.
    pub fn load_defaults(&mut self) {
        for (id, name) in [
            ("major", ""),
            ("minor", "m"),
            ("dominant-seventh", "7"),
            ("major-seventh", "maj7"),
            ("minor-seventh", "m7"),
            ("diminished", "dim"),
            ("augmented", "aug"),
            ("suspended-fourth", "sus4"),
        ] {
            self.insert(ChordDescription {
                id: id.into(),
                name: name.into(),
            });
        }
    }
}
