//! Master and subordinate score documents

use crate::audio::Audio;
use crate::chordlist::ChordList;
use crate::excerpt::Excerpt;
use crate::style::Style;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// Number of voice tracks per staff.
pub const VOICES: usize = 4;

/// A score document at ownership-and-linkage granularity.
///
/// This is the body shared by the master document and every excerpt's
/// subordinate document. Notation detail below the measure level is outside
/// the reader's scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Score {
    /// Display name of the document (file name for the master, excerpt name
    /// for subordinate scores); used for diagnostics only.
    pub name: String,

    /// Detected format version, encoded `major * 100 + minor`.
    pub msc_version: i32,

    /// Program version string persisted by the writing application.
    pub program_version: String,

    /// Program revision, persisted as a hexadecimal integer.
    pub program_revision: u32,

    /// Ticks per quarter note.
    pub divisions: i32,

    /// Document meta tags (title, composer, ...).
    pub meta_tags: HashMap<String, String>,

    /// Style table for this document.
    pub style: Style,

    /// Chord-symbol descriptions for this document.
    pub chord_list: ChordList,

    /// Audio payload slot; declared during structural parsing, filled by the
    /// load orchestrator.
    pub audio: Option<Audio>,

    /// Instrument parts in document order.
    pub parts: Vec<Part>,

    /// Staves in document order, across all parts.
    pub staves: Vec<Staff>,

    /// Measures in temporal order.
    pub measures: Vec<Measure>,
}

/// An instrument part owning a contiguous run of staves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    /// Part name as persisted.
    pub name: String,

    /// Number of staves belonging to this part.
    pub staff_count: usize,
}

/// A staff within a part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Staff {
    /// Stable identifier used for cross-document link resolution.
    pub id: Option<String>,
}

/// A measure at linkage granularity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Measure {
    /// One-based measure number.
    pub number: u32,

    /// Duration in ticks.
    pub ticks: i32,

    /// Index of the master-document measure this measure is aligned to.
    /// `None` for master-document measures and unlinked tails.
    pub linked_to: Option<usize>,
}

impl Score {
    /// Create an empty score document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of voice tracks across all staves.
    pub fn track_count(&self) -> usize {
        self.staves.len() * VOICES
    }

    /// Align this score's measures to the master document's measure
    /// sequence by temporal position. Linkage, not duplication: only the
    /// master index is recorded.
    pub fn link_measures(&mut self, master: &Score) {
        for (i, measure) in self.measures.iter_mut().enumerate() {
            if i < master.measures.len() {
                measure.linked_to = Some(i);
            }
        }
    }
}

/// The top-level score being loaded; owns all excerpts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MasterScore {
    /// The master document body.
    pub score: Score,

    /// Registered excerpts, in registration order.
    pub excerpts: Vec<Excerpt>,

    /// Whether the excerpt list diverged from the persisted state.
    pub excerpts_changed: bool,

    /// Whether the document needs an autosave pass.
    pub autosave_dirty: bool,
}

impl MasterScore {
    /// Create an empty master score.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty master score carrying the source file name for
    /// diagnostics.
    pub fn with_file_name(name: impl Into<String>) -> Self {
        Self {
            score: Score {
                name: name.into(),
                ..Score::default()
            },
            ..Self::default()
        }
    }

    /// Create an empty subordinate document for an excerpt of this master.
    pub fn create_excerpt_score(&self, name: impl Into<String>) -> Score {
        Score {
            name: name.into(),
            ..Score::default()
        }
    }

    /// Register a completed excerpt on this master.
    pub fn add_excerpt(&mut self, excerpt: Excerpt) {
        self.excerpts.push(excerpt);
    }
}

impl Deref for MasterScore {
    type Target = Score;

    fn deref(&self) -> &Score {
        &self.score
    }
}

impl DerefMut for MasterScore {
    fn deref_mut(&mut self) -> &mut Score {
        &mut self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_count_is_voices_per_staff() {
        let mut score = Score::new();
        score.staves.push(Staff { id: None });
        score.staves.push(Staff {
            id: Some("s2".into()),
        });
        assert_eq!(score.track_count(), 2 * VOICES);
    }

    #[test]
    fn link_measures_aligns_by_position() {
        let mut master = Score::new();
        for number in 1..=3 {
            master.measures.push(Measure {
                number,
                ticks: 1920,
                linked_to: None,
            });
        }

        let mut part = Score::new();
        for number in 1..=4 {
            part.measures.push(Measure {
                number,
                ticks: 1920,
                linked_to: None,
            });
        }

        part.link_measures(&master);

        assert_eq!(part.measures[0].linked_to, Some(0));
        assert_eq!(part.measures[2].linked_to, Some(2));
        // The tail past the master's last measure stays unlinked.
        assert_eq!(part.measures[3].linked_to, None);
    }

    #[test]
    fn master_score_round_trips_through_json() {
        let mut master = MasterScore::with_file_name("quartet.xml");
        master.score.msc_version = 410;
        master.score.meta_tags.insert("workTitle".into(), "Quartet".into());

        let json = serde_json::to_string(&master).unwrap();
        let restored: MasterScore = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.name, "quartet.xml");
        assert_eq!(restored.msc_version, 410);
        assert_eq!(restored.meta_tags["workTitle"], "Quartet");
    }
}
