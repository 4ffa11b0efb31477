//! Per-load read context, link table, and settings-compatibility state
//!
//! A context is scoped to one load call and never owns document entities; it
//! only indexes references into them. An excerpt parse gets its own context
//! whose link table is a value copy of the master's, so the subordinate parse
//! can resolve into master entities without mutating the master's table.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reference to an already-constructed document entity, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// A part in the owning document.
    Part(usize),
    /// A staff in the owning document.
    Staff(usize),
    /// A measure in the owning document.
    Measure(usize),
}

/// A settings value whose shape changed across format versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsMigration {
    /// Settings key as persisted in the source document.
    pub key: String,

    /// Raw value as persisted.
    pub old_value: String,

    /// Key the value maps onto in the current settings shape, when one
    /// exists.
    pub migrated_to: Option<String>,
}

/// Settings-compatibility data accumulated during one load.
///
/// Moved out of the context when the load completes; the caller consumes it
/// exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsCompat {
    /// Migrations in the order they were encountered.
    pub migrations: Vec<SettingsMigration>,
}

impl SettingsCompat {
    /// Whether any migration was recorded.
    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }
}

/// Mutable per-load state threaded through structural parsing.
#[derive(Debug, Default)]
pub struct ReadContext {
    ignore_version_error: bool,
    doc_name: String,
    links: HashMap<String, LinkTarget>,
    tracks: Vec<(usize, usize)>,
    settings_compat: SettingsCompat,
}

impl ReadContext {
    /// Create a context for a master-document load.
    pub fn new(doc_name: impl Into<String>) -> Self {
        Self {
            doc_name: doc_name.into(),
            ..Self::default()
        }
    }

    /// Create a context for an excerpt parse, copying the master's link
    /// table so references inside the excerpt resolve against
    /// master-document entities.
    pub fn for_excerpt(&self, doc_name: impl Into<String>) -> Self {
        Self {
            ignore_version_error: self.ignore_version_error,
            doc_name: doc_name.into(),
            links: self.links.clone(),
            tracks: Vec::new(),
            settings_compat: SettingsCompat::default(),
        }
    }

    /// Whether version-mismatch errors are suppressed for this load.
    pub fn ignore_version_error(&self) -> bool {
        self.ignore_version_error
    }

    /// Set the version-mismatch suppression flag.
    pub fn set_ignore_version_error(&mut self, ignore: bool) {
        self.ignore_version_error = ignore;
    }

    /// Document name carried for diagnostics.
    pub fn doc_name(&self) -> &str {
        &self.doc_name
    }

    /// Register a link target under a stable id.
    pub fn add_link(&mut self, id: impl Into<String>, target: LinkTarget) -> Result<()> {
        let id = id.into();
        if self.links.contains_key(&id) {
            return Err(Error::duplicate_link(id));
        }
        self.links.insert(id, target);
        Ok(())
    }

    /// Resolve a stable id to an already-constructed entity.
    pub fn resolve(&self, id: &str) -> Result<LinkTarget> {
        self.links
            .get(id)
            .copied()
            .ok_or_else(|| Error::link_not_found(id))
    }

    /// Number of registered links.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Record one `(subordinate, master)` track-index pair.
    pub fn add_track_mapping(&mut self, from: usize, to: usize) {
        self.tracks.push((from, to));
    }

    /// Track mapping accumulated so far.
    pub fn tracks(&self) -> &[(usize, usize)] {
        &self.tracks
    }

    /// Record a settings value whose shape changed across versions.
    pub fn record_migration(&mut self, migration: SettingsMigration) {
        self.settings_compat.migrations.push(migration);
    }

    /// Consume the context, yielding the accumulated settings-compatibility
    /// data.
    pub fn into_settings(self) -> SettingsCompat {
        self.settings_compat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_context_copies_links_by_value() {
        let mut master = ReadContext::new("master");
        master.set_ignore_version_error(true);
        master.add_link("s1", LinkTarget::Staff(0)).unwrap();

        let mut sub = master.for_excerpt("Part1");
        assert!(sub.ignore_version_error());
        assert_eq!(sub.resolve("s1").unwrap(), LinkTarget::Staff(0));

        // Mutating the subordinate table leaves the master untouched.
        sub.add_link("s2", LinkTarget::Staff(1)).unwrap();
        assert_eq!(master.link_count(), 1);
        assert!(master.resolve("s2").is_err());
    }

    #[test]
    fn duplicate_link_ids_are_rejected() {
        let mut ctx = ReadContext::new("master");
        ctx.add_link("m1", LinkTarget::Measure(0)).unwrap();
        assert!(matches!(
            ctx.add_link("m1", LinkTarget::Measure(1)),
            Err(Error::DuplicateLink { .. })
        ));
    }

    #[test]
    fn settings_move_out_with_the_context() {
        let mut ctx = ReadContext::new("master");
        ctx.record_migration(SettingsMigration {
            key: "playbackGain".into(),
            old_value: "0.8".into(),
            migrated_to: Some("audio.masterGain".into()),
        });

        let settings = ctx.into_settings();
        assert_eq!(settings.migrations.len(), 1);
        assert_eq!(settings.migrations[0].key, "playbackGain");
    }
}
