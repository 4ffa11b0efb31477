//! Directory-backed score package
//!
//! Package layout, relative to the package root:
//!
//! ```text
//! score.xml                   main score document
//! style.xml                   master style
//! chordlist.xml               master chord list
//! audio.bin                   audio payload
//! images/<name>               embedded images
//! excerpts/<name>.xml         excerpt document
//! excerpts/<name>.style.xml   excerpt style
//! ```

use crate::container::ScoreContainer;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const SCORE_ENTRY: &str = "score.xml";
const STYLE_ENTRY: &str = "style.xml";
const CHORD_LIST_ENTRY: &str = "chordlist.xml";
const AUDIO_ENTRY: &str = "audio.bin";
const IMAGES_DIR: &str = "images";
const EXCERPTS_DIR: &str = "excerpts";
const EXCERPT_SUFFIX: &str = ".xml";
const EXCERPT_STYLE_SUFFIX: &str = ".style.xml";

/// A score package stored as a plain directory.
#[derive(Debug)]
pub struct DirContainer {
    root: PathBuf,
    opened: bool,
}

impl DirContainer {
    /// Open a package rooted at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let root = path.into();
        let meta = fs::metadata(&root)
            .map_err(|e| Error::open(root.display().to_string(), e.to_string()))?;
        if !meta.is_dir() {
            return Err(Error::NotADirectory {
                path: root.display().to_string(),
            });
        }
        Ok(Self { root, opened: true })
    }

    /// Package modification time, when the filesystem reports one.
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        fs::metadata(&self.root)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from)
    }

    fn read_entry(&self, rel: &str) -> Vec<u8> {
        let path = self.root.join(rel);
        match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(entry = rel, error = %e, "package entry not readable, treating as empty");
                Vec::new()
            }
        }
    }

    fn list_dir(&self, rel: &str) -> Vec<String> {
        let dir = self.root.join(rel);
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .flatten()
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        // Directory iteration order is platform-dependent; fix it.
        names.sort();
        names
    }
}

impl ScoreContainer for DirContainer {
    fn is_opened(&self) -> bool {
        self.opened
    }

    fn file_path(&self) -> &Path {
        &self.root
    }

    fn read_style_file(&self) -> Vec<u8> {
        self.read_entry(STYLE_ENTRY)
    }

    fn read_chord_list_file(&self) -> Vec<u8> {
        self.read_entry(CHORD_LIST_ENTRY)
    }

    fn read_score_file(&self) -> Vec<u8> {
        self.read_entry(SCORE_ENTRY)
    }

    fn read_audio_file(&self) -> Vec<u8> {
        self.read_entry(AUDIO_ENTRY)
    }

    fn image_file_names(&self) -> Vec<String> {
        self.list_dir(IMAGES_DIR)
    }

    fn excerpt_names(&self) -> Vec<String> {
        self.list_dir(EXCERPTS_DIR)
            .into_iter()
            .filter(|n| n.ends_with(EXCERPT_SUFFIX) && !n.ends_with(EXCERPT_STYLE_SUFFIX))
            .map(|n| n.trim_end_matches(EXCERPT_SUFFIX).to_string())
            .collect()
    }

    fn read_image_file(&self, name: &str) -> Vec<u8> {
        self.read_entry(&format!("{IMAGES_DIR}/{name}"))
    }

    fn read_excerpt_file(&self, name: &str) -> Vec<u8> {
        self.read_entry(&format!("{EXCERPTS_DIR}/{name}{EXCERPT_SUFFIX}"))
    }

    fn read_excerpt_style_file(&self, name: &str) -> Vec<u8> {
        self.read_entry(&format!("{EXCERPTS_DIR}/{name}{EXCERPT_STYLE_SUFFIX}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn open_rejects_missing_path() {
        let err = DirContainer::open("/path/that/does/not/exist").unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }

    #[test]
    fn absent_entries_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let container = DirContainer::open(dir.path()).unwrap();

        assert!(container.is_opened());
        assert!(container.read_style_file().is_empty());
        assert!(container.read_audio_file().is_empty());
        assert!(container.excerpt_names().is_empty());
    }

    #[test]
    fn excerpt_names_come_from_document_entries_only() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "excerpts/Part1.xml", "<x/>");
        write(dir.path(), "excerpts/Part1.style.xml", "<y/>");
        write(dir.path(), "excerpts/Part2.xml", "<x/>");

        let container = DirContainer::open(dir.path()).unwrap();
        assert_eq!(container.excerpt_names(), vec!["Part1", "Part2"]);
        assert_eq!(container.read_excerpt_style_file("Part1"), b"<y/>");
    }
}
