//! In-memory score package for tests and tooling

use crate::container::ScoreContainer;
use std::path::{Path, PathBuf};

/// A score package assembled in memory.
///
/// Insertion order of images and excerpts is the enumeration order.
#[derive(Debug, Default)]
pub struct MemContainer {
    path: PathBuf,
    opened: bool,
    style: Vec<u8>,
    chord_list: Vec<u8>,
    score: Vec<u8>,
    audio: Vec<u8>,
    images: Vec<(String, Vec<u8>)>,
    excerpts: Vec<(String, Vec<u8>, Vec<u8>)>,
}

impl MemContainer {
    /// Create an opened, empty package.
    pub fn new() -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            opened: true,
            ..Self::default()
        }
    }

    /// Override the opened flag, for exercising open-failure paths.
    pub fn set_opened(&mut self, opened: bool) -> &mut Self {
        self.opened = opened;
        self
    }

    /// Set the main score document blob.
    pub fn with_score(mut self, score: impl Into<Vec<u8>>) -> Self {
        self.score = score.into();
        self
    }

    /// Set the master style blob.
    pub fn with_style(mut self, style: impl Into<Vec<u8>>) -> Self {
        self.style = style.into();
        self
    }

    /// Set the master chord-list blob.
    pub fn with_chord_list(mut self, chord_list: impl Into<Vec<u8>>) -> Self {
        self.chord_list = chord_list.into();
        self
    }

    /// Set the audio payload blob.
    pub fn with_audio(mut self, audio: impl Into<Vec<u8>>) -> Self {
        self.audio = audio.into();
        self
    }

    /// Append an image blob.
    pub fn with_image(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.images.push((name.into(), data.into()));
        self
    }

    /// Append an excerpt with its document and style blobs.
    pub fn with_excerpt(
        mut self,
        name: impl Into<String>,
        data: impl Into<Vec<u8>>,
        style: impl Into<Vec<u8>>,
    ) -> Self {
        self.excerpts.push((name.into(), data.into(), style.into()));
        self
    }
}

impl ScoreContainer for MemContainer {
    fn is_opened(&self) -> bool {
        self.opened
    }

    fn file_path(&self) -> &Path {
        &self.path
    }

    fn read_style_file(&self) -> Vec<u8> {
        self.style.clone()
    }

    fn read_chord_list_file(&self) -> Vec<u8> {
        self.chord_list.clone()
    }

    fn read_score_file(&self) -> Vec<u8> {
        self.score.clone()
    }

    fn read_audio_file(&self) -> Vec<u8> {
        self.audio.clone()
    }

    fn image_file_names(&self) -> Vec<String> {
        self.images.iter().map(|(name, _)| name.clone()).collect()
    }

    fn excerpt_names(&self) -> Vec<String> {
        self.excerpts.iter().map(|(name, ..)| name.clone()).collect()
    }

    fn read_image_file(&self, name: &str) -> Vec<u8> {
        self.images
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.clone())
            .unwrap_or_default()
    }

    fn read_excerpt_file(&self, name: &str) -> Vec<u8> {
        self.excerpts
            .iter()
            .find(|(n, ..)| n == name)
            .map(|(_, data, _)| data.clone())
            .unwrap_or_default()
    }

    fn read_excerpt_style_file(&self, name: &str) -> Vec<u8> {
        self.excerpts
            .iter()
            .find(|(n, ..)| n == name)
            .map(|(.., style)| style.clone())
            .unwrap_or_default()
    }
}
