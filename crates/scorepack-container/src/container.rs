//! Accessor boundary over an opened score package

use std::path::Path;

/// Named-blob access to an opened score package.
///
/// Readers return the blob bytes, or empty bytes when the entry is absent.
/// Absence is not an error at this layer; apply sites treat empty blobs as
/// no-ops. Enumeration order of image and excerpt names is preserved as the
/// package stores them.
pub trait ScoreContainer {
    /// Whether the package was opened successfully.
    fn is_opened(&self) -> bool;

    /// Path of the package on disk, for diagnostics.
    fn file_path(&self) -> &Path;

    /// Style blob for the master document.
    fn read_style_file(&self) -> Vec<u8>;

    /// Chord-list blob for the master document.
    fn read_chord_list_file(&self) -> Vec<u8>;

    /// Main score document blob.
    fn read_score_file(&self) -> Vec<u8>;

    /// Audio payload blob.
    fn read_audio_file(&self) -> Vec<u8>;

    /// Names of embedded image blobs, in package order.
    fn image_file_names(&self) -> Vec<String>;

    /// Names of embedded excerpts, in package order.
    fn excerpt_names(&self) -> Vec<String>;

    /// One image blob by name.
    fn read_image_file(&self, name: &str) -> Vec<u8>;

    /// One excerpt's document blob by name.
    fn read_excerpt_file(&self, name: &str) -> Vec<u8>;

    /// One excerpt's dedicated style blob by name.
    fn read_excerpt_style_file(&self, name: &str) -> Vec<u8>;
}
