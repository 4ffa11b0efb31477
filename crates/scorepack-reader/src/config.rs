//! Reader configuration

/// Configuration for one score package load.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderConfig {
    /// Suppress version-band validation and load the document anyway.
    pub ignore_version_error: bool,

    /// Skip registering embedded images into the image store.
    pub skip_images: bool,

    /// Test-mode override: forces default-style seeding and the
    /// third-era structural parser regardless of the detected version.
    pub test_mode: bool,
}
