//! Default-style seeding before structural parsing
//!
//! Format generations before the modern one only persisted the style values
//! a user changed, so the defaults must be in place before those deltas are
//! applied. Modern documents persist the complete style and skip seeding
//! unless test mode forces it. The seeder is consulted at most once per
//! load, before any structural child is parsed.

use scorepack_model::Score;

/// Capability to inject default style values into a document.
pub trait StyleSeeder {
    /// Seed the document's style with the built-in defaults.
    fn seed_default_style(&self, score: &mut Score);
}

/// Seeder backed by the model's built-in defaults table.
#[derive(Debug, Default)]
pub struct DefaultStyleSeeder;

impl StyleSeeder for DefaultStyleSeeder {
    fn seed_default_style(&self, score: &mut Score) {
        score.style.reset_to_defaults();
    }
}
