//! Format version token handling
//!
//! The root element carries a `version` attribute formatted as
//! `"<major>.<minor>"`. Both sides parse leniently: a missing or
//! non-numeric part reads as zero, never failing. Version validation
//! happens against the combined ordinal, not the token shape.

/// Newest format version this build can read.
pub const MSC_VERSION: i32 = 410;

/// Oldest format version this build can read.
pub const OLDEST_VERSION: i32 = 114;

/// First version of the modern format generation.
pub const MODERN_VERSION: i32 = 400;

/// The abandoned intermediate format revision that cannot be read.
pub const ABANDONED_VERSION: i32 = 300;

/// Parse a `"<major>.<minor>"` token into the combined version ordinal
/// `major * 100 + minor`.
pub fn parse_version(token: &str) -> i32 {
    let mut parts = token.splitn(2, '.');
    let major = part_to_int(parts.next());
    let minor = part_to_int(parts.next());
    major * 100 + minor
}

fn part_to_int(part: Option<&str>) -> i32 {
    part.and_then(|p| p.trim().parse::<i32>().ok()).unwrap_or(0)
}
