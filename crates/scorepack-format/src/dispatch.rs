//! Version dispatcher
//!
//! Finds the single recognized root element, validates the declared format
//! version against the supported band, seeds default style where the format
//! generation requires it, and routes to exactly one format strategy.

use crate::hook::StyleSeeder;
use crate::strategy::StrategyTable;
use crate::version::{ABANDONED_VERSION, MODERN_VERSION, MSC_VERSION, OLDEST_VERSION, parse_version};
use crate::xml::XmlStream;
use crate::{Error, Result};
use scorepack_model::{MasterScore, ReadContext};
use tracing::debug;

/// The recognized root element of a score document.
pub const ROOT_ELEMENT: &str = "scoreDocument";

/// Read one score document: locate the root element, validate its version,
/// and run the matching format strategy.
///
/// The detected version is recorded on the document before validation, so a
/// caller that suppressed version errors can still inspect it. After the
/// strategy returns, the document's excerpt-change and autosave flags are
/// cleared; loading a file is not a user edit.
pub fn read_document(
    score: &mut MasterScore,
    xml: &mut XmlStream<'_>,
    ctx: &mut ReadContext,
    style_seeder: Option<&dyn StyleSeeder>,
    table: &StrategyTable,
    test_mode: bool,
) -> Result<()> {
    while xml.read_next_start_element() {
        if xml.name() == ROOT_ELEMENT {
            let version = parse_version(xml.attribute("version").unwrap_or_default());
            score.msc_version = version;

            if !ctx.ignore_version_error() {
                if version > MSC_VERSION {
                    return Err(Error::TooNew);
                }
                if version < OLDEST_VERSION {
                    return Err(Error::TooOld);
                }
                if version == ABANDONED_VERSION {
                    return Err(Error::Old300Format);
                }
            }

            // Pre-modern generations persisted only the style deltas, so
            // the defaults must be in place before structural parsing.
            // Modern documents carry their complete style.
            if let Some(seeder) = style_seeder {
                if version < MODERN_VERSION || test_mode {
                    seeder.seed_default_style(&mut score.score);
                }
            }

            let Some(strategy) = table.select(version, test_mode) else {
                return Err(Error::BadFormat);
            };
            debug!(
                doc = xml.doc_name(),
                version,
                strategy = strategy.name(),
                "dispatching score document"
            );

            let result = strategy.read(score, xml, ctx);

            score.excerpts_changed = false;
            score.autosave_dirty = false;

            return result;
        }
        xml.unknown();
    }

    Err(Error::corrupted(xml.error_text()))
}
