//! Modern-format structural parser
//!
//! Baseline of the compatibility dispatch table. Consumes the root's
//! children in document order: program metadata, the principal score-content
//! element, and the revision history (discarded). Unknown children go
//! through the stream's diagnostic channel so documents written by newer
//! programs with an additive vocabulary still load.

use crate::content::read_score_content;
use crate::strategy::FormatStrategy;
use crate::version::MODERN_VERSION;
use crate::xml::XmlStream;
use crate::{Error, Result};
use scorepack_model::{MasterScore, ReadContext, Score};

/// Parse the children of the root element in the modern format.
///
/// Shared between the master-document dispatch path and excerpt parsing,
/// which always uses the modern parser.
pub fn read_modern(score: &mut Score, xml: &mut XmlStream<'_>, ctx: &mut ReadContext) -> Result<()> {
    // Chord symbols resolve against the chord list during structural
    // parsing; fall back to the default list when none was loaded.
    if score.chord_list.is_empty() {
        score.chord_list.load_defaults();
    }

    while xml.read_next_start_element() {
        match xml.name() {
            "programVersion" => score.program_version = xml.read_text(),
            "programRevision" => score.program_revision = xml.read_int_radix(16) as u32,
            "Score" => {
                if !read_score_content(score, xml, ctx) {
                    if xml.has_custom_error() {
                        return Err(Error::CriticallyCorrupted);
                    }
                    return Err(Error::BadFormat);
                }
            }
            "Revision" => xml.skip_current_element(),
            _ => xml.unknown(),
        }
    }

    Ok(())
}

/// The current-generation format strategy.
#[derive(Debug, Default)]
pub struct ModernReader;

impl FormatStrategy for ModernReader {
    fn name(&self) -> &'static str {
        "modern"
    }

    fn matches(&self, version: i32, _test_mode: bool) -> bool {
        version >= MODERN_VERSION
    }

    fn read(
        &self,
        score: &mut MasterScore,
        xml: &mut XmlStream<'_>,
        ctx: &mut ReadContext,
    ) -> Result<()> {
        read_modern(&mut score.score, xml, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(data: &str) -> (Score, Result<()>) {
        let mut score = Score::new();
        let mut ctx = ReadContext::new("test");
        let mut xml = XmlStream::new(data.as_bytes(), "test");
        assert!(xml.read_next_start_element());
        let result = read_modern(&mut score, &mut xml, &mut ctx);
        (score, result)
    }

    #[test]
    fn program_metadata_is_stored_verbatim() {
        let (score, result) = read(
            "<scoreDocument version=\"4.10\">\
               <programVersion>4.1.1</programVersion>\
               <programRevision>1a2b3c</programRevision>\
               <Score><Division>480</Division></Score>\
             </scoreDocument>",
        );

        assert!(result.is_ok());
        assert_eq!(score.program_version, "4.1.1");
        assert_eq!(score.program_revision, 0x001a_2b3c);
        assert_eq!(score.divisions, 480);
    }

    #[test]
    fn revision_history_is_discarded() {
        let (score, result) = read(
            "<scoreDocument version=\"4.10\">\
               <Revision><id>1</id><diff>...</diff></Revision>\
               <Score/>\
             </scoreDocument>",
        );

        assert!(result.is_ok());
        assert!(score.meta_tags.is_empty());
    }

    #[test]
    fn score_content_failure_without_custom_error_is_bad_format() {
        // Truncated inside the score-content element.
        let (_, result) = read("<scoreDocument version=\"4.10\"><Score><Part>");
        assert_eq!(result, Err(Error::BadFormat));
    }

    #[test]
    fn score_content_failure_with_custom_error_is_critically_corrupted() {
        let (_, result) = read(
            "<scoreDocument version=\"4.10\">\
               <Score><Part><Staff link=\"nowhere\"/></Part></Score>\
             </scoreDocument>",
        );
        assert_eq!(result, Err(Error::CriticallyCorrupted));
    }

    #[test]
    fn empty_chord_list_falls_back_to_defaults() {
        let (score, result) = read("<scoreDocument version=\"4.10\"><Score/></scoreDocument>");
        assert!(result.is_ok());
        assert!(!score.chord_list.is_empty());
    }
}
