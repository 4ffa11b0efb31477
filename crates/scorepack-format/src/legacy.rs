//! Legacy-format strategies
//!
//! One strategy per historical format era. These are pluggable units wired
//! into the dispatch table; only their contract is fixed here: consume the
//! root's children in the era's vocabulary, tolerate unknown elements, and
//! record settings whose shape changed since that era so the caller can
//! migrate them. Era documents have no excerpts section by construction.

use crate::strategy::FormatStrategy;
use crate::version::MODERN_VERSION;
use crate::xml::XmlStream;
use crate::Result;
use scorepack_model::{MasterScore, Measure, ReadContext, SettingsMigration, Staff};

/// Reader for first-generation documents (version <= 114).
#[derive(Debug, Default)]
pub struct Era114Reader;

impl FormatStrategy for Era114Reader {
    fn name(&self) -> &'static str {
        "era-114"
    }

    fn matches(&self, version: i32, _test_mode: bool) -> bool {
        version <= 114
    }

    fn read(
        &self,
        score: &mut MasterScore,
        xml: &mut XmlStream<'_>,
        ctx: &mut ReadContext,
    ) -> Result<()> {
        while xml.read_next_start_element() {
            match xml.name() {
                "programVersion" => score.program_version = xml.read_text(),
                // Global magnification moved into the style table after
                // this era.
                "mag" => ctx.record_migration(SettingsMigration {
                    key: "mag".into(),
                    old_value: xml.read_text(),
                    migrated_to: Some("style.spatium".into()),
                }),
                "staff" => read_flat_staff(score, xml),
                _ => xml.unknown(),
            }
        }
        Ok(())
    }
}

/// Reader for second-generation documents (version 115..=207).
#[derive(Debug, Default)]
pub struct Era206Reader;

impl FormatStrategy for Era206Reader {
    fn name(&self) -> &'static str {
        "era-206"
    }

    fn matches(&self, version: i32, _test_mode: bool) -> bool {
        version <= 207
    }

    fn read(
        &self,
        score: &mut MasterScore,
        xml: &mut XmlStream<'_>,
        ctx: &mut ReadContext,
    ) -> Result<()> {
        while xml.read_next_start_element() {
            match xml.name() {
                "programVersion" => score.program_version = xml.read_text(),
                "programRevision" => score.program_revision = xml.read_int_radix(16) as u32,
                // Per-document synthesizer state became an application
                // setting after this era.
                "Synthesizer" => {
                    ctx.record_migration(SettingsMigration {
                        key: "Synthesizer".into(),
                        old_value: String::new(),
                        migrated_to: Some("audio.synthesizer".into()),
                    });
                    xml.skip_current_element();
                }
                "staff" => read_flat_staff(score, xml),
                _ => xml.unknown(),
            }
        }
        Ok(())
    }
}

/// Reader for third-generation documents (version 208..=399, or any version
/// when the test-mode override forces this path).
#[derive(Debug, Default)]
pub struct Era302Reader;

impl FormatStrategy for Era302Reader {
    fn name(&self) -> &'static str {
        "era-302"
    }

    fn matches(&self, version: i32, test_mode: bool) -> bool {
        version < MODERN_VERSION || test_mode
    }

    fn read(
        &self,
        score: &mut MasterScore,
        xml: &mut XmlStream<'_>,
        ctx: &mut ReadContext,
    ) -> Result<()> {
        while xml.read_next_start_element() {
            match xml.name() {
                "programVersion" => score.program_version = xml.read_text(),
                "programRevision" => score.program_revision = xml.read_int_radix(16) as u32,
                // Playback gain moved out of the document in the modern
                // generation.
                "playbackGain" => ctx.record_migration(SettingsMigration {
                    key: "playbackGain".into(),
                    old_value: xml.read_text(),
                    migrated_to: Some("audio.masterGain".into()),
                }),
                "staff" => read_flat_staff(score, xml),
                _ => xml.unknown(),
            }
        }
        Ok(())
    }
}

/// Legacy eras persisted staves flat under the root, with measures inline.
fn read_flat_staff(score: &mut MasterScore, xml: &mut XmlStream<'_>) {
    let first = score.staves.is_empty();
    score.staves.push(Staff { id: None });
    while xml.read_next_start_element() {
        if xml.name() == "measure" {
            if first {
                let number = score.measures.len() as u32 + 1;
                score.measures.push(Measure {
                    number,
                    ticks: 1920,
                    linked_to: None,
                });
            }
            xml.skip_current_element();
        } else {
            xml.unknown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_with(strategy: &dyn FormatStrategy, data: &str) -> (MasterScore, ReadContext) {
        let mut score = MasterScore::new();
        let mut ctx = ReadContext::new("test");
        let mut xml = XmlStream::new(data.as_bytes(), "test");
        assert!(xml.read_next_start_element());
        strategy.read(&mut score, &mut xml, &mut ctx).unwrap();
        (score, ctx)
    }

    #[test]
    fn era_114_migrates_the_mag_setting() {
        let (score, ctx) = read_with(
            &Era114Reader,
            "<scoreDocument version=\"1.14\">\
               <programVersion>1.3</programVersion>\
               <mag>1.5</mag>\
               <staff><measure/><measure/></staff>\
             </scoreDocument>",
        );

        assert_eq!(score.program_version, "1.3");
        assert_eq!(score.measures.len(), 2);

        let settings = ctx.into_settings();
        assert_eq!(settings.migrations.len(), 1);
        assert_eq!(settings.migrations[0].key, "mag");
        assert_eq!(settings.migrations[0].old_value, "1.5");
    }

    #[test]
    fn era_206_tolerates_unknown_elements() {
        let (score, _) = read_with(
            &Era206Reader,
            "<scoreDocument version=\"2.06\">\
               <programRevision>3543170</programRevision>\
               <somethingNew/>\
               <staff><measure/></staff>\
             </scoreDocument>",
        );

        assert_eq!(score.program_revision, 0x0354_3170);
        assert_eq!(score.staves.len(), 1);
    }

    #[test]
    fn era_302_migrates_playback_gain() {
        let (_, ctx) = read_with(
            &Era302Reader,
            "<scoreDocument version=\"3.02\"><playbackGain>0.8</playbackGain></scoreDocument>",
        );

        let settings = ctx.into_settings();
        assert_eq!(
            settings.migrations[0].migrated_to.as_deref(),
            Some("audio.masterGain")
        );
    }
}
