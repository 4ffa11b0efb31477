//! Score-content parser
//!
//! Populates a document from the principal score-content element, at
//! ownership-and-linkage granularity: parts, staves (with stable ids
//! registered in the read context's link table), measures, meta tags, the
//! audio payload slot, and the track-mapping list used by excerpts.
//!
//! Reports failure by returning `false`; irrecoverable structural problems
//! additionally raise the custom application error on the stream, which the
//! caller maps to a harder failure kind.

use crate::xml::XmlStream;
use scorepack_model::{Audio, LinkTarget, Measure, Part, ReadContext, Score, Staff};

/// Default measure duration in ticks (4/4 at 480 divisions).
const DEFAULT_MEASURE_TICKS: i32 = 1920;

/// Parse the children of the score-content element into `score`.
///
/// Returns `true` on success. On failure the stream's error state
/// distinguishes plain malformation from application-level corruption.
pub fn read_score_content(
    score: &mut Score,
    xml: &mut XmlStream<'_>,
    ctx: &mut ReadContext,
) -> bool {
    while xml.read_next_start_element() {
        match xml.name() {
            "Division" => score.divisions = xml.read_int() as i32,
            "name" => score.name = xml.read_text(),
            "metaTag" => {
                let name = xml.attribute("name").unwrap_or_default().to_string();
                let value = xml.read_text();
                score.meta_tags.insert(name, value);
            }
            "Part" => {
                if !read_part(score, xml, ctx) {
                    return false;
                }
            }
            "Audio" => {
                // Declares the payload slot; the bytes live in a separate
                // blob attached after structural parsing.
                score.audio = Some(Audio::new());
                xml.skip_current_element();
            }
            "Tracklist" => read_tracklist(xml, ctx),
            _ => xml.unknown(),
        }
    }
    xml.error().is_none()
}

fn read_part(score: &mut Score, xml: &mut XmlStream<'_>, ctx: &mut ReadContext) -> bool {
    let mut part = Part::default();
    while xml.read_next_start_element() {
        match xml.name() {
            "trackName" => part.name = xml.read_text(),
            "Staff" => {
                part.staff_count += 1;
                if !read_staff(score, xml, ctx) {
                    return false;
                }
            }
            _ => xml.unknown(),
        }
    }
    score.parts.push(part);
    true
}

fn read_staff(score: &mut Score, xml: &mut XmlStream<'_>, ctx: &mut ReadContext) -> bool {
    let index = score.staves.len();
    let id = xml.attribute("id").map(str::to_string);
    let link = xml.attribute("link").map(str::to_string);

    // A subordinate staff referencing the master must resolve against the
    // link table inherited from the master context.
    if let Some(link_id) = link {
        if let Err(e) = ctx.resolve(&link_id) {
            xml.raise_custom_error(e.to_string());
            return false;
        }
    }

    if let Some(staff_id) = &id {
        if let Err(e) = ctx.add_link(staff_id.clone(), LinkTarget::Staff(index)) {
            xml.raise_custom_error(e.to_string());
            return false;
        }
    }

    score.staves.push(Staff { id });

    while xml.read_next_start_element() {
        match xml.name() {
            "Measure" => {
                // The measure sequence is shared across staves; the first
                // staff defines it.
                if index == 0 {
                    let number = xml
                        .attribute("number")
                        .and_then(|n| n.parse().ok())
                        .unwrap_or(score.measures.len() as u32 + 1);
                    let ticks = xml
                        .attribute("ticks")
                        .and_then(|t| t.parse().ok())
                        .unwrap_or(DEFAULT_MEASURE_TICKS);
                    score.measures.push(Measure {
                        number,
                        ticks,
                        linked_to: None,
                    });
                }
                // Note-level content is outside the reader's scope.
                xml.skip_current_element();
            }
            _ => xml.unknown(),
        }
    }
    true
}

fn read_tracklist(xml: &mut XmlStream<'_>, ctx: &mut ReadContext) {
    while xml.read_next_start_element() {
        if xml.name() == "track" {
            let src = xml
                .attribute("src")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            let dst = xml
                .attribute("dst")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            ctx.add_track_mapping(src, dst);
            xml.skip_current_element();
        } else {
            xml.unknown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str) -> (Score, ReadContext, bool) {
        let mut score = Score::new();
        let mut ctx = ReadContext::new("test");
        let mut xml = XmlStream::new(data.as_bytes(), "test");
        assert!(xml.read_next_start_element());
        let ok = read_score_content(&mut score, &mut xml, &mut ctx);
        (score, ctx, ok)
    }

    #[test]
    fn parts_staves_and_measures_are_populated() {
        let (score, ctx, ok) = parse(
            r#"<Score>
                 <Division>480</Division>
                 <metaTag name="composer">Anon</metaTag>
                 <Part>
                   <trackName>Flute</trackName>
                   <Staff id="s1">
                     <Measure number="1"/>
                     <Measure number="2"/>
                   </Staff>
                 </Part>
               </Score>"#,
        );

        assert!(ok);
        assert_eq!(score.divisions, 480);
        assert_eq!(score.parts.len(), 1);
        assert_eq!(score.parts[0].name, "Flute");
        assert_eq!(score.staves.len(), 1);
        assert_eq!(score.measures.len(), 2);
        assert_eq!(score.meta_tags["composer"], "Anon");
        assert_eq!(ctx.resolve("s1").unwrap(), LinkTarget::Staff(0));
    }

    #[test]
    fn audio_element_declares_the_payload_slot() {
        let (score, _, ok) = parse("<Score><Audio/></Score>");
        assert!(ok);
        assert!(score.audio.is_some());
        assert!(score.audio.unwrap().is_empty());
    }

    #[test]
    fn tracklist_accumulates_mappings_in_order() {
        let (_, ctx, ok) = parse(
            r#"<Score>
                 <Tracklist>
                   <track src="0" dst="4"/>
                   <track src="1" dst="5"/>
                 </Tracklist>
               </Score>"#,
        );
        assert!(ok);
        assert_eq!(ctx.tracks(), &[(0, 4), (1, 5)]);
    }

    #[test]
    fn unresolved_staff_link_raises_the_custom_error() {
        let mut score = Score::new();
        let mut ctx = ReadContext::new("Part1");
        let data = r#"<Score><Part><Staff link="missing"/></Part></Score>"#;
        let mut xml = XmlStream::new(data.as_bytes(), "Part1");
        assert!(xml.read_next_start_element());

        let ok = read_score_content(&mut score, &mut xml, &mut ctx);
        assert!(!ok);
        assert!(xml.has_custom_error());
    }

    #[test]
    fn unknown_elements_are_counted_not_fatal() {
        let mut score = Score::new();
        let mut ctx = ReadContext::new("test");
        let data = "<Score><futureElement><inner/></futureElement><Division>480</Division></Score>";
        let mut xml = XmlStream::new(data.as_bytes(), "test");
        assert!(xml.read_next_start_element());

        let ok = read_score_content(&mut score, &mut xml, &mut ctx);
        assert!(ok);
        assert_eq!(score.divisions, 480);
        assert_eq!(xml.unknown_count(), 1);
    }
}
