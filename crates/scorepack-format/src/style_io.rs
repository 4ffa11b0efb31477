//! Style and chord-list blob parsing
//!
//! Both blobs are applied in place over whatever the document already holds
//! (defaults for a seeded document, nothing for a fresh one). A malformed
//! blob applies as far as it parses and is reported through logging; blob
//! application is not a load-failure path.

use crate::xml::XmlStream;
use scorepack_model::{ChordDescription, ChordList, Style, StyleValue};
use tracing::warn;

/// Apply a style blob to `style`. Empty blobs are a no-op.
pub fn apply_style(style: &mut Style, data: &[u8], doc_name: &str) {
    if data.is_empty() {
        return;
    }
    let mut xml = XmlStream::new(data, doc_name);
    while xml.read_next_start_element() {
        if xml.name() == "Style" {
            read_style_entries(style, &mut xml);
        } else {
            // Wrapper root; the style table is one of its children.
            while xml.read_next_start_element() {
                if xml.name() == "Style" {
                    read_style_entries(style, &mut xml);
                } else {
                    xml.unknown();
                }
            }
        }
    }
    if let Some(e) = xml.error() {
        warn!(doc = doc_name, error = %e.message(), "style blob only partially applied");
    }
}

fn read_style_entries(style: &mut Style, xml: &mut XmlStream<'_>) {
    while xml.read_next_start_element() {
        let key = xml.name().to_string();
        let text = xml.read_text();
        style.set(key, parse_value(&text));
    }
}

fn parse_value(text: &str) -> StyleValue {
    match text {
        "true" => StyleValue::Bool(true),
        "false" => StyleValue::Bool(false),
        _ => text
            .parse::<f64>()
            .map(StyleValue::Number)
            .unwrap_or_else(|_| StyleValue::Text(text.to_string())),
    }
}

/// Apply a chord-list blob to `list`. Empty blobs are a no-op.
pub fn apply_chord_list(list: &mut ChordList, data: &[u8], doc_name: &str) {
    if data.is_empty() {
        return;
    }
    let mut xml = XmlStream::new(data, doc_name);
    while xml.read_next_start_element() {
        if xml.name() == "ChordList" {
            read_chord_entries(list, &mut xml);
        } else {
            while xml.read_next_start_element() {
                if xml.name() == "ChordList" {
                    read_chord_entries(list, &mut xml);
                } else {
                    xml.unknown();
                }
            }
        }
    }
    if let Some(e) = xml.error() {
        warn!(doc = doc_name, error = %e.message(), "chord-list blob only partially applied");
    }
}

fn read_chord_entries(list: &mut ChordList, xml: &mut XmlStream<'_>) {
    while xml.read_next_start_element() {
        if xml.name() == "chord" {
            let id = xml.attribute("id").unwrap_or_default().to_string();
            let mut name = String::new();
            while xml.read_next_start_element() {
                if xml.name() == "name" {
                    name = xml.read_text();
                } else {
                    xml.unknown();
                }
            }
            if !id.is_empty() {
                list.insert(ChordDescription { id, name });
            }
        } else {
            xml.unknown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_blob_overrides_in_place() {
        let mut style = Style::new();
        style.reset_to_defaults();

        let data = br#"<scoreStyle version="4.10">
                         <Style>
                           <spatium>2.5</spatium>
                           <concertPitch>true</concertPitch>
                           <musicalSymbolFont>Bravura</musicalSymbolFont>
                         </Style>
                       </scoreStyle>"#;
        apply_style(&mut style, data, "test");

        assert_eq!(style.get("spatium"), Some(&StyleValue::Number(2.5)));
        assert_eq!(style.get("concertPitch"), Some(&StyleValue::Bool(true)));
        assert_eq!(
            style.get("musicalSymbolFont"),
            Some(&StyleValue::Text("Bravura".into()))
        );
        assert!(!style.is_default());
    }

    #[test]
    fn empty_style_blob_is_a_no_op() {
        let mut style = Style::new();
        style.reset_to_defaults();
        apply_style(&mut style, b"", "test");
        assert!(style.is_default());
    }

    #[test]
    fn bare_style_root_is_accepted() {
        let mut style = Style::new();
        apply_style(&mut style, b"<Style><spatium>3.0</spatium></Style>", "test");
        assert_eq!(style.get("spatium"), Some(&StyleValue::Number(3.0)));
    }

    #[test]
    fn chord_list_blob_populates_descriptions() {
        let mut list = ChordList::new();
        let data = br#"<ChordList>
                         <chord id="major-ninth"><name>maj9</name></chord>
                         <chord id="minor-sixth"><name>m6</name></chord>
                       </ChordList>"#;
        apply_chord_list(&mut list, data, "test");

        assert_eq!(list.len(), 2);
        assert_eq!(list.get("major-ninth").map(|c| c.name.as_str()), Some("maj9"));
    }
}
