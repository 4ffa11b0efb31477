//! Pull reader over a score document blob
//!
//! Mirrors the element-by-element reading discipline the structural parsers
//! are written against: `read_next_start_element` advances to the next start
//! element within the current one and reports false at the enclosing end
//! element, so each parser loops over the children of the element it was
//! handed. Unknown elements are a non-fatal diagnostic channel, not an
//! error; newer documents with an additive vocabulary stay readable.

use quick_xml::Reader;
use quick_xml::events::{BytesEnd, Event};
use tracing::debug;

/// Error state of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The underlying document is not well-formed.
    Parse(String),
    /// A structural parser flagged application-level corruption.
    Custom(String),
}

impl StreamError {
    /// Diagnostic text of the error.
    pub fn message(&self) -> &str {
        match self {
            StreamError::Parse(message) | StreamError::Custom(message) => message,
        }
    }
}

/// Streaming reader over one score document blob.
pub struct XmlStream<'a> {
    reader: Reader<&'a [u8]>,
    doc_name: String,
    current_name: String,
    current_attrs: Vec<(String, String)>,
    // A self-closing element has no end event of its own; one is synthesized
    // so child-iteration loops see it like any other element.
    pending_empty_end: bool,
    depth: usize,
    error: Option<StreamError>,
    unknown_count: usize,
}

impl<'a> XmlStream<'a> {
    /// Create a stream over `data`, carrying `doc_name` for diagnostics.
    pub fn new(data: &'a [u8], doc_name: impl Into<String>) -> Self {
        let mut reader = Reader::from_reader(data);
        reader.trim_text(true);
        Self {
            reader,
            doc_name: doc_name.into(),
            current_name: String::new(),
            current_attrs: Vec::new(),
            pending_empty_end: false,
            depth: 0,
            error: None,
            unknown_count: 0,
        }
    }

    /// Document name carried for diagnostics.
    pub fn doc_name(&self) -> &str {
        &self.doc_name
    }

    /// Advance to the next start element within the current element.
    ///
    /// Returns `false` at the current element's end, at the end of the
    /// document, or once an error has been recorded.
    pub fn read_next_start_element(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }
        if self.pending_empty_end {
            self.pending_empty_end = false;
            self.depth = self.depth.saturating_sub(1);
            return false;
        }
        loop {
            match self.reader.read_event() {
                Ok(Event::Start(start)) => {
                    self.depth += 1;
                    self.capture(&start, false);
                    return true;
                }
                Ok(Event::Empty(start)) => {
                    self.depth += 1;
                    self.capture(&start, true);
                    return true;
                }
                Ok(Event::End(_)) => {
                    self.depth = self.depth.saturating_sub(1);
                    return false;
                }
                Ok(Event::Eof) => {
                    if self.depth > 0 {
                        self.error =
                            Some(StreamError::Parse("premature end of document".to_string()));
                    }
                    return false;
                }
                Ok(_) => {}
                Err(e) => {
                    self.error = Some(StreamError::Parse(e.to_string()));
                    return false;
                }
            }
        }
    }

    fn capture(&mut self, start: &quick_xml::events::BytesStart<'_>, is_empty: bool) {
        self.current_name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        self.pending_empty_end = is_empty;
        self.current_attrs = start
            .attributes()
            .flatten()
            .map(|attr| {
                let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                let value = attr
                    .unescape_value()
                    .map(|v| v.into_owned())
                    .unwrap_or_default();
                (key, value)
            })
            .collect();
    }

    /// Name of the current element.
    pub fn name(&self) -> &str {
        &self.current_name
    }

    /// Attribute of the current element, by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.current_attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Read the text content of the current element, consuming it.
    ///
    /// Nested elements inside the text are skipped wholesale.
    pub fn read_text(&mut self) -> String {
        if self.pending_empty_end {
            self.pending_empty_end = false;
            self.depth = self.depth.saturating_sub(1);
            return String::new();
        }
        let mut text = String::new();
        loop {
            match self.reader.read_event() {
                Ok(Event::Text(t)) => match t.unescape() {
                    Ok(chunk) => text.push_str(&chunk),
                    Err(e) => {
                        self.error = Some(StreamError::Parse(e.to_string()));
                        break;
                    }
                },
                Ok(Event::CData(c)) => {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
                Ok(Event::Start(nested)) => {
                    let name = String::from_utf8_lossy(nested.name().as_ref()).into_owned();
                    let end = BytesEnd::new(name);
                    if let Err(e) = self.reader.read_to_end(end.name()) {
                        self.error = Some(StreamError::Parse(e.to_string()));
                        break;
                    }
                }
                Ok(Event::End(_)) => {
                    self.depth = self.depth.saturating_sub(1);
                    break;
                }
                Ok(Event::Eof) => {
                    self.error = Some(StreamError::Parse("premature end of document".to_string()));
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    self.error = Some(StreamError::Parse(e.to_string()));
                    break;
                }
            }
        }
        text
    }

    /// Read the text content of the current element as a base-10 integer;
    /// unparsable or missing content reads as zero.
    pub fn read_int(&mut self) -> i64 {
        self.read_int_radix(10)
    }

    /// Read the text content of the current element as an integer in the
    /// given radix; unparsable or missing content reads as zero.
    pub fn read_int_radix(&mut self, radix: u32) -> i64 {
        let text = self.read_text();
        i64::from_str_radix(text.trim(), radix).unwrap_or(0)
    }

    /// Skip the current element wholesale, discarding its contents.
    pub fn skip_current_element(&mut self) {
        if self.pending_empty_end {
            self.pending_empty_end = false;
            self.depth = self.depth.saturating_sub(1);
            return;
        }
        let end = BytesEnd::new(self.current_name.clone());
        match self.reader.read_to_end(end.name()) {
            Ok(_) => self.depth = self.depth.saturating_sub(1),
            Err(e) => self.error = Some(StreamError::Parse(e.to_string())),
        }
    }

    /// Report the current element as unknown and skip it. Non-fatal: the
    /// element vocabulary is additive across versions, so an older reader
    /// records the element and moves on.
    pub fn unknown(&mut self) {
        self.unknown_count += 1;
        debug!(
            doc = %self.doc_name,
            element = %self.current_name,
            "unknown element skipped"
        );
        self.skip_current_element();
    }

    /// Number of unknown elements reported so far.
    pub fn unknown_count(&self) -> usize {
        self.unknown_count
    }

    /// Record an application-level corruption error on the stream.
    pub fn raise_custom_error(&mut self, message: impl Into<String>) {
        self.error = Some(StreamError::Custom(message.into()));
    }

    /// Error state of the stream, if any.
    pub fn error(&self) -> Option<&StreamError> {
        self.error.as_ref()
    }

    /// Whether a structural parser flagged application-level corruption.
    pub fn has_custom_error(&self) -> bool {
        matches!(self.error, Some(StreamError::Custom(_)))
    }

    /// Diagnostic text of the recorded error, empty when none.
    pub fn error_text(&self) -> String {
        self.error
            .as_ref()
            .map(|e| e.message().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_children_per_nesting_level() {
        let data = b"<root><a>1</a><b><c/></b></root>";
        let mut xml = XmlStream::new(data, "test");

        assert!(xml.read_next_start_element());
        assert_eq!(xml.name(), "root");

        assert!(xml.read_next_start_element());
        assert_eq!(xml.name(), "a");
        assert_eq!(xml.read_int(), 1);

        assert!(xml.read_next_start_element());
        assert_eq!(xml.name(), "b");
        xml.skip_current_element();

        // End of root's children.
        assert!(!xml.read_next_start_element());
        assert!(xml.error().is_none());
    }

    #[test]
    fn attributes_are_available_until_the_next_element() {
        let data = br#"<root version="4.10"><child id="c1"/></root>"#;
        let mut xml = XmlStream::new(data, "test");

        assert!(xml.read_next_start_element());
        assert_eq!(xml.attribute("version"), Some("4.10"));
        assert_eq!(xml.attribute("missing"), None);

        assert!(xml.read_next_start_element());
        assert_eq!(xml.attribute("id"), Some("c1"));
        xml.skip_current_element();
    }

    #[test]
    fn malformed_document_records_a_parse_error() {
        let data = b"<root><unclosed></root>";
        let mut xml = XmlStream::new(data, "test");

        assert!(xml.read_next_start_element());
        assert!(xml.read_next_start_element());
        xml.skip_current_element();

        assert!(matches!(xml.error(), Some(StreamError::Parse(_))));
        assert!(!xml.error_text().is_empty());
        assert!(!xml.read_next_start_element());
    }

    #[test]
    fn unparsable_int_reads_as_zero() {
        let data = b"<root><n>not-a-number</n><h>ff</h></root>";
        let mut xml = XmlStream::new(data, "test");

        assert!(xml.read_next_start_element());
        assert!(xml.read_next_start_element());
        assert_eq!(xml.read_int(), 0);
        assert!(xml.read_next_start_element());
        assert_eq!(xml.read_int_radix(16), 0xff);
    }

    #[test]
    fn custom_error_is_distinguished_from_parse_error() {
        let mut xml = XmlStream::new(b"<root/>", "test");
        assert!(xml.read_next_start_element());
        xml.raise_custom_error("broken linkage");

        assert!(xml.has_custom_error());
        assert_eq!(xml.error_text(), "broken linkage");
        assert!(!xml.read_next_start_element());
    }
}
