use super::Driver;
use crate::comparison::{ComparisonFailure, Operand};
use crate::error::NotSerializable;
use crate::xml::XmlDocument;
use quick_xml::events::{BytesDecl, Event};
use quick_xml::{Reader, Writer};
use std::sync::Arc;

/// Writes the actual XML document pretty-printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDriver;

impl XmlDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Driver for XmlDriver {
    fn serialize(&self, failure: &ComparisonFailure) -> Result<String, NotSerializable> {
        match failure.actual() {
            Operand::Xml(doc) => pretty_print(doc),
            Operand::Unencodable(err) => Err(NotSerializable::Encode(Arc::clone(err))),
            other => Err(NotSerializable::Coercion {
                expected: "XML document",
                found: other.kind(),
            }),
        }
    }
}

/// Re-indents `doc` with two spaces, dropping whitespace-only text between
/// elements. An XML declaration is added when the document has none.
fn pretty_print(doc: &XmlDocument) -> Result<String, NotSerializable> {
    let mut reader = Reader::from_str(doc.source());
    let mut events = Vec::new();
    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Eof => break,
            Event::Text(text) if text.iter().all(u8::is_ascii_whitespace) => {}
            event => events.push(event),
        }
    }

    if !matches!(events.first(), Some(Event::Decl(_))) {
        events.insert(0, Event::Decl(BytesDecl::new("1.0", None, None)));
    }

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let mut iter = events.into_iter().peekable();
    while let Some(event) = iter.next() {
        let event = match event {
            Event::Start(start) if matches!(iter.peek(), Some(Event::End(_))) => {
                iter.next();
                Event::Empty(start)
            }
            other => other,
        };
        writer.write_event(event).map_err(xml_error)?;
    }

    let mut out = String::from_utf8(writer.into_inner()).map_err(xml_error)?;
    out.push('\n');
    Ok(out)
}

fn xml_error(err: impl std::fmt::Display) -> NotSerializable {
    NotSerializable::Xml(err.to_string())
}
