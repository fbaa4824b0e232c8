//! XML to JSON-value conversion for XML-speaking providers.
//!
//! Shape of the result:
//! - the document becomes `{ "<root>": <element> }`
//! - an element with neither attributes nor children is its text (a string)
//! - otherwise it is an object; attributes are stored as `"@name"`,
//!   children under their local name, non-blank text as `"#text"`
//! - repeated sibling elements collapse into an array
//!
//! Namespace prefixes are dropped (`<meta:title>` becomes `title`).

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use super::FetchError;

struct Frame {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, FetchError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut fields = Map::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| FetchError::Malformed(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            if attr.key.as_ref().starts_with(b"xmlns") {
                continue;
            }
            let value = attr
                .unescape_value()
                .map_err(|e| FetchError::Malformed(e.to_string()))?;
            fields.insert(format!("@{}", key), Value::String(value.into_owned()));
        }

        Ok(Self {
            name,
            fields,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let value = if self.fields.is_empty() {
            Value::String(self.text)
        } else {
            let mut fields = self.fields;
            if !self.text.is_empty() {
                fields.insert("#text".to_string(), Value::String(self.text));
            }
            Value::Object(fields)
        };
        (self.name, value)
    }

    fn add_child(&mut self, name: String, value: Value) {
        match self.fields.get_mut(&name) {
            None => {
                self.fields.insert(name, value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
}

/// Parse an XML document into a JSON value.
pub fn to_value(xml: &str) -> Result<Value, FetchError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        match event {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let (name, value) = Frame::open(&start)?.close();
                attach(&mut stack, &mut root, name, value);
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    let text = text
                        .unescape()
                        .map_err(|e| FetchError::Malformed(e.to_string()))?;
                    frame.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| FetchError::Malformed("unbalanced end tag".to_string()))?;
                let (name, value) = frame.close();
                attach(&mut stack, &mut root, name, value);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(FetchError::Malformed("unexpected end of document".to_string()));
    }

    let (name, value) =
        root.ok_or_else(|| FetchError::Malformed("document has no root element".to_string()))?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

fn attach(
    stack: &mut [Frame],
    root: &mut Option<(String, Value)>,
    name: String,
    value: Value,
) {
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None => *root = Some((name, value)),
    }
}
