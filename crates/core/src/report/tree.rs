//! Generic element tree built from raw XML bytes
//!
//! The report parser never looks at XML events directly; it walks this tree.
//! Keeping the tree format-agnostic means "is this a test report?" and "is
//! this XML at all?" are answered in separate places.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Errors raised when a document is not well-formed XML
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("XML syntax error at byte {position}: {source}")]
    Syntax {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("element <{0}> is never closed")]
    UnclosedElement(String),

    #[error("document has no root element")]
    NoRootElement,

    #[error("element <{0}> follows the root element")]
    TrailingElement(String),
}

/// One XML element with its attributes, child elements, and character data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Concatenated text and CDATA content, whitespace preserved
    pub text: String,
}

impl Element {
    fn from_start(tag: &BytesStart) -> Result<Self, quick_xml::Error> {
        let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in tag.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }

    /// Value of the attribute `key`, if present
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child named `name`
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children named `name`, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// Parse `bytes` into the document's root element.
pub fn parse_tree(bytes: &[u8]) -> Result<Element, XmlError> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| XmlError::Syntax {
                position: reader.buffer_position(),
                source,
            })?;

        match event {
            Event::Start(tag) => {
                let element = Element::from_start(&tag).map_err(|source| XmlError::Syntax {
                    position: reader.buffer_position(),
                    source,
                })?;
                stack.push(element);
            }
            Event::Empty(tag) => {
                let element = Element::from_start(&tag).map_err(|source| XmlError::Syntax {
                    position: reader.buffer_position(),
                    source,
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                // End-name mismatches are rejected by the reader itself
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element)?;
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let text = text.unescape().map_err(|source| XmlError::Syntax {
                        position: reader.buffer_position(),
                        source,
                    })?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::UnclosedElement(open.name));
    }

    root.ok_or(XmlError::NoRootElement)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(XmlError::TrailingElement(element.name)),
        None => *root = Some(element),
    }
    Ok(())
}
