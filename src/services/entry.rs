//! Entry codec: pulls one `<entry>` out of a management API response and
//! writes it back out as the `element` payload of a `set` call.
//!
//! The tree is untyped. Only `summary.rs` looks inside it; the mover copies
//! it verbatim, except that comments and processing instructions are not
//! kept (the config API never returns them inside an `<entry>`).

use crate::domain::models::ObjectType;
use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::Write as _;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, quick_xml::Error> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            children: Vec::new(),
        })
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Direct text content, not including descendants.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// All elements reached by a `/`-separated child path, in document order.
    pub fn find_all<'a>(&'a self, path: &str) -> Vec<&'a Element> {
        let mut current = vec![self];
        for step in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|e| e.elements().filter(move |c| c.name == step))
                .collect();
        }
        current
    }

    pub fn find(&self, path: &str) -> Option<&Element> {
        self.find_all(path).into_iter().next()
    }

    /// Text of the first element at `path`; `None` when absent or empty.
    pub fn find_text(&self, path: &str) -> Option<String> {
        self.find(path).map(Element::text).filter(|t| !t.is_empty())
    }

    /// First descendant (not self) named `name`, depth-first in document order.
    pub fn descendant(&self, name: &str) -> Option<&Element> {
        for child in self.elements() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.descendant(name) {
                return Some(found);
            }
        }
        None
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.children.last_mut() {
            Some(Node::Text(prev)) => prev.push_str(text),
            _ => self.children.push(Node::Text(text.to_string())),
        }
    }

    // Indentation between child elements is layout, not content.
    fn drop_layout_whitespace(&mut self) {
        if self.elements().next().is_some() {
            self.children.retain(|c| match c {
                Node::Text(t) => !t.trim().is_empty(),
                Node::Element(_) => true,
            });
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", key, escape(value.as_str()));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_to(out),
                Node::Text(t) => out.push_str(&partial_escape(t.as_str())),
            }
        }
        let _ = write!(out, "</{}>", self.name);
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

/// Parses a whole document into its root element. Any syntax error,
/// unbalanced tag or second root yields `None`.
pub fn parse_document(raw: &str) -> Option<Element> {
    let mut reader = Reader::from_str(raw);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(Element::from_start(&start).ok()?),
            Ok(Event::Empty(start)) => {
                let element = Element::from_start(&start).ok()?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let mut element = stack.pop()?;
                element.drop_layout_whitespace();
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(text)) => {
                if let Some(parent) = stack.last_mut() {
                    parent.push_text(&text.unescape().ok()?);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(parent) = stack.last_mut() {
                    parent.push_text(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
            Err(_) => return None,
        }
    }

    if !stack.is_empty() {
        return None;
    }
    root
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Option<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return None,
    }
    Some(())
}

/// One configuration object, tagged with its type, carrying the raw subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    Address(Element),
    AddressGroup(Element),
    Service(Element),
    ServiceGroup(Element),
}

impl Entry {
    pub fn new(object_type: ObjectType, element: Element) -> Self {
        match object_type {
            ObjectType::Address => Entry::Address(element),
            ObjectType::AddressGroup => Entry::AddressGroup(element),
            ObjectType::Service => Entry::Service(element),
            ObjectType::ServiceGroup => Entry::ServiceGroup(element),
        }
    }

    pub fn element(&self) -> &Element {
        match self {
            Entry::Address(e)
            | Entry::AddressGroup(e)
            | Entry::Service(e)
            | Entry::ServiceGroup(e) => e,
        }
    }
}

/// Extracts the first `<entry>` below the response root. A malformed body is
/// treated the same as a well-formed body without a match.
pub fn decode(object_type: ObjectType, raw: &str) -> Option<Entry> {
    let root = parse_document(raw)?;
    root.descendant("entry")
        .cloned()
        .map(|element| Entry::new(object_type, element))
}

pub fn encode(entry: &Entry) -> String {
    entry.element().to_xml()
}
