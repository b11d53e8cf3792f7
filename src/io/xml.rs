//! Minimal owned XML element tree.
//!
//! The feed parser works on a fully-built tree rather than a stream of events:
//! the feed is small and the parser needs to look elements up by tag name
//! anywhere beneath a node.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::FeedError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Like `attribute`, but a missing attribute is a feed error.
    pub fn required_attribute(&self, key: &str) -> Result<&str, FeedError> {
        self.attribute(key).ok_or_else(|| FeedError::MissingAttribute {
            element: self.name.clone(),
            attribute: key.to_string(),
        })
    }

    /// Direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// All elements named `name` below this one, in document order.
    pub fn descendants<'a, 'n>(&'a self, name: &'n str) -> Descendants<'a, 'n> {
        Descendants {
            name,
            stack: self.child_elements().collect::<Vec<_>>().into_iter().rev().collect(),
        }
    }

    /// First element named `name` below this one.
    pub fn first_descendant(&self, name: &str) -> Result<&Element, FeedError> {
        self.descendants(name)
            .next()
            .ok_or_else(|| FeedError::MissingElement {
                parent: self.name.clone(),
                element: name.to_string(),
            })
    }

    /// Concatenated text of the direct text children, trimmed.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            if let Node::Text(t) = node {
                out.push_str(t);
            }
        }
        out.trim().to_string()
    }
}

/// Pre-order walk over descendants, filtered by tag name.
pub struct Descendants<'a, 'n> {
    name: &'n str,
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a, '_> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(el) = self.stack.pop() {
            let children: Vec<&Element> = el.child_elements().collect();
            self.stack.extend(children.into_iter().rev());
            if el.name == self.name {
                return Some(el);
            }
        }
        None
    }
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn parse(xml: &str) -> Result<Self, FeedError> {
        let mut reader = Reader::from_str(xml);
        // Open elements; the bottom one collects top-level nodes.
        let mut stack: Vec<Element> = vec![Element::default()];

        loop {
            match reader.read_event()? {
                Event::Start(start) => stack.push(open_element(&start)?),
                Event::Empty(start) => {
                    let el = open_element(&start)?;
                    push_child(&mut stack, Node::Element(el));
                }
                Event::End(end) => {
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    if stack.len() < 2 {
                        return Err(FeedError::UnbalancedTag(name));
                    }
                    let el = stack.pop().ok_or(FeedError::UnbalancedTag(name))?;
                    push_child(&mut stack, Node::Element(el));
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    if !text.trim().is_empty() {
                        push_child(&mut stack, Node::Text(text.into_owned()));
                    }
                }
                Event::CData(data) => {
                    let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    push_child(&mut stack, Node::Text(text));
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctype.
                _ => {}
            }
        }

        if stack.len() != 1 {
            let open = stack.pop().map(|e| e.name).unwrap_or_default();
            return Err(FeedError::Xml(format!("unclosed element <{open}>")));
        }

        // Exactly one root element and nothing else at the top level.
        let top = stack.pop().unwrap_or_default();
        let mut nodes = top.children.into_iter();
        let root = match nodes.next() {
            Some(Node::Element(e)) => e,
            Some(Node::Text(_)) => return Err(junk_outside_root()),
            None => return Err(FeedError::EmptyDocument),
        };
        if nodes.next().is_some() {
            return Err(junk_outside_root());
        }

        Ok(Document { root })
    }

    /// All elements named `name` in the document, root included.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        let root = (self.root.name == name).then_some(&self.root);
        root.into_iter().chain(self.root.descendants(name))
    }
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, FeedError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| FeedError::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn junk_outside_root() -> FeedError {
    FeedError::Xml("junk after document element".to_string())
}

fn push_child(stack: &mut [Element], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}
