//! Tree parser
//!
//!     Folds the markup token stream into a minimal ordered tree: elements with a tag name,
//!     an attribute map and children, and text nodes. The tree exists only to be read by the
//!     extractor, so anything extraction does not need is dropped on the way in:
//!
//!         - whitespace-only text runs
//!         - comments and declarations
//!         - the distinction between quoted and unquoted attribute values
//!
//!     The parser is a stack machine. Open tags push, close tags pop. Self-closing and void
//!     elements attach directly to the current parent and never push.
//!
//! Structural Recovery
//!
//!     Rendered markup is usually well formed, but the parser never gives up on it when it
//!     is not. The stack follows open-tag order, not tag names: every close tag closes the
//!     innermost open element, whatever name it carries, so a mistyped close tag still ends
//!     the element it stands in for. A close tag with nothing open is skipped. Elements still
//!     open at the end of input are closed in order.

use super::lexing::{close_tag_name, tokenize_with_spans, MarkupToken, OpenTag};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::trace;

/// Value of a parsed attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Text(String),
    /// Written without a value, `<input checked>`
    Present,
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            AttributeValue::Present => None,
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttributeValue::Text(text) => serializer.serialize_str(text),
            AttributeValue::Present => serializer.serialize_bool(true),
        }
    }
}

/// A node of the parse tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element and everything inside it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Tag name as written; empty for the document root
    pub tag: String,
    pub attributes: BTreeMap<String, AttributeValue>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn root() -> Self {
        Element::default()
    }

    fn from_tag(tag: &OpenTag) -> Self {
        let mut attributes = BTreeMap::new();
        for attribute in &tag.attributes {
            let value = match &attribute.value {
                Some(text) => AttributeValue::Text(text.clone()),
                None => AttributeValue::Present,
            };
            // first occurrence wins, as in browsers
            attributes.entry(attribute.name.clone()).or_insert(value);
        }
        Element {
            tag: tag.name.clone(),
            attributes,
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.tag.is_empty()
    }

    pub fn attr(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// All descendant text in document order, trimmed once at the ends
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// Parse markup into a tree under an unnamed root element
pub fn parse(markup: &str) -> Element {
    let tokens = tokenize_with_spans(markup);
    let mut stack: Vec<Element> = vec![Element::root()];
    let mut text = String::new();

    for (token, span) in &tokens {
        let raw = &markup[span.clone()];
        match token {
            MarkupToken::Text | MarkupToken::StrayAngle => text.push_str(raw),
            MarkupToken::Comment | MarkupToken::Declaration => {}
            MarkupToken::OpenTag => {
                flush_text(&mut stack, &mut text);
                let tag = OpenTag::parse(raw);
                let element = Element::from_tag(&tag);
                if tag.has_body() {
                    stack.push(element);
                } else if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Element(element));
                }
            }
            MarkupToken::CloseTag => {
                flush_text(&mut stack, &mut text);
                let name = close_tag_name(raw);
                if stack.len() > 1 {
                    let open = &stack[stack.len() - 1].tag;
                    if !open.eq_ignore_ascii_case(name) {
                        trace!(tag = name, open = %open, offset = span.start, "closing tag does not match, closing innermost element");
                    }
                    close_top(&mut stack);
                } else {
                    trace!(tag = name, offset = span.start, "closing tag at top level skipped");
                }
            }
        }
    }

    flush_text(&mut stack, &mut text);
    while stack.len() > 1 {
        trace!(tag = %stack[stack.len() - 1].tag, "element closed at end of input");
        close_top(&mut stack);
    }

    stack.pop().unwrap_or_else(Element::root)
}

fn flush_text(stack: &mut [Element], text: &mut String) {
    if !text.trim().is_empty() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(Node::Text(text.clone()));
        }
    }
    text.clear();
}

fn close_top(stack: &mut Vec<Element>) {
    if let Some(element) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(Node::Element(element));
        }
    }
}
