//! Open tag scanning
//!
//!     An [MarkupToken::OpenTag](super::tokens::MarkupToken) token is the raw text of a tag,
//!     `<input type="checkbox" data-nyanChecked="done">`. [OpenTag::parse] walks it byte by
//!     byte and records every attribute together with its byte range inside the raw text.
//!     The renderer uses those ranges to splice rewritten attributes back into place, so
//!     everything it does not touch (quoting, spacing, attribute order) survives verbatim.
//!
//!     Recognized value forms: `name="..."`, `name='...'`, `name=bare` and valueless `name`.

use std::ops::Range;

/// Elements that never have a closing tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

/// One attribute of an open tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// `None` for valueless attributes such as `checked`
    pub value: Option<String>,
    /// Byte range of the whole attribute within the raw tag
    pub span: Range<usize>,
}

/// A scanned open tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag {
    pub name: String,
    pub attributes: Vec<Attribute>,
    /// Written as `<name ... />`
    pub self_closing: bool,
}

impl OpenTag {
    /// Scan the raw text of an open tag, `<` through `>`
    pub fn parse(raw: &str) -> Self {
        let bytes = raw.as_bytes();
        let end = if raw.ends_with('>') {
            raw.len() - 1
        } else {
            raw.len()
        };

        let mut i = usize::from(bytes.first() == Some(&b'<'));
        let name_start = i;
        while i < end && !bytes[i].is_ascii_whitespace() && bytes[i] != b'/' {
            i += 1;
        }
        let name = raw[name_start..i].to_string();

        let mut attributes = Vec::new();
        let mut self_closing = false;

        while i < end {
            let byte = bytes[i];
            if byte.is_ascii_whitespace() {
                i += 1;
                continue;
            }
            if byte == b'/' {
                if raw[i + 1..end].trim().is_empty() {
                    self_closing = true;
                }
                i += 1;
                continue;
            }

            let start = i;
            while i < end
                && !bytes[i].is_ascii_whitespace()
                && bytes[i] != b'='
                && !(bytes[i] == b'/' && i + 1 == end)
            {
                i += 1;
            }
            if i == start {
                // stray `=`
                i += 1;
                continue;
            }
            let attr_name = raw[start..i].to_string();
            let name_end = i;

            let mut j = i;
            while j < end && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j >= end || bytes[j] != b'=' {
                attributes.push(Attribute {
                    name: attr_name,
                    value: None,
                    span: start..name_end,
                });
                continue;
            }

            j += 1;
            while j < end && bytes[j].is_ascii_whitespace() {
                j += 1;
            }

            let (value, value_end) = if j < end && (bytes[j] == b'"' || bytes[j] == b'\'') {
                let quote = bytes[j];
                let value_start = j + 1;
                let mut k = value_start;
                while k < end && bytes[k] != quote {
                    k += 1;
                }
                let value = raw[value_start..k].to_string();
                (value, (k + 1).min(end))
            } else {
                let value_start = j;
                let mut k = value_start;
                while k < end && !bytes[k].is_ascii_whitespace() {
                    k += 1;
                }
                (raw[value_start..k].to_string(), k)
            };

            attributes.push(Attribute {
                name: attr_name,
                value: Some(value),
                span: start..value_end,
            });
            i = value_end;
        }

        OpenTag {
            name,
            attributes,
            self_closing,
        }
    }

    /// Whether this tag opens an element with content
    pub fn has_body(&self) -> bool {
        !self.self_closing && !is_void(&self.name)
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

/// Name of an open tag without scanning its attributes
pub fn open_tag_name(raw: &str) -> &str {
    let inner = raw.strip_prefix('<').unwrap_or(raw);
    let inner = inner.strip_suffix('>').unwrap_or(inner);
    let end = inner
        .find(|c: char| c.is_ascii_whitespace() || c == '/')
        .unwrap_or(inner.len());
    &inner[..end]
}

/// Name of a close tag, `</name>`
pub fn close_tag_name(raw: &str) -> &str {
    let inner = raw.strip_prefix("</").unwrap_or(raw);
    let inner = inner.strip_suffix('>').unwrap_or(inner).trim();
    let end = inner
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(inner.len());
    &inner[..end]
}

/// Whether an open tag opens an element with content, without scanning its attributes
pub fn opens_body(raw: &str) -> bool {
    let inner = raw.strip_suffix('>').unwrap_or(raw).trim_end();
    !inner.ends_with('/') && !is_void(open_tag_name(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_tag() {
        let tag = OpenTag::parse("<div>");
        assert_eq!(tag.name, "div");
        assert!(tag.attributes.is_empty());
        assert!(tag.has_body());
    }

    #[test]
    fn test_attribute_forms() {
        let raw = r#"<input type="checkbox" name='agree' size=3 checked>"#;
        let tag = OpenTag::parse(raw);
        assert_eq!(tag.name, "input");

        let values: Vec<(&str, Option<&str>)> = tag
            .attributes
            .iter()
            .map(|a| (a.name.as_str(), a.value.as_deref()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("type", Some("checkbox")),
                ("name", Some("agree")),
                ("size", Some("3")),
                ("checked", None),
            ]
        );

        let spans: Vec<&str> = tag.attributes.iter().map(|a| &raw[a.span.clone()]).collect();
        assert_eq!(
            spans,
            vec![r#"type="checkbox""#, "name='agree'", "size=3", "checked"]
        );
        assert!(!tag.has_body());
    }

    #[test]
    fn test_self_closing() {
        let tag = OpenTag::parse(r#"<span data-nyanString="x"/>"#);
        assert!(tag.self_closing);
        assert_eq!(tag.attributes.len(), 1);
        assert_eq!(tag.attributes[0].value.as_deref(), Some("x"));

        let spaced = OpenTag::parse("<br />");
        assert!(spaced.self_closing);
        assert!(spaced.attributes.is_empty());
    }

    #[test]
    fn test_spaces_around_equals() {
        let raw = r#"<a href = "/home">"#;
        let tag = OpenTag::parse(raw);
        assert_eq!(tag.attributes[0].value.as_deref(), Some("/home"));
        assert_eq!(&raw[tag.attributes[0].span.clone()], r#"href = "/home""#);
    }

    #[test]
    fn test_value_with_spaces_and_angles() {
        let tag = OpenTag::parse(r#"<p title="a b" class="x">"#);
        assert_eq!(tag.attribute("title").unwrap().value.as_deref(), Some("a b"));
        assert_eq!(tag.attribute("class").unwrap().value.as_deref(), Some("x"));
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(open_tag_name("<li class=\"x\">"), "li");
        assert_eq!(open_tag_name("<br/>"), "br");
        assert_eq!(close_tag_name("</li>"), "li");
        assert_eq!(close_tag_name("</ li >"), "li");
    }

    #[test]
    fn test_opens_body() {
        assert!(opens_body("<ul>"));
        assert!(!opens_body("<img src=\"a.png\">"));
        assert!(!opens_body("<IMG>"));
        assert!(!opens_body("<span />"));
    }
}
