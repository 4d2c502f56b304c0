//! Attribute and content substitution
//!
//! A directive element's open tag is rewritten by splicing replacements into the attribute
//! spans recorded by the tag scanner. Each directive attribute turns into its done marker,
//! preceded by the literal attribute it drives when there is one. A literal attribute that a
//! directive also drives is dropped, so the rendered tag never carries it twice.

use super::{DirectiveElement, Renderer};
use crate::plate::context::{Context, Value};
use crate::plate::grammar::{is_valid_key, Binding, Directive, DirectiveTable};
use crate::plate::lexing::{Attribute, MarkupToken, OpenTag, Spanned};
use std::ops::Range;
use tracing::debug;

/// A directive attribute with a usable key
#[derive(Debug, Clone, Copy)]
pub struct Site<'a> {
    pub directive: &'a Directive,
    pub attribute: &'a Attribute,
    pub key: &'a str,
}

/// Collect the directive sites of an open tag, in attribute order
///
/// Attributes whose key is not a plain identifier are not sites and stay as written. Only the
/// first container directive on a tag is honored; later ones stay as written too, and so does
/// a content directive sharing the tag with a container.
pub fn collect_sites<'a>(table: &'a DirectiveTable, tag: &'a OpenTag) -> Vec<Site<'a>> {
    let mut sites = Vec::new();
    let mut has_container = false;

    for attribute in &tag.attributes {
        let Some(directive) = table.by_attribute(&attribute.name) else {
            continue;
        };
        let Some(key) = attribute.value.as_deref().filter(|key| is_valid_key(key)) else {
            debug!(attribute = %attribute.name, tag = %tag.name, "directive without a usable key");
            continue;
        };
        if directive.binding.is_container() {
            if has_container {
                debug!(attribute = %attribute.name, tag = %tag.name, "second container directive ignored");
                continue;
            }
            has_container = true;
        }
        sites.push(Site {
            directive,
            attribute,
            key,
        });
    }

    // a container's body is its items, so content on it stays as written
    if has_container {
        sites.retain(|site| {
            let keep = site.directive.binding != Binding::Content;
            if !keep {
                debug!(tag = %tag.name, key = site.key, "content directive on a container left as written");
            }
            keep
        });
    }

    sites
}

/// The text replacing one directive attribute
fn replacement(context: &Context, site: &Site) -> String {
    let marker = site.directive.marker_for(site.key);
    let bound = context.get(site.key);

    match site.directive.binding {
        Binding::Content | Binding::Loop | Binding::Scope => marker,
        Binding::Attribute(name) => {
            let value = bound.and_then(Value::as_text).unwrap_or_default();
            format!("{}=\"{}\" {}", name, value, marker)
        }
        Binding::Boolean(name) => {
            if bound.is_some_and(|value| value.is_truthy_for(name)) {
                format!("{} {}", name, marker)
            } else {
                marker
            }
        }
    }
}

/// Rewrite the open tag of a directive element against `context`
pub(crate) fn rewrite_tag(context: &Context, element: &DirectiveElement) -> String {
    let raw = element.raw;
    let mut edits: Vec<(Range<usize>, String)> = element
        .sites
        .iter()
        .map(|site| (site.attribute.span.clone(), replacement(context, site)))
        .collect();

    let driven: Vec<&str> = element
        .sites
        .iter()
        .filter_map(|site| site.directive.binding.target_attribute())
        .collect();
    for attribute in &element.tag.attributes {
        if driven
            .iter()
            .any(|name| attribute.name.eq_ignore_ascii_case(name))
        {
            // take the whitespace in front along with it
            let start = raw[..attribute.span.start].trim_end().len();
            edits.push((start..attribute.span.end, String::new()));
        }
    }
    edits.sort_by_key(|(range, _)| range.start);

    let mut out = String::with_capacity(raw.len() + 32);
    let mut cursor = 0;
    for (range, text) in edits {
        if range.start < cursor {
            continue;
        }
        out.push_str(&raw[cursor..range.start]);
        out.push_str(&text);
        cursor = range.end;
    }
    out.push_str(&raw[cursor..]);
    out
}

/// Text of a comment that is the only non-blank content of a body
fn lone_comment<'s>(source: &'s str, body: &[Spanned]) -> Option<&'s str> {
    let mut comment = None;

    for (token, span) in body {
        let raw = &source[span.clone()];
        match token {
            MarkupToken::Text if raw.trim().is_empty() => {}
            MarkupToken::Comment if comment.is_none() => comment = Some(raw),
            _ => return None,
        }
    }

    comment.map(|raw| {
        let inner = raw.strip_prefix("<!--").unwrap_or(raw);
        inner.strip_suffix("-->").unwrap_or(inner).trim()
    })
}

impl<'t> Renderer<'t> {
    /// Rewrite a non-container directive element; returns the index of the next token
    pub(crate) fn substitute_element(
        &self,
        context: &Context,
        source: &str,
        tokens: &[Spanned],
        element: &DirectiveElement,
        out: &mut String,
    ) -> usize {
        out.push_str(&rewrite_tag(context, element));

        let content = element
            .sites
            .iter()
            .find(|site| site.directive.binding == Binding::Content);
        let (site, close) = match (content, element.close) {
            (Some(site), Some(close)) => (site, close),
            // attribute-only element; its body is walked as ordinary tokens
            _ => return element.index + 1,
        };

        let body = &tokens[element.index + 1..close];
        match context.get(site.key).and_then(Value::as_text) {
            Some(text) => out.push_str(&text),
            None => {
                debug!(key = site.key, "content binding missing, keeping literal content");
                match lone_comment(source, body) {
                    Some(placeholder) => out.push_str(placeholder),
                    None => self.render_tokens(context, source, body, out),
                }
            }
        }

        out.push_str(&source[tokens[close].1.clone()]);
        close + 1
    }
}
