//! Renderer
//!
//!     Rendering is a single left-to-right walk over the token stream of the template.
//!     Tokens are copied to the output through their source spans until an open tag carrying
//!     one or more directive attributes shows up. That element is handled in one of two ways:
//!
//!         1. Container elements (a loop or scope directive) are expanded by
//!            [expansion]: the body tokens between the open tag and its matching close tag
//!            are rendered again, once per list item or once against the nested record.
//!            This is the only place the binding context changes.
//!
//!         2. Everything else goes through [substitution]: the open tag is rewritten with
//!            attribute values and done markers, and a content directive replaces the body.
//!
//!     Expansion recurses into the same walk with a sub-slice of the token stream, so nested
//!     loops fall out naturally and every item sees only its own record.
//!
//!     Every consumed directive attribute is replaced by its done marker. A directive that
//!     cannot act where it sits is not consumed and stays as written. Once every directive
//!     has been consumed, rendering the output again returns it unchanged.
//!
//! Fallbacks
//!
//!     Rendering has no failure mode. A missing content binding keeps the element's literal
//!     content, a missing attribute binding yields an empty attribute, a false or missing
//!     boolean binding drops the attribute. A container whose value is absent or of the
//!     wrong shape, or that has no matching close tag, is copied verbatim with its directive
//!     still in place. So is a content directive with no closing tag to bound its body, or
//!     one sharing its element with a container.

pub mod expansion;
pub mod substitution;

use super::context::Context;
use super::grammar::{Binding, DirectiveTable, DIRECTIVES, DIRECTIVE_PREFIX};
use super::lexing::{find_matching_close, tokenize_with_spans, MarkupToken, OpenTag, Spanned};
use substitution::{collect_sites, Site};

/// Render `template` against `context` with the standard directive table
pub fn render(context: &Context, template: &str) -> String {
    Renderer::new(&DIRECTIVES).render(context, template)
}

/// Template renderer over a directive table
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'t> {
    table: &'t DirectiveTable,
}

/// An open tag carrying directives, located in the token stream
pub(crate) struct DirectiveElement<'a> {
    /// Index of the open tag token
    pub index: usize,
    /// Index of the matching close tag token, if the element has a body
    pub close: Option<usize>,
    pub raw: &'a str,
    pub tag: &'a OpenTag,
    pub sites: Vec<Site<'a>>,
}

impl<'t> Renderer<'t> {
    pub fn new(table: &'t DirectiveTable) -> Self {
        Renderer { table }
    }

    pub fn render(&self, context: &Context, template: &str) -> String {
        let tokens = tokenize_with_spans(template);
        let mut out = String::with_capacity(template.len());
        self.render_tokens(context, template, &tokens, &mut out);
        out
    }

    /// Render a run of tokens, whose spans index into `source`
    pub(crate) fn render_tokens(
        &self,
        context: &Context,
        source: &str,
        tokens: &[Spanned],
        out: &mut String,
    ) {
        let mut index = 0;

        while index < tokens.len() {
            let (token, span) = &tokens[index];
            let raw = &source[span.clone()];

            if *token != MarkupToken::OpenTag || !raw.contains(DIRECTIVE_PREFIX) {
                out.push_str(raw);
                index += 1;
                continue;
            }

            let tag = OpenTag::parse(raw);
            let mut sites = collect_sites(self.table, &tag);
            let close = if tag.has_body() && !sites.is_empty() {
                find_matching_close(source, tokens, index)
            } else {
                None
            };
            if tag.has_body() && close.is_none() {
                // no body to replace, so a content directive stays live
                sites.retain(|site| site.directive.binding != Binding::Content);
            }
            if sites.is_empty() {
                out.push_str(raw);
                index += 1;
                continue;
            }

            let element = DirectiveElement {
                index,
                close,
                raw,
                tag: &tag,
                sites,
            };

            index = if element.container().is_some() {
                self.expand_container(context, source, tokens, &element, out)
            } else {
                self.substitute_element(context, source, tokens, &element, out)
            };
        }
    }
}

impl<'a> DirectiveElement<'a> {
    /// The loop or scope directive on this element, if any
    pub fn container(&self) -> Option<&Site<'a>> {
        self.sites
            .iter()
            .find(|site| site.directive.binding.is_container())
    }
}
