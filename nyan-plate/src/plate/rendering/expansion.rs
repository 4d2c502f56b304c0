//! Loop and scope expansion
//!
//! A container element keeps its own open and close tags; only the body between them is
//! repeated. The open tag is rewritten against the enclosing context, so attribute
//! directives on the loop element itself bind outside the loop, while the body is rendered
//! once per list item (loop) or once against the nested record (scope).

use super::substitution::rewrite_tag;
use super::{DirectiveElement, Renderer};
use crate::plate::context::{Context, Value};
use crate::plate::grammar::Binding;
use crate::plate::lexing::Spanned;
use tracing::debug;

impl<'t> Renderer<'t> {
    /// Expand a container element; returns the index of the next token
    pub(crate) fn expand_container(
        &self,
        context: &Context,
        source: &str,
        tokens: &[Spanned],
        element: &DirectiveElement,
        out: &mut String,
    ) -> usize {
        let Some(site) = element.container() else {
            return self.substitute_element(context, source, tokens, element, out);
        };

        let Some(close) = element.close else {
            debug!(key = site.key, tag = %element.tag.name, "container has no closing tag, left as written");
            out.push_str(element.raw);
            return element.index + 1;
        };

        let body = &tokens[element.index + 1..close];
        let close_raw = &source[tokens[close].1.clone()];

        match (site.directive.binding, context.get(site.key)) {
            (Binding::Loop, Some(Value::List(items))) => {
                out.push_str(&rewrite_tag(context, element));
                for item in items {
                    self.render_tokens(item, source, body, out);
                }
                out.push_str(close_raw);
            }
            (Binding::Scope, Some(Value::Record(record))) => {
                out.push_str(&rewrite_tag(context, element));
                self.render_tokens(record, source, body, out);
                out.push_str(close_raw);
            }
            (binding, value) => {
                let found = value.map(|value| value.kind_name()).unwrap_or("nothing");
                debug!(
                    key = site.key,
                    binding = binding.label(),
                    found,
                    "container left unexpanded"
                );
                let start = tokens[element.index].1.start;
                let end = tokens[close].1.end;
                out.push_str(&source[start..end]);
            }
        }

        close + 1
    }
}

#[cfg(test)]
mod tests {
    use crate::plate::context::Context;
    use crate::plate::rendering::render;

    fn rows(labels: &[&str]) -> Vec<Context> {
        labels
            .iter()
            .map(|label| Context::new().with("label", *label))
            .collect()
    }

    #[test]
    fn test_empty_list_keeps_only_the_shell() {
        let context = Context::new().with("items", Vec::<Context>::new());
        assert_eq!(
            render(&context, r#"<ul data-nyanLoop="items"><li>x</li></ul>"#),
            r#"<ul data-nyanDoneLoop="items"></ul>"#
        );
    }

    #[test]
    fn test_absent_list_leaves_element_verbatim() {
        let template = r#"<ul data-nyanLoop="items"><li data-nyanString="label">x</li></ul><p data-nyanString="t">y</p>"#;
        let context = Context::new().with("t", "T");
        assert_eq!(
            render(&context, template),
            r#"<ul data-nyanLoop="items"><li data-nyanString="label">x</li></ul><p data-nyanDoneString="t">T</p>"#
        );
    }

    #[test]
    fn test_wrong_shape_leaves_element_verbatim() {
        let template = r#"<ul data-nyanLoop="items"><li>x</li></ul>"#;
        let context = Context::new().with("items", "not a list");
        assert_eq!(render(&context, template), template);
    }

    #[test]
    fn test_items_see_only_their_record() {
        let context = Context::new()
            .with("label", "outer")
            .with("items", rows(&["a"]));
        assert_eq!(
            render(
                &context,
                r#"<ul data-nyanLoop="items"><li data-nyanString="label">x</li></ul><b data-nyanString="label">y</b>"#
            ),
            r#"<ul data-nyanDoneLoop="items"><li data-nyanDoneString="label">a</li></ul><b data-nyanDoneString="label">outer</b>"#
        );
    }

    #[test]
    fn test_loop_element_attributes_bind_outside() {
        let context = Context::new()
            .with("theme", "menu")
            .with("items", rows(&["a", "b"]));
        assert_eq!(
            render(
                &context,
                r#"<ul data-nyanClass="theme" data-nyanLoop="items"><li data-nyanString="label"></li></ul>"#
            ),
            concat!(
                r#"<ul class="menu" data-nyanDoneClass="theme" data-nyanDoneLoop="items">"#,
                r#"<li data-nyanDoneString="label">a</li><li data-nyanDoneString="label">b</li></ul>"#
            )
        );
    }

    #[test]
    fn test_nested_loops() {
        let context = Context::new().with(
            "groups",
            vec![
                Context::new().with("name", "g1").with("items", rows(&["a", "b"])),
                Context::new().with("name", "g2").with("items", rows(&["c"])),
            ],
        );
        let template = concat!(
            r#"<div data-nyanLoop="groups"><section><h2 data-nyanString="name"></h2>"#,
            r#"<ul data-nyanLoop="items"><li data-nyanString="label"></li></ul></section></div>"#
        );
        let rendered = render(&context, template);
        assert_eq!(rendered.matches("<section>").count(), 2);
        assert_eq!(rendered.matches("<li ").count(), 3);
        assert!(rendered.contains(r#"<h2 data-nyanDoneString="name">g2</h2>"#));
        assert!(!rendered.contains("data-nyanLoop"));
    }

    #[test]
    fn test_same_name_nesting_inside_loop() {
        let context = Context::new().with("items", rows(&["a", "b"]));
        assert_eq!(
            render(
                &context,
                r#"<div data-nyanLoop="items"><div data-nyanString="label"></div></div>"#
            ),
            r#"<div data-nyanDoneLoop="items"><div data-nyanDoneString="label">a</div><div data-nyanDoneString="label">b</div></div>"#
        );
    }

    #[test]
    fn test_scope_renders_against_record() {
        let context = Context::new()
            .with("title", "outer")
            .with("owner", Context::new().with("title", "inner"));
        assert_eq!(
            render(
                &context,
                r#"<div data-nyanHtml="owner"><span data-nyanString="title"></span></div>"#
            ),
            r#"<div data-nyanDoneHtml="owner"><span data-nyanDoneString="title">inner</span></div>"#
        );
    }

    #[test]
    fn test_content_directive_on_loop_element_stays_live() {
        let context = Context::new().with("t", "T").with("items", rows(&["a"]));
        assert_eq!(
            render(
                &context,
                r#"<ul data-nyanLoop="items" data-nyanString="t"><li data-nyanString="label"></li></ul>"#
            ),
            r#"<ul data-nyanDoneLoop="items" data-nyanString="t"><li data-nyanDoneString="label">a</li></ul>"#
        );
    }

    #[test]
    fn test_content_directive_on_scope_element_stays_live() {
        let context = Context::new()
            .with("t", "T")
            .with("owner", Context::new().with("name", "N"));
        assert_eq!(
            render(
                &context,
                r#"<div data-nyanString="t" data-nyanHtml="owner"><b data-nyanString="name"></b></div>"#
            ),
            r#"<div data-nyanString="t" data-nyanDoneHtml="owner"><b data-nyanDoneString="name">N</b></div>"#
        );
    }

    #[test]
    fn test_unclosed_container_keeps_open_tag() {
        let context = Context::new().with("items", rows(&["a"]));
        assert_eq!(
            render(&context, r#"<ul data-nyanLoop="items"><li>x"#),
            r#"<ul data-nyanLoop="items"><li>x"#
        );
    }
}
