//! Rendering behavior per directive kind

use nyan_plate::plate::grammar::{Binding, DIRECTIVES};
use nyan_plate::{extract, render, Context, Value};
use rstest::rstest;

fn labels(values: &[&str]) -> Vec<Context> {
    values
        .iter()
        .map(|value| Context::new().with("label", *value))
        .collect()
}

#[rstest]
#[case("Checked", "checked", Value::Bool(true), true)]
#[case("Checked", "checked", Value::Bool(false), false)]
#[case("Checked", "checked", Value::from("checked"), true)]
#[case("Checked", "checked", Value::from("yes"), false)]
#[case("Selected", "selected", Value::from("selected"), true)]
#[case("Selected", "selected", Value::from("checked"), false)]
#[case("Disabled", "disabled", Value::Bool(true), true)]
#[case("Disabled", "disabled", Value::from(""), false)]
fn test_boolean_truthiness(
    #[case] directive: &str,
    #[case] attribute: &str,
    #[case] value: Value,
    #[case] emitted: bool,
) {
    let context = Context::new().with("k", value);
    let template = format!(r#"<input data-nyan{}="k">"#, directive);
    let expected = if emitted {
        format!(r#"<input {} data-nyanDone{}="k">"#, attribute, directive)
    } else {
        format!(r#"<input data-nyanDone{}="k">"#, directive)
    };
    assert_eq!(render(&context, &template), expected);
}

#[test]
fn test_boolean_without_binding_emits_only_marker() {
    assert_eq!(
        render(&Context::new(), r#"<option data-nyanSelected="pick">A</option>"#),
        r#"<option data-nyanDoneSelected="pick">A</option>"#
    );
}

#[test]
fn test_every_attribute_directive() {
    for directive in DIRECTIVES.iter() {
        let Binding::Attribute(attribute) = directive.binding else {
            continue;
        };
        let context = Context::new().with("k", "v");
        let template = format!(r#"<b {}="k"></b>"#, directive.attribute);
        assert_eq!(
            render(&context, &template),
            format!(r#"<b {}="v" {}="k"></b>"#, attribute, directive.marker),
            "directive {}",
            directive.attribute
        );
        assert_eq!(extract(&render(&context, &template)), context);
    }
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
#[case(7)]
fn test_loop_cardinality(#[case] count: usize) {
    let names: Vec<String> = (0..count).map(|i| format!("item{}", i)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let context = Context::new().with("items", labels(&refs));
    let rendered = render(
        &context,
        r#"<ol data-nyanLoop="items"><li data-nyanString="label">x</li></ol>"#,
    );

    assert_eq!(rendered.matches("<li ").count(), count);
    let positions: Vec<usize> = names
        .iter()
        .map(|name| rendered.find(&format!(">{}<", name)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_missing_key_keeps_literal_content() {
    let template = r#"<p data-nyanString="absent">Keep me</p>"#;
    assert_eq!(
        render(&Context::new(), template),
        r#"<p data-nyanDoneString="absent">Keep me</p>"#
    );
}

#[test]
fn test_list_bound_to_content_falls_back() {
    let context = Context::new().with("items", labels(&["a"]));
    assert_eq!(
        render(&context, r#"<p data-nyanString="items">none</p>"#),
        r#"<p data-nyanDoneString="items">none</p>"#
    );
}

#[test]
fn test_absent_loop_leaves_element_verbatim() {
    let template = r#"<ul data-nyanLoop="items"><li data-nyanString="label">x</li></ul>"#;
    assert_eq!(render(&Context::new(), template), template);
}

#[test]
fn test_scope_with_wrong_shape_is_verbatim() {
    let template = r#"<div data-nyanHtml="owner"><b data-nyanString="name">x</b></div>"#;
    let context = Context::new().with("owner", "flat");
    assert_eq!(render(&context, template), template);
}

#[test]
fn test_directives_are_commutative() {
    let context = Context::new()
        .with("a", "A")
        .with("b", "B")
        .with("c", true);
    let forward = render(
        &context,
        r#"<input data-nyanId="a" data-nyanValue="b" data-nyanChecked="c">"#,
    );
    let backward = render(
        &context,
        r#"<input data-nyanChecked="c" data-nyanValue="b" data-nyanId="a">"#,
    );
    assert_eq!(extract(&forward), extract(&backward));
    assert_eq!(extract(&forward), context);
}

#[test]
fn test_loop_render_snapshot() {
    let context = Context::new()
        .with("kind", "menu")
        .with("rows", labels(&["Tea", "Cake"]));
    let rendered = render(
        &context,
        r#"<ul data-nyanClass="kind" data-nyanLoop="rows"><li data-nyanString="label">?</li></ul>"#,
    );
    insta::assert_snapshot!(rendered, @r#"<ul class="menu" data-nyanDoneClass="kind" data-nyanDoneLoop="rows"><li data-nyanDoneString="label">Tea</li><li data-nyanDoneString="label">Cake</li></ul>"#);
}

#[test]
fn test_nested_loops_two_levels() {
    let context = Context::new().with(
        "groups",
        vec![
            Context::new().with("rows", labels(&["a", "b"])),
            Context::new().with("rows", labels(&["c"])),
        ],
    );
    let template = concat!(
        r#"<div data-nyanLoop="groups"><ul data-nyanLoop="rows">"#,
        r#"<li data-nyanString="label"></li></ul></div>"#
    );
    let rendered = render(&context, template);
    assert_eq!(rendered.matches("<ul ").count(), 2);
    assert_eq!(extract(&rendered), context);
}
