//! Treeviz formatter for parse trees

use crate::plate::parsing::{AttributeValue, Element, Node};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn element_label(element: &Element) -> String {
    let mut label = element.tag.clone();
    for (name, value) in &element.attributes {
        match value {
            AttributeValue::Text(text) => label.push_str(&format!(" {}=\"{}\"", name, text)),
            AttributeValue::Present => label.push_str(&format!(" {}", name)),
        }
    }
    label
}

pub fn to_treeviz_str(root: &Element) -> String {
    let mut result = String::new();
    append_children(&mut result, &root.children, "");
    result
}

fn append_node(result: &mut String, node: &Node, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };

    match node {
        Node::Text(text) => {
            result.push_str(&format!(
                "{}{} Text: {}\n",
                prefix,
                connector,
                truncate(text.trim(), 30)
            ));
        }
        Node::Element(element) => {
            result.push_str(&format!(
                "{}{} Element: {}\n",
                prefix,
                connector,
                truncate(&element_label(element), 60)
            ));
            let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
            append_children(result, &element.children, &new_prefix);
        }
    }
}

fn append_children(result: &mut String, children: &[Node], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, child, prefix, is_last);
    }
}
