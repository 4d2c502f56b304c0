//! JSON views of the parse tree and the token stream

use crate::plate::lexing::tokenize_with_spans;
use crate::plate::parsing::Element;
use serde::Serialize;

/// One token of the markup stream, as shown by [to_token_json]
#[derive(Debug, Clone, Serialize)]
pub struct TokenRecord<'s> {
    pub token: &'static str,
    pub start: usize,
    pub end: usize,
    pub text: &'s str,
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// The children of the parse tree root as JSON
pub fn to_tree_json(root: &Element, pretty: bool) -> Result<String, serde_json::Error> {
    to_json(&root.children, pretty)
}

/// The token stream of `source` as JSON
pub fn to_token_json(source: &str, pretty: bool) -> Result<String, serde_json::Error> {
    let records: Vec<TokenRecord> = tokenize_with_spans(source)
        .into_iter()
        .map(|(token, span)| TokenRecord {
            token: token.name(),
            start: span.start,
            end: span.end,
            text: &source[span],
        })
        .collect();
    to_json(&records, pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::parsing::parse;
    use serde_json::json;

    #[test]
    fn test_tree_json() {
        let root = parse(r#"<input checked name="a"><p>t</p>"#);
        let value: serde_json::Value =
            serde_json::from_str(&to_tree_json(&root, false).unwrap()).unwrap();
        assert_eq!(
            value,
            json!([
                {"element": {"tag": "input", "attributes": {"checked": true, "name": "a"}, "children": []}},
                {"element": {"tag": "p", "attributes": {}, "children": [{"text": "t"}]}}
            ])
        );
    }

    #[test]
    fn test_token_json() {
        let value: serde_json::Value =
            serde_json::from_str(&to_token_json("<b>x</b>", true).unwrap()).unwrap();
        assert_eq!(
            value,
            json!([
                {"token": "OpenTag", "start": 0, "end": 3, "text": "<b>"},
                {"token": "Text", "start": 3, "end": 4, "text": "x"},
                {"token": "CloseTag", "start": 4, "end": 8, "text": "</b>"}
            ])
        );
    }
}
