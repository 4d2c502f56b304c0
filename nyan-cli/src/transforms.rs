//! CLI-specific transforms
//!
//! Output formats of `nyanplate extract`, plus reading the context files fed to
//! `nyanplate render`. The context itself is one format; the others expose the
//! intermediate stages of extraction.

use nyan_plate::plate::formats::{to_token_json, to_tree_json, to_treeviz_str};
use nyan_plate::plate::loader::TemplateLoader;
use nyan_plate::Context;
use std::path::Path;

/// All formats `extract` can produce
pub const AVAILABLE_FORMATS: &[&str] = &["json", "yaml", "tree-json", "treeviz", "token-json"];

/// Run the extraction stage selected by `format` over `source`
pub fn execute_format(source: &str, format: &str, pretty: bool) -> Result<String, String> {
    let loader = TemplateLoader::from_string(source);

    match format {
        "json" => {
            let context = loader.extract();
            let json = if pretty {
                serde_json::to_string_pretty(&context)
            } else {
                serde_json::to_string(&context)
            };
            json.map(|text| text + "\n")
                .map_err(|e| format!("JSON serialization failed: {}", e))
        }
        "yaml" => serde_yaml::to_string(&loader.extract())
            .map_err(|e| format!("YAML serialization failed: {}", e)),
        "tree-json" => to_tree_json(&loader.tree(), pretty)
            .map(|text| text + "\n")
            .map_err(|e| format!("JSON serialization failed: {}", e)),
        "treeviz" => Ok(to_treeviz_str(&loader.tree())),
        "token-json" => to_token_json(loader.source_ref(), pretty)
            .map(|text| text + "\n")
            .map_err(|e| format!("JSON serialization failed: {}", e)),
        _ => Err(format!(
            "Unknown format: {} (available: {})",
            format,
            AVAILABLE_FORMATS.join(", ")
        )),
    }
}

/// Parse context data; YAML when `path` says so, JSON otherwise
pub fn parse_context(text: &str, path: &Path) -> Result<Context, String> {
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    let value: serde_json::Value = if is_yaml {
        serde_yaml::from_str(text).map_err(|e| format!("Invalid YAML context: {}", e))?
    } else {
        serde_json::from_str(text).map_err(|e| format!("Invalid JSON context: {}", e))?
    };

    Context::from_json(value).map_err(|e| format!("Invalid context: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str = r#"<p data-nyanDoneString="title">Hi</p>"#;

    #[test]
    fn test_json_format() {
        assert_eq!(
            execute_format(MARKUP, "json", false).unwrap(),
            "{\"title\":\"Hi\"}\n"
        );
    }

    #[test]
    fn test_yaml_format() {
        assert_eq!(execute_format(MARKUP, "yaml", true).unwrap(), "title: Hi\n");
    }

    #[test]
    fn test_treeviz_format() {
        let output = execute_format(MARKUP, "treeviz", true).unwrap();
        assert!(output.contains("Element: p data-nyanDoneString=\"title\""));
    }

    #[test]
    fn test_unknown_format() {
        let err = execute_format(MARKUP, "xml", true).unwrap_err();
        assert!(err.contains("token-json"));
    }

    #[test]
    fn test_parse_context_by_extension() {
        let yaml = parse_context("title: Hi\nitems:\n  - label: a\n", Path::new("c.yaml")).unwrap();
        let json = parse_context(
            r#"{"title": "Hi", "items": [{"label": "a"}]}"#,
            Path::new("c.json"),
        )
        .unwrap();
        assert_eq!(yaml, json);
        assert!(parse_context("[1]", Path::new("c.json")).is_err());
    }
}
