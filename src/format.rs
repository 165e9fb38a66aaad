//! Output formatting for lookups and merged trees.

use crate::config::ConfigTree;
use serde_json::Value;

/// Output format for values printed by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Scalars bare, sections and sequences as pretty JSON.
    #[default]
    Text,
    Json,
    Yaml,
    Toml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "toml" => Ok(OutputFormat::Toml),
            _ => Err(format!(
                "Invalid format '{}'. Valid options: text, json, yaml, toml",
                s
            )),
        }
    }
}

/// Render a single looked-up value.
///
/// TOML cannot represent a bare scalar, so non-table values fall back to
/// their JSON text in that format.
pub fn format_value(value: &Value, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match (format, value) {
        (OutputFormat::Text, Value::String(s)) => s.clone(),
        (OutputFormat::Text, Value::Null) => "null".to_string(),
        (OutputFormat::Text, Value::Bool(_) | Value::Number(_)) => value.to_string(),
        (OutputFormat::Text | OutputFormat::Json, _) => serde_json::to_string_pretty(value)?,
        (OutputFormat::Yaml, _) => serde_yaml::to_string(value)?.trim_end().to_string(),
        (OutputFormat::Toml, Value::Object(map)) => to_toml(map)?,
        (OutputFormat::Toml, _) => value.to_string(),
    };
    Ok(rendered)
}

/// Render a whole merged tree.
pub fn format_tree(tree: &ConfigTree, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text | OutputFormat::Json => Ok(serde_json::to_string_pretty(tree)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(tree)?.trim_end().to_string()),
        OutputFormat::Toml => to_toml(tree),
    }
}

/// TOML has no null; a tree holding one fails with the key that carries it.
fn to_toml(tree: &ConfigTree) -> anyhow::Result<String> {
    if let Some(path) = find_null(tree, "") {
        anyhow::bail!("TOML cannot represent the null value at '{}'", path);
    }
    Ok(toml::to_string_pretty(tree)?.trim_end().to_string())
}

fn find_null(tree: &ConfigTree, prefix: &str) -> Option<String> {
    tree.iter()
        .find_map(|(key, value)| null_in(value, join_path(prefix, key)))
}

fn null_in(value: &Value, path: String) -> Option<String> {
    match value {
        Value::Null => Some(path),
        Value::Object(map) => find_null(map, &path),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, item)| null_in(item, format!("{}[{}]", path, i))),
        _ => None,
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse(), Ok(OutputFormat::Json));
        assert_eq!("yml".parse(), Ok(OutputFormat::Yaml));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_text_scalars_are_bare() {
        assert_eq!(format_value(&json!("development"), OutputFormat::Text).unwrap(), "development");
        assert_eq!(format_value(&json!(3306), OutputFormat::Text).unwrap(), "3306");
        assert_eq!(format_value(&json!(true), OutputFormat::Text).unwrap(), "true");
        assert_eq!(format_value(&json!(""), OutputFormat::Text).unwrap(), "");
    }

    #[test]
    fn test_json_strings_are_quoted() {
        assert_eq!(format_value(&json!("mysql"), OutputFormat::Json).unwrap(), "\"mysql\"");
    }

    #[test]
    fn test_section_as_yaml() {
        let value = json!({"host": "mysql", "port": 3306});
        assert_eq!(
            format_value(&value, OutputFormat::Yaml).unwrap(),
            "host: mysql\nport: 3306"
        );
    }

    #[test]
    fn test_tree_as_toml() {
        let tree = match json!({"environment": "development", "database": {"port": 3306}}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let rendered = format_tree(&tree, OutputFormat::Toml).unwrap();
        assert!(rendered.contains("environment = \"development\""));
        assert!(rendered.contains("[database]"));
        assert!(rendered.contains("port = 3306"));
    }

    #[test]
    fn test_toml_rejects_null_with_key() {
        let tree = match json!({"a": null, "b": 1}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let err = format_tree(&tree, OutputFormat::Toml).unwrap_err();
        assert_eq!(err.to_string(), "TOML cannot represent the null value at 'a'");

        let section = json!({"pool": {"sizes": [1, null]}});
        let err = format_value(&section, OutputFormat::Toml).unwrap_err();
        assert!(err.to_string().contains("'pool.sizes[1]'"));

        // the other formats still render null
        assert!(format_tree(&tree, OutputFormat::Yaml).unwrap().contains("a: null"));
    }
}
