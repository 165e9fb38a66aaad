//! Format decoders that turn raw bytes into a configuration tree.
//!
//! Any `Fn(&[u8]) -> Result<ConfigTree, DecodeError>` is a decoder, so callers
//! can plug in formats this crate does not know about. [`Format`] covers the
//! built-in JSON, YAML and TOML decoders.

use super::ConfigTree;
use crate::error::DecodeError;
use serde_json::{Number, Value};
use std::path::Path;

/// Decodes raw bytes into a configuration tree.
pub trait Decoder {
    fn decode(&self, bytes: &[u8]) -> Result<ConfigTree, DecodeError>;
}

impl<F> Decoder for F
where
    F: Fn(&[u8]) -> Result<ConfigTree, DecodeError>,
{
    fn decode(&self, bytes: &[u8]) -> Result<ConfigTree, DecodeError> {
        self(bytes)
    }
}

/// Built-in configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            _ => Err(format!(
                "Invalid format '{}'. Valid options: json, yaml, toml",
                s
            )),
        }
    }
}

impl Format {
    /// Detect the format from a source name's extension.
    pub fn from_name(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Decoder for Format {
    fn decode(&self, bytes: &[u8]) -> Result<ConfigTree, DecodeError> {
        match self {
            Format::Json => decode_json(bytes),
            Format::Yaml => decode_yaml(bytes),
            Format::Toml => decode_toml(bytes),
        }
    }
}

/// Decode a JSON document whose top level is an object.
pub fn decode_json(bytes: &[u8]) -> Result<ConfigTree, DecodeError> {
    Ok(serde_json::from_slice::<ConfigTree>(bytes)?)
}

/// Decode a YAML document whose top level is a mapping.
///
/// An empty document decodes to an empty tree. Merge keys (`<<: *anchor`)
/// are resolved before conversion, so they never show up as literal keys.
pub fn decode_yaml(bytes: &[u8]) -> Result<ConfigTree, DecodeError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ConfigTree::new());
    }
    let mut yaml: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
    yaml.apply_merge()?;
    match serde_json::to_value(yaml)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(ConfigTree::new()),
        other => Err(top_level_error(&other)),
    }
}

/// Decode a TOML document.
///
/// Datetimes have no counterpart in the tree and are kept as their RFC 3339 text.
pub fn decode_toml(bytes: &[u8]) -> Result<ConfigTree, DecodeError> {
    let text = std::str::from_utf8(bytes)?;
    let table: toml::Table = text.parse()?;
    Ok(toml_table(table))
}

fn toml_table(table: toml::Table) -> ConfigTree {
    table
        .into_iter()
        .map(|(key, value)| (key, toml_value(value)))
        .collect()
}

fn toml_value(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        // NaN and infinities are not representable in the tree
        toml::Value::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_value).collect()),
        toml::Value::Table(table) => Value::Object(toml_table(table)),
    }
}

fn top_level_error(value: &Value) -> DecodeError {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    };
    format!("expected a mapping at the top level, found {}", kind).into()
}
