//! Single-endpoint documents synthesized from a sample request URL.
//!
//! `https://tiles.example.com/v1/{layer}/tile.png?key=[token]&zoom=3` describes one
//! `GET` operation: brace-wrapped path segments are path parameters, query values are
//! sample literals from which parameter types are inferred, and bracketed values such
//! as `[token]` are placeholders for required parameters.

use itertools::Itertools;
use serde_json::{Map, Value, json};
use url::Url;

use crate::generator::{ast::PATH_PLACEHOLDER_RE, errors::GenerateError, model::Spec};

const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];

/// Whether the input should be treated as a request URL rather than a file path.
#[must_use]
pub fn is_spec_url(input: &str) -> bool {
  Url::parse(input).is_ok_and(|url| SUPPORTED_SCHEMES.contains(&url.scheme()))
}

pub fn spec_from_url(input: &str) -> Result<Spec, GenerateError> {
  let url = Url::parse(input).map_err(|e| GenerateError::InvalidUrl {
    url: input.to_string(),
    reason: e.to_string(),
  })?;
  if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
    return Err(GenerateError::InvalidUrl {
      url: input.to_string(),
      reason: format!("unsupported scheme '{}'", url.scheme()),
    });
  }

  let host = url.host_str().unwrap_or("api").to_string();
  let path = decode_braces(url.path());

  let mut parameters = PATH_PLACEHOLDER_RE
    .captures_iter(&path)
    .filter_map(|caps| caps.get(1))
    .map(|name| name.as_str())
    .unique()
    .map(|name| json!({ "name": name, "in": "path", "required": true, "schema": { "type": "string" } }))
    .collect::<Vec<_>>();

  parameters.extend(
    url
      .query_pairs()
      .unique_by(|(name, _)| name.to_string())
      .map(|(name, value)| query_parameter(&name, &value)),
  );

  let mut paths = Map::new();
  paths.insert(
    path.clone(),
    json!({
      "get": {
        "summary": format!("GET {path}"),
        "parameters": parameters,
        "responses": {
          "200": {
            "description": "Successful response",
            "content": { "application/json": { "schema": {} } }
          }
        }
      }
    }),
  );

  Spec::from_value(json!({
    "openapi": "3.0.3",
    "info": {
      "title": host,
      "version": "1.0.0",
      "description": format!("Synthesized from {input}")
    },
    "servers": [{ "url": url.origin().ascii_serialization() }],
    "paths": paths
  }))
}

/// Path templates arrive percent-encoded (`%7Blayer%7D`).
fn decode_braces(path: &str) -> String {
  path
    .replace("%7B", "{")
    .replace("%7b", "{")
    .replace("%7D", "}")
    .replace("%7d", "}")
}

fn query_parameter(name: &str, value: &str) -> Value {
  if is_placeholder(value) {
    return json!({ "name": name, "in": "query", "required": true, "schema": { "type": "string" } });
  }
  json!({
    "name": name,
    "in": "query",
    "required": false,
    "schema": { "type": infer_type(value) },
    "description": format!("Sample value: {value}")
  })
}

fn is_placeholder(value: &str) -> bool {
  value.len() > 2 && value.starts_with('[') && value.ends_with(']')
}

/// JSON Schema type name for a sample query literal.
pub(crate) fn infer_type(value: &str) -> &'static str {
  if value == "true" || value == "false" {
    "boolean"
  } else if value.parse::<i64>().is_ok() {
    "integer"
  } else if value.parse::<f64>().is_ok_and(f64::is_finite) {
    "number"
  } else {
    "string"
  }
}
