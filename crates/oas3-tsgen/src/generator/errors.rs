use strum::Display;
use thiserror::Error;

/// Failures that stop a generation run.
///
/// Incomplete schemas never end up here; they degrade to `unknown` and surface as a
/// [`GenerationWarning`] instead.
#[derive(Debug, Error)]
pub enum GenerateError {
  #[error("invalid OpenAPI JSON document: {0}")]
  Json(#[from] serde_json::Error),
  #[error("invalid OpenAPI YAML document: {0}")]
  Yaml(#[from] serde_yaml::Error),
  #[error("OpenAPI document has no `paths` object")]
  MissingPaths,
  #[error("invalid spec URL '{url}': {reason}")]
  InvalidUrl { url: String, reason: String },
  #[error("operations {first} and {second} both map to method name `{method_name}`; rename one operationId")]
  MethodNameCollision {
    method_name: String,
    first: String,
    second: String,
  },
  #[error("operation {operation} maps to method name `{method_name}`, which the client class reserves; rename its operationId")]
  ReservedMethodName { method_name: String, operation: String },
}

/// Non-fatal findings collected while generating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "unresolved schema reference '{reference}', typed as unknown")]
  UnresolvedSchema { reference: String },
  #[strum(to_string = "malformed schema {schema}, typed as unknown")]
  MalformedSchema { schema: String },
  #[strum(to_string = "unresolved {kind} reference '{reference}' in {operation}")]
  UnresolvedComponent {
    kind: String,
    reference: String,
    operation: String,
  },
  #[strum(to_string = "cookie parameter '{name}' of {operation} is not exposed on the client")]
  SkippedCookieParameter { name: String, operation: String },
  #[strum(to_string = "path parameter '{name}' of {operation} is not declared, typed as string")]
  UndeclaredPathParameter { name: String, operation: String },
}

impl GenerationWarning {
  /// Whether the warning means part of the input was dropped from the output.
  #[must_use]
  pub fn is_skipped_item(&self) -> bool {
    matches!(self, Self::SkippedCookieParameter { .. } | Self::UnresolvedComponent { .. })
  }
}
