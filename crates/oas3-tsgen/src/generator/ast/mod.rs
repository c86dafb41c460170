mod client;
pub(crate) mod types;

use std::sync::LazyLock;

use indexmap::IndexMap;
use itertools::Itertools;
use regex::Regex;
use serde::Serialize;

pub use client::{ClientBody, ClientOperation, ClientParam};
pub use types::{Field, Literal, ObjectType, Primitive, ResolvedType};

use super::model::{HttpMethod, Parameter, ParameterLocation, RequestBody, Response};

pub(crate) static PATH_PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}/]+)\}").unwrap());

/// One `(method, path)` operation, normalized and read-only once extracted.
#[derive(Debug, Clone, PartialEq, Serialize, bon::Builder)]
pub struct Endpoint {
  pub method: HttpMethod,
  #[builder(into)]
  pub path: String,
  /// Declared `operationId`, or one generated from the method and path.
  #[builder(into)]
  pub operation_id: String,
  #[builder(into)]
  pub summary: Option<String>,
  #[builder(into)]
  pub description: Option<String>,
  /// Path-level parameters merged with operation-level ones.
  #[builder(default)]
  pub parameters: Vec<Parameter>,
  pub request_body: Option<RequestBody>,
  #[builder(default)]
  pub responses: IndexMap<String, Response>,
  #[builder(default)]
  pub tags: Vec<String>,
  #[builder(default)]
  pub deprecated: bool,
}

impl Endpoint {
  /// Human-readable identity used in diagnostics, e.g. `GET /pets (listPets)`.
  #[must_use]
  pub fn label(&self) -> String {
    format!("{} {} ({})", self.method, self.path, self.operation_id)
  }

  pub fn parameters_in(&self, location: ParameterLocation) -> impl Iterator<Item = &Parameter> {
    self.parameters.iter().filter(move |param| param.location == location)
  }

  /// Placeholder names of the path template in order, e.g. `["petId"]` for `/pets/{petId}`.
  #[must_use]
  pub fn path_placeholders(&self) -> Vec<&str> {
    PATH_PLACEHOLDER_RE
      .captures_iter(&self.path)
      .filter_map(|caps| caps.get(1))
      .map(|m| m.as_str())
      .unique()
      .collect()
  }
}
