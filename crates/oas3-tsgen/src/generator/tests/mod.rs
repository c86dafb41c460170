mod orchestrator;

use serde_json::{Value, json};

use crate::generator::model::Spec;

pub(super) const PETSTORE_JSON: &str = include_str!("../../../fixtures/petstore.json");

pub(super) fn petstore() -> Spec {
  Spec::from_json(PETSTORE_JSON).expect("petstore fixture should parse")
}

/// A document with the given `paths` and `components.schemas`.
pub(super) fn spec(paths: Value, schemas: Value) -> Spec {
  Spec::from_value(json!({
    "openapi": "3.0.3",
    "info": { "title": "Test API", "version": "1.0.0" },
    "paths": paths,
    "components": { "schemas": schemas }
  }))
  .expect("failed to parse test spec")
}

pub(super) fn json_response(schema: Value) -> Value {
  json!({ "description": "ok", "content": { "application/json": { "schema": schema } } })
}
