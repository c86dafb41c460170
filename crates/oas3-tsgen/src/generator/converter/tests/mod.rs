
use std::collections::BTreeMap;

use serde_json::{Value, json};

use super::NamedType;
use crate::generator::{
  ast::{Literal, Primitive, ResolvedType},
  model::{Schema, Spec},
};

pub(super) fn spec_with_schemas(schemas: Value) -> Spec {
  Spec::from_value(json!({
    "openapi": "3.0.3",
    "info": { "title": "Test API", "version": "1.0.0" },
    "paths": {},
    "components": { "schemas": schemas }
  }))
  .expect("failed to parse test spec")
}

pub(super) fn schema(value: Value) -> Schema {
  serde_json::from_value(value).expect("failed to parse test schema")
}

/// Checks a JSON value against a synthesized type the way the TypeScript compiler
/// would for a value of that shape.
pub(super) fn conforms(ty: &ResolvedType, value: &Value, definitions: &BTreeMap<String, NamedType>) -> bool {
  match ty {
    ResolvedType::Unknown => true,
    ResolvedType::Primitive(Primitive::String) => value.is_string(),
    ResolvedType::Primitive(Primitive::Number) => value.is_number(),
    ResolvedType::Primitive(Primitive::Boolean) => value.is_boolean(),
    ResolvedType::Literals(literals) => literals.iter().any(|literal| match literal {
      Literal::String(s) => value.as_str() == Some(s),
      Literal::Number(n) => value.as_f64().is_some_and(|v| Some(v) == n.as_f64()),
      Literal::Bool(b) => value.as_bool() == Some(*b),
    }),
    ResolvedType::Array(item) => value
      .as_array()
      .is_some_and(|items| items.iter().all(|v| conforms(item, v, definitions))),
    ResolvedType::Object(object) => {
      let Some(map) = value.as_object() else {
        return false;
      };
      let fields_ok = object.fields.iter().all(|field| match map.get(&field.name) {
        Some(v) => conforms(&field.ty, v, definitions),
        None => !field.required,
      });
      let index = object.index_value_type();
      let extras_ok = map
        .iter()
        .filter(|(key, _)| !object.fields.iter().any(|field| &field.name == *key))
        .all(|(_, v)| index.as_ref().is_none_or(|index| conforms(index, v, definitions)));
      fields_ok && extras_ok
    }
    ResolvedType::Named(name) => definitions
      .get(name)
      .is_some_and(|definition| conforms(&definition.ty, value, definitions)),
    ResolvedType::Nullable(inner) => value.is_null() || conforms(inner, value, definitions),
  }
}
