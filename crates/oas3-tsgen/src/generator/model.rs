//! In-memory shape of an OpenAPI 3.0 document.
//!
//! Only the subset the generator consumes is modelled. Maps are [`IndexMap`]s so that
//! iteration follows document order, which keeps regeneration diff-friendly.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use strum::Display;

use super::errors::GenerateError;

/// Root OpenAPI document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spec {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub openapi: Option<String>,
  #[serde(default)]
  pub info: Info,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub servers: Vec<Server>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub paths: Option<IndexMap<String, PathItem>>,
  #[serde(default)]
  pub components: Components,
}

impl Spec {
  pub fn from_json(text: &str) -> Result<Self, GenerateError> {
    serde_json::from_str::<Self>(text)?.validated()
  }

  pub fn from_yaml(text: &str) -> Result<Self, GenerateError> {
    serde_yaml::from_str::<Self>(text)?.validated()
  }

  pub fn from_value(value: serde_json::Value) -> Result<Self, GenerateError> {
    serde_json::from_value::<Self>(value)?.validated()
  }

  fn validated(self) -> Result<Self, GenerateError> {
    if self.paths.is_none() {
      return Err(GenerateError::MissingPaths);
    }
    Ok(self)
  }

  /// Iterates path templates and their items in document order.
  pub fn path_items(&self) -> impl Iterator<Item = (&String, &PathItem)> {
    self.paths.iter().flatten()
  }

  /// The canonical base URL, i.e. the first declared server.
  #[must_use]
  pub fn base_url(&self) -> String {
    self.servers.first().map(|server| server.url.clone()).unwrap_or_default()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub version: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
  pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub schemas: IndexMap<String, Schema>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub parameters: IndexMap<String, Parameter>,
  #[serde(default, rename = "requestBodies", skip_serializing_if = "IndexMap::is_empty")]
  pub request_bodies: IndexMap<String, RequestBody>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub responses: IndexMap<String, Response>,
}

/// HTTP verbs the generator emits methods for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
  Get,
  Post,
  Put,
  Patch,
  Delete,
}

impl HttpMethod {
  pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

  #[must_use]
  pub fn as_lower(self) -> &'static str {
    match self {
      Self::Get => "get",
      Self::Post => "post",
      Self::Put => "put",
      Self::Patch => "patch",
      Self::Delete => "delete",
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub parameters: Vec<ObjectOrReference<Parameter>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub get: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub post: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub put: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub patch: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub delete: Option<Operation>,
}

impl PathItem {
  #[must_use]
  pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
    match method {
      HttpMethod::Get => self.get.as_ref(),
      HttpMethod::Post => self.post.as_ref(),
      HttpMethod::Put => self.put.as_ref(),
      HttpMethod::Patch => self.patch.as_ref(),
      HttpMethod::Delete => self.delete.as_ref(),
    }
  }

  /// Present operations in fixed verb order.
  pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
    HttpMethod::ALL
      .into_iter()
      .filter_map(|method| self.operation(method).map(|operation| (method, operation)))
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
  #[serde(default, rename = "operationId", skip_serializing_if = "Option::is_none")]
  pub operation_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub parameters: Vec<ObjectOrReference<Parameter>>,
  #[serde(default, rename = "requestBody", skip_serializing_if = "Option::is_none")]
  pub request_body: Option<ObjectOrReference<RequestBody>>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub responses: IndexMap<String, ObjectOrReference<Response>>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub tags: Vec<String>,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub deprecated: bool,
}

/// A `$ref` to a reusable component or the component itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectOrReference<T> {
  Ref {
    #[serde(rename = "$ref")]
    ref_path: String,
  },
  Object(T),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
  Path,
  Query,
  Header,
  Cookie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
  pub name: String,
  #[serde(rename = "in")]
  pub location: ParameterLocation,
  #[serde(default)]
  pub required: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub schema: Option<Schema>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl Parameter {
  /// The `(name, in)` pair that identifies a parameter within an operation.
  #[must_use]
  pub fn key(&self) -> (&str, ParameterLocation) {
    (self.name.as_str(), self.location)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
  #[serde(default)]
  pub required: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub content: IndexMap<String, MediaType>,
}

impl RequestBody {
  #[must_use]
  pub fn json_schema(&self) -> Option<&Schema> {
    json_media_schema(&self.content)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub content: IndexMap<String, MediaType>,
}

impl Response {
  #[must_use]
  pub fn json_schema(&self) -> Option<&Schema> {
    json_media_schema(&self.content)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub schema: Option<Schema>,
}

/// Picks `application/json` first, then any other JSON-flavoured media type.
fn json_media_schema(content: &IndexMap<String, MediaType>) -> Option<&Schema> {
  content
    .get("application/json")
    .or_else(|| {
      content
        .iter()
        .find(|(media_type, _)| media_type.contains("json"))
        .map(|(_, media)| media)
    })
    .and_then(|media| media.schema.as_ref())
}

/// A schema node: a named reference, an inline definition, or a node that fits neither.
///
/// `Malformed` keeps the raw node so one broken schema types as `unknown` instead of
/// rejecting the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Schema {
  Reference {
    #[serde(rename = "$ref")]
    ref_path: String,
  },
  Inline(Box<InlineSchema>),
  Malformed(serde_json::Value),
}

impl Default for Schema {
  fn default() -> Self {
    Self::Inline(Box::default())
  }
}

impl Schema {
  #[must_use]
  pub fn reference(ref_path: impl Into<String>) -> Self {
    Self::Reference {
      ref_path: ref_path.into(),
    }
  }

  #[must_use]
  pub fn of_type(schema_type: SchemaType) -> Self {
    Self::Inline(Box::new(InlineSchema {
      schema_type: Some(TypeSet::Single(schema_type)),
      ..Default::default()
    }))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
  String,
  Number,
  Integer,
  Boolean,
  Array,
  Object,
  Null,
  #[serde(other)]
  Unknown,
}

/// `type` as a single name or, 3.1 style, a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
  Single(SchemaType),
  Multiple(Vec<SchemaType>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
  Bool(bool),
  Schema(Schema),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineSchema {
  #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
  pub schema_type: Option<TypeSet>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub format: Option<String>,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub nullable: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub items: Option<Schema>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub properties: IndexMap<String, Schema>,
  #[serde(default, deserialize_with = "required_names", skip_serializing_if = "Vec::is_empty")]
  pub required: Vec<String>,
  #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
  pub enum_values: Vec<serde_json::Value>,
  #[serde(default, rename = "additionalProperties", skip_serializing_if = "Option::is_none")]
  pub additional_properties: Option<AdditionalProperties>,
}

/// Property names of `required`; the per-property boolean form (`required: true`) names
/// nothing and reads as empty.
fn required_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match serde_json::Value::deserialize(deserializer)? {
    serde_json::Value::Array(items) => items
      .into_iter()
      .filter_map(|item| item.as_str().map(str::to_string))
      .collect(),
    _ => vec![],
  })
}

impl InlineSchema {
  /// The effective type, ignoring `null` in a type list.
  #[must_use]
  pub fn primary_type(&self) -> Option<SchemaType> {
    match self.schema_type.as_ref()? {
      TypeSet::Single(schema_type) => Some(*schema_type),
      TypeSet::Multiple(types) => types.iter().copied().find(|t| *t != SchemaType::Null),
    }
  }

  #[must_use]
  pub fn is_nullable(&self) -> bool {
    self.nullable || matches!(&self.schema_type, Some(TypeSet::Multiple(types)) if types.contains(&SchemaType::Null))
  }

  #[must_use]
  pub fn is_required(&self, property: &str) -> bool {
    self.required.iter().any(|name| name == property)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_schema_reference_and_inline_variants() {
    let reference: Schema = serde_json::from_value(json!({ "$ref": "#/components/schemas/Pet" })).unwrap();
    assert_eq!(reference, Schema::reference("#/components/schemas/Pet"));

    let inline: Schema = serde_json::from_value(json!({ "type": "string" })).unwrap();
    assert_eq!(inline, Schema::of_type(SchemaType::String));

    let empty: Schema = serde_json::from_value(json!({})).unwrap();
    assert_eq!(empty, Schema::default());
  }

  #[test]
  fn test_unrecognized_type_is_tolerated() {
    let schema: Schema = serde_json::from_value(json!({ "type": "file" })).unwrap();
    let Schema::Inline(inline) = schema else {
      panic!("expected inline schema");
    };
    assert_eq!(inline.primary_type(), Some(SchemaType::Unknown));
  }

  #[test]
  fn test_boolean_required_on_property_is_ignored() {
    let schema: InlineSchema = serde_json::from_value(json!({
      "type": "object",
      "required": ["id"],
      "properties": {
        "id": { "type": "integer" },
        "name": { "type": "string", "required": true }
      }
    }))
    .unwrap();
    assert!(schema.is_required("id"));
    assert_eq!(schema.properties["name"], Schema::of_type(SchemaType::String));
  }

  #[test]
  fn test_malformed_schema_is_kept_raw() {
    let cases = [
      json!({ "type": "object", "properties": "oops" }),
      json!({ "type": "string", "enum": "a" }),
      json!({ "type": "boolean", "nullable": "yes" }),
      json!("string"),
    ];
    for input in cases {
      let schema: Schema = serde_json::from_value(input.clone()).unwrap();
      assert_eq!(schema, Schema::Malformed(input.clone()), "failed for input {input:?}");
    }
  }

  #[test]
  fn test_type_list_marks_nullable() {
    let schema: InlineSchema = serde_json::from_value(json!({ "type": ["null", "integer"] })).unwrap();
    assert_eq!(schema.primary_type(), Some(SchemaType::Integer));
    assert!(schema.is_nullable());
  }

  #[test]
  fn test_missing_paths_is_rejected() {
    let err = Spec::from_json(r#"{"openapi":"3.0.0","info":{"title":"x","version":"1"}}"#).unwrap_err();
    assert!(matches!(err, GenerateError::MissingPaths));
  }

  #[test]
  fn test_invalid_json_is_rejected() {
    let err = Spec::from_json("{ not json").unwrap_err();
    assert!(matches!(err, GenerateError::Json(_)));
  }

  #[test]
  fn test_path_item_operations_follow_fixed_verb_order() {
    let item: PathItem = serde_json::from_value(json!({
      "delete": { "responses": {} },
      "get": { "responses": {} },
      "post": { "responses": {} }
    }))
    .unwrap();
    let methods = item.operations().map(|(method, _)| method).collect::<Vec<_>>();
    assert_eq!(methods, [HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete]);
  }

  #[test]
  fn test_json_media_schema_prefers_application_json() {
    let response: Response = serde_json::from_value(json!({
      "content": {
        "application/problem+json": { "schema": { "type": "object" } },
        "application/json": { "schema": { "type": "string" } }
      }
    }))
    .unwrap();
    assert_eq!(response.json_schema(), Some(&Schema::of_type(SchemaType::String)));
  }

  #[test]
  fn test_yaml_document_parses() {
    let yaml = "openapi: 3.0.0\ninfo:\n  title: Yaml API\n  version: '1'\npaths:\n  /ping:\n    get:\n      responses: {}\n";
    let spec = Spec::from_yaml(yaml).unwrap();
    assert_eq!(spec.info.title, "Yaml API");
    assert_eq!(spec.path_items().count(), 1);
  }
}
