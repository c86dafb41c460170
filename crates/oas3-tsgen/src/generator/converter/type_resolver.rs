use itertools::Itertools;

use super::cache::TypeCache;
use crate::{
  generator::{
    ast::{Field, Literal, ObjectType, Primitive, ResolvedType},
    errors::GenerationWarning,
    model::{AdditionalProperties, InlineSchema, Schema, SchemaType},
    schema_registry::SchemaRegistry,
  },
  utils::parse_schema_ref_path,
};

/// Turns schema nodes into [`ResolvedType`]s.
///
/// Named schemas are synthesized at most once per run; the [`TypeCache`] hands out
/// named tokens for every later reference, which is what terminates recursive schemas.
/// Nothing here fails: shapes without a TypeScript rendering degrade to `unknown`.
pub(crate) struct TypeSynthesizer<'r, 'a> {
  registry: &'r SchemaRegistry<'a>,
  cache: TypeCache,
}

impl<'r, 'a> TypeSynthesizer<'r, 'a> {
  #[cfg(test)]
  pub(crate) fn new(registry: &'r SchemaRegistry<'a>) -> Self {
    Self::with_reserved_names(registry, &[])
  }

  /// A synthesizer whose declared type names avoid `reserved`.
  pub(crate) fn with_reserved_names(registry: &'r SchemaRegistry<'a>, reserved: &[&str]) -> Self {
    Self {
      registry,
      cache: TypeCache::with_reserved(reserved.iter().copied(), registry.schema_names()),
    }
  }

  #[cfg(test)]
  pub(crate) fn cache(&self) -> &TypeCache {
    &self.cache
  }

  pub(crate) fn into_cache(self) -> TypeCache {
    self.cache
  }

  pub(crate) fn synthesize(&mut self, schema: &Schema) -> ResolvedType {
    match schema {
      Schema::Reference { ref_path } => self.synthesize_reference(schema, ref_path),
      Schema::Inline(inline) => self.synthesize_inline(inline),
      Schema::Malformed(raw) => {
        self.cache.warn(GenerationWarning::MalformedSchema { schema: raw.to_string() });
        ResolvedType::Unknown
      }
    }
  }

  /// Synthesizes an optional schema position; an absent schema is `unknown`.
  pub(crate) fn synthesize_or_unknown(&mut self, schema: Option<&Schema>) -> ResolvedType {
    schema.map_or(ResolvedType::Unknown, |schema| self.synthesize(schema))
  }

  fn synthesize_reference(&mut self, schema: &Schema, ref_path: &str) -> ResolvedType {
    let Some(schema_name) = parse_schema_ref_path(ref_path) else {
      return self.unresolved(ref_path);
    };

    if let Some(type_name) = self.cache.lookup(&schema_name) {
      return ResolvedType::Named(type_name.to_string());
    }

    let registry = self.registry;
    let definition = registry.resolve(schema);
    if std::ptr::eq(definition, schema) {
      return self.unresolved(ref_path);
    }

    let type_name = self.cache.begin(&schema_name);
    let ty = self.synthesize(definition);
    self.cache.finish(&schema_name, ty, description_of(definition));

    ResolvedType::Named(type_name)
  }

  fn unresolved(&mut self, ref_path: &str) -> ResolvedType {
    self.cache.warn(GenerationWarning::UnresolvedSchema {
      reference: ref_path.to_string(),
    });
    ResolvedType::Unknown
  }

  fn synthesize_inline(&mut self, inline: &InlineSchema) -> ResolvedType {
    let primary = inline.primary_type();

    let base = if !inline.enum_values.is_empty() && !matches!(primary, Some(SchemaType::Array | SchemaType::Object)) {
      enum_literals(&inline.enum_values)
    } else {
      match primary {
        Some(SchemaType::String) => ResolvedType::Primitive(Primitive::String),
        Some(SchemaType::Number | SchemaType::Integer) => ResolvedType::Primitive(Primitive::Number),
        Some(SchemaType::Boolean) => ResolvedType::Primitive(Primitive::Boolean),
        Some(SchemaType::Array) => ResolvedType::array_of(self.synthesize_or_unknown(inline.items.as_ref())),
        Some(SchemaType::Object) => self.synthesize_object(inline),
        Some(SchemaType::Null | SchemaType::Unknown) => ResolvedType::Unknown,
        None if !inline.properties.is_empty() => self.synthesize_object(inline),
        None => ResolvedType::Unknown,
      }
    };

    let nullable = inline.is_nullable() || inline.enum_values.iter().any(serde_json::Value::is_null);
    if nullable {
      ResolvedType::nullable(base)
    } else {
      base
    }
  }

  fn synthesize_object(&mut self, inline: &InlineSchema) -> ResolvedType {
    let fields = inline
      .properties
      .iter()
      .map(|(name, property)| {
        Field::builder()
          .name(name)
          .ty(self.synthesize(property))
          .required(inline.is_required(name))
          .maybe_description(description_of(property))
          .build()
      })
      .collect::<Vec<_>>();

    let additional = match &inline.additional_properties {
      Some(AdditionalProperties::Bool(true)) => Some(Box::new(ResolvedType::Unknown)),
      Some(AdditionalProperties::Schema(schema)) => Some(Box::new(self.synthesize(schema))),
      Some(AdditionalProperties::Bool(false)) | None => None,
    };

    if fields.is_empty() && additional.is_none() {
      return ResolvedType::Object(ObjectType::open_record());
    }

    ResolvedType::Object(ObjectType { fields, additional })
  }
}

/// Literal union of an `enum`, order-preserving and de-duplicated.
fn enum_literals(values: &[serde_json::Value]) -> ResolvedType {
  let literals = values.iter().filter_map(Literal::from_json).unique().collect::<Vec<_>>();
  if literals.is_empty() {
    ResolvedType::Unknown
  } else {
    ResolvedType::Literals(literals)
  }
}

fn description_of(schema: &Schema) -> Option<String> {
  match schema {
    Schema::Inline(inline) => inline.description.clone(),
    Schema::Reference { .. } | Schema::Malformed(_) => None,
  }
}
