use std::collections::{BTreeMap, BTreeSet};

use crate::generator::{
  ast::ResolvedType,
  errors::GenerationWarning,
  naming::identifiers::{ensure_unique, to_type_name},
};

/// A declared type produced from a named schema.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NamedType {
  /// Emitted TypeScript name.
  pub name: String,
  /// Key under `components.schemas`.
  pub schema_name: String,
  pub description: Option<String>,
  pub ty: ResolvedType,
}

/// Arena of named type definitions for one generation run.
///
/// A schema name is *started* once synthesis of its definition begins. From then on
/// every reference to it resolves to a named token, including references reached
/// while the definition itself is still in flight.
#[derive(Debug, Default)]
pub(crate) struct TypeCache {
  /// schema name -> type name, allocated up front in sorted schema-name order
  names: BTreeMap<String, String>,
  used_names: BTreeSet<String>,
  started: BTreeSet<String>,
  in_flight: BTreeSet<String>,
  /// Finished definitions keyed by type name
  definitions: BTreeMap<String, NamedType>,
  warnings: Vec<GenerationWarning>,
  expansions: usize,
}

impl TypeCache {
  /// Creates a cache with type names reserved for every known schema name.
  #[cfg(test)]
  pub(crate) fn new<'n>(schema_names: impl IntoIterator<Item = &'n String>) -> Self {
    Self::with_reserved([], schema_names)
  }

  /// Like [`TypeCache::new`], with `reserved` identifiers (e.g. the client class) kept
  /// away from every schema.
  pub(crate) fn with_reserved<'n>(
    reserved: impl IntoIterator<Item = &'n str>,
    schema_names: impl IntoIterator<Item = &'n String>,
  ) -> Self {
    let mut cache = Self::default();
    cache.used_names.extend(reserved.into_iter().map(str::to_string));
    let sorted = schema_names.into_iter().collect::<BTreeSet<_>>();
    for schema_name in sorted {
      cache.allocate(schema_name);
    }
    cache
  }

  fn allocate(&mut self, schema_name: &str) -> String {
    if let Some(name) = self.names.get(schema_name) {
      return name.clone();
    }
    let name = ensure_unique(&to_type_name(schema_name), &self.used_names);
    self.used_names.insert(name.clone());
    self.names.insert(schema_name.to_string(), name.clone());
    name
  }

  /// The type name of a schema whose synthesis has started.
  pub(crate) fn lookup(&self, schema_name: &str) -> Option<&str> {
    if self.started.contains(schema_name) {
      self.names.get(schema_name).map(String::as_str)
    } else {
      None
    }
  }

  #[cfg(test)]
  pub(crate) fn is_in_flight(&self, schema_name: &str) -> bool {
    self.in_flight.contains(schema_name)
  }

  /// Marks a schema as in flight and returns its type name.
  pub(crate) fn begin(&mut self, schema_name: &str) -> String {
    let name = self.allocate(schema_name);
    self.started.insert(schema_name.to_string());
    self.in_flight.insert(schema_name.to_string());
    self.expansions += 1;
    name
  }

  /// Stores the finished definition of an in-flight schema.
  pub(crate) fn finish(&mut self, schema_name: &str, ty: ResolvedType, description: Option<String>) {
    self.in_flight.remove(schema_name);
    let name = self.allocate(schema_name);
    self.definitions.insert(
      name.clone(),
      NamedType {
        name,
        schema_name: schema_name.to_string(),
        description,
        ty,
      },
    );
  }

  /// Records a warning once.
  pub(crate) fn warn(&mut self, warning: GenerationWarning) {
    if !self.warnings.contains(&warning) {
      self.warnings.push(warning);
    }
  }

  /// How many times a named definition was synthesized.
  #[cfg(test)]
  pub(crate) fn expansions(&self) -> usize {
    self.expansions
  }

  #[cfg(test)]
  pub(crate) fn definition(&self, type_name: &str) -> Option<&NamedType> {
    self.definitions.get(type_name)
  }

  #[cfg(test)]
  pub(crate) fn len(&self) -> usize {
    self.definitions.len()
  }

  #[cfg(test)]
  pub(crate) fn warnings(&self) -> &[GenerationWarning] {
    &self.warnings
  }

  /// Finished definitions, ordered by type name.
  pub(crate) fn into_parts(self) -> (Vec<NamedType>, Vec<GenerationWarning>) {
    (self.definitions.into_values().collect(), self.warnings)
  }
}
