use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;

use super::model::{AdditionalProperties, Schema, Spec};
use crate::utils::parse_schema_ref_path;

/// Named schema table for a document, with reference resolution and dependency analysis.
#[derive(Debug)]
pub(crate) struct SchemaRegistry<'a> {
  /// All schemas from `components.schemas`
  schemas: &'a IndexMap<String, Schema>,
  /// Dependency graph: schema_name -> [schemas it references]
  dependencies: BTreeMap<String, BTreeSet<String>>,
}

impl<'a> SchemaRegistry<'a> {
  pub(crate) fn new(spec: &'a Spec) -> Self {
    Self {
      schemas: &spec.components.schemas,
      dependencies: BTreeMap::new(),
    }
  }

  pub(crate) fn schema_names(&self) -> impl Iterator<Item = &'a String> {
    self.schemas.keys()
  }

  /// Resolves a local schema reference one level deep.
  ///
  /// Non-reference input and references that name no known schema come back unchanged;
  /// callers treat an unchanged reference as unresolved.
  pub(crate) fn resolve<'s>(&self, schema: &'s Schema) -> &'s Schema
  where
    'a: 's,
  {
    match schema {
      Schema::Reference { ref_path } => parse_schema_ref_path(ref_path)
        .and_then(|name| self.schemas.get(&name))
        .unwrap_or(schema),
      Schema::Inline(_) | Schema::Malformed(_) => schema,
    }
  }

  /// Build the dependency graph by analyzing all schema references
  pub(crate) fn build_dependencies(&mut self) {
    for (name, schema) in self.schemas {
      let mut deps = BTreeSet::new();
      collect_dependencies(schema, &mut deps);
      self.dependencies.insert(name.clone(), deps);
    }
  }

  /// Detect cycles in the schema dependency graph using DFS
  pub(crate) fn detect_cycles(&self) -> Vec<Vec<String>> {
    let mut visited = BTreeSet::new();
    let mut rec_stack = BTreeSet::new();
    let mut cycles = Vec::new();
    let mut path = Vec::new();

    for schema_name in self.schemas.keys() {
      if !visited.contains(schema_name) {
        self.dfs_detect_cycle(schema_name, &mut visited, &mut rec_stack, &mut path, &mut cycles);
      }
    }

    cycles
  }

  fn dfs_detect_cycle(
    &self,
    node: &str,
    visited: &mut BTreeSet<String>,
    rec_stack: &mut BTreeSet<String>,
    path: &mut Vec<String>,
    cycles: &mut Vec<Vec<String>>,
  ) {
    visited.insert(node.to_string());
    rec_stack.insert(node.to_string());
    path.push(node.to_string());

    if let Some(deps) = self.dependencies.get(node) {
      for dep in deps {
        if !visited.contains(dep) {
          self.dfs_detect_cycle(dep, visited, rec_stack, path, cycles);
        } else if rec_stack.contains(dep)
          && let Some(cycle_start) = path.iter().position(|n| n == dep)
        {
          cycles.push(path[cycle_start..].to_vec());
        }
      }
    }

    path.pop();
    rec_stack.remove(node);
  }
}

/// Collects every named schema a schema references, looking through inline nesting.
fn collect_dependencies(schema: &Schema, deps: &mut BTreeSet<String>) {
  match schema {
    Schema::Reference { ref_path } => {
      if let Some(name) = parse_schema_ref_path(ref_path) {
        deps.insert(name);
      }
    }
    Schema::Inline(inline) => {
      for property in inline.properties.values() {
        collect_dependencies(property, deps);
      }
      if let Some(items) = &inline.items {
        collect_dependencies(items, deps);
      }
      if let Some(AdditionalProperties::Schema(additional)) = &inline.additional_properties {
        collect_dependencies(additional, deps);
      }
    }
    Schema::Malformed(_) => {}
  }
}
