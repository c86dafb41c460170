use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{
  generator::{
    ast::{Endpoint, PATH_PLACEHOLDER_RE},
    errors::GenerationWarning,
    model::{Components, HttpMethod, ObjectOrReference, Operation, Parameter, ParameterLocation, Schema, SchemaType, Spec},
    naming::operations::generate_operation_id,
  },
  utils::refs::{ComponentKind, parse_component_ref},
};

/// Filter for including or excluding operations from code generation.
///
/// Operations are matched by operation id, declared or generated. Both inclusion and
/// exclusion filters can be combined; exclusion takes precedence if an operation
/// matches both.
#[derive(Debug, Clone, Default)]
pub struct OperationFilter {
  only: Option<HashSet<String>>,
  excluded: Option<HashSet<String>>,
}

impl OperationFilter {
  #[must_use]
  pub fn new(only: Option<&HashSet<String>>, excluded: Option<&HashSet<String>>) -> Self {
    Self {
      only: only.cloned(),
      excluded: excluded.cloned(),
    }
  }

  /// Returns whether the given operation id passes this filter.
  #[must_use]
  pub fn accepts<S>(&self, operation_id: S) -> bool
  where
    S: AsRef<str>,
  {
    if let Some(ref included) = self.only
      && !included.contains(operation_id.as_ref())
    {
      return false;
    }

    if let Some(ref excluded) = self.excluded
      && excluded.contains(operation_id.as_ref())
    {
      return false;
    }

    true
  }
}

/// Ordered endpoints of a document, plus what was dropped or patched up on the way.
///
/// Endpoints follow path order, then the fixed verb order `get, post, put, patch, delete`.
#[derive(Debug, Default)]
pub struct OperationRegistry {
  endpoints: Vec<Endpoint>,
  warnings: Vec<GenerationWarning>,
}

impl OperationRegistry {
  #[must_use]
  pub fn new(spec: &Spec) -> Self {
    Self::with_filter(spec, &OperationFilter::default())
  }

  #[must_use]
  pub fn with_filter(spec: &Spec, filter: &OperationFilter) -> Self {
    let mut extractor = Extractor {
      components: &spec.components,
      warnings: vec![],
    };

    let mut endpoints = vec![];
    for (path, item) in spec.path_items() {
      for (method, operation) in item.operations() {
        let operation_id = operation
          .operation_id
          .clone()
          .filter(|id| !id.trim().is_empty())
          .unwrap_or_else(|| generate_operation_id(method, path));

        if !filter.accepts(&operation_id) {
          continue;
        }

        endpoints.push(extractor.extract(method, path, operation_id, &item.parameters, operation));
      }
    }

    Self {
      endpoints,
      warnings: extractor.warnings,
    }
  }

  #[must_use]
  pub fn endpoints(&self) -> &[Endpoint] {
    &self.endpoints
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.endpoints.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.endpoints.is_empty()
  }

  pub fn warnings(&self) -> &[GenerationWarning] {
    &self.warnings
  }

  pub fn into_parts(self) -> (Vec<Endpoint>, Vec<GenerationWarning>) {
    (self.endpoints, self.warnings)
  }
}

struct Extractor<'a> {
  components: &'a Components,
  warnings: Vec<GenerationWarning>,
}

impl Extractor<'_> {
  fn extract(
    &mut self,
    method: HttpMethod,
    path: &str,
    operation_id: String,
    path_level: &[ObjectOrReference<Parameter>],
    operation: &Operation,
  ) -> Endpoint {
    let label = format!("{method} {path} ({operation_id})");
    let components = self.components;

    let mut parameters = self.merge_parameters(path_level, &operation.parameters, &label);
    self.add_undeclared_path_parameters(path, &mut parameters, &label);

    for cookie in parameters.iter().filter(|p| p.location == ParameterLocation::Cookie) {
      self.warnings.push(GenerationWarning::SkippedCookieParameter {
        name: cookie.name.clone(),
        operation: label.clone(),
      });
    }

    let request_body = operation.request_body.as_ref().and_then(|body| {
      self
        .resolve(body, &components.request_bodies, ComponentKind::RequestBodies, &label)
        .cloned()
    });

    let responses = operation
      .responses
      .iter()
      .filter_map(|(status, response)| {
        self
          .resolve(response, &components.responses, ComponentKind::Responses, &label)
          .map(|response| (status.clone(), response.clone()))
      })
      .collect::<IndexMap<_, _>>();

    Endpoint::builder()
      .method(method)
      .path(path)
      .operation_id(operation_id)
      .maybe_summary(operation.summary.clone())
      .maybe_description(operation.description.clone())
      .parameters(parameters)
      .maybe_request_body(request_body)
      .responses(responses)
      .tags(operation.tags.clone())
      .deprecated(operation.deprecated)
      .build()
  }

  /// Path-level parameters first, minus those an operation-level one shadows on `(name, in)`.
  fn merge_parameters(
    &mut self,
    path_level: &[ObjectOrReference<Parameter>],
    operation_level: &[ObjectOrReference<Parameter>],
    label: &str,
  ) -> Vec<Parameter> {
    let inherited = self.resolve_parameters(path_level, label);
    let own = self.resolve_parameters(operation_level, label);

    let shadowed = own.iter().map(Parameter::key).collect::<HashSet<_>>();

    let mut merged = inherited
      .iter()
      .filter(|param| !shadowed.contains(&param.key()))
      .cloned()
      .collect::<Vec<_>>();
    merged.extend(own.iter().cloned());
    merged
  }

  /// Resolves a parameter list, keeping the first of any repeated `(name, in)` pair.
  fn resolve_parameters(&mut self, params: &[ObjectOrReference<Parameter>], label: &str) -> Vec<Parameter> {
    let components = self.components;
    let mut seen = HashSet::new();
    params
      .iter()
      .filter_map(|param| self.resolve(param, &components.parameters, ComponentKind::Parameters, label))
      .filter(|param| seen.insert((param.name.clone(), param.location)))
      .cloned()
      .collect()
  }

  fn add_undeclared_path_parameters(&mut self, path: &str, parameters: &mut Vec<Parameter>, label: &str) {
    let placeholders = PATH_PLACEHOLDER_RE
      .captures_iter(path)
      .filter_map(|caps| caps.get(1))
      .map(|m| m.as_str().to_string())
      .collect::<Vec<_>>();

    for name in placeholders {
      let declared = parameters
        .iter()
        .any(|param| param.location == ParameterLocation::Path && param.name == name);
      if declared {
        continue;
      }

      self.warnings.push(GenerationWarning::UndeclaredPathParameter {
        name: name.clone(),
        operation: label.to_string(),
      });
      parameters.push(Parameter {
        name,
        location: ParameterLocation::Path,
        required: true,
        schema: Some(Schema::of_type(SchemaType::String)),
        description: None,
      });
    }
  }

  /// Resolves a component reference one level deep; an unresolvable one is dropped with a warning.
  fn resolve<'c, T>(
    &mut self,
    item: &'c ObjectOrReference<T>,
    table: &'c IndexMap<String, T>,
    kind: ComponentKind,
    label: &str,
  ) -> Option<&'c T> {
    match item {
      ObjectOrReference::Object(object) => Some(object),
      ObjectOrReference::Ref { ref_path } => {
        let resolved = parse_component_ref(ref_path, kind).and_then(|name| table.get(&name));
        if resolved.is_none() {
          self.warnings.push(GenerationWarning::UnresolvedComponent {
            kind: kind.label().to_string(),
            reference: ref_path.clone(),
            operation: label.to_string(),
          });
        }
        resolved
      }
    }
  }
}
