const COMPONENTS_PREFIX: &str = "#/components/";

/// Component sections a local `$ref` may point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
  Schemas,
  Parameters,
  RequestBodies,
  Responses,
}

impl ComponentKind {
  const fn section(self) -> &'static str {
    match self {
      Self::Schemas => "schemas",
      Self::Parameters => "parameters",
      Self::RequestBodies => "requestBodies",
      Self::Responses => "responses",
    }
  }

  pub const fn label(self) -> &'static str {
    match self {
      Self::Schemas => "schema",
      Self::Parameters => "parameter",
      Self::RequestBodies => "request body",
      Self::Responses => "response",
    }
  }
}

/// Extracts the component name from a local `$ref` path of the given kind.
///
/// Returns `None` for external references (`other.yaml#/...`), references into a
/// different component section, and empty names. JSON Pointer escapes (`~1`, `~0`)
/// are decoded.
pub fn parse_component_ref(ref_path: &str, kind: ComponentKind) -> Option<String> {
  let rest = ref_path.strip_prefix(COMPONENTS_PREFIX)?;
  let name = rest.strip_prefix(kind.section())?.strip_prefix('/')?;

  if name.is_empty() || name.contains('/') {
    return None;
  }

  Some(name.replace("~1", "/").replace("~0", "~"))
}

/// Extracts the schema name from a `#/components/schemas/<Name>` reference.
pub fn parse_schema_ref_path(ref_path: &str) -> Option<String> {
  parse_component_ref(ref_path, ComponentKind::Schemas)
}
