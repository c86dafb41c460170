use std::{
  collections::{BTreeSet, HashSet},
  sync::LazyLock,
};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

/// Words that cannot name a TypeScript function parameter or variable.
pub(crate) static FORBIDDEN_IDENTIFIERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "arguments",
    "as",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "eval",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
  ]
  .into_iter()
  .collect()
});

/// Type names already taken by the runtime prelude or by TypeScript itself.
static RESERVED_TYPE_NAMES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "ApiError",
    "ApiResult",
    "Array",
    "Boolean",
    "ClientOptions",
    "Error",
    "Number",
    "Object",
    "Promise",
    "Record",
    "RequestContext",
    "RequestInterceptor",
    "Response",
    "ResponseInterceptor",
    "String",
    "Symbol",
    "URLSearchParams",
  ]
  .into_iter()
  .collect()
});

/// Arguments and locals of generated methods that path parameters must not shadow.
pub(crate) const METHOD_ARGUMENT_NAMES: [&str; 4] = ["body", "headers", "params", "query"];

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());
static TS_IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Transliterates to ASCII, replaces invalid characters with underscores, collapses
/// consecutive underscores, and trims any leading or trailing underscores.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Converts an operation id into the client method name.
///
/// # Rules:
/// 1. Every character outside `[A-Za-z0-9_]` becomes `_`.
/// 2. A leading digit gets a `_` prefix.
/// 3. A `_` is inserted at each lowercase-to-uppercase transition.
/// 4. The result is lowercased.
///
/// The client and its usage example both name methods through this function.
pub(crate) fn to_method_name(raw: &str) -> String {
  if raw.is_empty() {
    return "_".to_string();
  }

  let replaced = raw
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
    .collect::<String>();

  let mut ident = String::with_capacity(replaced.len() + 4);
  if replaced.starts_with(|c: char| c.is_ascii_digit()) {
    ident.push('_');
  }

  let mut prev_lower = false;
  for c in replaced.chars() {
    if prev_lower && c.is_ascii_uppercase() {
      ident.push('_');
    }
    prev_lower = c.is_ascii_lowercase();
    ident.push(c.to_ascii_lowercase());
  }

  ident
}

/// Converts a schema name into a declared TypeScript type name (`PascalCase`).
///
/// # Rules:
/// 1. Names without separators keep their capitalization, with the first letter uppercased.
/// 2. Otherwise the sanitized name is converted to `PascalCase`.
/// 3. Names taken by the runtime prelude or TypeScript globals get a `Type` suffix.
/// 4. A leading digit gets a `T` prefix.
/// 5. An empty result becomes `Unnamed`.
pub(crate) fn to_type_name(name: &str) -> String {
  let ascii = any_ascii(name);
  let has_separators = ascii.chars().any(|c| !c.is_ascii_alphanumeric());

  let mut ident = if has_separators {
    sanitize(&ascii).to_snake_case().to_pascal_case()
  } else {
    upper_first(&ascii)
  };

  if ident.is_empty() {
    return "Unnamed".to_string();
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, 'T');
  }

  if RESERVED_TYPE_NAMES.contains(ident.as_str()) {
    ident.push_str("Type");
  }

  ident
}

/// Converts a wire parameter name into a function parameter identifier (`camelCase`).
pub(crate) fn to_param_ident(name: &str) -> String {
  let sanitized = sanitize(name);
  if sanitized.is_empty() {
    return "arg".to_string();
  }

  let mut ident = if sanitized.contains('_') {
    sanitized.to_snake_case().to_camel_case()
  } else {
    sanitized
  };

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, '_');
  }

  if FORBIDDEN_IDENTIFIERS.contains(ident.as_str()) || METHOD_ARGUMENT_NAMES.contains(&ident.as_str()) {
    ident.push('_');
  }

  ident
}

/// Derives the client class name from the document title.
pub(crate) fn to_class_name(title: &str) -> String {
  let words = sanitize(title);
  if words.is_empty() {
    return "ApiClient".to_string();
  }

  let mut ident = words.to_snake_case().to_pascal_case();
  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert_str(0, "Api");
  }
  if !ident.ends_with("Client") {
    ident.push_str("Client");
  }
  ident
}

#[must_use]
pub(crate) fn is_ts_identifier(name: &str) -> bool {
  TS_IDENTIFIER_RE.is_match(name)
}

/// Renders an object key, quoting it when it is not a bare identifier.
pub(crate) fn quote_property_key(key: &str) -> String {
  if is_ts_identifier(key) {
    key.to_string()
  } else {
    serde_json::Value::String(key.to_string()).to_string()
  }
}

/// Renders a property read on `object`, e.g. `params.limit` or `params["x-id"]`.
pub(crate) fn property_access(object: &str, key: &str) -> String {
  if is_ts_identifier(key) {
    format!("{object}.{key}")
  } else {
    format!("{object}[{}]", serde_json::Value::String(key.to_string()))
  }
}

/// Ensures a name is unique within a set of used names, appending a numeric suffix if needed.
pub(crate) fn ensure_unique(base_name: &str, used_names: &BTreeSet<String>) -> String {
  if !used_names.contains(base_name) {
    return base_name.to_string();
  }
  let mut i = 2;
  loop {
    let new_name = format!("{base_name}{i}");
    if !used_names.contains(&new_name) {
      return new_name;
    }
    i += 1;
  }
}

fn upper_first(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
  }
}
