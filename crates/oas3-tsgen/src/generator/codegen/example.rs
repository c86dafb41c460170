use std::collections::BTreeSet;

use super::doc_comment;
use crate::generator::{
  ast::{ClientOperation, ClientParam, Primitive, ResolvedType},
  model::ParameterLocation,
  naming::identifiers::{ensure_unique, quote_property_key, to_param_ident},
};

/// Query parameter names treated as carrying an API key, compared case-insensitively.
pub(crate) const API_KEY_PARAM_NAMES: [&str; 11] = [
  "key",
  "api_key",
  "apikey",
  "api-key",
  "token",
  "access_token",
  "accesstoken",
  "auth_token",
  "authtoken",
  "x-api-key",
  "apitoken",
];

/// How many operations the usage example calls.
pub(crate) const EXAMPLE_OPERATION_COUNT: usize = 3;

const API_KEY_CONST: &str = "API_KEY";

#[must_use]
pub(crate) fn is_api_key_param(name: &str) -> bool {
  API_KEY_PARAM_NAMES.iter().any(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// A standalone script exercising the first few operations of a generated client.
///
/// When one of those operations takes its key as a query parameter, the key is passed at
/// the call site; otherwise it goes to the constructor and travels as `X-API-Key`.
pub(crate) fn emit_example(
  class_name: &str,
  module_path: &str,
  api_key: Option<&str>,
  operations: &[ClientOperation],
) -> String {
  let shown = &operations[..operations.len().min(EXAMPLE_OPERATION_COUNT)];
  let key_in_query = shown
    .iter()
    .any(|operation| operation.query_params().any(|param| is_api_key_param(&param.name)));

  let mut referenced = BTreeSet::new();
  let mut result_names = BTreeSet::new();
  let calls = shown
    .iter()
    .map(|operation| {
      let result = ensure_unique(&format!("{}Result", to_param_ident(&operation.method_name)), &result_names);
      result_names.insert(result.clone());
      emit_call(operation, &result, &mut referenced)
    })
    .collect::<Vec<_>>();

  let module = serde_json::Value::String(module_path.to_string());
  let mut out = doc_comment(
    &[
      format!("Usage example for {class_name}."),
      String::new(),
      "AUTO-GENERATED CODE - DO NOT EDIT!".to_string(),
    ],
    "",
  );
  out.push_str(&format!("import {{ {class_name} }} from {module};\n"));
  if !referenced.is_empty() {
    let names = referenced.into_iter().collect::<Vec<_>>().join(", ");
    out.push_str(&format!("import type {{ {names} }} from {module};\n"));
  }
  out.push('\n');

  let key_source = api_key.map_or_else(
    || format!("process.env.{API_KEY_CONST} ?? \"\""),
    |key| serde_json::Value::String(key.to_string()).to_string(),
  );
  out.push_str(&format!("const {API_KEY_CONST} = {key_source};\n\n"));

  if key_in_query {
    out.push_str(&format!("const client = new {class_name}();\n\n"));
  } else {
    out.push_str(&format!(
      "const client = new {class_name}({{ apiKey: {API_KEY_CONST} }});\n\n"
    ));
  }

  out.push_str(INTERCEPTORS);
  out.push_str("\nasync function main(): Promise<void> {\n");
  if calls.is_empty() {
    out.push_str("  // The client has no operations.\n");
  }
  out.push_str(&calls.join("\n"));
  out.push_str("}\n\n");
  out.push_str(ENTRY_POINT);
  out
}

const INTERCEPTORS: &str = r"client
  .useRequestInterceptor((context) => {
    console.log(`-> ${context.method} ${context.url}`);
    return context;
  })
  .useResponseInterceptor((response) => {
    console.log(`<- ${response.status} ${response.url}`);
    return response;
  });
";

const ENTRY_POINT: &str = r"main().catch((error: unknown) => {
  console.error(error);
  process.exit(1);
});
";

fn emit_call(operation: &ClientOperation, result: &str, referenced: &mut BTreeSet<String>) -> String {
  let method = &operation.method_name;

  format!(
    "  const {result} = await client.{method}({args});\n  \
     if ({result}.ok) {{\n    \
       console.log(\"{method}\", {result}.status, {result}.data);\n  \
     }} else {{\n    \
       console.error(\"{method} failed\", {result}.error.status, {result}.error.message);\n  \
     }}\n",
    args = call_arguments(operation, referenced).join(", ")
  )
}

/// Sample arguments: every path parameter, the body, and the required or key-carrying params.
fn call_arguments(operation: &ClientOperation, referenced: &mut BTreeSet<String>) -> Vec<String> {
  let mut args = operation
    .path_params
    .iter()
    .map(|param| sample_value(&param.ty, referenced))
    .collect::<Vec<_>>();

  if let Some(body) = &operation.body {
    args.push(sample_value(&body.ty, referenced));
  }

  let entries = operation
    .params
    .iter()
    .filter_map(|param| param_entry(param, referenced))
    .collect::<Vec<_>>();
  if !entries.is_empty() {
    args.push(format!("{{ {} }}", entries.join(", ")));
  }

  args
}

fn param_entry(param: &ClientParam, referenced: &mut BTreeSet<String>) -> Option<String> {
  let key = quote_property_key(&param.name);
  if is_api_key_param(&param.name) && param.location == ParameterLocation::Query {
    return Some(format!("{key}: {API_KEY_CONST}"));
  }
  param
    .required
    .then(|| format!("{key}: {}", sample_value(&param.ty, referenced)))
}

/// A literal that type-checks against `ty`; named types are cast from `{}`, inline
/// objects carry their required fields.
pub(crate) fn sample_value(ty: &ResolvedType, referenced: &mut BTreeSet<String>) -> String {
  match ty {
    ResolvedType::Primitive(primitive) => match primitive {
      Primitive::String => "\"example\"".to_string(),
      Primitive::Number => "1".to_string(),
      Primitive::Boolean => "true".to_string(),
    },
    ResolvedType::Literals(literals) => literals.first().map_or_else(|| "{}".to_string(), ToString::to_string),
    ResolvedType::Array(item) => format!("[{}]", sample_value(item, referenced)),
    ResolvedType::Nullable(inner) => sample_value(inner, referenced),
    ResolvedType::Named(name) => {
      referenced.insert(name.clone());
      format!("{{}} as {name}")
    }
    ResolvedType::Object(object) => {
      let entries = object
        .fields
        .iter()
        .filter(|field| field.required)
        .map(|field| format!("{}: {}", quote_property_key(&field.name), sample_value(&field.ty, referenced)))
        .collect::<Vec<_>>();
      if entries.is_empty() {
        "{}".to_string()
      } else {
        format!("{{ {} }}", entries.join(", "))
      }
    }
    ResolvedType::Unknown => "{}".to_string(),
  }
}
