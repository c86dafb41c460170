use super::{doc_comment, runtime::CLIENT_CORE};
use crate::generator::{
  ast::{ClientOperation, ClientParam, Field, PATH_PLACEHOLDER_RE},
  model::ParameterLocation,
  naming::identifiers::{property_access, quote_property_key},
};

/// The default base URL constant and the client class with one method per operation.
pub(crate) fn emit_client(class_name: &str, base_url: &str, operations: &[ClientOperation]) -> String {
  let mut out = format!(
    "const DEFAULT_BASE_URL = {};\n\nexport class {class_name} {{\n{CLIENT_CORE}",
    serde_json::Value::String(base_url.to_string())
  );
  for operation in operations {
    out.push('\n');
    out.push_str(&emit_method(operation));
  }
  out.push_str("}\n");
  out
}

pub(crate) fn emit_method(operation: &ClientOperation) -> String {
  let mut out = method_doc(operation);
  out.push_str(&format!("  async {} {{\n", method_signature(operation)));

  let has_query = operation.query_params().next().is_some();
  if has_query {
    out.push_str(&format!(
      "    const query = buildQuery({});\n",
      params_literal(operation.query_params())
    ));
  }

  let has_headers = operation.header_params().next().is_some();
  if has_headers {
    out.push_str(&format!(
      "    const headers = buildHeaders({});\n",
      params_literal(operation.header_params())
    ));
  }

  let mut args = vec![
    serde_json::Value::String(operation.http_method.to_string()).to_string(),
    url_template(operation, has_query),
  ];
  if has_headers {
    args.push("headers".to_string());
  } else if operation.body.is_some() {
    args.push("{}".to_string());
  }
  if operation.body.is_some() {
    args.push("body".to_string());
  }

  out.push_str(&format!(
    "    return this.#request<{}>({});\n  }}\n",
    operation.type_arguments(),
    args.join(", ")
  ));
  out
}

/// `name(args): Promise<ApiResult<...>>`
///
/// Argument order: path parameters in template order, then the request body, then one
/// `params` object for query and header parameters.
pub(crate) fn method_signature(operation: &ClientOperation) -> String {
  let params_required = operation.has_required_params();

  let mut args = operation
    .path_params
    .iter()
    .map(|param| format!("{}: {}", param.ident, param.ty))
    .collect::<Vec<_>>();

  if let Some(body) = &operation.body {
    args.push(if body.required {
      format!("body: {}", body.ty)
    } else if params_required {
      format!("body: {} | undefined", body.ty)
    } else {
      format!("body?: {}", body.ty)
    });
  }

  if !operation.params.is_empty() {
    let shape = params_shape(&operation.params);
    args.push(if params_required {
      format!("params: {shape}")
    } else {
      format!("params: {shape} = {{}}")
    });
  }

  format!(
    "{}({}): Promise<{}>",
    operation.method_name,
    args.join(", "),
    operation.result_type()
  )
}

/// Object type of the `params` argument, e.g. `{ limit?: number; "X-Trace-Id": string }`.
pub(crate) fn params_shape(params: &[ClientParam]) -> String {
  let members = params
    .iter()
    .map(|param| {
      Field::builder()
        .name(&param.name)
        .ty(param.ty.clone())
        .required(param.required)
        .build()
        .to_string()
    })
    .collect::<Vec<_>>();
  format!("{{ {} }}", members.join("; "))
}

fn params_literal<'p>(params: impl Iterator<Item = &'p ClientParam>) -> String {
  let entries = params
    .map(|param| format!("{}: {}", quote_property_key(&param.name), property_access("params", &param.name)))
    .collect::<Vec<_>>();
  format!("{{ {} }}", entries.join(", "))
}

/// The request path as a template literal with encoded path parameters substituted.
pub(crate) fn url_template(operation: &ClientOperation, with_query: bool) -> String {
  let mut out = String::from("`");
  let mut last = 0;

  for caps in PATH_PLACEHOLDER_RE.captures_iter(&operation.path) {
    let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
      continue;
    };
    out.push_str(&escape_template(&operation.path[last..whole.start()]));
    match operation.path_params.iter().find(|param| param.name == name.as_str()) {
      Some(param) => out.push_str(&format!("${{encodeURIComponent(String({}))}}", param.ident)),
      None => out.push_str(&escape_template(whole.as_str())),
    }
    last = whole.end();
  }
  out.push_str(&escape_template(&operation.path[last..]));

  if with_query {
    out.push_str("${query}");
  }
  out.push('`');
  out
}

fn escape_template(text: &str) -> String {
  text.replace('\\', "\\\\").replace('`', "\\`").replace('$', "\\$")
}

fn method_doc(operation: &ClientOperation) -> String {
  let mut sections: Vec<Vec<String>> = vec![];

  if let Some(summary) = operation.summary.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
    sections.push(summary.lines().map(str::to_string).collect());
  }
  if let Some(description) = operation.description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
    sections.push(description.lines().map(str::to_string).collect());
  }
  sections.push(vec![format!("`{} {}`", operation.http_method, operation.path)]);

  let mut tags = operation
    .path_params
    .iter()
    .chain(&operation.params)
    .filter_map(|param| {
      let description = param.description.as_deref()?.trim();
      let name = if param.location == ParameterLocation::Path {
        param.ident.clone()
      } else {
        format!("params.{}", param.name)
      };
      (!description.is_empty()).then(|| format!("@param {name} {}", description.replace('\n', " ")))
    })
    .collect::<Vec<_>>();
  if operation.deprecated {
    tags.push("@deprecated".to_string());
  }
  if !tags.is_empty() {
    sections.push(tags);
  }

  let lines = sections
    .into_iter()
    .enumerate()
    .flat_map(|(i, section)| {
      let separator = (i > 0).then(String::new);
      separator.into_iter().chain(section)
    })
    .collect::<Vec<_>>();
  doc_comment(&lines, "  ")
}
