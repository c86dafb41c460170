use indexmap::IndexMap;

use crate::generator::{ast::Endpoint, errors::GenerateError, model::HttpMethod, naming::identifiers::to_method_name};

/// Builds an operation id for an operation that declares none.
///
/// # Example
///
/// ```text
/// (post, "/users/{id}/posts") => "postUsersIdPosts"
/// ```
pub fn generate_operation_id(method: HttpMethod, path: &str) -> String {
  let mut id = method.as_lower().to_string();
  for segment in path.split('/') {
    let stripped = segment.replace(['{', '}'], "");
    let mut chars = stripped.chars();
    if let Some(first) = chars.next() {
      id.extend(first.to_uppercase());
      id.push_str(chars.as_str());
    }
  }
  id
}

/// Public member names of the generated client class that no operation may take.
///
/// The remaining members are `#`-private or camelCase, so a snake_case method name
/// cannot shadow them.
pub(crate) const RESERVED_MEMBER_NAMES: [&str; 1] = ["constructor"];

/// Assigns a client method name to every endpoint, in endpoint order.
///
/// Two endpoints landing on the same name is an error, as is a name the class reserves.
pub fn assign_method_names(endpoints: &[Endpoint]) -> Result<Vec<String>, GenerateError> {
  let mut seen = IndexMap::<String, &Endpoint>::with_capacity(endpoints.len());

  for endpoint in endpoints {
    let method_name = to_method_name(&endpoint.operation_id);
    if RESERVED_MEMBER_NAMES.contains(&method_name.as_str()) {
      return Err(GenerateError::ReservedMethodName {
        method_name,
        operation: endpoint.label(),
      });
    }
    if let Some(first) = seen.get(&method_name) {
      return Err(GenerateError::MethodNameCollision {
        method_name,
        first: first.label(),
        second: endpoint.label(),
      });
    }
    seen.insert(method_name, endpoint);
  }

  Ok(seen.into_keys().collect())
}
