use super::types::ResolvedType;
use crate::generator::model::{HttpMethod, ParameterLocation};

/// An argument of a generated client method.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct ClientParam {
  /// Wire name, as declared in the document.
  #[builder(into)]
  pub name: String,
  /// Function parameter identifier; only meaningful for path parameters.
  #[builder(into)]
  pub ident: String,
  pub location: ParameterLocation,
  #[builder(default)]
  pub required: bool,
  pub ty: ResolvedType,
  #[builder(into)]
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientBody {
  pub ty: ResolvedType,
  pub required: bool,
}

/// Everything the emitter needs to write one client method.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct ClientOperation {
  #[builder(into)]
  pub method_name: String,
  pub http_method: HttpMethod,
  #[builder(into)]
  pub path: String,
  #[builder(into)]
  pub operation_id: String,
  #[builder(into)]
  pub summary: Option<String>,
  #[builder(into)]
  pub description: Option<String>,
  #[builder(default)]
  pub deprecated: bool,
  /// Path parameters in template order; always required.
  #[builder(default)]
  pub path_params: Vec<ClientParam>,
  /// Query and header parameters, passed through one `params` object.
  #[builder(default)]
  pub params: Vec<ClientParam>,
  pub body: Option<ClientBody>,
  #[builder(default = ResolvedType::Unknown)]
  pub success: ResolvedType,
  /// Declared non-2xx status codes, ascending.
  #[builder(default)]
  pub error_codes: Vec<u16>,
}

impl ClientOperation {
  #[must_use]
  pub fn has_required_params(&self) -> bool {
    self.params.iter().any(|param| param.required)
  }

  pub fn query_params(&self) -> impl Iterator<Item = &ClientParam> {
    self.params.iter().filter(|param| param.location == ParameterLocation::Query)
  }

  pub fn header_params(&self) -> impl Iterator<Item = &ClientParam> {
    self.params.iter().filter(|param| param.location == ParameterLocation::Header)
  }

  /// Type arguments shared by the return type and the transport call, e.g. `Pet, 404`.
  #[must_use]
  pub fn type_arguments(&self) -> String {
    if self.error_codes.is_empty() {
      self.success.to_string()
    } else {
      let codes = self.error_codes.iter().map(u16::to_string).collect::<Vec<_>>();
      format!("{}, {}", self.success, codes.join(" | "))
    }
  }

  /// The declared return payload, e.g. `ApiResult<Pet[], 400 | 404>`.
  #[must_use]
  pub fn result_type(&self) -> String {
    format!("ApiResult<{}>", self.type_arguments())
  }
}
