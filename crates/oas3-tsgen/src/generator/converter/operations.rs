use std::collections::BTreeSet;

use super::{SUCCESS_WILDCARDS, type_resolver::TypeSynthesizer};
use crate::generator::{
  ast::{ClientBody, ClientOperation, ClientParam, Endpoint, Primitive, ResolvedType},
  model::{Parameter, ParameterLocation, Response},
  naming::identifiers::{ensure_unique, to_param_ident},
};

/// Lowers extracted endpoints into the method descriptors the emitter renders.
pub(crate) struct OperationConverter<'s, 'r, 'a> {
  synthesizer: &'s mut TypeSynthesizer<'r, 'a>,
}

impl<'s, 'r, 'a> OperationConverter<'s, 'r, 'a> {
  pub(crate) fn new(synthesizer: &'s mut TypeSynthesizer<'r, 'a>) -> Self {
    Self { synthesizer }
  }

  pub(crate) fn convert(&mut self, endpoint: &Endpoint, method_name: &str) -> ClientOperation {
    let path_params = self.path_params(endpoint);
    let params = endpoint
      .parameters
      .iter()
      .filter(|param| matches!(param.location, ParameterLocation::Query | ParameterLocation::Header))
      .map(|param| self.client_param(param, to_param_ident(&param.name)))
      .collect::<Vec<_>>();

    let body = endpoint.request_body.as_ref().map(|request_body| ClientBody {
      ty: self.synthesizer.synthesize_or_unknown(request_body.json_schema()),
      required: request_body.required,
    });

    let success = select_success_response(endpoint)
      .map_or(ResolvedType::Unknown, |response| {
        self.synthesizer.synthesize_or_unknown(response.json_schema())
      });

    ClientOperation::builder()
      .method_name(method_name)
      .http_method(endpoint.method)
      .path(&endpoint.path)
      .operation_id(&endpoint.operation_id)
      .maybe_summary(endpoint.summary.as_deref())
      .maybe_description(endpoint.description.as_deref())
      .deprecated(endpoint.deprecated)
      .path_params(path_params)
      .params(params)
      .maybe_body(body)
      .success(success)
      .error_codes(error_status_codes(endpoint))
      .build()
  }

  /// Path parameters in template order with unique identifiers.
  fn path_params(&mut self, endpoint: &Endpoint) -> Vec<ClientParam> {
    let mut used = BTreeSet::new();
    let mut path_params = vec![];

    for placeholder in endpoint.path_placeholders() {
      let Some(param) = endpoint
        .parameters_in(ParameterLocation::Path)
        .find(|param| param.name == placeholder)
      else {
        continue;
      };

      let ident = ensure_unique(&to_param_ident(&param.name), &used);
      used.insert(ident.clone());

      let mut client_param = self.client_param(param, ident);
      client_param.required = true;
      if param.schema.is_none() {
        client_param.ty = ResolvedType::Primitive(Primitive::String);
      }
      path_params.push(client_param);
    }

    path_params
  }

  fn client_param(&mut self, param: &Parameter, ident: String) -> ClientParam {
    ClientParam::builder()
      .name(&param.name)
      .ident(ident)
      .location(param.location)
      .required(param.required)
      .ty(self.synthesizer.synthesize_or_unknown(param.schema.as_ref()))
      .maybe_description(param.description.as_deref())
      .build()
  }
}

/// The lowest declared numeric 2xx response, else a `2XX` wildcard response.
pub(crate) fn select_success_response(endpoint: &Endpoint) -> Option<&Response> {
  endpoint
    .responses
    .iter()
    .filter_map(|(code, response)| parse_status(code).map(|status| (status, response)))
    .filter(|(status, _)| (200..300).contains(status))
    .min_by_key(|(status, _)| *status)
    .map(|(_, response)| response)
    .or_else(|| SUCCESS_WILDCARDS.iter().find_map(|key| endpoint.responses.get(*key)))
}

/// Declared numeric non-2xx status codes, ascending and de-duplicated.
pub(crate) fn error_status_codes(endpoint: &Endpoint) -> Vec<u16> {
  endpoint
    .responses
    .keys()
    .filter_map(|code| parse_status(code))
    .filter(|status| (100..600).contains(status) && !(200..300).contains(status))
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect()
}

fn parse_status(code: &str) -> Option<u16> {
  code.trim().parse::<u16>().ok()
}
