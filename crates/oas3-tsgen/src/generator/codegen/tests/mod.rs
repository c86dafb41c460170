mod types;

use crate::generator::{
  ast::{ClientParam, Primitive, ResolvedType},
  model::ParameterLocation,
  naming::identifiers::to_param_ident,
};

pub(super) fn string() -> ResolvedType {
  ResolvedType::Primitive(Primitive::String)
}

pub(super) fn number() -> ResolvedType {
  ResolvedType::Primitive(Primitive::Number)
}

pub(super) fn named(name: &str) -> ResolvedType {
  ResolvedType::Named(name.to_string())
}

pub(super) fn param(name: &str, location: ParameterLocation, required: bool, ty: ResolvedType) -> ClientParam {
  ClientParam::builder()
    .name(name)
    .ident(to_param_ident(name))
    .location(location)
    .required(required)
    .ty(ty)
    .build()
}
