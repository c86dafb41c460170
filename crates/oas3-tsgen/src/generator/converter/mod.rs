pub(crate) mod cache;
pub(crate) mod operations;
pub(crate) mod type_resolver;

pub(crate) use cache::{NamedType, TypeCache};
pub(crate) use operations::OperationConverter;
pub(crate) use type_resolver::TypeSynthesizer;

/// Response keys accepted as the success response when no numeric 2xx code is declared.
pub(crate) const SUCCESS_WILDCARDS: [&str; 2] = ["2XX", "2xx"];

#[cfg(test)]
mod tests;
