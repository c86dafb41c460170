pub mod ast;
pub mod codegen;
pub mod converter;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod naming;
pub mod operation_registry;
pub mod orchestrator;
pub mod schema_registry;

#[cfg(test)]
mod tests;
