pub mod identifiers;
pub mod operations;
