pub mod refs;
pub mod spec;
pub mod url_spec;

pub(crate) use refs::parse_schema_ref_path;
