use super::inline_doc;
use crate::generator::{ast::ResolvedType, converter::NamedType};

/// All named declarations, separated by blank lines, in the given order.
pub(crate) fn emit_declarations(definitions: &[NamedType]) -> String {
  definitions
    .iter()
    .map(emit_declaration)
    .collect::<Vec<_>>()
    .join("\n")
}

/// An `interface` for objects with declared fields, a `type` alias for everything else.
pub(crate) fn emit_declaration(definition: &NamedType) -> String {
  let doc = inline_doc(definition.description.as_deref(), "");

  match &definition.ty {
    ResolvedType::Object(object) if !object.fields.is_empty() => {
      let mut out = format!("{doc}export interface {} {{\n", definition.name);
      for field in &object.fields {
        out.push_str(&inline_doc(field.description.as_deref(), "  "));
        out.push_str(&format!("  {field};\n"));
      }
      if let Some(index) = object.index_value_type() {
        out.push_str(&format!("  [key: string]: {index};\n"));
      }
      out.push_str("}\n");
      out
    }
    ty => format!("{doc}export type {} = {ty};\n", definition.name),
  }
}
