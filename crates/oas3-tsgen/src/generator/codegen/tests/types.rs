use super::{named, number, string};
use crate::generator::{
  ast::{Field, Literal, ObjectType, ResolvedType},
  codegen::types::{emit_declaration, emit_declarations},
  converter::NamedType,
};

fn named_type(name: &str, description: Option<&str>, ty: ResolvedType) -> NamedType {
  NamedType {
    name: name.to_string(),
    schema_name: name.to_string(),
    description: description.map(str::to_string),
    ty,
  }
}

fn pet() -> NamedType {
  named_type(
    "Pet",
    Some("A pet for sale"),
    ResolvedType::Object(ObjectType {
      fields: vec![
        Field::builder()
          .name("name")
          .ty(string())
          .required(true)
          .description("Display name")
          .build(),
        Field::builder().name("tag").ty(string()).build(),
        Field::builder().name("owner-id").ty(number()).build(),
      ],
      additional: None,
    }),
  )
}

#[test]
fn test_object_with_fields_becomes_interface() {
  let expected = r#"/** A pet for sale */
export interface Pet {
  /** Display name */
  name: string;
  tag?: string;
  "owner-id"?: number;
}
"#;
  assert_eq!(emit_declaration(&pet()), expected);
}

#[test]
fn test_interface_keeps_index_signature() {
  let definition = named_type(
    "Labels",
    None,
    ResolvedType::Object(ObjectType {
      fields: vec![Field::builder().name("id").ty(string()).required(true).build()],
      additional: Some(Box::new(number())),
    }),
  );
  let expected = "export interface Labels {\n  id: string;\n  [key: string]: unknown;\n}\n";
  assert_eq!(emit_declaration(&definition), expected);
}

#[test]
fn test_other_shapes_become_type_aliases() {
  let cases = [
    (
      named_type(
        "Status",
        None,
        ResolvedType::Literals(vec![
          Literal::String("available".to_string()),
          Literal::String("sold".to_string()),
        ]),
      ),
      "export type Status = \"available\" | \"sold\";\n",
    ),
    (
      named_type("Metadata", None, ResolvedType::Object(ObjectType::open_record())),
      "export type Metadata = Record<string, unknown>;\n",
    ),
    (
      named_type("Pets", Some("Many pets"), ResolvedType::array_of(named("Pet"))),
      "/** Many pets */\nexport type Pets = Pet[];\n",
    ),
    (
      named_type("MaybeName", None, ResolvedType::nullable(string())),
      "export type MaybeName = string | null;\n",
    ),
    (
      named_type("Anything", None, ResolvedType::Unknown),
      "export type Anything = unknown;\n",
    ),
  ];
  for (definition, expected) in cases {
    assert_eq!(
      emit_declaration(&definition),
      expected,
      "failed for input {:?}",
      definition.name
    );
  }
}

#[test]
fn test_multiline_description_uses_block_comment() {
  let definition = named_type("Note", Some("First line\nSecond */ line"), string());
  let expected = "/**\n * First line\n * Second *\\/ line\n */\nexport type Note = string;\n";
  assert_eq!(emit_declaration(&definition), expected);
}

#[test]
fn test_declarations_are_separated_by_blank_lines() {
  let definitions = [
    named_type("A", None, string()),
    named_type("B", None, number()),
  ];
  assert_eq!(
    emit_declarations(&definitions),
    "export type A = string;\n\nexport type B = number;\n"
  );
  assert_eq!(emit_declarations(&[]), "");
}
