use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::generator::naming::identifiers::quote_property_key;

/// TypeScript primitive kinds. `integer` and `number` both land on `Number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
  String,
  Number,
  Boolean,
}

impl Primitive {
  #[must_use]
  pub const fn as_ts(self) -> &'static str {
    match self {
      Self::String => "string",
      Self::Number => "number",
      Self::Boolean => "boolean",
    }
  }
}

/// A single member of a literal union produced from an `enum`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
  String(String),
  Number(serde_json::Number),
  Bool(bool),
}

impl Literal {
  /// Converts a JSON enum value; `null`, arrays and objects have no literal form.
  #[must_use]
  pub fn from_json(value: &serde_json::Value) -> Option<Self> {
    match value {
      serde_json::Value::String(s) => Some(Self::String(s.clone())),
      serde_json::Value::Number(n) => Some(Self::Number(n.clone())),
      serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
      _ => None,
    }
  }
}

impl Display for Literal {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Self::String(s) => write!(f, "{}", serde_json::Value::String(s.clone())),
      Self::Number(n) => write!(f, "{n}"),
      Self::Bool(b) => write!(f, "{b}"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct Field {
  #[builder(into)]
  pub name: String,
  pub ty: ResolvedType,
  #[builder(default)]
  pub required: bool,
  #[builder(into)]
  pub description: Option<String>,
}

impl Display for Field {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let marker = if self.required { "" } else { "?" };
    write!(f, "{}{marker}: {}", quote_property_key(&self.name), self.ty)
  }
}

/// Declared fields plus an optional index-signature fallback for extra keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectType {
  pub fields: Vec<Field>,
  pub additional: Option<Box<ResolvedType>>,
}

impl ObjectType {
  /// An object with no declared shape, accepting any string key.
  #[must_use]
  pub fn open_record() -> Self {
    Self {
      fields: vec![],
      additional: Some(Box::new(ResolvedType::Unknown)),
    }
  }

  /// The value type of the index signature.
  ///
  /// TypeScript requires every declared property to be assignable to the index
  /// signature, so alongside declared fields the signature widens to `unknown`.
  #[must_use]
  pub fn index_value_type(&self) -> Option<ResolvedType> {
    let additional = self.additional.as_deref()?;
    if self.fields.is_empty() {
      Some(additional.clone())
    } else {
      Some(ResolvedType::Unknown)
    }
  }
}

impl Display for ObjectType {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    if self.fields.is_empty() {
      let value = self.index_value_type().unwrap_or(ResolvedType::Unknown);
      return write!(f, "Record<string, {value}>");
    }

    let mut members = self.fields.iter().map(ToString::to_string).collect::<Vec<_>>();
    if let Some(value) = self.index_value_type() {
      members.push(format!("[key: string]: {value}"));
    }
    write!(f, "{{ {} }}", members.join("; "))
  }
}

/// The synthesized type of a schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedType {
  Primitive(Primitive),
  Literals(Vec<Literal>),
  Array(Box<ResolvedType>),
  Object(ObjectType),
  /// A declared type, by its emitted name.
  Named(String),
  Nullable(Box<ResolvedType>),
  Unknown,
}

impl ResolvedType {
  #[must_use]
  pub fn array_of(item: Self) -> Self {
    Self::Array(Box::new(item))
  }

  #[must_use]
  pub fn nullable(inner: Self) -> Self {
    match inner {
      Self::Nullable(_) | Self::Unknown => inner,
      other => Self::Nullable(Box::new(other)),
    }
  }

  /// Whether the rendered form contains a top-level `|` and needs parentheses as an array element.
  fn is_union(&self) -> bool {
    match self {
      Self::Literals(literals) => literals.len() > 1,
      Self::Nullable(_) => true,
      _ => false,
    }
  }
}

impl Display for ResolvedType {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Self::Primitive(primitive) => f.write_str(primitive.as_ts()),
      Self::Literals(literals) if literals.is_empty() => f.write_str("never"),
      Self::Literals(literals) => write!(f, "{}", literals.iter().join(" | ")),
      Self::Array(item) if item.is_union() => write!(f, "({item})[]"),
      Self::Array(item) => write!(f, "{item}[]"),
      Self::Object(object) => write!(f, "{object}"),
      Self::Named(name) => f.write_str(name),
      Self::Nullable(inner) => write!(f, "{inner} | null"),
      Self::Unknown => f.write_str("unknown"),
    }
  }
}
