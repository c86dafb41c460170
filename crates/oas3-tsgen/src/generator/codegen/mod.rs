//! TypeScript emission.
//!
//! Every declaration kind has its own small string-producing function so that each can
//! be checked against literal expected output. [`emit`] only concatenates them.

pub(crate) mod client;
pub(crate) mod example;
pub(crate) mod runtime;
pub(crate) mod types;

#[cfg(test)]
mod tests;

use super::{ast::ClientOperation, converter::NamedType};

pub(crate) const GENERATOR_NAME: &str = env!("CARGO_PKG_NAME");

/// Document-level facts written into the generated module.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct CodeMetadata {
  #[builder(into)]
  pub title: String,
  #[builder(into)]
  pub version: String,
  #[builder(into)]
  pub description: Option<String>,
  /// Where the document came from: a file path or URL.
  #[builder(into)]
  pub source: String,
  #[builder(into)]
  pub class_name: String,
  #[builder(into)]
  pub base_url: String,
}

/// Assembles the complete client module: header, fixed prelude, declared types, client class.
pub(crate) fn emit(metadata: &CodeMetadata, operations: &[ClientOperation], definitions: &[NamedType]) -> String {
  let mut out = file_header(metadata);
  out.push('\n');
  out.push_str(runtime::PRELUDE);

  let declarations = types::emit_declarations(definitions);
  if !declarations.is_empty() {
    out.push('\n');
    out.push_str(&declarations);
  }

  out.push('\n');
  out.push_str(&client::emit_client(&metadata.class_name, &metadata.base_url, operations));
  out
}

pub(crate) fn file_header(metadata: &CodeMetadata) -> String {
  let mut lines = vec![
    "AUTO-GENERATED CODE - DO NOT EDIT!".to_string(),
    String::new(),
    metadata.title.clone(),
    format!("Version: {}", metadata.version),
    format!("Source: {}", metadata.source),
    format!("Generated by {GENERATOR_NAME}"),
  ];
  if let Some(description) = metadata.description.as_deref().filter(|d| !d.trim().is_empty()) {
    lines.push(String::new());
    lines.extend(description.lines().map(str::to_string));
  }
  doc_comment(&lines, "")
}

/// Renders a JSDoc block; blank entries become bare ` *` lines.
pub(crate) fn doc_comment(lines: &[String], indent: &str) -> String {
  let mut out = format!("{indent}/**\n");
  for line in lines {
    let line = escape_comment(line.trim_end());
    if line.is_empty() {
      out.push_str(&format!("{indent} *\n"));
    } else {
      out.push_str(&format!("{indent} * {line}\n"));
    }
  }
  out.push_str(&format!("{indent} */\n"));
  out
}

/// A single-line `/** ... */` comment, or nothing for absent text.
pub(crate) fn inline_doc(text: Option<&str>, indent: &str) -> String {
  let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
    return String::new();
  };
  if text.contains('\n') {
    let lines = text.lines().map(str::to_string).collect::<Vec<_>>();
    return doc_comment(&lines, indent);
  }
  format!("{indent}/** {} */\n", escape_comment(text))
}

fn escape_comment(text: &str) -> String {
  text.replace("*/", "*\\/")
}
