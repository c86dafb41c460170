use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use crossterm::style::Stylize;

use crate::{
  generator::{naming::identifiers::to_method_name, operation_registry::OperationRegistry},
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::spec::SpecLoader,
};

/// Prints every operation the generator would emit, in emission order.
pub async fn list_operations(input: &str, colors: &Colors) -> anyhow::Result<()> {
  let spec = SpecLoader::open(input).await?.parse()?;
  let registry = OperationRegistry::new(&spec);

  if registry.is_empty() {
    println!("{}", "No operations found.".with(colors.info()));
    return Ok(());
  }

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  row.add_cell(Cell::new("OPERATION ID").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("CLIENT METHOD").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("METHOD").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("PATH").fg(IntoComfyColor::into(colors.label())));
  table.set_header(row);

  for endpoint in registry.endpoints() {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(&endpoint.operation_id)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(to_method_name(&endpoint.operation_id)).fg(IntoComfyColor::into(colors.info())));
    row.add_cell(
      Cell::new(endpoint.method)
        .fg(IntoComfyColor::into(colors.method(endpoint.method)))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(&endpoint.path).fg(IntoComfyColor::into(colors.primary())));
    table.add_row(row);
  }

  println!("{table}");
  println!(
    "\n{} {}",
    registry.len().to_string().with(colors.value()),
    "operation(s)".with(colors.info())
  );

  for warning in registry.warnings() {
    eprintln!("{} {warning}", "warning:".with(colors.accent()));
  }

  Ok(())
}
