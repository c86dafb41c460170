use super::{ast::Endpoint, errors::GenerationWarning};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub endpoints_extracted: usize,
  pub types_generated: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_endpoints(&mut self, endpoints: &[Endpoint]) {
    self.endpoints_extracted += endpoints.len();
  }

  pub fn record_types(&mut self, count: usize) {
    self.types_generated += count;
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }

  /// Warnings that mean part of the document is missing from the client.
  pub fn skipped_items(&self) -> impl Iterator<Item = &GenerationWarning> {
    self.warnings.iter().filter(|warning| warning.is_skipped_item())
  }
}
