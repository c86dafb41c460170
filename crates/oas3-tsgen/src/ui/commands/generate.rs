use std::{
  collections::HashSet,
  path::{Path, PathBuf},
};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{
    metrics::GenerationStats,
    model::Spec,
    orchestrator::{GenerateOptions, GeneratedOutput, Orchestrator},
  },
  ui::{Colors, GenerateCommand},
  utils::spec::SpecLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: String,
  pub output: PathBuf,
  pub file_name: Option<String>,
  pub class_name: Option<String>,
  pub include_example: bool,
  pub api_key: Option<String>,
  pub only_operations: Option<HashSet<String>>,
  pub excluded_operations: Option<HashSet<String>>,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      file_name,
      class_name,
      example,
      api_key,
      only,
      exclude,
      verbose,
      quiet,
    } = command;

    if api_key.is_some() && !example {
      anyhow::bail!("--api-key is only used by the usage example; add --example");
    }
    if verbose && quiet {
      anyhow::bail!("--verbose and --quiet cannot be combined");
    }
    if let Some(name) = &file_name
      && (name.trim().is_empty() || name.contains(['/', '\\']))
    {
      anyhow::bail!("Invalid file name '{name}': expected a bare file name, use -o for the directory");
    }

    Ok(Self {
      input,
      output,
      file_name,
      class_name,
      include_example: example,
      api_key,
      only_operations: only.map(|ops| ops.into_iter().collect()),
      excluded_operations: exclude.map(|ops| ops.into_iter().collect()),
      verbose,
      quiet,
    })
  }

  #[must_use]
  pub fn generate_options(&self) -> GenerateOptions {
    GenerateOptions::builder()
      .include_example(self.include_example)
      .maybe_api_key(self.api_key.clone())
      .maybe_output_file_name(self.file_name.clone())
      .maybe_class_name(self.class_name.clone())
      .maybe_only_operations(self.only_operations.clone())
      .maybe_excluded_operations(self.excluded_operations.clone())
      .build()
  }

  async fn load_spec(&self) -> anyhow::Result<Spec> {
    SpecLoader::open(&self.input).await?.parse()
  }

  async fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await?;
    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI spec from: {}", self.config.input)
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self) {
    self.info(&"Generating TypeScript client...".with(self.colors.primary()).to_string());
  }

  fn print_summary(&self, output: &GeneratedOutput) {
    if self.config.quiet {
      return;
    }

    self.stat("Client class:", output.class_name.clone());
    self.stat("Base URL:", output.base_url.clone());
    self.print_statistics(&output.stats);

    if self.config.verbose {
      println!();
      for endpoint in &output.endpoints {
        println!(
          "            {:>7} {} {}",
          endpoint.method.to_string().with(self.colors.method(endpoint.method)),
          endpoint.path.as_str().with(self.colors.primary()),
          format!("({})", endpoint.operation_id).with(self.colors.info())
        );
      }
    }
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    self.stat("Endpoints extracted:", stats.endpoints_extracted.to_string());
    self.stat("Types generated:", stats.types_generated.to_string());
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }
    self.print_cycles(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  /// Skipped items always print; the remaining warnings only with `--verbose`.
  fn print_warnings(&self, stats: &GenerationStats) {
    let warnings = if self.config.verbose {
      stats.warnings.iter().collect::<Vec<_>>()
    } else {
      stats.skipped_items().collect::<Vec<_>>()
    };
    if warnings.is_empty() {
      return;
    }

    println!();
    for warning in warnings {
      let tag = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        tag.with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self, path: &Path) {
    self.info(
      &format!("Writing to: {}", path.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self, class_name: &str) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        format!("Successfully generated {class_name}").with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let spec = config.load_spec().await?;

  logger.log_generating();
  let output = Orchestrator::new(spec, config.generate_options()).generate(&config.input)?;
  logger.print_summary(&output);

  let client_path = config.output.join(&output.file_name);
  logger.log_writing(&client_path);
  GenerateConfig::write_file(&client_path, &output.source).await?;

  if let Some(example) = &output.example {
    let example_path = config.output.join(output.example_file_name());
    logger.log_writing(&example_path);
    GenerateConfig::write_file(&example_path, example).await?;
  }

  logger.log_success(&output.class_name);
  Ok(())
}
