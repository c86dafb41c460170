use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-tsgen")]
#[command(author, version, about = "OpenAPI to TypeScript API client generator")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from OpenAPI specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate a TypeScript client from OpenAPI specification
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// OpenAPI JSON or YAML file, or an http(s) request URL to derive a single endpoint from
  #[arg(short, long, value_name = "FILE|URL")]
  pub input: String,

  /// Directory the generated files are written to
  #[arg(short, long, value_name = "DIR", default_value = ".")]
  pub output: PathBuf,

  /// File name of the client module (default: kebab-case class name with `.ts`)
  #[arg(long, value_name = "NAME")]
  pub file_name: Option<String>,

  /// Name of the generated client class (default: derived from `info.title`)
  #[arg(long, value_name = "NAME")]
  pub class_name: Option<String>,

  /// Also write a usage example next to the client module
  #[arg(long, default_value_t = false)]
  pub example: bool,

  /// API key embedded in the usage example instead of reading `API_KEY` from the environment
  #[arg(long, value_name = "KEY")]
  pub api_key: Option<String>,

  /// Include only specific operations for generation (comma-separated operation IDs)
  #[arg(long, value_name = "IDS", value_delimiter = ',')]
  pub only: Option<Vec<String>>,

  /// Exclude specific operations from generation (comma-separated operation IDs)
  #[arg(long, value_name = "IDS", value_delimiter = ',')]
  pub exclude: Option<Vec<String>>,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations defined in the OpenAPI specification
  Operations {
    /// OpenAPI JSON or YAML file, or an http(s) request URL
    #[arg(short, long, value_name = "FILE|URL")]
    input: String,
  },
}
