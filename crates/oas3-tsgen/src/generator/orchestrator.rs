//! Orchestration for the OpenAPI to TypeScript client pipeline.
//!
//! [`Orchestrator`] is the one entry point front ends need: hand it a parsed [`Spec`]
//! and a [`GenerateOptions`] bag, call [`Orchestrator::generate`], and write the strings
//! in the returned [`GeneratedOutput`] wherever they belong. No I/O happens in here.
//!
//! ## Usage
//!
//! ```no_run
//! # fn example() -> anyhow::Result<()> {
//! let text = std::fs::read_to_string("petstore.json")?;
//! let spec = Spec::from_json(&text)?;
//!
//! let options = GenerateOptions::builder().include_example(true).build();
//! let output = Orchestrator::new(spec, options).generate("petstore.json")?;
//!
//! std::fs::write(&output.file_name, &output.source)?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;

use inflections::Inflect;

use super::{
  ast::Endpoint,
  codegen::{self, CodeMetadata, example},
  converter::{OperationConverter, TypeSynthesizer},
  errors::GenerateError,
  metrics::GenerationStats,
  model::Spec,
  naming::{
    identifiers::{to_class_name, to_type_name},
    operations::assign_method_names,
  },
  operation_registry::{OperationFilter, OperationRegistry},
  schema_registry::SchemaRegistry,
};

const SOURCE_EXTENSION: &str = ".ts";
const EXAMPLE_EXTENSION: &str = ".example.ts";

/// Options shared by every front end.
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct GenerateOptions {
  /// Also produce a usage script for the generated client.
  #[builder(default)]
  pub include_example: bool,
  /// Key baked into the usage script; it reads `process.env.API_KEY` otherwise.
  #[builder(into)]
  pub api_key: Option<String>,
  /// File name for the client module; derived from the class name when absent.
  #[builder(into)]
  pub output_file_name: Option<String>,
  /// Overrides the class name derived from `info.title`.
  #[builder(into)]
  pub class_name: Option<String>,
  pub only_operations: Option<HashSet<String>>,
  pub excluded_operations: Option<HashSet<String>>,
}

/// Everything one generation run produced.
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
  pub class_name: String,
  /// The complete client module.
  pub source: String,
  pub endpoints: Vec<Endpoint>,
  pub base_url: String,
  pub file_name: String,
  /// Usage script, when requested.
  pub example: Option<String>,
  pub stats: GenerationStats,
}

impl GeneratedOutput {
  /// Name of the usage script, next to the client module: `petstore-client.example.ts`.
  #[must_use]
  pub fn example_file_name(&self) -> String {
    format!("{}{EXAMPLE_EXTENSION}", module_stem(&self.file_name))
  }
}

/// Runs the generation pipeline for one document.
///
/// Each [`Orchestrator::generate`] call owns all of its intermediate state, so one
/// orchestrator can be shared by reference across threads.
#[derive(Debug, Clone)]
pub struct Orchestrator {
  spec: Spec,
  options: GenerateOptions,
}

impl Orchestrator {
  #[must_use]
  pub fn new(spec: Spec, options: GenerateOptions) -> Self {
    Self { spec, options }
  }

  /// The client class name: the configured override, else one derived from `info.title`.
  #[must_use]
  pub fn class_name(&self) -> String {
    match self.options.class_name.as_deref().map(str::trim) {
      Some(name) if !name.is_empty() => to_type_name(name),
      _ => to_class_name(&self.spec.info.title),
    }
  }

  /// The client module file name, always ending in `.ts`.
  #[must_use]
  pub fn file_name(&self, class_name: &str) -> String {
    match self.options.output_file_name.as_deref().map(str::trim) {
      Some(name) if name.ends_with(SOURCE_EXTENSION) => name.to_string(),
      Some(name) if !name.is_empty() => format!("{name}{SOURCE_EXTENSION}"),
      _ => format!("{}{SOURCE_EXTENSION}", class_name.to_kebab_case()),
    }
  }

  /// Document-level facts for the file header.
  #[must_use]
  pub fn metadata(&self, source: &str) -> CodeMetadata {
    let info = &self.spec.info;
    CodeMetadata::builder()
      .title(if info.title.trim().is_empty() {
        "Untitled API"
      } else {
        info.title.as_str()
      })
      .version(&info.version)
      .maybe_description(info.description.as_deref())
      .source(source)
      .class_name(self.class_name())
      .base_url(self.spec.base_url())
      .build()
  }

  /// Generates the client module and, if requested, its usage example.
  ///
  /// `source` names where the document came from; it only appears in the file header.
  ///
  /// The pipeline:
  /// 1. Builds the schema dependency graph and records its cycles
  /// 2. Extracts endpoints, honoring the operation filters
  /// 3. Assigns method names, failing on collisions
  /// 4. Synthesizes parameter, body and response types
  /// 5. Emits the module text
  pub fn generate(&self, source: &str) -> Result<GeneratedOutput, GenerateError> {
    if self.spec.paths.is_none() {
      return Err(GenerateError::MissingPaths);
    }

    let mut stats = GenerationStats::default();

    let mut registry = SchemaRegistry::new(&self.spec);
    registry.build_dependencies();
    stats.record_cycles(registry.detect_cycles());

    let filter = OperationFilter::new(
      self.options.only_operations.as_ref(),
      self.options.excluded_operations.as_ref(),
    );
    let (endpoints, extraction_warnings) = OperationRegistry::with_filter(&self.spec, &filter).into_parts();
    stats.record_endpoints(&endpoints);
    stats.record_warnings(extraction_warnings);

    let method_names = assign_method_names(&endpoints)?;

    let class_name = self.class_name();
    let mut synthesizer = TypeSynthesizer::with_reserved_names(&registry, &[class_name.as_str()]);
    let operations = {
      let mut converter = OperationConverter::new(&mut synthesizer);
      endpoints
        .iter()
        .zip(&method_names)
        .map(|(endpoint, method_name)| converter.convert(endpoint, method_name))
        .collect::<Vec<_>>()
    };
    let (definitions, type_warnings) = synthesizer.into_cache().into_parts();
    stats.record_types(definitions.len());
    stats.record_warnings(type_warnings);

    let metadata = self.metadata(source);
    let file_name = self.file_name(&metadata.class_name);
    let code = codegen::emit(&metadata, &operations, &definitions);

    let example = self.options.include_example.then(|| {
      example::emit_example(
        &metadata.class_name,
        &format!("./{}", module_stem(&file_name)),
        self.options.api_key.as_deref(),
        &operations,
      )
    });

    Ok(GeneratedOutput {
      class_name: metadata.class_name,
      source: code,
      endpoints,
      base_url: metadata.base_url,
      file_name,
      example,
      stats,
    })
  }
}

fn module_stem(file_name: &str) -> &str {
  file_name.strip_suffix(SOURCE_EXTENSION).unwrap_or(file_name)
}
