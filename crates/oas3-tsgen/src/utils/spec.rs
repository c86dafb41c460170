use std::{ffi::OsStr, path::Path};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

use super::url_spec;
use crate::generator::model::Spec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext.to_ascii_lowercase().as_str() {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }
}

enum SpecInput {
  Url(String),
  File { file: AsyncMmapFile, format: SpecFormat },
}

/// Resolves the `--input` locator into a document: a request URL or a file on disk.
pub struct SpecLoader {
  input: SpecInput,
}

impl SpecLoader {
  pub async fn open(input: &str) -> anyhow::Result<Self> {
    if url_spec::is_spec_url(input) {
      return Ok(Self {
        input: SpecInput::Url(input.to_string()),
      });
    }

    let path = Path::new(input);
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("Failed to read OpenAPI spec '{}'", path.display()))?;

    Ok(Self {
      input: SpecInput::File {
        file,
        format: SpecFormat::from_path(path),
      },
    })
  }

  pub fn parse(&self) -> anyhow::Result<Spec> {
    match &self.input {
      SpecInput::Url(url) => Ok(url_spec::spec_from_url(url)?),
      SpecInput::File { file, format } => {
        let content = std::str::from_utf8(file.as_slice()).context("OpenAPI spec is not valid UTF-8")?;
        match format {
          SpecFormat::Json => Ok(Spec::from_json(content)?),
          SpecFormat::Yaml => Ok(Spec::from_yaml(content)?),
        }
      }
    }
  }
}
