//! Batch Orchestrator - Single Entry Point
//!
//! Walks colors × sizes (color-major), decides favicon/standard per pair,
//! renders each planned image and collects a per-item report. The report
//! order is the emission order and becomes the README row order.

use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::BrandConfig;
use crate::generator::{recolor, save, GeneratorError, ImageGenerator, Rasterizer};
use crate::hashing::{compute_report_hash, sha256_hex};
use crate::readme;
use crate::validation::Validator;
use crate::GENERATOR_VERSION;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("No name for color {0}")]
    MissingColorName(String),

    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Favicon,
    Standard,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannedImage {
    pub color: String,
    pub size: u32,
    pub variant: Variant,
    /// Relative to the output root, without extension
    pub output: PathBuf,
}

impl PlannedImage {
    /// Relative file path as listed in the report, e.g. `logo/favicon/favicon-16.png`
    pub fn file_path(&self, ext: &str) -> String {
        format!("{}.{}", self.output.to_string_lossy().replace('\\', "/"), ext)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ItemStatus {
    Generated { sha256: String },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemOutcome {
    pub image: PlannedImage,
    pub path: String,
    #[serde(flatten)]
    pub status: ItemStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub generator_version: String,
    pub generated_at: DateTime<Utc>,
    pub report_hash: String,
    pub items: Vec<ItemOutcome>,
}

impl BatchReport {
    /// Paths of successfully written files, in emission order
    pub fn generated_files(&self) -> Vec<&str> {
        self.items.iter()
            .filter(|i| matches!(i.status, ItemStatus::Generated { .. }))
            .map(|i| i.path.as_str())
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.items.iter().filter(|i| matches!(i.status, ItemStatus::Failed { .. }))
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Enumerate the outputs for `config`: outer loop colors, inner loop sizes.
/// A pair may yield a favicon, a standard variant, both, or nothing.
pub fn plan(config: &BrandConfig) -> Result<Vec<PlannedImage>, BatchError> {
    let mut planned = vec![];

    for color in &config.colors {
        for &size in &config.sizes {
            if config.is_favicon(color, size) {
                planned.push(PlannedImage {
                    color: color.clone(),
                    size,
                    variant: Variant::Favicon,
                    output: config.favicon_dir.join(format!("{}-{}", config.favicon_prefix, size)),
                });
            }

            if config.is_standard(size) {
                let name = config.color_name(color)
                    .ok_or_else(|| BatchError::MissingColorName(color.clone()))?;
                planned.push(PlannedImage {
                    color: color.clone(),
                    size,
                    variant: Variant::Standard,
                    output: config.standard_dir.join(format!("{}-{}", name, size)),
                });
            }
        }
    }

    debug!("planned {} images", planned.len());
    Ok(planned)
}

/// Runs one full batch against an output root
pub struct BatchOrchestrator {
    config: BrandConfig,
    root: PathBuf,
    validator: Validator,
}

impl BatchOrchestrator {
    pub fn new(config: BrandConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
            validator: Validator::new(),
        }
    }

    /// Source document path under the root
    pub fn source_path(&self) -> PathBuf {
        self.root.join(&self.config.source)
    }

    /// Generate every planned image.
    ///
    /// Config problems, a missing color name or an unreadable source abort
    /// before anything is written. Per-image render/write failures are recorded
    /// in the report and the batch carries on.
    pub fn run<R: Rasterizer>(
        &self,
        generator: &ImageGenerator<R>,
    ) -> Result<BatchReport, BatchError> {
        let validation = self.validator.validate(&self.config);
        if !validation.valid {
            let messages: Vec<_> = validation.errors()
                .map(|v| format!("{}: {}", v.rule, v.message))
                .collect();
            return Err(BatchError::InvalidConfig(messages.join("; ")));
        }
        for v in &validation.violations {
            warn!("{}: {}", v.rule, v.message);
        }

        let planned = plan(&self.config)?;
        let document = generator.load_document()?;

        let ext = &self.config.extension;
        let mut items = Vec::with_capacity(planned.len());
        for image in planned {
            let path = image.file_path(ext);
            let output = self.root.join(&image.output);
            let text = recolor(document, &image.color, &self.config.default_color);
            let result = generator
                .render(&text, image.size, self.config.background.as_deref())
                .and_then(|bytes| save(&bytes, &output, ext).map(|_| sha256_hex(&bytes)));

            let status = match result {
                Ok(sha256) => {
                    info!("generated {}", path);
                    ItemStatus::Generated { sha256 }
                }
                Err(e) => {
                    warn!("failed {}: {}", path, e);
                    ItemStatus::Failed { error: e.to_string() }
                }
            };
            items.push(ItemOutcome { image, path, status });
        }

        let report_hash = compute_report_hash(&items)?;
        Ok(BatchReport {
            generator_version: GENERATOR_VERSION.to_string(),
            generated_at: Utc::now(),
            report_hash,
            items,
        })
    }

    /// Write the README catalogue for the files that made it to disk
    pub fn write_readme(&self, report: &BatchReport) -> io::Result<PathBuf> {
        readme::write_readme(&self.root, &report.generated_files(), &self.config.readme)
    }
}
