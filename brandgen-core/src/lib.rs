//! Brand Asset Generator
//!
//! One SVG logo in, a palette × size matrix of PNGs out, plus a README
//! catalogue of everything written.
//!
//! ```text
//! BrandConfig -> plan -> ImageGenerator (recolor, rasterize, save) -> BatchReport -> README.md
//! ```

pub mod config;
pub mod validation;
pub mod color;
pub mod generator;
pub mod batch;
pub mod readme;
pub mod hashing;

pub use config::{BrandConfig, ConfigError, ReadmeConfig};
pub use validation::{ConfigRule, ValidationResult, ValidationViolation, Validator, ViolationSeverity};
pub use generator::{recolor, GeneratorError, ImageGenerator, Rasterizer, RenderError, ResvgRasterizer};
pub use batch::{plan, BatchError, BatchOrchestrator, BatchReport, ItemOutcome, ItemStatus, PlannedImage, Variant};
pub use readme::{render_readme, write_readme};
pub use hashing::{canonical_json, compute_report_hash, sha256_hex};

pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");
