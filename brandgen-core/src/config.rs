//! Brand Configuration - Palette, Sizes and Output Layout
//!
//! Everything the batch needs is carried here and passed in explicitly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Invalid config {0}: {1}")]
    Parse(PathBuf, #[source] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandConfig {
    /// Source SVG, relative to the output root
    pub source: PathBuf,
    /// Fill literal present in the source document
    pub default_color: String,
    pub primary_color: String,
    /// Palette in emission order
    pub colors: Vec<String>,
    pub color_names: HashMap<String, String>,
    /// Widths in emission order
    pub sizes: Vec<u32>,
    pub favicon_max_size: u32,
    pub standard_min_size: u32,
    pub favicon_dir: PathBuf,
    pub favicon_prefix: String,
    pub standard_dir: PathBuf,
    pub extension: String,
    pub background: Option<String>,
    pub readme: ReadmeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadmeConfig {
    pub base_url: String,
    pub file_name: String,
}

impl Default for ReadmeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://github.com/unexpo-poz/brand/blob/main/logo/icon/".to_string(),
            file_name: "README.md".to_string(),
        }
    }
}

impl Default for BrandConfig {
    fn default() -> Self {
        let color_names = [
            ("#FFF", "white"),
            ("#000", "black"),
            ("#0063BE", "primary"),
            ("#3E78B2", "secondary"),
            ("#454647", "dark"),
            ("#EBEBEB", "light"),
        ]
        .into_iter()
        .map(|(c, n)| (c.to_string(), n.to_string()))
        .collect();

        Self {
            source: PathBuf::from("logo/asset-svg/logo.svg"),
            default_color: "#0063be".to_string(),
            primary_color: "#0063BE".to_string(),
            colors: ["#454647", "#EBEBEB", "#FFF", "#000", "#0063BE", "#3E78B2"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            color_names,
            sizes: vec![16, 32, 64, 100, 128, 512, 1024, 2048],
            favicon_max_size: 128,
            standard_min_size: 512,
            favicon_dir: PathBuf::from("logo/favicon"),
            favicon_prefix: "favicon".to_string(),
            standard_dir: PathBuf::from("logo/standar"),
            extension: "png".to_string(),
            background: None,
            readme: ReadmeConfig::default(),
        }
    }
}

impl BrandConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Semantic name for a palette color, e.g. `#0063BE` -> `primary`
    pub fn color_name(&self, color: &str) -> Option<&str> {
        self.color_names.get(color).map(String::as_str)
    }

    pub fn is_favicon(&self, color: &str, size: u32) -> bool {
        size <= self.favicon_max_size && color == self.primary_color
    }

    pub fn is_standard(&self, size: u32) -> bool {
        size >= self.standard_min_size
    }
}
