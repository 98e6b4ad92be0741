//! Validation System - Rule/Policy Separation
//!
//! Rules produce structured violations against a `BrandConfig`.
//! Any `Error` violation makes the config unusable for a batch.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::color;
use crate::config::BrandConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub remediation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity == ViolationSeverity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationViolation> {
        self.violations
            .iter()
            .filter(|v| v.severity == ViolationSeverity::Error)
    }
}

/// Validation rule trait - produces violations
pub trait ConfigRule {
    fn name(&self) -> &'static str;
    fn validate(&self, config: &BrandConfig) -> Vec<ValidationViolation>;
}

// --- Concrete Rules ---

/// Every color that emits a standard variant needs a semantic name
pub struct ColorNamesRule;

impl ConfigRule for ColorNamesRule {
    fn name(&self) -> &'static str { "color_names" }

    fn validate(&self, config: &BrandConfig) -> Vec<ValidationViolation> {
        if !config.sizes.iter().any(|&s| config.is_standard(s)) {
            return vec![];
        }

        config.colors.iter()
            .filter(|c| config.color_name(c).is_none())
            .map(|c| ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Error,
                message: format!("Color {} has no name for standard output", c),
                expected: Some("entry in colorNames".to_string()),
                actual: Some(c.clone()),
                remediation: vec![format!("Add \"{}\" to colorNames", c)],
            })
            .collect()
    }
}

pub struct SizesRule;

impl ConfigRule for SizesRule {
    fn name(&self) -> &'static str { "sizes" }

    fn validate(&self, config: &BrandConfig) -> Vec<ValidationViolation> {
        let mut violations = vec![];

        if config.sizes.contains(&0) {
            violations.push(ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Error,
                message: "Sizes must be positive".to_string(),
                expected: Some("width >= 1".to_string()),
                actual: Some("0".to_string()),
                remediation: vec!["Remove 0 from sizes".to_string()],
            });
        }

        let mut seen = HashSet::new();
        for size in &config.sizes {
            if !seen.insert(size) {
                violations.push(ValidationViolation {
                    rule: self.name().to_string(),
                    severity: ViolationSeverity::Warning,
                    message: format!("Size {} listed more than once", size),
                    expected: None,
                    actual: Some(size.to_string()),
                    remediation: vec!["Duplicate sizes overwrite the same file".to_string()],
                });
            }
        }

        violations
    }
}

pub struct PrimaryColorRule;

impl ConfigRule for PrimaryColorRule {
    fn name(&self) -> &'static str { "primary_color" }

    fn validate(&self, config: &BrandConfig) -> Vec<ValidationViolation> {
        if config.colors.contains(&config.primary_color) {
            return vec![];
        }
        vec![ValidationViolation {
            rule: self.name().to_string(),
            severity: ViolationSeverity::Warning,
            message: "Primary color not in palette, no favicons will be emitted".to_string(),
            expected: Some(config.primary_color.clone()),
            actual: Some(config.colors.join(", ")),
            remediation: vec!["Add the primary color to colors".to_string()],
        }]
    }
}

pub struct ThresholdsRule;

impl ConfigRule for ThresholdsRule {
    fn name(&self) -> &'static str { "thresholds" }

    fn validate(&self, config: &BrandConfig) -> Vec<ValidationViolation> {
        if config.favicon_max_size < config.standard_min_size {
            return vec![];
        }
        vec![ValidationViolation {
            rule: self.name().to_string(),
            severity: ViolationSeverity::Warning,
            message: "Favicon and standard size ranges overlap".to_string(),
            expected: Some(format!("faviconMaxSize < {}", config.standard_min_size)),
            actual: Some(config.favicon_max_size.to_string()),
            remediation: vec!["Lower faviconMaxSize or raise standardMinSize".to_string()],
        }]
    }
}

/// The background is composited as a fill, so it must be a hex token.
/// Palette colors are substituted as literal text and may be any string.
pub struct BackgroundColorRule;

impl ConfigRule for BackgroundColorRule {
    fn name(&self) -> &'static str { "background" }

    fn validate(&self, config: &BrandConfig) -> Vec<ValidationViolation> {
        match &config.background {
            Some(bg) if color::parse_hex(bg).is_none() => vec![ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Error,
                message: "Background is not a hex color".to_string(),
                expected: Some("#RGB, #RGBA, #RRGGBB or #RRGGBBAA".to_string()),
                actual: Some(bg.clone()),
                remediation: vec![format!("Replace \"{}\" with a hex token", bg)],
            }],
            _ => vec![],
        }
    }
}

/// Validator runs every rule and folds the outcome
pub struct Validator {
    rules: Vec<Box<dyn ConfigRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(ColorNamesRule),
                Box::new(SizesRule),
                Box::new(PrimaryColorRule),
                Box::new(ThresholdsRule),
                Box::new(BackgroundColorRule),
            ],
        }
    }

    pub fn validate(&self, config: &BrandConfig) -> ValidationResult {
        let violations: Vec<_> = self.rules.iter()
            .flat_map(|rule| rule.validate(config))
            .collect();

        let valid = !violations.iter().any(|v| v.severity == ViolationSeverity::Error);
        ValidationResult { valid, violations }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
