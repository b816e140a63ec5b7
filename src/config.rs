//! Detection options.

use crate::apted::AptedCosts;
use crate::core::errors::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: f64 = 0.87;

/// Options controlling eligibility filtering and scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorOptions {
    /// Methods shorter than this many lines are ignored.
    #[serde(default = "default_min_lines")]
    pub min_lines: usize,
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
    /// Minimum subtree size of a method's root.
    #[serde(default)]
    pub min_tokens: usize,
    /// Apply the size-ratio floor and short-function penalty.
    #[serde(default = "default_true")]
    pub size_penalty: bool,
    /// Only methods whose full name matches are compared.
    #[serde(default)]
    pub include_method_pattern: Option<String>,
    #[serde(default)]
    pub apted: AptedCosts,
}

fn default_min_lines() -> usize {
    5
}

fn default_max_lines() -> usize {
    usize::MAX
}

fn default_true() -> bool {
    true
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            min_lines: default_min_lines(),
            max_lines: default_max_lines(),
            min_tokens: 0,
            size_penalty: true,
            include_method_pattern: None,
            apted: AptedCosts::default(),
        }
    }
}

impl DetectorOptions {
    pub fn validate(&self) -> Result<()> {
        if self.min_lines > self.max_lines {
            return Err(Error::configuration(format!(
                "min-lines ({}) exceeds max-lines ({})",
                self.min_lines, self.max_lines
            )));
        }
        for (name, value) in [
            ("rename-cost", self.apted.rename_cost),
            ("delete-cost", self.apted.delete_cost),
            ("insert-cost", self.apted.insert_cost),
            ("kind-distance-weight", self.apted.kind_distance_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::configuration(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(Error::configuration(format!(
            "threshold must be within [0, 1], got {threshold}"
        )));
    }
    Ok(())
}
