//! Threshold evaluation.
//!
//! Classifies a metric value against a warning/critical pair. Bounds are
//! inclusive on the worse side: a value sitting exactly on a bound takes the
//! worse classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MotdError, Result};

/// Severity tier assigned to a metric value
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    #[default]
    Ok,
    Unknown,
    Warning,
    Critical,
}

impl Classification {
    /// Worst classification of a set, `Ok` when empty
    pub fn worst<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Classification>,
    {
        items.into_iter().max().unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Classification::Ok => "OK",
            Classification::Unknown => "UNKNOWN",
            Classification::Warning => "WARNING",
            Classification::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which way a metric gets worse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Percent used, load
    HigherIsWorse,
    /// Free space
    LowerIsWorse,
}

/// Warning/critical bounds for one metric family
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub warning: f64,
    pub critical: f64,
    pub direction: Direction,
}

impl Thresholds {
    pub const fn higher_is_worse(warning: f64, critical: f64) -> Self {
        Self {
            warning,
            critical,
            direction: Direction::HigherIsWorse,
        }
    }

    pub const fn lower_is_worse(warning: f64, critical: f64) -> Self {
        Self {
            warning,
            critical,
            direction: Direction::LowerIsWorse,
        }
    }

    /// Reject non-finite bounds and pairs where warning is not strictly on
    /// the better side of critical.
    pub fn validate(&self, section: &str) -> Result<()> {
        for (key, value) in [("warning", self.warning), ("critical", self.critical)] {
            if !value.is_finite() {
                return Err(MotdError::invalid_threshold(
                    section,
                    key,
                    format!("{} is not a finite number", value),
                ));
            }
        }

        let ordered = match self.direction {
            Direction::HigherIsWorse => self.warning < self.critical,
            Direction::LowerIsWorse => self.warning > self.critical,
        };

        if !ordered {
            let expected = match self.direction {
                Direction::HigherIsWorse => "lower",
                Direction::LowerIsWorse => "higher",
            };
            return Err(MotdError::invalid_threshold(
                section,
                "warning",
                format!(
                    "warning ({}) must be {} than critical ({})",
                    self.warning, expected, self.critical
                ),
            ));
        }

        Ok(())
    }

    /// Multiply both bounds, used for per-CPU load thresholds
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            warning: self.warning * factor,
            critical: self.critical * factor,
            direction: self.direction,
        }
    }
}

/// Classify a value against its thresholds
pub fn classify(value: f64, thresholds: &Thresholds) -> Classification {
    match thresholds.direction {
        Direction::HigherIsWorse => {
            if value >= thresholds.critical {
                Classification::Critical
            } else if value >= thresholds.warning {
                Classification::Warning
            } else {
                Classification::Ok
            }
        }
        Direction::LowerIsWorse => {
            if value <= thresholds.critical {
                Classification::Critical
            } else if value <= thresholds.warning {
                Classification::Warning
            } else {
                Classification::Ok
            }
        }
    }
}

/// Classify a value that may be missing; a missing value is `Unknown`
pub fn classify_optional(value: Option<f64>, thresholds: &Thresholds) -> Classification {
    match value {
        Some(v) if v.is_finite() => classify(v, thresholds),
        _ => Classification::Unknown,
    }
}
