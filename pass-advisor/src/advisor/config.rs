//! Advisor configuration.

use std::str::FromStr;

/// How the roster is scanned for conflicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanMode {
    /// Compare only the first two trains of the roster.
    FirstPair,

    /// Group trains by occupied segment and resolve every contested segment.
    #[default]
    PerSegment,
}

/// What to do when two conflicting trains have equal priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Make no recommendation.
    #[default]
    Decline,

    /// Hold the train whose id sorts later; the earlier one passes.
    TrainId,
}

/// Error returned when a configuration value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {setting} {value:?} (expected one of: {expected})")]
pub struct UnknownSetting {
    setting: &'static str,
    value: String,
    expected: &'static str,
}

impl FromStr for ScanMode {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-pair" => Ok(ScanMode::FirstPair),
            "per-segment" => Ok(ScanMode::PerSegment),
            _ => Err(UnknownSetting {
                setting: "scan mode",
                value: s.to_string(),
                expected: "first-pair, per-segment",
            }),
        }
    }
}

impl FromStr for TieBreak {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decline" => Ok(TieBreak::Decline),
            "train-id" => Ok(TieBreak::TrainId),
            _ => Err(UnknownSetting {
                setting: "tie-break",
                value: s.to_string(),
                expected: "decline, train-id",
            }),
        }
    }
}

/// Configuration parameters for the advisor.
#[derive(Debug, Clone, Default)]
pub struct AdvisorConfig {
    /// Which trains are compared.
    pub scan_mode: ScanMode,

    /// Equal-priority handling.
    pub tie_break: TieBreak,
}

impl AdvisorConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(scan_mode: ScanMode, tie_break: TieBreak) -> Self {
        Self {
            scan_mode,
            tie_break,
        }
    }
}
