use crate::constants::{
    DEFAULT_STRENGTH, MAX_STRENGTH, MIN_STRENGTH, PRESET_BALANCED_STRENGTH,
    PRESET_LIGHT_STRENGTH, PRESET_STRONG_STRENGTH,
};
use crate::error::{CompressionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User-facing compression strength in percent (1-99). Higher values
/// request smaller output at lower fidelity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompressionStrength(u8);

impl CompressionStrength {
    pub fn new(value: u8) -> Result<Self> {
        if !(MIN_STRENGTH..=MAX_STRENGTH).contains(&value) {
            return Err(CompressionError::InvalidStrength(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Encode quality implied by this strength: `100 - strength`.
    pub fn quality(self) -> u8 {
        100 - self.0
    }
}

impl Default for CompressionStrength {
    fn default() -> Self {
        Self(DEFAULT_STRENGTH)
    }
}

impl fmt::Display for CompressionStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Named strength levels offered alongside the free-form value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthPreset {
    Light,
    Balanced,
    Strong,
}

impl StrengthPreset {
    pub fn strength(self) -> CompressionStrength {
        let value = match self {
            StrengthPreset::Light => PRESET_LIGHT_STRENGTH,
            StrengthPreset::Balanced => PRESET_BALANCED_STRENGTH,
            StrengthPreset::Strong => PRESET_STRONG_STRENGTH,
        };
        CompressionStrength(value)
    }

    pub fn all() -> [StrengthPreset; 3] {
        [
            StrengthPreset::Light,
            StrengthPreset::Balanced,
            StrengthPreset::Strong,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            StrengthPreset::Light => "light",
            StrengthPreset::Balanced => "balanced",
            StrengthPreset::Strong => "strong",
        }
    }
}

impl fmt::Display for StrengthPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StrengthPreset {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "light" => Ok(StrengthPreset::Light),
            "balanced" => Ok(StrengthPreset::Balanced),
            "strong" => Ok(StrengthPreset::Strong),
            _ => Err(CompressionError::UnknownPreset(s.to_string())),
        }
    }
}

/// Which input control picked the strength. The two are mutually
/// exclusive; selecting one clears the other's active indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthSelection {
    Preset(StrengthPreset),
    Slider(CompressionStrength),
}

impl StrengthSelection {
    pub fn strength(self) -> CompressionStrength {
        match self {
            StrengthSelection::Preset(preset) => preset.strength(),
            StrengthSelection::Slider(strength) => strength,
        }
    }
}
