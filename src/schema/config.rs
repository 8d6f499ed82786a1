//! Configuration for converting point animations into ILDA sections.

use serde::{Deserialize, Serialize};

use crate::format::NAME_LEN;

/// Default intensity scale, matching 16-bit laser point channels.
pub const DEFAULT_MAX_INTENSITY: f32 = 65535.0;

fn default_max_intensity() -> f32 {
    DEFAULT_MAX_INTENSITY
}

/// Header fields and color scaling applied by the section converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Frame name written into every section (at most 8 characters).
    pub name: String,
    /// Company name written into every section (at most 8 characters).
    pub company_name: String,
    /// Projector number written into every section.
    #[serde(default)]
    pub projector_number: u8,
    /// Input intensity that maps to full 255 color.
    #[serde(default = "default_max_intensity")]
    pub max_intensity: f32,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            name: "frame".to_string(),
            company_name: "ildacdc".to_string(),
            projector_number: 0,
            max_intensity: DEFAULT_MAX_INTENSITY,
        }
    }
}

impl ConverterConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_name("name", &self.name)?;
        check_name("company_name", &self.company_name)?;
        if !self.max_intensity.is_finite() || self.max_intensity <= 0.0 {
            return Err(ConfigError::InvalidMaxIntensity(self.max_intensity));
        }
        Ok(())
    }
}

fn check_name(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let len = value.chars().count();
    if len > NAME_LEN {
        return Err(ConfigError::NameTooLong { field, len });
    }
    if value.chars().any(|c| u32::from(c) > 0xFF) {
        return Err(ConfigError::NameNotLatin1 { field });
    }
    if value.contains('\0') {
        return Err(ConfigError::NameContainsNul { field });
    }
    Ok(())
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("`{field}` is {len} characters, at most 8 are allowed")]
    NameTooLong { field: &'static str, len: usize },
    #[error("`{field}` must only contain Latin-1 characters")]
    NameNotLatin1 { field: &'static str },
    #[error("`{field}` must not contain NUL characters")]
    NameContainsNul { field: &'static str },
    #[error("Max intensity must be positive and finite, got {0}")]
    InvalidMaxIntensity(f32),
}
