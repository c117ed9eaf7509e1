use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::ConfigError;

/// Named text size category for the frame overlays.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    #[serde(rename(deserialize = "small"))]
    Small,
    #[default]
    #[serde(rename(deserialize = "medium"))]
    Medium,
    #[serde(rename(deserialize = "large"))]
    Large,
}

impl TextSize {
    /// Multiplier applied to the base font size derived from image height.
    pub fn factor(&self) -> f32 {
        match self {
            TextSize::Small => 0.7,
            TextSize::Medium => 1.0,
            TextSize::Large => 1.4,
        }
    }
}

impl FromStr for TextSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(TextSize::Small),
            "medium" => Ok(TextSize::Medium),
            "large" => Ok(TextSize::Large),
            other => Err(ConfigError::TextSize(other.to_string())),
        }
    }
}

impl fmt::Display for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextSize::Small => write!(f, "small"),
            TextSize::Medium => write!(f, "medium"),
            TextSize::Large => write!(f, "large"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_ordering() {
        assert!(TextSize::Small.factor() < TextSize::Medium.factor());
        assert!(TextSize::Medium.factor() < TextSize::Large.factor());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("small".parse::<TextSize>().unwrap(), TextSize::Small);
        assert_eq!("large".parse::<TextSize>().unwrap(), TextSize::Large);
        assert!("huge".parse::<TextSize>().is_err());
    }
}
