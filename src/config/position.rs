use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::ConfigError;

/// Corner of the frame the watermark is anchored to. The per-frame date
/// label always sits bottom-right, independent of this setting.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatermarkPosition {
    #[default]
    #[serde(rename(deserialize = "top-left"))]
    TopLeft,
    #[serde(rename(deserialize = "top-right"))]
    TopRight,
    #[serde(rename(deserialize = "bottom-left"))]
    BottomLeft,
    #[serde(rename(deserialize = "bottom-right"))]
    BottomRight,
}

impl FromStr for WatermarkPosition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-left" => Ok(WatermarkPosition::TopLeft),
            "top-right" => Ok(WatermarkPosition::TopRight),
            "bottom-left" => Ok(WatermarkPosition::BottomLeft),
            "bottom-right" => Ok(WatermarkPosition::BottomRight),
            other => Err(ConfigError::Position(other.to_string())),
        }
    }
}

impl fmt::Display for WatermarkPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatermarkPosition::TopLeft => write!(f, "top-left"),
            WatermarkPosition::TopRight => write!(f, "top-right"),
            WatermarkPosition::BottomLeft => write!(f, "bottom-left"),
            WatermarkPosition::BottomRight => write!(f, "bottom-right"),
        }
    }
}
