use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    Fps(u32),
    VideoQuality(u8),
    Colormap(String),
    MaskColor(String),
    TextSize(String),
    Position(String),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Fps(fps) => {
                write!(f, "fps must be between 1 and 60, got {}", fps)
            }
            ConfigError::VideoQuality(q) => {
                write!(f, "video_quality must be between 0 and 51, got {}", q)
            }
            ConfigError::Colormap(name) => write!(f, "unknown colormap: {}", name),
            ConfigError::MaskColor(s) => {
                write!(
                    f,
                    "mask color must be 'R,G,B,A' with values 0-255, got '{}'",
                    s
                )
            }
            ConfigError::TextSize(s) => {
                write!(f, "text size must be one of small, medium, large, got '{}'", s)
            }
            ConfigError::Position(s) => {
                write!(
                    f,
                    "watermark position must be one of top-left, top-right, bottom-left, bottom-right, got '{}'",
                    s
                )
            }
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse JSON: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> ConfigError {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> ConfigError {
        ConfigError::Json(err)
    }
}
