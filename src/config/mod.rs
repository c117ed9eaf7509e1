use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::colormap::Colormap;

pub mod error;
pub use error::ConfigError;

pub mod position;
pub use position::WatermarkPosition;

pub mod text_size;
pub use text_size::TextSize;

/// Immutable run configuration. Built once from the CLI (or a JSON file)
/// and passed by reference into every pipeline stage.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_base: PathBuf,
    pub format: String,
    pub colormap: Colormap,
    pub fps: u32,
    pub normalize: bool,
    pub mask_sea: bool,
    pub boundary_path: Option<PathBuf>,
    pub mask_color: [u8; 4],
    pub video_quality: u8,
    pub text_size: TextSize,
    pub font_path: Option<PathBuf>,
    pub chart_title: String,
    pub watermark: String,
    pub watermark_position: WatermarkPosition,
}

// Deserializes a Config from JSON, filling defaults for omitted fields and
// validating the ranges that would otherwise fail deep inside the pipeline.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ConfigHelper {
            input_dir: PathBuf,
            output_base: PathBuf,
            format: Option<String>,
            colormap: Option<String>,
            fps: Option<u32>,
            normalize: Option<bool>,
            mask_sea: Option<bool>,
            boundary_path: Option<PathBuf>,
            mask_color: Option<String>,
            video_quality: Option<u8>,
            text_size: Option<TextSize>,
            font_path: Option<PathBuf>,
            chart_title: Option<String>,
            watermark: Option<String>,
            watermark_position: Option<WatermarkPosition>,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        let colormap_name = helper.colormap.unwrap_or_else(|| "plasma".to_string());
        let colormap = Colormap::from_name(&colormap_name)
            .ok_or_else(|| D::Error::custom(ConfigError::Colormap(colormap_name)))?;

        let mask_color = match helper.mask_color {
            Some(s) => parse_mask_color(&s).map_err(D::Error::custom)?,
            None => [0, 0, 0, 0],
        };

        let config = Config {
            input_dir: helper.input_dir,
            output_base: helper.output_base,
            format: helper.format.unwrap_or_else(|| "gif".to_string()),
            colormap,
            fps: helper.fps.unwrap_or(2),
            normalize: helper.normalize.unwrap_or(true),
            mask_sea: helper.mask_sea.unwrap_or(false),
            boundary_path: helper.boundary_path,
            mask_color,
            video_quality: helper.video_quality.unwrap_or(23),
            text_size: helper.text_size.unwrap_or_default(),
            font_path: helper.font_path,
            chart_title: helper
                .chart_title
                .unwrap_or_else(|| "Average nighttime radiance".to_string()),
            watermark: helper.watermark.unwrap_or_default(),
            watermark_position: helper.watermark_position.unwrap_or_default(),
        };

        config.validate().map_err(D::Error::custom)?;

        Ok(config)
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 || self.fps > 60 {
            return Err(ConfigError::Fps(self.fps));
        }

        if self.video_quality > 51 {
            return Err(ConfigError::VideoQuality(self.video_quality));
        }

        Ok(())
    }
}

/// Parse an "R,G,B,A" string into an RGBA quadruplet.
pub fn parse_mask_color(s: &str) -> Result<[u8; 4], ConfigError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();

    if parts.len() != 4 {
        return Err(ConfigError::MaskColor(s.to_string()));
    }

    let mut color = [0u8; 4];
    for (slot, part) in color.iter_mut().zip(&parts) {
        *slot = part
            .parse::<u8>()
            .map_err(|_| ConfigError::MaskColor(s.to_string()))?;
    }

    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.json");
        let mut file = File::create(&file_path).unwrap();

        let config_data = r#"
    {
        "input_dir": "./data/viirs",
        "output_base": "./output/nightlights",
        "colormap": "viridis",
        "fps": 4,
        "mask_sea": true,
        "boundary_path": "./data/land.gpkg",
        "mask_color": "10,20,30,255"
    }
    "#;

        file.write_all(config_data.as_bytes()).unwrap();

        let config = Config::from_file(file_path).unwrap();

        assert_eq!(config.colormap, Colormap::Viridis);
        assert_eq!(config.fps, 4);
        assert!(config.mask_sea);
        assert_eq!(config.mask_color, [10, 20, 30, 255]);
        // Omitted fields pick up their defaults.
        assert_eq!(config.format, "gif");
        assert!(config.normalize);
        assert_eq!(config.text_size, TextSize::Medium);
        assert_eq!(config.watermark_position, WatermarkPosition::TopLeft);
    }

    #[test]
    fn test_from_file_rejects_unknown_colormap() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.json");
        let mut file = File::create(&file_path).unwrap();

        let config_data = r#"
    {
        "input_dir": "./in",
        "output_base": "./out/base",
        "colormap": "rainbow_sparkles"
    }
    "#;

        file.write_all(config_data.as_bytes()).unwrap();

        assert!(Config::from_file(file_path).is_err());
    }

    #[test]
    fn test_from_file_rejects_zero_fps() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.json");
        let mut file = File::create(&file_path).unwrap();

        let config_data = r#"
    {
        "input_dir": "./in",
        "output_base": "./out/base",
        "fps": 0
    }
    "#;

        file.write_all(config_data.as_bytes()).unwrap();

        assert!(Config::from_file(file_path).is_err());
    }

    #[test]
    fn test_parse_mask_color() {
        assert_eq!(parse_mask_color("0,0,0,0").unwrap(), [0, 0, 0, 0]);
        assert_eq!(
            parse_mask_color("255, 128, 0, 255").unwrap(),
            [255, 128, 0, 255]
        );
        assert!(parse_mask_color("1,2,3").is_err());
        assert!(parse_mask_color("1,2,3,300").is_err());
        assert!(parse_mask_color("red").is_err());
    }
}
