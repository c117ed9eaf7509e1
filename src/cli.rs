use clap::Parser;
use std::path::PathBuf;

use crate::colormap::Colormap;
use crate::config::{Config, ConfigError, parse_mask_color};

#[derive(Parser, Debug)]
#[command(
    name = "nightlapse",
    about = "Animate monthly night-light radiance rasters",
    version
)]
pub struct Args {
    /// JSON configuration file; when given it replaces all other options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Folder containing the monthly *_YYYY_MM.tif rasters
    #[arg(long, default_value = "./data/rasters")]
    pub input_dir: PathBuf,

    /// Output path prefix for the animation, CSV and chart
    #[arg(long, default_value = "./output/nightlights")]
    pub output_base: PathBuf,

    /// Animation container: gif, mp4, webm, ...
    #[arg(long, default_value = "gif")]
    pub format: String,

    /// Colormap: plasma, viridis, inferno, magma, grayscale
    #[arg(long, default_value = "plasma")]
    pub colormap: String,

    /// Animation frames per second
    #[arg(long, default_value_t = 2)]
    pub fps: u32,

    /// Anchor the color scale at zero instead of the low percentile
    #[arg(long)]
    pub fixed_scale: bool,

    /// Override sea pixels with the mask color
    #[arg(long)]
    pub mask_sea: bool,

    /// Vector land-boundary dataset used for sea masking
    #[arg(long)]
    pub boundary: Option<PathBuf>,

    /// Sea mask color as R,G,B,A (0-255 each)
    #[arg(long, default_value = "0,0,0,0")]
    pub mask_color: String,

    /// Video quality factor (ffmpeg CRF, lower = higher quality)
    #[arg(long, default_value_t = 23)]
    pub video_quality: u8,

    /// Overlay text size: small, medium, large
    #[arg(long, default_value = "medium")]
    pub text_size: String,

    /// Scalable font used for text overlays
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Chart title
    #[arg(long, default_value = "Average nighttime radiance")]
    pub chart_title: String,

    /// Watermark drawn on every frame
    #[arg(long, default_value = "")]
    pub watermark: String,

    /// Watermark corner: top-left, top-right, bottom-left, bottom-right
    #[arg(long, default_value = "top-left")]
    pub watermark_position: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn into_config(self) -> Result<Config, ConfigError> {
        if let Some(path) = &self.config {
            return Config::from_file(path);
        }

        let colormap = Colormap::from_name(&self.colormap)
            .ok_or_else(|| ConfigError::Colormap(self.colormap.clone()))?;

        let config = Config {
            input_dir: self.input_dir,
            output_base: self.output_base,
            format: self.format,
            colormap,
            fps: self.fps,
            normalize: !self.fixed_scale,
            mask_sea: self.mask_sea,
            boundary_path: self.boundary,
            mask_color: parse_mask_color(&self.mask_color)?,
            video_quality: self.video_quality,
            text_size: self.text_size.parse()?,
            font_path: self.font,
            chart_title: self.chart_title,
            watermark: self.watermark,
            watermark_position: self.watermark_position.parse()?,
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextSize;

    #[test]
    fn test_defaults_into_config() {
        let args = Args::parse_from(["nightlapse"]);
        let config = args.into_config().unwrap();

        assert_eq!(config.format, "gif");
        assert_eq!(config.colormap, Colormap::Plasma);
        assert_eq!(config.fps, 2);
        assert!(config.normalize);
        assert!(!config.mask_sea);
        assert_eq!(config.mask_color, [0, 0, 0, 0]);
        assert_eq!(config.text_size, TextSize::Medium);
    }

    #[test]
    fn test_fixed_scale_disables_normalization() {
        let args = Args::parse_from(["nightlapse", "--fixed-scale"]);
        let config = args.into_config().unwrap();

        assert!(!config.normalize);
    }

    #[test]
    fn test_unknown_colormap_is_rejected() {
        let args = Args::parse_from(["nightlapse", "--colormap", "sparkles"]);
        assert!(args.into_config().is_err());
    }

    #[test]
    fn test_watermark_position_parsing() {
        use crate::config::WatermarkPosition;

        let args = Args::parse_from(["nightlapse", "--watermark-position", "bottom-left"]);
        let config = args.into_config().unwrap();
        assert_eq!(config.watermark_position, WatermarkPosition::BottomLeft);

        let args = Args::parse_from(["nightlapse", "--watermark-position", "middle"]);
        assert!(args.into_config().is_err());
    }

    #[test]
    fn test_mask_color_parsing() {
        let args = Args::parse_from(["nightlapse", "--mask-color", "12,34,56,78"]);
        let config = args.into_config().unwrap();

        assert_eq!(config.mask_color, [12, 34, 56, 78]);
    }
}
