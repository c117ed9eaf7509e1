//! Run orchestration: the two sequential passes over the sorted file list
//! plus the three independent output stages.

use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::animate;
use crate::config::Config;
use crate::error::PipelineError;
use crate::fonts;
use crate::index;
use crate::mask;
use crate::raster;
use crate::render::{self, RenderContext};
use crate::report;
use crate::stats;

pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Pipeline { config }
    }

    /// Execute the full run. Only fatal setup errors (no input, no dates,
    /// unreadable first-file metadata) propagate; per-file and output-stage
    /// failures are logged and the run continues.
    pub fn run(&self) -> Result<(), PipelineError> {
        let entries = index::index_input_dir(&self.config.input_dir)?;
        info!(
            "found {} dated rasters in {} ({} to {})",
            entries.len(),
            self.config.input_dir.display(),
            entries[0].label,
            entries[entries.len() - 1].label
        );

        // The first sorted file is authoritative for the run's geometry.
        let meta = raster::read_meta(&entries[0].path)?;
        info!("raster geometry: {}x{} pixels", meta.width, meta.height);

        if let Some(parent) = self.config.output_base.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let land_mask = mask::build_land_mask(&self.config, &meta);

        // Pass 1 must finish before any frame is rendered: every frame's
        // color mapping depends on the globally pooled range.
        let stats = stats::run_statistics_pass(&entries, &meta);

        let font = fonts::resolve_font(&self.config, meta.height);
        let ctx = RenderContext {
            bounds: stats.render_bounds(self.config.normalize),
            colormap: self.config.colormap,
            land_mask: land_mask.as_deref(),
            mask_color: self.config.mask_color,
            font: &font,
            watermark: &self.config.watermark,
            watermark_position: self.config.watermark_position,
        };

        // Pass 2: render every readable frame in chronological order.
        let mut frames = Vec::with_capacity(entries.len());
        for entry in &entries {
            match raster::read_grid(&entry.path, &meta) {
                Ok(grid) => frames.push(render::render_frame(&grid, &entry.label, &ctx)),
                Err(e) => warn!("skipping frame {}: {}", entry.label, e),
            }
        }

        // Output stages are independent: a failed animation must not block
        // the chart or the CSV.
        let animation_path = output_path(&self.config.output_base, &self.config.format);
        match animate::encode_animation(&frames, &self.config, &animation_path) {
            Ok(()) if !frames.is_empty() => info!("wrote {}", animation_path.display()),
            Ok(()) => {}
            Err(e) => error!("animation encoding failed: {}", e),
        }

        let csv_path = sibling_path(&self.config.output_base, "_intensity_data.csv");
        match report::write_csv(&stats.series, &csv_path) {
            Ok(()) => info!("wrote {}", csv_path.display()),
            Err(e) => error!("CSV export failed: {}", e),
        }

        let chart_path = sibling_path(&self.config.output_base, "_graph.png");
        match report::render_chart(&stats.series, &self.config.chart_title, &chart_path) {
            Ok(()) => {
                if chart_path.exists() {
                    info!("wrote {}", chart_path.display());
                }
            }
            Err(e) => error!("chart rendering failed: {}", e),
        }

        Ok(())
    }
}

/// `{output_base}.{format}`
fn output_path(base: &Path, extension: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", base.display(), extension))
}

/// `{output_base}{suffix}`
fn sibling_path(base: &Path, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", base.display(), suffix))
}
