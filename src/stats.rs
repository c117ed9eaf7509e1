//! Pass 1: per-frame summary statistics and the pooled visualization range.
//!
//! Every sorted raster is read once. Each frame contributes its mean
//! radiance to the intensity series (or a missing marker) and its valid
//! pixel values to a pooled accumulator from which the 0.5/99.5 percentile
//! color range is derived.

use chrono::NaiveDate;
use log::{info, warn};

use crate::index::FrameEntry;
use crate::raster::{self, RasterMeta, is_valid};

/// Normalization bounds for color mapping. Always satisfies
/// `vmax > vmin >= 0` once the statistics pass has finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualizationRange {
    pub vmin: f64,
    pub vmax: f64,
}

/// One entry of the intensity series. `mean` is `None` for frames that
/// could not be read or had no valid pixels.
#[derive(Debug, Clone)]
pub struct FrameStat {
    pub month: NaiveDate,
    pub label: String,
    pub mean: Option<f64>,
}

/// Immutable output of the statistics pass, consumed by the rendering pass
/// and the report exporter.
#[derive(Debug)]
pub struct StatsOutcome {
    pub series: Vec<FrameStat>,
    pub range: VisualizationRange,
}

impl StatsOutcome {
    /// Final normalization bounds for rendering. Normalized mode uses the
    /// computed range as-is; fixed mode anchors the low end at zero.
    pub fn render_bounds(&self, normalize: bool) -> (f64, f64) {
        if normalize {
            (self.range.vmin, self.range.vmax)
        } else {
            (0.0, self.range.vmax)
        }
    }
}

/// Stream through all sorted rasters once, in order.
pub fn run_statistics_pass(entries: &[FrameEntry], meta: &RasterMeta) -> StatsOutcome {
    let mut series = Vec::with_capacity(entries.len());
    let mut pooled: Vec<f32> = Vec::new();
    let mut max_raw = f64::NEG_INFINITY;

    for entry in entries {
        let mean = match raster::read_grid(&entry.path, meta) {
            Ok(grid) => {
                for &v in &grid.data {
                    if v.is_finite() {
                        max_raw = max_raw.max(v as f64);
                    }
                }

                match summarize_frame(&grid.data) {
                    Some((mean, valid)) => {
                        pooled.extend_from_slice(&valid);
                        Some(mean)
                    }
                    None => {
                        warn!("{}: no valid pixels, recording as missing", entry.label);
                        None
                    }
                }
            }
            Err(e) => {
                warn!("{}: could not read {}: {}", entry.label, entry.path.display(), e);
                None
            }
        };

        series.push(FrameStat {
            month: entry.month,
            label: entry.label.clone(),
            mean,
        });
    }

    let range = determine_range(&mut pooled, max_raw);
    info!(
        "statistics pass complete: {} frames, visualization range [{:.4}, {:.4}]",
        series.len(),
        range.vmin,
        range.vmax
    );

    StatsOutcome { series, range }
}

/// Mean over valid pixels plus the valid values themselves, or `None` when
/// the frame has no valid pixels or its summaries come out non-finite.
pub fn summarize_frame(data: &[f32]) -> Option<(f64, Vec<f32>)> {
    let valid: Vec<f32> = data.iter().copied().filter(|&v| is_valid(v)).collect();

    if valid.is_empty() {
        return None;
    }

    let min = valid.iter().fold(f32::INFINITY, |a, &b| a.min(b));
    let max = valid.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let mean = valid.iter().map(|&v| v as f64).sum::<f64>() / valid.len() as f64;

    // Corrupt partial data must not reach the range or the CSV.
    if !min.is_finite() || !max.is_finite() || !mean.is_finite() {
        return None;
    }

    Some((mean, valid))
}

/// Derive the visualization range from the pooled values, falling back to
/// `[0, max(1, max_raw)]` when nothing was pooled or the percentiles are
/// unusable.
pub fn determine_range(pooled: &mut Vec<f32>, max_raw: f64) -> VisualizationRange {
    let fallback_max = if max_raw.is_finite() {
        max_raw.max(1.0)
    } else {
        1.0
    };

    let mut vmin = 0.0;
    let mut vmax = fallback_max;

    if !pooled.is_empty() {
        pooled.sort_by(|a, b| a.total_cmp(b));
        let lo = percentile(pooled, 0.5);
        let hi = percentile(pooled, 99.5);

        if lo.is_finite() && hi.is_finite() && hi > lo {
            vmin = lo;
            vmax = hi;
        }
    }

    if vmax <= vmin {
        vmax = vmin + 1.0;
    }
    if vmin < 0.0 {
        vmin = 0.0;
    }

    VisualizationRange { vmin, vmax }
}

/// Linear-interpolated percentile over an ascending-sorted slice.
fn percentile(sorted: &[f32], q: f64) -> f64 {
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let weight = rank - lo as f64;

    sorted[lo] as f64 * (1.0 - weight) + sorted[hi] as f64 * weight
}
