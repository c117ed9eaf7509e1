//! Single-band raster access through GDAL.
//!
//! The geotransform and projection are read once, from the first file in
//! sorted order, and treated as authoritative for the whole run. Later
//! files are only checked for matching pixel dimensions.

use gdal::Dataset;
use std::path::Path;

use crate::error::PipelineError;

/// Raster geometry shared by every frame in a run.
#[derive(Debug, Clone)]
pub struct RasterMeta {
    pub width: usize,
    pub height: usize,
    pub geo_transform: [f64; 6],
    pub projection: String,
}

/// One frame's pixel values, row-major.
#[derive(Debug)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

/// A pixel participates in statistics and normal color mapping only if its
/// value is finite and strictly positive.
pub fn is_valid(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Read size, geotransform and projection from one raster file.
pub fn read_meta(path: &Path) -> Result<RasterMeta, PipelineError> {
    let dataset = Dataset::open(path)?;
    let (width, height) = dataset.raster_size();
    let geo_transform = dataset.geo_transform()?;
    let projection = dataset.projection();

    Ok(RasterMeta {
        width,
        height,
        geo_transform,
        projection,
    })
}

/// Read band 1 of one raster file as f32 values.
///
/// The dataset is opened, read and closed within this call. Dimensions are
/// checked against the run metadata; a mismatch is reported as a per-file
/// error rather than silently producing a misaligned frame.
pub fn read_grid(path: &Path, meta: &RasterMeta) -> Result<Grid, PipelineError> {
    let dataset = Dataset::open(path)?;
    let (width, height) = dataset.raster_size();

    if width != meta.width || height != meta.height {
        return Err(PipelineError::ShapeMismatch {
            path: path.to_path_buf(),
            expected: (meta.width, meta.height),
            actual: (width, height),
        });
    }

    let band = dataset.rasterband(1)?;
    let buffer = band.read_as::<f32>((0, 0), (width, height), (width, height), None)?;

    Ok(Grid {
        width,
        height,
        data: buffer.data().to_vec(),
    })
}
