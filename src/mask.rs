//! Land/sea mask construction.
//!
//! A vector land-boundary dataset is reprojected to the raster's CRS when
//! needed and burned into an in-memory byte grid with the run's exact size
//! and geotransform. Any failure here degrades the run to unmasked frames;
//! it never aborts it.

use gdal::spatial_ref::{CoordTransform, SpatialRef};
use gdal::vector::LayerAccess;
use gdal::{Dataset, DriverManager};
use log::{info, warn};
use std::path::Path;

use crate::config::Config;
use crate::error::PipelineError;
use crate::raster::RasterMeta;

/// Build the land mask for this run, or `None` when masking is disabled or
/// cannot be built. True = land, false = sea.
pub fn build_land_mask(config: &Config, meta: &RasterMeta) -> Option<Vec<bool>> {
    if !config.mask_sea {
        return None;
    }

    let Some(boundary) = config.boundary_path.as_deref() else {
        warn!("sea masking requested but no boundary path configured; continuing unmasked");
        return None;
    };

    match rasterize_boundary(boundary, meta) {
        Ok(mask) => {
            let land_pixels = mask.iter().filter(|&&m| m).count();
            info!(
                "land mask built from {}: {}/{} pixels are land",
                boundary.display(),
                land_pixels,
                mask.len()
            );
            Some(mask)
        }
        Err(e) => {
            warn!(
                "could not build land mask from {}: {}; continuing unmasked",
                boundary.display(),
                e
            );
            None
        }
    }
}

fn rasterize_boundary(boundary: &Path, meta: &RasterMeta) -> Result<Vec<bool>, PipelineError> {
    let vector = Dataset::open(boundary)?;

    let target_srs = if meta.projection.is_empty() {
        None
    } else {
        Some(SpatialRef::from_wkt(&meta.projection)?)
    };

    let mut geometries = Vec::new();
    for mut layer in vector.layers() {
        let transform = reprojection_for(&layer, target_srs.as_ref())?;

        for feature in layer.features() {
            let Some(geometry) = feature.geometry() else {
                continue;
            };

            let mut geometry = geometry.clone();
            if let Some(transform) = &transform {
                geometry.transform_inplace(transform)?;
            }
            geometries.push(geometry);
        }
    }

    if geometries.is_empty() {
        return Err(PipelineError::NoGeometries(boundary.to_path_buf()));
    }

    let driver = DriverManager::get_driver_by_name("MEM")?;
    let mut target =
        driver.create_with_band_type::<u8, _>("land_mask", meta.width, meta.height, 1)?;
    target.set_geo_transform(&meta.geo_transform)?;
    if !meta.projection.is_empty() {
        target.set_projection(&meta.projection)?;
    }

    let burn_values = vec![1.0; geometries.len()];
    gdal::raster::rasterize(&mut target, &[1], &geometries, &burn_values, None)?;

    let band = target.rasterband(1)?;
    let buffer = band.read_as::<u8>(
        (0, 0),
        (meta.width, meta.height),
        (meta.width, meta.height),
        None,
    )?;

    Ok(buffer.data().iter().map(|&v| v != 0).collect())
}

/// Coordinate transform from the layer's SRS to the raster's, or `None`
/// when either side is missing or both already agree.
fn reprojection_for(
    layer: &gdal::vector::Layer<'_>,
    target: Option<&SpatialRef>,
) -> Result<Option<CoordTransform>, PipelineError> {
    let Some(target) = target else {
        return Ok(None);
    };
    let Some(source) = layer.spatial_ref() else {
        return Ok(None);
    };

    if source.to_wkt()? == target.to_wkt()? {
        return Ok(None);
    }

    Ok(Some(CoordTransform::new(&source, target)?))
}
