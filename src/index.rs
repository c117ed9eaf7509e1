//! Input discovery: finds the monthly rasters in the input folder and sorts
//! them chronologically by the `_YYYY_MM` suffix embedded in each filename.

use chrono::NaiveDate;
use glob::glob;
use log::warn;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// One dated input raster, in sorted position.
#[derive(Debug, Clone)]
pub struct FrameEntry {
    pub path: PathBuf,
    pub month: NaiveDate,
    pub label: String,
}

/// Extract the calendar month from a file stem ending in `_YYYY_MM`.
///
/// Returns the first day of that month, or `None` when the stem does not
/// match the pattern.
pub fn parse_month_from_stem(stem: &str) -> Option<NaiveDate> {
    let mut parts = stem.rsplitn(3, '_');

    let month_part = parts.next()?;
    let year_part = parts.next()?;
    // A bare "YYYY_MM" stem has no leading identifier; require one.
    parts.next()?;

    if year_part.len() != 4 || month_part.len() != 2 {
        return None;
    }

    let year: i32 = year_part.parse().ok()?;
    let month: u32 = month_part.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, 1)
}

/// List all `.tif` files in `dir` that carry a parseable `_YYYY_MM` suffix,
/// sorted ascending by month. Files without a parseable date are dropped
/// with a warning.
pub fn index_input_dir(dir: &Path) -> Result<Vec<FrameEntry>, PipelineError> {
    let pattern = dir.join("*.tif");
    let pattern = pattern.to_string_lossy();

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in glob(&pattern)? {
        match entry {
            Ok(path) => candidates.push(path),
            Err(e) => warn!("skipping unreadable directory entry: {}", e),
        }
    }

    if candidates.is_empty() {
        return Err(PipelineError::NoInputFiles(dir.to_path_buf()));
    }

    let mut entries: Vec<FrameEntry> = Vec::new();
    for path in candidates {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        match parse_month_from_stem(&stem) {
            Some(month) => {
                let label = month.format("%Y-%m").to_string();
                entries.push(FrameEntry { path, month, label });
            }
            None => warn!(
                "skipping {}: filename does not end in _YYYY_MM",
                path.display()
            ),
        }
    }

    if entries.is_empty() {
        return Err(PipelineError::NoParseableDates(dir.to_path_buf()));
    }

    entries.sort_by_key(|e| e.month);

    Ok(entries)
}
