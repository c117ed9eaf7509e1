//! CSV export and time-series chart for the per-frame intensity series.

use chrono::{Datelike, Months, NaiveDate};
use log::info;
use plotters::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::PipelineError;
use crate::stats::FrameStat;

const CHART_SIZE: (u32, u32) = (1000, 600);

/// Write `Date,Average_Radiance` rows for every non-missing frame, in
/// series order. Missing frames are omitted entirely, never written as
/// nulls; a header-only file is legitimate output.
pub fn write_csv(series: &[FrameStat], path: &Path) -> Result<(), PipelineError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "Date,Average_Radiance")?;

    for stat in series {
        if let Some(mean) = stat.mean {
            writeln!(writer, "{},{:.6}", stat.month.format("%Y-%m-%d"), mean)?;
        }
    }

    writer.flush()?;

    Ok(())
}

/// Render a line chart of date vs raw mean intensity. Frames with missing
/// means are left out; with zero valid points the chart is skipped.
pub fn render_chart(series: &[FrameStat], title: &str, path: &Path) -> Result<(), PipelineError> {
    let points: Vec<(NaiveDate, f64)> = series
        .iter()
        .filter_map(|s| s.mean.map(|m| (s.month, m)))
        .collect();

    if points.is_empty() {
        info!("no valid intensity values, skipping chart");
        return Ok(());
    }

    let x_min = points[0].0;
    let mut x_max = points[points.len() - 1].0;
    if x_max <= x_min {
        // Single-point series still needs a non-degenerate axis.
        x_max = x_min.checked_add_months(Months::new(1)).unwrap_or(x_max);
    }

    let highest = points.iter().map(|&(_, v)| v).fold(f64::NEG_INFINITY, f64::max);
    let y_max = if highest > 0.0 { highest * 1.05 } else { 1.0 };

    // Roughly one tick every two years on the time axis.
    let span_years = (x_max.year() - x_min.year()).max(0) as usize;
    let x_labels = (span_years / 2 + 1).clamp(2, 20);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(x_labels)
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y").to_string())
        .y_desc("Average radiance")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(points, &BLUE))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;

    Ok(())
}

fn chart_err<E: std::fmt::Display>(e: E) -> PipelineError {
    PipelineError::Chart(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn stat(year: i32, month: u32, mean: Option<f64>) -> FrameStat {
        let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        FrameStat {
            month: date,
            label: date.format("%Y-%m").to_string(),
            mean,
        }
    }

    #[test]
    fn test_csv_omits_missing_frames() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("intensity.csv");

        let series = vec![
            stat(2020, 1, Some(3.5)),
            stat(2020, 2, None),
            stat(2020, 3, Some(4.25)),
        ];

        write_csv(&series, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Date,Average_Radiance");
        assert_eq!(lines[1], "2020-01-01,3.500000");
        assert_eq!(lines[2], "2020-03-01,4.250000");
    }

    #[test]
    fn test_csv_all_missing_writes_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("intensity.csv");

        let series = vec![stat(2020, 1, None), stat(2020, 2, None)];
        write_csv(&series, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim(), "Date,Average_Radiance");
    }

    #[test]
    fn test_csv_rows_follow_series_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("intensity.csv");

        let series = vec![
            stat(2019, 11, Some(1.0)),
            stat(2020, 2, Some(2.0)),
            stat(2021, 6, Some(3.0)),
        ];
        write_csv(&series, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let dates: Vec<&str> = contents
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();

        assert_eq!(dates, vec!["2019-11-01", "2020-02-01", "2021-06-01"]);
    }

    #[test]
    fn test_chart_skipped_when_no_valid_points() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.png");

        let series = vec![stat(2020, 1, None)];
        render_chart(&series, "Radiance", &path).unwrap();

        assert!(!path.exists());
    }
}
