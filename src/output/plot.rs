//! Timeline plot rendering.

use crate::constants::plot::{HEIGHT, POINT_SIZE, WIDTH};
use crate::error::{Error, Result};
use chrono::DateTime;
use plotters::prelude::*;
use std::path::Path;

/// Render `timeline` as a scatter plot and write it as an HTML page.
///
/// The x axis is the point index, the y axis the instant in epoch seconds.
/// Returns `Ok(false)` without touching `path` when there is nothing to plot.
pub fn write_timeline_html(path: &Path, title: &str, timeline: &[f64]) -> Result<bool> {
    if timeline.is_empty() {
        return Ok(false);
    }

    let svg = render_svg(title, timeline)?;
    let page = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{svg}\n</body>\n</html>\n",
        escape_html(title)
    );
    std::fs::write(path, page)?;
    Ok(true)
}

fn render_err(e: &impl std::fmt::Display) -> Error {
    Error::Render {
        reason: e.to_string(),
    }
}

/// Render the scatter plot as an SVG document.
pub fn render_svg(title: &str, timeline: &[f64]) -> Result<String> {
    let (mut lo, mut hi) = timeline
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| {
            (lo.min(t), hi.max(t))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return Err(Error::Render {
            reason: "timeline contains non-finite values".to_string(),
        });
    }
    if hi - lo < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let n = timeline.len() as f64;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| render_err(&e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 16))
            .margin(8)
            .x_label_area_size(24)
            .y_label_area_size(120)
            .build_cartesian_2d(0f64..n, lo..hi)
            .map_err(|e| render_err(&e))?;

        chart
            .configure_mesh()
            .y_labels(4)
            .y_label_formatter(&format_epoch)
            .draw()
            .map_err(|e| render_err(&e))?;

        chart
            .draw_series(
                reduce_to_columns(timeline, WIDTH as usize)
                    .into_iter()
                    .map(|point| Circle::new(point, POINT_SIZE, BLUE.filled())),
            )
            .map_err(|e| render_err(&e))?;

        root.present().map_err(|e| render_err(&e))?;
    }

    Ok(svg)
}

/// Keep the lowest and highest point of each of `columns` index buckets.
///
/// Points carry their original index as x, so the plot reads the same as
/// one drawn from every point while staying bounded by the plot width.
fn reduce_to_columns(timeline: &[f64], columns: usize) -> Vec<(f64, f64)> {
    #[allow(clippy::cast_precision_loss)]
    let point = |i: usize| (i as f64, timeline[i]);

    let bucket = timeline.len().div_ceil(columns.max(1)).max(1);
    let mut points = Vec::with_capacity(2 * timeline.len().div_ceil(bucket));
    for (n, chunk) in timeline.chunks(bucket).enumerate() {
        let offset = n * bucket;
        let (mut lo, mut hi) = (0, 0);
        for (i, &t) in chunk.iter().enumerate() {
            if t < chunk[lo] {
                lo = i;
            }
            if t > chunk[hi] {
                hi = i;
            }
        }
        points.push(point(offset + lo.min(hi)));
        if lo != hi {
            points.push(point(offset + lo.max(hi)));
        }
    }
    points
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn format_epoch(secs: &f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let whole = secs.floor() as i64;
    DateTime::from_timestamp(whole, 0).map_or_else(
        || format!("{secs:.0}"),
        |t| t.format("%Y-%m-%d %H:%M").to_string(),
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_timeline_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.html");
        assert!(!write_timeline_html(&path, "root", &[]).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_writes_html_with_svg() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.html");
        let timeline = [1_600_000_000.0, 1_600_000_000.5, 1_600_000_001.0];

        assert!(write_timeline_html(&path, "p<1>", &timeline).unwrap());

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<svg"));
        assert!(html.contains("<title>p&lt;1&gt;</title>"));
    }

    #[test]
    fn test_single_value_timeline_renders() {
        assert!(render_svg("flat", &[5.0, 5.0]).is_ok());
    }

    #[test]
    fn test_reduce_keeps_small_timelines_whole() {
        let timeline = [3.0, 1.0, 2.0];
        assert_eq!(
            reduce_to_columns(&timeline, 10),
            vec![(0.0, 3.0), (1.0, 1.0), (2.0, 2.0)]
        );
    }

    #[test]
    fn test_reduce_keeps_column_extremes() {
        let timeline = [5.0, 1.0, 9.0, 4.0, 2.0, 3.0];
        assert_eq!(
            reduce_to_columns(&timeline, 2),
            vec![(1.0, 1.0), (2.0, 9.0), (3.0, 4.0), (4.0, 2.0)]
        );
    }

    #[test]
    fn test_long_recording_page_stays_small() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.html");
        // 8 h at 10 points per second
        let timeline: Vec<f64> = (0..288_000u32)
            .map(|i| 1_600_000_000.0 + f64::from(i) / 10.0)
            .collect();

        assert!(write_timeline_html(&path, "night", &timeline).unwrap());

        let bytes = std::fs::metadata(&path).unwrap().len();
        assert!(bytes < 500_000, "page is {bytes} bytes");
    }

    #[test]
    fn test_format_epoch() {
        assert_eq!(format_epoch(&0.0), "1970-01-01 00:00");
    }
}
