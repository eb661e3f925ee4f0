//! Per-recording extraction of annotation and timing rows.

use crate::error::{Error, Result};
use crate::recording::RecordingHandle;
use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone};
use std::path::Path;

/// One annotation event tagged with the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRow {
    /// Offset from recording start in seconds.
    pub onset: f64,
    /// Absolute event time (recording start + onset), when the start is known.
    pub onset_time: Option<NaiveDateTime>,
    /// Duration in seconds.
    pub duration: f64,
    /// Event description.
    pub description: String,
    /// Source file name.
    pub fname: String,
    /// Name of the directory containing the source file.
    pub folder_name: String,
}

/// Wall-clock interval covered by one recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingRow {
    /// Recording start.
    pub start_time: NaiveDateTime,
    /// Recording end, `start_time + n_samples / sampling_rate`.
    pub end_time: NaiveDateTime,
    /// Source file name.
    pub fname: String,
    /// Name of the directory containing the source file.
    pub folder_name: String,
}

/// Drop the timezone, keeping the wall-clock reading.
pub fn to_naive<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDateTime {
    instant.naive_local()
}

/// File name component of `path`, lossily decoded.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Name of the directory directly containing `path`.
pub fn folder_name_of(path: &Path) -> String {
    path.parent().map(file_name_of).unwrap_or_default()
}

/// Turn a recording's events into rows, one per event, in reader order.
pub fn extract_annotations(handle: &RecordingHandle, path: &Path) -> Vec<AnnotationRow> {
    let fname = file_name_of(path);
    let folder_name = folder_name_of(path);
    let start = handle.meas_start.as_ref().map(to_naive);

    handle
        .annotation_events
        .iter()
        .map(|event| AnnotationRow {
            onset: event.onset,
            onset_time: start.and_then(|s| s.checked_add_signed(seconds(event.onset)?)),
            duration: event.duration,
            description: event.description.clone(),
            fname: fname.clone(),
            folder_name: folder_name.clone(),
        })
        .collect()
}

/// Compute the `[start, end]` interval of a recording.
pub fn extract_timing(handle: &RecordingHandle) -> Result<TimingRow> {
    let path = &handle.source_path;
    let missing = |field| Error::MissingMetadata {
        path: path.clone(),
        field,
    };

    let start = handle
        .meas_start
        .as_ref()
        .map(to_naive)
        .ok_or_else(|| missing("measurement start time"))?;
    let n_samples = handle.n_samples.ok_or_else(|| missing("sample count"))?;
    let rate = handle
        .sampling_rate
        .ok_or_else(|| missing("sampling rate"))?;

    if !rate.is_finite() || rate <= 0.0 {
        return Err(Error::InvalidSamplingRate {
            path: path.clone(),
            value: rate,
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let duration = n_samples as f64 / rate;
    let end = seconds(duration)
        .and_then(|d| start.checked_add_signed(d))
        .ok_or_else(|| Error::TimeOutOfRange { path: path.clone() })?;

    Ok(TimingRow {
        start_time: start,
        end_time: end,
        fname: file_name_of(path),
        folder_name: folder_name_of(path),
    })
}

/// Fractional seconds as a delta, rounded to the microsecond.
fn seconds(secs: f64) -> Option<TimeDelta> {
    let micros = (secs * 1e6).round();
    #[allow(clippy::cast_possible_truncation)]
    (micros.is_finite() && micros.abs() < 9.0e18).then(|| TimeDelta::microseconds(micros as i64))
}
