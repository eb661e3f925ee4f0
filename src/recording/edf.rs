//! EDF/EDF+ recording reader.
//!
//! Only the header and the "EDF Annotations" signals are read. Sample data
//! of the other signals is never touched, which keeps large recordings cheap
//! to audit.

use super::{AnnotationEvent, RecordingHandle, RecordingReader, TextEncoding};
use crate::constants::edf::{
    ANNOTATION_LABEL, BYTES_PER_SAMPLE, CENTURY_PIVOT, FIXED_HEADER_LEN, SIGNAL_HEADER_LEN,
    TAL_DURATION_SEP, TAL_END, TAL_FIELD_SEP,
};
use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, warn};

/// Reader for European Data Format files.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdfReader;

impl RecordingReader for EdfReader {
    fn open(&self, path: &Path, encoding: TextEncoding) -> Result<RecordingHandle> {
        let open_err = |e: std::io::Error| Error::RecordingOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        };

        let file = File::open(path).map_err(open_err)?;
        let file_len = file.metadata().map_err(open_err)?.len();
        let mut reader = BufReader::new(file);

        let header = EdfHeader::read(&mut reader, path)?;
        let n_records = header.record_count(file_len, path)?;
        let annotation_events = read_annotations(&mut reader, &header, n_records, encoding)
            .map_err(open_err)?;

        let (n_samples, sampling_rate) = header
            .max_data_samples_per_record()
            .map_or((None, None), |spr| {
                #[allow(clippy::cast_precision_loss)]
                let rate = spr as f64 / header.record_duration;
                (Some(n_records * spr as u64), Some(rate))
            });

        debug!(
            "{}: {} signal(s), {} record(s), {} annotation(s)",
            path.display(),
            header.signals.len(),
            n_records,
            annotation_events.len()
        );

        Ok(RecordingHandle {
            source_path: path.to_path_buf(),
            meas_start: header.start,
            n_samples,
            sampling_rate,
            annotation_events,
        })
    }
}

#[derive(Debug)]
struct SignalHeader {
    label: String,
    samples_per_record: usize,
}

impl SignalHeader {
    fn is_annotation(&self) -> bool {
        self.label == ANNOTATION_LABEL
    }
}

#[derive(Debug)]
struct EdfHeader {
    start: Option<DateTime<FixedOffset>>,
    declared_records: i64,
    record_duration: f64,
    signals: Vec<SignalHeader>,
}

impl EdfHeader {
    fn read(reader: &mut impl Read, path: &Path) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidRecording {
            path: path.to_path_buf(),
            reason,
        };

        let mut fixed = [0u8; FIXED_HEADER_LEN];
        reader
            .read_exact(&mut fixed)
            .map_err(|_| invalid("file is shorter than the EDF header".to_string()))?;

        if fixed[0] != b'0' {
            return Err(invalid("not an EDF file (bad version field)".to_string()));
        }

        let start = parse_start(&field(&fixed, 168..176), &field(&fixed, 176..184));
        if start.is_none() {
            warn!("{}: unreadable start date/time in header", path.display());
        }

        let declared_records: i64 = field(&fixed, 236..244)
            .parse()
            .map_err(|_| invalid("number of data records is not a number".to_string()))?;
        let record_duration: f64 = field(&fixed, 244..252)
            .parse()
            .map_err(|_| invalid("data record duration is not a number".to_string()))?;
        let n_signals: usize = field(&fixed, 252..256)
            .parse()
            .map_err(|_| invalid("number of signals is not a number".to_string()))?;
        if n_signals == 0 {
            return Err(invalid("header declares no signals".to_string()));
        }

        let mut block = vec![0u8; n_signals * SIGNAL_HEADER_LEN];
        reader
            .read_exact(&mut block)
            .map_err(|_| invalid("signal headers are truncated".to_string()))?;

        // Signal headers are stored field-major: all labels, then all transducers, ...
        let spr_offset = n_signals * 216;
        let signals = (0..n_signals)
            .map(|i| {
                let label = field(&block, i * 16..(i + 1) * 16);
                let spr_range = spr_offset + i * 8..spr_offset + (i + 1) * 8;
                let samples_per_record = field(&block, spr_range).parse().map_err(|_| {
                    invalid(format!("samples per record of signal '{label}' is not a number"))
                })?;
                Ok(SignalHeader {
                    label,
                    samples_per_record,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            start,
            declared_records,
            record_duration,
            signals,
        })
    }

    fn header_len(&self) -> u64 {
        (FIXED_HEADER_LEN + self.signals.len() * SIGNAL_HEADER_LEN) as u64
    }

    fn record_len(&self) -> u64 {
        self.signals
            .iter()
            .map(|s| (s.samples_per_record * BYTES_PER_SAMPLE) as u64)
            .sum()
    }

    /// Number of data records, falling back to the file size when the
    /// header says -1 (recording still in progress when the file was closed).
    fn record_count(&self, file_len: u64, path: &Path) -> Result<u64> {
        if let Ok(n) = u64::try_from(self.declared_records) {
            return Ok(n);
        }

        let record_len = self.record_len();
        if record_len == 0 {
            return Err(Error::InvalidRecording {
                path: path.to_path_buf(),
                reason: "data records have zero length".to_string(),
            });
        }
        Ok(file_len.saturating_sub(self.header_len()) / record_len)
    }

    fn max_data_samples_per_record(&self) -> Option<usize> {
        self.signals
            .iter()
            .filter(|s| !s.is_annotation())
            .map(|s| s.samples_per_record)
            .max()
    }
}

/// Read every annotation signal of every data record.
fn read_annotations(
    reader: &mut (impl Read + Seek),
    header: &EdfHeader,
    n_records: u64,
    encoding: TextEncoding,
) -> std::io::Result<Vec<AnnotationEvent>> {
    let header_len = header.header_len();
    let record_len = header.record_len();

    let mut slots = Vec::new();
    let mut offset = 0u64;
    for signal in &header.signals {
        let len = signal.samples_per_record * BYTES_PER_SAMPLE;
        if signal.is_annotation() {
            slots.push((offset, len));
        }
        offset += len as u64;
    }

    let mut events = Vec::new();
    if slots.is_empty() {
        return Ok(events);
    }

    let mut buf = Vec::new();
    for record in 0..n_records {
        for &(slot_offset, len) in &slots {
            buf.resize(len, 0);
            reader.seek(SeekFrom::Start(header_len + record * record_len + slot_offset))?;
            match reader.read_exact(&mut buf) {
                Ok(()) => parse_tals(&buf, encoding, &mut events),
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    debug!("file truncated at data record {record}");
                    return Ok(events);
                }
                Err(e) => return Err(e),
            }
        }
    }

    Ok(events)
}

/// Parse the time-stamped annotation lists of one annotation signal block.
///
/// Each TAL is `+onset[\x15duration]\x14text\x14[text\x14...]\x00`. The first
/// TAL of every record carries no text and only keeps time; it yields nothing.
pub(crate) fn parse_tals(block: &[u8], encoding: TextEncoding, events: &mut Vec<AnnotationEvent>) {
    for tal in block.split(|&b| b == TAL_END).filter(|t| !t.is_empty()) {
        let mut parts = tal.split(|&b| b == TAL_FIELD_SEP);
        let Some(timing) = parts.next() else {
            continue;
        };

        let mut timing = timing.split(|&b| b == TAL_DURATION_SEP);
        let Some(onset) = timing.next().and_then(parse_number) else {
            debug!("skipping TAL with unreadable onset");
            continue;
        };
        let duration = timing.next().and_then(parse_number).unwrap_or(0.0);

        for text in parts.filter(|p| !p.is_empty()) {
            events.push(AnnotationEvent {
                onset,
                duration,
                description: encoding.decode(text),
            });
        }
    }
}

fn parse_number(bytes: &[u8]) -> Option<f64> {
    std::str::from_utf8(bytes).ok()?.trim().parse().ok()
}

fn field(buf: &[u8], range: Range<usize>) -> String {
    String::from_utf8_lossy(&buf[range]).trim().to_string()
}

/// Parse the `dd.mm.yy` / `hh.mm.ss` header pair into a UTC instant.
fn parse_start(date: &str, time: &str) -> Option<DateTime<FixedOffset>> {
    let [day, month, yy] = three_numbers(date)?;
    let [hour, minute, second] = three_numbers(time)?;
    let year = if yy >= CENTURY_PIVOT { 1900 + yy } else { 2000 + yy };

    let date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(date.and_time(time).and_utc().fixed_offset())
}

fn three_numbers(s: &str) -> Option<[u32; 3]> {
    let mut it = s
        .split(|c: char| !c.is_ascii_digit())
        .filter(|p| !p.is_empty())
        .map(str::parse::<u32>);
    let out = [it.next()?.ok()?, it.next()?.ok()?, it.next()?.ok()?];
    it.next().is_none().then_some(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_start_two_digit_years() {
        let start = parse_start("03.04.21", "10.20.30").unwrap();
        assert_eq!(start.year(), 2021);
        assert_eq!(start.month(), 4);
        assert_eq!(start.day(), 3);
        assert_eq!(start.hour(), 10);
        assert_eq!(start.second(), 30);

        assert_eq!(parse_start("01.01.99", "00.00.00").unwrap().year(), 1999);
        assert_eq!(parse_start("01.01.84", "00.00.00").unwrap().year(), 2084);
    }

    #[test]
    fn test_parse_start_rejects_garbage() {
        assert!(parse_start("xx.yy.zz", "10.20.30").is_none());
        assert!(parse_start("31.02.21", "10.20.30").is_none());
        assert!(parse_start("01.01.21", "25.00.00").is_none());
        assert!(parse_start("01.01.21.5", "10.00.00").is_none());
    }

    #[test]
    fn test_parse_tals_skips_timekeeping() {
        let block = b"+0\x14\x14\x00+1.5\x150.5\x14Seizure\x14\x00\x00\x00";
        let mut events = Vec::new();
        parse_tals(block, TextEncoding::Latin1, &mut events);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].onset, 1.5);
        assert_eq!(events[0].duration, 0.5);
        assert_eq!(events[0].description, "Seizure");
    }

    #[test]
    fn test_parse_tals_multiple_descriptions_share_onset() {
        let block = b"+12\x14Eyes closed\x14Artifact\x14\x00";
        let mut events = Vec::new();
        parse_tals(block, TextEncoding::Latin1, &mut events);

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.onset == 12.0 && e.duration == 0.0));
        assert_eq!(events[1].description, "Artifact");
    }

    #[test]
    fn test_parse_tals_negative_onset_and_bad_onset() {
        let block = b"-0.25\x14Pre\x14\x00+abc\x14Broken\x14\x00";
        let mut events = Vec::new();
        parse_tals(block, TextEncoding::Latin1, &mut events);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].onset, -0.25);
    }
}
