//! Batch coordination: discover, extract, accumulate, export, reconcile.

use super::accumulator::{Accumulator, AnnotationTable, TimingTable};
use super::discovery::FileDiscovery;
use super::extract::{
    AnnotationRow, TimingRow, extract_annotations, extract_timing, file_name_of,
};
use super::reconcile::split_by_folder;
use super::timeline::sample_timeline;
use crate::config::OutputFormat;
use crate::constants::output_suffixes;
use crate::error::{Error, Result, display_chain};
use crate::output::{ExportSink, Sheet, progress, sheets_for};
use crate::recording::{RecordingReader, TextEncoding};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Recording file extension, without the dot.
    pub extension: String,
    /// Encoding of annotation text.
    pub encoding: TextEncoding,
    /// Timeline density in points per second.
    pub timeline_rate: f64,
    /// Successful files between running exports.
    pub export_every: usize,
    /// Label for the running annotation sheet (None = root folder name).
    pub sheet_name: Option<String>,
    /// Workbook format, used for output file names.
    pub format: OutputFormat,
    /// Whether to show a progress spinner.
    pub progress_enabled: bool,
}

/// Output locations for a batch rooted at one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Annotations workbook.
    pub annotations: PathBuf,
    /// Timings workbook.
    pub timings: PathBuf,
    /// Timeline plot page.
    pub timeline: PathBuf,
}

impl OutputPaths {
    /// `<root>/<name>_annotations.<ext>` and friends, `name` being the root folder name.
    pub fn for_root(root: &Path, root_name: &str, format: OutputFormat) -> Self {
        let ext = format.extension();
        Self {
            annotations: root.join(format!("{root_name}{}.{ext}", output_suffixes::ANNOTATIONS)),
            timings: root.join(format!("{root_name}{}.{ext}", output_suffixes::TIMINGS)),
            timeline: root.join(format!("{root_name}{}", output_suffixes::TIMELINE)),
        }
    }
}

/// Step at which a file was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// The reader could not open or parse the file.
    Open,
    /// The file opened but required metadata was missing or invalid.
    Extract,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Extract => write!(f, "extract"),
        }
    }
}

/// Why a single file did not make it into the tables.
#[derive(Debug)]
pub struct FileFailure {
    /// The file.
    pub path: PathBuf,
    /// Where processing stopped.
    pub stage: FailureStage,
    /// The underlying error.
    pub error: Error,
}

/// Everything extracted from one recording, ready to accumulate.
#[derive(Debug, Clone)]
pub struct FileExtract {
    /// Annotation rows, possibly empty.
    pub annotations: Vec<AnnotationRow>,
    /// Recording interval.
    pub timing: TimingRow,
}

/// A file left out of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// The file.
    pub path: PathBuf,
    /// Where processing stopped.
    pub stage: FailureStage,
    /// Error message including causes.
    pub reason: String,
}

/// A running export that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFailure {
    /// Workbook that failed.
    pub workbook: PathBuf,
    /// Last file accumulated before the attempt.
    pub after_file: PathBuf,
    /// Error message including causes.
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug)]
pub struct BatchReport {
    /// Root folder name, used for titles and file names.
    pub root_name: String,
    /// Where outputs were written.
    pub paths: OutputPaths,
    /// Recording files discovered.
    pub discovered: usize,
    /// Files that reached the tables.
    pub processed: usize,
    /// Files abandoned, in discovery order.
    pub skipped: Vec<SkippedFile>,
    /// Running exports that failed.
    pub export_failures: Vec<ExportFailure>,
    /// Final annotation table.
    pub annotations: AnnotationTable,
    /// Final timing table.
    pub timings: TimingTable,
    /// Timeline derived from the timing table.
    pub timeline: Vec<f64>,
    /// Wall time of the run in seconds.
    pub duration_secs: f64,
}

/// Open and extract one recording. Nothing is accumulated here.
pub fn process_file<R: RecordingReader + ?Sized>(
    path: &Path,
    reader: &R,
    encoding: TextEncoding,
) -> std::result::Result<FileExtract, FileFailure> {
    let fail = |stage, error| FileFailure {
        path: path.to_path_buf(),
        stage,
        error,
    };

    let handle = reader
        .open(path, encoding)
        .map_err(|e| fail(FailureStage::Open, e))?;
    let annotations = extract_annotations(&handle, path);
    let timing = extract_timing(&handle).map_err(|e| fail(FailureStage::Extract, e))?;

    debug!(
        "Extracted {} annotation(s), {} .. {} from {}",
        annotations.len(),
        timing.start_time,
        timing.end_time,
        path.display()
    );

    Ok(FileExtract {
        annotations,
        timing,
    })
}

/// Run the whole pipeline over `root`.
///
/// Per-file failures are logged and recorded in the report; only a bad
/// root, an empty root or a failed final export abort the run.
pub fn run_batch<R, S>(
    root: &Path,
    options: &BatchOptions,
    reader: &R,
    sink: &mut S,
) -> Result<BatchReport>
where
    R: RecordingReader + ?Sized,
    S: ExportSink + ?Sized,
{
    let started = Instant::now();

    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let discovery = FileDiscovery::new(&root, &options.extension)?;
    let root_name = file_name_of(&root);
    let paths = OutputPaths::for_root(&root, &root_name, options.format);
    let running_sheet = options.sheet_name.as_deref().unwrap_or(&root_name);

    info!("Scanning {} for .{} files", root.display(), options.extension);

    let file_progress = progress::create_file_progress(options.progress_enabled);
    let mut acc = Accumulator::new();
    let mut discovered = 0;
    let mut processed = 0;
    let mut since_export = 0;
    let mut skipped = Vec::new();
    let mut export_failures = Vec::new();

    for path in discovery {
        discovered += 1;
        progress::set_current_file(file_progress.as_ref(), &file_name_of(&path));

        match process_file(&path, reader, options.encoding) {
            Ok(extract) => {
                let n = extract.annotations.len();
                acc.append_annotations(extract.annotations);
                acc.append_timing(extract.timing);
                processed += 1;
                since_export += 1;
                info!(
                    "Processed {} ({} annotations, {} total)",
                    path.display(),
                    n,
                    acc.annotations().len()
                );

                if since_export >= options.export_every {
                    since_export = 0;
                    let attempts = [
                        (
                            &paths.annotations,
                            Sheet::from_table(running_sheet, acc.annotations()),
                        ),
                        (
                            &paths.timings,
                            Sheet::from_table(&root_name, acc.timings()),
                        ),
                    ];
                    for (workbook, sheet) in attempts {
                        if let Err(e) = sink.write_workbook(workbook, &[sheet]) {
                            let reason = display_chain(&e);
                            error!("Export failed for {}: {}", workbook.display(), reason);
                            export_failures.push(ExportFailure {
                                workbook: workbook.clone(),
                                after_file: path.clone(),
                                reason,
                            });
                        }
                    }
                }
            }
            Err(failure) => {
                let reason = display_chain(&failure.error);
                error!(
                    "Skipping {} ({} failed): {}",
                    failure.path.display(),
                    failure.stage,
                    reason
                );
                skipped.push(SkippedFile {
                    path: failure.path,
                    stage: failure.stage,
                    reason,
                });
            }
        }
        progress::inc_progress(file_progress.as_ref());
    }

    progress::finish_progress(file_progress, "Complete");

    if discovered == 0 {
        return Err(Error::NoRecordingFiles {
            path: root,
            extension: options.extension.clone(),
        });
    }

    let (annotations, timings) = acc.into_tables();

    if processed > 0 {
        let annotation_groups = split_by_folder(&annotations);
        let timing_groups = split_by_folder(&timings);
        info!(
            "Writing {} folder sheet(s) to {}",
            annotation_groups.len().max(timing_groups.len()),
            paths.annotations.display()
        );
        sink.write_workbook(&paths.annotations, &sheets_for(&annotation_groups))?;
        sink.write_workbook(&paths.timings, &sheets_for(&timing_groups))?;
    } else {
        warn!("No recordings could be processed; no workbooks written");
    }

    let timeline = sample_timeline(&timings, options.timeline_rate);

    Ok(BatchReport {
        root_name,
        paths,
        discovered,
        processed,
        skipped,
        export_failures,
        annotations,
        timings,
        timeline,
        duration_secs: started.elapsed().as_secs_f64(),
    })
}
