//! Aggregation pipeline components.

mod accumulator;
mod coordinator;
mod discovery;
mod extract;
mod reconcile;
mod timeline;

pub use accumulator::{Accumulator, AnnotationTable, Table, TimingTable};
pub use coordinator::{
    BatchOptions, BatchReport, ExportFailure, FailureStage, FileExtract, FileFailure,
    OutputPaths, SkippedFile, process_file, run_batch,
};
pub use discovery::FileDiscovery;
pub use extract::{
    AnnotationRow, TimingRow, extract_annotations, extract_timing, file_name_of, folder_name_of,
    to_naive,
};
pub use reconcile::{FolderGroup, FolderTagged, split_by_folder};
pub use timeline::{epoch_seconds, sample_timeline};
