//! Progress display for batch processing.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner counting processed files.
///
/// Discovery is lazy, so the total is unknown and no bar length is shown.
pub fn create_file_progress(enabled: bool) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Show the file currently being processed.
pub fn set_current_file(pb: Option<&ProgressBar>, file_name: &str) {
    if let Some(pb) = pb {
        pb.set_message(file_name.to_string());
    }
}

/// Finish a progress bar with a message.
pub fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}

/// Increment a progress bar.
pub fn inc_progress(pb: Option<&ProgressBar>) {
    if let Some(pb) = pb {
        pb.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_progress_is_none() {
        assert!(create_file_progress(false).is_none());
        inc_progress(None);
        set_current_file(None, "a.edf");
        finish_progress(None, "done");
    }

    #[test]
    fn test_enabled_progress_counts() {
        let pb = create_file_progress(true);
        inc_progress(pb.as_ref());
        inc_progress(pb.as_ref());
        assert_eq!(pb.as_ref().map(ProgressBar::position), Some(2));
        finish_progress(pb, "done");
    }
}
