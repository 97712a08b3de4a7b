//! Directory helpers and the per-batch report shared by every conversion.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::waveform_pipeline::common::error::{PipelineError, Result};
use crate::waveform_pipeline::conversions::timing::BatchTimings;

/// Image extensions picked up by the extraction batch.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

/// Extension of trace files.
pub const CSV_EXTENSIONS: &[&str] = &["csv"];

/// Outcome counts of one batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Input files considered
    pub scanned: usize,
    /// Input files fully processed
    pub succeeded: usize,
    /// Input files skipped after a per-file failure or an empty result
    pub skipped: usize,
    /// Output files written
    pub generated: usize,
    pub timings: BatchTimings,
}

impl BatchReport {
    pub fn log_summary(&self, label: &str) {
        info!(
            scanned = self.scanned,
            succeeded = self.succeeded,
            skipped = self.skipped,
            generated = self.generated,
            "{} finished",
            label
        );
        self.timings.log_summary();
    }
}

/// Files in `dir` whose extension matches one of `extensions` (case-insensitive),
/// sorted by file name.
pub fn list_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| PipelineError::InputReadError(format!("{}: {}", dir.display(), e)))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_extension(path, extensions))
        .collect();
    files.sort();
    Ok(files)
}

/// Splits `files` into the first file seen per stem and the later files sharing
/// an earlier stem. Outputs are named by stem, so the later ones would overwrite.
pub fn split_duplicate_stems(files: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut seen = HashSet::new();
    files.into_iter().partition(|path| seen.insert(file_stem(path)))
}

pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .map_err(|e| PipelineError::OutputWriteError(format!("{}: {}", dir.display(), e)))
}

/// File name without its extension, lossily converted.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<input_dir_name>_csv_results`, next to the input directory.
pub fn default_extract_output_dir(input_dir: &Path) -> PathBuf {
    let name = input_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "images".to_string());
    input_dir
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(format!("{name}_csv_results"))
}

/// `<stem>_aug_<NNN>.csv` with a 1-based, zero-padded sequence number.
pub fn augmented_file_name(stem: &str, sequence: usize) -> String {
    format!("{stem}_aug_{sequence:03}.csv")
}
