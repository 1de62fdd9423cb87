//! Batch normalization of files on disk.
//!
//! This is a *caller* of the [`Normalizer`]: it finds input files, fans one
//! `process` call per image out over rayon, and persists what comes back.
//! The normalizer itself never touches the filesystem.
//!
//! ## Output Structure
//!
//! Each input gets a zero-padded key from its position in the sorted input
//! list:
//!
//! ```text
//! normalized/
//! ├── 000000000.jpg      # Normalized image (only on success)
//! ├── 000000000.json     # ImageRecord: source, status, dimensions, error
//! ├── 000000001.json     # A failed input still gets its record
//! └── stats.json         # BatchSummary over all inputs
//! ```
//!
//! ## Parallel Processing
//!
//! Images are processed in parallel using [rayon](https://docs.rs/rayon); the
//! pool size is set once by the binary from `processing.max_processes`.

use crate::imaging::supported_input_extensions;
use crate::normalizer::{Normalizer, Outcome};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What happened to one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    FailedToOpen,
    FailedToResize,
}

/// Per-input record written next to the output as `<key>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub key: String,
    pub source: String,
    pub status: Status,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub original_width: Option<u32>,
    pub original_height: Option<u32>,
    pub error_message: Option<String>,
}

impl ImageRecord {
    fn from_outcome(key: &str, source: &Path, outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Normalized(img) => Self {
                key: key.to_string(),
                source: source.display().to_string(),
                status: Status::Success,
                width: Some(img.width),
                height: Some(img.height),
                original_width: Some(img.original_width),
                original_height: Some(img.original_height),
                error_message: None,
            },
            Outcome::Failed { message } => {
                Self::failed(key, source, Status::FailedToResize, message.clone())
            }
        }
    }

    fn failed(key: &str, source: &Path, status: Status, message: String) -> Self {
        Self {
            key: key.to_string(),
            source: source.display().to_string(),
            status,
            width: None,
            height: None,
            original_width: None,
            original_height: None,
            error_message: Some(message),
        }
    }
}

/// Counts over a whole batch, written as `stats.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub count: usize,
    pub successes: usize,
    pub failed_to_open: usize,
    pub failed_to_resize: usize,
    /// Occurrences of each distinct error message.
    pub status_dict: BTreeMap<String, usize>,
}

impl BatchSummary {
    pub fn from_records(records: &[ImageRecord]) -> Self {
        let mut summary = Self {
            count: records.len(),
            ..Self::default()
        };
        for record in records {
            match record.status {
                Status::Success => summary.successes += 1,
                Status::FailedToOpen => summary.failed_to_open += 1,
                Status::FailedToResize => summary.failed_to_resize += 1,
            }
            if let Some(message) = &record.error_message {
                *summary.status_dict.entry(message.clone()).or_default() += 1;
            }
        }
        summary
    }
}

/// Output key for the input at `index`.
pub fn key_for(index: usize) -> String {
    format!("{index:09}")
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_input_extensions()
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

/// Expand `paths` into the list of files to normalize.
///
/// Files are taken as given, whatever their extension. Directories are walked
/// recursively and contribute files with a decodable extension, sorted by
/// path so keys are stable across runs.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, BatchError> {
    let mut inputs = Vec::new();
    for path in paths {
        if !path.is_dir() {
            inputs.push(path.clone());
            continue;
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && has_supported_extension(entry.path()) {
                found.push(entry.into_path());
            }
        }
        found.sort();
        inputs.extend(found);
    }
    Ok(inputs)
}

/// Normalize every input into `output_dir`, returning the batch summary.
///
/// Per-image failures are recorded, not returned; only failures to write the
/// output directory abort the batch. Each finished record is also sent to
/// `events` (if provided) for progress display.
pub fn run(
    normalizer: &Normalizer,
    inputs: &[PathBuf],
    output_dir: &Path,
    events: Option<Sender<ImageRecord>>,
) -> Result<BatchSummary, BatchError> {
    fs::create_dir_all(output_dir)?;
    info!(
        count = inputs.len(),
        mode = %normalizer.resize_mode(),
        size = normalizer.target_size(),
        output = %output_dir.display(),
        "Starting batch"
    );

    let records = inputs
        .par_iter()
        .enumerate()
        .map(|(index, source)| {
            let record = normalize_one(normalizer, &key_for(index), source, output_dir)?;
            if let Some(tx) = &events {
                tx.send(record.clone()).ok();
            }
            Ok(record)
        })
        .collect::<Result<Vec<_>, BatchError>>()?;

    let summary = BatchSummary::from_records(&records);
    write_json(&output_dir.join("stats.json"), &summary)?;
    info!(
        successes = summary.successes,
        failed = summary.count - summary.successes,
        "Batch complete"
    );
    Ok(summary)
}

fn normalize_one(
    normalizer: &Normalizer,
    key: &str,
    source: &Path,
    output_dir: &Path,
) -> Result<ImageRecord, BatchError> {
    let record = match File::open(source) {
        Ok(file) => {
            let outcome = normalizer.process_reader(file);
            if let Some(img) = outcome.image() {
                fs::write(output_dir.join(format!("{key}.jpg")), &img.bytes)?;
            }
            ImageRecord::from_outcome(key, source, &outcome)
        }
        Err(err) => ImageRecord::failed(key, source, Status::FailedToOpen, err.to_string()),
    };

    if let Some(message) = &record.error_message {
        warn!(key, source = %source.display(), "{message}");
    }
    write_json(&output_dir.join(format!("{key}.json")), &record)?;
    Ok(record)
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<(), BatchError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
