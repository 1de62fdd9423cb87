//! CLI output formatting for batch runs.
//!
//! # Output Format
//!
//! One entry per finished image, in completion order:
//!
//! ```text
//! 000000000 640x480 → 256x256
//!     Source: photos/dawn.png
//! 000000001 failed
//!     Source: photos/broken.jpg
//!     Error: Image decoding error
//! ```
//!
//! And a summary at the end:
//!
//! ```text
//! Normalized 1 of 2 images → normalized/
//!     failed to open: 0
//!     failed to resize: 1
//! Errors
//!     1× Image decoding error
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure and do no I/O.

use crate::batch::{BatchSummary, ImageRecord, Status};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn dims(width: Option<u32>, height: Option<u32>) -> Option<String> {
    Some(format!("{}x{}", width?, height?))
}

/// Format the progress entry for one finished image.
pub fn format_record(record: &ImageRecord) -> Vec<String> {
    let header = match (
        record.status,
        dims(record.original_width, record.original_height),
        dims(record.width, record.height),
    ) {
        (Status::Success, Some(original), Some(output)) => {
            format!("{} {} → {}", record.key, original, output)
        }
        (Status::FailedToOpen, ..) => format!("{} unreadable", record.key),
        _ => format!("{} failed", record.key),
    };

    let mut lines = vec![header, format!("{}Source: {}", indent(1), record.source)];
    if let Some(message) = &record.error_message {
        lines.push(format!("{}Error: {}", indent(1), message));
    }
    lines
}

/// Format the end-of-run summary.
pub fn format_summary(summary: &BatchSummary, output_dir: &Path) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Normalized {} of {} images → {}",
            summary.successes,
            summary.count,
            output_dir.display()
        ),
        format!("{}failed to open: {}", indent(1), summary.failed_to_open),
        format!("{}failed to resize: {}", indent(1), summary.failed_to_resize),
    ];

    if !summary.status_dict.is_empty() {
        lines.push("Errors".to_string());
        let mut errors: Vec<(&String, &usize)> = summary.status_dict.iter().collect();
        errors.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (message, count) in errors {
            lines.push(format!("{}{}× {}", indent(1), count, message));
        }
    }
    lines
}

pub fn print_record(record: &ImageRecord) {
    for line in format_record(record) {
        println!("{}", line);
    }
}

pub fn print_summary(summary: &BatchSummary, output_dir: &Path) {
    for line in format_summary(summary, output_dir) {
        println!("{}", line);
    }
}
