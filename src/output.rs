//! CLI output formatting.
//!
//! # Job-First Display
//!
//! Every job is shown by its position and label first, with the output file
//! after an arrow. What happened (source, crop, size, or why nothing
//! happened) follows as indented context lines:
//!
//! ```text
//! 001 Dashboard View → screenshot-1-dashboard.png
//!     Source: Screenshot 2025-11-17 at 8.02.08 PM.png (1920x1080)
//!     Anchor: top
//!     Crop: (96, 0, 1824, 1080) → 1280x800
//!     Saved: 412.3 KB
//! 002 Claude Desktop → screenshot-6-claude-desktop.png
//!     Missing: no PNG matches *8.33.48*
//!
//! Wrote 1 of 2 images to screenshots (1 missing, 0 failed)
//! ```
//!
//! # Architecture
//!
//! Each `format_*` function returns `Vec<String>` and is pure, so the exact
//! console output is unit tested. `print_*` wrappers write to stdout.

use crate::batch::{BatchEvent, BatchReport, JobOutcome, JobResult, RunMode};
use crate::imaging::{CropBox, CropSpec, IconVariant};
use crate::scan::PngInfo;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Batch output
// ============================================================================

/// Format one finished job.
pub fn format_job_result(result: &JobResult, target: (u32, u32)) -> Vec<String> {
    let ctx = indent(1);
    let mut lines = vec![format!(
        "{} {} → {}",
        format_index(result.index),
        result.label,
        result.output
    )];

    match &result.outcome {
        JobOutcome::Written {
            source,
            source_dims,
            crop,
            bytes,
        } => {
            lines.push(format!(
                "{ctx}Source: {} ({}x{})",
                source, source_dims.0, source_dims.1
            ));
            lines.push(format!("{ctx}Anchor: {}", result.anchor));
            lines.push(crop_line(*crop, *source_dims, target));
            if let Some(bytes) = bytes {
                lines.push(format!("{ctx}Saved: {}", format_kb(*bytes)));
            }
        }
        JobOutcome::Planned {
            source,
            source_dims,
            crop,
        } => {
            lines.push(format!(
                "{ctx}Source: {} ({}x{})",
                source, source_dims.0, source_dims.1
            ));
            lines.push(format!("{ctx}Anchor: {}", result.anchor));
            lines.push(crop_line(*crop, *source_dims, target));
        }
        JobOutcome::Missing { wanted } => {
            lines.push(format!("{ctx}Missing: no PNG matches {}", wanted));
        }
        JobOutcome::Failed { source, error } => {
            lines.push(format!("{ctx}Source: {}", source));
            lines.push(format!("{ctx}Error: {}", error));
        }
    }

    if result.candidates > 1 {
        lines.push(format!(
            "{ctx}Note: {} files matched, used the first",
            result.candidates
        ));
    }
    if let Some(notes) = &result.notes {
        lines.push(format!("{ctx}Notes: {}", notes));
    }
    lines
}

fn crop_line(crop: CropBox, source_dims: (u32, u32), target: (u32, u32)) -> String {
    if crop.is_full(source_dims) {
        format!("{}Crop: none → {}x{}", indent(1), target.0, target.1)
    } else {
        format!("{}Crop: {} → {}x{}", indent(1), crop, target.0, target.1)
    }
}

/// Format a single batch progress event as display lines.
pub fn format_batch_event(event: &BatchEvent, target: (u32, u32)) -> Vec<String> {
    match event {
        BatchEvent::Started {
            source_dir,
            png_files,
            jobs,
        } => vec![format!(
            "Scanning {}: {} PNG files, {} jobs → {}x{}",
            source_dir.display(),
            png_files,
            jobs,
            target.0,
            target.1
        )],
        BatchEvent::JobFinished(result) => format_job_result(result, target),
    }
}

/// Format the closing summary of a run.
pub fn format_summary(report: &BatchReport, mode: RunMode) -> Vec<String> {
    let total = report.results.len();
    let (verb, done) = match mode {
        RunMode::Write => ("Wrote", report.written()),
        RunMode::DryRun => ("Would write", report.planned()),
    };
    vec![
        String::new(),
        format!(
            "{} {} of {} images to {} ({} missing, {} failed)",
            verb,
            done,
            total,
            report.output_dir.display(),
            report.missing(),
            report.failed()
        ),
    ]
}

pub fn print_summary(report: &BatchReport, mode: RunMode) {
    for line in format_summary(report, mode) {
        println!("{}", line);
    }
}

// ============================================================================
// Dimension audit
// ============================================================================

/// Format every PNG in the source directory with its size and whether it
/// already has the target dimensions.
pub fn format_dimension_audit(files: &[PngInfo], target: (u32, u32)) -> Vec<String> {
    if files.is_empty() {
        return vec!["No PNG files found".to_string()];
    }

    let ctx = indent(1);
    let mut lines = Vec::new();
    for file in files {
        lines.push(file.name.clone());
        match file.dims {
            Some((w, h)) => lines.push(format!("{ctx}Dimensions: {}x{}", w, h)),
            None => lines.push(format!("{ctx}Dimensions: unreadable")),
        }
        lines.push(format!("{ctx}Size: {}", format_kb(file.bytes)));
        if file.dims == Some(target) {
            lines.push(format!("{ctx}Store size: yes"));
        } else {
            lines.push(format!(
                "{ctx}Store size: no (needs {}x{})",
                target.0, target.1
            ));
        }
    }

    let ready = files.iter().filter(|f| f.dims == Some(target)).count();
    lines.push(String::new());
    lines.push(format!(
        "{} of {} PNG files are already {}x{}",
        ready,
        files.len(),
        target.0,
        target.1
    ));
    lines
}

pub fn print_dimension_audit(files: &[PngInfo], target: (u32, u32)) {
    for line in format_dimension_audit(files, target) {
        println!("{}", line);
    }
}

// ============================================================================
// Icons
// ============================================================================

/// Format the icon set result plus the manifest snippet that references it.
pub fn format_icon_output(icons: &[IconVariant]) -> Vec<String> {
    let mut lines: Vec<String> = icons
        .iter()
        .map(|icon| {
            format!(
                "Created {} ({}x{})",
                icon.path.display(),
                icon.size,
                icon.size
            )
        })
        .collect();

    lines.push(String::new());
    lines.push("manifest.json:".to_string());
    lines.push(format!("{}\"icons\": {{", indent(1)));
    for (i, icon) in icons.iter().enumerate() {
        let comma = if i + 1 < icons.len() { "," } else { "" };
        lines.push(format!(
            "{}\"{}\": \"{}\"{}",
            indent(2),
            icon.size,
            file_name(&icon.path),
            comma
        ));
    }
    lines.push(format!("{}}}", indent(1)));
    lines
}

pub fn print_icon_output(icons: &[IconVariant]) {
    for line in format_icon_output(icons) {
        println!("{}", line);
    }
}

// ============================================================================
// Crop box
// ============================================================================

/// Format a crop-box computation as the `box` command shows it.
pub fn format_crop_box(spec: &CropSpec, crop: &CropBox) -> Vec<String> {
    let source = (spec.source_width, spec.source_height);
    let axis = if crop.is_full(source) {
        "none"
    } else if crop.width() < spec.source_width {
        "width"
    } else {
        "height"
    };
    vec![
        format!(
            "Source: {}x{} (ratio {:.3})",
            spec.source_width,
            spec.source_height,
            spec.source_width as f64 / spec.source_height as f64
        ),
        format!(
            "Target: {}x{} (ratio {:.3})",
            spec.target_width,
            spec.target_height,
            spec.target_width as f64 / spec.target_height as f64
        ),
        format!("Anchor: {}", spec.anchor),
        format!("Cropped axis: {}", axis),
        format!("Box: {} ({}x{})", crop, crop.width(), crop.height()),
    ]
}

pub fn print_crop_box(spec: &CropSpec, crop: &CropBox) {
    for line in format_crop_box(spec, crop) {
        println!("{}", line);
    }
}
