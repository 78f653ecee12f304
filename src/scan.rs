//! Source discovery.
//!
//! Lists the PNG files in the source directory and pairs each configured job
//! with the file it should read. Only the top level of the directory is
//! considered; screenshot folders are flat.
//!
//! When results are written back into the source directory, files that are
//! themselves the output of a configured job are never picked as a source.
//! Without that rule a loose pattern like `"dashboard"` would, on the second
//! run, match the `screenshot-1-dashboard.png` written by the first. With a
//! separate output directory nothing is excluded, so `raw/shot.png` can
//! become `store/shot.png`.

use crate::config::JobConfig;
use crate::imaging::ImageBackend;
use crate::matcher::is_png_name;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Source directory not found: {0}")]
    NotADirectory(PathBuf),
}

/// PNG file names directly inside `dir`, sorted by name.
///
/// Symlinks are followed; names that aren't valid UTF-8 are skipped.
pub fn list_png_files(dir: &Path) -> Result<Vec<String>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) if is_png_name(name) => names.push(name.to_string()),
            _ => {}
        }
    }
    Ok(names)
}

/// Size facts for one PNG in the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngInfo {
    pub name: String,
    /// `None` when the header couldn't be read.
    pub dims: Option<(u32, u32)>,
    pub bytes: u64,
}

/// Dimensions and file size of every PNG directly inside `dir`, sorted by name.
///
/// A file whose header can't be read is listed without dimensions rather
/// than failing the whole listing.
pub fn inspect_png_files(
    backend: &impl ImageBackend,
    dir: &Path,
) -> Result<Vec<PngInfo>, ScanError> {
    list_png_files(dir)?
        .into_iter()
        .map(|name| -> Result<PngInfo, ScanError> {
            let path = dir.join(&name);
            let bytes = std::fs::metadata(&path)?.len();
            let dims = backend.identify(&path).ok().map(|d| d.as_tuple());
            Ok(PngInfo { name, dims, bytes })
        })
        .collect()
}

/// A job paired with the source file it resolved to.
#[derive(Debug, Clone)]
pub struct ResolvedJob<'a> {
    /// 1-based position in the config.
    pub index: usize,
    pub job: &'a JobConfig,
    /// Chosen source file name, if any candidate matched.
    pub source: Option<String>,
    /// How many files matched; more than one means the first sorted name won.
    pub candidates: usize,
}

/// True when both paths name the same directory.
///
/// Falls back to comparing the paths as written when either one can't be
/// canonicalized (an output directory that doesn't exist yet).
pub fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Pair every job with its source file.
///
/// `files` should be sorted (as [`list_png_files`] returns them) so the choice
/// among several candidates is deterministic. With `exclude_outputs`, names
/// used as a job output are never candidates.
pub fn resolve_jobs<'a>(
    jobs: &'a [JobConfig],
    files: &[String],
    exclude_outputs: bool,
) -> Vec<ResolvedJob<'a>> {
    let outputs: HashSet<&str> = if exclude_outputs {
        jobs.iter().map(|j| j.output.as_str()).collect()
    } else {
        HashSet::new()
    };

    jobs.iter()
        .enumerate()
        .map(|(i, job)| {
            let candidates: Vec<&str> = job
                .matcher()
                .map(|m| m.find_all(files))
                .unwrap_or_default()
                .into_iter()
                .filter(|name| !outputs.contains(name))
                .collect();

            ResolvedJob {
                index: i + 1,
                job,
                source: candidates.first().map(|s| s.to_string()),
                candidates: candidates.len(),
            }
        })
        .collect()
}
