//! Batch configuration module.
//!
//! Handles loading, validating, and merging `shotcrop.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top, so a config
//! file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source_dir = "screenshots"   # Where source PNGs live
//! # output_dir = "store"       # Where results go (defaults to source_dir)
//!
//! [target]
//! width = 1280                 # Store-listing screenshot size
//! height = 800
//!
//! [output]
//! compression = "best"         # PNG deflate effort: fast | default | best
//!
//! [icons]
//! sizes = [16, 48, 128]        # Square icon sizes for `shotcrop icons`
//! prefix = "logo"              # logo-16.png, logo-48.png, ...
//!
//! [processing]
//! max_processes = 4            # Max parallel workers (omit for auto = CPU cores)
//!
//! [[jobs]]
//! pattern = "8.02.08"          # or: input = "Screenshot 2025-11-17 at 8.02.08 PM.png"
//! output = "screenshot-1-dashboard.png"
//! description = "Dashboard View"
//! anchor = "top"               # top | bottom | left | right | center
//! notes = "Focus on summary cards at top"
//! ```
//!
//! Unknown keys are rejected to catch typos early. Unknown *anchor names* are
//! not: they fall back to `center`.

use crate::imaging::{Anchor, Compression, IconSetConfig};
use crate::matcher::{self, Matcher};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory when `--config` isn't given.
pub const DEFAULT_CONFIG_FILE: &str = "shotcrop.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Batch configuration loaded from `shotcrop.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Directory holding the source images.
    pub source_dir: PathBuf,
    /// Directory results are written to. Defaults to `source_dir`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Output dimensions for every job.
    pub target: TargetConfig,
    /// PNG encoding settings.
    pub output: OutputConfig,
    /// Icon set settings for `shotcrop icons`.
    pub icons: IconsConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
    /// One entry per image to produce.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub jobs: Vec<JobConfig>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("screenshots"),
            output_dir: None,
            target: TargetConfig::default(),
            output: OutputConfig::default(),
            icons: IconsConfig::default(),
            processing: ProcessingConfig::default(),
            jobs: Vec::new(),
        }
    }
}

impl BatchConfig {
    /// Where results are written: `output_dir`, or `source_dir` when unset.
    pub fn resolved_output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.source_dir)
    }

    /// Make relative directories relative to `base` instead of the working
    /// directory. Absolute paths are left alone.
    pub fn rebase(&mut self, base: &Path) {
        if self.source_dir.is_relative() {
            self.source_dir = base.join(&self.source_dir);
        }
        if let Some(output) = self.output_dir.as_mut() {
            if output.is_relative() {
                *output = base.join(&*output);
            }
        }
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.width == 0 || self.target.height == 0 {
            return Err(ConfigError::Validation(
                "target.width and target.height must be non-zero".into(),
            ));
        }
        if self.icons.sizes.is_empty() {
            return Err(ConfigError::Validation(
                "icons.sizes must not be empty".into(),
            ));
        }
        if self.icons.sizes.contains(&0) {
            return Err(ConfigError::Validation(
                "icons.sizes values must be non-zero".into(),
            ));
        }
        if self.icons.prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "icons.prefix must not be empty".into(),
            ));
        }

        let mut outputs = HashSet::new();
        for (i, job) in self.jobs.iter().enumerate() {
            let n = i + 1;
            match (&job.input, &job.pattern) {
                (Some(_), Some(_)) => {
                    return Err(ConfigError::Validation(format!(
                        "jobs[{n}]: set either input or pattern, not both"
                    )));
                }
                (None, None) => {
                    return Err(ConfigError::Validation(format!(
                        "jobs[{n}]: one of input or pattern is required"
                    )));
                }
                (Some(s), None) | (None, Some(s)) if s.trim().is_empty() => {
                    return Err(ConfigError::Validation(format!(
                        "jobs[{n}]: input/pattern must not be empty"
                    )));
                }
                _ => {}
            }
            if !matcher::is_png_name(&job.output) {
                return Err(ConfigError::Validation(format!(
                    "jobs[{n}]: output must be a .png file name, got \"{}\"",
                    job.output
                )));
            }
            if job.output.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "jobs[{n}]: output must be a bare file name, got \"{}\"",
                    job.output
                )));
            }
            if !outputs.insert(job.output.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "jobs[{n}]: duplicate output \"{}\"",
                    job.output
                )));
            }
        }
        Ok(())
    }
}

/// Exact output dimensions shared by all jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        // Chrome Web Store screenshot size
        Self {
            width: 1280,
            height: 800,
        }
    }
}

impl TargetConfig {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// PNG output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub compression: Compression,
}

/// Icon set settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconsConfig {
    /// Square edge lengths to generate.
    pub sizes: Vec<u32>,
    /// Output file name prefix.
    pub prefix: String,
}

impl Default for IconsConfig {
    fn default() -> Self {
        let defaults = IconSetConfig::default();
        Self {
            sizes: defaults.sizes,
            prefix: defaults.prefix,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, never below one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// One image to produce.
///
/// Exactly one of `input` (exact file name) or `pattern` (name fragment) must
/// be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Output file name, written into the output directory.
    pub output: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub anchor: Anchor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl JobConfig {
    /// Matcher for this job's source file. `input` wins if both are set.
    pub fn matcher(&self) -> Option<Matcher> {
        match (&self.input, &self.pattern) {
            (Some(name), _) => Some(Matcher::Exact(name.clone())),
            (None, Some(fragment)) => Some(Matcher::Contains(fragment.clone())),
            (None, None) => None,
        }
    }

    /// Human label: the description, or the output name when there is none.
    pub fn label(&self) -> &str {
        if self.description.is_empty() {
            &self.output
        } else {
            &self.description
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(BatchConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely (so a `jobs`
///   list is replaced, never appended to).
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BatchConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BatchConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to defaults when it is absent.
///
/// Relative `source_dir` / `output_dir` values in the file are resolved
/// against the directory holding the file. Without a file, the stock
/// `screenshots` directory is relative to the working directory.
pub fn load_config(path: &Path) -> Result<BatchConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    let from_file = overlay.is_some();
    let mut config = resolve_config(base, overlay)?;
    if from_file {
        if let Some(dir) = path.parent() {
            config.rebase(dir);
        }
    }
    Ok(config)
}

/// Returns a fully-commented stock `shotcrop.toml`.
///
/// Used by the `gen-config` CLI command. The example jobs are commented out,
/// so parsing this yields exactly the defaults.
pub fn stock_config_toml() -> &'static str {
    r##"# shotcrop configuration
# ======================
# All settings are optional. Values shown below are the defaults.
# Unknown keys are rejected.

# Directory holding the source screenshots. Relative paths are resolved
# against the directory this file is in.
source_dir = "screenshots"

# Directory results are written to. Defaults to source_dir.
# output_dir = "store"

# ---------------------------------------------------------------------------
# Output size
# ---------------------------------------------------------------------------
[target]
# Every job is cropped to this aspect ratio, then resized to exactly this size.
# 1280x800 is the Chrome Web Store screenshot size; 640x400 is also accepted.
width = 1280
height = 800

# ---------------------------------------------------------------------------
# PNG encoding
# ---------------------------------------------------------------------------
[output]
# Deflate effort: "fast", "default" or "best" (smallest files, slowest).
compression = "best"

# ---------------------------------------------------------------------------
# Extension icons (shotcrop icons <logo.png>)
# ---------------------------------------------------------------------------
[icons]
sizes = [16, 48, 128]
# Files are named <prefix>-<size>.png
prefix = "logo"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4

# ---------------------------------------------------------------------------
# Jobs
# ---------------------------------------------------------------------------
# One [[jobs]] entry per image. Match the source with either:
#   input   = exact file name (any whitespace matches any whitespace, so the
#             narrow space macOS puts before AM/PM can be typed as a space)
#   pattern = a fragment of the file name, e.g. the capture time
#
# anchor chooses what survives the crop:
#   top / bottom  keep that edge when the height is trimmed
#   left / right  keep that edge when the width is trimmed
#   center        trim equally (also used for unknown names)
#
# [[jobs]]
# pattern = "8.02.08"
# output = "screenshot-1-dashboard.png"
# description = "Dashboard View"
# anchor = "top"
# notes = "Focus on summary cards at top"
#
# [[jobs]]
# input = "Screenshot 2025-11-17 at 8.10.03 PM.png"
# output = "screenshot-4-in-context.png"
# description = "In-Context View"
# anchor = "left"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn job(pattern: &str, output: &str) -> JobConfig {
        JobConfig {
            input: None,
            pattern: Some(pattern.into()),
            output: output.into(),
            description: String::new(),
            anchor: Anchor::Center,
            notes: None,
        }
    }

    #[test]
    fn default_config_values() {
        let config = BatchConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("screenshots"));
        assert_eq!(config.target.as_tuple(), (1280, 800));
        assert_eq!(config.output.compression, Compression::Best);
        assert_eq!(config.icons.sizes, vec![16, 48, 128]);
        assert_eq!(config.icons.prefix, "logo");
        assert!(config.jobs.is_empty());
    }

    #[test]
    fn output_dir_defaults_to_source_dir() {
        let mut config = BatchConfig::default();
        assert_eq!(config.resolved_output_dir(), Path::new("screenshots"));
        config.output_dir = Some(PathBuf::from("store"));
        assert_eq!(config.resolved_output_dir(), Path::new("store"));
    }

    #[test]
    fn parse_jobs() {
        let toml = r#"
[[jobs]]
pattern = "8.02.08"
output = "screenshot-1-dashboard.png"
description = "Dashboard View"
anchor = "top"

[[jobs]]
input = "Screenshot 2025-11-17 at 8.10.03 PM.png"
output = "screenshot-4-in-context.png"
anchor = "LEFT"
notes = "Show both panels"
"#;
        let config: BatchConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.jobs.len(), 2);
        assert_eq!(config.jobs[0].anchor, Anchor::Top);
        assert_eq!(
            config.jobs[0].matcher(),
            Some(Matcher::Contains("8.02.08".into()))
        );
        assert_eq!(config.jobs[1].anchor, Anchor::Left);
        assert!(matches!(config.jobs[1].matcher(), Some(Matcher::Exact(_))));
        assert_eq!(config.jobs[1].notes.as_deref(), Some("Show both panels"));
        // Defaults preserved
        assert_eq!(config.target.as_tuple(), (1280, 800));
    }

    #[test]
    fn unknown_anchor_parses_as_center() {
        let toml = r#"
[[jobs]]
pattern = "8.33.48"
output = "shot.png"
anchor = "middle"
"#;
        let config: BatchConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.jobs[0].anchor, Anchor::Center);
    }

    #[test]
    fn missing_anchor_is_center() {
        let config: BatchConfig =
            toml::from_str("[[jobs]]\npattern = \"x\"\noutput = \"x.png\"\n").unwrap();
        assert_eq!(config.jobs[0].anchor, Anchor::Center);
    }

    #[test]
    fn job_label_prefers_description() {
        let mut j = job("8.02.08", "shot.png");
        assert_eq!(j.label(), "shot.png");
        j.description = "Dashboard".into();
        assert_eq!(j.label(), "Dashboard");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("shotcrop.toml")).unwrap();
        assert_eq!(config.target.as_tuple(), (1280, 800));
        assert!(config.jobs.is_empty());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shotcrop.toml");
        fs::write(
            &path,
            r#"
source_dir = "/home/user/shots"

[target]
width = 640

[[jobs]]
pattern = "8.02.08"
output = "small.png"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.source_dir, PathBuf::from("/home/user/shots"));
        assert_eq!(config.target.width, 640);
        // Unspecified values should be defaults
        assert_eq!(config.target.height, 800);
        assert_eq!(config.icons.sizes, vec![16, 48, 128]);
        assert_eq!(config.jobs.len(), 1);
    }

    #[test]
    fn load_config_resolves_relative_dirs_against_file() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        fs::create_dir(&project).unwrap();
        let path = project.join("shotcrop.toml");
        fs::write(&path, "source_dir = \"raw\"\noutput_dir = \"store\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.source_dir, project.join("raw"));
        assert_eq!(config.resolved_output_dir(), project.join("store"));
    }

    #[test]
    fn load_config_defaults_stay_relative_to_working_dir() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("shotcrop.toml")).unwrap();
        assert_eq!(config.source_dir, PathBuf::from("screenshots"));
    }

    #[test]
    fn rebase_keeps_absolute_paths() {
        let mut config = BatchConfig {
            source_dir: PathBuf::from("/abs/shots"),
            output_dir: Some(PathBuf::from("out")),
            ..Default::default()
        };
        config.rebase(Path::new("/cfg"));
        assert_eq!(config.source_dir, PathBuf::from("/abs/shots"));
        assert_eq!(config.output_dir, Some(PathBuf::from("/cfg/out")));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shotcrop.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shotcrop.toml");
        fs::write(&path, "[target]\nheight = 0\n").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<BatchConfig, _> = toml::from_str("[target]\nwidht = 1280\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<BatchConfig, _> = toml::from_str("[targets]\nwidth = 1280\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_job_key_rejected() {
        let toml = "[[jobs]]\npattern = \"x\"\noutput = \"x.png\"\nstrategy = \"top\"\n";
        let result: Result<BatchConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(BatchConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_target() {
        let mut config = BatchConfig::default();
        config.target.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_icon_sizes() {
        let mut config = BatchConfig::default();
        config.icons.sizes = vec![];
        assert!(config.validate().is_err());
        config.icons.sizes = vec![16, 0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_job_needs_exactly_one_source() {
        let mut config = BatchConfig::default();
        let mut j = job("x", "x.png");
        j.input = Some("x.png".into());
        config.jobs = vec![j.clone()];
        assert!(config.validate().is_err());

        j.input = None;
        j.pattern = None;
        config.jobs = vec![j];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_pattern() {
        let config = BatchConfig {
            jobs: vec![job("  ", "x.png")],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_output_must_be_png_file_name() {
        let mut config = BatchConfig {
            jobs: vec![job("x", "shot.jpg")],
            ..Default::default()
        };
        assert!(config.validate().is_err());
        config.jobs = vec![job("x", "sub/shot.png")];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_duplicate_outputs() {
        let config = BatchConfig {
            jobs: vec![job("a", "shot.png"), job("b", "shot.png")],
            ..Default::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("duplicate"), "{err}");
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[target]\nwidth = 1280\nheight = 800\n").unwrap();
        let overlay: toml::Value = toml::from_str("[target]\nheight = 400\n").unwrap();
        let merged = merge_toml(base, overlay);
        let target = merged.get("target").unwrap();
        assert_eq!(target.get("width").unwrap().as_integer(), Some(1280));
        assert_eq!(target.get("height").unwrap().as_integer(), Some(400));
    }

    #[test]
    fn merge_toml_replaces_arrays() {
        let base: toml::Value = toml::from_str("[icons]\nsizes = [16, 48, 128]\n").unwrap();
        let overlay: toml::Value = toml::from_str("[icons]\nsizes = [32]\n").unwrap();
        let merged = merge_toml(base, overlay);
        let sizes = merged.get("icons").unwrap().get("sizes").unwrap();
        assert_eq!(sizes.as_array().unwrap().len(), 1);
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[icons]\nsizes = []\n").unwrap();
        let result = resolve_config(base, Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // effective_threads tests
    // =========================================================================

    #[test]
    fn effective_threads_auto() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(100_000),
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_never_below_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let parsed: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(parsed, stock_defaults_value().unwrap());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in ["[target]", "[output]", "[icons]", "[processing]", "[[jobs]]"] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        assert!(val.is_table());
        for key in ["source_dir", "target", "output", "icons", "processing"] {
            assert!(val.get(key).is_some(), "missing {key}");
        }
        assert!(val.get("jobs").is_none());
        assert!(val.get("output_dir").is_none());
    }
}
