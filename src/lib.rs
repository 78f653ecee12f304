//! # shotcrop
//!
//! Crops screenshots and logos to the exact pixel sizes store listings ask
//! for (1280x800 screenshots, 16/48/128 icons) without stretching anything.
//!
//! # How a Crop Is Chosen
//!
//! Given a source size, a target size, and an anchor, shotcrop keeps the
//! largest region of the source whose aspect ratio equals the target's, then
//! resizes that region to the target:
//!
//! ```text
//! 1920x1080 → 1280x800, anchor = top
//!
//!   source ratio 1.778 > target ratio 1.600  → too wide, trim width
//!   new width = 1080 * 1280 / 800 = 1728     → 192 px to remove
//!   top only constrains vertical trims       → center horizontally
//!   box = (96, 0, 1824, 1080)
//! ```
//!
//! Only one axis is ever trimmed. The anchor names the edge that must
//! survive: `top` keeps the top and drops rows from the bottom, `left` keeps
//! the left edge, `center` splits the trim evenly. An anchor on the axis that
//! isn't trimmed behaves like `center`.
//!
//! # Batch Jobs
//!
//! A `shotcrop.toml` lists one `[[jobs]]` entry per output image: which file
//! to read (an exact name, or a fragment such as the capture time), which
//! anchor to use, and what to call the result. [`batch::run`] resolves every
//! job against the source directory and renders them in parallel. A job whose
//! file is missing or unreadable is reported and skipped; the rest still run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Crop geometry, the [`ImageBackend`](imaging::ImageBackend) trait, and the pure-Rust PNG backend |
//! | [`matcher`] | Exact and fragment file name matching, tolerant of macOS screenshot whitespace |
//! | [`scan`] | Lists source PNGs and pairs each job with its file |
//! | [`config`] | `shotcrop.toml` loading, merging over stock defaults, and validation |
//! | [`batch`] | Runs all jobs, streams progress events, builds the [`BatchReport`](batch::BatchReport) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Integer Geometry
//!
//! Aspect ratios are compared by cross-multiplication in `u64` rather than
//! as floats. A 2880x1800 capture going to 1280x800 has exactly the target
//! ratio and must come out uncropped; with float division that depends on
//! rounding luck.
//!
//! ## PNG In, PNG Out
//!
//! Store screenshots are UI captures: flat colors and text. PNG keeps them
//! lossless, and the `image` crate decodes and encodes it in pure Rust, so the
//! binary needs no system libraries.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod matcher;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
