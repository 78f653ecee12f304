//! Filename matching for batch jobs.
//!
//! A job names its source either by exact file name or by a fragment of it.
//! Screenshot tools write names like `Screenshot 2025-11-17 at 8.02.08 PM.png`
//! where the space before `PM` is a U+202F narrow no-break space on macOS, so
//! typing the name into a config file would never match byte-for-byte.
//!
//! - [`Matcher::Exact`] compares whole names.
//! - [`Matcher::Contains`] looks for a fragment such as the capture time
//!   (`8.02.08`), which is usually unique within a folder.
//!
//! Both fold every Unicode whitespace character to an ASCII space on each
//! side before comparing.
//!
//! Only `.png` files are candidates for either kind.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    Exact(String),
    Contains(String),
}

/// Fold all Unicode whitespace to a plain ASCII space.
fn normalize_whitespace(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect()
}

/// True for file names with a `.png` extension (ASCII case-insensitive).
pub fn is_png_name(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case("png"))
}

impl Matcher {
    pub fn matches(&self, file_name: &str) -> bool {
        if !is_png_name(file_name) {
            return false;
        }
        match self {
            Matcher::Exact(name) => normalize_whitespace(name) == normalize_whitespace(file_name),
            Matcher::Contains(fragment) => {
                normalize_whitespace(file_name).contains(&normalize_whitespace(fragment))
            }
        }
    }

    /// All matching names, in the order given.
    pub fn find_all<'a>(&self, names: &'a [String]) -> Vec<&'a str> {
        names
            .iter()
            .map(String::as_str)
            .filter(|n| self.matches(n))
            .collect()
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Exact(name) => write!(f, "\"{name}\""),
            Matcher::Contains(fragment) => write!(f, "*{fragment}*"),
        }
    }
}
