//! Hierarchical WBS codes (`1`, `1.6`, `1.6.1`).

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum stored length of a WBS code.
pub const MAX_WBS_CODE_LEN: usize = 50;

static WBS_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d+)*$").expect("WBS code pattern is valid"));

/// Reasons a WBS code is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WbsCodeError {
    /// Blank cell.
    #[error("WBS code is missing")]
    Missing,

    /// Not a dotted sequence of digits.
    #[error("invalid WBS code format '{0}'")]
    InvalidFormat(String),

    /// Longer than [`MAX_WBS_CODE_LEN`].
    #[error("WBS code '{0}' exceeds {MAX_WBS_CODE_LEN} characters")]
    TooLong(String),
}

/// A validated WBS code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WbsCode(String);

impl WbsCode {
    /// Parses and validates a raw code. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `WbsCodeError` if the code is blank, malformed or too long.
    pub fn parse(raw: &str) -> Result<Self, WbsCodeError> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(WbsCodeError::Missing);
        }
        if !WBS_CODE_PATTERN.is_match(code) {
            return Err(WbsCodeError::InvalidFormat(code.to_string()));
        }
        if code.len() > MAX_WBS_CODE_LEN {
            return Err(WbsCodeError::TooLong(code.to_string()));
        }
        Ok(Self(code.to_string()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dotted segments, e.g. `["1", "6", "1"]`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Depth in the hierarchy; top-level codes are level 1.
    #[must_use]
    pub fn level(&self) -> usize {
        self.segments().count()
    }

    /// The enclosing code, or `None` for level-1 codes.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rsplit_once('.')
            .map(|(parent, _)| Self(parent.to_string()))
    }
}

/// Compares two digit strings by numeric value without overflowing.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl Ord for WbsCode {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut left = self.segments();
        let mut right = other.segments();
        loop {
            match (left.next(), right.next()) {
                (Some(a), Some(b)) => match cmp_numeric(a, b) {
                    Ordering::Equal => {}
                    unequal => return unequal,
                },
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (None, None) => return self.0.cmp(&other.0),
            }
        }
    }
}

impl PartialOrd for WbsCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for WbsCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for WbsCode {
    type Error = WbsCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WbsCode> for String {
    fn from(code: WbsCode) -> Self {
        code.0
    }
}
