//! Extraction of test parameters from measurement file names
//!
//! Lab files carry their bias conditions in the name, e.g.
//! `Ids_vgs_0.5L_vbs0.05.csv` or `test_1.2L_vbs-1.8.csv`. Both patterns are
//! matched independently over the lower-cased name and the first match wins.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// `<number>l`
static L_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?|\.\d+)l").expect("valid L pattern"));

/// `vbs`, optional separators, then the number. The sign is outside the
/// separator class so a separator can never swallow it.
static VBS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"vbs[\s_=:]*(-?(?:\d+(?:\.\d+)?|\.\d+))").expect("valid Vbs pattern"));

/// Parameters found in a file name, kept as the exact matched text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedParameters {
    pub l: Option<String>,
    pub vbs: Option<String>,
}

impl ParsedParameters {
    /// True if at least one parameter was found
    pub fn success(&self) -> bool {
        self.l.is_some() || self.vbs.is_some()
    }
}

/// Parse L and Vbs out of a file name
///
/// Only the final path component is examined, so directories named like
/// `1.2L_runs/` do not leak into the result.
pub fn parse_filename_params(file_name: &str) -> ParsedParameters {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let lower = base.to_lowercase();

    let capture = |pattern: &Regex| {
        pattern
            .captures(&lower)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    };

    ParsedParameters {
        l: capture(&L_PATTERN),
        vbs: capture(&VBS_PATTERN),
    }
}
