//! Per-file parameter resolution
//!
//! Every file gets its own `EffectiveParameters`: values parsed from its name
//! take precedence over the manual defaults unless manual values are forced.
//! `W` is never encoded in file names and always comes from the manual value.

use crate::filename::ParsedParameters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Manually supplied parameter values, also used as per-field defaults
///
/// Values are kept as text and written verbatim. A bare YAML number such as
/// `w: 10.0` is read as its source text, not reformatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualParameters {
    pub l: String,
    pub vbs: String,
    pub w: String,
}

impl Default for ManualParameters {
    fn default() -> Self {
        Self {
            l: "10".to_string(),
            vbs: "0".to_string(),
            w: "10".to_string(),
        }
    }
}

/// Coarse grouping of [`Provenance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvenanceKind {
    ForcedManual,
    Parsed,
    ParsedPartial,
    DefaultFallback,
}

/// Where the effective L and Vbs values came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Manual values forced, file name ignored
    ForcedManual,
    /// Both L and Vbs parsed from the file name
    Parsed,
    /// L parsed, Vbs defaulted
    ParsedLOnly,
    /// Vbs parsed, L defaulted
    ParsedVbsOnly,
    /// Nothing parsed, both defaulted
    DefaultFallback,
}

impl Provenance {
    pub fn kind(&self) -> ProvenanceKind {
        match self {
            Provenance::ForcedManual => ProvenanceKind::ForcedManual,
            Provenance::Parsed => ProvenanceKind::Parsed,
            Provenance::ParsedLOnly | Provenance::ParsedVbsOnly => ProvenanceKind::ParsedPartial,
            Provenance::DefaultFallback => ProvenanceKind::DefaultFallback,
        }
    }

    /// Human readable status line
    pub fn description(&self) -> &'static str {
        match self {
            Provenance::ForcedManual => "manual parameters forced, file name ignored",
            Provenance::Parsed => "L and Vbs parsed from file name",
            Provenance::ParsedLOnly => "L parsed from file name, Vbs uses default",
            Provenance::ParsedVbsOnly => "Vbs parsed from file name, L uses default",
            Provenance::DefaultFallback => "nothing parsed from file name, L and Vbs use defaults",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// The values actually written into a converted file's `Page` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveParameters {
    pub l: String,
    pub vbs: String,
    pub w: String,
    pub provenance: Provenance,
}

/// Merge parsed and manual values into the effective set for one file
pub fn resolve(
    parsed: &ParsedParameters,
    manual: &ManualParameters,
    force_manual: bool,
) -> EffectiveParameters {
    if force_manual {
        return EffectiveParameters {
            l: manual.l.clone(),
            vbs: manual.vbs.clone(),
            w: manual.w.clone(),
            provenance: Provenance::ForcedManual,
        };
    }

    let provenance = if !parsed.success() {
        Provenance::DefaultFallback
    } else if parsed.l.is_none() {
        Provenance::ParsedVbsOnly
    } else if parsed.vbs.is_none() {
        Provenance::ParsedLOnly
    } else {
        Provenance::Parsed
    };

    EffectiveParameters {
        l: parsed.l.clone().unwrap_or_else(|| manual.l.clone()),
        vbs: parsed.vbs.clone().unwrap_or_else(|| manual.vbs.clone()),
        w: manual.w.clone(),
        provenance,
    }
}
