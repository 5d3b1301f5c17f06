//! In-memory writer for the condition/Page/curve measurement dialect
//!
//! Output layout:
//!
//! ```text
//! condition{date=10/16/26,instrument=pseudo.meter,mode=forward,type=nmos}
//!
//! Page (name=Ids_Vds_Vgs,x=Vds,p=Vgs,y=Ids){Vbs=0.05,W=10,L=0.5,T=25}
//! curve { 1.8 }
//! 0                   1.2e-12
//! 0.05                3.4e-07
//! ```
//!
//! # Example
//!
//! ```
//! use meaconv::mea_writer::MeaWriter;
//! use meaconv::params::{EffectiveParameters, Provenance};
//! use chrono::NaiveDate;
//!
//! let params = EffectiveParameters {
//!     l: "0.5".to_string(),
//!     vbs: "0.05".to_string(),
//!     w: "10".to_string(),
//!     provenance: Provenance::Parsed,
//! };
//!
//! let mut writer = MeaWriter::new();
//! writer.write_header(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(), &params);
//! writer.write_curve("1.8");
//! writer.write_point("0.05", "3.4e-07");
//!
//! let text = writer.finish();
//! assert!(text.ends_with("curve { 1.8 }\n0.05                3.4e-07\n"));
//! ```

use crate::params::EffectiveParameters;
use chrono::{Datelike, NaiveDate};
use std::fmt::Write;

/// Width of the left-justified x column
pub const X_COLUMN_WIDTH: usize = 20;

const TEMPERATURE: &str = "25";

/// Writer that builds one converted file in memory
pub struct MeaWriter {
    buffer: String,
    point_count: u64,
    line_ending: &'static str,
}

impl MeaWriter {
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(4096),
            point_count: 0,
            line_ending: "\n",
        }
    }

    /// Write the condition line, a blank line and the Page line
    pub fn write_header(&mut self, date: NaiveDate, params: &EffectiveParameters) {
        self.push_line(&format!(
            "condition{{date={},instrument=pseudo.meter,mode=forward,type=nmos}}",
            format_condition_date(date)
        ));
        self.push_line("");
        self.push_line(&format!(
            "Page (name=Ids_Vds_Vgs,x=Vds,p=Vgs,y=Ids){{Vbs={},W={},L={},T={}}}",
            params.vbs, params.w, params.l, TEMPERATURE
        ));
    }

    /// Start a new curve
    pub fn write_curve(&mut self, label: &str) {
        self.push_line(&format!("curve {{ {} }}", label));
    }

    /// Write one data point, x left-justified in a 20 character column
    pub fn write_point(&mut self, x: &str, y: &str) {
        // Infallible for String
        let _ = write!(self.buffer, "{:<width$}{}", x, y, width = X_COLUMN_WIDTH);
        self.buffer.push_str(self.line_ending);
        self.point_count += 1;
    }

    pub fn point_count(&self) -> u64 {
        self.point_count
    }

    /// Consume the writer and return the text
    pub fn finish(self) -> String {
        self.buffer
    }

    fn push_line(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push_str(self.line_ending);
    }
}

impl Default for MeaWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// `M/D/YY`, no leading zeros on month and day
pub fn format_condition_date(date: NaiveDate) -> String {
    format!(
        "{}/{}/{:02}",
        date.month(),
        date.day(),
        date.year().rem_euclid(100)
    )
}
