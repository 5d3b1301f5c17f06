//! CSV to .mea conversion for a single file
//!
//! The converter streams over the decoded text once. The only state carried
//! from line to line is the curve counter, which picks the label of the next
//! `curve { .. }` line and starts from zero for every file.

use crate::classify::{classify_line, LineClass};
use crate::csv::CsvParser;
use crate::encoding::{self, TextEncoding};
use crate::mea_writer::MeaWriter;
use crate::params::EffectiveParameters;
use chrono::NaiveDate;

/// Curve labels, cycled through in order
pub const CURVE_LABELS: [&str; 5] = ["1.8", "1.35", "0.9", "0.45", "0"];

/// Counts boundary markers seen so far in one file
#[derive(Debug, Default)]
pub struct CurveCounter {
    count: usize,
}

impl CurveCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label for the next boundary, advancing the counter
    pub fn next_label(&mut self) -> &'static str {
        let label = CURVE_LABELS[self.count % CURVE_LABELS.len()];
        self.count += 1;
        label
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Line statistics for one conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub curves: usize,
    pub points: usize,
    pub dropped: usize,
}

/// Result of converting raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub text: String,
    pub encoding: TextEncoding,
    pub lossy: bool,
    pub stats: ConversionStats,
}

/// Converts decoded CSV text into the .mea dialect
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use meaconv::converter::Converter;
/// use meaconv::params::{EffectiveParameters, Provenance};
///
/// let params = EffectiveParameters {
///     l: "0.5".to_string(),
///     vbs: "0".to_string(),
///     w: "10".to_string(),
///     provenance: Provenance::ParsedLOnly,
/// };
/// let converter = Converter::new(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
/// let (text, stats) = converter.convert_text("x,y\n0,1e-9\n", &params);
///
/// assert!(text.starts_with("condition{date=10/16/26,"));
/// assert_eq!(stats.curves, 1);
/// assert_eq!(stats.points, 1);
/// ```
pub struct Converter {
    date: NaiveDate,
    parser: CsvParser,
}

impl Converter {
    /// Create a converter stamping `date` into the condition header
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            parser: CsvParser::default(),
        }
    }

    /// Create a converter stamped with today's local date
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Convert already decoded text
    pub fn convert_text(
        &self,
        text: &str,
        params: &EffectiveParameters,
    ) -> (String, ConversionStats) {
        let mut writer = MeaWriter::new();
        let mut curves = CurveCounter::new();
        let mut dropped = 0;

        writer.write_header(self.date, params);

        for line in text.split(|c: char| c == '\n' || c == '\r') {
            match classify_line(&self.parser, line) {
                LineClass::Blank => {}
                LineClass::Boundary => writer.write_curve(curves.next_label()),
                LineClass::Data { x, y } => writer.write_point(&x, &y),
                LineClass::Dropped => {
                    log::trace!("Dropping line with fewer than two fields: {:?}", line);
                    dropped += 1;
                }
            }
        }

        let stats = ConversionStats {
            curves: curves.count(),
            points: writer.point_count() as usize,
            dropped,
        };
        (writer.finish(), stats)
    }

    /// Decode raw bytes and convert them
    pub fn convert_bytes(&self, bytes: &[u8], params: &EffectiveParameters) -> Conversion {
        let decoded = encoding::decode(bytes);
        let (text, stats) = self.convert_text(&decoded.text, params);
        Conversion {
            text,
            encoding: decoded.encoding,
            lossy: decoded.lossy,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Provenance;

    fn params() -> EffectiveParameters {
        EffectiveParameters {
            l: "0.5".to_string(),
            vbs: "0.05".to_string(),
            w: "10".to_string(),
            provenance: Provenance::Parsed,
        }
    }

    fn converter() -> Converter {
        Converter::new(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    fn body(text: &str) -> Vec<&str> {
        text.lines().skip(3).collect()
    }

    fn curve_labels(text: &str) -> Vec<&str> {
        text.lines()
            .filter_map(|l| l.strip_prefix("curve { "))
            .map(|l| l.trim_end_matches(" }"))
            .collect()
    }

    #[test]
    fn test_counter_cycles() {
        let mut counter = CurveCounter::new();
        let labels: Vec<_> = (0..7).map(|_| counter.next_label()).collect();
        assert_eq!(labels, ["1.8", "1.35", "0.9", "0.45", "0", "1.8", "1.35"]);
        assert_eq!(counter.count(), 7);
    }

    #[test]
    fn test_full_output() {
        let input = "x,y\n0,1e-12\n0.05,3.4e-07\n\nx,y\n0,2e-12\n";
        let (text, stats) = converter().convert_text(input, &params());
        let expected = "condition{date=10/16/26,instrument=pseudo.meter,mode=forward,type=nmos}\n\
                        \n\
                        Page (name=Ids_Vds_Vgs,x=Vds,p=Vgs,y=Ids){Vbs=0.05,W=10,L=0.5,T=25}\n\
                        curve { 1.8 }\n\
                        0                   1e-12\n\
                        0.05                3.4e-07\n\
                        curve { 1.35 }\n\
                        0                   2e-12\n";
        assert_eq!(text, expected);
        assert_eq!(
            stats,
            ConversionStats {
                curves: 2,
                points: 3,
                dropped: 0
            }
        );
    }

    #[test]
    fn test_seven_boundaries_cycle_labels() {
        let input = "x,y\n1,2\n".repeat(7);
        let (text, _) = converter().convert_text(&input, &params());
        assert_eq!(
            curve_labels(&text),
            ["1.8", "1.35", "0.9", "0.45", "0", "1.8", "1.35"]
        );
    }

    #[test]
    fn test_no_boundaries() {
        let (text, stats) = converter().convert_text("1,2\n3,4\n", &params());
        assert_eq!(stats.curves, 0);
        assert!(curve_labels(&text).is_empty());
        assert_eq!(body(&text).len(), 2);
    }

    #[test]
    fn test_quoted_and_plain_boundary_match() {
        let (quoted, _) = converter().convert_text("\"x\",\"y\"\n", &params());
        let (plain, _) = converter().convert_text("x,y\n", &params());
        assert_eq!(quoted, plain);
    }

    #[test]
    fn test_single_field_line_dropped() {
        let (text, stats) = converter().convert_text("x,y\nVds\n1,2\n", &params());
        assert_eq!(body(&text), ["curve { 1.8 }", "1                   2"]);
        assert_eq!(stats.dropped, 1);
    }

    #[test]
    fn test_crlf_and_cr_line_endings() {
        let (crlf, _) = converter().convert_text("x,y\r\n1,2\r\n", &params());
        let (cr, _) = converter().convert_text("x,y\r1,2\r", &params());
        let (lf, _) = converter().convert_text("x,y\n1,2\n", &params());
        assert_eq!(crlf, lf);
        assert_eq!(cr, lf);
    }

    #[test]
    fn test_empty_input_has_header_only() {
        let (text, stats) = converter().convert_text("", &params());
        assert_eq!(text.lines().count(), 3);
        assert_eq!(stats, ConversionStats::default());
    }

    #[test]
    fn test_each_conversion_starts_at_first_label() {
        let converter = converter();
        let (first, _) = converter.convert_text("x,y\nx,y\n", &params());
        let (second, _) = converter.convert_text("x,y\n", &params());
        assert_eq!(curve_labels(&first), ["1.8", "1.35"]);
        assert_eq!(curve_labels(&second), ["1.8"]);
    }

    #[test]
    fn test_convert_bytes_gbk() {
        // "电压" in GBK as a column header that is not a boundary
        let mut bytes = vec![0xB5, 0xE7, 0xD1, 0xB9];
        bytes.extend_from_slice(b",I\nx,y\n1,2\n");
        let conversion = converter().convert_bytes(&bytes, &params());
        assert_eq!(conversion.encoding, TextEncoding::Gbk);
        assert!(!conversion.lossy);
        assert!(conversion.text.contains("电压"));
        assert_eq!(conversion.stats.curves, 1);
    }

    #[test]
    fn test_idempotent() {
        let input = "x,y\n1,2\n";
        assert_eq!(
            converter().convert_text(input, &params()),
            converter().convert_text(input, &params())
        );
    }
}
