//! Line classification for CSV measurement exports
//!
//! Each line is either blank, a curve boundary (an `x,y` header row), a data
//! row with an x and y value, or unusable. Classification runs through ordered
//! lists of strategies. Every strategy is total and returns `None` when it
//! cannot decide, in which case the next one is tried.

use crate::csv::CsvParser;

/// Outcome for one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Empty after trimming
    Blank,
    /// Start of a new curve
    Boundary,
    /// Cleaned x and y values
    Data { x: String, y: String },
    /// Fewer than two fields under every strategy
    Dropped,
}

type BoundaryStrategy = fn(&CsvParser, &str) -> Option<bool>;
type FieldStrategy = fn(&CsvParser, &str) -> Option<(String, String)>;

const BOUNDARY_STRATEGIES: [BoundaryStrategy; 2] = [structured_boundary, normalized_boundary];
const FIELD_STRATEGIES: [FieldStrategy; 2] = [structured_fields, naive_split_fields];

const NORMALIZED_BOUNDARIES: [&str; 3] = ["\"x\",\"y\"", "x,y", "'x','y'"];

/// Classify a single line
pub fn classify_line(parser: &CsvParser, line: &str) -> LineClass {
    let line = line.trim();
    if line.is_empty() {
        return LineClass::Blank;
    }

    let is_boundary = BOUNDARY_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(parser, line))
        .unwrap_or(false);
    if is_boundary {
        return LineClass::Boundary;
    }

    match FIELD_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(parser, line))
    {
        Some((x, y)) => LineClass::Data {
            x: clean_value(&x).to_string(),
            y: clean_value(&y).to_string(),
        },
        None => LineClass::Dropped,
    }
}

/// Strip surrounding whitespace and quote characters
pub fn clean_value(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
}

/// Decides whether the line parses as a record
fn structured_boundary(parser: &CsvParser, line: &str) -> Option<bool> {
    let fields = parser.parse_record(line)?;
    Some(
        fields.len() == 2
            && clean_value(&fields[0]).to_lowercase() == "x"
            && clean_value(&fields[1]).to_lowercase() == "y",
    )
}

/// Only answers `Some(true)`; a non-match leaves the line to the data strategies
fn normalized_boundary(_parser: &CsvParser, line: &str) -> Option<bool> {
    let normalized: String = line
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    NORMALIZED_BOUNDARIES
        .contains(&normalized.as_str())
        .then_some(true)
}

fn structured_fields(parser: &CsvParser, line: &str) -> Option<(String, String)> {
    let fields = parser.parse_record(line)?;
    first_two(fields.into_iter())
}

fn naive_split_fields(_parser: &CsvParser, line: &str) -> Option<(String, String)> {
    first_two(line.split(',').map(str::to_string))
}

fn first_two(mut fields: impl Iterator<Item = String>) -> Option<(String, String)> {
    let x = fields.next()?;
    let y = fields.next()?;
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(line: &str) -> LineClass {
        classify_line(&CsvParser::default(), line)
    }

    fn data(x: &str, y: &str) -> LineClass {
        LineClass::Data {
            x: x.to_string(),
            y: y.to_string(),
        }
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify(""), LineClass::Blank);
        assert_eq!(classify("   \t"), LineClass::Blank);
    }

    #[test]
    fn test_boundary_forms() {
        assert_eq!(classify("x,y"), LineClass::Boundary);
        assert_eq!(classify("\"x\",\"y\""), LineClass::Boundary);
        assert_eq!(classify("'x','y'"), LineClass::Boundary);
        assert_eq!(classify(" X , Y "), LineClass::Boundary);
    }

    #[test]
    fn test_three_fields_is_not_boundary() {
        assert_eq!(classify("x,y,z"), data("x", "y"));
    }

    #[test]
    fn test_malformed_boundary_uses_normalized_compare() {
        // Structured parse fails on the stray opening quote
        assert_eq!(classify("'x','y"), data("x", "y"));
        assert_eq!(normalized_boundary(&CsvParser::default(), "\"x\", \"y\""), Some(true));
    }

    #[test]
    fn test_data_row() {
        assert_eq!(classify("1.5,2.3e-6"), data("1.5", "2.3e-6"));
        assert_eq!(classify("\"0.1\",\"-4.2E-09\""), data("0.1", "-4.2E-09"));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        assert_eq!(classify("1,2,3,4"), data("1", "2"));
    }

    #[test]
    fn test_quoted_comma_stays_in_field() {
        assert_eq!(classify("\"1,5\",2"), data("1,5", "2"));
    }

    #[test]
    fn test_unterminated_quote_falls_back_to_split() {
        assert_eq!(classify("\"1.5,2.0"), data("1.5", "2.0"));
    }

    #[test]
    fn test_single_field_is_dropped() {
        assert_eq!(classify("Vds"), LineClass::Dropped);
        assert_eq!(classify("\"unterminated"), LineClass::Dropped);
    }

    #[test]
    fn test_empty_second_field() {
        assert_eq!(classify("1.5,"), data("1.5", ""));
    }
}
