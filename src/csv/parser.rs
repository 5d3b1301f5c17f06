//! Quote-aware parsing of a single CSV record

/// CSV parser for one physical line
///
/// A field may be wrapped in any of the configured quote characters. Inside a
/// quoted field the delimiter is literal and a doubled quote is an escaped
/// quote. A quote only opens a quoted field at the start of the field;
/// elsewhere it is kept as a regular character.
pub struct CsvParser {
    delimiter: char,
    quote_chars: Vec<char>,
}

impl CsvParser {
    /// Create a new CSV parser with custom delimiter and quote characters
    pub fn new(delimiter: u8, quote_chars: &[u8]) -> Self {
        Self {
            delimiter: delimiter as char,
            quote_chars: quote_chars.iter().map(|&q| q as char).collect(),
        }
    }

    /// Parse a line into fields
    ///
    /// Returns `None` when a quoted field is never closed.
    pub fn parse_record(&self, line: &str) -> Option<Vec<String>> {
        let mut fields = Vec::new();
        let mut current_field = String::new();
        let mut open_quote: Option<char> = None;
        let mut field_started = false;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            if let Some(quote) = open_quote {
                if ch == quote {
                    // Check for escaped quote ("")
                    if chars.peek() == Some(&quote) {
                        current_field.push(quote);
                        chars.next();
                    } else {
                        open_quote = None;
                    }
                } else {
                    current_field.push(ch);
                }
            } else if ch == self.delimiter {
                fields.push(std::mem::take(&mut current_field));
                field_started = false;
            } else if !field_started && self.quote_chars.contains(&ch) {
                open_quote = Some(ch);
                field_started = true;
            } else {
                current_field.push(ch);
                field_started = true;
            }
        }

        if open_quote.is_some() {
            return None;
        }

        fields.push(current_field);
        Some(fields)
    }
}

impl Default for CsvParser {
    /// Comma delimited, double or single quotes
    fn default() -> Self {
        Self::new(b',', b"\"'")
    }
}
