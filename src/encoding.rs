//! Text encoding detection for uploaded measurement files
//!
//! Lab exports come from a mix of English and Chinese Windows installs, so the
//! candidates are tried in a fixed order: UTF-8, GBK, GB2312, then Latin-1.
//! Latin-1 maps every byte, which makes the final lossy UTF-8 fallback a
//! formality that only exists so detection stays total.

use std::borrow::Cow;
use std::fmt;

const UTF8_BOM: char = '\u{feff}';

/// Candidate encodings in detection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    Utf8,
    Gbk,
    Gb2312,
    Latin1,
}

impl TextEncoding {
    /// Detection order
    pub const CANDIDATES: [TextEncoding; 4] = [
        TextEncoding::Utf8,
        TextEncoding::Gbk,
        TextEncoding::Gb2312,
        TextEncoding::Latin1,
    ];

    /// Canonical label
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Gbk => "gbk",
            TextEncoding::Gb2312 => "gb2312",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Decode without replacement. Returns `None` on the first invalid sequence.
    pub fn decode_strict<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
            // encoding_rs has a single GBK decoder; GB2312 is a subset of it
            TextEncoding::Gbk | TextEncoding::Gb2312 => {
                if !is_double_byte_gbk(bytes) {
                    return None;
                }
                encoding_rs::GBK.decode_without_bom_handling_and_without_replacement(bytes)
            }
            TextEncoding::Latin1 => Some(Cow::Owned(bytes.iter().map(|&b| b as char).collect())),
        }
    }
}

/// Check the byte structure of plain GBK
///
/// The WHATWG GBK decoder in encoding_rs also takes a lone `0x80` as the euro
/// sign and GB18030 four-byte sequences. Both are rejected here.
fn is_double_byte_gbk(bytes: &[u8]) -> bool {
    let mut iter = bytes.iter();
    while let Some(&lead) = iter.next() {
        match lead {
            0x00..=0x7F => {}
            0x81..=0xFE => match iter.next() {
                Some(0x40..=0x7E) | Some(0x80..=0xFE) => {}
                _ => return false,
            },
            _ => return false,
        }
    }
    true
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded file content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub encoding: TextEncoding,
    /// True when no candidate decoded cleanly and replacement characters were used
    pub lossy: bool,
}

/// Return the first candidate under which `bytes` decode cleanly, or UTF-8 if none do
pub fn detect_encoding(bytes: &[u8]) -> TextEncoding {
    TextEncoding::CANDIDATES
        .into_iter()
        .find(|enc| enc.decode_strict(bytes).is_some())
        .unwrap_or(TextEncoding::Utf8)
}

/// Detect the encoding and decode, falling back to lossy UTF-8
///
/// A leading UTF-8 byte order mark is dropped from the text.
pub fn decode(bytes: &[u8]) -> Decoded {
    let encoding = detect_encoding(bytes);
    let (text, lossy) = match encoding.decode_strict(bytes) {
        Some(text) => (text.into_owned(), false),
        None => {
            log::debug!("No candidate encoding decoded cleanly; using lossy UTF-8");
            (String::from_utf8_lossy(bytes).into_owned(), true)
        }
    };

    let text = match text.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    };

    Decoded {
        text,
        encoding,
        lossy,
    }
}
