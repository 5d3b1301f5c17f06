//! Download archive for converted files
//!
//! Every converted file is stored twice, as `<stem>_converted.txt` and
//! `<stem>_converted.mea`. The archive is built entirely in memory so it can be
//! written to disk or handed to a web response as-is.
//!
//! # Example
//!
//! ```no_run
//! use meaconv::archive::write_archive;
//! use meaconv::batch::{BatchConverter, RawFile};
//! use meaconv::config::ConverterConfig;
//!
//! let batch = BatchConverter::new(ConverterConfig::default());
//! let report = batch.convert_all(&[RawFile::read("Ids_0.5L_vbs0.05.csv")?]);
//!
//! let zip_bytes = write_archive(&report.converted, 6)?;
//! std::fs::write("converted.zip", zip_bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::batch::ConvertedFile;
use crate::error::{ConvertError, Result};
use s_zip::StreamingZipWriter;
use std::io::Cursor;

/// Build a zip archive holding both output names for each converted file
///
/// `compression_level` is the deflate level, clamped to 0-9.
pub fn write_archive(files: &[ConvertedFile], compression_level: u32) -> Result<Vec<u8>> {
    let capacity = files.iter().map(|f| f.text.len()).sum::<usize>() + 1024;
    let mut zip = StreamingZipWriter::from_writer_with_compression(
        Cursor::new(Vec::with_capacity(capacity)),
        compression_level.min(9),
    )
    .map_err(|e| ConvertError::Archive(format!("Failed to create ZIP writer: {}", e)))?;

    for file in files {
        for name in file.output_names() {
            zip.start_entry(&name).map_err(|e| {
                ConvertError::Archive(format!("Failed to start ZIP entry {}: {}", name, e))
            })?;
            zip.write_data(file.text.as_bytes()).map_err(|e| {
                ConvertError::Archive(format!("Failed to write ZIP entry {}: {}", name, e))
            })?;
        }
    }

    let buffer = zip
        .finish()
        .map_err(|e| ConvertError::Archive(format!("Failed to finish ZIP: {}", e)))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{BatchConverter, RawFile};
    use crate::config::ConverterConfig;
    use chrono::NaiveDate;

    #[test]
    fn test_archive_is_zip() -> Result<()> {
        let batch = BatchConverter::with_date(
            ConverterConfig::default(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        );
        let report = batch.convert_all(&[RawFile::new("a.csv", "x,y\n1,2\n")]);
        let bytes = write_archive(&report.converted, 6)?;

        // Local file header signature
        assert_eq!(&bytes[..4], b"PK\x03\x04");
        Ok(())
    }
}
