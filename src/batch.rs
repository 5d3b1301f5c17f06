//! Batch conversion of uploaded files
//!
//! Each file is converted independently: its own parameters, its own decoding,
//! its own curve counter. A failing file is recorded in the report and never
//! stops the rest of the batch.

use crate::config::ConverterConfig;
use crate::converter::{ConversionStats, Converter};
use crate::encoding::TextEncoding;
use crate::error::{ConvertError, Result};
use crate::filename::parse_filename_params;
use crate::params::{resolve, EffectiveParameters};
use chrono::NaiveDate;
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An uploaded file: its name and raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, keeping only its file name
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Ok(Self { name, bytes })
    }
}

/// A successfully converted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub source_name: String,
    /// Source file stem, without directories or extension
    pub stem: String,
    pub parameters: EffectiveParameters,
    pub encoding: TextEncoding,
    pub lossy: bool,
    pub stats: ConversionStats,
    pub text: String,
}

impl ConvertedFile {
    /// `<stem>_converted.txt`
    pub fn txt_name(&self) -> String {
        format!("{}_converted.txt", self.stem)
    }

    /// `<stem>_converted.mea`
    pub fn mea_name(&self) -> String {
        format!("{}_converted.mea", self.stem)
    }

    /// Both output names, in `.txt`, `.mea` order. The content is identical.
    pub fn output_names(&self) -> [String; 2] {
        [self.txt_name(), self.mea_name()]
    }
}

/// A file that could not be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    pub file_name: String,
    pub message: String,
}

/// Outcome of a batch, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub converted: Vec<ConvertedFile>,
    pub errors: Vec<FileError>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Every output file as `(name, content)`, both extensions per converted file
    pub fn output_entries(&self) -> Vec<(String, &str)> {
        self.converted
            .iter()
            .flat_map(|file| {
                file.output_names()
                    .into_iter()
                    .map(move |name| (name, file.text.as_str()))
            })
            .collect()
    }
}

/// Applies parameter resolution, decoding and conversion to uploaded files
pub struct BatchConverter {
    config: ConverterConfig,
    converter: Converter,
}

impl BatchConverter {
    /// Batch converter stamping today's date
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config,
            converter: Converter::today(),
        }
    }

    /// Batch converter stamping a fixed date
    pub fn with_date(config: ConverterConfig, date: NaiveDate) -> Self {
        Self {
            config,
            converter: Converter::new(date),
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert one file
    pub fn convert_file(&self, file: &RawFile) -> Result<ConvertedFile> {
        let stem = output_stem(&file.name)?;

        if let Some(limit) = self.config.max_file_bytes {
            let size = file.bytes.len() as u64;
            if size > limit {
                return Err(ConvertError::FileTooLarge {
                    name: file.name.clone(),
                    size,
                    limit,
                });
            }
        }

        let parsed = parse_filename_params(&file.name);
        let parameters = resolve(&parsed, &self.config.manual, self.config.force_manual);
        log::debug!(
            "{}: L={} Vbs={} W={} ({})",
            file.name,
            parameters.l,
            parameters.vbs,
            parameters.w,
            parameters.provenance
        );

        let conversion = self.converter.convert_bytes(&file.bytes, &parameters);
        if conversion.lossy {
            log::warn!("{}: decoded with replacement characters", file.name);
        }
        log::debug!(
            "{}: {} encoding, {} curves, {} points, {} dropped lines",
            file.name,
            conversion.encoding,
            conversion.stats.curves,
            conversion.stats.points,
            conversion.stats.dropped
        );

        Ok(ConvertedFile {
            source_name: file.name.clone(),
            stem,
            parameters,
            encoding: conversion.encoding,
            lossy: conversion.lossy,
            stats: conversion.stats,
            text: conversion.text,
        })
    }

    /// Convert every file, collecting failures instead of stopping
    pub fn convert_all(&self, files: &[RawFile]) -> BatchReport {
        #[cfg(feature = "parallel")]
        let results: Vec<_> = files.par_iter().map(|f| self.convert_file(f)).collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<_> = files.iter().map(|f| self.convert_file(f)).collect();

        let mut report = BatchReport::default();
        for (file, result) in files.iter().zip(results) {
            match result {
                Ok(converted) => report.converted.push(converted),
                Err(e) => {
                    log::error!("{}: {}", file.name, e);
                    report.errors.push(FileError {
                        file_name: file.name.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        log::info!(
            "Converted {} of {} files",
            report.converted.len(),
            files.len()
        );
        report
    }
}

/// File stem used for output names
fn output_stem(file_name: &str) -> Result<String> {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConvertError::InvalidFileName(file_name.to_string()))
}
