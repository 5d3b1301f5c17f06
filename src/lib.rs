//! # meaconv
//!
//! Convert device-characterization CSV exports into the condition/Page/curve
//! measurement text format (`.txt` / `.mea`) read by downstream analysis tools.
//!
//! ## Features
//!
//! - **Encoding detection**: UTF-8, GBK, GB2312, then Latin-1
//! - **File name parameters**: `L` and `Vbs` picked up from names such as
//!   `Ids_vgs_0.5L_vbs0.05.csv`, with manual defaults and a force-manual switch
//! - **Tolerant row parsing**: quoted or bare `x,y` curve headers, quote-aware
//!   fields, silent drop of unusable lines
//! - **Batch conversion**: per-file failures are reported without stopping the batch
//! - **Archive output**: every converted file as both `.txt` and `.mea` in one zip
//!
//! ## Quick Start
//!
//! ```no_run
//! use meaconv::{BatchConverter, ConverterConfig, RawFile};
//!
//! let batch = BatchConverter::new(ConverterConfig::default());
//! let report = batch.convert_all(&[RawFile::read("Ids_vgs_0.5L_vbs0.05.csv")?]);
//!
//! for file in &report.converted {
//!     println!("{} -> {} ({})", file.source_name, file.txt_name(), file.parameters.provenance);
//! }
//! for error in &report.errors {
//!     eprintln!("{}: {}", error.file_name, error.message);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Output format
//!
//! ```text
//! condition{date=10/16/26,instrument=pseudo.meter,mode=forward,type=nmos}
//!
//! Page (name=Ids_Vds_Vgs,x=Vds,p=Vgs,y=Ids){Vbs=0.05,W=10,L=0.5,T=25}
//! curve { 1.8 }
//! 0                   1.2e-12
//! 0.05                3.4e-07
//! curve { 1.35 }
//! ...
//! ```
//!
//! Curve labels cycle through `1.8, 1.35, 0.9, 0.45, 0`.

pub mod archive;
pub mod batch;
pub mod classify;
pub mod config;
pub mod converter;
pub mod csv;
pub mod encoding;
pub mod error;
pub mod filename;
pub mod mea_writer;
pub mod params;

pub use archive::write_archive;
pub use batch::{BatchConverter, BatchReport, ConvertedFile, FileError, RawFile};
pub use config::ConverterConfig;
pub use converter::{Conversion, ConversionStats, Converter, CURVE_LABELS};
pub use encoding::{decode, detect_encoding, Decoded, TextEncoding};
pub use error::{ConvertError, Result};
pub use filename::{parse_filename_params, ParsedParameters};
pub use params::{resolve, EffectiveParameters, ManualParameters, Provenance, ProvenanceKind};
