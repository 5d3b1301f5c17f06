//! meaconv - convert measurement CSV files to the .mea text format
//!
//! Converts each input file using L/Vbs parsed from its name (or the manual
//! values), then writes `<stem>_converted.txt` and `<stem>_converted.mea`
//! into the output directory, or bundles everything into one zip archive.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};

use meaconv::{write_archive, BatchConverter, ConverterConfig, RawFile};

#[derive(Parser, Debug)]
#[command(name = "meaconv")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one or more CSV files
    Convert(ConvertArgs),
    /// Make a template configuration yaml file
    NewConfig {
        /// Path of the file to create
        path: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct ConvertArgs {
    /// One or more CSV files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// YAML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Directory for the converted files
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    out_dir: PathBuf,

    /// Write a single zip archive instead of loose files
    #[arg(short = 'z', long)]
    zip: Option<PathBuf>,

    /// Manual L, used when the file name has none
    #[arg(long = "l")]
    l: Option<String>,

    /// Manual Vbs, used when the file name has none
    #[arg(long = "vbs", allow_hyphen_values = true)]
    vbs: Option<String>,

    /// W for every file
    #[arg(long = "w")]
    w: Option<String>,

    /// Ignore file names and use the manual values
    #[arg(short = 'f', long = "force-manual", action = ArgAction::SetTrue)]
    force_manual: bool,

    /// Date for the condition header (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let outcome = match args.command {
        Command::NewConfig { path } => make_template_config(&path),
        Command::Convert(convert_args) => convert(convert_args),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            log::error!("{e:#}");
            std::process::exit(2);
        }
    }
}

fn make_template_config(path: &Path) -> Result<bool> {
    log::info!("Making a template config at {}...", path.display());
    ConverterConfig::default()
        .write_config_file(path)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Done.");
    Ok(true)
}

/// Returns `Ok(false)` when some files failed to convert
fn convert(args: ConvertArgs) -> Result<bool> {
    let mut config = match &args.config {
        Some(path) => ConverterConfig::read_config_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ConverterConfig::default(),
    };
    if let Some(l) = args.l {
        config.manual.l = l;
    }
    if let Some(vbs) = args.vbs {
        config.manual.vbs = vbs;
    }
    if let Some(w) = args.w {
        config.manual.w = w;
    }
    config.force_manual |= args.force_manual;

    log::info!(
        "Manual parameters: L={} Vbs={} W={}{}",
        config.manual.l,
        config.manual.vbs,
        config.manual.w,
        if config.force_manual { " (forced)" } else { "" }
    );

    // Unreadable files are reported like conversion failures
    let mut files = Vec::with_capacity(args.files.len());
    let mut read_failures = 0;
    for path in &args.files {
        match RawFile::read(path) {
            Ok(file) => files.push(file),
            Err(e) => {
                log::error!("{}: {}", path.display(), e);
                read_failures += 1;
            }
        }
    }

    let compression_level = config.compression_level;
    let batch = match args.date {
        Some(date) => BatchConverter::with_date(config, date),
        None => BatchConverter::new(config),
    };
    let report = batch.convert_all(&files);

    for file in &report.converted {
        log::info!(
            "{}: L={} Vbs={} W={} - {}",
            file.source_name,
            file.parameters.l,
            file.parameters.vbs,
            file.parameters.w,
            file.parameters.provenance
        );
    }

    if let Some(zip_path) = &args.zip {
        let bytes = write_archive(&report.converted, compression_level)?;
        std::fs::write(zip_path, bytes)
            .with_context(|| format!("writing {}", zip_path.display()))?;
        log::info!(
            "Wrote {} files to {}",
            report.converted.len() * 2,
            zip_path.display()
        );
    } else {
        std::fs::create_dir_all(&args.out_dir)
            .with_context(|| format!("creating {}", args.out_dir.display()))?;
        for (name, text) in report.output_entries() {
            let path = args.out_dir.join(&name);
            std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        }
        log::info!(
            "Wrote {} files to {}",
            report.converted.len() * 2,
            args.out_dir.display()
        );
    }

    if !report.is_success() || read_failures > 0 {
        log::warn!(
            "{} of {} files failed",
            report.errors.len() + read_failures,
            args.files.len()
        );
        return Ok(false);
    }
    Ok(true)
}
