//! cmpose CLI - Command-line tool for converting CMP pose saves to .pose files.
//!
//! This is the main entry point for the cmpose command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use cmpose::prelude::*;

/// cmpose - CMP to pose file converter
#[derive(Parser)]
#[command(name = "cmpose")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single CMP file to a pose file
    Convert {
        /// Input CMP file
        #[arg(short, long, env = "CMPOSE_INPUT")]
        input: PathBuf,

        /// Output pose file (defaults to the input with a .pose extension)
        #[arg(short, long, env = "CMPOSE_OUTPUT")]
        output: Option<PathBuf>,

        /// Author written into the pose file
        #[arg(short, long, env = "CMPOSE_AUTHOR", default_value = cmpose::pose::DEFAULT_AUTHOR)]
        author: String,

        /// Fail on the first malformed bone instead of skipping it
        #[arg(long)]
        strict: bool,
    },

    /// Convert every CMP file below a directory
    Batch {
        /// Input directory
        #[arg(short, long, env = "CMPOSE_INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, env = "CMPOSE_OUTPUT")]
        output: PathBuf,

        /// Filter pattern for file names (glob-style)
        #[arg(short, long)]
        filter: Option<String>,

        /// Author written into the pose files
        #[arg(short, long, env = "CMPOSE_AUTHOR", default_value = cmpose::pose::DEFAULT_AUTHOR)]
        author: String,

        /// Fail a file on its first malformed bone instead of skipping the bone
        #[arg(long)]
        strict: bool,
    },

    /// Show every record of a CMP file and how it converts
    Inspect {
        /// Input CMP file
        #[arg(short, long, env = "CMPOSE_INPUT")]
        input: PathBuf,
    },

    /// List the bone name table
    Bones {
        /// Only show entries containing this text
        #[arg(short, long)]
        filter: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            output,
            author,
            strict,
        } => {
            let options = ConvertOptions::default()
                .with_author(author)
                .with_strict(strict);
            cmd_convert(&input, output.as_deref(), &options)?;
        }
        Commands::Batch {
            input,
            output,
            filter,
            author,
            strict,
        } => {
            let options = ConvertOptions::default()
                .with_author(author)
                .with_strict(strict);
            cmd_batch(&input, &output, filter.as_deref(), &options)?;
        }
        Commands::Inspect { input } => {
            cmd_inspect(&input)?;
        }
        Commands::Bones { filter } => {
            cmd_bones(filter.as_deref());
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}

fn cmd_convert(input: &Path, output: Option<&Path>, options: &ConvertOptions) -> Result<()> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension(cmpose::pose::POSE_EXTENSION));

    println!("Converting: {} -> {}", input.display(), output.display());

    let report = convert_file(input, &output, options).context("Failed to convert CMP file")?;

    println!(
        "Conversion complete: {} bones, {} skipped, {} malformed",
        report.converted(),
        report.skipped(),
        report.failed()
    );

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    filter: Option<&str>,
    options: &ConvertOptions,
) -> Result<()> {
    let pattern = filter
        .map(glob::Pattern::new)
        .transpose()
        .context("Invalid filter pattern")?;

    // Collect matching files
    let files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_cmp_file(p))
        .filter(|p| match (&pattern, p.file_name().and_then(|n| n.to_str())) {
            (Some(pattern), Some(name)) => pattern.matches(name),
            (Some(_), None) => false,
            (None, _) => true,
        })
        .collect();

    println!("Converting {} files to {}...", files.len(), output.display());

    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let results: Vec<(PathBuf, Result<ConversionReport>)> = files
        .par_iter()
        .map(|file| {
            let relative = file.strip_prefix(input).unwrap_or(file);
            let output_path = output
                .join(relative)
                .with_extension(cmpose::pose::POSE_EXTENSION);

            let result = output_path
                .parent()
                .map_or(Ok(()), |dir| fs::create_dir_all(dir))
                .map_err(anyhow::Error::from)
                .and_then(|()| convert_file(file, &output_path, options).map_err(Into::into));

            pb.inc(1);
            (file.clone(), result)
        })
        .collect();

    pb.finish_with_message("Done");

    let summary = BatchSummary::tally(&results);

    println!(
        "Converted {} files in {:?} ({} errors, {} malformed bones skipped)",
        summary.converted,
        start.elapsed(),
        summary.errors,
        summary.malformed
    );

    Ok(())
}

/// Totals of a batch run.
#[derive(Debug, Default, PartialEq, Eq)]
struct BatchSummary {
    converted: usize,
    malformed: usize,
    errors: usize,
}

impl BatchSummary {
    /// Count results, logging every file that failed.
    fn tally(results: &[(PathBuf, Result<ConversionReport>)]) -> Self {
        let mut summary = Self::default();
        for (file, result) in results {
            // Malformed bones were already logged by the converter
            match result {
                Ok(report) => {
                    summary.converted += 1;
                    summary.malformed += report.failed();
                }
                Err(e) => {
                    tracing::error!("Error converting {}: {:#}", file.display(), e);
                    summary.errors += 1;
                }
            }
        }
        summary
    }
}

fn cmd_inspect(input: &Path) -> Result<()> {
    let cmp = CmpDocument::from_cmp(input).context("Failed to read CMP file")?;

    println!("CMP file: {}", input.display());
    println!("  Version:     {}", cmp.cmp_version().unwrap_or("-"));
    println!("  Race:        {}", cmp.race().unwrap_or("-"));
    println!("  Clan:        {}", cmp.clan().unwrap_or("-"));
    println!("  Body:        {}", cmp.body_type().unwrap_or("-"));
    println!("  Created:     {}", cmp.date_created().unwrap_or("-"));
    println!("  Description: {}", cmp.description().unwrap_or("-"));
    println!("  Records:     {}", cmp.len());
    println!();

    let conversion = PoseConverter::default().convert(&cmp)?;

    for report in conversion.report.records() {
        match &report.outcome {
            RecordOutcome::Converted { target } => {
                let rotation = conversion
                    .document
                    .bone(target)
                    .map(|t| t.rotation.as_str())
                    .unwrap_or("");
                println!("{:<24} -> {:<16} {}", report.source, target, rotation);
                print_native_check(&cmp, &report.source);
            }
            RecordOutcome::Skipped(reason) => {
                println!("{:<24}    skipped ({})", report.source, reason);
            }
            RecordOutcome::Failed(err) => {
                println!("{:<24}    MALFORMED: {}", report.source, err.reason());
            }
        }
    }

    println!(
        "\nTotal: {} bones, {} skipped, {} malformed",
        conversion.report.converted(),
        conversion.report.skipped(),
        conversion.report.failed()
    );

    Ok(())
}

/// Compare the hex decode of a record with the native little-endian decode.
fn print_native_check(cmp: &CmpDocument, name: &str) {
    let Some(value) = cmp.value(name).as_str() else {
        return;
    };

    let decoded = Quaternion::decode_hex(value);
    let native = hex::decode_byte_pairs(value)
        .map_err(cmpose::cmp::Error::from)
        .and_then(|bytes| Quaternion::from_le_bytes(&bytes));

    if let (Ok(decoded), Ok(native)) = (decoded, native) {
        if decoded != native {
            println!("{:<24}    native decode differs: {:?}", "", native);
        }
    }
}

fn cmd_bones(filter: Option<&str>) {
    let mut count = 0;
    for &(source, target) in bones::BONE_TABLE {
        if let Some(text) = filter {
            if !source.contains(text) && !target.contains(text) {
                continue;
            }
        }

        println!("{:<24} {}", source, target);
        count += 1;
    }

    println!("\nTotal: {} entries", count);
}

fn is_cmp_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(cmpose::cmp::CMP_EXTENSION))
}
