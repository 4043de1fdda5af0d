// SPDX-License-Identifier: Apache-2.0
//
// Solidity Coverage Preprocessor
//
// Rewrites Solidity source files so a coverage instrumenter can inject
// events into every branch and loop body, without moving any line or column.
//
// Usage:
//   coverage-preprocessor <input.sol> [-o output.sol]
//   coverage-preprocessor --dir <contracts/> [--out-dir <contracts/.processed/>]
//
// Pipeline:
//   contracts/MyToken.sol
//       |
//       v
//   Coverage Preprocessor (this tool)
//       |
//       v
//   contracts/.processed/MyToken.sol (bracketed bodies, no pure/view/constant)
//       |
//       v
//   Instrumenter

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use coverage_preprocessor::{PreprocessConfig, Preprocessor, StrippedModifier};

#[derive(Parser, Debug)]
#[command(
    name = "coverage-preprocessor",
    about = "Solidity coverage preprocessor: brackets bare bodies and blanks out pure/view/constant",
    version
)]
struct Cli {
    /// Input Solidity file to preprocess
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file path (defaults to stdout if not specified)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Process all .sol files in a directory
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Output directory for batch processing (defaults to <dir>/.processed/)
    #[arg(long, value_name = "OUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Leave bare if/else/for/while bodies unbracketed
    #[arg(long)]
    no_wrap: bool,

    /// Keep pure/view/constant modifiers
    #[arg(long, conflicts_with = "strip")]
    no_strip: bool,

    /// Modifier to strip (repeatable; replaces the default pure, view, constant)
    #[arg(long, value_name = "MODIFIER")]
    strip: Vec<StrippedModifier>,

    /// Verbose output showing per-file details
    #[arg(short, long)]
    verbose: bool,

    /// Dry run: print results to stdout without writing files
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn config(&self) -> Result<PreprocessConfig> {
        let mut config = PreprocessConfig::from_env()?;
        if self.no_wrap {
            config.wrap_bodies = false;
        }
        if self.no_strip {
            config.strip_modifiers.clear();
        } else if !self.strip.is_empty() {
            config.strip_modifiers = self.strip.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let preprocessor = Preprocessor::new(cli.config()?);

    if let Some(dir) = &cli.dir {
        process_directory(&preprocessor, dir, &cli)
    } else if let Some(input) = &cli.input {
        process_single_file(&preprocessor, input, &cli)
    } else {
        bail!(
            "either provide an input file or use --dir for batch processing\n\
             Usage: coverage-preprocessor <INPUT.sol> [-o OUTPUT.sol]\n       \
             coverage-preprocessor --dir <contracts/> [--out-dir <output/>]"
        )
    }
}

fn process_single_file(preprocessor: &Preprocessor, input: &Path, cli: &Cli) -> Result<()> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let result = preprocessor
        .run(&source)
        .with_context(|| format!("failed to preprocess {}", input.display()))?;

    info!(
        file = %input.display(),
        bodies_wrapped = result.bodies_wrapped,
        modifiers_stripped = result.modifiers_stripped,
        "preprocessed"
    );

    match &cli.output {
        Some(output_path) if !cli.dry_run => {
            if let Some(parent) = output_path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create output directory {}", parent.display())
                    })?;
                }
            }
            fs::write(output_path, &result.output)
                .with_context(|| format!("failed to write {}", output_path.display()))?;
            info!("Written to: {}", output_path.display());
        }
        _ => print!("{}", result.output),
    }

    Ok(())
}

#[derive(Debug, Default)]
struct BatchTotals {
    files: usize,
    changed: usize,
    failed: usize,
}

fn process_directory(preprocessor: &Preprocessor, dir: &Path, cli: &Cli) -> Result<()> {
    if !dir.is_dir() {
        bail!("{} is not a valid directory", dir.display());
    }

    let out_dir = cli.out_dir.clone().unwrap_or_else(|| dir.join(".processed"));

    if !cli.dry_run {
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;
    }

    let mut totals = BatchTotals::default();
    process_dir_recursive(preprocessor, dir, &out_dir, dir, cli, &mut totals)?;

    info!(
        "Processed {} files, {} changed, {} failed",
        totals.files, totals.changed, totals.failed
    );

    if totals.failed > 0 {
        bail!("{} of {} files could not be preprocessed", totals.failed, totals.files);
    }
    Ok(())
}

fn process_dir_recursive(
    preprocessor: &Preprocessor,
    current: &Path,
    out_base: &Path,
    src_base: &Path,
    cli: &Cli,
    totals: &mut BatchTotals,
) -> Result<()> {
    let entries = fs::read_dir(current)
        .with_context(|| format!("failed to read directory {}", current.display()))?;

    for entry in entries {
        let path = entry?.path();

        if path.is_dir() {
            // Skip the output directory to avoid reprocessing our own results
            if path == out_base || path.file_name().is_some_and(|n| n == ".processed") {
                continue;
            }
            process_dir_recursive(preprocessor, &path, out_base, src_base, cli, totals)?;
        } else if path.extension().is_some_and(|ext| ext == "sol") {
            totals.files += 1;

            let source = match fs::read_to_string(&path) {
                Ok(s) => s,
                Err(e) => {
                    error!("failed to read {}: {}", path.display(), e);
                    totals.failed += 1;
                    continue;
                }
            };

            let result = match preprocessor.run(&source) {
                Ok(result) => result,
                Err(e) => {
                    error!("{}: {}", path.display(), e);
                    totals.failed += 1;
                    continue;
                }
            };

            if result.changed() {
                totals.changed += 1;
            }
            info!(
                "  {} -> {} bodies wrapped, {} modifiers stripped",
                path.display(),
                result.bodies_wrapped,
                result.modifiers_stripped
            );

            if cli.dry_run {
                println!("--- {} ---", path.display());
                println!("{}", result.output);
                continue;
            }

            let relative = path.strip_prefix(src_base).unwrap_or(&path);
            let out_path = out_base.join(relative);
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            fs::write(&out_path, &result.output)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
        }
    }

    Ok(())
}
