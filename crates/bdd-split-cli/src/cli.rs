//! Argument parsing and run dispatch for the `bdd-split` entrypoint.

use std::fs;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use eyre::{Context, Result};
use tracing::debug;

use bdd_split::{
    Assembly, DirectoryEmitter, LogLevel, ParsedReport, SplitConfig, SplitError, SplitSummary,
    Splitter, TagFilter, ensure_unique_paths,
};

use crate::output::{write_report_summary, write_total};

/// Split Cucumber JSON reports into one feature file per scenario.
#[derive(Parser, Debug)]
#[command(name = "bdd-split", version, about)]
pub(crate) struct Args {
    /// Report files to split.
    #[arg(required = true, value_name = "REPORT")]
    pub reports: Vec<Utf8PathBuf>,
    /// Directory receiving the generated files. Emptied before writing.
    #[arg(long, short, value_name = "DIR")]
    pub output: Option<Utf8PathBuf>,
    /// Expected tag, e.g. `@smoke`. Repeat for several tags.
    #[arg(long = "tag", short = 't', value_name = "TAG")]
    pub tags: Vec<String>,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}

/// Validated configuration for one invocation.
#[derive(Debug)]
pub(crate) struct Settings {
    pub config: SplitConfig,
    pub filter: TagFilter,
}

/// Merge environment configuration with command-line overrides.
///
/// # Errors
///
/// Returns an error if an environment value or an expected tag is invalid.
pub(crate) fn build_settings(args: &Args) -> Result<Settings, SplitError> {
    let config = SplitConfig::from_env()?.apply_overrides(
        args.tags.clone(),
        args.output.clone(),
        args.log_level,
    );
    let filter = config.tag_filter()?;
    Ok(Settings { config, filter })
}

/// Split every report into the configured output directory.
///
/// Every report is read, parsed and assembled before the output directory
/// is touched, so a bad report aborts the run without any output.
///
/// # Errors
///
/// Returns an error if a report cannot be read or split, if two scenarios
/// share a path, if the output directory cannot be prepared, or if the
/// summary cannot be written.
pub(crate) fn run(
    args: &Args,
    settings: &Settings,
    writer: &mut dyn Write,
) -> Result<SplitSummary> {
    let splitter = Splitter::new(settings.filter.clone());
    let staged = args
        .reports
        .iter()
        .map(|report| stage_report(&splitter, report).map(|assembly| (report, assembly)))
        .collect::<Result<Vec<_>>>()?;
    ensure_unique_paths(staged.iter().flat_map(|(_, assembly)| &assembly.scenarios))
        .wrap_err("reports would overwrite each other")?;

    let output_dir = &settings.config.output_dir;
    let mut emitter = DirectoryEmitter::create(output_dir)
        .wrap_err_with(|| format!("failed to prepare output directory {output_dir}"))?;
    let mut total = SplitSummary::default();
    for (report, assembly) in &staged {
        assembly
            .emit_into(&mut emitter)
            .wrap_err_with(|| format!("failed to write scenarios of {report}"))?;
        write_report_summary(writer, report, assembly.summary)?;
        total += assembly.summary;
    }
    write_total(writer, output_dir, total)?;
    Ok(total)
}

fn stage_report(splitter: &Splitter, report: &Utf8Path) -> Result<Assembly> {
    debug!(report = %report, "reading report");
    let text =
        fs::read_to_string(report).wrap_err_with(|| format!("failed to read report {report}"))?;
    ParsedReport::from_json(&text)
        .and_then(|parsed| splitter.assemble(&parsed))
        .wrap_err_with(|| format!("failed to split report {report}"))
}
