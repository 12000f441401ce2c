//! Helpers for rendering run summaries.

use std::io::Write;

use bdd_split::SplitSummary;
use camino::Utf8Path;
use eyre::{Context, Result};

pub(crate) fn write_report_summary(
    writer: &mut dyn Write,
    report: &Utf8Path,
    summary: SplitSummary,
) -> Result<()> {
    writeln!(
        writer,
        "{report}: {} emitted, {} filtered, {} skipped",
        summary.emitted, summary.filtered, summary.skipped_elements
    )
    .wrap_err_with(|| format!("failed to write summary for {report}"))
}

pub(crate) fn write_total(
    writer: &mut dyn Write,
    output_dir: &Utf8Path,
    total: SplitSummary,
) -> Result<()> {
    let noun = if total.emitted == 1 { "file" } else { "files" };
    writeln!(writer, "total: {} {noun} written to {output_dir}", total.emitted)
        .wrap_err("failed to write run total")
}
