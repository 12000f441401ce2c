//! Command line front end for bdd-split.
//!
//! Reads Cucumber JSON reports and writes one standalone feature file per
//! scenario carrying an expected tag.

mod cli;
mod output;

use clap::Parser;
use tracing::info;

use bdd_split::SplitConfig;
use bdd_split::logging::init_logging;

use crate::cli::{Args, build_settings};

fn main() {
    let args = Args::parse();

    let settings = match build_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&SplitConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&settings.config);

    info!(version = env!("CARGO_PKG_VERSION"), "starting bdd-split");

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = cli::run(&args, &settings, &mut stdout) {
        tracing::error!(error = ?e, "split failed");
        std::process::exit(1);
    }
}
