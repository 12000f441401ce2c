//! Split Cucumber JSON reports into standalone feature files.
//!
//! A test run produces a JSON report describing every feature, scenario and
//! step it executed. This crate turns such a report back into Gherkin, one
//! file per scenario, so scenarios can be distributed across parallel
//! runners.
//!
//! # Overview
//!
//! - [`report`] deserialises the report document.
//! - [`extract`] and [`datatable`] render backgrounds, steps and step
//!   arguments as indented feature text.
//! - [`outline`] expands Scenario Outlines into one concrete scenario per
//!   Examples row.
//! - [`narrative`] writes the feature heading carried by every file.
//! - [`tags`] decides which scenarios are emitted.
//! - [`assemble`] drives the pipeline and hands results to an
//!   [`emit::FeatureEmitter`].
//!
//! # Configuration
//!
//! [`config::SplitConfig`] reads `BDD_SPLIT_TAGS`, `BDD_SPLIT_OUTPUT_DIR` and
//! `BDD_SPLIT_LOG_LEVEL` from the environment.
//!
//! # Example
//!
//! ```no_run
//! use bdd_split::{DirectoryEmitter, SplitConfig, Splitter};
//!
//! # fn main() -> Result<(), bdd_split::SplitError> {
//! let config = SplitConfig::from_env()?;
//! let splitter = Splitter::new(config.tag_filter()?);
//! let mut emitter = DirectoryEmitter::create(&config.output_dir)?;
//! let report = std::fs::read_to_string("target/cucumber.json")?;
//! let summary = splitter.split_str(&report, &mut emitter)?;
//! assert_eq!(summary.emitted, emitter.written());
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod config;
pub mod context;
pub mod datatable;
pub mod emit;
pub mod error;
pub mod extract;
pub mod logging;
pub mod naming;
pub mod narrative;
pub mod outline;
pub mod report;
pub mod tags;

pub use assemble::{Assembly, SplitSummary, Splitter};
pub use config::{LogLevel, SplitConfig};
pub use emit::{
    AssembledScenario, DirectoryEmitter, FeatureEmitter, MemoryEmitter, ensure_unique_paths,
};
pub use error::SplitError;
pub use naming::{Clock, FixedClock, SystemClock};
pub use report::ParsedReport;
pub use tags::TagFilter;
