//! Run configuration parsed from environment variables.
//!
//! Every setting can be overridden via environment variables prefixed with
//! `BDD_SPLIT_`; command-line values take precedence through
//! [`SplitConfig::apply_overrides`].

use std::env;
use std::str::FromStr;

use camino::Utf8PathBuf;
use tracing::level_filters::LevelFilter;

use crate::error::SplitError;
use crate::tags::{DEFAULT_EXPECTED_TAGS, TagFilter};

/// Environment variable holding comma-separated expected tags.
pub const TAGS_ENV: &str = "BDD_SPLIT_TAGS";
/// Environment variable holding the output root.
pub const OUTPUT_DIR_ENV: &str = "BDD_SPLIT_OUTPUT_DIR";
/// Environment variable holding the log level.
pub const LOG_LEVEL_ENV: &str = "BDD_SPLIT_LOG_LEVEL";

/// Default output root, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "split-features";

/// Verbosity of the diagnostics written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Placeholder substitution and context resets.
    Trace,
    /// Per-element decisions such as skipped elements and outline expansion.
    Debug,
    /// One line per emitted or filtered scenario.
    #[default]
    Info,
    /// Degenerate input such as features without scenarios.
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(SplitError::InvalidConfig(format!(
                "{LOG_LEVEL_ENV} or --log-level got '{s}', expected trace, debug, info, warn \
                 or error"
            ))),
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// Configuration for a splitting run.
///
/// # Environment Variables
///
/// - `BDD_SPLIT_TAGS`: comma-separated expected tags, e.g. `@smoke,@wip`
/// - `BDD_SPLIT_OUTPUT_DIR`: directory receiving the generated files
/// - `BDD_SPLIT_LOG_LEVEL`: log level (trace, debug, info, warn, error)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    /// Tags a scenario must carry to be emitted.
    pub expected_tags: Vec<String>,
    /// Root directory for generated files. Emptied at the start of a run.
    pub output_dir: Utf8PathBuf,
    /// Log level.
    pub log_level: LogLevel,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            expected_tags: DEFAULT_EXPECTED_TAGS.iter().map(ToString::to_string).collect(),
            output_dir: Utf8PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_level: LogLevel::default(),
        }
    }
}

impl SplitConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidConfig`] if a variable holds an invalid
    /// value.
    pub fn from_env() -> Result<Self, SplitError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value. Missing or blank values fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidConfig`] if a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SplitError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let expected_tags = match read(TAGS_ENV) {
            Some(value) => parse_tag_list(&value)?,
            None => defaults.expected_tags,
        };
        let output_dir = read(OUTPUT_DIR_ENV).map_or(defaults.output_dir, Utf8PathBuf::from);
        let log_level = match read(LOG_LEVEL_ENV) {
            Some(value) => value.parse()?,
            None => defaults.log_level,
        };

        Ok(Self {
            expected_tags,
            output_dir,
            log_level,
        })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// An empty tag list leaves the configured tags in place.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        expected_tags: Vec<String>,
        output_dir: Option<Utf8PathBuf>,
        log_level: Option<LogLevel>,
    ) -> Self {
        if !expected_tags.is_empty() {
            self.expected_tags = expected_tags;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }

    /// Replace the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Build the tag filter for the configured tags.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidTag`] if a tag is malformed.
    pub fn tag_filter(&self) -> Result<TagFilter, SplitError> {
        TagFilter::new(self.expected_tags.iter().cloned())
    }
}

fn parse_tag_list(value: &str) -> Result<Vec<String>, SplitError> {
    let tags: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect();
    if tags.is_empty() {
        return Err(SplitError::InvalidConfig(format!(
            "{TAGS_ENV} lists no tags in '{value}'"
        )));
    }
    Ok(tags)
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("Debug", LogLevel::Debug)]
    #[case("INFO", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_valid_values(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().ok(), Some(expected));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let error = "loud".parse::<LogLevel>().expect_err("unknown level");
        assert!(error.to_string().contains("got 'loud'"));
    }

    #[rstest]
    #[case(LogLevel::Trace, LevelFilter::TRACE)]
    #[case(LogLevel::Warn, LevelFilter::WARN)]
    #[case(LogLevel::Error, LevelFilter::ERROR)]
    fn log_levels_map_onto_tracing_filters(
        #[case] level: LogLevel,
        #[case] expected: LevelFilter,
    ) {
        assert_eq!(LevelFilter::from(level), expected);
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = SplitConfig::from_lookup(lookup(&[])).expect("defaults load");
        assert_eq!(config, SplitConfig::default());
        assert_eq!(config.expected_tags, ["@smoke", "@regression"]);
        assert_eq!(config.output_dir, DEFAULT_OUTPUT_DIR);
    }

    #[test]
    fn environment_values_are_parsed() {
        let config = SplitConfig::from_lookup(lookup(&[
            (TAGS_ENV, " @wip , @nightly,"),
            (OUTPUT_DIR_ENV, "out/features"),
            (LOG_LEVEL_ENV, "debug"),
        ]))
        .expect("config loads");
        assert_eq!(config.expected_tags, ["@wip", "@nightly"]);
        assert_eq!(config.output_dir, "out/features");
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = SplitConfig::from_lookup(lookup(&[(OUTPUT_DIR_ENV, "  ")]))
            .expect("config loads");
        assert_eq!(config.output_dir, DEFAULT_OUTPUT_DIR);
    }

    #[rstest]
    #[case(TAGS_ENV, ",,")]
    #[case(LOG_LEVEL_ENV, "chatty")]
    fn invalid_values_are_rejected(#[case] key: &str, #[case] value: &str) {
        let result = SplitConfig::from_lookup(lookup(&[(key, value)]));
        assert!(matches!(result, Err(SplitError::InvalidConfig(_))));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = SplitConfig::default().apply_overrides(
            vec!["@wip".into()],
            Some(Utf8PathBuf::from("elsewhere")),
            Some(LogLevel::Error),
        );
        assert_eq!(config.expected_tags, ["@wip"]);
        assert_eq!(config.output_dir, "elsewhere");
        assert_eq!(config.log_level, LogLevel::Error);

        let config = SplitConfig::default().apply_overrides(Vec::new(), None, None);
        assert_eq!(config, SplitConfig::default());
    }

    #[test]
    fn tag_filter_validates_sigils() {
        let config = SplitConfig::default().apply_overrides(vec!["smoke".into()], None, None);
        assert!(matches!(
            config.tag_filter(),
            Err(SplitError::InvalidTag { .. })
        ));
        let filter = SplitConfig::default().tag_filter().expect("defaults valid");
        assert_eq!(filter.expected(), ["@smoke", "@regression"]);
    }
}
