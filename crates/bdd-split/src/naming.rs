//! Output filenames and destination directories.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Extension of every emitted file.
pub const FEATURE_EXTENSION: &str = "feature";

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year][month][day][hour][minute][second][subsecond digits:9]");

const FALLBACK_STEM: &str = "scenario";

/// Source of generation timestamps embedded in filenames.
pub trait Clock {
    /// A filesystem-safe timestamp for the file about to be written.
    fn timestamp(&self) -> String;
}

/// Clock reading the current UTC time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        format_timestamp(OffsetDateTime::now_utc())
    }
}

/// Clock returning the same timestamp every time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(String);

impl FixedClock {
    /// Create a clock that always reports `timestamp`.
    #[must_use]
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self(timestamp.into())
    }
}

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}

/// Format `at` as `YYYYMMDDhhmmss` followed by nine subsecond digits.
///
/// # Examples
/// ```
/// use bdd_split::naming::format_timestamp;
/// use time::macros::datetime;
///
/// assert_eq!(
///     format_timestamp(datetime!(2024-03-05 07:08:09.000000123 UTC)),
///     "20240305070809000000123",
/// );
/// ```
#[must_use]
pub fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| at.unix_timestamp_nanos().to_string())
}

/// The last non-empty `;`-separated segment of a runner identifier.
///
/// # Examples
/// ```
/// use bdd_split::naming::identifier_suffix;
///
/// assert_eq!(identifier_suffix("search;search-for-<term>"), "search-for-<term>");
/// assert_eq!(identifier_suffix("plain"), "plain");
/// ```
#[must_use]
pub fn identifier_suffix(id: &str) -> String {
    id.split(';')
        .rfind(|segment| !segment.trim().is_empty())
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Build `<identifier>-<timestamp>.feature`.
///
/// Whitespace runs in the identifier collapse to `-` and characters that
/// are unsafe in filenames are replaced by `-`.
#[must_use]
pub fn file_name(identifier: &str, timestamp: &str) -> String {
    let stem = sanitise(identifier);
    let stem = if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    };
    format!("{stem}-{timestamp}.{FEATURE_EXTENSION}")
}

fn sanitise(identifier: &str) -> String {
    identifier
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            other => other,
        })
        .collect()
}

/// Relative directory mirroring the source feature's location.
///
/// A `file://` prefix is dropped, then only the normal components of the
/// parent directory are kept, so the result never escapes the output root.
///
/// # Examples
/// ```
/// use bdd_split::naming::source_directory;
///
/// assert_eq!(source_directory("features/search/search.feature"), "features/search");
/// assert_eq!(source_directory("file:///repo/../features/a.feature"), "repo/features");
/// ```
#[must_use]
pub fn source_directory(uri: &str) -> Utf8PathBuf {
    let path = Utf8Path::new(uri.strip_prefix("file://").unwrap_or(uri));
    path.parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|component| match component {
                    Utf8Component::Normal(part) => Some(part),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::datetime;

    #[rstest]
    #[case("feature;scenario", "scenario")]
    #[case("feature;outline;;2", "2")]
    #[case("no-separator", "no-separator")]
    #[case("", "")]
    fn suffix_cases(#[case] id: &str, #[case] expected: &str) {
        assert_eq!(identifier_suffix(id), expected);
    }

    #[rstest]
    #[case("search-for-Cheese", "search-for-Cheese-20240101.feature")]
    #[case("search for  Star Wars", "search-for-Star-Wars-20240101.feature")]
    #[case("a/b:c", "a-b-c-20240101.feature")]
    #[case("", "scenario-20240101.feature")]
    fn file_name_cases(#[case] identifier: &str, #[case] expected: &str) {
        assert_eq!(file_name(identifier, "20240101"), expected);
    }

    #[rstest]
    #[case("features/search.feature", "features")]
    #[case("search.feature", "")]
    #[case("/abs/features/search.feature", "abs/features")]
    #[case("../outside/search.feature", "outside")]
    #[case("file://features/./nested/a.feature", "features/nested")]
    fn source_directory_cases(#[case] uri: &str, #[case] expected: &str) {
        assert_eq!(source_directory(uri), Utf8PathBuf::from(expected));
    }

    #[test]
    fn timestamps_are_fixed_width() {
        assert_eq!(
            format_timestamp(datetime!(2024-12-31 23:59:59.5 UTC)),
            "20241231235959500000000"
        );
    }

    #[test]
    fn fixed_clock_repeats_its_value() {
        let clock = FixedClock::new("20240101");
        assert_eq!(clock.timestamp(), "20240101");
        assert_eq!(clock.timestamp(), "20240101");
    }

    #[test]
    fn system_clock_produces_digits() {
        let stamp = SystemClock.timestamp();
        assert_eq!(stamp.len(), 23);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }
}
