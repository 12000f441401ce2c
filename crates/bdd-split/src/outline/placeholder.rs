//! Placeholder substitution for expanded outline text.
//!
//! Step text, doc strings, table cells and scenario names refer to
//! parameters by their header name exactly as written (`<search term>`).
//! Runner-generated identifiers are slugs, so the same parameter appears
//! there lowercased and hyphenated (`<search-term>`). The two forms are
//! handled by explicit [`PlaceholderMode`]s rather than guessed from the
//! surrounding text.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use super::ParameterBinding;

/// Regex matching `<placeholder>` tokens.
///
/// Captures the name without the angle brackets. Names may contain inner
/// spaces and punctuation but not further angle brackets.
pub(crate) static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([^<>\s][^<>]*)>").unwrap_or_else(|_| unreachable!("placeholder regex is valid"))
});

/// How a placeholder name is compared with Examples header names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderMode {
    /// The placeholder must equal the header name exactly.
    Raw,
    /// The placeholder must equal the header's [`slug`], ignoring case.
    Slug,
}

impl PlaceholderMode {
    pub(crate) fn accepts(self, header: &str, placeholder: &str) -> bool {
        match self {
            Self::Raw => header == placeholder,
            Self::Slug => slug(header) == placeholder.to_lowercase(),
        }
    }
}

/// Lowercase `name` and join its whitespace-separated words with `-`.
///
/// # Examples
/// ```
/// use bdd_split::outline::slug;
///
/// assert_eq!(slug("Search  Term"), "search-term");
/// ```
#[must_use]
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Replace every `<placeholder>` in `text` with its value from `binding`.
///
/// Each occurrence takes the value of the first column, in table order,
/// whose header matches under `mode`. Placeholders with no matching column
/// stay as literal text. Substituted values are not scanned again.
///
/// # Examples
/// ```
/// use bdd_split::outline::{ParameterBinding, PlaceholderMode, substitute};
///
/// let headers = ["search term".to_string()];
/// let binding = ParameterBinding::new(0, &headers, &["Cheese".to_string()]);
/// assert_eq!(
///     substitute("I search for <search term>", &binding, PlaceholderMode::Raw),
///     "I search for Cheese",
/// );
/// assert_eq!(
///     substitute("search-for-<search-term>", &binding, PlaceholderMode::Slug),
///     "search-for-Cheese",
/// );
/// ```
#[must_use]
pub fn substitute(text: &str, binding: &ParameterBinding, mode: PlaceholderMode) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            let name = caps.get(1).map_or("", |m| m.as_str());
            binding.value_for(name, mode).map_or_else(
                || {
                    debug!(
                        placeholder = name,
                        row = binding.row_index(),
                        "placeholder has no matching Examples column; leaving it unchanged"
                    );
                    whole.to_string()
                },
                str::to_string,
            )
        })
        .into_owned()
}

/// Checks if a text contains any placeholder tokens.
#[must_use]
pub fn contains_placeholders(text: &str) -> bool {
    PLACEHOLDER_RE.is_match(text)
}
