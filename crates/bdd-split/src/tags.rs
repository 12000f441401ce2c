//! Tag-based inclusion filtering.
//!
//! A scenario survives the filter when one of the configured expected tags
//! occurs anywhere in its tag line, so `@smoke` also selects `@smoke-test`.
//! Because every tag starts with `@`, `@regression` never matches inside
//! `@not-regression`. Scenarios without tags never survive.

use crate::error::SplitError;

/// Prefix every tag must carry.
pub const TAG_SIGIL: char = '@';

/// Expected tags used when none are configured.
pub const DEFAULT_EXPECTED_TAGS: [&str; 2] = ["@smoke", "@regression"];

/// Validated set of expected tags.
///
/// # Examples
/// ```
/// use bdd_split::tags::TagFilter;
///
/// let filter = TagFilter::default();
/// assert!(filter.matches(Some("@wip @regression")));
/// assert!(filter.matches(Some("@smoke-test")));
/// assert!(!filter.matches(Some("@not-regression")));
/// assert!(!filter.matches(None));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    expected: Vec<String>,
}

impl Default for TagFilter {
    fn default() -> Self {
        Self {
            expected: DEFAULT_EXPECTED_TAGS.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl TagFilter {
    /// Build a filter, checking every tag up front.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidTag`] for the first tag that lacks the
    /// `@` sigil, has no name, or contains whitespace.
    pub fn new<I, S>(expected: I) -> Result<Self, SplitError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let expected = expected
            .into_iter()
            .map(Into::into)
            .map(|tag| validate_tag(&tag).map(|()| tag))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { expected })
    }

    /// The configured tags in declaration order.
    #[must_use]
    pub fn expected(&self) -> &[String] {
        &self.expected
    }

    /// Decide whether a scenario with the given tag line should be emitted.
    #[must_use]
    pub fn matches(&self, tag_line: Option<&str>) -> bool {
        matches(tag_line, &self.expected)
    }
}

/// Whether any expected tag occurs in `tag_line`.
///
/// Returns `false` when the scenario declared no tags.
#[must_use]
pub fn matches(tag_line: Option<&str>, expected: &[String]) -> bool {
    tag_line.is_some_and(|line| expected.iter().any(|tag| line.contains(tag.as_str())))
}

/// Join tags into the single line written above a scenario heading.
///
/// Returns `None` for an empty tag set so untagged scenarios carry no line.
#[must_use]
pub fn tag_line(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        None
    } else {
        Some(tags.join(" "))
    }
}

fn validate_tag(tag: &str) -> Result<(), SplitError> {
    let valid = tag
        .strip_prefix(TAG_SIGIL)
        .is_some_and(|name| !name.is_empty() && !name.chars().any(char::is_whitespace));
    if valid {
        Ok(())
    } else {
        Err(SplitError::InvalidTag {
            tag: tag.to_string(),
        })
    }
}

/// Extend the destination tag set with new values, preserving order and
/// removing duplicates.
pub(crate) fn extend_tag_set(target: &mut Vec<String>, additions: &[String]) {
    for tag in additions {
        let formatted = if tag.starts_with(TAG_SIGIL) {
            tag.clone()
        } else {
            format!("{TAG_SIGIL}{tag}")
        };
        if !target.iter().any(|existing| existing == &formatted) {
            target.push(formatted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("@regression"), true)]
    #[case(Some("@smoke"), true)]
    #[case(Some("@wip @smoke"), true)]
    #[case(Some("@not-regression"), false)]
    #[case(Some("@smoke-test"), true)]
    #[case(Some("@regression-nightly"), true)]
    #[case(Some("@wip @nightly-regression"), false)]
    #[case(Some("@wip"), false)]
    #[case(None, false)]
    fn default_filter_cases(#[case] line: Option<&str>, #[case] expected: bool) {
        assert_eq!(TagFilter::default().matches(line), expected);
    }

    #[rstest]
    #[case(Some("@api-v2"), true)]
    #[case(Some("@wip @api"), true)]
    #[case(Some("@apiary"), true)]
    #[case(Some("@rest-api"), false)]
    fn expected_tags_match_as_substrings(#[case] line: Option<&str>, #[case] expected: bool) {
        assert_eq!(matches(line, &["@api".to_string()]), expected);
    }

    #[test]
    fn untagged_scenarios_never_match() {
        let filter = match TagFilter::new(["@a", "@b", "@c"]) {
            Ok(filter) => filter,
            Err(err) => panic!("valid tags rejected: {err}"),
        };
        assert!(!filter.matches(None));
    }

    #[rstest]
    #[case("smoke")]
    #[case("@")]
    #[case("@two words")]
    #[case("")]
    fn rejects_malformed_tags(#[case] tag: &str) {
        let result = TagFilter::new(["@ok", tag]);
        match result {
            Err(SplitError::InvalidTag { tag: reported }) => assert_eq!(reported, tag),
            other => panic!("expected InvalidTag, got {other:?}"),
        }
    }

    #[test]
    fn default_filter_lists_smoke_and_regression() {
        assert_eq!(TagFilter::default().expected(), ["@smoke", "@regression"]);
    }

    #[test]
    fn tag_line_joins_tags() {
        assert_eq!(
            tag_line(&["@a".to_string(), "@b".to_string()]).as_deref(),
            Some("@a @b")
        );
        assert_eq!(tag_line(&[]), None);
    }

    #[test]
    fn extend_tag_set_adds_sigil_and_deduplicates() {
        let mut tags = vec!["@a".to_string()];
        extend_tag_set(&mut tags, &["a".to_string(), "b".to_string()]);
        assert_eq!(tags, vec!["@a", "@b"]);
    }
}
