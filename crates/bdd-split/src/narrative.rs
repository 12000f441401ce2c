//! Feature heading and description written above each emitted scenario.
//!
//! Every emitted file is its own feature, so the heading combines the
//! source feature title with the scenario title to keep files
//! distinguishable in runner output.

use crate::extract::SECTION_INDENT;
use crate::report::Feature;

/// Compose the narrative lines for one scenario.
///
/// The first line is `<Keyword>: <feature name>: <scenario title>`, where
/// the scenario title is the part of `scenario_heading` after its own
/// keyword. Description lines follow, indented; an empty description adds
/// nothing.
///
/// # Examples
/// ```
/// use bdd_split::narrative::compose;
/// use bdd_split::report::Feature;
///
/// let feature: Feature =
///     serde_json::from_str(r#"{"name": "Search", "description": "Find things"}"#).unwrap();
/// assert_eq!(
///     compose(&feature, "  Scenario: Search for Cheese"),
///     vec!["Feature: Search: Search for Cheese", "  Find things"],
/// );
/// ```
#[must_use]
pub fn compose(feature: &Feature, scenario_heading: &str) -> Vec<String> {
    let keyword = feature.keyword.trim().trim_end_matches(':');
    let title = title_fragment(scenario_heading);
    let name = feature.name.trim();
    let heading = if name.is_empty() {
        format!("{keyword}: {title}")
    } else {
        format!("{keyword}: {name}: {title}")
    };
    let mut lines = vec![heading];
    lines.extend(description_lines(&feature.description).map(|line| {
        if line.is_empty() {
            String::new()
        } else {
            format!("{SECTION_INDENT}{line}")
        }
    }));
    lines
}

/// The text after the first colon of a heading line, trimmed.
///
/// Headings without a colon are returned whole.
#[must_use]
pub fn title_fragment(heading: &str) -> &str {
    heading
        .split_once(':')
        .map_or(heading, |(_, title)| title)
        .trim()
}

fn description_lines(description: &str) -> impl Iterator<Item = &str> {
    let lines: Vec<&str> = description.lines().map(str::trim).collect();
    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());
    let range = match (first, last) {
        (Some(first), Some(last)) => first..last + 1,
        _ => 0..0,
    };
    lines.into_iter().skip(range.start).take(range.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn feature(name: &str, description: &str) -> Feature {
        Feature {
            uri: "features/search.feature".into(),
            keyword: "Feature".into(),
            name: name.into(),
            description: description.into(),
            elements: Vec::new(),
        }
    }

    #[rstest]
    #[case("  Scenario: Search for Cheese", "Search for Cheese")]
    #[case("Scenario Outline: Search for <term>", "Search for <term>")]
    #[case("  Scenario: Ratio 1:2", "Ratio 1:2")]
    #[case("no colon here", "no colon here")]
    fn extracts_title_fragment(#[case] heading: &str, #[case] expected: &str) {
        assert_eq!(title_fragment(heading), expected);
    }

    #[test]
    fn composes_heading_and_description() {
        let lines = compose(
            &feature("Search", "\n  As a shopper\n  I want to search\n\n"),
            "  Scenario: Search for StarWars",
        );
        assert_eq!(
            lines,
            vec![
                "Feature: Search: Search for StarWars",
                "  As a shopper",
                "  I want to search",
            ]
        );
    }

    #[test]
    fn omits_empty_description() {
        let lines = compose(&feature("Search", "   "), "  Scenario: plain");
        assert_eq!(lines, vec!["Feature: Search: plain"]);
    }

    #[test]
    fn omits_empty_feature_name() {
        let lines = compose(&feature("", ""), "  Scenario: plain");
        assert_eq!(lines, vec!["Feature: plain"]);
    }
}
