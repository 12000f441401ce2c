//! Scenario Outline expansion.
//!
//! An outline's Examples rows become a queue of [`ParameterBinding`]s that
//! is drained front-first. Each binding is consumed exactly once to build
//! one concrete scenario, so an outline with `N` value rows yields `N`
//! scenarios in table order and leaves the queue empty.

use std::collections::VecDeque;

use crate::context::ScenarioDraft;
use crate::error::SplitError;
use crate::extract;
use crate::naming;
use crate::report::Element;

mod examples;
mod placeholder;

pub use placeholder::{PlaceholderMode, contains_placeholders, slug, substitute};

/// Parameter values for exactly one Examples value row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterBinding {
    row_index: usize,
    pairs: Vec<(String, String)>,
}

impl ParameterBinding {
    /// Zip a value row with the header names.
    ///
    /// `row_index` is the zero-based position of the row among the value
    /// rows. Extra values or headers beyond the shorter side are ignored.
    #[must_use]
    pub fn new(row_index: usize, headers: &[String], values: &[String]) -> Self {
        let pairs = headers
            .iter()
            .cloned()
            .zip(values.iter().cloned())
            .collect();
        Self { row_index, pairs }
    }

    /// Zero-based position of the row among the value rows.
    #[must_use]
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    /// `(name, value)` pairs in column order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Value of the first column whose header matches `placeholder`.
    #[must_use]
    pub fn value_for(&self, placeholder: &str, mode: PlaceholderMode) -> Option<&str> {
        self.pairs()
            .find(|(name, _)| mode.accepts(name, placeholder))
            .map(|(_, value)| value)
    }
}

/// Pending Examples rows of one outline, consumed oldest first.
///
/// # Examples
/// ```
/// use bdd_split::outline::ExampleQueue;
///
/// let headers = vec!["term".to_string()];
/// let rows = vec![vec!["Cheese".to_string()], vec!["StarWars".to_string()]];
/// let mut queue = ExampleQueue::from_rows(&headers, &rows);
/// assert_eq!(queue.remaining(), 2);
/// assert_eq!(queue.next().map(|b| b.row_index()), Some(0));
/// assert_eq!(queue.next().map(|b| b.row_index()), Some(1));
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleQueue {
    pending: VecDeque<ParameterBinding>,
}

impl ExampleQueue {
    /// Build the queue for an element.
    ///
    /// Returns `Ok(None)` when the element has no example data and should be
    /// treated as a plain scenario.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::RaggedExamples`] or
    /// [`SplitError::InconsistentExamples`] for malformed tables.
    pub fn from_element(element: &Element) -> Result<Option<Self>, SplitError> {
        Ok(examples::extract_examples(element)?
            .map(|table| Self::from_rows(&table.headers, &table.rows)))
    }

    /// Build the queue from a header and its value rows.
    #[must_use]
    pub fn from_rows(headers: &[String], rows: &[Vec<String>]) -> Self {
        let pending = rows
            .iter()
            .enumerate()
            .map(|(idx, values)| ParameterBinding::new(idx, headers, values))
            .collect();
        Self { pending }
    }

    /// Number of rows not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Whether every row has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Iterator for ExampleQueue {
    type Item = ParameterBinding;

    fn next(&mut self) -> Option<Self::Item> {
        self.pending.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pending.len(), Some(self.pending.len()))
    }
}

impl ExactSizeIterator for ExampleQueue {}

/// One outline row turned into a concrete scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcreteScenario {
    /// Substituted scenario text.
    pub draft: ScenarioDraft,
    /// Substituted identifier suffix used to derive the filename.
    pub identifier: String,
}

/// Build the concrete scenario for one row of an outline.
///
/// The outline is extracted afresh for every row so no substitution ever
/// leaks from one row into the next. When no placeholder of the identifier
/// matches a column, the one-based row number is appended so every row
/// still gets its own filename.
#[must_use]
pub fn instantiate(element: &Element, binding: &ParameterBinding) -> ConcreteScenario {
    let mut draft = extract::scenario_draft(element);
    draft.name = substitute(&draft.name, binding, PlaceholderMode::Raw);
    draft.steps = draft
        .steps
        .iter()
        .map(|line| substitute(line, binding, PlaceholderMode::Raw))
        .collect();
    let suffix = naming::identifier_suffix(element.id.as_deref().unwrap_or_default());
    let substituted = substitute(&suffix, binding, PlaceholderMode::Slug);
    let identifier = if substituted == suffix {
        format!("{suffix}-{}", binding.row_index() + 1)
    } else {
        substituted
    };
    ConcreteScenario { draft, identifier }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ExampleBlock, Examples, Step, TableRow, Tag};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn search_outline() -> Element {
        let rows = [["search term"], ["Cheese"], ["StarWars"]]
            .iter()
            .map(|cells| TableRow {
                cells: strings(cells),
            })
            .collect();
        Element {
            id: Some("search;search-for-<search-term>".into()),
            kind: crate::report::ElementKind::ScenarioOutline,
            keyword: "Scenario Outline".into(),
            name: "Search for <search term>".into(),
            tags: vec![Tag {
                name: "@regression".into(),
            }],
            steps: vec![
                Step {
                    keyword: "When ".into(),
                    name: "I search for <search term>".into(),
                    ..Step::default()
                },
                Step {
                    keyword: "Then ".into(),
                    name: "the results are:".into(),
                    rows: vec![TableRow {
                        cells: strings(&["query", "<search term>"]),
                    }],
                    ..Step::default()
                },
            ],
            examples: Some(Examples::Single(ExampleBlock {
                keyword: "Examples".into(),
                name: String::new(),
                rows,
            })),
        }
    }

    #[test]
    fn binding_zips_headers_with_values() {
        let binding = ParameterBinding::new(3, &strings(&["a", "b"]), &strings(&["1", "2"]));
        assert_eq!(binding.row_index(), 3);
        assert_eq!(binding.pairs().collect::<Vec<_>>(), [("a", "1"), ("b", "2")]);
        assert_eq!(binding.value_for("b", PlaceholderMode::Raw), Some("2"));
        assert_eq!(binding.value_for("c", PlaceholderMode::Raw), None);
    }

    #[test]
    fn queue_drains_rows_in_order_without_reuse() {
        let queue = match ExampleQueue::from_element(&search_outline()) {
            Ok(Some(queue)) => queue,
            other => panic!("expected a queue, got {other:?}"),
        };
        assert_eq!(queue.len(), 2);
        let consumed: Vec<_> = queue.map(|b| b.row_index()).collect();
        assert_eq!(consumed, [0, 1]);
    }

    #[test]
    fn queue_reports_exhaustion() {
        let mut queue = ExampleQueue::from_rows(&strings(&["x"]), &[strings(&["1"])]);
        assert!(!queue.is_empty());
        assert!(queue.next().is_some());
        assert!(queue.is_empty());
        assert_eq!(queue.remaining(), 0);
        assert!(queue.next().is_none());
    }

    #[test]
    fn plain_scenarios_have_no_queue() {
        let element = Element {
            examples: None,
            ..search_outline()
        };
        assert!(matches!(ExampleQueue::from_element(&element), Ok(None)));
    }

    #[test]
    fn instantiate_substitutes_every_fragment() {
        let element = search_outline();
        let binding = ParameterBinding::new(0, &strings(&["search term"]), &strings(&["Cheese"]));
        let concrete = instantiate(&element, &binding);
        assert_eq!(concrete.draft.name, "Search for Cheese");
        assert_eq!(concrete.identifier, "search-for-Cheese");
        assert_eq!(
            concrete.draft.steps,
            vec![
                "    When I search for Cheese",
                "    Then the results are:",
                "      | query | Cheese |",
            ]
        );
    }

    #[test]
    fn identifiers_without_placeholders_get_row_numbers() {
        let element = Element {
            id: Some("search;search".into()),
            ..search_outline()
        };
        let headers = strings(&["search term"]);
        let identifiers: Vec<_> = ExampleQueue::from_rows(
            &headers,
            &[strings(&["Cheese"]), strings(&["StarWars"])],
        )
        .map(|binding| instantiate(&element, &binding).identifier)
        .collect();
        assert_eq!(identifiers, ["search-1", "search-2"]);
    }

    #[test]
    fn instantiate_leaves_the_outline_untouched() {
        let element = search_outline();
        let first = ParameterBinding::new(0, &strings(&["search term"]), &strings(&["Cheese"]));
        let second =
            ParameterBinding::new(1, &strings(&["search term"]), &strings(&["StarWars"]));
        let _ = instantiate(&element, &first);
        let concrete = instantiate(&element, &second);
        assert_eq!(concrete.draft.name, "Search for StarWars");
        assert_eq!(element.name, "Search for <search term>");
    }
}
