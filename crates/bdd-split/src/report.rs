//! Typed model of a Cucumber JSON execution report.
//!
//! Only the fields needed to rebuild feature text are modelled. Everything
//! else in the report (results, durations, embeddings) is ignored by
//! `serde`. A document may hold a single feature object or an array of
//! them; both shapes deserialise into a [`ParsedReport`].

use serde::Deserialize;
use serde_json::Value;

use crate::error::SplitError;
use crate::tags::extend_tag_set;

/// Every feature read from one report document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReport {
    features: Vec<Feature>,
}

impl ParsedReport {
    /// Parse a report document.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::EmptyDocument`] when `text` is blank and
    /// [`SplitError::Json`] when it is not a valid report.
    ///
    /// # Examples
    /// ```
    /// use bdd_split::report::ParsedReport;
    ///
    /// let report = ParsedReport::from_json(r#"{"uri": "a.feature", "name": "A"}"#).unwrap();
    /// assert_eq!(report.features().len(), 1);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, SplitError> {
        if text.trim().is_empty() {
            return Err(SplitError::EmptyDocument);
        }
        let features = match serde_json::from_str::<Value>(text)? {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<Feature>, _>>()?,
            other => vec![serde_json::from_value(other)?],
        };
        Ok(Self { features })
    }

    /// Build a report from already deserialised features.
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Features in document order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }
}

fn default_feature_keyword() -> String {
    "Feature".to_string()
}

/// One source feature and its executed elements.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Feature {
    /// Path of the source `.feature` file as recorded by the runner.
    #[serde(default)]
    pub uri: String,
    /// Localised feature keyword, usually `Feature`.
    #[serde(default = "default_feature_keyword")]
    pub keyword: String,
    /// Feature title.
    #[serde(default)]
    pub name: String,
    /// Free-text description following the title.
    #[serde(default)]
    pub description: String,
    /// Backgrounds, scenarios and outlines in source order.
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Feature {
    /// Whether any element of the feature declares steps.
    #[must_use]
    pub fn has_scenarios(&self) -> bool {
        self.elements.iter().any(|element| !element.steps.is_empty())
    }
}

/// Kind of a report element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// A concrete scenario.
    #[default]
    Scenario,
    /// A scenario template driven by an Examples table.
    ScenarioOutline,
    /// Steps shared by every scenario of the feature.
    Background,
}

/// A scenario, scenario outline or background.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Element {
    /// Runner-generated identifier, absent for backgrounds.
    #[serde(default)]
    pub id: Option<String>,
    /// Element kind from the report's `type` field.
    #[serde(rename = "type", default)]
    pub kind: ElementKind,
    /// Localised element keyword.
    #[serde(default)]
    pub keyword: String,
    /// Element title, possibly containing `<placeholders>`.
    #[serde(default)]
    pub name: String,
    /// Tags declared on the element.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Steps in execution order.
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Example data for scenario outlines.
    #[serde(default)]
    pub examples: Option<Examples>,
}

impl Element {
    /// Elements without an identifier are backgrounds whatever their type.
    #[must_use]
    pub fn is_background(&self) -> bool {
        self.kind == ElementKind::Background || self.id.is_none()
    }

    /// Tag names with the `@` sigil enforced and duplicates removed.
    #[must_use]
    pub fn tag_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.tags.len());
        let raw: Vec<String> = self.tags.iter().map(|tag| tag.name.clone()).collect();
        extend_tag_set(&mut names, &raw);
        names
    }
}

/// A tag attached to an element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tag {
    /// Tag name, normally including the `@` sigil.
    pub name: String,
}

/// A single executed step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Step {
    /// Step keyword as written in the source, e.g. `Given `.
    #[serde(default)]
    pub keyword: String,
    /// Step text following the keyword.
    #[serde(default)]
    pub name: String,
    /// Attached data table rows.
    #[serde(default)]
    pub rows: Vec<TableRow>,
    /// Attached doc string.
    #[serde(default)]
    pub doc_string: Option<DocString>,
}

/// One row of a data table or Examples table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TableRow {
    /// Cell values in column order.
    #[serde(default)]
    pub cells: Vec<String>,
}

/// A multi-line step argument.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DocString {
    /// Raw content between the delimiters.
    #[serde(default)]
    pub value: String,
    /// Optional media type written after the opening delimiter.
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Example data in either of the shapes runners emit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Examples {
    /// A single `{ "rows": [...] }` table.
    Single(ExampleBlock),
    /// A list of `Examples:` blocks sharing one header.
    Many(Vec<ExampleBlock>),
}

impl Examples {
    /// All blocks in declaration order.
    #[must_use]
    pub fn blocks(&self) -> &[ExampleBlock] {
        match self {
            Self::Single(block) => std::slice::from_ref(block),
            Self::Many(blocks) => blocks,
        }
    }
}

/// One `Examples:` block; row 0 is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExampleBlock {
    /// Localised `Examples` keyword.
    #[serde(default)]
    pub keyword: String,
    /// Optional block title.
    #[serde(default)]
    pub name: String,
    /// Header row followed by value rows.
    #[serde(default)]
    pub rows: Vec<TableRow>,
}
