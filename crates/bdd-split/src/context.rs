//! Mutable state shared by the stages of one splitting run.
//!
//! State has two lifetimes:
//!
//! - feature scope: the background text, recorded once and repeated in
//!   every scenario that follows it in the same feature. Cleared by
//!   [`RunContext::begin_feature`].
//! - scenario scope: the [`ScenarioDraft`] being assembled. Cleared by
//!   [`RunContext::finish_scenario`], which leaves the background alone.
//!
//! A fresh context is created for every report document, so nothing
//! survives from one document to the next.

use crate::extract::SECTION_INDENT;

/// Scenario text collected before narrative composition and filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioDraft {
    /// Space-separated tags, `None` when the scenario declared none.
    pub tag_line: Option<String>,
    /// Heading keyword written before the colon.
    pub keyword: String,
    /// Scenario title.
    pub name: String,
    /// Rendered, indented step lines including tables and doc strings.
    pub steps: Vec<String>,
}

impl ScenarioDraft {
    /// The indented `Keyword: name` heading line.
    #[must_use]
    pub fn heading(&self) -> String {
        let heading = format!("{SECTION_INDENT}{}: {}", self.keyword, self.name);
        heading.trim_end().to_string()
    }

    /// Tag line, heading and steps in output order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.steps.len() + 2);
        if let Some(tags) = &self.tag_line {
            lines.push(format!("{SECTION_INDENT}{tags}"));
        }
        lines.push(self.heading());
        lines.extend(self.steps.iter().cloned());
        lines
    }
}

/// Buffers shared across the stages of one report document.
#[derive(Debug, Default)]
pub struct RunContext {
    background: Vec<String>,
    scenario: ScenarioDraft,
}

impl RunContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every buffer at the start of a feature.
    pub fn begin_feature(&mut self) {
        self.background.clear();
        self.scenario = ScenarioDraft::default();
    }

    /// Record background lines for the rest of the current feature.
    pub fn record_background(&mut self, lines: Vec<String>) {
        self.background = lines;
    }

    /// Background lines recorded for the current feature.
    #[must_use]
    pub fn background(&self) -> &[String] {
        &self.background
    }

    /// Start assembling a scenario, discarding any unfinished draft.
    pub fn start_scenario(&mut self, draft: ScenarioDraft) {
        self.scenario = draft;
    }

    /// The scenario currently being assembled.
    #[must_use]
    pub fn scenario(&self) -> &ScenarioDraft {
        &self.scenario
    }

    /// Take the current draft, clearing scenario scope only.
    pub fn finish_scenario(&mut self) -> ScenarioDraft {
        std::mem::take(&mut self.scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> ScenarioDraft {
        ScenarioDraft {
            tag_line: Some("@smoke".into()),
            keyword: "Scenario".into(),
            name: name.into(),
            steps: vec!["    Given a step".into()],
        }
    }

    #[test]
    fn lines_start_with_tags_then_heading() {
        assert_eq!(
            draft("first").lines(),
            vec!["  @smoke", "  Scenario: first", "    Given a step"]
        );
    }

    #[test]
    fn untagged_drafts_start_with_heading() {
        let untagged = ScenarioDraft {
            tag_line: None,
            ..draft("plain")
        };
        assert_eq!(
            untagged.lines().first().map(String::as_str),
            Some("  Scenario: plain")
        );
    }

    #[test]
    fn finishing_a_scenario_keeps_the_background() {
        let mut ctx = RunContext::new();
        ctx.begin_feature();
        ctx.record_background(vec!["  Background:".into()]);
        ctx.start_scenario(draft("first"));
        let finished = ctx.finish_scenario();
        assert_eq!(finished.name, "first");
        assert_eq!(ctx.scenario(), &ScenarioDraft::default());
        assert_eq!(ctx.background(), ["  Background:"]);
    }

    #[test]
    fn beginning_a_feature_clears_everything() {
        let mut ctx = RunContext::new();
        ctx.record_background(vec!["  Background:".into()]);
        ctx.start_scenario(draft("first"));
        ctx.begin_feature();
        assert!(ctx.background().is_empty());
        assert_eq!(ctx.scenario(), &ScenarioDraft::default());
    }
}
