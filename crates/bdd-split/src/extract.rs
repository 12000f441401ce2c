//! Step and background extraction.
//!
//! Turns one report element back into indented feature text. Backgrounds
//! land in the feature-scoped buffer of the [`RunContext`]; scenarios and
//! outlines become the current [`ScenarioDraft`]. A step's data table or
//! doc string is appended immediately after the step line.

use crate::context::{RunContext, ScenarioDraft};
use crate::datatable::{append_doc_string, append_table};
use crate::report::{Element, ElementKind, Step};
use crate::tags::tag_line;

/// Indentation of section headings, tag lines and description text.
pub const SECTION_INDENT: &str = "  ";
/// Indentation of step lines.
pub const STEP_INDENT: &str = "    ";
/// Indentation of data table rows and doc strings.
pub const ARGUMENT_INDENT: &str = "      ";

/// Keyword used for scenarios expanded from an outline.
pub const CONCRETE_SCENARIO_KEYWORD: &str = "Scenario";

const BACKGROUND_KEYWORD: &str = "Background";

/// Route an element into the context.
///
/// Backgrounds replace the feature's background buffer; any other element
/// becomes the current scenario draft.
pub fn extract_element(element: &Element, ctx: &mut RunContext) {
    if element.is_background() {
        ctx.record_background(background_lines(element));
    } else {
        ctx.start_scenario(scenario_draft(element));
    }
}

/// Render a background element as a heading followed by its steps.
#[must_use]
pub fn background_lines(element: &Element) -> Vec<String> {
    let keyword = non_empty_keyword(&element.keyword, BACKGROUND_KEYWORD);
    let heading = format!("{SECTION_INDENT}{keyword}: {}", element.name);
    let mut lines = vec![heading.trim_end().to_string()];
    append_steps(&element.steps, &mut lines);
    lines
}

/// Render a scenario or outline element without any substitution.
///
/// Outlines are headed with [`CONCRETE_SCENARIO_KEYWORD`] because the
/// emitted file never carries their Examples table.
#[must_use]
pub fn scenario_draft(element: &Element) -> ScenarioDraft {
    let keyword = if is_outline(element) {
        CONCRETE_SCENARIO_KEYWORD.to_string()
    } else {
        non_empty_keyword(&element.keyword, CONCRETE_SCENARIO_KEYWORD)
    };
    let mut steps = Vec::with_capacity(element.steps.len());
    append_steps(&element.steps, &mut steps);
    ScenarioDraft {
        tag_line: tag_line(&element.tag_names()),
        keyword,
        name: element.name.clone(),
        steps,
    }
}

fn is_outline(element: &Element) -> bool {
    element.kind == ElementKind::ScenarioOutline || element.examples.is_some()
}

fn non_empty_keyword(keyword: &str, fallback: &str) -> String {
    let trimmed = keyword.trim().trim_end_matches(':');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Append the rendered steps, each followed by its argument, to `buffer`.
pub fn append_steps(steps: &[Step], buffer: &mut Vec<String>) {
    for step in steps {
        buffer.push(render_step(step));
        if !step.rows.is_empty() {
            append_table(&step.rows, ARGUMENT_INDENT, buffer);
        }
        if let Some(doc) = &step.doc_string {
            append_doc_string(doc, ARGUMENT_INDENT, buffer);
        }
    }
}

fn render_step(step: &Step) -> String {
    format!("{STEP_INDENT}{} {}", step.keyword.trim(), step.name)
}
