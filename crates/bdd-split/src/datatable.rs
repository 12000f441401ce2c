//! Rendering of step arguments back into feature text.
//!
//! Data tables are written one pipe-delimited line per row with a single
//! space either side of each cell. Columns are not aligned.

use crate::report::{DocString, TableRow};

const DOC_STRING_DELIMITER: &str = "\"\"\"";

/// Render one row as `| a | b |`.
///
/// Pipes, backslashes and newlines inside cells are escaped so the line
/// parses back into the same cells.
///
/// # Examples
/// ```
/// use bdd_split::datatable::render_row;
///
/// assert_eq!(render_row(&["a", "b"]), "| a | b |");
/// ```
#[must_use]
pub fn render_row<S: AsRef<str>>(cells: &[S]) -> String {
    let mut line = String::from("|");
    for cell in cells {
        line.push(' ');
        push_escaped_cell(&mut line, cell.as_ref());
        line.push_str(" |");
    }
    line
}

fn push_escaped_cell(line: &mut String, cell: &str) {
    for ch in cell.chars() {
        match ch {
            '\\' => line.push_str("\\\\"),
            '|' => line.push_str("\\|"),
            '\n' => line.push_str("\\n"),
            other => line.push(other),
        }
    }
}

/// Render every row of a table in order.
#[must_use]
pub fn render_table(rows: &[TableRow]) -> Vec<String> {
    rows.iter().map(|row| render_row(row.cells.as_slice())).collect()
}

/// Append a rendered table to `buffer`, prefixing each line with `indent`.
pub fn append_table(rows: &[TableRow], indent: &str, buffer: &mut Vec<String>) {
    buffer.extend(
        render_table(rows)
            .into_iter()
            .map(|line| format!("{indent}{line}")),
    );
}

/// Append a doc string block to `buffer`, prefixing each line with `indent`.
pub fn append_doc_string(doc: &DocString, indent: &str, buffer: &mut Vec<String>) {
    let content_type = doc.content_type.as_deref().unwrap_or_default();
    buffer.push(format!("{indent}{DOC_STRING_DELIMITER}{content_type}"));
    buffer.extend(doc.value.lines().map(|line| {
        let escaped = line.replace(DOC_STRING_DELIMITER, "\\\"\\\"\\\"");
        format!("{indent}{escaped}")
    }));
    buffer.push(format!("{indent}{DOC_STRING_DELIMITER}"));
}
