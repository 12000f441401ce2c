//! Extraction of Examples tables from outline elements.

use crate::error::SplitError;
use crate::report::{Element, ExampleBlock};

/// Header and value rows flattened from every Examples block of an outline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ExampleTable {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

/// Extract the Examples table of an element if it carries one.
///
/// Blocks without any rows are ignored. Every remaining block must repeat
/// the header of the first, and every value row must match its width.
pub(crate) fn extract_examples(element: &Element) -> Result<Option<ExampleTable>, SplitError> {
    let Some(examples) = element.examples.as_ref() else {
        return Ok(None);
    };
    let blocks: Vec<&ExampleBlock> = examples
        .blocks()
        .iter()
        .filter(|block| !block.rows.is_empty())
        .collect();
    let Some(headers) = blocks
        .first()
        .and_then(|block| block.rows.first())
        .map(|row| row.cells.clone())
    else {
        return Ok(Some(ExampleTable::default()));
    };
    validate_header_consistency(element, &blocks, &headers)?;
    let rows = flatten_and_validate_rows(element, &blocks, headers.len())?;
    Ok(Some(ExampleTable { headers, rows }))
}

fn validate_header_consistency(
    element: &Element,
    blocks: &[&ExampleBlock],
    headers: &[String],
) -> Result<(), SplitError> {
    let consistent = blocks
        .iter()
        .filter_map(|block| block.rows.first())
        .all(|row| row.cells == headers);
    if consistent {
        Ok(())
    } else {
        Err(SplitError::InconsistentExamples {
            scenario: element.name.clone(),
        })
    }
}

fn flatten_and_validate_rows(
    element: &Element,
    blocks: &[&ExampleBlock],
    expected: usize,
) -> Result<Vec<Vec<String>>, SplitError> {
    let mut rows = Vec::new();
    for row in blocks.iter().flat_map(|block| block.rows.iter().skip(1)) {
        if row.cells.len() != expected {
            return Err(SplitError::RaggedExamples {
                scenario: element.name.clone(),
                row: rows.len() + 1,
                expected,
                found: row.cells.len(),
            });
        }
        rows.push(row.cells.clone());
    }
    Ok(rows)
}
