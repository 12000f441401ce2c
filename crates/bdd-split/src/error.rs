//! Semantic error types for report splitting.
//!
//! Errors are split between precondition violations (bad configuration,
//! missing input text) and structurally broken reports. Degenerate input,
//! such as a document with no scenarios, is not an error and never reaches
//! this module.

use thiserror::Error;

/// Errors that can abort a splitting run.
#[derive(Debug, Error)]
pub enum SplitError {
    /// A configured expected tag does not carry the `@` sigil or has no name.
    #[error("invalid expected tag '{tag}': tags must start with '@' followed by a name")]
    InvalidTag {
        /// The offending tag as configured.
        tag: String,
    },

    /// The input document contained no text.
    #[error("report document is empty")]
    EmptyDocument,

    /// The input document is not a valid report.
    #[error("malformed report JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An Examples value row does not match the header width.
    #[error(
        "Examples row {row} of '{scenario}' has {found} cells, expected {expected} to match the \
         header"
    )]
    RaggedExamples {
        /// Name of the scenario outline owning the table.
        scenario: String,
        /// One-based index of the offending value row.
        row: usize,
        /// Number of header cells.
        expected: usize,
        /// Number of cells found in the row.
        found: usize,
    },

    /// Several Examples blocks of one outline declare different headers.
    #[error("Examples blocks of '{scenario}' declare inconsistent headers")]
    InconsistentExamples {
        /// Name of the scenario outline owning the tables.
        scenario: String,
    },

    /// Two assembled scenarios would be written to the same file.
    #[error("two scenarios would be written to '{path}'")]
    DuplicateOutput {
        /// Path relative to the output root.
        path: String,
    },

    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An I/O error occurred while emitting files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
