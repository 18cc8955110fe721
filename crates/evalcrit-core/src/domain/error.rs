//! Error taxonomy for evaluation criteria.
//!
//! Three layers:
//! - [`RowError`]: user-facing validation messages attached to a single
//!   editor row. These are data, never propagated as failures.
//! - [`CriteriaError`]: malformed criteria/answers and boundary parse faults.
//! - [`EditorError`]: a caller broke the editor's contract (bad index, wrong
//!   row kind, operand in the wrong numeric domain, submitting while invalid).

use super::criterion::CriterionType;

/// Validation failure for a single hard-criterion row.
///
/// The `Display` text is what the authoring form shows to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("Please set the 2 values.")]
    MissingBetweenValues,

    #[error("The first value must be less than the second.")]
    BoundsNotOrdered,

    #[error("Please set a value.")]
    MissingValue,
}

/// Errors about the shape of criteria and answers.
#[derive(Debug, thiserror::Error)]
pub enum CriteriaError {
    #[error("evaluation criteria must contain at least one criterion")]
    Empty,

    #[error("criterion {index}: {hard_criterion} hard criterion is not allowed on a {criterion_type} criterion")]
    HardCriterionMismatch {
        index: usize,
        criterion_type: CriterionType,
        hard_criterion: &'static str,
    },

    #[error("criterion {index}: between bounds must satisfy lo < hi ({lo} >= {hi})")]
    InvalidBounds {
        index: usize,
        lo: String,
        hi: String,
    },

    #[error("An invalid type of hard criterion was set.")]
    UnknownOperator { operator: String },

    #[error("unknown criterion type: {0}")]
    UnknownCriterionType(String),

    #[error("unknown yes/no selection: {0}")]
    UnknownSelection(String),

    #[error("Answer to question: '{question}', is not {expected} ({answer})")]
    AnswerParse {
        question: String,
        answer: String,
        expected: &'static str,
    },

    #[error("Expected {expected} answers, got {actual}")]
    AnswerCount { expected: usize, actual: usize },

    #[error("criterion {index}: float operands must be finite")]
    NonFiniteOperand { index: usize },

    #[error("NaN/Infinity not permitted in canonical JSON")]
    NonFiniteNumber,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Contract violations raised by [`crate::editor::CriteriaEditor`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    #[error("row {index} out of range (rows: {len})")]
    RowOutOfRange { index: usize, len: usize },

    #[error("row {index} is a {criterion_type} criterion and has no {expected} hard criterion")]
    WrongRowKind {
        index: usize,
        criterion_type: CriterionType,
        expected: &'static str,
    },

    #[error("row {index} expects a {expected} operand")]
    OperandDomainMismatch {
        index: usize,
        expected: CriterionType,
    },

    #[error("row {index}: {value} is not exactly representable as a Float operand")]
    InexactOperand { index: usize, value: i64 },

    #[error("criteria are not valid: {0}")]
    Invalid(String),
}

/// Result type for criteria operations.
pub type Result<T> = std::result::Result<T, CriteriaError>;
