//! evalcrit core library
//!
//! Evaluation criteria for marketplace galleries: the criterion and answer
//! vocabulary, hard-criterion validation, the authoring editor, formatting
//! and hard-criteria screening of evaluated listings.

pub mod boolean;
pub mod config;
pub mod domain;
pub mod editor;
pub mod format;
pub mod numeric;
pub mod screening;
pub mod telemetry;

pub use boolean::BooleanSelection;
pub use config::{EditorConfig, DEFAULT_ERROR_SEPARATOR};
pub use domain::{
    CriteriaError, Criterion, CriterionAnswer, CriterionType, EditorError, EvaluationCriteria,
    HardCriterion, NumericDomain, NumericOperator, NumericalHardCriterion, Result, RowError, YesNo,
    YesNoUncertain,
};
pub use editor::{
    CriteriaEditor, CriterionRow, HardCriterionInput, Operand, OperandSlot, SubmittedCriteria,
};
pub use format::{format_criterion_answer, format_hard_criterion, NO_HARD_CRITERION};
pub use numeric::{validate_numeric, NumericDraft, NumericOutcome};
pub use screening::{screen_answers, ScreeningVerdict, ScreeningViolation};
pub use telemetry::init_tracing;
