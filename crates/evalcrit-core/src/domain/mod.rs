//! Domain model for evaluation criteria.
//!
//! Canonical definitions shared by the editor, the formatter and screening:
//! - `Criterion` / `EvaluationCriteria`: what listings are judged against
//! - `HardCriterion`: machine-checkable predicate attached to a criterion
//! - `CriterionAnswer`: the realized answer for one listing

pub mod answer;
pub mod criterion;
pub mod digest;
pub mod error;
pub mod hard_criterion;

pub use answer::CriterionAnswer;
pub use criterion::{Criterion, CriterionType, EvaluationCriteria, YesNo, YesNoUncertain};
pub use error::{CriteriaError, EditorError, Result, RowError};
pub use hard_criterion::{HardCriterion, NumericDomain, NumericOperator, NumericalHardCriterion};
