//! Interactive authoring of evaluation criteria.
//!
//! [`CriteriaEditor`] owns the ordered rows of an in-progress criteria form.
//! Each [`CriterionRow`] keeps its criterion, the inputs of its hard-criterion
//! sub-editor and its current validation error together, so rows can be
//! inserted and removed without keeping parallel sequences in step.
//!
//! Invalid user input never fails an edit: it is recorded as a [`RowError`]
//! on the row and folded into the aggregate error. Only contract violations
//! by the caller (bad index, editing a row of another kind) return
//! [`EditorError`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::boolean::BooleanSelection;
use crate::config::EditorConfig;
use crate::domain::{
    CriteriaError, Criterion, CriterionType, EditorError, EvaluationCriteria, HardCriterion,
    NumericDomain, NumericOperator, RowError,
};
use crate::numeric::NumericDraft;

/// Largest integer magnitude an `f64` holds exactly.
const MAX_EXACT_FLOAT_INT: u64 = 1 << 53;

/// Inputs of the hard-criterion sub-editor active for a row.
///
/// Which variant is active is decided only by the row's criterion type.
#[derive(Debug, Clone, PartialEq)]
pub enum HardCriterionInput {
    YesNo(BooleanSelection),
    Int(NumericDraft<i64>),
    Float(NumericDraft<f64>),
    /// `YesNoUncertain` and `OpenEnded` rows are descriptive only.
    Descriptive,
}

impl HardCriterionInput {
    /// The unset sub-editor for `criterion_type`.
    pub fn unset_for(criterion_type: CriterionType) -> Self {
        match criterion_type {
            CriterionType::YesNo => HardCriterionInput::YesNo(BooleanSelection::Unset),
            CriterionType::Int => HardCriterionInput::Int(NumericDraft::default()),
            CriterionType::Float => HardCriterionInput::Float(NumericDraft::default()),
            CriterionType::YesNoUncertain | CriterionType::OpenEnded => {
                HardCriterionInput::Descriptive
            }
        }
    }

    /// Sub-editor inputs reproducing a stored criterion.
    fn seeded_from(criterion: &Criterion) -> Self {
        match (criterion.criterion_type, criterion.hard_criterion) {
            (CriterionType::YesNo, Some(HardCriterion::YesNo(v))) => {
                HardCriterionInput::YesNo(BooleanSelection::from_yes_no(v))
            }
            (CriterionType::Int, Some(HardCriterion::Int(Some(c)))) => {
                HardCriterionInput::Int(NumericDraft::from_criterion(&c))
            }
            (CriterionType::Float, Some(HardCriterion::Float(Some(c)))) => {
                HardCriterionInput::Float(NumericDraft::from_criterion(&c))
            }
            (criterion_type, _) => HardCriterionInput::unset_for(criterion_type),
        }
    }
}

/// Which operand of a numeric row is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSlot {
    First,
    Second,
}

/// An operand value typed into a numeric row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Int(i64),
    Float(f64),
}

/// One row of the criteria form.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionRow {
    criterion: Criterion,
    input: HardCriterionInput,
    error: Option<RowError>,
}

impl CriterionRow {
    fn new(criterion: Criterion) -> Self {
        let input = HardCriterionInput::seeded_from(&criterion);
        Self {
            criterion,
            input,
            error: None,
        }
    }

    pub fn criterion(&self) -> &Criterion {
        &self.criterion
    }

    pub fn input(&self) -> &HardCriterionInput {
        &self.input
    }

    pub fn error(&self) -> Option<&RowError> {
        self.error.as_ref()
    }
}

/// Validate `draft` and store the outcome on the row's criterion and error.
fn store_numeric<N: NumericDomain>(
    criterion: &mut Criterion,
    error: &mut Option<RowError>,
    draft: &NumericDraft<N>,
) {
    let outcome = draft.validate();
    criterion.hard_criterion = Some(outcome.hard_criterion());
    *error = outcome.error;
}

/// Criteria handed to persistence once authoring is finished.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmittedCriteria {
    pub submission_id: Uuid,

    /// SHA256 hex digest of the canonical criteria JSON.
    pub criteria_digest: String,

    pub submitted_at: DateTime<Utc>,

    pub evaluation_criteria: EvaluationCriteria,
}

/// Editor for the ordered criteria of one gallery form.
///
/// # Invariants
///
/// - There is always at least one row.
/// - `aggregate_error` is recomputed before every mutating call returns and
///   is `None` exactly when no row has an error.
#[derive(Debug, Clone)]
pub struct CriteriaEditor {
    rows: Vec<CriterionRow>,
    config: EditorConfig,
    aggregate_error: Option<String>,
}

impl Default for CriteriaEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl CriteriaEditor {
    /// Start a form with one default `YesNo` row.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            rows: vec![CriterionRow::new(Criterion::default())],
            config,
            aggregate_error: None,
        }
    }

    /// Reopen stored criteria for editing.
    pub fn from_criteria(
        criteria: EvaluationCriteria,
        config: EditorConfig,
    ) -> Result<Self, CriteriaError> {
        criteria.validate()?;
        Ok(Self {
            rows: criteria.criteria.into_iter().map(CriterionRow::new).collect(),
            config,
            aggregate_error: None,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn rows(&self) -> &[CriterionRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&CriterionRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All row errors as one message, e.g. `"0. Please set a value."`.
    pub fn aggregate_error(&self) -> Option<&str> {
        self.aggregate_error.as_deref()
    }

    /// Snapshot of the criteria as currently authored.
    pub fn criteria(&self) -> EvaluationCriteria {
        EvaluationCriteria {
            criteria: self.rows.iter().map(|r| r.criterion.clone()).collect(),
        }
    }

    // -----------------------------------------------------------------------
    // Row list
    // -----------------------------------------------------------------------

    /// Append a default `YesNo` row and return its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(CriterionRow::new(Criterion::default()));
        debug!(rows = self.rows.len(), "criterion row added");
        self.recompute_aggregate_error();
        self.rows.len() - 1
    }

    /// Remove row `index`. Returns `false` (and changes nothing) when it is
    /// the only row left.
    pub fn delete_row(&mut self, index: usize) -> Result<bool, EditorError> {
        self.check_index(index)?;
        if self.rows.len() <= 1 {
            debug!(index, "refusing to delete the last criterion row");
            return Ok(false);
        }
        self.rows.remove(index);
        debug!(index, rows = self.rows.len(), "criterion row deleted");
        self.recompute_aggregate_error();
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Row fields
    // -----------------------------------------------------------------------

    pub fn set_question(
        &mut self,
        index: usize,
        question: impl Into<String>,
    ) -> Result<(), EditorError> {
        self.row_mut(index)?.criterion.question = question.into();
        Ok(())
    }

    /// Change the type of row `index`.
    ///
    /// A different type discards the row's hard criterion and error; the
    /// sub-editor for the new type starts unset. Selecting the current type
    /// again changes nothing.
    pub fn set_criterion_type(
        &mut self,
        index: usize,
        criterion_type: CriterionType,
    ) -> Result<(), EditorError> {
        let row = self.row_mut(index)?;
        if row.criterion.criterion_type == criterion_type {
            return Ok(());
        }
        debug!(
            index,
            from = %row.criterion.criterion_type,
            to = %criterion_type,
            "criterion type changed"
        );
        row.criterion.criterion_type = criterion_type;
        row.criterion.hard_criterion = None;
        row.input = HardCriterionInput::unset_for(criterion_type);
        row.error = None;
        self.recompute_aggregate_error();
        Ok(())
    }

    /// Set the Yes/No hard criterion of a `YesNo` row.
    pub fn select_boolean(
        &mut self,
        index: usize,
        selection: BooleanSelection,
    ) -> Result<(), EditorError> {
        let row = self.row_mut(index)?;
        let HardCriterionInput::YesNo(current) = &mut row.input else {
            return Err(wrong_kind(index, row.criterion.criterion_type, "YesNo"));
        };
        *current = selection;
        row.criterion.hard_criterion = selection.hard_criterion();
        row.error = None;
        self.recompute_aggregate_error();
        Ok(())
    }

    /// Select the operator of a numeric row; `None` is the unset selection.
    pub fn set_operator(
        &mut self,
        index: usize,
        operator: Option<NumericOperator>,
    ) -> Result<(), EditorError> {
        let CriterionRow {
            criterion,
            input,
            error,
        } = self.row_mut(index)?;
        match input {
            HardCriterionInput::Int(draft) => {
                draft.operator = operator;
                store_numeric(criterion, error, draft);
            }
            HardCriterionInput::Float(draft) => {
                draft.operator = operator;
                store_numeric(criterion, error, draft);
            }
            _ => return Err(wrong_kind(index, criterion.criterion_type, "numeric")),
        }
        self.recompute_aggregate_error();
        Ok(())
    }

    /// Set or clear one operand of a numeric row.
    ///
    /// Integer operands are accepted on `Float` rows up to 2^53 in magnitude;
    /// float operands on `Int` rows are rejected. A non-finite float leaves
    /// the operand unset, like unparsable text.
    pub fn set_operand(
        &mut self,
        index: usize,
        slot: OperandSlot,
        value: Option<Operand>,
    ) -> Result<(), EditorError> {
        let CriterionRow {
            criterion,
            input,
            error,
        } = self.row_mut(index)?;
        match input {
            HardCriterionInput::Int(draft) => {
                let value = match value {
                    None => None,
                    Some(Operand::Int(v)) => Some(v),
                    Some(Operand::Float(_)) => {
                        return Err(EditorError::OperandDomainMismatch {
                            index,
                            expected: CriterionType::Int,
                        })
                    }
                };
                *operand_mut(draft, slot) = value;
                store_numeric(criterion, error, draft);
            }
            HardCriterionInput::Float(draft) => {
                let value = match value {
                    None => None,
                    Some(Operand::Int(v)) if v.unsigned_abs() > MAX_EXACT_FLOAT_INT => {
                        return Err(EditorError::InexactOperand { index, value: v })
                    }
                    Some(Operand::Int(v)) => Some(v as f64),
                    Some(Operand::Float(v)) if !v.is_finite() => {
                        debug!(index, value = %v, "non-finite operand, treating it as unset");
                        None
                    }
                    Some(Operand::Float(v)) => Some(v),
                };
                *operand_mut(draft, slot) = value;
                store_numeric(criterion, error, draft);
            }
            _ => return Err(wrong_kind(index, criterion.criterion_type, "numeric")),
        }
        self.recompute_aggregate_error();
        Ok(())
    }

    /// Set one operand of a numeric row from text typed into the form.
    ///
    /// Text that does not parse in the row's domain leaves the operand
    /// unset, like an empty number input.
    pub fn set_operand_text(
        &mut self,
        index: usize,
        slot: OperandSlot,
        raw: &str,
    ) -> Result<(), EditorError> {
        let criterion_type = self.row_mut(index)?.criterion.criterion_type;
        let value = match criterion_type {
            CriterionType::Int => i64::parse_operand(raw).map(Operand::Int),
            CriterionType::Float => f64::parse_operand(raw).map(Operand::Float),
            other => return Err(wrong_kind(index, other, "numeric")),
        };
        if value.is_none() && !raw.trim().is_empty() {
            debug!(index, raw, "operand is not a number, treating it as unset");
        }
        self.set_operand(index, slot, value)
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    /// Finish authoring and hand over the criteria.
    ///
    /// Fails with [`EditorError::Invalid`] while any row has an error.
    pub fn submit(self) -> Result<SubmittedCriteria, EditorError> {
        if let Some(aggregate) = self.aggregate_error {
            return Err(EditorError::Invalid(aggregate));
        }

        if self.config.reject_empty_questions {
            let empty: Vec<String> = self
                .rows
                .iter()
                .enumerate()
                .filter(|(_, r)| r.criterion.question.trim().is_empty())
                .map(|(i, _)| format!("{i}. Please enter a question."))
                .collect();
            if !empty.is_empty() {
                return Err(EditorError::Invalid(
                    empty.join(self.config.error_separator.as_str()),
                ));
            }
        }

        let evaluation_criteria = EvaluationCriteria {
            criteria: self.rows.into_iter().map(|r| r.criterion).collect(),
        };
        let criteria_digest = evaluation_criteria
            .validate()
            .and_then(|()| evaluation_criteria.digest())
            .map_err(|e| EditorError::Invalid(e.to_string()))?;

        let submitted = SubmittedCriteria {
            submission_id: Uuid::new_v4(),
            criteria_digest,
            submitted_at: Utc::now(),
            evaluation_criteria,
        };
        debug!(
            submission_id = %submitted.submission_id,
            criteria = submitted.evaluation_criteria.len(),
            "criteria submitted"
        );
        Ok(submitted)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn check_index(&self, index: usize) -> Result<(), EditorError> {
        if index >= self.rows.len() {
            warn!(index, rows = self.rows.len(), "criterion row out of range");
            return Err(EditorError::RowOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut CriterionRow, EditorError> {
        self.check_index(index)?;
        Ok(&mut self.rows[index])
    }

    fn recompute_aggregate_error(&mut self) {
        let entries: Vec<String> = self
            .rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.error.as_ref().map(|e| format!("{i}. {e}")))
            .collect();

        let aggregate = if entries.is_empty() {
            None
        } else {
            Some(entries.join(self.config.error_separator.as_str()))
        };

        if aggregate != self.aggregate_error {
            debug!(error = ?aggregate, "aggregate criteria error changed");
            self.aggregate_error = aggregate;
        }
    }
}

fn operand_mut<N>(draft: &mut NumericDraft<N>, slot: OperandSlot) -> &mut Option<N> {
    match slot {
        OperandSlot::First => &mut draft.value1,
        OperandSlot::Second => &mut draft.value2,
    }
}

fn wrong_kind(index: usize, criterion_type: CriterionType, expected: &'static str) -> EditorError {
    warn!(index, %criterion_type, expected, "hard criterion edit on wrong row kind");
    EditorError::WrongRowKind {
        index,
        criterion_type,
        expected,
    }
}
