//! Line-oriented editing sessions.
//!
//! Each non-empty line is one form event (`#` starts a comment):
//!
//! ```text
//! add
//! delete <row>
//! question <row> <text...>
//! type <row> <YesNo|YesNoUncertain|Int|Float|OpenEnded>
//! select <row> [Yes|No]
//! operator <row> [LessThan|Equal|MoreThan|Between]
//! value1 <row> [number]
//! value2 <row> [number]
//! show
//! ```
//!
//! Omitting the last argument of `select`, `operator`, `value1` or `value2`
//! resets that input to unset.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use evalcrit_core::{
    format_hard_criterion, BooleanSelection, CriteriaEditor, CriterionType, NumericOperator,
    OperandSlot,
};
use tracing::debug;

/// One parsed session line.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    Add,
    Delete(usize),
    Question(usize, String),
    Type(usize, CriterionType),
    Select(usize, BooleanSelection),
    Operator(usize, Option<NumericOperator>),
    Operand(usize, OperandSlot, String),
    Show,
}

impl EditCommand {
    /// Parse one line. Returns `None` for blank lines and comments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let (row, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let arg = arg.trim();
        let index = || -> Result<usize> {
            row.parse()
                .with_context(|| format!("'{verb}' needs a row index, got '{row}'"))
        };

        let command = match verb {
            "add" => EditCommand::Add,
            "show" => EditCommand::Show,
            "delete" => EditCommand::Delete(index()?),
            "question" => EditCommand::Question(index()?, arg.to_string()),
            "type" => EditCommand::Type(index()?, arg.parse()?),
            "select" => EditCommand::Select(index()?, arg.parse()?),
            "operator" => EditCommand::Operator(index()?, NumericOperator::parse_selection(arg)?),
            "value1" => EditCommand::Operand(index()?, OperandSlot::First, arg.to_string()),
            "value2" => EditCommand::Operand(index()?, OperandSlot::Second, arg.to_string()),
            other => bail!("unknown command '{other}'"),
        };
        Ok(Some(command))
    }

    /// Apply the command to `editor`, writing any output to `out`.
    pub fn apply(&self, editor: &mut CriteriaEditor, out: &mut impl Write) -> Result<()> {
        match self {
            EditCommand::Add => {
                let index = editor.add_row();
                writeln!(out, "added row {index}")?;
            }
            EditCommand::Delete(index) => {
                if !editor.delete_row(*index)? {
                    writeln!(out, "cannot delete the last criterion")?;
                }
            }
            EditCommand::Question(index, text) => editor.set_question(*index, text.as_str())?,
            EditCommand::Type(index, criterion_type) => {
                editor.set_criterion_type(*index, *criterion_type)?
            }
            EditCommand::Select(index, selection) => editor.select_boolean(*index, *selection)?,
            EditCommand::Operator(index, operator) => editor.set_operator(*index, *operator)?,
            EditCommand::Operand(index, slot, raw) => {
                editor.set_operand_text(*index, *slot, raw)?
            }
            EditCommand::Show => write_rows(editor, out)?,
        }
        Ok(())
    }
}

/// Print every row with its formatted hard criterion and error.
pub fn write_rows(editor: &CriteriaEditor, out: &mut impl Write) -> Result<()> {
    for (index, row) in editor.rows().iter().enumerate() {
        let criterion = row.criterion();
        writeln!(
            out,
            "{}. [{}] {} -> {}",
            index,
            criterion.criterion_type,
            criterion.question,
            format_hard_criterion(criterion.hard_criterion.as_ref())
        )?;
        if let Some(error) = row.error() {
            writeln!(out, "   error: {error}")?;
        }
    }
    Ok(())
}

/// Run every line of `input` against `editor`.
///
/// After each line that changes the aggregate error, the new error (or its
/// clearing) is written to `out`. The first bad line stops the session.
pub fn run_session(
    editor: &mut CriteriaEditor,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    for (number, line) in input.lines().enumerate() {
        let line = line.context("Failed to read session input")?;
        let number = number + 1;
        let Some(command) =
            EditCommand::parse(&line).with_context(|| format!("line {number}: {line}"))?
        else {
            continue;
        };

        debug!(line = number, ?command, "applying edit");
        let before = editor.aggregate_error().map(str::to_owned);
        command
            .apply(editor, out)
            .with_context(|| format!("line {number}: {line}"))?;

        let after = editor.aggregate_error();
        if before.as_deref() != after {
            match after {
                Some(error) => writeln!(out, "error: {error}")?,
                None => writeln!(out, "errors cleared")?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use evalcrit_core::{HardCriterion, NumericalHardCriterion};

    fn run(script: &str) -> (CriteriaEditor, String) {
        let mut editor = CriteriaEditor::default();
        let mut out = Vec::new();
        run_session(&mut editor, script.as_bytes(), &mut out).expect("session");
        (editor, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(EditCommand::parse("  # comment").unwrap(), None);
        assert_eq!(EditCommand::parse("").unwrap(), None);
        assert_eq!(
            EditCommand::parse("question 0 Is it a shirt?").unwrap(),
            Some(EditCommand::Question(0, "Is it a shirt?".to_string()))
        );
        assert_eq!(
            EditCommand::parse("operator 2").unwrap(),
            Some(EditCommand::Operator(2, None))
        );
        assert_eq!(
            EditCommand::parse("select 1 No").unwrap(),
            Some(EditCommand::Select(1, BooleanSelection::No))
        );
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        assert!(EditCommand::parse("frobnicate").is_err());
        assert!(EditCommand::parse("delete x").is_err());
        assert!(EditCommand::parse("type 0 Boolean").is_err());
        let err = EditCommand::parse("operator 0 AtLeast").unwrap_err();
        assert!(err
            .to_string()
            .contains("An invalid type of hard criterion was set."));
    }

    #[test]
    fn test_session_reports_aggregate_changes() {
        let (editor, out) = run(
            "type 0 Int\n\
             operator 0 Between\n\
             value1 0 10\n\
             value2 0 20\n",
        );
        assert_eq!(
            out,
            "error: 0. Please set the 2 values.\nerrors cleared\n"
        );
        assert_eq!(
            editor.row(0).unwrap().criterion().hard_criterion,
            Some(HardCriterion::Int(Some(NumericalHardCriterion::Between(10, 20))))
        );
    }

    #[test]
    fn test_session_show_and_delete_last() {
        let (_, out) = run("question 0 Is it boxed?\nselect 0 Yes\ndelete 0\nshow\n");
        assert_eq!(
            out,
            "cannot delete the last criterion\n0. [YesNo] Is it boxed? -> Yes\n"
        );
    }

    #[test]
    fn test_session_stops_on_contract_violation() {
        let mut editor = CriteriaEditor::default();
        let mut out = Vec::new();
        let err = run_session(&mut editor, "add\noperator 1 Equal\n".as_bytes(), &mut out)
            .unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }
}
