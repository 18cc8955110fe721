//! Yes/No hard-criterion selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{CriteriaError, HardCriterion, YesNo};

/// The three-way choice of a `YesNo` row: unset, Yes or No.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum BooleanSelection {
    #[default]
    Unset,
    Yes,
    No,
}

impl BooleanSelection {
    /// The hard criterion for this selection; `None` while unset.
    pub fn hard_criterion(&self) -> Option<HardCriterion> {
        match self {
            BooleanSelection::Unset => None,
            BooleanSelection::Yes => Some(HardCriterion::YesNo(YesNo::Yes)),
            BooleanSelection::No => Some(HardCriterion::YesNo(YesNo::No)),
        }
    }

    pub fn from_yes_no(value: YesNo) -> Self {
        match value {
            YesNo::Yes => BooleanSelection::Yes,
            YesNo::No => BooleanSelection::No,
        }
    }
}

impl fmt::Display for BooleanSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanSelection::Unset => f.write_str(""),
            BooleanSelection::Yes => f.write_str("Yes"),
            BooleanSelection::No => f.write_str("No"),
        }
    }
}

/// Parses the form values `""`, `"Yes"` and `"No"`.
impl FromStr for BooleanSelection {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(BooleanSelection::Unset),
            "Yes" => Ok(BooleanSelection::Yes),
            "No" => Ok(BooleanSelection::No),
            other => Err(CriteriaError::UnknownSelection(other.to_string())),
        }
    }
}
