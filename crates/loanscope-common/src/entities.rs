/// Domain types shared by the data, scoring and web crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Applicant
// ---------------------------------------------------------------------------

/// Column holding the applicant identifier in the population file.
pub const ID_COLUMN: &str = "SK_ID_CURR";

/// Days-before-application of the applicant's birth (negative).
pub const BIRTH_COLUMN: &str = "DAYS_BIRTH";

/// Binary gender code, 0 = male.
pub const GENDER_COLUMN: &str = "CODE_GENDER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Homme")]
    Male,
    #[serde(rename = "Femme")]
    Female,
}

impl Gender {
    /// 0 is male, any other code is female.
    pub fn from_code(code: f64) -> Self {
        if code == 0.0 {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male   => "Homme",
            Gender::Female => "Femme",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Homme" | "Male"   => Ok(Gender::Male),
            "Femme" | "Female" => Ok(Gender::Female),
            other => Err(format!("unknown gender label: {}", other)),
        }
    }
}

/// Years elapsed for a days-before-reference value (stored negative).
pub fn days_to_years(days: f64) -> f64 {
    days / -365.0
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Loan decision shown to the officer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Marginal,
    Refused,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Approved => "Accordé",
            Decision::Marginal => "Défavorable - Dossier à revalider",
            Decision::Refused  => "Refusé",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Predicted class from the classifier: 0 repays, 1 defaults.
pub type OutcomeLabel = u8;

pub const OUTCOME_REPAYS: OutcomeLabel = 0;
pub const OUTCOME_DEFAULTS: OutcomeLabel = 1;
