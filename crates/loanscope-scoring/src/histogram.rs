//! Histogram projection: one raw feature split by predicted outcome.

use loanscope_common::entities::{days_to_years, OUTCOME_DEFAULTS, OUTCOME_REPAYS};
use loanscope_common::{LoanscopeError, OutcomeLabel, Result};
use loanscope_data::Frame;
use serde::Serialize;

/// Columns stored in days before the application, shown in years.
pub const DAY_COLUMNS: [&str; 3] = ["DAYS_BIRTH", "DAYS_EMPLOYED", "DAYS_ID_PUBLISH"];

/// Appended to the title when the applicant has no value for the feature.
pub const UNDEFINED_SUFFIX: &str = "- Valeur client non définie";

/// Features the dashboard knows how to title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistogramFeature {
    DaysBirth,
    ExtSource1,
    ExtSource2,
    ExtSource3,
    DaysEmployed,
    AmtIncomeTotal,
    DaysIdPublish,
    DaysLastPhoneChange,
    AmtGoodsPrice,
}

impl HistogramFeature {
    pub const ALL: [HistogramFeature; 9] = [
        HistogramFeature::DaysBirth,
        HistogramFeature::ExtSource1,
        HistogramFeature::ExtSource2,
        HistogramFeature::ExtSource3,
        HistogramFeature::DaysEmployed,
        HistogramFeature::AmtIncomeTotal,
        HistogramFeature::DaysIdPublish,
        HistogramFeature::DaysLastPhoneChange,
        HistogramFeature::AmtGoodsPrice,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == name)
    }

    pub fn column(&self) -> &'static str {
        match self {
            HistogramFeature::DaysBirth           => "DAYS_BIRTH",
            HistogramFeature::ExtSource1          => "EXT_SOURCE_1",
            HistogramFeature::ExtSource2          => "EXT_SOURCE_2",
            HistogramFeature::ExtSource3          => "EXT_SOURCE_3",
            HistogramFeature::DaysEmployed        => "DAYS_EMPLOYED",
            HistogramFeature::AmtIncomeTotal      => "AMT_INCOME_TOTAL",
            HistogramFeature::DaysIdPublish       => "DAYS_ID_PUBLISH",
            HistogramFeature::DaysLastPhoneChange => "DAYS_LAST_PHONE_CHANGE",
            HistogramFeature::AmtGoodsPrice       => "AMT_GOODS_PRICE",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            HistogramFeature::DaysBirth           => "Age",
            HistogramFeature::ExtSource1          => "Score 1",
            HistogramFeature::ExtSource2          => "Score 2",
            HistogramFeature::ExtSource3          => "Score 3",
            HistogramFeature::DaysEmployed        => "Ancienneté emploi",
            HistogramFeature::AmtIncomeTotal      => "Revenu annuel",
            HistogramFeature::DaysIdPublish       => "Renouvellement carte d'identité",
            HistogramFeature::DaysLastPhoneChange => "Renouvellement du téléphone",
            HistogramFeature::AmtGoodsPrice       => "Montant de l'achat envisagé",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            HistogramFeature::DaysBirth
            | HistogramFeature::DaysEmployed
            | HistogramFeature::DaysIdPublish
            | HistogramFeature::DaysLastPhoneChange => " ans",
            HistogramFeature::AmtIncomeTotal | HistogramFeature::AmtGoodsPrice => " $",
            HistogramFeature::ExtSource1
            | HistogramFeature::ExtSource2
            | HistogramFeature::ExtSource3 => "",
        }
    }
}

/// Title and unit for any column name; unknown columns get neither.
pub fn title_and_unit(name: &str) -> (&'static str, &'static str) {
    match HistogramFeature::from_name(name) {
        Some(feature) => (feature.title(), feature.unit()),
        None => ("", ""),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramDataset {
    pub feature: String,
    pub title: String,
    pub unit: String,
    /// Values of applicants predicted to repay
    pub approved: Vec<f64>,
    /// Values of applicants predicted to default
    pub refused: Vec<f64>,
    /// Applicant's value, truncated; 0 when undefined
    pub client_value: i64,
    pub client_defined: bool,
    /// e.g. "40 ans"
    pub info_client: String,
}

fn convert(column: &str, value: f64) -> f64 {
    if DAY_COLUMNS.contains(&column) {
        days_to_years(value)
    } else {
        value
    }
}

/// Split `feature` by predicted label and pick out the applicant's value.
pub fn project(
    population: &Frame,
    predicted: &[OutcomeLabel],
    applicant_row: usize,
    feature: &str,
) -> Result<HistogramDataset> {
    let column = population.column(feature)?;
    if predicted.len() != column.len() {
        return Err(LoanscopeError::Config(format!(
            "{} predicted labels for {} rows",
            predicted.len(),
            column.len()
        )));
    }

    let class_values = |label: OutcomeLabel| -> Vec<f64> {
        column
            .iter()
            .zip(predicted)
            .filter(|&(_, &p)| p == label)
            .filter_map(|(&cell, _)| cell.map(|v| convert(feature, v)))
            .collect()
    };
    let approved = class_values(OUTCOME_REPAYS);
    let refused = class_values(OUTCOME_DEFAULTS);

    let (title, unit) = title_and_unit(feature);
    let mut title = title.to_string();

    let client = column
        .get(applicant_row)
        .copied()
        .flatten()
        .map(|v| convert(feature, v));
    let client_value = match client {
        Some(v) => v.trunc() as i64,
        None => {
            title.push_str(UNDEFINED_SUFFIX);
            0
        }
    };

    Ok(HistogramDataset {
        feature: feature.to_string(),
        title,
        unit: unit.to_string(),
        approved,
        refused,
        client_value,
        client_defined: client.is_some(),
        info_client: format!("{}{}", client_value, unit),
    })
}
