//! Radar aggregation: per-group feature medians on a shared 0-100 axis.
//!
//! Rows are bucketed by predicted outcome, except the applicant's own row
//! which is moved into a group of its own so it does not weigh on the cohort
//! medians. Each feature is rescaled with the min/max of the whole view,
//! so all groups share one axis per feature.

use std::collections::BTreeMap;

use loanscope_common::{LoanscopeError, OutcomeLabel, Result};
use loanscope_data::Frame;
use serde::Serialize;

use crate::normalise::{defined_range, median, rescale, union_preserving_order};

/// Group id of the applicant under review; disjoint from the outcome labels.
pub const APPLICANT_GROUP: OutcomeLabel = 3;

pub const SPECIFIC_TITLE: &str = "Comparaison des profils clients - Sélection spécifique client";
pub const GENERAL_TITLE: &str = "Comparaison des profils clients - Sélection générale";

/// Rescaled medians, one row per group present, groups ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarTable {
    pub groups: Vec<OutcomeLabel>,
    pub features: Vec<String>,
    /// `values[g][f]`: `None` when group `g` has no defined cell for feature `f`
    pub values: Vec<Vec<Option<f64>>>,
}

impl RadarTable {
    /// Rows restricted to `features`, keyed by group position.
    pub fn project(&self, features: &[String]) -> Result<BTreeMap<usize, Vec<Option<f64>>>> {
        let cols = features
            .iter()
            .map(|name| {
                self.features
                    .iter()
                    .position(|f| f == name)
                    .ok_or_else(|| LoanscopeError::FeatureNotFound(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(self
            .values
            .iter()
            .enumerate()
            .map(|(g, row)| (g, cols.iter().map(|&c| row[c]).collect()))
            .collect())
    }
}

/// Group medians of `features`, rescaled onto [0, 100].
pub fn aggregate(
    view: &Frame,
    predicted: &[OutcomeLabel],
    applicant_row: usize,
    features: &[String],
) -> Result<RadarTable> {
    if predicted.len() != view.len() {
        return Err(LoanscopeError::Config(format!(
            "{} predicted labels for {} rows",
            predicted.len(),
            view.len()
        )));
    }
    if applicant_row >= view.len() {
        return Err(LoanscopeError::Config(format!(
            "applicant row {} outside view of {} rows",
            applicant_row,
            view.len()
        )));
    }

    let mut groups_of_rows = predicted.to_vec();
    groups_of_rows[applicant_row] = APPLICANT_GROUP;

    let mut groups: Vec<OutcomeLabel> = groups_of_rows.clone();
    groups.sort_unstable();
    groups.dedup();

    let mut values = vec![Vec::with_capacity(features.len()); groups.len()];
    for name in features {
        let column = view.column(name)?;
        let range = defined_range(column);

        for (g, &group) in groups.iter().enumerate() {
            let members: Vec<f64> = column
                .iter()
                .zip(&groups_of_rows)
                .filter(|&(_, &row_group)| row_group == group)
                .filter_map(|(cell, _)| *cell)
                .collect();

            let scaled = match (median(members), range) {
                (Some(m), Some((lo, hi))) => Some(rescale(m, lo, hi)),
                _ => None,
            };
            values[g].push(scaled);
        }
    }

    Ok(RadarTable { groups, features: features.to_vec(), values })
}

/// JSON envelope served by `GET /API/radar/`.
#[derive(Debug, Clone, Serialize)]
pub struct RadarPayload {
    pub status: &'static str,
    pub data_1: BTreeMap<usize, Vec<Option<f64>>>,
    pub name_1: Vec<String>,
    pub titre_1: &'static str,
    pub data_2: BTreeMap<usize, Vec<Option<f64>>>,
    pub name_2: Vec<String>,
    pub titre_2: &'static str,
    /// Group id behind each row position of `data_1` / `data_2`
    pub groups: Vec<OutcomeLabel>,
}

/// Aggregate over the union of both lists, then split into the two charts.
pub fn build_payload(
    view: &Frame,
    predicted: &[OutcomeLabel],
    applicant_row: usize,
    specific: &[String],
    general: &[String],
) -> Result<RadarPayload> {
    let features = union_preserving_order([specific, general]);
    let table = aggregate(view, predicted, applicant_row, &features)?;

    Ok(RadarPayload {
        status: "ok",
        data_1: table.project(specific)?,
        name_1: specific.to_vec(),
        titre_1: SPECIFIC_TITLE,
        data_2: table.project(general)?,
        name_2: general.to_vec(),
        titre_2: GENERAL_TITLE,
        groups: table.groups,
    })
}
