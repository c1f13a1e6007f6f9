//! HTTP handlers for all web routes.

pub mod api;
pub mod dashboard;
pub mod home;

use loanscope_common::ApiError;

/// Parse a file number typed or selected by the officer.
pub(crate) fn parse_applicant_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid file number: {:?}", raw)))
}
