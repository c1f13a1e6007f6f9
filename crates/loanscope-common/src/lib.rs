//! loanscope-common — Shared types and errors used across all LoanScope crates.

pub mod error;
pub mod entities;

pub use entities::{Decision, Gender, OutcomeLabel};
pub use error::{ApiError, LoanscopeError, Result};
