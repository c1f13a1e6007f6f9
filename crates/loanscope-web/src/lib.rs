//! loanscope-web — Web dashboard for LoanScope
//! Serves the loan officer's screens:
//!   - Client selection
//!   - Score and decision
//!   - Per-client explanation
//!   - Radar profile comparison
//!   - Feature histograms
//! plus the JSON score and radar endpoints.

pub mod config;
pub mod handlers;
pub mod router;
pub mod session;
pub mod state;
pub mod templates;
