//! loanscope-data — Population table and the selected-client record store.

pub mod frame;
pub mod store;

pub use frame::Frame;
pub use store::{RecordStore, SelectedClient};
