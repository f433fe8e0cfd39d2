//! tally-store: the CSV ledger file (ensure, load, append, rewrite)

pub mod error;
pub mod store;

pub use error::{Result, StoreError};
pub use store::LedgerStore;
