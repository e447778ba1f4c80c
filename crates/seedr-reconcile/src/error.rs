//! Re-exports the shared reconciliation error type. Kept as its own module
//! so call sites read `crate::error::ReconcileResult` the way every other
//! crate in this workspace names its error module.

pub use seedr_core::{ReconcileError, ReconcileResult};
