//! A grab-history source that remembers nothing.
//!
//! The real grab-history service lives in the surrounding queue/import
//! pipeline, out of scope for this workspace. This is only a placeholder
//! for contexts that have no such pipeline wired up yet: the operator CLI,
//! and tests that don't care about cache-recovery behaviour. Recovery and
//! rescue simply find nothing and the reconciler proceeds as if the history
//! were empty.

use async_trait::async_trait;
use seedr_core::{GrabHistorySource, GrabRecord};

/// [`GrabHistorySource`] with no historical grabs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGrabHistorySource;

#[async_trait]
impl GrabHistorySource for NullGrabHistorySource {
    async fn grabs(&self) -> Vec<GrabRecord> {
        Vec::new()
    }
}
