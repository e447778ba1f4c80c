//! Used when multi-tenancy is disabled: claims are no-ops, membership and
//! release always report `Unknown` (never grants permission to delete
//! shared cloud state).

use async_trait::async_trait;
use seedr_core::{OwnershipCheck, OwnershipRegistry, ReleaseOutcome};

/// `OwnershipRegistry` that performs no coordination at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOwnershipRegistry;

#[async_trait]
impl OwnershipRegistry for NoopOwnershipRegistry {
    async fn claim_ownership(&self, _info_hash: &str) {}

    async fn is_owned_by_me(&self, _info_hash: &str) -> OwnershipCheck {
        OwnershipCheck::Unknown
    }

    async fn release_ownership(&self, _info_hash: &str) -> ReleaseOutcome {
        ReleaseOutcome::Unknown
    }

    async fn test_connection(&self) -> Option<String> {
        None
    }
}
