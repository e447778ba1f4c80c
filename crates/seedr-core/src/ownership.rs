//! Three-valued results for the ownership registry capability.
//!
//! The registry never throws out of a caller-facing operation: connection
//! and command failures collapse into `Unknown`, which callers must treat
//! as "do not delete" (fail-safe for shared cloud state).

/// Result of a membership check (`IsOwnedByMe`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipCheck {
    /// This instance is a member of the ownership set.
    Owned,
    /// This instance is not a member (another instance, or nobody, owns it).
    NotOwned,
    /// The registry is unavailable or not configured.
    Unknown,
}

impl OwnershipCheck {
    /// Whether the caller may proceed as if it owns the item.
    #[must_use]
    pub const fn is_owned(self) -> bool {
        matches!(self, Self::Owned)
    }
}

/// Result of releasing ownership (`ReleaseOwnership`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// This instance was the last owner; the caller may now delete cloud
    /// state.
    WasLastOwner,
    /// Other instances still own the item; cloud state must be kept.
    OthersRemain,
    /// The registry is unavailable or not configured; cloud deletion must
    /// be skipped.
    Unknown,
}

impl ReleaseOutcome {
    /// Whether cloud deletion may proceed.
    #[must_use]
    pub const fn permits_cloud_delete(self) -> bool {
        matches!(self, Self::WasLastOwner)
    }
}
