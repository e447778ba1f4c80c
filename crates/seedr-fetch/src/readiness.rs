//! Folder readiness: whether Seedr has finished assembling a cloud folder
//! enough to start copying it locally.

use seedr_core::CloudInventorySnapshot;
use seedr_fsops::meets_size_threshold;

/// A folder is ready when its listing shows at least one child and the sum
/// of the immediate children's sizes meets the completeness threshold
/// against the declared folder size. A declared size of zero waives the
/// byte check (only the child-count requirement applies).
#[must_use]
pub fn is_folder_ready(children: &CloudInventorySnapshot, declared_size: u64) -> bool {
    children.child_count() >= 1 && meets_size_threshold(children.children_bytes(), declared_size)
}
