//! Justified-row layout: ratio resolution, row partitioning and sizing.

pub mod partition;
pub mod ratio;
pub mod sizer;

pub use partition::partition;
pub use ratio::{resolve_ratio, resolve_ratios};
pub use sizer::size;

use tracing::{debug, warn};

use crate::config::{LayoutParams, RatioPolicy};
use crate::error::{LayoutError, Result};
use crate::models::{Item, LayoutOutcome, RowMember};

/// Runs one complete layout pass.
///
/// # Algorithm
/// 1. Validate parameters.
/// 2. Cancel when the container is narrower than `min_container_width`.
/// 3. Resolve item ratios, applying the configured [`RatioPolicy`].
/// 4. Partition the resolvable items into rows, then size each row.
///
/// Ratios derived in step 3 stay cached on the items for later passes.
pub fn layout(items: &mut [Item], params: &LayoutParams) -> Result<LayoutOutcome> {
    params.validate()?;

    if params.container_width < params.min_container_width {
        debug!(
            container_width = params.container_width,
            min_container_width = params.min_container_width,
            "Container too narrow, layout cancelled"
        );
        return Ok(LayoutOutcome::cancelled(params.container_width));
    }

    partition::ensure_positive_width(params)?;

    let skipped = resolve_ratios(items);
    if let Some(&index) = skipped.first() {
        match params.ratio_policy {
            RatioPolicy::Strict => return Err(LayoutError::UndefinedRatio { index }),
            RatioPolicy::Skip => {
                warn!(count = skipped.len(), ?skipped, "Skipping items without a usable ratio");
            }
        }
    }

    let members = items
        .iter()
        .enumerate()
        .filter_map(|(item_index, item)| {
            item.ratio()
                .filter(|r| r.is_finite() && *r > 0.0)
                .map(|ratio| RowMember {
                    item_index,
                    ratio,
                    intrinsic_width: item.intrinsic_width,
                })
        });

    let rows = partition::partition_members(members, params);
    let results = size(&rows, params);

    debug!(
        container_width = params.container_width,
        items = items.len(),
        rows = rows.len(),
        "Layout pass complete"
    );

    Ok(LayoutOutcome {
        cancelled: false,
        container_width: params.container_width,
        results,
        skipped,
    })
}
