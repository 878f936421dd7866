//! Row partitioning: splits the item sequence into justified rows.

use tracing::trace;

use crate::config::LayoutParams;
use crate::error::{LayoutError, Result};
use crate::models::{Item, Row, RowMember};

/// Running state of the row currently being filled.
#[derive(Debug, Default)]
struct RowAccumulator {
    current: Vec<RowMember>,
    ratio_sum: f64,
    rows: Vec<Row>,
}

impl RowAccumulator {
    fn push(&mut self, member: RowMember) {
        self.ratio_sum += member.ratio;
        self.current.push(member);
    }

    fn close(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let index = self.rows.len();
        trace!(
            row = index,
            items = self.current.len(),
            ratio_sum = self.ratio_sum,
            "Closed row"
        );
        self.rows.push(Row {
            index,
            members: std::mem::take(&mut self.current),
            ratio_sum: self.ratio_sum,
        });
        self.ratio_sum = 0.0;
    }

    fn finish(mut self) -> Vec<Row> {
        self.close();
        self.rows
    }
}

/// Whether a row whose ratio sum would become `projected` should be closed
/// before the item that brings it there.
fn should_break(projected: f64, params: &LayoutParams) -> bool {
    let height = params.container_width / projected;
    if height < params.min_height {
        return true;
    }
    projected > params.max_ratio_sum && height < params.max_height
}

pub(crate) fn ensure_positive_width(params: &LayoutParams) -> Result<()> {
    if params.container_width > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::invalid(format!(
            "container width must be positive, got {}",
            params.container_width
        )))
    }
}

/// Partitions items into rows.
///
/// Every item must already carry a resolved ratio (see [`super::resolve_ratios`]).
pub fn partition(items: &[Item], params: &LayoutParams) -> Result<Vec<Row>> {
    ensure_positive_width(params)?;

    let members = items
        .iter()
        .enumerate()
        .map(|(index, item)| match item.ratio() {
            Some(ratio) if ratio.is_finite() && ratio > 0.0 => Ok(RowMember {
                item_index: index,
                ratio,
                intrinsic_width: item.intrinsic_width,
            }),
            _ => Err(LayoutError::UndefinedRatio { index }),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(partition_members(members, params))
}

/// Single ordered walk over the members.
///
/// The break test looks ahead: it uses the ratio sum the row would have with
/// the next member added, and if the test fires that member opens a new row.
/// A row is never closed before it holds at least one member.
pub(crate) fn partition_members(
    members: impl IntoIterator<Item = RowMember>,
    params: &LayoutParams,
) -> Vec<Row> {
    let mut acc = RowAccumulator::default();

    for member in members {
        let projected = acc.ratio_sum + member.ratio;
        if !acc.current.is_empty() && should_break(projected, params) {
            acc.close();
        }
        acc.push(member);
    }

    acc.finish()
}
