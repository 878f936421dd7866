//! Row sizing: turns partitioned rows into integral pixel boxes.

use tracing::{debug, trace};

use crate::config::LayoutParams;
use crate::models::{LayoutResult, Row};

/// Sizes every row. Pure: the rows are only read.
pub fn size(rows: &[Row], params: &LayoutParams) -> Vec<LayoutResult> {
    let mut results = Vec::with_capacity(rows.iter().map(Row::len).sum());
    for row in rows {
        size_row(row, params, &mut results);
    }
    results
}

fn scale_of(width: u32, intrinsic_width: Option<f64>) -> Option<f64> {
    intrinsic_width
        .filter(|w| *w > 0.0)
        .map(|w| ((width as f64 / w) * 100.0).round() / 100.0)
}

/// Converts a floored pixel value to `u32`, saturating at `u32::MAX`.
fn to_px(value: f64) -> u32 {
    value.clamp(0.0, u32::MAX as f64) as u32
}

fn size_row(row: &Row, params: &LayoutParams, out: &mut Vec<LayoutResult>) {
    let count = row.len();
    if count == 0 {
        return;
    }

    let gutter = params.gutter.round() as u32;
    let gutters = gutter as f64 * (count - 1) as f64;
    let row_width = (params.container_width - gutters).max(0.0);
    let ratio_sum = row.ratio_sum;

    let natural_height = (row_width / ratio_sum).floor();
    let clamped = natural_height > params.max_height;
    let height = if clamped {
        params.max_height.floor()
    } else {
        natural_height
    };

    if clamped {
        debug!(
            row = row.index,
            natural_height, height, "Row height clamped to max height"
        );
    }

    let first = out.len();
    for (position, member) in row.members.iter().enumerate() {
        let width = if clamped {
            (height * member.ratio).floor()
        } else {
            (row_width * member.ratio / ratio_sum).floor()
        };
        let is_last = position + 1 == count;
        out.push(LayoutResult {
            item_index: member.item_index,
            row_index: row.index,
            width: to_px(width),
            height: to_px(height),
            margin_right: if is_last { 0 } else { gutter },
            is_first_in_row: position == 0,
            is_last_in_row: is_last,
            scale: None,
        });
    }

    if !clamped && params.snap_remainder_px > 0 {
        let row_results = &mut out[first..];
        let filled: u64 = row_results.iter().map(|r| r.width as u64).sum();
        let target = to_px(row_width.floor()) as u64;
        let remainder = target.saturating_sub(filled);
        if remainder > 0 && remainder < params.snap_remainder_px as u64 {
            if let Some(last) = row_results.last_mut() {
                last.width = last.width.saturating_add(remainder as u32);
            }
        }
    }

    if params.expose_scaling {
        for (result, member) in out[first..].iter_mut().zip(&row.members) {
            result.scale = scale_of(result.width, member.intrinsic_width);
        }
    }

    trace!(
        row = row.index,
        items = count,
        height,
        clamped,
        "Sized row"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RowMember;

    fn row(index: usize, ratios: &[f64]) -> Row {
        Row::new(
            index,
            ratios
                .iter()
                .enumerate()
                .map(|(i, &ratio)| RowMember {
                    item_index: i,
                    ratio,
                    intrinsic_width: None,
                })
                .collect(),
        )
    }

    fn params(width: f64) -> LayoutParams {
        LayoutParams {
            container_width: width,
            max_height: 99_999.0,
            ..LayoutParams::default()
        }
    }

    #[test]
    fn test_exact_fill_without_gutter() {
        let results = size(&[row(0, &[1.5, 1.0, 2.0])], &params(900.0));
        let widths: Vec<u32> = results.iter().map(|r| r.width).collect();
        assert_eq!(widths, vec![300, 200, 400]);
        assert!(results.iter().all(|r| r.height == 200));
        assert!(results.iter().all(|r| r.margin_right == 0));
        assert!(results[0].is_first_in_row && !results[0].is_last_in_row);
        assert!(results[2].is_last_in_row && !results[2].is_first_in_row);
    }

    #[test]
    fn test_gutter_and_remainder_snap() {
        let p = LayoutParams {
            gutter: 10.0,
            ..params(900.0)
        };
        let results = size(&[row(0, &[1.5, 1.0, 2.0])], &p);

        // Row width 880: floors give 293 + 195 + 391 = 879, the last item takes the 1px.
        let widths: Vec<u32> = results.iter().map(|r| r.width).collect();
        assert_eq!(widths, vec![293, 195, 392]);
        assert!(results.iter().all(|r| r.height == 195));

        let margins: Vec<u32> = results.iter().map(|r| r.margin_right).collect();
        assert_eq!(margins, vec![10, 10, 0]);

        let total: u32 = results.iter().map(|r| r.width + r.margin_right).sum();
        assert_eq!(total, 900);
    }

    #[test]
    fn test_no_snap_keeps_floor_widths() {
        let p = LayoutParams {
            gutter: 10.0,
            snap_remainder_px: 0,
            ..params(900.0)
        };
        let results = size(&[row(0, &[1.5, 1.0, 2.0])], &p);
        let widths: Vec<u32> = results.iter().map(|r| r.width).collect();
        assert_eq!(widths, vec![293, 195, 391]);
    }

    #[test]
    fn test_remainder_at_or_above_threshold_is_kept() {
        // 1000 / 7 floors to 142 per item, leaving 6px unfilled.
        let results = size(&[row(0, &[1.0; 7])], &params(1000.0));
        assert!(results.iter().all(|r| r.width == 142 && r.height == 142));

        let p = LayoutParams {
            snap_remainder_px: 6,
            ..params(1000.0)
        };
        let results = size(&[row(0, &[1.0; 7])], &p);
        assert!(results.iter().all(|r| r.width == 142));

        let p = LayoutParams {
            snap_remainder_px: 7,
            ..params(1000.0)
        };
        let results = size(&[row(0, &[1.0; 7])], &p);
        assert!(results[..6].iter().all(|r| r.width == 142));
        assert_eq!(results[6].width, 148);
    }

    #[test]
    fn test_clamped_row_is_never_snapped() {
        let p = LayoutParams {
            max_height: 300.0,
            snap_remainder_px: 1000,
            ..params(900.0)
        };
        let results = size(&[row(0, &[1.0, 0.5])], &p);
        let widths: Vec<u32> = results.iter().map(|r| r.width).collect();
        assert_eq!(widths, vec![300, 150]);
    }

    #[test]
    fn test_oversized_container_saturates() {
        let p = LayoutParams {
            max_height: f64::INFINITY,
            ..params(4_294_967_297.0)
        };
        assert!(p.validate().is_ok());

        let results = size(&[row(0, &[1.0])], &p);
        assert_eq!(results[0].width, u32::MAX);
        assert_eq!(results[0].height, u32::MAX);
    }

    #[test]
    fn test_max_height_clamp() {
        let p = LayoutParams {
            max_height: 300.0,
            ..params(900.0)
        };
        let results = size(&[row(0, &[1.0, 0.5])], &p);
        // Natural height 600 exceeds the cap; widths follow the clamped height.
        assert!(results.iter().all(|r| r.height == 300));
        assert_eq!(results[0].width, 300);
        assert_eq!(results[1].width, 150);
    }

    #[test]
    fn test_gutters_wider_than_container() {
        let p = LayoutParams {
            gutter: 500.0,
            ..params(900.0)
        };
        let results = size(&[row(0, &[1.0, 1.0, 1.0])], &p);
        assert!(results.iter().all(|r| r.width == 0 && r.height == 0));
    }

    #[test]
    fn test_scale_exposed() {
        let mut r = row(0, &[1.5, 1.0, 2.0]);
        r.members[0].intrinsic_width = Some(3000.0);
        r.members[1].intrinsic_width = Some(1000.0);
        let p = LayoutParams {
            expose_scaling: true,
            ..params(900.0)
        };

        let results = size(&[r], &p);
        assert_eq!(results[0].scale, Some(0.1));
        assert_eq!(results[1].scale, Some(0.2));
        assert_eq!(results[2].scale, None);
    }

    #[test]
    fn test_scale_hidden_by_default() {
        let mut r = row(0, &[1.0]);
        r.members[0].intrinsic_width = Some(100.0);
        let results = size(&[r], &params(900.0));
        assert_eq!(results[0].scale, None);
    }

    #[test]
    fn test_rows_keep_their_index() {
        let results = size(&[row(0, &[1.0]), row(1, &[2.0, 1.0])], &params(900.0));
        let rows: Vec<usize> = results.iter().map(|r| r.row_index).collect();
        assert_eq!(rows, vec![0, 1, 1]);
        assert!(results[0].is_first_in_row && results[0].is_last_in_row);
    }
}
