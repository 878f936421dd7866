//! Aspect ratio resolution for layout items.

use tracing::trace;

use crate::error::{LayoutError, Result};
use crate::models::Item;

fn usable(ratio: f64) -> bool {
    ratio.is_finite() && ratio > 0.0
}

/// Resolves the ratio of a single item, caching a derived value on the item.
///
/// An explicit ratio wins. Otherwise the ratio is `intrinsic_width / intrinsic_height`,
/// which requires both dimensions to be present and positive.
pub fn resolve_ratio(item: &mut Item, index: usize) -> Result<f64> {
    if let Some(ratio) = item.ratio() {
        return if usable(ratio) {
            Ok(ratio)
        } else {
            Err(LayoutError::UndefinedRatio { index })
        };
    }

    match (item.intrinsic_width, item.intrinsic_height) {
        (Some(width), Some(height)) if height > 0.0 => {
            let ratio = width / height;
            if !usable(ratio) {
                return Err(LayoutError::UndefinedRatio { index });
            }
            trace!(index, width, height, ratio, "Derived item ratio");
            item.cache_ratio(ratio);
            Ok(ratio)
        }
        _ => Err(LayoutError::UndefinedRatio { index }),
    }
}

/// Resolves every item's ratio in place.
///
/// Returns the indices of items whose ratio is undefined; those items are left untouched.
pub fn resolve_ratios(items: &mut [Item]) -> Vec<usize> {
    items
        .iter_mut()
        .enumerate()
        .filter_map(|(index, item)| resolve_ratio(item, index).err().map(|_| index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_ratio_wins() {
        let mut item = Item::with_ratio(1.5);
        item.intrinsic_width = Some(100.0);
        item.intrinsic_height = Some(100.0);
        assert_eq!(resolve_ratio(&mut item, 0), Ok(1.5));
    }

    #[test]
    fn test_derived_ratio_is_cached() {
        let mut item = Item::from_size(200.0, 100.0);
        assert_eq!(item.ratio(), None);
        assert_eq!(resolve_ratio(&mut item, 0), Ok(2.0));
        assert_eq!(item.ratio(), Some(2.0));

        // Later passes reuse the cached ratio even without a size.
        item.intrinsic_width = None;
        item.intrinsic_height = None;
        assert_eq!(resolve_ratio(&mut item, 0), Ok(2.0));
    }

    #[test]
    fn test_zero_height_is_undefined() {
        let mut item = Item::from_size(100.0, 0.0);
        assert_eq!(
            resolve_ratio(&mut item, 3),
            Err(LayoutError::UndefinedRatio { index: 3 })
        );
        assert_eq!(item.ratio(), None);
    }

    #[test]
    fn test_missing_and_negative_sizes_are_undefined() {
        let mut missing = Item::default();
        assert!(resolve_ratio(&mut missing, 0).is_err());

        let mut negative = Item::from_size(100.0, -50.0);
        assert!(resolve_ratio(&mut negative, 0).is_err());

        let mut zero_width = Item::from_size(0.0, 50.0);
        assert!(resolve_ratio(&mut zero_width, 0).is_err());
    }

    #[test]
    fn test_bad_explicit_ratio_is_undefined() {
        let mut nan = Item::with_ratio(f64::NAN);
        assert!(resolve_ratio(&mut nan, 0).is_err());

        let mut inf = Item::with_ratio(f64::INFINITY);
        assert!(resolve_ratio(&mut inf, 0).is_err());

        let mut zero = Item::with_ratio(0.0);
        assert!(resolve_ratio(&mut zero, 0).is_err());
    }

    #[test]
    fn test_resolve_ratios_reports_unresolved() {
        let mut items = vec![
            Item::from_size(300.0, 200.0),
            Item::from_size(100.0, 0.0),
            Item::with_ratio(2.0),
            Item::default(),
        ];

        let unresolved = resolve_ratios(&mut items);
        assert_eq!(unresolved, vec![1, 3]);
        assert_eq!(items[0].ratio(), Some(1.5));
        assert_eq!(items[2].ratio(), Some(2.0));
    }
}
