/// One tile to lay out: an image (or anything else) with an intrinsic aspect ratio.
///
/// The ratio is either given up front or derived from the intrinsic size the
/// first time it is resolved, after which it stays cached on the item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    ratio: Option<f64>,
    pub intrinsic_width: Option<f64>,
    pub intrinsic_height: Option<f64>,
}

impl Item {
    /// Create an item with an explicit width/height ratio.
    pub fn with_ratio(ratio: f64) -> Self {
        Self {
            ratio: Some(ratio),
            intrinsic_width: None,
            intrinsic_height: None,
        }
    }

    /// Create an item from its intrinsic pixel size; the ratio is derived lazily.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            ratio: None,
            intrinsic_width: Some(width),
            intrinsic_height: Some(height),
        }
    }

    /// Attach an intrinsic width to an explicit-ratio item, used for scale reporting.
    pub fn with_intrinsic_width(mut self, width: f64) -> Self {
        self.intrinsic_width = Some(width);
        self
    }

    /// The explicit or previously resolved ratio, if any.
    pub fn ratio(&self) -> Option<f64> {
        self.ratio
    }

    pub(crate) fn cache_ratio(&mut self, ratio: f64) {
        self.ratio = Some(ratio);
    }
}
