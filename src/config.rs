//! Layout options and the per-pass parameters derived from them.

use crate::error::{LayoutError, Result};

/// Default maximum row height in pixels.
pub const DEFAULT_MAX_HEIGHT: f64 = 9999.0;

/// Containers narrower than this cancel the layout.
pub const DEFAULT_MIN_CONTAINER_WIDTH: f64 = 700.0;

/// Default soft cap on the ratio sum of a row.
pub const DEFAULT_MAX_RATIO_SUM: f64 = 10.0;

/// Rounding remainders smaller than this are folded into the last item of a row.
pub const DEFAULT_SNAP_REMAINDER_PX: u32 = 5;

/// What to do with items whose ratio cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatioPolicy {
    /// Leave the item out of the layout and report it as skipped.
    #[default]
    Skip,
    /// Fail the whole pass with `LayoutError::UndefinedRatio`.
    Strict,
}

/// User-facing layout configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GriddleOptions {
    /// Whether debounced resize notifications trigger a new pass (default: true)
    pub is_resizable: bool,
    /// Rows shorter than this force a break (default: 0)
    pub min_height: f64,
    /// Upper bound on row height; taller rows are clamped (default: 9999)
    pub max_height: f64,
    /// Use this width instead of measuring the container (default: None)
    pub parent_width: Option<f64>,
    /// Containers narrower than this cancel the layout (default: 700)
    pub min_container_width: f64,
    /// Soft cap on a row's ratio sum before a break is forced (default: 10)
    pub max_ratio_sum: f64,
    /// Spacing between adjacent items in pixels (default: 0)
    pub gutter: f64,
    /// Report per-item scale relative to intrinsic width (default: false)
    pub expose_scaling: bool,
    pub ratio_policy: RatioPolicy,
    /// Largest row-fill remainder absorbed by a row's last item; 0 disables (default: 5)
    pub snap_remainder_px: u32,
}

impl Default for GriddleOptions {
    fn default() -> Self {
        Self {
            is_resizable: true,
            min_height: 0.0,
            max_height: DEFAULT_MAX_HEIGHT,
            parent_width: None,
            min_container_width: DEFAULT_MIN_CONTAINER_WIDTH,
            max_ratio_sum: DEFAULT_MAX_RATIO_SUM,
            gutter: 0.0,
            expose_scaling: false,
            ratio_policy: RatioPolicy::Skip,
            snap_remainder_px: DEFAULT_SNAP_REMAINDER_PX,
        }
    }
}

impl GriddleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resizable(mut self, enabled: bool) -> Self {
        self.is_resizable = enabled;
        self
    }

    pub fn min_height(mut self, px: f64) -> Self {
        self.min_height = px;
        self
    }

    pub fn max_height(mut self, px: f64) -> Self {
        self.max_height = px;
        self
    }

    pub fn parent_width(mut self, px: f64) -> Self {
        self.parent_width = Some(px);
        self
    }

    pub fn min_container_width(mut self, px: f64) -> Self {
        self.min_container_width = px;
        self
    }

    pub fn max_ratio_sum(mut self, sum: f64) -> Self {
        self.max_ratio_sum = sum;
        self
    }

    pub fn gutter(mut self, px: f64) -> Self {
        self.gutter = px;
        self
    }

    pub fn expose_scaling(mut self, enabled: bool) -> Self {
        self.expose_scaling = enabled;
        self
    }

    pub fn ratio_policy(mut self, policy: RatioPolicy) -> Self {
        self.ratio_policy = policy;
        self
    }

    pub fn snap_remainder_px(mut self, px: u32) -> Self {
        self.snap_remainder_px = px;
        self
    }

    /// Parameters for a pass over a container of the given measured width.
    ///
    /// A forced `parent_width` takes precedence over the measurement.
    pub fn params_for(&self, measured_width: f64) -> LayoutParams {
        LayoutParams {
            container_width: self.parent_width.unwrap_or(measured_width),
            min_height: self.min_height,
            max_height: self.max_height,
            min_container_width: self.min_container_width,
            max_ratio_sum: self.max_ratio_sum,
            gutter: self.gutter,
            expose_scaling: self.expose_scaling,
            ratio_policy: self.ratio_policy,
            snap_remainder_px: self.snap_remainder_px,
        }
    }
}

/// Inputs to a single layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub container_width: f64,
    pub min_height: f64,
    pub max_height: f64,
    pub min_container_width: f64,
    pub max_ratio_sum: f64,
    pub gutter: f64,
    pub expose_scaling: bool,
    pub ratio_policy: RatioPolicy,
    pub snap_remainder_px: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        GriddleOptions::default().params_for(0.0)
    }
}

impl LayoutParams {
    #[cfg(test)]
    pub(crate) fn with_width(container_width: f64) -> Self {
        Self {
            container_width,
            ..Self::default()
        }
    }

    /// Checks everything except the positivity of the container width, which
    /// the cancellation guard and the partitioner handle.
    pub fn validate(&self) -> Result<()> {
        if !self.container_width.is_finite() || self.container_width < 0.0 {
            return Err(LayoutError::invalid(format!(
                "container width must be a finite non-negative number, got {}",
                self.container_width
            )));
        }
        if self.min_height.is_nan() || self.min_height < 0.0 {
            return Err(LayoutError::invalid(format!(
                "min height must be non-negative, got {}",
                self.min_height
            )));
        }
        // Infinity is accepted as "no maximum".
        if self.max_height.is_nan() || self.max_height < 0.0 {
            return Err(LayoutError::invalid(format!(
                "max height must be non-negative, got {}",
                self.max_height
            )));
        }
        if self.min_container_width.is_nan() || self.min_container_width < 0.0 {
            return Err(LayoutError::invalid(format!(
                "min container width must be non-negative, got {}",
                self.min_container_width
            )));
        }
        if self.max_ratio_sum.is_nan() || self.max_ratio_sum <= 0.0 {
            return Err(LayoutError::invalid(format!(
                "max ratio sum must be positive, got {}",
                self.max_ratio_sum
            )));
        }
        if !self.gutter.is_finite() || self.gutter < 0.0 {
            return Err(LayoutError::invalid(format!(
                "gutter must be a finite non-negative number, got {}",
                self.gutter
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = GriddleOptions::default();
        assert!(options.is_resizable);
        assert_eq!(options.min_height, 0.0);
        assert_eq!(options.max_height, 9999.0);
        assert_eq!(options.min_container_width, 700.0);
        assert_eq!(options.max_ratio_sum, 10.0);
        assert_eq!(options.gutter, 0.0);
        assert!(!options.expose_scaling);
        assert_eq!(options.ratio_policy, RatioPolicy::Skip);
        assert!(options.parent_width.is_none());
    }

    #[test]
    fn test_parent_width_overrides_measurement() {
        let options = GriddleOptions::new().parent_width(1200.0);
        assert_eq!(options.params_for(800.0).container_width, 1200.0);

        let options = GriddleOptions::new();
        assert_eq!(options.params_for(800.0).container_width, 800.0);
    }

    #[test]
    fn test_builder_sets_fields() {
        let params = GriddleOptions::new()
            .min_height(100.0)
            .max_height(400.0)
            .gutter(4.0)
            .max_ratio_sum(3.5)
            .expose_scaling(true)
            .ratio_policy(RatioPolicy::Strict)
            .params_for(1000.0);

        assert_eq!(params.min_height, 100.0);
        assert_eq!(params.max_height, 400.0);
        assert_eq!(params.gutter, 4.0);
        assert_eq!(params.max_ratio_sum, 3.5);
        assert!(params.expose_scaling);
        assert_eq!(params.ratio_policy, RatioPolicy::Strict);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(LayoutParams::with_width(900.0).validate().is_ok());
        assert!(LayoutParams::with_width(f64::NAN).validate().is_err());
        assert!(LayoutParams::with_width(-1.0).validate().is_err());

        let params = LayoutParams {
            gutter: -2.0,
            ..LayoutParams::with_width(900.0)
        };
        assert!(matches!(
            params.validate(),
            Err(LayoutError::InvalidParams { .. })
        ));

        let params = LayoutParams {
            max_ratio_sum: 0.0,
            ..LayoutParams::with_width(900.0)
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_bounds() {
        for params in [
            LayoutParams {
                min_height: f64::NAN,
                ..LayoutParams::with_width(900.0)
            },
            LayoutParams {
                max_height: f64::NAN,
                ..LayoutParams::with_width(900.0)
            },
            LayoutParams {
                min_container_width: f64::NAN,
                ..LayoutParams::with_width(900.0)
            },
            LayoutParams {
                max_ratio_sum: f64::NAN,
                ..LayoutParams::with_width(900.0)
            },
        ] {
            assert!(matches!(
                params.validate(),
                Err(LayoutError::InvalidParams { .. })
            ));
        }
    }

    #[test]
    fn test_validate_accepts_unbounded_max_height() {
        let params = LayoutParams {
            max_height: f64::INFINITY,
            ..LayoutParams::with_width(900.0)
        };
        assert!(params.validate().is_ok());
    }
}
