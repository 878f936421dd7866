//! Layout lifecycle around the pure layout core.
//!
//! The controller reads items from a [`Surface`], runs a pass, and writes the
//! results back. It owns no timers; pair it with a [`ResizeDebouncer`] to react
//! to container resizes.

pub mod debounce;

pub use debounce::{ResizeDebouncer, DEFAULT_RESIZE_DELAY};

use flume::Receiver;
use tracing::{debug, info, warn};

use crate::config::GriddleOptions;
use crate::error::Result;
use crate::layout;
use crate::models::{Item, LayoutOutcome, LayoutResult};

/// The environment a layout is applied to.
pub trait Surface {
    /// Current width of the container the items are laid out in.
    fn container_width(&self) -> f64;

    /// The items to lay out, in display order, with intrinsic sizes or ratios.
    fn items(&self) -> Vec<Item>;

    /// Size an item according to its layout result.
    fn apply(&mut self, result: &LayoutResult);

    /// Return an item to its natural, unstyled size.
    fn reset(&mut self, item_index: usize);
}

/// Callback invoked with the surface right before or right after a pass.
pub type Hook<S> = Box<dyn FnMut(&S)>;

/// Drives layout passes for one container.
pub struct LayoutController<S: Surface> {
    surface: S,
    options: GriddleOptions,
    items: Vec<Item>,
    before: Option<Hook<S>>,
    end: Option<Hook<S>>,
    last_outcome: Option<LayoutOutcome>,
}

impl<S: Surface> LayoutController<S> {
    /// Create a controller and run the initial pass with the given options.
    pub fn new(surface: S, options: GriddleOptions) -> Result<Self> {
        LayoutControllerBuilder::new(surface).options(options).build()
    }

    pub fn builder(surface: S) -> LayoutControllerBuilder<S> {
        LayoutControllerBuilder::new(surface)
    }

    pub fn options(&self) -> &GriddleOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Items from the most recent read of the surface, with cached ratios.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn last_outcome(&self) -> Option<&LayoutOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn on_before(&mut self, hook: impl FnMut(&S) + 'static) {
        self.before = Some(Box::new(hook));
    }

    pub fn on_end(&mut self, hook: impl FnMut(&S) + 'static) {
        self.end = Some(Box::new(hook));
    }

    /// Re-read items from the surface and run a full pass.
    pub fn relayout(&mut self) -> Result<&LayoutOutcome> {
        self.items = self.surface.items();
        debug!(items = self.items.len(), "Prepared items from surface");
        let width = self.surface.container_width();
        self.run_pass(width)
    }

    /// Run a pass for a new container width, reusing the prepared items.
    ///
    /// Returns `Ok(None)` when resizing is disabled.
    pub fn resize(&mut self, width: f64) -> Result<Option<&LayoutOutcome>> {
        if !self.options.is_resizable {
            debug!(width, "Resize ignored, controller is not resizable");
            return Ok(None);
        }
        self.run_pass(width).map(Some)
    }

    /// Apply the most recent width waiting in `widths`, if any.
    pub fn drain_resizes(&mut self, widths: &Receiver<f64>) -> Result<Option<&LayoutOutcome>> {
        match widths.try_iter().last() {
            Some(width) => self.resize(width),
            None => Ok(None),
        }
    }

    /// Replace the options and run a pass with them.
    pub fn set_options(&mut self, options: GriddleOptions) -> Result<&LayoutOutcome> {
        self.options = options;
        let width = self.surface.container_width();
        self.run_pass(width)
    }

    /// Return every item to its natural size.
    pub fn cancel(&mut self) {
        for index in 0..self.items.len() {
            self.surface.reset(index);
        }
    }

    fn run_pass(&mut self, measured_width: f64) -> Result<&LayoutOutcome> {
        if let Some(hook) = self.before.as_mut() {
            hook(&self.surface);
        }

        let params = self.options.params_for(measured_width);
        let outcome = layout::layout(&mut self.items, &params);

        match &outcome {
            Ok(outcome) if outcome.cancelled => {
                info!(
                    container_width = outcome.container_width,
                    "Container below minimum width, using natural sizes"
                );
                self.cancel();
            }
            Ok(outcome) => {
                for &index in &outcome.skipped {
                    self.surface.reset(index);
                }
                for result in &outcome.results {
                    self.surface.apply(result);
                }
            }
            Err(e) => {
                warn!(error = %e, "Layout pass failed, leaving items untouched");
            }
        }

        if let Some(hook) = self.end.as_mut() {
            hook(&self.surface);
        }

        let outcome = outcome?;
        Ok(&*self.last_outcome.insert(outcome))
    }
}

/// Builder for LayoutController so hooks are in place before the initial pass.
pub struct LayoutControllerBuilder<S: Surface> {
    surface: S,
    options: GriddleOptions,
    before: Option<Hook<S>>,
    end: Option<Hook<S>>,
}

impl<S: Surface> LayoutControllerBuilder<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            options: GriddleOptions::default(),
            before: None,
            end: None,
        }
    }

    pub fn options(mut self, options: GriddleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn before(mut self, hook: impl FnMut(&S) + 'static) -> Self {
        self.before = Some(Box::new(hook));
        self
    }

    pub fn end(mut self, hook: impl FnMut(&S) + 'static) -> Self {
        self.end = Some(Box::new(hook));
        self
    }

    /// Build the controller and run the initial pass.
    pub fn build(self) -> Result<LayoutController<S>> {
        let mut controller = LayoutController {
            surface: self.surface,
            options: self.options,
            items: Vec::new(),
            before: self.before,
            end: self.end,
            last_outcome: None,
        };
        controller.relayout()?;
        Ok(controller)
    }
}
