//! Justified-row gallery layout.
//!
//! Given items with intrinsic aspect ratios and a container width, partitions
//! the items into rows and sizes each row so it exactly fills the width.

pub mod config;
pub mod controller;
pub mod error;
pub mod layout;
pub mod models;
pub mod scanner;

pub use config::{GriddleOptions, LayoutParams, RatioPolicy};
pub use controller::{LayoutController, ResizeDebouncer, Surface};
pub use error::{LayoutError, Result};
pub use layout::{layout, partition, resolve_ratios, size};
pub use models::{Item, LayoutOutcome, LayoutResult, Row, RowMember};
