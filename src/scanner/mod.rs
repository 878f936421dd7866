//! Image discovery for the griddle command line.
//!
//! This module provides:
//! - `FileScanner` - Walks a directory and collects image files in path order
//! - `MetadataExtractor` - Reads intrinsic dimensions from image headers

pub mod file_scanner;
pub mod metadata;

pub use file_scanner::{scan_items, FileScanner, ScanConfig, ScannedImage};
pub use metadata::MetadataExtractor;
