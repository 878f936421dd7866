//! Intrinsic size probing for image files.
//!
//! Only the header is read when the format allows it.

use std::path::Path;

use image::ImageReader;
use tracing::{trace, warn};

/// Dimension reported for broken or unreadable images.
pub const ERROR_DIMENSION: u32 = 0;

/// Extensions the scanner treats as images.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff", "tif"];

pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Whether a file extension names a supported image format.
    pub fn is_image_extension(ext: &str) -> bool {
        let ext = ext.to_lowercase();
        IMAGE_EXTENSIONS.contains(&ext.as_str())
    }

    /// Reads `(width, height)` of an image.
    ///
    /// Returns `(0, 0)` for broken/unreadable files instead of erroring, so the
    /// item flows into the layout's undefined-ratio handling.
    pub fn extract_dimensions(path: &Path) -> (u32, u32) {
        trace!("Extracting image dimensions from {:?}", path);

        let reader = match ImageReader::open(path).and_then(|r| r.with_guessed_format()) {
            Ok(reader) => reader,
            Err(e) => {
                warn!("Failed to open image {:?}: {}", path, e);
                return (ERROR_DIMENSION, ERROR_DIMENSION);
            }
        };

        match reader.into_dimensions() {
            Ok((width, height)) => {
                trace!("Got dimensions {}x{} for {:?}", width, height, path);
                (width, height)
            }
            Err(e) => {
                warn!("Failed to read image dimensions for {:?}: {}", path, e);
                (ERROR_DIMENSION, ERROR_DIMENSION)
            }
        }
    }
}
