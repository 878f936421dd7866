//! Directory scanner producing layout items from image files.
//!
//! - Directory walking using walkdir
//! - Image detection by file extension
//! - Header-only dimension probing

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::models::Item;
use crate::scanner::metadata::MetadataExtractor;

/// Configuration for the file scanner.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to scan directories recursively.
    pub recursive: bool,
    /// Maximum directory depth (0 = unlimited).
    pub max_depth: usize,
    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            max_depth: 0, // unlimited
            follow_symlinks: false,
        }
    }
}

/// An image found on disk with its intrinsic size.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ScannedImage {
    /// Layout item for this image; 0x0 images end up with an undefined ratio.
    pub fn to_item(&self) -> Item {
        Item::from_size(self.width as f64, self.height as f64)
    }
}

pub struct FileScanner {
    config: ScanConfig,
}

impl FileScanner {
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scans a directory for images, sorted by path for a stable display order.
    pub fn scan(&self, dir: &Path) -> Result<Vec<ScannedImage>> {
        info!("Scanning {:?}", dir);
        let paths = Self::discover_files(dir, &self.config)?;

        let images: Vec<ScannedImage> = paths
            .into_iter()
            .map(|path| {
                let (width, height) = MetadataExtractor::extract_dimensions(&path);
                ScannedImage {
                    path,
                    width,
                    height,
                }
            })
            .collect();

        let broken = images.iter().filter(|i| i.height == 0).count();
        debug!(total = images.len(), broken, "Scan complete");
        Ok(images)
    }

    /// Discovers all image files in a directory.
    fn discover_files(dir: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            anyhow::bail!("Not a directory: {:?}", dir);
        }

        let mut walker = WalkDir::new(dir).follow_links(config.follow_symlinks);

        if !config.recursive {
            walker = walker.max_depth(1);
        } else if config.max_depth > 0 {
            walker = walker.max_depth(config.max_depth);
        }

        let mut paths = Vec::new();

        for entry in walker.into_iter() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let ext = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("");
            if MetadataExtractor::is_image_extension(ext) {
                paths.push(entry.into_path());
            }
        }

        // Sort by path for consistent ordering
        paths.sort();

        Ok(paths)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper: scan `dir` and return images plus their layout items.
pub fn scan_items(dir: &Path, config: ScanConfig) -> Result<(Vec<ScannedImage>, Vec<Item>)> {
    let images = FileScanner::with_config(config)
        .scan(dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;
    let items = images.iter().map(ScannedImage::to_item).collect();
    Ok((images, items))
}
