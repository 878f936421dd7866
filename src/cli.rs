use std::fmt::Write as _;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use griddle::config::{GriddleOptions, RatioPolicy};
use griddle::controller::Surface;
use griddle::models::{Item, LayoutOutcome, LayoutResult};
use griddle::scanner::{ScanConfig, ScannedImage};

pub const USAGE: &str = "\
usage: griddle [options] <directory>

options:
  --width <px>                container width (required)
  --min-height <px>           minimum row height (default 0)
  --max-height <px>           maximum row height (default 9999)
  --min-container-width <px>  cancel layout below this width (default 700)
  --max-ratio-sum <sum>       soft cap on a row's ratio sum (default 10)
  --gutter <px>               spacing between items (default 0)
  --resize <px>               re-run the layout at another width (repeatable)
  --expose-scaling            print each item's scale
  --strict                    fail when an image has no usable size
  --recursive                 scan subdirectories
  --help                      show this message";

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub path: PathBuf,
    pub width: f64,
    pub options: GriddleOptions,
    pub recursive: bool,
    pub resize: Vec<f64>,
}

fn parse_value<T>(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = args
        .next()
        .with_context(|| format!("Missing value for {}", flag))?;
    value
        .parse::<T>()
        .with_context(|| format!("Failed to parse {} value {:?}", flag, value))
}

/// Parses command line arguments (without the program name).
///
/// Returns `Ok(None)` when help was requested.
pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Option<CliArgs>> {
    let mut path: Option<PathBuf> = None;
    let mut width: Option<f64> = None;
    let mut options = GriddleOptions::default();
    let mut recursive = false;
    let mut resize = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--width" => width = Some(parse_value(&mut args, "--width")?),
            "--min-height" => options.min_height = parse_value(&mut args, "--min-height")?,
            "--max-height" => options.max_height = parse_value(&mut args, "--max-height")?,
            "--min-container-width" => {
                options.min_container_width = parse_value(&mut args, "--min-container-width")?
            }
            "--max-ratio-sum" => {
                options.max_ratio_sum = parse_value(&mut args, "--max-ratio-sum")?
            }
            "--gutter" => options.gutter = parse_value(&mut args, "--gutter")?,
            "--resize" => resize.push(parse_value(&mut args, "--resize")?),
            "--expose-scaling" => options.expose_scaling = true,
            "--strict" => options.ratio_policy = RatioPolicy::Strict,
            "--recursive" => recursive = true,
            _ if arg.starts_with('-') => bail!("Unknown option: {}", arg),
            _ => {
                if path.is_some() {
                    bail!("Unexpected extra argument: {}", arg);
                }
                path = Some(PathBuf::from(arg));
            }
        }
    }

    let path = path.context("Missing <directory> argument")?;
    let width = width.context("Missing required --width <px>")?;
    if !(width > 0.0) {
        bail!("--width must be greater than 0");
    }

    Ok(Some(CliArgs {
        path,
        width,
        options,
        recursive,
        resize,
    }))
}

impl CliArgs {
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            recursive: self.recursive,
            ..Default::default()
        }
    }
}

/// Surface that records placements for printing.
pub struct ConsoleSurface {
    width: f64,
    images: Vec<ScannedImage>,
    items: Vec<Item>,
    placements: Vec<Option<LayoutResult>>,
}

impl ConsoleSurface {
    pub fn new(width: f64, images: Vec<ScannedImage>, items: Vec<Item>) -> Self {
        let placements = vec![None; items.len()];
        Self {
            width,
            images,
            items,
            placements,
        }
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    /// Renders the current placements, one line per image.
    pub fn render(&self, outcome: &LayoutOutcome) -> String {
        let mut out = String::new();
        if outcome.cancelled {
            let _ = writeln!(
                out,
                "width={} cancelled (natural sizes)",
                outcome.container_width
            );
            return out;
        }

        let _ = writeln!(
            out,
            "width={} rows={} skipped={}",
            outcome.container_width,
            outcome.row_count(),
            outcome.skipped.len()
        );
        for (image, placement) in self.images.iter().zip(&self.placements) {
            let name = image.path.display();
            match placement {
                Some(p) => {
                    let _ = write!(
                        out,
                        "row={:<3} {:>5}x{:<5} +{:<3} {}",
                        p.row_index, p.width, p.height, p.margin_right, name
                    );
                    if let Some(scale) = p.scale {
                        let _ = write!(out, " scale={}", scale);
                    }
                    out.push('\n');
                }
                None => {
                    let _ = writeln!(out, "natural          {}", name);
                }
            }
        }
        out
    }
}

impl Surface for ConsoleSurface {
    fn container_width(&self) -> f64 {
        self.width
    }

    fn items(&self) -> Vec<Item> {
        self.items.clone()
    }

    fn apply(&mut self, result: &LayoutResult) {
        if let Some(slot) = self.placements.get_mut(result.item_index) {
            *slot = Some(result.clone());
        }
    }

    fn reset(&mut self, item_index: usize) {
        if let Some(slot) = self.placements.get_mut(item_index) {
            *slot = None;
        }
    }
}
