//! Background images for device diagrams.
//!
//! Diagrams can come from a directory of PNG files named after the device
//! (`sparrow.png`, `sparrow_xray_labelled.png`, ...). When no directory is
//! configured, or a file is missing from it, a diagram is drawn from the
//! geometry table instead.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use tiny_skia::{Pixmap, Rect};
use tracing::{debug, warn};

use crate::canvas::{Canvas, pixmap_from_image};
use crate::color::Rgb;
use crate::device::{DeviceProfile, Layout, Size, XRAY_DIAGRAM};
use crate::error::AnimResult;

const CHIP_BACKGROUND: Rgb = Rgb(24, 28, 38);
const CHIP_BODY: Rgb = Rgb(46, 54, 72);
const COUPLER: Rgb = Rgb(110, 120, 140);
const QUBIT_PAD: Rgb = Rgb(150, 160, 180);
const RESONATOR: Rgb = Rgb(190, 170, 120);
const LABEL: Rgb = Rgb(230, 230, 230);

/// Couplers are drawn between qubits closer than this multiple of the
/// smallest qubit spacing on the diagram.
const NEIGHBOUR_TOLERANCE: f32 = 1.2;

/// Where background diagrams come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AssetStore {
    /// Diagrams drawn from the geometry table.
    #[default]
    Embedded,
    /// PNG files in a directory, falling back to drawn diagrams.
    Directory(PathBuf),
}

impl AssetStore {
    /// Use PNG files from `dir`.
    pub fn directory(dir: impl Into<PathBuf>) -> Self {
        AssetStore::Directory(dir.into())
    }

    /// Load the background for a device and layout, sized to `size`.
    pub fn background(
        &self,
        device: Option<&DeviceProfile>,
        layout: Layout,
        labelled: bool,
        size: Size,
    ) -> AnimResult<Pixmap> {
        let name = match (layout, device) {
            (Layout::Gate, Some(device)) => device.gate_asset(),
            _ => XRAY_DIAGRAM.asset(labelled).to_string(),
        };

        if let AssetStore::Directory(dir) = self {
            let path = dir.join(&name);
            if path.is_file() {
                return load_png(&path, size);
            }
            warn!(
                asset = %path.display(),
                "background asset not found, drawing diagram instead"
            );
        }

        debug!(asset = %name, "drawing background diagram");
        match (layout, device) {
            (Layout::Gate, Some(device)) => draw_gate_diagram(device, size),
            _ => draw_xray_diagram(labelled, size),
        }
    }
}

fn load_png(path: &Path, size: Size) -> AnimResult<Pixmap> {
    let mut image = image::open(path)?.to_rgba8();
    if image.width() != size.width || image.height() != size.height {
        debug!(
            asset = %path.display(),
            from = %format!("{}x{}", image.width(), image.height()),
            to = %size,
            "resizing background asset"
        );
        image = image::imageops::resize(&image, size.width, size.height, FilterType::Triangle);
    }
    pixmap_from_image(&image)
}

#[allow(clippy::cast_precision_loss)]
fn point(p: (u32, u32)) -> (f32, f32) {
    (p.0 as f32, p.1 as f32)
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Pairs of qubits that sit next to each other on the diagram.
fn neighbour_pairs(coords: &[(u32, u32)]) -> Vec<(usize, usize)> {
    let points: Vec<_> = coords.iter().copied().map(point).collect();
    let mut min_spacing = f32::INFINITY;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            min_spacing = min_spacing.min(distance(*a, *b));
        }
    }

    let limit = min_spacing * NEIGHBOUR_TOLERANCE;
    let mut pairs = Vec::new();
    for (i, a) in points.iter().enumerate() {
        for (j, b) in points.iter().enumerate().skip(i + 1) {
            if distance(*a, *b) <= limit {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

#[allow(clippy::cast_precision_loss)]
fn draw_gate_diagram(device: &DeviceProfile, size: Size) -> AnimResult<Pixmap> {
    let mut canvas = Canvas::new(size)?;
    canvas.fill(CHIP_BACKGROUND);

    if let Some(body) = Rect::from_xywh(
        2.0,
        2.0,
        size.width as f32 - 4.0,
        size.height as f32 - 4.0,
    ) {
        canvas.fill_round_rect(body, 8.0, CHIP_BODY, 1.0);
    }

    let coords = device.gate_coords;
    for (a, b) in neighbour_pairs(coords) {
        canvas.line(point(coords[a]), point(coords[b]), COUPLER, 3.0);
    }
    for &p in coords {
        canvas.fill_circle(point(p), 9.0, QUBIT_PAD, 1.0);
    }
    Ok(canvas.pixmap().clone())
}

#[allow(clippy::cast_precision_loss)]
fn draw_xray_diagram(labelled: bool, size: Size) -> AnimResult<Pixmap> {
    let mut canvas = Canvas::new(size)?;
    canvas.fill(CHIP_BACKGROUND);

    if let Some(die) = Rect::from_xywh(10.0, 10.0, size.width as f32 - 20.0, size.height as f32 - 20.0)
    {
        canvas.fill_round_rect(die, 4.0, CHIP_BODY, 1.0);
    }

    for (index, res) in XRAY_DIAGRAM.resonators.iter().enumerate() {
        let (x, y) = point(res.origin);
        let Some(rect) = Rect::from_xywh(x, y, res.width as f32, res.height as f32) else {
            continue;
        };
        canvas.stroke_round_rect(rect, 6.0, RESONATOR, 2.0);

        if labelled {
            // one pip per index, qubit 0 gets one
            let cx = x + res.width as f32 / 2.0;
            let cy = y + res.height as f32 / 2.0;
            let pips = index + 1;
            let start = cx - 5.0 * (pips as f32 - 1.0);
            for pip in 0..pips {
                canvas.fill_circle((start + 10.0 * pip as f32, cy), 3.0, LABEL, 1.0);
            }
        }
    }
    Ok(canvas.pixmap().clone())
}
