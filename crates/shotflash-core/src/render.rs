//! Frame renderers.
//!
//! A renderer is called once per animation frame. It picks a shot, redraws
//! the device background and puts a marker over every qubit whose bit is
//! set, so that measured `1`s flash like readout pulses.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tiny_skia::{Pixmap, Rect};

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::device::{DeviceProfile, Layout, Size, XRAY_DIAGRAM};
use crate::error::{AnimError, AnimResult};
use crate::shots::{Shot, ShotList};

/// Radius of the gate-diagram marker in pixels.
pub const GATE_MARKER_RADIUS: f32 = 14.0;
/// Padding added around each x-ray resonator box.
pub const XRAY_MARKER_PAD: f32 = 5.0;
/// Corner radius of the x-ray marker.
pub const XRAY_MARKER_ROUNDING: f32 = 20.0;

/// Which shot a frame shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Playback {
    /// An independent uniformly random shot per frame.
    #[default]
    Random,
    /// Shot `frame % len`, in list order.
    Sequential,
}

/// Marker appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Marker color.
    pub color: Rgb,
    /// Opacity of a marker whose bit is `1`.
    pub intensity: f32,
}

/// Draws one animation frame onto a canvas.
pub trait FrameRenderer {
    /// Diagram style drawn by this renderer.
    fn layout(&self) -> Layout;

    /// Size of the frames produced.
    fn size(&self) -> Size;

    /// Redraw `canvas` for `frame`.
    fn render_frame(
        &mut self,
        frame: usize,
        canvas: &mut Canvas,
        rng: &mut dyn RngCore,
    ) -> AnimResult<()>;
}

/// Shots plus the rule for choosing one per frame.
struct ShotSource {
    shots: ShotList,
    playback: Playback,
}

impl ShotSource {
    fn new(shots: ShotList, playback: Playback, capacity: usize) -> AnimResult<Self> {
        if shots.is_empty() {
            return Err(AnimError::EmptyCounts);
        }
        let widest = shots.iter().map(Shot::width).max().unwrap_or(0);
        if widest > capacity {
            return Err(AnimError::UnsupportedQubitCount {
                required: widest,
                capacity,
            });
        }
        Ok(Self { shots, playback })
    }

    fn pick(&self, frame: usize, rng: &mut dyn RngCore) -> &Shot {
        let index = match self.playback {
            Playback::Random => rng.gen_range(0..self.shots.len()),
            Playback::Sequential => frame % self.shots.len(),
        };
        &self.shots[index]
    }
}

/// Circles over the qubits of a gate map diagram.
pub struct GateRenderer {
    device: &'static DeviceProfile,
    source: ShotSource,
    background: Pixmap,
    style: MarkerStyle,
}

impl GateRenderer {
    /// Create a gate renderer. Fails if any shot is wider than the device.
    pub fn new(
        device: &'static DeviceProfile,
        shots: ShotList,
        background: Pixmap,
        style: MarkerStyle,
        playback: Playback,
    ) -> AnimResult<Self> {
        Ok(Self {
            device,
            source: ShotSource::new(shots, playback, device.num_qubits)?,
            background,
            style,
        })
    }
}

impl FrameRenderer for GateRenderer {
    fn layout(&self) -> Layout {
        Layout::Gate
    }

    fn size(&self) -> Size {
        self.device.gate_size
    }

    #[allow(clippy::cast_precision_loss)]
    fn render_frame(
        &mut self,
        frame: usize,
        canvas: &mut Canvas,
        rng: &mut dyn RngCore,
    ) -> AnimResult<()> {
        let shot = self.source.pick(frame, rng);
        self.device.check_width(shot.width())?;

        canvas.draw_background(&self.background);
        for (bit, &(x, y)) in shot.bits().zip(self.device.gate_coords) {
            let opacity = if bit { self.style.intensity } else { 0.0 };
            canvas.fill_circle(
                (x as f32, y as f32),
                GATE_MARKER_RADIUS,
                self.style.color,
                opacity,
            );
        }
        Ok(())
    }
}

/// Rounded boxes over the readout resonators of the x-ray chip photo.
pub struct XrayRenderer {
    source: ShotSource,
    background: Pixmap,
    style: MarkerStyle,
}

impl XrayRenderer {
    /// Create an x-ray renderer. Fails if any shot is wider than 5 qubits.
    pub fn new(
        shots: ShotList,
        background: Pixmap,
        style: MarkerStyle,
        playback: Playback,
    ) -> AnimResult<Self> {
        Ok(Self {
            source: ShotSource::new(shots, playback, XRAY_DIAGRAM.capacity())?,
            background,
            style,
        })
    }
}

impl FrameRenderer for XrayRenderer {
    fn layout(&self) -> Layout {
        Layout::Xray
    }

    fn size(&self) -> Size {
        XRAY_DIAGRAM.size
    }

    #[allow(clippy::cast_precision_loss)]
    fn render_frame(
        &mut self,
        frame: usize,
        canvas: &mut Canvas,
        rng: &mut dyn RngCore,
    ) -> AnimResult<()> {
        let shot = self.source.pick(frame, rng);
        XRAY_DIAGRAM.check_width(shot.width())?;

        canvas.draw_background(&self.background);
        for (bit, res) in shot.bits().zip(&XRAY_DIAGRAM.resonators) {
            if !bit {
                continue;
            }
            let Some(rect) = Rect::from_xywh(
                res.origin.0 as f32 - XRAY_MARKER_PAD,
                res.origin.1 as f32 - XRAY_MARKER_PAD,
                res.width as f32 + 2.0 * XRAY_MARKER_PAD,
                res.height as f32 + 2.0 * XRAY_MARKER_PAD,
            ) else {
                continue;
            };
            canvas.fill_round_rect(
                rect,
                XRAY_MARKER_ROUNDING,
                self.style.color,
                self.style.intensity,
            );
        }
        Ok(())
    }
}
