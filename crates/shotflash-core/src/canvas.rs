//! Retained drawing surface for animation frames.
//!
//! Each frame clears the surface, composes the background and draws the
//! qubit markers on top. Shapes are rasterized with anti-aliasing by
//! `tiny-skia`; the finished frame is handed to the GIF encoder as an
//! [`RgbaImage`].

use image::RgbaImage;
use tiny_skia::{
    Color, ColorU8, FillRule, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke,
    Transform,
};

use crate::color::Rgb;
use crate::device::Size;
use crate::error::{AnimError, AnimResult};

/// Cubic Bezier control distance for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// A fixed-size RGBA drawing surface.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Create a transparent canvas.
    pub fn new(size: Size) -> AnimResult<Self> {
        let pixmap = Pixmap::new(size.width, size.height)
            .ok_or_else(|| AnimError::Configuration(format!("invalid canvas size {size}")))?;
        Ok(Self { pixmap })
    }

    /// Wrap an existing pixmap.
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    /// Canvas size in pixels.
    pub fn size(&self) -> Size {
        Size {
            width: self.pixmap.width(),
            height: self.pixmap.height(),
        }
    }

    /// Fill the whole canvas with one color.
    pub fn fill(&mut self, color: Rgb) {
        self.pixmap
            .fill(Color::from_rgba8(color.0, color.1, color.2, 255));
    }

    /// Clear the canvas and draw `background` at the origin.
    pub fn draw_background(&mut self, background: &Pixmap) {
        self.pixmap.fill(Color::TRANSPARENT);
        self.pixmap.draw_pixmap(
            0,
            0,
            background.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Fill a circle. Nothing is drawn for zero opacity.
    pub fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Rgb, opacity: f32) {
        if let Some(path) = PathBuilder::from_circle(center.0, center.1, radius) {
            self.fill_path(&path, color, opacity);
        }
    }

    /// Fill a rectangle with rounded corners. The corner radius is clamped to
    /// half of the shorter side.
    pub fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Rgb, opacity: f32) {
        if let Some(path) = round_rect_path(rect, radius) {
            self.fill_path(&path, color, opacity);
        }
    }

    /// Outline a rectangle with rounded corners.
    pub fn stroke_round_rect(&mut self, rect: Rect, radius: f32, color: Rgb, width: f32) {
        if let Some(path) = round_rect_path(rect, radius) {
            self.stroke_path(&path, color, width);
        }
    }

    /// Draw a straight line.
    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb, width: f32) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.0, from.1);
        pb.line_to(to.0, to.1);
        if let Some(path) = pb.finish() {
            self.stroke_path(&path, color, width);
        }
    }

    /// Read back a pixel, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// The underlying pixmap.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Convert the canvas to a straight-alpha image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let size = self.size();
        let mut out = RgbaImage::new(size.width, size.height);
        for (dst, src) in out.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
        }
        out
    }

    fn fill_path(&mut self, path: &Path, color: Rgb, opacity: f32) {
        let alpha = opacity_to_u8(opacity);
        if alpha == 0 {
            return;
        }
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.0, color.1, color.2, alpha);
        paint.anti_alias = true;
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn stroke_path(&mut self, path: &Path, color: Rgb, width: f32) {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.0, color.1, color.2, 255);
        paint.anti_alias = true;
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &paint, &stroke, Transform::identity(), None);
    }
}

/// Convert a straight-alpha image into a premultiplied pixmap.
pub fn pixmap_from_image(image: &RgbaImage) -> AnimResult<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height()).ok_or_else(|| {
        AnimError::Configuration(format!(
            "invalid image size {}x{}",
            image.width(),
            image.height()
        ))
    })?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn opacity_to_u8(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn round_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
    let (l, t, rt, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let k = r * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.cubic_to(rt - r + k, t, rt, t + r - k, rt, t + r);
    pb.line_to(rt, b - r);
    pb.cubic_to(rt, b - r + k, rt - r + k, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.cubic_to(l + r - k, b, l, b - r + k, l, b - r);
    pb.line_to(l, t + r);
    pb.cubic_to(l, t + r - k, l + r - k, t, l + r, t);
    pb.close();
    pb.finish()
}
