use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque RGB color passed to the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Pale cyan sky used as the default background clear.
    pub const SKY: Color = Color::rgb(192, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::SKY
    }
}

/// Immediate-mode drawing primitives supplied by the host renderer.
///
/// Coordinates are in world pixels after the current transform. Shapes use the
/// fill and stroke state set by the most recent `fill`/`stroke`/`no_stroke` call.
pub trait Canvas {
    /// Visible area size in pixels.
    fn viewport(&self) -> Vec2;

    /// Clear the whole viewport with a solid color.
    fn background(&mut self, color: Color);

    fn fill(&mut self, color: Color);

    fn stroke(&mut self, color: Color);

    fn no_stroke(&mut self);

    /// Axis-aligned rectangle with its top-left corner at `(x, y)`.
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// Ellipse centered on `(cx, cy)`.
    fn ellipse(&mut self, cx: f32, cy: f32, w: f32, h: f32);

    /// Quadrilateral through four corners in drawing order.
    fn quad(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2);

    fn line(&mut self, from: Vec2, to: Vec2);

    /// Offset every subsequent draw by `offset`.
    fn translate(&mut self, offset: Vec2);

    /// Save the current transform.
    fn push(&mut self);

    /// Restore the transform saved by the matching `push`.
    fn pop(&mut self);
}
