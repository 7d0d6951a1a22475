use std::cell::Cell;

use glam::Vec2;

use scroller_core::canvas::{Canvas, Color};
use scroller_core::clock::Clock;

/// Clock that moves forward a fixed step every time it is read.
pub struct SteppedClock {
    now: Cell<f64>,
    step_ms: f64,
}

impl SteppedClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            now: Cell::new(0.0),
            step_ms,
        }
    }
}

impl Clock for SteppedClock {
    fn now_ms(&self) -> f64 {
        let t = self.now.get();
        self.now.set(t + self.step_ms);
        t
    }
}

/// Canvas that discards drawing and only counts shapes.
#[derive(Debug)]
pub struct OffscreenCanvas {
    viewport: Vec2,
    depth: usize,
    draw_calls: u64,
}

impl OffscreenCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Vec2::new(width, height),
            depth: 0,
            draw_calls: 0,
        }
    }

    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }
}

impl Canvas for OffscreenCanvas {
    fn viewport(&self) -> Vec2 {
        self.viewport
    }

    fn background(&mut self, _color: Color) {
        self.draw_calls += 1;
    }

    fn fill(&mut self, _color: Color) {}

    fn stroke(&mut self, _color: Color) {}

    fn no_stroke(&mut self) {}

    fn rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {
        self.draw_calls += 1;
    }

    fn ellipse(&mut self, _cx: f32, _cy: f32, _w: f32, _h: f32) {
        self.draw_calls += 1;
    }

    fn quad(&mut self, _a: Vec2, _b: Vec2, _c: Vec2, _d: Vec2) {
        self.draw_calls += 1;
    }

    fn line(&mut self, _from: Vec2, _to: Vec2) {
        self.draw_calls += 1;
    }

    fn translate(&mut self, _offset: Vec2) {}

    fn push(&mut self) {
        self.depth += 1;
    }

    fn pop(&mut self) {
        if self.depth == 0 {
            tracing::warn!("pop without matching push");
            return;
        }
        self.depth -= 1;
    }
}
