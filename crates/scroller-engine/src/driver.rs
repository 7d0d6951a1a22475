use scroller_core::canvas::Canvas;
use scroller_core::clock::Clock;

use crate::session::Session;

/// Runs the per-frame loop: measure elapsed time, step physics, render.
///
/// The first frame measures from construction, so create the driver right
/// before the host starts calling [`FrameDriver::frame`].
pub struct FrameDriver<C: Clock> {
    clock: C,
    last_ms: f64,
}

impl<C: Clock> FrameDriver<C> {
    pub fn new(clock: C) -> Self {
        let last_ms = clock.now_ms();
        Self { clock, last_ms }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Advance and draw one frame. Returns the step length in milliseconds.
    pub fn frame(&mut self, session: &mut Session, canvas: &mut dyn Canvas) -> f32 {
        let now = self.clock.now_ms();
        let dt_ms = (now - self.last_ms).max(0.0) as f32;
        self.last_ms = now;

        session.advance_frame(dt_ms);
        session.render(canvas);
        tracing::trace!(dt_ms, x = session.player().x, y = session.player().y, "frame");
        dt_ms
    }
}
