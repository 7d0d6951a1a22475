pub mod canvas;
pub mod clock;
pub mod input;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::cell::Cell;

    use glam::Vec2;

    use crate::canvas::{Canvas, Color};
    use crate::clock::Clock;

    /// One recorded canvas call. Shape coordinates are stored as passed,
    /// alongside the translation that was active when the call was made.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum DrawCommand {
        Background(Color),
        Fill(Color),
        Stroke(Color),
        NoStroke,
        Rect {
            x: f32,
            y: f32,
            w: f32,
            h: f32,
            offset: Vec2,
        },
        Ellipse {
            cx: f32,
            cy: f32,
            w: f32,
            h: f32,
            offset: Vec2,
        },
        Quad {
            points: [Vec2; 4],
            offset: Vec2,
        },
        Line {
            from: Vec2,
            to: Vec2,
            offset: Vec2,
        },
        Translate(Vec2),
        Push,
        Pop,
    }

    /// Canvas that records every call and tracks the transform stack.
    pub struct RecordingCanvas {
        viewport: Vec2,
        offset: Vec2,
        stack: Vec<Vec2>,
        pub commands: Vec<DrawCommand>,
    }

    impl RecordingCanvas {
        pub fn new(width: f32, height: f32) -> Self {
            Self {
                viewport: Vec2::new(width, height),
                offset: Vec2::ZERO,
                stack: Vec::new(),
                commands: Vec::new(),
            }
        }

        /// Translation currently in effect.
        pub fn offset(&self) -> Vec2 {
            self.offset
        }

        /// Depth of unmatched `push` calls.
        pub fn stack_depth(&self) -> usize {
            self.stack.len()
        }

        /// Top-left corners (with translation applied) of every recorded rect.
        pub fn rect_origins(&self) -> Vec<Vec2> {
            self.commands
                .iter()
                .filter_map(|c| match *c {
                    DrawCommand::Rect { x, y, offset, .. } => Some(Vec2::new(x, y) + offset),
                    _ => None,
                })
                .collect()
        }

        pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
            self.commands.iter().filter(|c| pred(c)).count()
        }
    }

    impl Canvas for RecordingCanvas {
        fn viewport(&self) -> Vec2 {
            self.viewport
        }

        fn background(&mut self, color: Color) {
            self.commands.push(DrawCommand::Background(color));
        }

        fn fill(&mut self, color: Color) {
            self.commands.push(DrawCommand::Fill(color));
        }

        fn stroke(&mut self, color: Color) {
            self.commands.push(DrawCommand::Stroke(color));
        }

        fn no_stroke(&mut self) {
            self.commands.push(DrawCommand::NoStroke);
        }

        fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
            self.commands.push(DrawCommand::Rect {
                x,
                y,
                w,
                h,
                offset: self.offset,
            });
        }

        fn ellipse(&mut self, cx: f32, cy: f32, w: f32, h: f32) {
            self.commands.push(DrawCommand::Ellipse {
                cx,
                cy,
                w,
                h,
                offset: self.offset,
            });
        }

        fn quad(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2) {
            self.commands.push(DrawCommand::Quad {
                points: [a, b, c, d],
                offset: self.offset,
            });
        }

        fn line(&mut self, from: Vec2, to: Vec2) {
            self.commands.push(DrawCommand::Line {
                from,
                to,
                offset: self.offset,
            });
        }

        fn translate(&mut self, offset: Vec2) {
            self.offset += offset;
            self.commands.push(DrawCommand::Translate(offset));
        }

        fn push(&mut self) {
            self.stack.push(self.offset);
            self.commands.push(DrawCommand::Push);
        }

        fn pop(&mut self) {
            if let Some(saved) = self.stack.pop() {
                self.offset = saved;
            }
            self.commands.push(DrawCommand::Pop);
        }
    }

    /// Clock that only moves when told to.
    #[derive(Debug, Default)]
    pub struct ManualClock {
        now: Cell<f64>,
    }

    impl ManualClock {
        pub fn new(start_ms: f64) -> Self {
            Self {
                now: Cell::new(start_ms),
            }
        }

        pub fn advance(&self, ms: f64) {
            self.now.set(self.now.get() + ms);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> f64 {
            self.now.get()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn recording_canvas_tracks_transform_stack() {
            let mut canvas = RecordingCanvas::new(320.0, 240.0);
            canvas.translate(Vec2::new(-10.0, 0.0));
            canvas.push();
            canvas.translate(Vec2::new(40.0, 80.0));
            canvas.rect(0.0, 0.0, 40.0, 40.0);
            assert_eq!(canvas.offset(), Vec2::new(30.0, 80.0));
            canvas.pop();
            assert_eq!(canvas.offset(), Vec2::new(-10.0, 0.0));
            assert_eq!(canvas.stack_depth(), 0);
            assert_eq!(canvas.rect_origins(), vec![Vec2::new(30.0, 80.0)]);
        }

        #[test]
        fn manual_clock_advances_only_on_request() {
            let clock = ManualClock::new(100.0);
            assert_eq!(clock.now_ms(), 100.0);
            clock.advance(16.0);
            assert_eq!(clock.now_ms(), 116.0);
        }
    }
}
