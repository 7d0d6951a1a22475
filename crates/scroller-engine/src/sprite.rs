//! The default player figure: a green stick character with four poses.

use std::f32::consts::TAU;

use glam::Vec2;

use scroller_core::canvas::{Canvas, Color};
use scroller_core::input::InputState;

use crate::physics::Player;

const BODY: Color = Color::rgb(0, 128, 0);
const OUTLINE: Color = Color::rgb(0, 64, 0);

/// Which figure to draw for the player this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Standing,
    WalkingRight,
    WalkingLeft,
    Airborne,
}

impl Pose {
    /// Grounded with no direction held is standing; grounded and walking
    /// faces the way the player is moving.
    pub fn for_player(player: &Player, input: &InputState) -> Self {
        if player.falling {
            Pose::Airborne
        } else if !input.is_walking() {
            Pose::Standing
        } else if player.xv > 0.0 {
            Pose::WalkingRight
        } else {
            Pose::WalkingLeft
        }
    }
}

/// Maps fractions of the player box to world points, optionally mirrored
/// about the vertical center line.
struct Frame {
    origin: Vec2,
    size: Vec2,
    mirrored: bool,
}

impl Frame {
    fn at(&self, fx: f32, fy: f32) -> Vec2 {
        let fx = if self.mirrored { 1.0 - fx } else { fx };
        self.origin + Vec2::new(fx, fy) * self.size
    }

    fn rect(&self, canvas: &mut dyn Canvas, fx: f32, fy: f32, fw: f32, fh: f32) {
        let corner = self.at(if self.mirrored { fx + fw } else { fx }, fy);
        canvas.rect(corner.x, corner.y, fw * self.size.x, fh * self.size.y);
    }

    fn ellipse(&self, canvas: &mut dyn Canvas, fx: f32, fy: f32, fw: f32, fh: f32) {
        let center = self.at(fx, fy);
        canvas.ellipse(center.x, center.y, fw * self.size.x, fh * self.size.y);
    }

    fn quad(&self, canvas: &mut dyn Canvas, pts: [(f32, f32); 4]) {
        let [a, b, c, d] = pts.map(|(fx, fy)| self.at(fx, fy));
        canvas.quad(a, b, c, d);
    }

    fn line(&self, canvas: &mut dyn Canvas, from: (f32, f32), to: (f32, f32)) {
        canvas.line(self.at(from.0, from.1), self.at(to.0, to.1));
    }
}

/// Draw the player figure in world coordinates.
pub fn draw_player(player: &Player, input: &InputState, canvas: &mut dyn Canvas) {
    let pose = Pose::for_player(player, input);
    let frame = Frame {
        origin: Vec2::new(player.x, player.y),
        size: Vec2::new(player.w, player.h),
        mirrored: pose == Pose::WalkingLeft,
    };
    match pose {
        Pose::Standing | Pose::Airborne => draw_still(&frame, pose == Pose::Airborne, canvas),
        Pose::WalkingRight | Pose::WalkingLeft => {
            draw_walking(&frame, player.walking_phase, canvas)
        },
    }
}

fn draw_torso(frame: &Frame, canvas: &mut dyn Canvas) {
    frame.rect(canvas, 0.25, 0.125, 0.5, 0.25);
    frame.rect(canvas, 0.375, 0.375, 0.25, 1.0 / 3.0);
}

fn draw_mouth(frame: &Frame, canvas: &mut dyn Canvas) {
    canvas.stroke(OUTLINE);
    frame.line(canvas, (0.375, 0.35), (0.625, 0.35));
}

fn draw_eye(frame: &Frame, pupil: Vec2, canvas: &mut dyn Canvas) {
    canvas.fill(Color::WHITE);
    frame.ellipse(canvas, 0.5, 0.25, 1.0 / 3.0, 1.0 / 6.0);
    canvas.fill(Color::BLACK);
    frame.ellipse(canvas, pupil.x, pupil.y, 1.0 / 12.0, 1.0 / 12.0);
}

/// Arms out, legs apart. In the air the feet tuck in and the pupil looks down.
fn draw_still(frame: &Frame, airborne: bool, canvas: &mut dyn Canvas) {
    canvas.no_stroke();
    canvas.fill(BODY);
    draw_torso(frame, canvas);
    frame.quad(canvas, [(0.375, 0.375), (0.375, 0.5), (0.25, 0.7), (0.125, 0.7)]);
    frame.quad(canvas, [(0.625, 0.375), (0.625, 0.5), (0.75, 0.7), (0.875, 0.7)]);

    let (inner, outer) = if airborne {
        (7.0 / 16.0, 5.0 / 16.0)
    } else {
        (0.375, 0.25)
    };
    frame.quad(canvas, [(0.375, 0.708), (0.5, 0.708), (inner, 1.0), (outer, 1.0)]);
    frame.quad(
        canvas,
        [(0.625, 0.708), (0.5, 0.708), (1.0 - inner, 1.0), (1.0 - outer, 1.0)],
    );

    let pupil_y = if airborne { 0.28 } else { 0.25 };
    draw_eye(frame, Vec2::new(0.5, pupil_y), canvas);
    draw_mouth(frame, canvas);
}

/// Facing right; the left-facing figure is the same drawing mirrored.
fn draw_walking(frame: &Frame, phase_ms: f32, canvas: &mut dyn Canvas) {
    let angle = phase_ms / 1000.0 * TAU;
    let swing = angle.sin();
    let front_lift = angle.cos().max(0.0);
    let back_lift = -angle.cos().min(0.0);

    canvas.stroke(OUTLINE);
    canvas.fill(BODY);
    // Far arm sits behind the torso.
    frame.quad(
        canvas,
        [
            (0.625, 0.375),
            (0.625, 0.5),
            (0.5 - 0.25 * swing, 0.7),
            (0.5 - 0.375 * swing, 0.7),
        ],
    );

    canvas.no_stroke();
    draw_torso(frame, canvas);

    canvas.stroke(OUTLINE);
    frame.quad(
        canvas,
        [
            (0.375, 0.375),
            (0.375, 0.5),
            (0.5 + 0.25 * swing, 0.7),
            (0.5 + 0.375 * swing, 0.7),
        ],
    );
    frame.quad(
        canvas,
        [
            (0.625, 0.708),
            (0.5, 0.708),
            (0.5 + 0.25 * swing, 1.0 - front_lift / 16.0),
            (0.625 + 0.25 * swing, 1.0 - front_lift / 16.0),
        ],
    );
    frame.quad(
        canvas,
        [
            (0.375, 0.708),
            (0.5, 0.708),
            (0.5 - 0.25 * swing, 1.0 - back_lift / 16.0),
            (0.375 - 0.25 * swing, 1.0 - back_lift / 16.0),
        ],
    );

    canvas.no_stroke();
    draw_eye(frame, Vec2::new(9.0 / 16.0, 0.25), canvas);
    draw_mouth(frame, canvas);
}
