use glam::Vec2;

use crate::physics::Player;

/// Translation applied to world drawing so the player stays centered.
///
/// Each axis is clamped so the view never leaves the world: the offset is at
/// most zero (left/top edge) and at least `viewport - world` (right/bottom
/// edge). When the viewport is larger than the world the lower bound wins,
/// pinning the world against the right/bottom of the viewport.
pub fn camera_offset(player: &Player, world: Vec2, viewport: Vec2) -> Vec2 {
    let center = Vec2::new(player.x + player.w / 2.0, player.y + player.h / 2.0);
    let desired = viewport / 2.0 - center;
    let lowest = viewport - world;
    Vec2::new(
        desired.x.min(0.0).max(lowest.x),
        desired.y.min(0.0).max(lowest.y),
    )
}
