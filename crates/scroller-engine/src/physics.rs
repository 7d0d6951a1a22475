use scroller_core::input::InputState;

use crate::config::{Environment, PlayerTuning};
use crate::grid::WorldGrid;
use crate::tiles::{Axis, TileCatalog, TileContact};

/// Player width in tiles.
pub const PLAYER_WIDTH_TILES: f32 = 2.0;
/// Player height in tiles.
pub const PLAYER_HEIGHT_TILES: f32 = 4.0;

/// Axis-aligned box with its top-left corner at `(x, y)`. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Whether the box covers no area.
    pub fn is_degenerate(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Strict overlap test: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.x + self.w > other.x
            && self.x < other.x + other.w
            && self.y + self.h > other.y
            && self.y < other.y + other.h
    }
}

/// The controllable character.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub xv: f32,
    pub yv: f32,
    pub friction: f32,
    pub gravity: f32,
    pub speed: f32,
    pub jump_force: f32,
    pub w: f32,
    pub h: f32,
    /// Not resting on a surface this frame. Controls are ignored while set.
    pub falling: bool,
    /// Freeze the walking animation phase.
    pub lock_walking_animation: bool,
    /// Walking animation clock in milliseconds (scaled by speed).
    pub walking_phase: f32,
}

impl Player {
    /// Player at the world origin, sized to the tile grid.
    pub fn new(tile_size: f32, tuning: &PlayerTuning) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            xv: 0.0,
            yv: 0.0,
            friction: tuning.friction,
            gravity: tuning.gravity,
            speed: tuning.speed,
            jump_force: tuning.jump_force,
            w: tile_size * PLAYER_WIDTH_TILES,
            h: tile_size * PLAYER_HEIGHT_TILES,
            falling: false,
            lock_walking_animation: false,
            walking_phase: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.w, self.h)
    }

    /// Whether the player overlaps `other`.
    pub fn touching(&self, other: &Aabb) -> bool {
        self.bounds().overlaps(other)
    }

    pub fn reset_walking_animation(&mut self) {
        self.walking_phase = 0.0;
    }
}

/// Advance the player by one frame of `dt_ms` milliseconds.
///
/// Horizontal motion is integrated and resolved against the grid before
/// vertical motion. Tiles are visited in row-major order and every
/// overlapping solid tile snaps the player and fires its callback, so when
/// several tiles overlap in one pass the last one visited decides the
/// final position.
pub fn tick_player(
    player: &mut Player,
    input: &InputState,
    env: &Environment,
    grid: &WorldGrid,
    catalog: &mut TileCatalog,
    dt_ms: f32,
) {
    let dt = dt_ms / 1000.0;

    // Controls only apply on the ground. Jump is level-triggered.
    if !player.falling {
        if input.right {
            player.xv += player.speed;
        }
        if input.left {
            player.xv -= player.speed;
        }
        if input.jump {
            player.yv = -player.jump_force;
        }
    }

    player.x += player.xv * dt;
    resolve_tiles(player, grid, catalog, env.tile_size_f32(), Axis::Horizontal);

    player.falling = true;
    player.y += player.yv * dt;
    resolve_tiles(player, grid, catalog, env.tile_size_f32(), Axis::Vertical);

    clamp_to_world(player, env);

    if !player.falling {
        player.xv *= player.friction;
    }
    player.yv += player.gravity * dt;

    if input.is_walking() && !player.lock_walking_animation {
        player.walking_phase += dt_ms * (player.speed / env.tile_size_f32());
    }
}

fn resolve_tiles(
    player: &mut Player,
    grid: &WorldGrid,
    catalog: &mut TileCatalog,
    tile_size: f32,
    axis: Axis,
) {
    for (row, col, id) in grid.occupied() {
        // Cells holding ids from another catalog are the caller's bug; skip them.
        let Some(props) = catalog.get_mut(id) else {
            continue;
        };
        if !props.is_solid() {
            continue;
        }

        let tile = props
            .footprint
            .at(col as f32 * tile_size, row as f32 * tile_size);
        if !player.touching(&tile) {
            continue;
        }

        match axis {
            Axis::Horizontal => {
                player.x = if player.xv > 0.0 {
                    tile.x - player.w
                } else {
                    tile.x + tile.w
                };
                player.xv = 0.0;
            },
            Axis::Vertical => {
                if player.yv > 0.0 {
                    player.y = tile.y - player.h;
                    player.falling = false;
                    tracing::trace!(row, col, "landed on tile");
                } else {
                    player.y = tile.y + tile.h;
                }
                player.yv = 0.0;
            },
        }

        props.fire_collision(
            &TileContact {
                tile: id,
                row,
                col,
                axis,
            },
            player,
        );
    }
}

fn clamp_to_world(player: &mut Player, env: &Environment) {
    let max_x = env.width as f32 - player.w;
    player.x = player.x.min(max_x).max(0.0);
    player.y = player.y.max(0.0);

    let floor_y = env.height as f32 - player.h;
    if env.bottom_collision && player.y > floor_y {
        player.y = floor_y;
        player.yv = 0.0;
        player.falling = false;
    }
}
