use glam::Vec2;

use scroller_core::canvas::Canvas;
use scroller_core::input::{Button, InputState};

use crate::camera::camera_offset;
use crate::config::{Environment, EnvironmentConfig, ScrollerConfig};
use crate::error::ConfigurationError;
use crate::grid::WorldGrid;
use crate::physics::{Player, tick_player};
use crate::sprite::draw_player;
use crate::tiles::{TileCatalog, TileId, TileType};

/// Clears the viewport before the world is drawn.
pub type BackgroundFn = Box<dyn Fn(&Environment, &mut dyn Canvas)>;

/// Draws the player in world coordinates.
pub type PlayerDrawFn = Box<dyn Fn(&Player, &InputState, &mut dyn Canvas)>;

/// One running level: world bounds, tiles, the player and held input.
pub struct Session {
    env: Environment,
    grid: WorldGrid,
    catalog: TileCatalog,
    player: Player,
    input: InputState,
    background: BackgroundFn,
    player_draw: PlayerDrawFn,
}

impl Session {
    /// Validate the environment and start a session with default player tuning.
    pub fn initialize(config: &EnvironmentConfig) -> Result<Self, ConfigurationError> {
        Self::from_config(&ScrollerConfig {
            environment: config.clone(),
            ..ScrollerConfig::default()
        })
    }

    /// Validate the environment and start a session with the configured tuning.
    pub fn from_config(config: &ScrollerConfig) -> Result<Self, ConfigurationError> {
        let env = config.environment.validate()?;
        let grid = WorldGrid::for_environment(&env);
        let player = Player::new(env.tile_size_f32(), &config.player);
        tracing::info!(
            width = env.width,
            height = env.height,
            tile_size = env.tile_size,
            rows = grid.rows(),
            columns = grid.columns(),
            "Environment initialized"
        );
        Ok(Self {
            env,
            grid,
            catalog: TileCatalog::new(),
            player,
            input: InputState::new(),
            background: Box::new(|env: &Environment, canvas: &mut dyn Canvas| {
                canvas.background(env.background)
            }),
            player_draw: Box::new(draw_player),
        })
    }

    /// Add a tile type. The footprint defaults to one tile.
    pub fn register_tile_type(&mut self, tile: TileType) -> TileId {
        let id = self.catalog.register(tile, self.env.tile_size_f32());
        tracing::info!(id = id.index(), "Registered tile type");
        id
    }

    /// Put a tile in a cell, or clear it with `None`. Returns `false` when
    /// the cell is outside the grid.
    pub fn set_tile(&mut self, row: usize, col: usize, tile: Option<TileId>) -> bool {
        if let Some(id) = tile
            && self.catalog.get(id).is_none()
        {
            tracing::warn!(row, col, id = id.index(), "placing unregistered tile id");
        }
        let written = self.grid.set(row, col, tile);
        if written {
            tracing::debug!(row, col, ?tile, "Set tile");
        }
        written
    }

    pub fn place_tile(&mut self, row: usize, col: usize, tile: TileId) -> bool {
        self.set_tile(row, col, Some(tile))
    }

    pub fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut WorldGrid {
        &mut self.grid
    }

    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Record a press or release. Releasing a direction restarts the walk
    /// cycle.
    pub fn set_input(&mut self, button: Button, pressed: bool) {
        self.input.set(button, pressed);
        if !pressed && matches!(button, Button::Left | Button::Right) {
            self.player.reset_walking_animation();
        }
    }

    /// Host key-down hook. Unbound keys are ignored.
    pub fn key_down(&mut self, code: &str) {
        if let Some(button) = Button::from_key_code(code) {
            self.set_input(button, true);
        }
    }

    /// Host key-up hook. Unbound keys are ignored.
    pub fn key_up(&mut self, code: &str) {
        if let Some(button) = Button::from_key_code(code) {
            self.set_input(button, false);
        }
    }

    /// Run one physics step of `dt_ms` milliseconds.
    pub fn advance_frame(&mut self, dt_ms: f32) {
        tick_player(
            &mut self.player,
            &self.input,
            &self.env,
            &self.grid,
            &mut self.catalog,
            dt_ms,
        );
    }

    /// Draw background, then the player and every placed tile under the
    /// camera transform.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        (self.background)(&self.env, canvas);

        let offset = self.camera_offset(canvas.viewport());
        let tile_size = self.env.tile_size_f32();
        canvas.push();
        canvas.translate(offset);
        (self.player_draw)(&self.player, &self.input, canvas);
        for (row, col, id) in self.grid.occupied() {
            let Some(props) = self.catalog.get(id) else {
                continue;
            };
            canvas.push();
            canvas.translate(Vec2::new(col as f32, row as f32) * tile_size);
            props.draw(canvas);
            canvas.pop();
        }
        canvas.pop();
    }

    /// Camera translation for a viewport of the given size.
    pub fn camera_offset(&self, viewport: Vec2) -> Vec2 {
        camera_offset(&self.player, self.env.size(), viewport)
    }

    /// Replace the background clear.
    pub fn set_background(&mut self, f: impl Fn(&Environment, &mut dyn Canvas) + 'static) {
        self.background = Box::new(f);
    }

    /// Replace the player figure.
    pub fn set_player_draw(
        &mut self,
        f: impl Fn(&Player, &InputState, &mut dyn Canvas) + 'static,
    ) {
        self.player_draw = Box::new(f);
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use scroller_core::canvas::Color;
    use scroller_core::test_helpers::{DrawCommand, RecordingCanvas};

    use super::*;
    use crate::config::PlayerTuning;

    fn session() -> Session {
        Session::initialize(&EnvironmentConfig::new(1600, 600, 40)).unwrap()
    }

    #[test]
    fn initialize_sizes_grid() {
        let s = session();
        assert_eq!(s.grid().columns(), 40);
        assert_eq!(s.grid().rows(), 15);
        assert!(s.grid().is_clear());
        assert_eq!(s.player().w, 80.0);
        assert_eq!(s.player().h, 160.0);
        assert_eq!((s.player().x, s.player().y), (0.0, 0.0));
    }

    #[test]
    fn initialize_rejects_bad_environment() {
        assert!(matches!(
            Session::initialize(&EnvironmentConfig::new(810, 600, 40)),
            Err(ConfigurationError::Misaligned { .. })
        ));
        assert!(matches!(
            Session::initialize(&EnvironmentConfig::default()),
            Err(ConfigurationError::MissingDimensions)
        ));
    }

    #[test]
    fn from_config_applies_player_tuning() {
        let cfg = ScrollerConfig {
            environment: EnvironmentConfig::new(800, 600, 40),
            player: PlayerTuning {
                jump_force: 900.0,
                ..PlayerTuning::default()
            },
        };
        let s = Session::from_config(&cfg).unwrap();
        assert_eq!(s.player().jump_force, 900.0);
        assert_eq!(s.player().friction, 0.75);
    }

    #[test]
    fn key_events_drive_input() {
        let mut s = session();
        s.key_down("ArrowRight");
        s.key_down("Space");
        s.key_down("KeyQ");
        assert!(s.input().right);
        assert!(s.input().jump);
        assert!(!s.input().left);

        s.key_up("Space");
        assert!(!s.input().jump);
    }

    #[test]
    fn releasing_a_direction_resets_walk_cycle() {
        let mut s = session();
        s.player_mut().walking_phase = 300.0;
        s.key_up("Space");
        assert_eq!(s.player().walking_phase, 300.0);
        s.key_up("KeyA");
        assert_eq!(s.player().walking_phase, 0.0);
    }

    #[test]
    fn releasing_a_direction_through_set_input_resets_walk_cycle() {
        let mut s = session();
        s.set_input(Button::Right, true);
        s.player_mut().walking_phase = 300.0;

        s.set_input(Button::Jump, false);
        s.set_input(Button::Left, true);
        assert_eq!(s.player().walking_phase, 300.0);

        s.set_input(Button::Right, false);
        assert_eq!(s.player().walking_phase, 0.0);
        assert!(!s.input().right);
        assert!(s.input().left);
    }

    #[test]
    fn held_right_moves_player_right() {
        let mut s = session();
        s.set_input(Button::Right, true);
        for _ in 0..60 {
            s.advance_frame(16.0);
        }
        assert!(s.player().x > 0.0);
        assert_eq!(s.player().y, 600.0 - 160.0);
    }

    #[test]
    fn collision_callback_fires_through_session() {
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        let mut s = session();
        let floor = s.register_tile_type(
            TileType::solid(|_| {}).with_collision_callback(move |_, _| seen.set(seen.get() + 1)),
        );
        s.grid_mut().fill_row(14, 0..40, Some(floor));
        for _ in 0..60 {
            s.advance_frame(16.0);
        }
        assert_eq!(s.player().y, 560.0 - 160.0);
        assert!(hits.get() > 0);
    }

    #[test]
    fn set_tile_out_of_range_is_rejected() {
        let mut s = session();
        let t = s.register_tile_type(TileType::solid(|_| {}));
        assert!(s.place_tile(14, 39, t));
        assert!(!s.place_tile(15, 0, t));
        assert!(s.set_tile(14, 39, None));
        assert!(s.grid().is_clear());
    }

    #[test]
    fn render_draws_background_player_then_tiles() {
        let mut s = session();
        let block = s.register_tile_type(TileType::solid(|c: &mut dyn Canvas| {
            c.rect(0.0, 0.0, 40.0, 40.0)
        }));
        s.place_tile(2, 3, block);
        s.place_tile(14, 10, block);
        s.set_player_draw(|p, _, c| c.rect(p.x, p.y, p.w, p.h));

        let mut canvas = RecordingCanvas::new(800.0, 600.0);
        s.render(&mut canvas);

        assert_eq!(canvas.commands[0], DrawCommand::Background(Color::SKY));
        // Player sits at the origin so the camera does not move.
        assert_eq!(
            canvas.rect_origins(),
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(120.0, 80.0),
                Vec2::new(400.0, 560.0),
            ]
        );
        assert_eq!(canvas.stack_depth(), 0);
        assert_eq!(canvas.offset(), Vec2::ZERO);
        let pushes = canvas.count(|c| *c == DrawCommand::Push);
        let pops = canvas.count(|c| *c == DrawCommand::Pop);
        assert_eq!(pushes, 3);
        assert_eq!(pushes, pops);
    }

    #[test]
    fn render_applies_camera_offset() {
        let mut s = session();
        let block = s.register_tile_type(TileType::solid(|c: &mut dyn Canvas| {
            c.rect(0.0, 0.0, 40.0, 40.0)
        }));
        s.place_tile(0, 39, block);
        s.player_mut().x = 1520.0;

        let mut canvas = RecordingCanvas::new(800.0, 600.0);
        s.render(&mut canvas);

        // World is 1600 wide; the camera pins to the right edge.
        assert_eq!(s.camera_offset(canvas.viewport()), Vec2::new(-800.0, 0.0));
        let origins = canvas.rect_origins();
        assert_eq!(origins.last(), Some(&Vec2::new(760.0, 0.0)));
    }

    #[test]
    fn custom_background_replaces_default() {
        let mut s = session();
        s.set_background(|_, c| c.background(Color::BLACK));
        let mut canvas = RecordingCanvas::new(800.0, 600.0);
        s.render(&mut canvas);
        assert_eq!(canvas.commands[0], DrawCommand::Background(Color::BLACK));
        assert_eq!(
            canvas.count(|c| matches!(c, DrawCommand::Background(_))),
            1
        );
    }
}
