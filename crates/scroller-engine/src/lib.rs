pub mod camera;
pub mod config;
pub mod driver;
pub mod error;
pub mod grid;
pub mod physics;
pub mod session;
pub mod sprite;
pub mod tiles;

pub use config::{Environment, EnvironmentConfig, PlayerTuning, ScrollerConfig};
pub use driver::FrameDriver;
pub use error::ConfigurationError;
pub use grid::WorldGrid;
pub use physics::{Aabb, Player, tick_player};
pub use session::Session;
pub use tiles::{
    Axis, CollisionKind, Footprint, TileCatalog, TileContact, TileId, TileProperties, TileType,
};
