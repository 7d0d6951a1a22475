use thiserror::Error;

/// Reasons an environment cannot start a session.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("environment width/height is not set")]
    MissingDimensions,

    #[error("environment tile size is not set")]
    MissingTileSize,

    #[error("environment width, height and tile size must be positive")]
    ZeroDimension,

    #[error(
        "environment bounds {width}x{height} do not line up with tile size {tile_size}"
    )]
    Misaligned {
        width: u32,
        height: u32,
        tile_size: u32,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
