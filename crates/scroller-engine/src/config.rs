use glam::Vec2;
use serde::{Deserialize, Serialize};

use scroller_core::canvas::Color;

use crate::error::ConfigurationError;

/// Default horizontal velocity multiplier applied per grounded frame.
pub const FRICTION: f32 = 0.75;
/// Downward acceleration (px/s^2).
pub const GRAVITY: f32 = 2500.0;
/// Horizontal velocity added per frame while a direction is held (px/s).
pub const SPEED: f32 = 50.0;
/// Upward velocity set by a jump (px/s).
pub const JUMP_FORCE: f32 = 600.0;

/// Raw environment settings as written by the host or a TOML file.
///
/// Dimensions are optional here so that an unset value is reported as a
/// configuration error instead of silently defaulting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub tile_size: Option<u32>,
    /// Treat the bottom edge of the world as a floor.
    pub bottom_collision: bool,
    /// Color used by the default background clear.
    pub background: Color,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            tile_size: None,
            bottom_collision: true,
            background: Color::SKY,
        }
    }
}

impl EnvironmentConfig {
    pub fn new(width: u32, height: u32, tile_size: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            tile_size: Some(tile_size),
            ..Self::default()
        }
    }

    /// Check the settings and freeze them into an [`Environment`].
    pub fn validate(&self) -> Result<Environment, ConfigurationError> {
        let (Some(width), Some(height)) = (self.width, self.height) else {
            return Err(ConfigurationError::MissingDimensions);
        };
        let Some(tile_size) = self.tile_size else {
            return Err(ConfigurationError::MissingTileSize);
        };
        if width == 0 || height == 0 || tile_size == 0 {
            return Err(ConfigurationError::ZeroDimension);
        }
        if width % tile_size != 0 || height % tile_size != 0 {
            return Err(ConfigurationError::Misaligned {
                width,
                height,
                tile_size,
            });
        }
        Ok(Environment {
            width,
            height,
            tile_size,
            bottom_collision: self.bottom_collision,
            background: self.background,
        })
    }
}

/// Validated, immutable world bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
    pub bottom_collision: bool,
    pub background: Color,
}

impl Environment {
    /// Number of tile columns (`width / tile_size`).
    pub fn columns(&self) -> usize {
        (self.width / self.tile_size) as usize
    }

    /// Number of tile rows (`height / tile_size`).
    pub fn rows(&self) -> usize {
        (self.height / self.tile_size) as usize
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn tile_size_f32(&self) -> f32 {
        self.tile_size as f32
    }
}

/// Player tuning constants, loadable from TOML.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub friction: f32,
    pub gravity: f32,
    pub speed: f32,
    pub jump_force: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            gravity: GRAVITY,
            speed: SPEED,
            jump_force: JUMP_FORCE,
        }
    }
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollerConfig {
    pub environment: EnvironmentConfig,
    pub player: PlayerTuning,
}

impl ScrollerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigurationError> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from the file named by `SCROLLER_CONFIG`, or
    /// `config/scroller.toml`, then apply env var overrides. Falls back to
    /// defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("SCROLLER_CONFIG")
            .unwrap_or_else(|_| "config/scroller.toml".to_string());
        let mut config = Self::load_from_path(&path);
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Read and parse `path`, falling back to defaults.
    pub fn load_from_path(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from {path}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => {
                tracing::info!("No {path} found, using defaults");
                Self::default()
            },
        }
    }

    /// Apply `SCROLLER_*` overrides looked up through `var`. Values that do
    /// not parse are ignored.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SCROLLER_WIDTH")
            && let Ok(n) = val.parse::<u32>()
        {
            self.environment.width = Some(n);
        }
        if let Some(val) = var("SCROLLER_HEIGHT")
            && let Ok(n) = val.parse::<u32>()
        {
            self.environment.height = Some(n);
        }
        if let Some(val) = var("SCROLLER_TILE_SIZE")
            && let Ok(n) = val.parse::<u32>()
        {
            self.environment.tile_size = Some(n);
        }
        if let Some(val) = var("SCROLLER_BOTTOM_COLLISION")
            && let Ok(b) = val.parse::<bool>()
        {
            self.environment.bottom_collision = b;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn default_player_tuning() {
        let t = PlayerTuning::default();
        assert_eq!(t.friction, 0.75);
        assert_eq!(t.gravity, 2500.0);
        assert_eq!(t.speed, 50.0);
        assert_eq!(t.jump_force, 600.0);
    }

    #[test]
    fn validate_accepts_aligned_bounds() {
        let env = EnvironmentConfig::new(800, 600, 40).validate().unwrap();
        assert_eq!(env.columns(), 20);
        assert_eq!(env.rows(), 15);
        assert!(env.bottom_collision);
        assert_eq!(env.background, Color::SKY);
    }

    #[test]
    fn validate_rejects_misaligned_width() {
        let err = EnvironmentConfig::new(801, 600, 40).validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::Misaligned {
                width: 801,
                height: 600,
                tile_size: 40
            }
        ));
    }

    #[test]
    fn validate_rejects_misaligned_height() {
        let err = EnvironmentConfig::new(800, 610, 40).validate().unwrap_err();
        assert!(matches!(err, ConfigurationError::Misaligned { .. }));
    }

    #[test]
    fn validate_rejects_unset_dimensions() {
        let cfg = EnvironmentConfig {
            height: None,
            ..EnvironmentConfig::new(800, 600, 40)
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigurationError::MissingDimensions)
        ));
        assert!(matches!(
            EnvironmentConfig::default().validate(),
            Err(ConfigurationError::MissingDimensions)
        ));
    }

    #[test]
    fn validate_rejects_unset_tile_size() {
        let cfg = EnvironmentConfig {
            tile_size: None,
            ..EnvironmentConfig::new(800, 600, 40)
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigurationError::MissingTileSize)
        ));
    }

    #[test]
    fn validate_rejects_zero_tile_size() {
        assert!(matches!(
            EnvironmentConfig::new(800, 600, 0).validate(),
            Err(ConfigurationError::ZeroDimension)
        ));
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[environment]
width = 1600
height = 480
tile_size = 32
bottom_collision = false
background = { r = 0, g = 0, b = 40 }

[player]
friction = 0.8
jump_force = 700.0
"#;
        let cfg = ScrollerConfig::from_toml_str(toml_str).unwrap();
        let env = cfg.environment.validate().unwrap();
        assert_eq!(env.columns(), 50);
        assert_eq!(env.rows(), 15);
        assert!(!env.bottom_collision);
        assert_eq!(env.background, Color::rgb(0, 0, 40));
        assert_eq!(cfg.player.friction, 0.8);
        assert_eq!(cfg.player.jump_force, 700.0);
        // Unspecified fields keep their defaults
        assert_eq!(cfg.player.gravity, GRAVITY);
        assert_eq!(cfg.player.speed, SPEED);
    }

    #[test]
    fn parse_error_is_reported() {
        let err = ScrollerConfig::from_toml_str("[environment]\nwidth = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigurationError::Parse(_)));
    }

    #[test]
    fn shipped_config_is_valid() {
        let cfg =
            ScrollerConfig::from_toml_str(include_str!("../../../config/scroller.toml")).unwrap();
        let env = cfg.environment.validate().unwrap();
        assert_eq!(env.columns(), 40);
        assert_eq!(cfg.player, PlayerTuning::default());
    }

    #[test]
    fn env_overrides_replace_environment_fields() {
        let vars: HashMap<&str, &str> = [
            ("SCROLLER_WIDTH", "1200"),
            ("SCROLLER_HEIGHT", "480"),
            ("SCROLLER_TILE_SIZE", "not-a-number"),
            ("SCROLLER_BOTTOM_COLLISION", "false"),
        ]
        .into_iter()
        .collect();

        let mut cfg = ScrollerConfig::from_toml_str(
            "[environment]\nwidth = 800\nheight = 600\ntile_size = 40",
        )
        .unwrap();
        cfg.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(cfg.environment.width, Some(1200));
        assert_eq!(cfg.environment.height, Some(480));
        // Unparseable values leave the file value alone
        assert_eq!(cfg.environment.tile_size, Some(40));
        assert!(!cfg.environment.bottom_collision);
    }

    #[test]
    fn no_overrides_keeps_config() {
        let mut cfg = ScrollerConfig::default();
        cfg.apply_overrides(|_| None);
        assert_eq!(cfg.environment.width, None);
        assert!(cfg.environment.bottom_collision);
    }

    #[test]
    fn load_from_path_reads_file() {
        let path =
            std::env::temp_dir().join(format!("scroller-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[environment]\nwidth = 320\nheight = 240\ntile_size = 16\n",
        )
        .unwrap();

        let cfg = ScrollerConfig::load_from_path(path.to_str().unwrap());
        std::fs::remove_file(&path).unwrap();

        let env = cfg.environment.validate().unwrap();
        assert_eq!((env.columns(), env.rows()), (20, 15));
    }

    #[test]
    fn load_from_path_falls_back_to_defaults() {
        let missing = ScrollerConfig::load_from_path("/nonexistent/scroller.toml");
        assert_eq!(missing.environment.width, None);
        assert_eq!(missing.player, PlayerTuning::default());

        let path =
            std::env::temp_dir().join(format!("scroller-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[environment\nwidth = ").unwrap();
        let broken = ScrollerConfig::load_from_path(path.to_str().unwrap());
        std::fs::remove_file(&path).unwrap();
        assert_eq!(broken.environment.width, None);
    }
}
