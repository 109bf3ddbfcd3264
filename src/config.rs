//! Screen geometry and sprite dimensions
//!
//! The simulation never looks at pixels, only at the bounding boxes of the
//! sprites a renderer will draw. Those boxes plus the screen and grid size
//! are the whole configuration surface, loadable from JSON.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};

/// Bounding sizes of every sprite the simulation places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteDims {
    /// Player ship
    pub ship: Vec2,
    /// Player shot
    pub shot: Vec2,
    /// One entry per planet sprite variant
    pub planets: Vec<Vec2>,
    /// Width / height of the asteroid frames (height is rolled per spawn)
    pub asteroid_aspect: f32,
    pub ufo: Vec2,
    pub heart: Vec2,
}

impl Default for SpriteDims {
    fn default() -> Self {
        Self {
            ship: Vec2::new(52.0, 35.0),
            shot: Vec2::new(28.0, 18.0),
            planets: vec![
                Vec2::new(40.0, 40.0),
                Vec2::new(44.0, 40.0),
                Vec2::new(40.0, 40.0),
                Vec2::new(52.0, 40.0),
                Vec2::new(40.0, 40.0),
                Vec2::new(46.0, 40.0),
                Vec2::new(40.0, 40.0),
            ],
            asteroid_aspect: 1.0,
            ufo: Vec2::new(56.0, 34.0),
            heart: Vec2::new(18.0, 14.0),
        }
    }
}

/// Fixed screen and grid geometry plus sprite sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_w: f32,
    pub screen_h: f32,
    /// Corridor grid cell size
    pub block: f32,
    pub sprites: SpriteDims,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_w: SCREEN_W,
            screen_h: SCREEN_H,
            block: BLOCK,
            sprites: SpriteDims::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Corridor grid rows that fit on screen
    pub fn rows(&self) -> i32 {
        (self.screen_h / self.block) as i32
    }

    /// Corridor columns kept alive (screen width plus a few off-screen)
    pub fn cols(&self) -> usize {
        (self.screen_w / self.block) as usize + CORRIDOR_EXTRA_COLS
    }

    /// Check every dimension the simulation relies on
    pub fn validate(&self) -> Result<()> {
        positive("screen_w", self.screen_w)?;
        positive("screen_h", self.screen_h)?;
        positive("block", self.block)?;

        let s = &self.sprites;
        size("ship", s.ship)?;
        size("shot", s.shot)?;
        size("ufo", s.ufo)?;
        size("heart", s.heart)?;
        positive("asteroid_aspect", s.asteroid_aspect)?;
        if s.planets.is_empty() {
            return Err(ConfigError::NoPlanetSprites);
        }
        for planet in &s.planets {
            size("planet", *planet)?;
        }

        let required = MAX_CORRIDOR_H + 1;
        if self.rows() < required {
            return Err(ConfigError::GridTooSmall {
                rows: self.rows(),
                required,
            });
        }

        let corridor = MIN_CORRIDOR_H as f32 * self.block;
        if s.ship.y >= corridor {
            return Err(ConfigError::SpriteTooTall {
                what: "ship",
                height: s.ship.y,
                corridor,
            });
        }
        Ok(())
    }
}

fn positive(what: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { what, value })
    }
}

fn size(what: &'static str, dims: Vec2) -> Result<()> {
    positive(what, dims.x)?;
    positive(what, dims.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rows(), 30);
        assert_eq!(config.cols(), 53);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "screen_w": 960.0 }"#).unwrap();
        assert_eq!(config.screen_w, 960.0);
        assert_eq!(config.screen_h, SCREEN_H);
        assert_eq!(config.sprites, SpriteDims::default());
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_sprite_is_rejected() {
        let json = r#"{ "sprites": { "ufo": [0.0, 34.0] } }"#;
        let err = GameConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDimension { what: "ufo", .. }));
    }

    #[test]
    fn test_empty_planets_rejected() {
        let json = r#"{ "sprites": { "planets": [] } }"#;
        assert!(matches!(
            GameConfig::from_json(json),
            Err(ConfigError::NoPlanetSprites)
        ));
    }

    #[test]
    fn test_short_screen_rejected() {
        let config = GameConfig {
            screen_h: 300.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall { rows: 12, required: 17 })
        ));
    }

    #[test]
    fn test_giant_ship_rejected() {
        let mut config = GameConfig::default();
        config.sprites.ship = Vec2::new(50.0, 400.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpriteTooTall { what: "ship", .. })
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
