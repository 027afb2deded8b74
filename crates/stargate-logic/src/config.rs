//! Generator bounds: how many systems, how many planets, how big the grid.
//!
//! `GalaxyConfig::default()` reproduces the canonical galaxy layout, so
//! galaxies generated with it match stored reference data draw for draw.
//! Custom configs go through `validate_config` before any draw is made.
//!
//! ```
//! use stargate_logic::config::{validate_config, GalaxyConfig};
//!
//! let mut config = GalaxyConfig::default();
//! config.max_planets = 12;
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Planets are named `Planet A` through `Planet Z`.
pub const MAX_NAMED_PLANETS: u32 = 26;

/// Upper bound on star systems per galaxy, keeping generation bounded.
pub const MAX_STAR_SYSTEMS: u32 = 1000;

/// Keys are camelCase, like the galaxy JSON (`maxPlanets`, `gridSize`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalaxyConfig {
    /// Fewest star systems in a galaxy.
    pub min_star_systems: u32,
    /// Most star systems in a galaxy (inclusive).
    pub max_star_systems: u32,
    /// Fewest planets per system.
    pub min_planets: u32,
    /// Most planets per system (inclusive, at most 26).
    pub max_planets: u32,
    /// Positions are drawn from `0..grid_size` on both axes.
    pub grid_size: u32,
    /// A planet is terrestrial when its draw is strictly above this.
    pub terrestrial_threshold: f64,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            min_star_systems: 3,
            max_star_systems: 10,
            min_planets: 1,
            max_planets: 6,
            grid_size: 1000,
            terrestrial_threshold: 0.5,
        }
    }
}

impl GalaxyConfig {
    /// Number of distinct star-system counts the generator can draw.
    ///
    /// Saturates at `u32::MAX` for ranges covering the whole `u32` domain;
    /// `validate_config` rejects those before generation.
    pub fn star_system_span(&self) -> u32 {
        span(self.min_star_systems, self.max_star_systems)
    }

    /// Number of distinct planet counts the generator can draw.
    pub fn planet_span(&self) -> u32 {
        span(self.min_planets, self.max_planets)
    }
}

fn span(min: u32, max: u32) -> u32 {
    max.saturating_sub(min).saturating_add(1)
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("a galaxy needs at least one star system")]
    NoStarSystems,
    #[error("star system range is inverted: min {min} > max {max}")]
    StarSystemRangeInverted { min: u32, max: u32 },
    #[error("at most 1000 star systems per galaxy, got {0}")]
    TooManyStarSystems(u32),
    #[error("a star system needs at least one planet")]
    NoPlanets,
    #[error("planet range is inverted: min {min} > max {max}")]
    PlanetRangeInverted { min: u32, max: u32 },
    #[error("at most 26 planets per system can be named, got {0}")]
    TooManyPlanets(u32),
    #[error("grid size must be positive")]
    EmptyGrid,
    #[error("grid size {0} does not fit signed 32-bit coordinates")]
    GridTooLarge(u32),
    #[error("terrestrial threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),
}

/// Validate a galaxy configuration, returning all errors found.
pub fn validate_config(config: &GalaxyConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.min_star_systems == 0 {
        errors.push(ConfigError::NoStarSystems);
    }
    if config.min_star_systems > config.max_star_systems {
        errors.push(ConfigError::StarSystemRangeInverted {
            min: config.min_star_systems,
            max: config.max_star_systems,
        });
    }
    if config.max_star_systems > MAX_STAR_SYSTEMS {
        errors.push(ConfigError::TooManyStarSystems(config.max_star_systems));
    }
    if config.min_planets == 0 {
        errors.push(ConfigError::NoPlanets);
    }
    if config.min_planets > config.max_planets {
        errors.push(ConfigError::PlanetRangeInverted {
            min: config.min_planets,
            max: config.max_planets,
        });
    }
    if config.max_planets > MAX_NAMED_PLANETS {
        errors.push(ConfigError::TooManyPlanets(config.max_planets));
    }
    if config.grid_size == 0 {
        errors.push(ConfigError::EmptyGrid);
    }
    if config.grid_size > i32::MAX as u32 {
        errors.push(ConfigError::GridTooLarge(config.grid_size));
    }
    if !(0.0..=1.0).contains(&config.terrestrial_threshold) {
        errors.push(ConfigError::InvalidThreshold(config.terrestrial_threshold));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let errors = validate_config(&GalaxyConfig::default());
        assert!(errors.is_empty(), "default config should be valid: {errors:?}");
    }

    #[test]
    fn default_spans_match_canonical_layout() {
        let config = GalaxyConfig::default();
        assert_eq!(config.star_system_span(), 8);
        assert_eq!(config.planet_span(), 6);
    }

    #[test]
    fn zero_minimums_rejected() {
        let config = GalaxyConfig {
            min_star_systems: 0,
            min_planets: 0,
            ..GalaxyConfig::default()
        };
        let errors = validate_config(&config);
        assert!(errors.contains(&ConfigError::NoStarSystems));
        assert!(errors.contains(&ConfigError::NoPlanets));
    }

    #[test]
    fn inverted_ranges_rejected() {
        let config = GalaxyConfig {
            min_star_systems: 5,
            max_star_systems: 4,
            min_planets: 3,
            max_planets: 2,
            ..GalaxyConfig::default()
        };
        let errors = validate_config(&config);
        assert!(errors.contains(&ConfigError::StarSystemRangeInverted { min: 5, max: 4 }));
        assert!(errors.contains(&ConfigError::PlanetRangeInverted { min: 3, max: 2 }));
    }

    #[test]
    fn star_system_cap_enforced() {
        let mut config = GalaxyConfig::default();
        config.max_star_systems = MAX_STAR_SYSTEMS;
        assert!(validate_config(&config).is_empty());
        config.min_star_systems = 2_000_000;
        config.max_star_systems = u32::MAX;
        assert_eq!(
            validate_config(&config),
            vec![ConfigError::TooManyStarSystems(u32::MAX)]
        );
    }

    #[test]
    fn spans_saturate_on_full_range() {
        let config = GalaxyConfig {
            min_star_systems: 0,
            max_star_systems: u32::MAX,
            min_planets: 0,
            max_planets: u32::MAX,
            ..GalaxyConfig::default()
        };
        assert_eq!(config.star_system_span(), u32::MAX);
        assert_eq!(config.planet_span(), u32::MAX);
        let errors = validate_config(&config);
        assert!(errors.contains(&ConfigError::TooManyStarSystems(u32::MAX)));
        assert!(errors.contains(&ConfigError::TooManyPlanets(u32::MAX)));
    }

    #[test]
    fn inverted_range_span_is_one() {
        let config = GalaxyConfig {
            min_planets: 9,
            max_planets: 2,
            ..GalaxyConfig::default()
        };
        assert_eq!(config.planet_span(), 1);
    }

    #[test]
    fn planet_letters_bound_enforced() {
        let mut config = GalaxyConfig::default();
        config.max_planets = 26;
        assert!(validate_config(&config).is_empty());
        config.max_planets = 27;
        assert_eq!(
            validate_config(&config),
            vec![ConfigError::TooManyPlanets(27)]
        );
    }

    #[test]
    fn grid_bounds() {
        let mut config = GalaxyConfig::default();
        config.grid_size = 0;
        assert!(validate_config(&config).contains(&ConfigError::EmptyGrid));
        config.grid_size = u32::MAX;
        assert!(validate_config(&config).contains(&ConfigError::GridTooLarge(u32::MAX)));
    }

    #[test]
    fn threshold_range() {
        let mut config = GalaxyConfig::default();
        config.terrestrial_threshold = 1.5;
        assert!(validate_config(&config).contains(&ConfigError::InvalidThreshold(1.5)));
        config.terrestrial_threshold = f64::NAN;
        assert!(validate_config(&config)
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidThreshold(_))));
        config.terrestrial_threshold = 0.0;
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: GalaxyConfig = serde_json::from_str(r#"{"maxPlanets": 12}"#).unwrap();
        assert_eq!(config.max_planets, 12);
        assert_eq!(config.min_star_systems, 3);
        assert_eq!(config.grid_size, 1000);
    }

    #[test]
    fn serializes_camel_case_keys() {
        let json = serde_json::to_value(GalaxyConfig::default()).unwrap();
        assert_eq!(json["minStarSystems"], 3);
        assert_eq!(json["terrestrialThreshold"], 0.5);
        assert!(json.get("max_planets").is_none());
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(
            ConfigError::TooManyPlanets(30).to_string(),
            "at most 26 planets per system can be named, got 30"
        );
    }
}
