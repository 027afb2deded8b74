//! Deterministic galaxy generation from a string identifier.
//!
//! The identifier is hashed into a seed, the seed drives a [`SeededRng`],
//! and the galaxy is built in a single pass. Draw order is part of the
//! contract: for each system, `x`, then `y`, then the planet count, then
//! one draw per planet for its type. Reordering draws changes every galaxy
//! after the first affected system and breaks stored reference data.
//!
//! ```
//! use stargate_logic::generation::generate_galaxy;
//!
//! let galaxy = generate_galaxy("sys-7").unwrap();
//! assert_eq!(galaxy.seed, "sys-7");
//! assert_eq!(galaxy.star_systems[0].id, "sys-0");
//! assert_eq!(galaxy.star_systems[0].planets[0].name, "Planet A");
//! ```

use thiserror::Error;

use crate::config::{validate_config, ConfigError, GalaxyConfig, MAX_NAMED_PLANETS};
use crate::galaxy::{Galaxy, Planet, PlanetType, Position, StarSystem};
use crate::hash::hash_identifier;
use crate::rng::SeededRng;
use crate::schema::{validate_galaxy, SchemaValidationError};

/// Errors from generating with a caller-supplied config.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("invalid galaxy config: {}", describe(.0))]
    InvalidConfig(Vec<ConfigError>),
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
}

fn describe(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Generate the canonical galaxy for `id`.
///
/// Pure: the same `id` always yields the same galaxy. A schema failure
/// means the generator itself is broken and is returned unmodified.
pub fn generate_galaxy(id: &str) -> Result<Galaxy, SchemaValidationError> {
    let galaxy = build_galaxy(id, &GalaxyConfig::default());
    check(galaxy)
}

/// Generate a galaxy for `id` with custom bounds.
///
/// With `GalaxyConfig::default()` this is identical to [`generate_galaxy`].
/// The config is validated before any draw is made.
pub fn generate_galaxy_with(id: &str, config: &GalaxyConfig) -> Result<Galaxy, GenerationError> {
    let errors = validate_config(config);
    if !errors.is_empty() {
        return Err(GenerationError::InvalidConfig(errors));
    }
    let galaxy = build_galaxy(id, config);
    Ok(check(galaxy)?)
}

/// `Planet A` for index 0 through `Planet Z` for index 25.
///
/// Returns `None` past the alphabet; configs that could reach it are
/// rejected by [`validate_config`].
pub fn planet_name(index: u32) -> Option<String> {
    if index >= MAX_NAMED_PLANETS {
        return None;
    }
    let letter = char::from(b'A' + index as u8);
    Some(format!("Planet {letter}"))
}

fn check(galaxy: Galaxy) -> Result<Galaxy, SchemaValidationError> {
    if let Err(e) = validate_galaxy(&galaxy) {
        log::error!("generated galaxy {:?} failed validation: {}", galaxy.seed, e);
        return Err(e);
    }
    log::debug!(
        "generated galaxy {:?}: {} systems, {} planets",
        galaxy.seed,
        galaxy.star_systems.len(),
        galaxy.planet_count()
    );
    Ok(galaxy)
}

/// Build without validating. `config` must already be valid.
fn build_galaxy(id: &str, config: &GalaxyConfig) -> Galaxy {
    let mut rng = SeededRng::new(hash_identifier(id));

    let system_count = rng.next_below(config.star_system_span()) + config.min_star_systems;
    let star_systems = (0..system_count)
        .map(|i| build_system(i, config, &mut rng))
        .collect();

    Galaxy {
        seed: id.to_string(),
        star_systems,
    }
}

fn build_system(index: u32, config: &GalaxyConfig, rng: &mut SeededRng) -> StarSystem {
    let id = format!("sys-{index}");
    let position = Position {
        x: rng.next_below(config.grid_size) as i32,
        y: rng.next_below(config.grid_size) as i32,
    };
    let planet_count = rng.next_below(config.planet_span()) + config.min_planets;

    let planets = (0..planet_count)
        .map(|j| Planet {
            id: format!("{id}-planet-{j}"),
            name: planet_name(j).unwrap_or_default(),
            planet_type: if rng.next_f64() > config.terrestrial_threshold {
                PlanetType::Terrestrial
            } else {
                PlanetType::GasGiant
            },
            resources: Vec::new(),
            inhabitants: Vec::new(),
            stargate: None,
        })
        .collect();

    StarSystem {
        name: format!("System {}", index + 1),
        id,
        position,
        planets,
        stargates: Vec::new(),
    }
}
