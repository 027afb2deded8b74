//! Pure galaxy generation logic for Stargate.
//!
//! This crate contains the game's procedural content logic, independent
//! of any database, HTTP layer, or renderer. Functions take plain data and
//! return results, so the same galaxy comes out of a Workers backend, a
//! native CLI tool, or a test.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Generator bounds (system/planet counts, grid size) and validation |
//! | [`galaxy`] | Galaxy, star system, and planet data model (JSON wire format) |
//! | [`generation`] | Deterministic galaxy generation from a string identifier |
//! | [`hash`] | Identifier → 32-bit seed hashing |
//! | [`rng`] | Seeded mulberry32 random source |
//! | [`schema`] | Runtime shape validation and JSON parsing |

pub mod config;
pub mod galaxy;
pub mod generation;
pub mod hash;
pub mod rng;
pub mod schema;

pub use galaxy::{Galaxy, Planet, PlanetType, Position, StarSystem};
pub use generation::{generate_galaxy, generate_galaxy_with, GenerationError};
pub use schema::SchemaValidationError;
