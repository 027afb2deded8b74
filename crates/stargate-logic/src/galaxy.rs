//! Galaxy data model shared between the generator and its callers.
//!
//! The serialized form is the JSON the game's API serves: camelCase keys,
//! planet types as `"terrestrial"` / `"gas giant"`, and an absent
//! `stargate` when a planet has no gate. List fields default to empty on
//! input so sparse documents still parse.

use serde::{Deserialize, Serialize};

/// A generated galaxy. Identified by the seed string it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Galaxy {
    pub seed: String,
    pub star_systems: Vec<StarSystem>,
}

impl Galaxy {
    /// Total number of planets across all star systems.
    pub fn planet_count(&self) -> usize {
        self.star_systems.iter().map(|s| s.planets.len()).sum()
    }

    /// Look up a star system by id.
    pub fn system(&self, id: &str) -> Option<&StarSystem> {
        self.star_systems.iter().find(|s| s.id == id)
    }
}

/// Position on the galaxy's 2D grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarSystem {
    /// `sys-<index>`, unique within the galaxy.
    pub id: String,
    pub name: String,
    pub position: Position,
    pub planets: Vec<Planet>,
    #[serde(default)]
    pub stargates: Vec<StargateLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    /// `<system id>-planet-<index>`, unique within the system.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub planet_type: PlanetType,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub inhabitants: Vec<Inhabitant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stargate: Option<Stargate>,
}

/// Planet classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetType {
    #[serde(rename = "terrestrial")]
    Terrestrial,
    #[serde(rename = "gas giant")]
    GasGiant,
}

impl PlanetType {
    pub fn label(self) -> &'static str {
        match self {
            PlanetType::Terrestrial => "terrestrial",
            PlanetType::GasGiant => "gas giant",
        }
    }
}

/// A harvestable resource deposit on a planet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub kind: String,
    pub quantity: u32,
}

/// A population living on a planet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inhabitant {
    pub species: String,
    pub population: u64,
}

/// A planet's gate, reachable by dialing its address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stargate {
    pub address: String,
}

/// A route from one star system to another in the same galaxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StargateLink {
    pub target_system_id: String,
}
