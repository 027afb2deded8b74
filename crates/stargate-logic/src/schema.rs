//! Runtime shape checks for galaxies.
//!
//! The Rust types already pin down field types; `validate_galaxy` checks
//! what the types cannot: non-empty identifiers, id uniqueness within each
//! scope, id prefixes, and that stargate links point at real systems.
//! Every problem found is reported, each with a dotted path to the field.
//!
//! `parse_galaxy` is the entry point for untrusted JSON: it applies the
//! serde defaults and then runs the same validation.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::galaxy::{Galaxy, Planet, StarSystem};

/// One offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Dotted path, e.g. `starSystems[2].planets[0].id`.
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A galaxy did not satisfy the declared shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("galaxy failed schema validation ({} issue(s)): {}", .issues.len(), join_issues(.issues))]
pub struct SchemaValidationError {
    pub issues: Vec<SchemaIssue>,
}

fn join_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors from parsing a galaxy out of JSON.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed galaxy JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
}

/// Check a galaxy against the schema.
pub fn validate_galaxy(galaxy: &Galaxy) -> Result<(), SchemaValidationError> {
    let mut issues = Vec::new();

    let system_ids: HashSet<&str> = galaxy.star_systems.iter().map(|s| s.id.as_str()).collect();
    let mut seen_systems = HashSet::new();

    for (i, system) in galaxy.star_systems.iter().enumerate() {
        let path = format!("starSystems[{i}]");
        if system.id.is_empty() {
            push(&mut issues, format!("{path}.id"), "must not be empty");
        } else if !seen_systems.insert(system.id.as_str()) {
            push(
                &mut issues,
                format!("{path}.id"),
                format!("duplicate star system id `{}`", system.id),
            );
        }
        if system.name.trim().is_empty() {
            push(&mut issues, format!("{path}.name"), "must not be empty");
        }
        check_links(system, &system_ids, &path, &mut issues);
        check_planets(system, &path, &mut issues);
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError { issues })
    }
}

/// Parse untrusted JSON into a galaxy, applying defaults, then validate it.
pub fn parse_galaxy(json: &str) -> Result<Galaxy, ParseError> {
    let galaxy: Galaxy = serde_json::from_str(json)?;
    validate_galaxy(&galaxy)?;
    Ok(galaxy)
}

fn check_links(
    system: &StarSystem,
    system_ids: &HashSet<&str>,
    path: &str,
    issues: &mut Vec<SchemaIssue>,
) {
    for (k, link) in system.stargates.iter().enumerate() {
        let field = format!("{path}.stargates[{k}].targetSystemId");
        let target = link.target_system_id.as_str();
        if target == system.id {
            push(issues, field, "a system cannot link to itself");
        } else if !system_ids.contains(target) {
            push(issues, field, format!("unknown star system `{target}`"));
        }
    }
}

fn check_planets(system: &StarSystem, path: &str, issues: &mut Vec<SchemaIssue>) {
    let prefix = format!("{}-", system.id);
    let mut seen = HashSet::new();

    for (j, planet) in system.planets.iter().enumerate() {
        let path = format!("{path}.planets[{j}]");
        if planet.id.is_empty() {
            push(issues, format!("{path}.id"), "must not be empty");
        } else {
            if !seen.insert(planet.id.as_str()) {
                push(
                    issues,
                    format!("{path}.id"),
                    format!("duplicate planet id `{}`", planet.id),
                );
            }
            if !planet.id.starts_with(&prefix) {
                push(
                    issues,
                    format!("{path}.id"),
                    format!("must start with `{prefix}`"),
                );
            }
        }
        if planet.name.trim().is_empty() {
            push(issues, format!("{path}.name"), "must not be empty");
        }
        check_planet_contents(planet, &path, issues);
    }
}

fn check_planet_contents(planet: &Planet, path: &str, issues: &mut Vec<SchemaIssue>) {
    for (r, resource) in planet.resources.iter().enumerate() {
        if resource.kind.trim().is_empty() {
            push(issues, format!("{path}.resources[{r}].kind"), "must not be empty");
        }
    }
    for (h, inhabitant) in planet.inhabitants.iter().enumerate() {
        if inhabitant.species.trim().is_empty() {
            push(
                issues,
                format!("{path}.inhabitants[{h}].species"),
                "must not be empty",
            );
        }
    }
    if let Some(gate) = &planet.stargate {
        if gate.address.trim().is_empty() {
            push(issues, format!("{path}.stargate.address"), "must not be empty");
        }
    }
}

fn push(issues: &mut Vec<SchemaIssue>, path: String, message: impl Into<String>) {
    issues.push(SchemaIssue {
        path,
        message: message.into(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::{
        Inhabitant, PlanetType, Position, Resource, Stargate, StargateLink,
    };

    fn planet(id: &str, name: &str) -> Planet {
        Planet {
            id: id.into(),
            name: name.into(),
            planet_type: PlanetType::Terrestrial,
            resources: vec![],
            inhabitants: vec![],
            stargate: None,
        }
    }

    fn system(id: &str, planets: Vec<Planet>) -> StarSystem {
        StarSystem {
            id: id.into(),
            name: format!("System {id}"),
            position: Position { x: 0, y: 0 },
            planets,
            stargates: vec![],
        }
    }

    fn valid_galaxy() -> Galaxy {
        Galaxy {
            seed: "chulak".into(),
            star_systems: vec![
                system("sys-0", vec![planet("sys-0-planet-0", "Planet A")]),
                system(
                    "sys-1",
                    vec![
                        planet("sys-1-planet-0", "Planet A"),
                        planet("sys-1-planet-1", "Planet B"),
                    ],
                ),
            ],
        }
    }

    fn paths(err: &SchemaValidationError) -> Vec<&str> {
        err.issues.iter().map(|i| i.path.as_str()).collect()
    }

    #[test]
    fn valid_galaxy_passes() {
        assert!(validate_galaxy(&valid_galaxy()).is_ok());
    }

    #[test]
    fn empty_galaxy_passes_shape_checks() {
        let galaxy = Galaxy {
            seed: String::new(),
            star_systems: vec![],
        };
        assert!(validate_galaxy(&galaxy).is_ok());
    }

    #[test]
    fn duplicate_system_id_reported() {
        let mut galaxy = valid_galaxy();
        galaxy.star_systems[1].id = "sys-0".into();
        galaxy.star_systems[1].planets = vec![planet("sys-0-planet-9", "Planet J")];
        let err = validate_galaxy(&galaxy).unwrap_err();
        assert_eq!(paths(&err), vec!["starSystems[1].id"]);
        assert!(err.issues[0].message.contains("duplicate"));
    }

    #[test]
    fn duplicate_planet_id_reported() {
        let mut galaxy = valid_galaxy();
        galaxy.star_systems[1].planets[1].id = "sys-1-planet-0".into();
        let err = validate_galaxy(&galaxy).unwrap_err();
        assert_eq!(paths(&err), vec!["starSystems[1].planets[1].id"]);
    }

    #[test]
    fn planet_id_must_carry_system_prefix() {
        let mut galaxy = valid_galaxy();
        // Uniqueness is per system, so only the prefix rule fires here.
        galaxy.star_systems[1].planets[0].id = "sys-0-planet-0".into();
        let err = validate_galaxy(&galaxy).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert!(err.issues[0].message.contains("must start with `sys-1-`"));
    }

    #[test]
    fn collects_every_issue() {
        let mut galaxy = valid_galaxy();
        galaxy.star_systems[0].name = " ".into();
        galaxy.star_systems[0].planets[0].name = String::new();
        galaxy.star_systems[1].id = String::new();
        let err = validate_galaxy(&galaxy).unwrap_err();
        let p = paths(&err);
        assert!(p.contains(&"starSystems[0].name"));
        assert!(p.contains(&"starSystems[0].planets[0].name"));
        assert!(p.contains(&"starSystems[1].id"));
    }

    #[test]
    fn dangling_and_self_links_rejected() {
        let mut galaxy = valid_galaxy();
        galaxy.star_systems[0].stargates = vec![
            StargateLink {
                target_system_id: "sys-1".into(),
            },
            StargateLink {
                target_system_id: "sys-7".into(),
            },
            StargateLink {
                target_system_id: "sys-0".into(),
            },
        ];
        let err = validate_galaxy(&galaxy).unwrap_err();
        assert_eq!(
            paths(&err),
            vec![
                "starSystems[0].stargates[1].targetSystemId",
                "starSystems[0].stargates[2].targetSystemId",
            ]
        );
    }

    #[test]
    fn planet_contents_checked() {
        let mut galaxy = valid_galaxy();
        let p = &mut galaxy.star_systems[0].planets[0];
        p.resources.push(Resource {
            kind: "naquadah".into(),
            quantity: 40,
        });
        p.resources.push(Resource {
            kind: String::new(),
            quantity: 1,
        });
        p.inhabitants.push(Inhabitant {
            species: "".into(),
            population: 100,
        });
        p.stargate = Some(Stargate {
            address: "  ".into(),
        });
        let err = validate_galaxy(&galaxy).unwrap_err();
        assert_eq!(
            paths(&err),
            vec![
                "starSystems[0].planets[0].resources[1].kind",
                "starSystems[0].planets[0].inhabitants[0].species",
                "starSystems[0].planets[0].stargate.address",
            ]
        );
    }

    #[test]
    fn error_message_lists_issues() {
        let mut galaxy = valid_galaxy();
        galaxy.star_systems[0].name = String::new();
        let err = validate_galaxy(&galaxy).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("1 issue(s)"), "{msg}");
        assert!(msg.contains("starSystems[0].name: must not be empty"), "{msg}");
    }

    #[test]
    fn parse_applies_defaults_and_validates() {
        let json = r#"{"seed":"x","starSystems":[{"id":"sys-0","name":"System 1",
            "position":{"x":3,"y":4},
            "planets":[{"id":"sys-0-planet-0","name":"Planet A","type":"gas giant"}]}]}"#;
        let galaxy = parse_galaxy(json).unwrap();
        assert_eq!(galaxy.star_systems[0].planets[0].planet_type, PlanetType::GasGiant);
        assert!(galaxy.star_systems[0].stargates.is_empty());
    }

    #[test]
    fn parse_reports_json_errors() {
        assert!(matches!(parse_galaxy("{"), Err(ParseError::Json(_))));
        assert!(matches!(
            parse_galaxy(r#"{"seed": 5, "starSystems": []}"#),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn parse_reports_schema_errors() {
        let json = r#"{"seed":"x","starSystems":[
            {"id":"sys-0","name":"A","position":{"x":0,"y":0},"planets":[]},
            {"id":"sys-0","name":"B","position":{"x":0,"y":0},"planets":[]}]}"#;
        match parse_galaxy(json) {
            Err(ParseError::Schema(e)) => assert_eq!(paths(&e), vec!["starSystems[1].id"]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }
}
