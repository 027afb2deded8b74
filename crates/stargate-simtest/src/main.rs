//! Stargate Headless Generation Harness
//!
//! Validates galaxy generation without the Workers backend or the client.
//! Runs entirely in-process: no DB, no networking, no rendering.
//!
//! Usage:
//!   cargo run -p stargate-simtest
//!   cargo run -p stargate-simtest -- --verbose --seeds 2000
//!   cargo run -p stargate-simtest -- --config galaxy.json
//!   cargo run -p stargate-simtest -- --emit Abydos

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stargate_logic::config::{validate_config, GalaxyConfig};
use stargate_logic::galaxy::Galaxy;
use stargate_logic::generation::{generate_galaxy, generate_galaxy_with, planet_name};
use stargate_logic::hash::hash_identifier;
use stargate_logic::rng::{create_rng, SeededRng};
use stargate_logic::schema::{parse_galaxy, validate_galaxy, ParseError};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

// ── Reference galaxies (same JSON the logic crate's tests use) ──────────
const REFERENCE_JSON: &str = include_str!("../../../data/reference_galaxies.json");

#[derive(Debug, Parser)]
#[command(name = "stargate-simtest", about = "Headless galaxy generation harness")]
struct Args {
    /// Print every check, not only failures.
    #[arg(long)]
    verbose: bool,

    /// Number of random identifiers in the fuzz sweep.
    #[arg(long, default_value_t = 500)]
    seeds: usize,

    /// Seed for the fuzz sweep's identifier generator (random if omitted).
    #[arg(long)]
    fuzz_seed: Option<u64>,

    /// JSON file with a `GalaxyConfig` to sweep in addition to the built-ins.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the galaxy for this identifier as JSON and exit.
    #[arg(long)]
    emit: Option<String>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Some(id) = &args.emit {
        if let Err(e) = emit(id) {
            error!("failed to emit galaxy {:?}: {}", id, e);
            std::process::exit(1);
        }
        return;
    }

    println!("=== Stargate Generation Harness ===\n");

    let mut results = Vec::new();

    // 1. Identifier hashing
    results.extend(validate_hashing(args.verbose));

    // 2. Seeded random source
    results.extend(validate_rng(args.verbose));

    // 3. Stored reference galaxies
    results.extend(validate_reference_galaxies(args.verbose));

    // 4. Invariants over random identifiers
    let fuzz_seed = args.fuzz_seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("fuzz sweep seed {} ({} identifiers)", fuzz_seed, args.seeds);
    results.extend(validate_invariants(fuzz_seed, args.seeds, args.verbose));

    // 5. JSON boundary
    results.extend(validate_json_boundary(args.verbose));

    // 6. Config sweep
    results.extend(validate_configs(args.config.as_deref(), args.verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        warn!("{} check(s) failed", failed);
        std::process::exit(1);
    }
}

fn emit(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let galaxy = generate_galaxy(id)?;
    println!("{}", serde_json::to_string_pretty(&galaxy)?);
    Ok(())
}

// ── 1. Identifier Hashing ───────────────────────────────────────────────

fn validate_hashing(verbose: bool) -> Vec<TestResult> {
    println!("--- Identifier Hashing ---");
    let mut results = Vec::new();

    let known: [(&str, u32); 6] = [
        ("", 0),
        ("a", 97),
        ("sys-7", 140856067),
        ("Abydos", 2664481858),
        ("Tollana", 1290258347),
        ("🚀", 1883741),
    ];
    let mismatches: Vec<_> = known
        .iter()
        .filter(|(s, h)| hash_identifier(s) != *h)
        .map(|(s, _)| *s)
        .collect();
    results.push(TestResult::new(
        "hash_reference_values",
        mismatches.is_empty(),
        if mismatches.is_empty() {
            format!("{} identifiers hash to stored values", known.len())
        } else {
            format!("mismatched: {:?}", mismatches)
        },
    ));

    // Astral characters contribute both UTF-16 surrogates
    results.push(TestResult::new(
        "hash_utf16_surrogates",
        hash_identifier("🚀") == 0xD83D * 33 + 0xDE80,
        "U+1F680 hashes as D83D DE80",
    ));

    if verbose {
        for (s, _) in &known {
            println!("    {:>10?} → {}", s, hash_identifier(s));
        }
    }

    results
}

// ── 2. Seeded RNG ───────────────────────────────────────────────────────

fn validate_rng(verbose: bool) -> Vec<TestResult> {
    println!("--- Seeded RNG ---");
    let mut results = Vec::new();

    let mut rng = SeededRng::new(0);
    let seq: Vec<u32> = (0..4).map(|_| rng.next_u32()).collect();
    results.push(TestResult::new(
        "rng_reference_sequence",
        seq == [1144304738, 1416247, 958946056, 627933444],
        format!("seed 0 → {:?}", seq),
    ));

    let mut rng = SeededRng::new(u32::MAX);
    let out_of_range = (0..100_000)
        .map(|_| rng.next_f64())
        .filter(|v| !(0.0..1.0).contains(v))
        .count();
    results.push(TestResult::new(
        "rng_unit_interval",
        out_of_range == 0,
        format!("{} of 100000 draws outside [0, 1)", out_of_range),
    ));

    // Mean of a uniform source should sit near 0.5
    let mut next = create_rng(1234);
    let mean = (0..100_000).map(|_| next()).sum::<f64>() / 100_000.0;
    results.push(TestResult::new(
        "rng_uniform_mean",
        (mean - 0.5).abs() < 0.01,
        format!("mean of 100000 draws = {:.4}", mean),
    ));

    if verbose {
        let mut next = create_rng(0);
        let head: Vec<String> = (0..4).map(|_| format!("{:.6}", next())).collect();
        println!("    seed 0 floats: {}", head.join(", "));
        println!("    seed 1234 mean: {:.6}", mean);
    }

    results
}

// ── 3. Reference Galaxies ───────────────────────────────────────────────

fn validate_reference_galaxies(verbose: bool) -> Vec<TestResult> {
    println!("--- Reference Galaxies ---");
    let mut results = Vec::new();

    let references: Vec<Galaxy> = match serde_json::from_str(REFERENCE_JSON) {
        Ok(r) => r,
        Err(e) => {
            results.push(TestResult::new(
                "reference_parse",
                false,
                format!("JSON parse error: {}", e),
            ));
            return results;
        }
    };

    let mut diverged = Vec::new();
    for reference in &references {
        match generate_galaxy(&reference.seed) {
            Ok(g) if g == *reference => {
                if verbose {
                    println!(
                        "    {:?}: {} systems, {} planets",
                        g.seed,
                        g.star_systems.len(),
                        g.planet_count()
                    );
                }
            }
            Ok(_) => diverged.push(reference.seed.clone()),
            Err(e) => {
                error!("reference {:?} failed validation: {}", reference.seed, e);
                diverged.push(reference.seed.clone());
            }
        }
    }
    results.push(TestResult::new(
        "reference_bit_compatible",
        diverged.is_empty(),
        if diverged.is_empty() {
            format!("{} galaxies match stored output", references.len())
        } else {
            format!("diverged: {:?}", diverged)
        },
    ));

    results
}

// ── 4. Invariants ───────────────────────────────────────────────────────

fn random_identifier(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..32);
    (0..len)
        .map(|_| {
            if rng.gen_bool(0.8) {
                rng.gen_range(' '..='~')
            } else {
                rng.gen::<char>()
            }
        })
        .collect()
}

fn validate_invariants(fuzz_seed: u64, count: usize, verbose: bool) -> Vec<TestResult> {
    println!("--- Galaxy Invariants ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(fuzz_seed);

    let mut ids: Vec<String> = vec![String::new(), "ω-Δ".into(), "🚀".into()];
    ids.extend((0..count).map(|_| random_identifier(&mut rng)));

    let mut failures: Vec<String> = Vec::new();
    let mut system_histogram = [0u32; 11];
    let mut planet_histogram = [0u32; 7];

    for id in &ids {
        let galaxy = match generate_galaxy(id) {
            Ok(g) => g,
            Err(e) => {
                failures.push(format!("{:?}: {}", id, e));
                continue;
            }
        };
        if let Some(problem) = check_invariants(id, &galaxy) {
            failures.push(format!("{:?}: {}", id, problem));
        }
        if generate_galaxy(id).ok().as_ref() != Some(&galaxy) {
            failures.push(format!("{:?}: not deterministic", id));
        }

        if let Some(slot) = system_histogram.get_mut(galaxy.star_systems.len()) {
            *slot += 1;
        }
        for system in &galaxy.star_systems {
            if let Some(slot) = planet_histogram.get_mut(system.planets.len()) {
                *slot += 1;
            }
        }
        debug!("checked {:?}", id);
    }

    results.push(TestResult::new(
        "invariants_random_identifiers",
        failures.is_empty(),
        if failures.is_empty() {
            format!("{} identifiers, all invariants hold", ids.len())
        } else {
            format!("{} failures, first: {}", failures.len(), failures[0])
        },
    ));

    // With enough identifiers every count in range should appear
    if count >= 200 {
        let missing_systems: Vec<_> = (3..=10).filter(|&n| system_histogram[n] == 0).collect();
        let missing_planets: Vec<_> = (1..=6).filter(|&n| planet_histogram[n] == 0).collect();
        results.push(TestResult::new(
            "invariants_full_count_coverage",
            missing_systems.is_empty() && missing_planets.is_empty(),
            format!(
                "unseen system counts {:?}, unseen planet counts {:?}",
                missing_systems, missing_planets
            ),
        ));
    }

    if verbose {
        println!("  System count distribution:");
        for (n, c) in system_histogram.iter().enumerate().skip(3) {
            println!("    {:2}: {}", n, c);
        }
        println!("  Planet count distribution:");
        for (n, c) in planet_histogram.iter().enumerate().skip(1) {
            println!("    {:2}: {}", n, c);
        }
    }

    results
}

fn check_invariants(id: &str, galaxy: &Galaxy) -> Option<String> {
    if galaxy.seed != id {
        return Some(format!("seed {:?} does not match", galaxy.seed));
    }
    if !(3..=10).contains(&galaxy.star_systems.len()) {
        return Some(format!("{} star systems", galaxy.star_systems.len()));
    }
    let system_ids: HashSet<_> = galaxy.star_systems.iter().map(|s| &s.id).collect();
    if system_ids.len() != galaxy.star_systems.len() {
        return Some("duplicate star system ids".into());
    }
    for system in &galaxy.star_systems {
        if !(1..=6).contains(&system.planets.len()) {
            return Some(format!("{} has {} planets", system.id, system.planets.len()));
        }
        let planet_ids: HashSet<_> = system.planets.iter().map(|p| &p.id).collect();
        if planet_ids.len() != system.planets.len() {
            return Some(format!("{} has duplicate planet ids", system.id));
        }
        for (j, planet) in system.planets.iter().enumerate() {
            if planet_name(j as u32).as_deref() != Some(planet.name.as_str()) {
                return Some(format!("{} misnamed {:?}", planet.id, planet.name));
            }
        }
    }
    validate_galaxy(galaxy).err().map(|e| e.to_string())
}

// ── 5. JSON Boundary ────────────────────────────────────────────────────

fn validate_json_boundary(verbose: bool) -> Vec<TestResult> {
    println!("--- JSON Boundary ---");
    let mut results = Vec::new();

    let galaxy = match generate_galaxy("Abydos") {
        Ok(g) => g,
        Err(e) => {
            results.push(TestResult::new("json_generate", false, e.to_string()));
            return results;
        }
    };

    let round_trip = serde_json::to_string(&galaxy)
        .map_err(ParseError::from)
        .and_then(|json| parse_galaxy(&json));
    results.push(TestResult::new(
        "json_round_trip",
        matches!(&round_trip, Ok(g) if *g == galaxy),
        match &round_trip {
            Ok(_) => "serialize → parse_galaxy preserves the galaxy".to_string(),
            Err(e) => e.to_string(),
        },
    ));

    // Sparse documents get list defaults
    let sparse = r#"{"seed":"s","starSystems":[{"id":"sys-0","name":"System 1",
        "position":{"x":1,"y":1},
        "planets":[{"id":"sys-0-planet-0","name":"Planet A","type":"terrestrial"}]}]}"#;
    let parsed = parse_galaxy(sparse);
    results.push(TestResult::new(
        "json_defaults_applied",
        matches!(&parsed, Ok(g) if g.star_systems[0].planets[0].resources.is_empty()),
        "missing resources/inhabitants/stargates default to empty",
    ));

    // Duplicate ids must be rejected with a field path
    let duplicate = r#"{"seed":"s","starSystems":[
        {"id":"sys-0","name":"A","position":{"x":0,"y":0},"planets":[]},
        {"id":"sys-0","name":"B","position":{"x":0,"y":0},"planets":[]}]}"#;
    let rejected = matches!(
        parse_galaxy(duplicate),
        Err(ParseError::Schema(ref e)) if e.issues.iter().any(|i| i.path == "starSystems[1].id")
    );
    results.push(TestResult::new(
        "json_duplicate_ids_rejected",
        rejected,
        "duplicate star system id → starSystems[1].id",
    ));

    if verbose {
        match serde_json::to_string(&galaxy) {
            Ok(json) => println!(
                "    Abydos: {} bytes of JSON, {} systems, {} planets",
                json.len(),
                galaxy.star_systems.len(),
                galaxy.planet_count()
            ),
            Err(e) => println!("    Abydos: serialize failed: {}", e),
        }
        if let Err(e) = parse_galaxy(duplicate) {
            println!("    duplicate ids: {}", e);
        }
    }

    results
}

// ── 6. Config Sweep ─────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<GalaxyConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn validate_configs(path: Option<&Path>, verbose: bool) -> Vec<TestResult> {
    println!("--- Config Sweep ---");
    let mut results = Vec::new();

    let mut configs = vec![
        ("default".to_string(), GalaxyConfig::default()),
        (
            "dense".to_string(),
            GalaxyConfig {
                min_star_systems: 30,
                max_star_systems: 40,
                min_planets: 10,
                max_planets: 26,
                ..GalaxyConfig::default()
            },
        ),
        (
            "tiny_grid".to_string(),
            GalaxyConfig {
                grid_size: 1,
                ..GalaxyConfig::default()
            },
        ),
    ];

    if let Some(path) = path {
        match load_config(path) {
            Ok(c) => configs.push((path.display().to_string(), c)),
            Err(e) => {
                results.push(TestResult::new(
                    "config_load",
                    false,
                    format!("{}: {}", path.display(), e),
                ));
            }
        }
    }

    for (label, config) in &configs {
        let errors = validate_config(config);
        if !errors.is_empty() {
            results.push(TestResult::new(
                &format!("config_{}_valid", label),
                false,
                format!("{:?}", errors),
            ));
            continue;
        }

        let mut problems = Vec::new();
        for i in 0..50 {
            let id = format!("cfg-{}", i);
            match generate_galaxy_with(&id, config) {
                Ok(g) => {
                    let n = g.star_systems.len() as u32;
                    if n < config.min_star_systems || n > config.max_star_systems {
                        problems.push(format!("{}: {} systems", id, n));
                    }
                    for s in &g.star_systems {
                        let p = s.planets.len() as u32;
                        if p < config.min_planets || p > config.max_planets {
                            problems.push(format!("{}/{}: {} planets", id, s.id, p));
                        }
                        if s.position.x as u32 >= config.grid_size
                            || s.position.y as u32 >= config.grid_size
                        {
                            problems.push(format!("{}/{}: off grid", id, s.id));
                        }
                    }
                }
                Err(e) => problems.push(format!("{}: {}", id, e)),
            }
        }
        if verbose && !problems.is_empty() {
            for p in &problems {
                println!("    {}", p);
            }
        }
        results.push(TestResult::new(
            &format!("config_{}_bounds", label),
            problems.is_empty(),
            format!("50 galaxies, {} problems", problems.len()),
        ));
    }

    // The letter-naming bound must be enforced
    let too_many = GalaxyConfig {
        max_planets: 27,
        ..GalaxyConfig::default()
    };
    results.push(TestResult::new(
        "config_rejects_unnamed_planets",
        generate_galaxy_with("x", &too_many).is_err(),
        "maxPlanets = 27 rejected",
    ));

    // Oversized galaxies must be rejected before any draw
    let oversized = GalaxyConfig {
        min_star_systems: 2_000_000,
        max_star_systems: u32::MAX,
        ..GalaxyConfig::default()
    };
    results.push(TestResult::new(
        "config_rejects_oversized_galaxy",
        generate_galaxy_with("x", &oversized).is_err(),
        "maxStarSystems = u32::MAX rejected",
    ));

    results
}
