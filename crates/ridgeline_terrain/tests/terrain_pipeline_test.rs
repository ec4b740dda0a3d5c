//! # Terrain Pipeline Integration Test
//!
//! Drives the whole stack the way game code does: describe a chunk in
//! config, run the generator layers, then sample continuous positions
//! for physics/rendering.

use ridgeline_terrain::{
    Peak, PeakGenerator, SineGenerator, TerrainChunk, TerrainConfig, TerrainGenerator,
};
use std::time::Instant;

const WORLD_CONFIG: &str = r#"
    seed = 1337
    width = 64
    base_height = 5.0

    [[layers]]
    kind = "sine"
    parameters = { amplitude = 14.0, offset = 25.0, roughness = 0.2 }

    [[layers]]
    kind = "peak"
    parameters = { height = 0.0, roughness = 0.0 }
    peaks = [
        { x = 16.0, y = 16.0, height = 60.0, max_radius = 12.0 },
        { x = 48.0, y = 40.0, height = 45.0, max_radius = 10.0, strength = 2.0 },
    ]
"#;

/// Test: config -> chunk -> sample is deterministic end to end.
#[test]
fn test_pipeline_determinism() {
    let config = TerrainConfig::from_toml_str(WORLD_CONFIG).unwrap();

    let chunk1 = config.build_chunk().unwrap();
    let chunk2 = config.build_chunk().unwrap();

    assert_eq!(chunk1.heights(), chunk2.heights(), "grids must be bit-identical");

    // Continuous samples agree too, at grid points and between them.
    let mut checked = 0;
    let mut y = 0.0;
    while y < 63.0 {
        let mut x = 0.0;
        while x < 63.0 {
            assert_eq!(chunk1.sample(x, y), chunk2.sample(x, y));
            checked += 1;
            x += 1.37;
        }
        y += 1.73;
    }
    println!("checked {checked} continuous sample positions");
}

/// Test: sampling anywhere stays inside the grid's height range.
///
/// Bilinear weights are a partition of unity, so every sample is a convex
/// combination of four grid values.
#[test]
fn test_samples_bounded_by_grid_extremes() {
    let config = TerrainConfig::from_toml_str(WORLD_CONFIG).unwrap();
    let chunk = config.build_chunk().unwrap();

    let min = chunk.heights().iter().copied().fold(f64::INFINITY, f64::min);
    let max = chunk
        .heights()
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    let mut y = -3.0;
    while y < 70.0 {
        let mut x = -3.0;
        while x < 70.0 {
            let h = chunk.sample(x, y);
            assert!(
                (min - 1e-9..=max + 1e-9).contains(&h),
                "sample {h} at ({x}, {y}) escapes grid range [{min}, {max}]"
            );
            x += 0.61;
        }
        y += 0.59;
    }
}

/// Test: sampling is continuous inside a cell (ground checks can step in
/// small increments without height jumps).
#[test]
fn test_sampling_continuity_within_cells() {
    let config = TerrainConfig::from_toml_str(WORLD_CONFIG).unwrap();
    let chunk = config.build_chunk().unwrap();

    let span = chunk
        .heights()
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max)
        - chunk.heights().iter().copied().fold(f64::INFINITY, f64::min);

    // Within one cell the surface is bilinear, so a 1/100 step can move
    // the height by at most span/100.
    let mut prev = chunk.sample(10.0, 10.0);
    for step in 1..=100 {
        let x = 10.0 + f64::from(step) / 100.0;
        let h = chunk.sample(x, 10.0);
        assert!(
            (h - prev).abs() <= span / 100.0 + 1e-9,
            "height jumped from {prev} to {h} at x={x}"
        );
        prev = h;
    }
}

/// Test: layering by hand matches the config-driven composition.
#[test]
fn test_manual_layering_matches_config() {
    let config = TerrainConfig::from_toml_str(WORLD_CONFIG).unwrap();
    let from_config = config.build_chunk().unwrap();

    let mut by_hand = TerrainChunk::with_base_height(1337, 64, 5.0);

    let mut sine = SineGenerator::new();
    sine.set_parameter("amplitude", 14.0);
    sine.set_parameter("offset", 25.0);
    sine.set_parameter("roughness", 0.2);
    by_hand.generate(&mut sine);

    let mut first = Peak::new(16.0, 16.0);
    first.height = 60.0;
    first.max_radius = 12.0;
    let mut second = Peak::new(48.0, 40.0);
    second.height = 45.0;
    second.max_radius = 10.0;
    second.strength = 2.0;

    let mut peaks = PeakGenerator::with_peaks(vec![first, second]);
    peaks.set_parameter("height", 0.0);
    peaks.set_parameter("roughness", 0.0);
    by_hand.generate(&mut peaks);

    assert_eq!(from_config.heights(), by_hand.heights());
}

/// Test: peaks actually show up where the config put them.
#[test]
fn test_peaks_shape_the_terrain() {
    let config = TerrainConfig::from_toml_str(WORLD_CONFIG).unwrap();
    let chunk = config.build_chunk().unwrap();

    // Compare against the same world without the peak layer.
    let mut flat_config = config.clone();
    flat_config.layers.truncate(1);
    let without_peaks = flat_config.build_chunk().unwrap();

    let lift = chunk.get(16, 16) - without_peaks.get(16, 16);
    assert!(lift > 10.0, "peak at (16, 16) only lifted terrain by {lift}");

    // Far corner is outside both peak radii: identical to the flat world.
    assert_eq!(chunk.get(0, 63), without_peaks.get(0, 63));
}

/// Test: generating a large chunk stays fast enough for load-time use.
#[test]
fn test_generation_throughput() {
    let mut chunk = TerrainChunk::new(42, 512);
    let mut generator = SineGenerator::new();

    let start = Instant::now();
    chunk.generate(&mut generator);
    let elapsed = start.elapsed();

    println!(
        "generated {} cells in {:?} ({:.0} cells/sec)",
        chunk.area(),
        elapsed,
        chunk.area() as f64 / elapsed.as_secs_f64()
    );

    assert!(
        elapsed.as_secs_f64() < 2.0,
        "512x512 generation took {elapsed:?}, expected < 2s"
    );
}
