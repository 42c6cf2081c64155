//! Lights a generated flat world, then relights it through batches of random edits.

use std::sync::Arc;
use std::time::Instant;

use lumen_core::chunk::{FlatChunkGenerator, LightChannel, RamChunkStore};
use lumen_core::light_engine::{ChunkProvider, LevelLightEngine};
use anyhow::Context;
use lumen_registry::{BlockRegistry, vanilla};
use lumen_utils::{BlockId, BlockPos, CHUNK_SIZE, ChunkPos};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::config::LumenConfig;

mod config;
mod logger;

fn cube(radius: i32) -> Vec<ChunkPos> {
    let mut positions = Vec::new();
    for z in -radius..=radius {
        for y in -radius..=radius {
            for x in -radius..=radius {
                positions.push(ChunkPos::new(x, y, z));
            }
        }
    }
    positions
}

fn main() -> anyhow::Result<()> {
    let config = LumenConfig::load_or_create()?;
    logger::init(&config.log_filter)?;

    if config.threads > 0 {
        ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("lumen-light-{i}"))
            .build_global()?;
    }

    log::info!("Starting lumen with seed {}", config.seed);
    let engine = LevelLightEngine::new(Arc::new(vanilla::registry()));
    let store = RamChunkStore::new();

    let palette = resolve_palette(engine.registry(), &config.edit_palette)?;

    generate(&config, &engine, &store);
    merge(&config, &engine, &store)?;
    edit(&config, &engine, &store, &palette)?;
    report(&config, &engine, &store);
    Ok(())
}

/// Looks up every block name of the edit palette.
fn resolve_palette(registry: &BlockRegistry, names: &[String]) -> anyhow::Result<Vec<BlockId>> {
    names
        .iter()
        .map(|name| {
            registry
                .get_by_name(name)
                .with_context(|| format!("unknown block {name:?} in edit_palette"))
        })
        .collect()
}

/// Generates every chunk and computes its internal lighting.
fn generate(config: &LumenConfig, engine: &LevelLightEngine, store: &RamChunkStore) {
    let positions = cube(config.radius);
    let _span = tracing::info_span!("generate", chunks = positions.len()).entered();
    let start = Instant::now();

    let generator = FlatChunkGenerator::new(config.seed, config.ground_level)
        .with_torch_chance(config.torch_chance);
    positions.par_iter().for_each(|pos| {
        let mut chunk = generator.generate(*pos);
        engine.light_chunk(&mut chunk);
        store.insert(chunk);
    });

    log::info!("Generated and lit {} chunks in {:?}", store.len(), start.elapsed());
}

/// Merges every chunk whose neighbourhood is fully loaded.
fn merge(
    config: &LumenConfig,
    engine: &LevelLightEngine,
    store: &RamChunkStore,
) -> anyhow::Result<()> {
    let positions = cube(config.radius - 1);
    let _span = tracing::info_span!("merge", chunks = positions.len()).entered();
    let start = Instant::now();

    positions
        .par_iter()
        .try_for_each(|pos| engine.merge_chunk(store, *pos))?;

    log::info!("Merged {} chunks in {:?}", positions.len(), start.elapsed());
    Ok(())
}

/// Applies batches of random edits around the surface of the merged area.
fn edit(
    config: &LumenConfig,
    engine: &LevelLightEngine,
    store: &RamChunkStore,
    palette: &[BlockId],
) -> anyhow::Result<()> {
    let _span = tracing::info_span!("edit", batches = config.edit_batches).entered();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let extent = (config.radius - 1) * CHUNK_SIZE as i32;
    let start = Instant::now();
    let mut applied = 0usize;

    for batch in 0..config.edit_batches {
        for _ in 0..config.edits_per_batch {
            let pos = BlockPos::new(
                rng.random_range(-extent..extent),
                config.ground_level + rng.random_range(-4..4),
                rng.random_range(-extent..extent),
            );
            let block = palette[rng.random_range(0..palette.len())];
            engine.set_block(store, pos, block)?;
        }
        applied += engine.run_update(store);
        tracing::debug!(batch, applied, "Applied edit batch");
    }

    log::info!("Applied {applied} edits in {:?}", start.elapsed());
    Ok(())
}

/// Logs a summary of the lighting of every loaded chunk.
fn report(config: &LumenConfig, engine: &LevelLightEngine, store: &RamChunkStore) {
    let mut lit = 0usize;
    let mut uniform_sunlight = 0usize;
    let mut brightest = 0u8;

    for pos in store.positions() {
        let Some(handle) = store.chunk(pos) else {
            continue;
        };
        let mut chunk = handle.write();
        chunk.deflate_lighting();
        let light = chunk.channel(LightChannel::Light).max_value();
        if light > 0 {
            lit += 1;
        }
        brightest = brightest.max(light);
        if chunk.channel(LightChannel::Sunlight).is_homogeneous() {
            uniform_sunlight += 1;
        }
    }

    log::info!(
        "{} chunks: {lit} with block light, brightest {brightest}",
        store.len()
    );
    log::info!("{uniform_sunlight} chunks hold uniform sunlight");

    let surface = BlockPos::new(0, config.ground_level, 0);
    if let Some(total) = engine.total_light_at(store, surface) {
        log::info!(
            "Light at {surface:?}: {total} (block {}, sky {})",
            engine.light_at(store, surface).unwrap_or(0),
            engine.sunlight_at(store, surface).unwrap_or(0)
        );
    }
}
