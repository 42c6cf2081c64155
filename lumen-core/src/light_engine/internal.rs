//! Initial lighting of a freshly generated chunk.

use std::sync::Arc;

use lumen_registry::{Block, BlockRegistry};
use lumen_utils::{CHUNK_SIZE, Direction};

use super::batch_propagator::BatchPropagator;
use super::rules::{LightRules, PropagationRules, SunlightRegenRules, SunlightRules};
use super::world_view::{PropagatorWorldView, SingleChunkView};
use crate::chunk::{Chunk, LightChannel};

/// Lights a single chunk before any of its neighbours exist.
///
/// Regen is computed per column in one top-down pass, as within a chunk it only ever
/// flows straight down. Sunlight and block light are then flood filled inside the
/// chunk. Values near the chunk's faces are approximate until the chunk is merged with
/// its neighbours.
pub struct InternalLightProcessor {
    registry: Arc<BlockRegistry>,
}

impl InternalLightProcessor {
    /// Creates a processor resolving blocks through `registry`.
    #[must_use]
    pub fn new(registry: Arc<BlockRegistry>) -> Self {
        Self { registry }
    }

    /// Replaces every light channel of `chunk` with its internal lighting.
    pub fn generate_internal_lighting(&self, chunk: &mut Chunk) {
        chunk.clear_lighting();
        self.populate_regen(chunk);

        let pos = chunk.pos();
        let mut sunlight = BatchPropagator::new(SunlightRules);
        let mut light = BatchPropagator::new(LightRules);
        let mut view = SingleChunkView::new(chunk, &self.registry);

        let mut sources = 0usize;
        for y in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                for x in 0..CHUNK_SIZE {
                    let world_pos = pos.world_pos(x, y, z);
                    let Some(block) = view.block_at(world_pos) else {
                        continue;
                    };

                    let seed = view
                        .value_at(LightChannel::SunlightRegen, world_pos)
                        .map_or(0, SunlightRules::seed_from_regen);
                    if seed > 0 {
                        sunlight.propagate_from(&mut view, world_pos, seed);
                    }

                    let luminance = LightRules.fixed_value(&block, world_pos, &view);
                    if luminance > 0 {
                        light.propagate_from(&mut view, world_pos, luminance);
                        sources += 1;
                    }
                }
            }
        }

        sunlight.process(&mut view, &[]);
        light.process(&mut view, &[]);
        log::trace!("Lit chunk {pos:?} with {sources} light sources");
    }

    fn populate_regen(&self, chunk: &mut Chunk) {
        let rules = SunlightRegenRules;

        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                // Nothing known above the top of the chunk
                let mut above: Option<Block> = None;
                for y in (0..CHUNK_SIZE).rev() {
                    let Some(block) = self.registry.get(chunk.block(x, y, z)).copied() else {
                        rules.set_value(chunk, x, y, z, 0);
                        above = None;
                        continue;
                    };

                    let value = if !rules.can_spread_into(&block, Direction::Up) {
                        0
                    } else {
                        match above {
                            None => rules.edge_value(Direction::Up),
                            Some(above_block)
                                if rules.can_spread_out_of(&above_block, Direction::Down) =>
                            {
                                let above_value = rules.value(chunk, x, y + 1, z);
                                rules.propagate_value(above_value, Direction::Down, &above_block, 1)
                            }
                            Some(_) => 0,
                        }
                    };
                    rules.set_value(chunk, x, y, z, value);
                    above = Some(block);
                }
            }
        }
    }
}
