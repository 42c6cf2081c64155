//! Thread-safe front end of the light engine for a running world.
//!
//! Block changes may be queued from any thread. Changes to the same position are
//! coalesced until the next [`LevelLightEngine::run_update`], which relights them
//! through every loaded chunk:
//! 1. Block light
//! 2. Sunlight regen, then sunlight

use std::sync::Arc;

use lumen_registry::{Block, BlockRegistry};
use lumen_utils::{BlockId, BlockPos, ChunkPos};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::batch_propagator::BatchPropagator;
use super::block_change::BlockChange;
use super::internal::InternalLightProcessor;
use super::merger::LightMerger;
use super::rules::LightRules;
use super::sunlight_regen::SunlightRegenBatchPropagator;
use super::world_view::{ChunkNeighborhood, ChunkProvider, NEIGHBORHOOD_SIZE, ProviderView};
use crate::chunk::{Chunk, LightChannel};
use crate::error::LightError;

struct Propagators {
    light: BatchPropagator<LightRules>,
    sunlight: SunlightRegenBatchPropagator,
}

/// Batches block changes and drives initial lighting, merging and relighting.
pub struct LevelLightEngine {
    /// Block registry for block properties.
    registry: Arc<BlockRegistry>,
    /// Changes waiting for the next update, one per position.
    pending: Mutex<FxHashMap<BlockPos, BlockChange>>,
    /// Propagators applying queued changes.
    propagators: Mutex<Propagators>,
    internal: InternalLightProcessor,
}

impl LevelLightEngine {
    /// Creates an engine resolving blocks through `registry`.
    #[must_use]
    pub fn new(registry: Arc<BlockRegistry>) -> Self {
        Self {
            internal: InternalLightProcessor::new(Arc::clone(&registry)),
            registry,
            pending: Mutex::new(FxHashMap::default()),
            propagators: Mutex::new(Propagators {
                light: BatchPropagator::new(LightRules),
                sunlight: SunlightRegenBatchPropagator::new(),
            }),
        }
    }

    /// The registry blocks are resolved through.
    #[must_use]
    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.registry
    }

    /// Queues a change for the next [`Self::run_update`].
    ///
    /// A change at a position that already has one pending keeps the original `from`
    /// and takes the new `to`. If that restores the original block, nothing is left to
    /// relight and the pending change is dropped.
    pub fn queue_block_change(&self, change: BlockChange) {
        let mut pending = self.pending.lock();
        let merged = match pending.get(&change.pos) {
            Some(queued) => BlockChange::new(change.pos, queued.from, change.to),
            None => change,
        };
        if merged.from == merged.to {
            pending.remove(&change.pos);
        } else {
            pending.insert(change.pos, merged);
        }
    }

    /// Number of changes waiting for the next update.
    #[must_use]
    pub fn pending_changes(&self) -> usize {
        self.pending.lock().len()
    }

    /// Checks if there are any queued changes or unresolved propagation work.
    #[must_use]
    pub fn has_work(&self) -> bool {
        if !self.pending.lock().is_empty() {
            return true;
        }
        let propagators = self.propagators.lock();
        propagators.light.has_pending_work() || propagators.sunlight.has_pending_work()
    }

    /// Applies every queued change to the chunks `provider` has loaded.
    ///
    /// Returns the number of changes applied.
    pub fn run_update(&self, provider: &dyn ChunkProvider) -> usize {
        let changes: Vec<BlockChange> = self
            .pending
            .lock()
            .drain()
            .map(|(_, change)| change)
            .collect();
        if changes.is_empty() {
            return 0;
        }

        let mut propagators = self.propagators.lock();
        let Propagators { light, sunlight } = &mut *propagators;
        let mut view = ProviderView::new(provider, &self.registry);
        light.process(&mut view, &changes);
        sunlight.process(&mut view, &changes);

        log::debug!("Applied {} block changes", changes.len());
        changes.len()
    }

    /// Computes the internal lighting of a freshly generated chunk.
    pub fn light_chunk(&self, chunk: &mut Chunk) {
        self.internal.generate_internal_lighting(chunk);
    }

    /// Merges the lighting of `center` with its 26 neighbours.
    ///
    /// Chunk locks are taken in slot order, which is ascending z, y, x for every
    /// neighbourhood, so concurrent merges cannot deadlock.
    ///
    /// # Errors
    /// Returns [`LightError::ChunkNotLoaded`] if any chunk of the neighbourhood is missing.
    pub fn merge_chunk(&self, provider: &dyn ChunkProvider, center: ChunkPos) -> Result<(), LightError> {
        let handles = (0..NEIGHBORHOOD_SIZE)
            .map(|index| {
                let pos = ChunkNeighborhood::slot_pos(center, index);
                provider.chunk(pos).ok_or(LightError::ChunkNotLoaded(pos))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut guards: Vec<_> = handles.iter().map(|chunk| chunk.write()).collect();
        let slots = guards.iter_mut().map(|guard| Some(&mut **guard)).collect();
        LightMerger::new(Arc::clone(&self.registry)).merge(slots)
    }

    /// Replaces a block and queues the resulting change.
    ///
    /// Returns `None` without queueing anything if the block is already `id`.
    ///
    /// # Errors
    /// Fails if the block's chunk is not loaded or `id` is not registered.
    pub fn set_block(
        &self,
        provider: &dyn ChunkProvider,
        pos: BlockPos,
        id: BlockId,
    ) -> Result<Option<BlockChange>, LightError> {
        let to = self.resolve(id)?;
        let handle = provider
            .chunk(pos.chunk_pos())
            .ok_or(LightError::ChunkNotLoaded(pos.chunk_pos()))?;

        let (x, y, z) = pos.local();
        let mut chunk = handle.write();
        let old = chunk.block(x, y, z);
        if old == id {
            return Ok(None);
        }
        let from = self.resolve(old)?;
        chunk.set_block(x, y, z, id);
        drop(chunk);

        let change = BlockChange::new(pos, from, to);
        self.queue_block_change(change);
        Ok(Some(change))
    }

    fn resolve(&self, id: BlockId) -> Result<Block, LightError> {
        self.registry
            .get(id)
            .copied()
            .ok_or(LightError::UnknownBlock(id))
    }
}

// Queries read straight from the provider's chunks.
#[allow(clippy::unused_self)]
impl LevelLightEngine {
    /// Block light at `pos`, if its chunk is loaded.
    #[must_use]
    pub fn light_at(&self, provider: &dyn ChunkProvider, pos: BlockPos) -> Option<u8> {
        Self::value_at(provider, LightChannel::Light, pos)
    }

    /// Sunlight at `pos`, if its chunk is loaded.
    #[must_use]
    pub fn sunlight_at(&self, provider: &dyn ChunkProvider, pos: BlockPos) -> Option<u8> {
        Self::value_at(provider, LightChannel::Sunlight, pos)
    }

    /// The brighter of block light and sunlight at `pos`, if its chunk is loaded.
    #[must_use]
    pub fn total_light_at(&self, provider: &dyn ChunkProvider, pos: BlockPos) -> Option<u8> {
        let handle = provider.chunk(pos.chunk_pos())?;
        let chunk = handle.read();
        let (x, y, z) = pos.local();
        let light = chunk.channel(LightChannel::Light).get(x, y, z);
        Some(light.max(chunk.channel(LightChannel::Sunlight).get(x, y, z)))
    }

    fn value_at(provider: &dyn ChunkProvider, channel: LightChannel, pos: BlockPos) -> Option<u8> {
        let chunk = provider.chunk(pos.chunk_pos())?;
        let (x, y, z) = pos.local();
        let value = chunk.read().channel(channel).get(x, y, z);
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{LightChannel, RamChunkStore};
    use lumen_registry::vanilla;

    #[test]
    #[allow(clippy::unwrap_used)] // Tests are allowed to panic
    fn test_queued_changes_apply_on_update() {
        let engine = LevelLightEngine::new(Arc::new(vanilla::registry()));
        let store = RamChunkStore::new();
        let mut chunk = Chunk::new_filled(ChunkPos::new(0, 0, 0), vanilla::ids::STONE);
        engine.light_chunk(&mut chunk);
        store.insert(chunk);

        let torch = BlockPos::new(4, 4, 4);
        let change = engine.set_block(&store, torch, vanilla::ids::TORCH).unwrap().unwrap();
        assert_eq!(change.from, vanilla::STONE);
        assert_eq!(engine.pending_changes(), 1);
        assert!(engine.has_work());

        assert_eq!(engine.run_update(&store), 1);
        assert!(!engine.has_work());

        let handle = store.chunk(ChunkPos::new(0, 0, 0)).unwrap();
        let chunk = handle.read();
        assert_eq!(chunk.channel(LightChannel::Light).get(4, 4, 4), 14);
        assert_eq!(chunk.channel(LightChannel::Light).get(5, 4, 4), 0);
    }

    #[test]
    fn test_missing_chunks_are_reported() {
        let engine = LevelLightEngine::new(Arc::new(vanilla::registry()));
        let store = RamChunkStore::new();
        store.insert(Chunk::new_empty(ChunkPos::new(0, 0, 0)));

        assert_eq!(
            engine.merge_chunk(&store, ChunkPos::new(0, 0, 0)),
            Err(LightError::ChunkNotLoaded(ChunkPos::new(-1, -1, -1)))
        );
        assert_eq!(
            engine.set_block(&store, BlockPos::new(0, 16, 0), vanilla::ids::STONE),
            Err(LightError::ChunkNotLoaded(ChunkPos::new(0, 1, 0)))
        );
        assert_eq!(
            engine.set_block(&store, BlockPos::new(0, 0, 0), BlockId(999)),
            Err(LightError::UnknownBlock(BlockId(999)))
        );
        assert_eq!(engine.pending_changes(), 0);
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Tests are allowed to panic
    fn test_changes_to_one_position_are_coalesced() {
        let engine = LevelLightEngine::new(Arc::new(vanilla::registry()));
        let store = RamChunkStore::new();
        store.insert(Chunk::new_filled(ChunkPos::new(0, 0, 0), vanilla::ids::STONE));
        let pos = BlockPos::new(2, 3, 4);

        assert_eq!(engine.set_block(&store, pos, vanilla::ids::STONE), Ok(None));
        assert_eq!(engine.pending_changes(), 0);

        engine.set_block(&store, pos, vanilla::ids::GLASS).unwrap();
        engine.set_block(&store, pos, vanilla::ids::TORCH).unwrap();
        engine.set_block(&store, BlockPos::new(5, 5, 5), vanilla::ids::AIR).unwrap();
        assert_eq!(engine.pending_changes(), 2);

        let queued = engine.pending.lock().get(&pos).copied().unwrap();
        assert_eq!(queued.from, vanilla::STONE);
        assert_eq!(queued.to, vanilla::TORCH);

        // Putting the stone back leaves nothing to relight at that position
        engine.set_block(&store, pos, vanilla::ids::STONE).unwrap();
        assert_eq!(engine.pending_changes(), 1);
        assert_eq!(engine.run_update(&store), 1);
        assert!(!engine.has_work());
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Tests are allowed to panic
    fn test_light_queries_by_world_position() {
        let engine = LevelLightEngine::new(Arc::new(vanilla::registry()));
        let store = RamChunkStore::new();
        let mut chunk = Chunk::new_empty(ChunkPos::new(-1, 0, 0));
        chunk.set_block(15, 1, 0, vanilla::ids::STONE);
        engine.light_chunk(&mut chunk);
        store.insert(chunk);

        let lamp = BlockPos::new(-4, 0, 0);
        engine.set_block(&store, lamp, vanilla::ids::GLOWSTONE).unwrap();
        engine.run_update(&store);

        assert_eq!(engine.light_at(&store, lamp), Some(15));
        assert_eq!(engine.sunlight_at(&store, lamp), Some(15));
        assert_eq!(engine.light_at(&store, BlockPos::new(-8, 0, 0)), Some(11));
        assert_eq!(engine.total_light_at(&store, BlockPos::new(-8, 0, 0)), Some(15));

        // Under the stone, sunlight only arrives sideways
        let shaded = BlockPos::new(-1, 0, 0);
        assert_eq!(engine.sunlight_at(&store, shaded), Some(14));
        assert_eq!(engine.light_at(&store, shaded), Some(12));
        assert_eq!(engine.total_light_at(&store, shaded), Some(14));
        assert_eq!(engine.light_at(&store, BlockPos::new(0, 0, 0)), None);
    }
}
