use std::cell::RefCell;
use std::sync::Arc;

use lumen_registry::{Block, BlockRegistry};
use lumen_utils::BlockPos;
use parking_lot::RwLock;

use super::{ChunkProvider, PropagatorWorldView};
use crate::chunk::{Chunk, LightChannel};
use crate::light_engine::chunk_cache::ChunkCache;

/// An unbounded view resolving chunks through a [`ChunkProvider`] on demand.
///
/// Chunks the provider does not have loaded are unavailable. Each access takes the
/// chunk's own lock only for its duration, so no lock is held between calls.
pub struct ProviderView<'a> {
    provider: &'a dyn ChunkProvider,
    registry: &'a BlockRegistry,
    cache: RefCell<ChunkCache>,
}

impl<'a> ProviderView<'a> {
    /// Creates a view over every chunk `provider` has loaded.
    #[must_use]
    pub fn new(provider: &'a dyn ChunkProvider, registry: &'a BlockRegistry) -> Self {
        Self {
            provider,
            registry,
            cache: RefCell::new(ChunkCache::new()),
        }
    }

    fn chunk(&self, pos: BlockPos) -> Option<Arc<RwLock<Chunk>>> {
        let chunk_pos = pos.chunk_pos();
        let mut cache = self.cache.borrow_mut();
        if let Some(chunk) = cache.get(chunk_pos) {
            return Some(chunk);
        }

        let chunk = self.provider.chunk(chunk_pos)?;
        cache.insert(chunk_pos, Arc::clone(&chunk));
        Some(chunk)
    }
}

impl PropagatorWorldView for ProviderView<'_> {
    fn block_at(&self, pos: BlockPos) -> Option<Block> {
        let chunk = self.chunk(pos)?;
        let (x, y, z) = pos.local();
        let id = chunk.read().block(x, y, z);
        self.registry.get(id).copied()
    }

    fn value_at(&self, channel: LightChannel, pos: BlockPos) -> Option<u8> {
        let chunk = self.chunk(pos)?;
        let (x, y, z) = pos.local();
        Some(chunk.read().channel(channel).get(x, y, z))
    }

    fn set_value_at(&mut self, channel: LightChannel, pos: BlockPos, value: u8) {
        if let Some(chunk) = self.chunk(pos) {
            let (x, y, z) = pos.local();
            chunk.write().channel_mut(channel).set(x, y, z, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use lumen_registry::vanilla;
    use lumen_utils::ChunkPos;
    use rustc_hash::FxHashMap;

    struct CountingProvider {
        chunks: FxHashMap<ChunkPos, Arc<RwLock<Chunk>>>,
        lookups: Cell<usize>,
    }

    impl ChunkProvider for CountingProvider {
        fn chunk(&self, pos: ChunkPos) -> Option<Arc<RwLock<Chunk>>> {
            self.lookups.set(self.lookups.get() + 1);
            self.chunks.get(&pos).cloned()
        }
    }

    #[test]
    fn test_resolves_chunks_lazily() {
        let mut chunks = FxHashMap::default();
        for x in 0..3 {
            let pos = ChunkPos::new(x, 0, 0);
            chunks.insert(pos, Arc::new(RwLock::new(Chunk::new_empty(pos))));
        }
        let provider = CountingProvider {
            chunks,
            lookups: Cell::new(0),
        };
        let registry = vanilla::registry();
        let mut view = ProviderView::new(&provider, &registry);
        assert_eq!(provider.lookups.get(), 0);

        for x in 0..16 {
            view.set_value_at(LightChannel::Light, BlockPos::new(x, 3, 3), 5);
        }
        assert_eq!(provider.lookups.get(), 1);

        assert_eq!(view.value_at(LightChannel::Light, BlockPos::new(40, 3, 3)), Some(0));
        assert_eq!(view.value_at(LightChannel::Light, BlockPos::new(2, 3, 3)), Some(5));
        assert_eq!(provider.lookups.get(), 2);

        assert_eq!(view.block_at(BlockPos::new(0, -1, 0)), None);
        assert_eq!(view.block_at(BlockPos::new(0, 16, 0)), None);
    }
}
