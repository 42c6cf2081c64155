//! 2-element LRU cache for chunk access during light propagation.

use std::sync::Arc;

use lumen_utils::ChunkPos;
use parking_lot::RwLock;

use crate::chunk::Chunk;

type CachedChunk = (ChunkPos, Arc<RwLock<Chunk>>);

/// 2-element LRU cache for recently accessed chunks.
///
/// Flood fills mostly step between neighbouring cells, so the last two chunks cover
/// the bulk of lookups and spare a trip through the provider's map.
#[derive(Default)]
pub struct ChunkCache {
    /// Cached chunks, most recently used first.
    slots: [Option<CachedChunk>; 2],
}

impl ChunkCache {
    /// Creates a new empty chunk cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks a chunk up, marking it as most recently used on a hit.
    pub fn get(&mut self, pos: ChunkPos) -> Option<Arc<RwLock<Chunk>>> {
        let index = self
            .slots
            .iter()
            .position(|slot| matches!(slot, Some((cached, _)) if *cached == pos))?;
        if index == 1 {
            self.slots.swap(0, 1);
        }
        self.slots[0].as_ref().map(|(_, chunk)| Arc::clone(chunk))
    }

    /// Inserts a chunk as most recently used, evicting the least recently used one.
    pub fn insert(&mut self, pos: ChunkPos, chunk: Arc<RwLock<Chunk>>) {
        if matches!(&self.slots[0], Some((first, _)) if *first == pos) {
            self.slots[0] = Some((pos, chunk));
            return;
        }
        // The old second slot is either the same position or the LRU entry
        self.slots[1] = self.slots[0].take();
        self.slots[0] = Some((pos, chunk));
    }
}
