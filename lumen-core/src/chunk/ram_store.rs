//! RAM-only chunk storage.
//!
//! Keeps every loaded chunk in memory behind its own lock. Useful for:
//! - Tests that need a small world
//! - Benchmarks
//! - The demo driver

use std::sync::Arc;

use lumen_utils::{BlockId, BlockPos, ChunkPos};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::chunk::level_chunk::Chunk;
use crate::light_engine::ChunkProvider;

/// In-memory chunk storage.
#[derive(Default)]
pub struct RamChunkStore {
    chunks: RwLock<FxHashMap<ChunkPos, Arc<RwLock<Chunk>>>>,
}

impl RamChunkStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a chunk, replacing and returning any chunk previously stored at its position.
    pub fn insert(&self, chunk: Chunk) -> Option<Arc<RwLock<Chunk>>> {
        self.chunks
            .write()
            .insert(chunk.pos(), Arc::new(RwLock::new(chunk)))
    }

    /// Removes a chunk from the store.
    pub fn remove(&self, pos: ChunkPos) -> Option<Arc<RwLock<Chunk>>> {
        self.chunks.write().remove(&pos)
    }

    /// Number of loaded chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.read().len()
    }

    /// Whether no chunk is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.read().is_empty()
    }

    /// Positions of every loaded chunk, sorted by z, then y, then x.
    #[must_use]
    pub fn positions(&self) -> Vec<ChunkPos> {
        let mut positions: Vec<_> = self.chunks.read().keys().copied().collect();
        positions.sort_unstable_by_key(|pos| (pos.0.z, pos.0.y, pos.0.x));
        positions
    }

    /// Replaces a block at a world position, returning the previous block.
    ///
    /// Returns `None` without changing anything if the chunk is not loaded.
    pub fn set_block(&self, pos: BlockPos, id: BlockId) -> Option<BlockId> {
        let chunk = self.chunk(pos.chunk_pos())?;
        let (x, y, z) = pos.local();
        let old = chunk.write().set_block(x, y, z, id);
        Some(old)
    }
}

impl ChunkProvider for RamChunkStore {
    fn chunk(&self, pos: ChunkPos) -> Option<Arc<RwLock<Chunk>>> {
        self.chunks.read().get(&pos).cloned()
    }
}
