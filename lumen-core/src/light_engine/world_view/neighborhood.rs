use lumen_registry::{Block, BlockRegistry};
use lumen_utils::{BlockPos, ChunkPos};

use super::PropagatorWorldView;
use crate::chunk::{Chunk, LightChannel};
use crate::error::LightError;

/// Number of chunks in a neighbourhood.
pub const NEIGHBORHOOD_SIZE: usize = 27;

const CENTER_SLOT: usize = 13;

/// A chunk and the 26 chunks around it, borrowed for one lighting episode.
///
/// Slots are ordered by offset from the centre, x fastest, then y, then z. Slot 13
/// is the centre.
pub struct ChunkNeighborhood<'a> {
    center: ChunkPos,
    chunks: Vec<&'a mut Chunk>,
}

impl<'a> ChunkNeighborhood<'a> {
    /// Validates and takes ownership of the borrowed slots.
    ///
    /// # Errors
    /// Fails when the slot count is wrong, a slot is empty or a chunk is not where its
    /// slot says it should be.
    pub fn new(slots: Vec<Option<&'a mut Chunk>>) -> Result<Self, LightError> {
        if slots.len() != NEIGHBORHOOD_SIZE {
            return Err(LightError::NeighborhoodSize {
                expected: NEIGHBORHOOD_SIZE,
                found: slots.len(),
            });
        }

        let center = slots[CENTER_SLOT]
            .as_ref()
            .map(|chunk| chunk.pos())
            .ok_or(LightError::MissingChunk { index: CENTER_SLOT })?;

        let mut chunks = Vec::with_capacity(NEIGHBORHOOD_SIZE);
        for (index, slot) in slots.into_iter().enumerate() {
            let chunk = slot.ok_or(LightError::MissingChunk { index })?;
            let expected = Self::slot_pos(center, index);
            if chunk.pos() != expected {
                return Err(LightError::MisplacedChunk {
                    index,
                    expected,
                    found: chunk.pos(),
                });
            }
            chunks.push(chunk);
        }

        Ok(Self { center, chunks })
    }

    /// Chunk position a slot stands for around `center`.
    #[must_use]
    pub fn slot_pos(center: ChunkPos, index: usize) -> ChunkPos {
        let offset = |value: usize| (value % 3) as i32 - 1;
        ChunkPos::new(
            center.0.x + offset(index),
            center.0.y + offset(index / 3),
            center.0.z + offset(index / 9),
        )
    }

    /// Slot holding `pos`, if it is inside the neighbourhood.
    #[must_use]
    pub fn slot_of(&self, pos: ChunkPos) -> Option<usize> {
        let dx = pos.0.x - self.center.0.x;
        let dy = pos.0.y - self.center.0.y;
        let dz = pos.0.z - self.center.0.z;
        if dx.abs() > 1 || dy.abs() > 1 || dz.abs() > 1 {
            return None;
        }
        Some(((dz + 1) * 9 + (dy + 1) * 3 + (dx + 1)) as usize)
    }

    /// Position of the centre chunk.
    #[must_use]
    pub fn center(&self) -> ChunkPos {
        self.center
    }

    /// The centre chunk.
    pub fn center_mut(&mut self) -> &mut Chunk {
        &mut *self.chunks[CENTER_SLOT]
    }

    /// The chunk at `pos`, if it is inside the neighbourhood.
    #[must_use]
    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        let slot = self.slot_of(pos)?;
        Some(&*self.chunks[slot])
    }

    /// The chunk at `pos`, if it is inside the neighbourhood.
    pub fn chunk_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        let slot = self.slot_of(pos)?;
        Some(&mut *self.chunks[slot])
    }
}

/// A view over a [`ChunkNeighborhood`].
pub struct NeighborhoodView<'a> {
    chunks: ChunkNeighborhood<'a>,
    registry: &'a BlockRegistry,
}

impl<'a> NeighborhoodView<'a> {
    /// Creates a view over `chunks`, resolving blocks through `registry`.
    #[must_use]
    pub fn new(chunks: ChunkNeighborhood<'a>, registry: &'a BlockRegistry) -> Self {
        Self { chunks, registry }
    }

    /// The underlying neighbourhood.
    pub fn chunks_mut(&mut self) -> &mut ChunkNeighborhood<'a> {
        &mut self.chunks
    }
}

impl PropagatorWorldView for NeighborhoodView<'_> {
    fn block_at(&self, pos: BlockPos) -> Option<Block> {
        let chunk = self.chunks.chunk(pos.chunk_pos())?;
        let (x, y, z) = pos.local();
        self.registry.get(chunk.block(x, y, z)).copied()
    }

    fn value_at(&self, channel: LightChannel, pos: BlockPos) -> Option<u8> {
        let chunk = self.chunks.chunk(pos.chunk_pos())?;
        let (x, y, z) = pos.local();
        Some(chunk.channel(channel).get(x, y, z))
    }

    fn set_value_at(&mut self, channel: LightChannel, pos: BlockPos, value: u8) {
        if let Some(chunk) = self.chunks.chunk_mut(pos.chunk_pos()) {
            let (x, y, z) = pos.local();
            chunk.channel_mut(channel).set(x, y, z, value);
        }
    }
}
