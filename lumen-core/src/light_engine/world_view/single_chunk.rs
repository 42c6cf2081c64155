use lumen_registry::{Block, BlockRegistry};
use lumen_utils::BlockPos;

use super::PropagatorWorldView;
use crate::chunk::{Chunk, LightChannel};

/// A view bounded to a single chunk.
///
/// This is used during initial lighting when neighbours may not be loaded yet.
/// Light propagation is limited to within the chunk boundaries.
pub struct SingleChunkView<'a> {
    chunk: &'a mut Chunk,
    registry: &'a BlockRegistry,
}

impl<'a> SingleChunkView<'a> {
    /// Creates a view over `chunk`, resolving blocks through `registry`.
    #[must_use]
    pub fn new(chunk: &'a mut Chunk, registry: &'a BlockRegistry) -> Self {
        Self { chunk, registry }
    }

    #[inline]
    fn local(&self, pos: BlockPos) -> Option<(usize, usize, usize)> {
        (pos.chunk_pos() == self.chunk.pos()).then(|| pos.local())
    }
}

impl PropagatorWorldView for SingleChunkView<'_> {
    fn block_at(&self, pos: BlockPos) -> Option<Block> {
        let (x, y, z) = self.local(pos)?;
        self.registry.get(self.chunk.block(x, y, z)).copied()
    }

    fn value_at(&self, channel: LightChannel, pos: BlockPos) -> Option<u8> {
        let (x, y, z) = self.local(pos)?;
        Some(self.chunk.channel(channel).get(x, y, z))
    }

    fn set_value_at(&mut self, channel: LightChannel, pos: BlockPos, value: u8) {
        if let Some((x, y, z)) = self.local(pos) {
            self.chunk.channel_mut(channel).set(x, y, z, value);
        }
    }
}
