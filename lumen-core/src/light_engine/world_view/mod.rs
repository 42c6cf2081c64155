//! World-coordinate access to blocks and light channels for the propagators.
//!
//! Three implementations cover the lifecycle of a chunk:
//! - [`SingleChunkView`]: one chunk, used right after generation.
//! - [`NeighborhoodView`]: a 3x3x3 block of chunks, used when a chunk's neighbours load.
//! - [`ProviderView`]: every loaded chunk, used for block edits in a running world.
//!
//! Positions outside a view's reach are reported as unavailable (`None`). Propagation
//! simply stops there; writes to them are ignored.

mod neighborhood;
mod provider;
mod single_chunk;

use std::sync::Arc;

use lumen_registry::Block;
use lumen_utils::{BlockPos, ChunkPos};
use parking_lot::RwLock;

use crate::chunk::{Chunk, LightChannel};

pub use neighborhood::{ChunkNeighborhood, NEIGHBORHOOD_SIZE, NeighborhoodView};
pub use provider::ProviderView;
pub use single_chunk::SingleChunkView;

/// Block and light access addressed by world position.
pub trait PropagatorWorldView {
    /// The block at `pos`, or `None` if the position is unavailable.
    fn block_at(&self, pos: BlockPos) -> Option<Block>;

    /// The value of `channel` at `pos`, or `None` if the position is unavailable.
    fn value_at(&self, channel: LightChannel, pos: BlockPos) -> Option<u8>;

    /// Stores a value of `channel` at `pos`. Ignored for unavailable positions.
    fn set_value_at(&mut self, channel: LightChannel, pos: BlockPos, value: u8);
}

/// Source of loaded chunks, owned by whatever streams chunks in and out.
pub trait ChunkProvider {
    /// The chunk at `pos`, if it is loaded.
    fn chunk(&self, pos: ChunkPos) -> Option<Arc<RwLock<Chunk>>>;
}
