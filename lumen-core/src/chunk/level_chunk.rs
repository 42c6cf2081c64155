//! A chunk: a 16x16x16 cube of blocks and its light channels.

use lumen_utils::{BlockId, CHUNK_SIZE, CHUNK_VOLUME, ChunkPos};

use super::light_storage::LightStorage;

/// The three light channels stored per block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightChannel {
    /// Light emitted by blocks.
    Light,
    /// Direct sunlight.
    Sunlight,
    /// Accumulated open-sky exposure, gating where sunlight is seeded.
    SunlightRegen,
}

impl LightChannel {
    /// All channels, in processing order.
    pub const ALL: [LightChannel; 3] = [
        LightChannel::Light,
        LightChannel::SunlightRegen,
        LightChannel::Sunlight,
    ];
}

/// Block ids of a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockStorage {
    /// Every block is the same.
    Homogeneous(BlockId),
    /// One id per block, indexed like [`LightStorage`].
    Heterogeneous(Box<[BlockId; CHUNK_VOLUME]>),
}

impl BlockStorage {
    #[inline]
    fn get(&self, x: usize, y: usize, z: usize) -> BlockId {
        match self {
            Self::Homogeneous(id) => *id,
            Self::Heterogeneous(data) => data[(y * CHUNK_SIZE + z) * CHUNK_SIZE + x],
        }
    }

    fn set(&mut self, x: usize, y: usize, z: usize, id: BlockId) -> BlockId {
        let index = (y * CHUNK_SIZE + z) * CHUNK_SIZE + x;
        match self {
            Self::Homogeneous(current) => {
                let old = *current;
                if old != id {
                    let mut data = Box::new([old; CHUNK_VOLUME]);
                    data[index] = id;
                    *self = Self::Heterogeneous(data);
                }
                old
            }
            Self::Heterogeneous(data) => std::mem::replace(&mut data[index], id),
        }
    }
}

/// A cubic 16x16x16 piece of the world: its blocks and their light channels.
#[derive(Debug, Clone)]
pub struct Chunk {
    pos: ChunkPos,
    blocks: BlockStorage,
    light: LightStorage,
    sunlight: LightStorage,
    sunlight_regen: LightStorage,
}

impl Chunk {
    /// Creates a dark chunk filled with `block`.
    #[must_use]
    pub fn new_filled(pos: ChunkPos, block: BlockId) -> Self {
        Self {
            pos,
            blocks: BlockStorage::Homogeneous(block),
            light: LightStorage::new_empty(),
            sunlight: LightStorage::new_empty(),
            sunlight_regen: LightStorage::new_empty(),
        }
    }

    /// Creates a dark chunk of block id 0.
    #[must_use]
    pub fn new_empty(pos: ChunkPos) -> Self {
        Self::new_filled(pos, BlockId(0))
    }

    /// Position of the chunk.
    #[must_use]
    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    /// Block at a chunk-local position.
    #[must_use]
    #[inline]
    pub fn block(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.blocks.get(x, y, z)
    }

    /// Replaces the block at a chunk-local position, returning the previous one.
    ///
    /// Light values are left untouched; feed the change to the light engine.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, id: BlockId) -> BlockId {
        self.blocks.set(x, y, z, id)
    }

    /// The raw block storage.
    #[must_use]
    pub fn blocks(&self) -> &BlockStorage {
        &self.blocks
    }

    /// Storage of one light channel.
    #[must_use]
    #[inline]
    pub fn channel(&self, channel: LightChannel) -> &LightStorage {
        match channel {
            LightChannel::Light => &self.light,
            LightChannel::Sunlight => &self.sunlight,
            LightChannel::SunlightRegen => &self.sunlight_regen,
        }
    }

    /// Mutable storage of one light channel.
    #[inline]
    pub fn channel_mut(&mut self, channel: LightChannel) -> &mut LightStorage {
        match channel {
            LightChannel::Light => &mut self.light,
            LightChannel::Sunlight => &mut self.sunlight,
            LightChannel::SunlightRegen => &mut self.sunlight_regen,
        }
    }

    /// Resets every light channel to zero.
    pub fn clear_lighting(&mut self) {
        for channel in LightChannel::ALL {
            self.channel_mut(channel).fill(0);
        }
    }

    /// Compacts the sunlight storage when it holds a single value.
    pub fn deflate_sunlight(&mut self) -> bool {
        self.sunlight.deflate()
    }

    /// Compacts every light channel that holds a single value.
    pub fn deflate_lighting(&mut self) {
        for channel in LightChannel::ALL {
            self.channel_mut(channel).deflate();
        }
    }
}
