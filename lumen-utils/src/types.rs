//! Block and chunk coordinates and the ids stored in chunks.

// Wrapper types making it harder to accidentaly mix up world, chunk and local coordinates.

use crate::direction::Direction;
use crate::math::Vector3;

/// Edge length of a cubic chunk in blocks.
pub const CHUNK_SIZE: usize = 16;
/// Shift turning a block coordinate into a chunk coordinate.
pub const CHUNK_SHIFT: i32 = 4;
/// Mask turning a block coordinate into a chunk-local coordinate.
pub const CHUNK_MASK: i32 = 15;
/// Number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

// A raw block id. Using the registry this id can be resolved into a block descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockId(pub u16);

// A chunk position, in chunk units on all three axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChunkPos(pub Vector3<i32>);

// A block position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos(pub Vector3<i32>);

impl BlockPos {
    /// Creates a block position from world coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// The chunk containing this block.
    #[must_use]
    #[inline]
    pub const fn chunk_pos(self) -> ChunkPos {
        ChunkPos(Vector3::new(
            self.0.x >> CHUNK_SHIFT,
            self.0.y >> CHUNK_SHIFT,
            self.0.z >> CHUNK_SHIFT,
        ))
    }

    /// Coordinates of this block inside its chunk.
    #[must_use]
    #[inline]
    pub const fn local(self) -> (usize, usize, usize) {
        (
            (self.0.x & CHUNK_MASK) as usize,
            (self.0.y & CHUNK_MASK) as usize,
            (self.0.z & CHUNK_MASK) as usize,
        )
    }

    /// The neighbouring block in the given direction.
    #[must_use]
    #[inline]
    pub fn relative(self, direction: Direction) -> Self {
        direction.relative(self)
    }

    /// Manhattan distance between two blocks.
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.0.x.abs_diff(other.0.x) + self.0.y.abs_diff(other.0.y) + self.0.z.abs_diff(other.0.z)
    }
}

impl ChunkPos {
    /// Creates a chunk position from chunk coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// World position of the chunk's lowest corner.
    #[must_use]
    #[inline]
    pub const fn block_origin(self) -> BlockPos {
        BlockPos::new(
            self.0.x << CHUNK_SHIFT,
            self.0.y << CHUNK_SHIFT,
            self.0.z << CHUNK_SHIFT,
        )
    }

    /// World position of a chunk-local coordinate.
    #[must_use]
    #[inline]
    pub const fn world_pos(self, x: usize, y: usize, z: usize) -> BlockPos {
        let origin = self.block_origin();
        BlockPos::new(
            origin.0.x + x as i32,
            origin.0.y + y as i32,
            origin.0.z + z as i32,
        )
    }

    /// The neighbouring chunk in the given direction.
    #[must_use]
    pub const fn relative(self, direction: Direction) -> Self {
        let (dx, dy, dz) = direction.offset();
        Self::new(self.0.x + dx, self.0.y + dy, self.0.z + dz)
    }

    /// Every block of this chunk lying on the face towards `side`.
    pub fn face_positions(self, side: Direction) -> impl Iterator<Item = BlockPos> {
        const LAST: usize = CHUNK_SIZE - 1;
        (0..CHUNK_SIZE).flat_map(move |a| {
            (0..CHUNK_SIZE).map(move |b| match side {
                Direction::Down => self.world_pos(a, 0, b),
                Direction::Up => self.world_pos(a, LAST, b),
                Direction::North => self.world_pos(a, b, 0),
                Direction::South => self.world_pos(a, b, LAST),
                Direction::West => self.world_pos(0, a, b),
                Direction::East => self.world_pos(LAST, a, b),
            })
        })
    }
}
