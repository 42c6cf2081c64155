//! The six faces of a voxel.

use bitflags::bitflags;

use crate::types::BlockPos;

/// Six cardinal directions, also used to name the face of a block pointing that way.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Downward (-Y direction), the bottom face.
    Down = 0,
    /// Upward (+Y direction), the top face.
    Up = 1,
    /// North (-Z direction)
    North = 2,
    /// South (+Z direction)
    South = 3,
    /// West (-X direction)
    West = 4,
    /// East (+X direction)
    East = 5,
}

impl Direction {
    /// All six directions in array form for iteration.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Gets the offset in the given direction.
    ///
    /// Returns (dx, dy, dz) for this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            Self::Down => (0, -1, 0),
            Self::Up => (0, 1, 0),
            Self::North => (0, 0, -1),
            Self::South => (0, 0, 1),
            Self::West => (-1, 0, 0),
            Self::East => (1, 0, 0),
        }
    }

    /// Returns a new `BlockPos` relative to the given position in this direction.
    #[must_use]
    #[inline]
    pub const fn relative(self, pos: BlockPos) -> BlockPos {
        let (dx, dy, dz) = self.offset();
        BlockPos::new(pos.0.x + dx, pos.0.y + dy, pos.0.z + dz)
    }

    /// The single-face set for this direction.
    #[must_use]
    pub const fn side(self) -> Sides {
        match self {
            Self::Down => Sides::DOWN,
            Self::Up => Sides::UP,
            Self::North => Sides::NORTH,
            Self::South => Sides::SOUTH,
            Self::West => Sides::WEST,
            Self::East => Sides::EAST,
        }
    }
}

bitflags! {
    /// A set of block faces, used for per-face opacity.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Sides: u8 {
        /// Bottom face.
        const DOWN = 1 << 0;
        /// Top face.
        const UP = 1 << 1;
        /// North face.
        const NORTH = 1 << 2;
        /// South face.
        const SOUTH = 1 << 3;
        /// West face.
        const WEST = 1 << 4;
        /// East face.
        const EAST = 1 << 5;
    }
}

impl Sides {
    /// Whether the set contains the face pointing in `direction`.
    #[must_use]
    #[inline]
    pub fn has(self, direction: Direction) -> bool {
        self.contains(direction.side())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals() {
        assert_eq!(Direction::Down as u8, 0);
        assert_eq!(Direction::Up as u8, 1);
        assert_eq!(Direction::North as u8, 2);
        assert_eq!(Direction::South as u8, 3);
        assert_eq!(Direction::West as u8, 4);
        assert_eq!(Direction::East as u8, 5);
    }

    #[test]
    fn test_opposite() {
        for direction in Direction::ALL {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn test_relative_round_trip() {
        let pos = BlockPos::new(3, -7, 12);
        for direction in Direction::ALL {
            let moved = direction.relative(pos);
            assert_eq!(moved.manhattan_distance(pos), 1);
            assert_eq!(direction.opposite().relative(moved), pos);
        }
    }

    #[test]
    fn test_sides() {
        let sides = Sides::DOWN | Sides::EAST;
        assert!(sides.has(Direction::Down));
        assert!(sides.has(Direction::East));
        assert!(!sides.has(Direction::Up));
        assert!(Sides::all().has(Direction::North));
        assert!(!Sides::empty().has(Direction::West));
    }
}
