//! Lighting properties of block types.

use lumen_utils::{BlockId, Direction, Sides};

/// Lighting-relevant description of a block type.
///
/// Descriptors are small and `Copy`, so views hand them out by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Raw registry id.
    pub id: BlockId,
    /// Registry name.
    pub name: &'static str,
    /// Light emitted by the block (0-15).
    pub luminance: u8,
    /// Whether light can pass through the block at all.
    pub translucent: bool,
    /// Faces that fully block light even when the block is translucent.
    pub full_sides: Sides,
    /// Whether the block is a liquid.
    pub liquid: bool,
}

impl Block {
    /// Creates an opaque, non-emitting solid block.
    #[must_use]
    pub const fn solid(id: BlockId, name: &'static str) -> Self {
        Self {
            id,
            name,
            luminance: 0,
            translucent: false,
            full_sides: Sides::all(),
            liquid: false,
        }
    }

    /// Creates a block light passes through freely.
    #[must_use]
    pub const fn clear(id: BlockId, name: &'static str) -> Self {
        Self {
            id,
            name,
            luminance: 0,
            translucent: true,
            full_sides: Sides::empty(),
            liquid: false,
        }
    }

    /// Sets the emitted light.
    #[must_use]
    pub const fn with_luminance(mut self, luminance: u8) -> Self {
        self.luminance = luminance;
        self
    }

    /// Sets the faces that block light.
    #[must_use]
    pub const fn with_full_sides(mut self, full_sides: Sides) -> Self {
        self.full_sides = full_sides;
        self
    }

    /// Marks the block as a liquid.
    #[must_use]
    pub const fn as_liquid(mut self) -> Self {
        self.liquid = true;
        self
    }

    /// Whether the face pointing in `side` fully blocks light.
    #[must_use]
    #[inline]
    pub fn is_full_side(&self, side: Direction) -> bool {
        self.full_sides.has(side)
    }
}
