use lumen_registry::Block;
use lumen_utils::BlockPos;

/// A block replaced at a position: the unit of input to light propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockChange {
    /// Where the block changed.
    pub pos: BlockPos,
    /// The block that was there before.
    pub from: Block,
    /// The block that is there now.
    pub to: Block,
}

impl BlockChange {
    /// Creates a change record.
    #[must_use]
    pub const fn new(pos: BlockPos, from: Block, to: Block) -> Self {
        Self { pos, from, to }
    }
}
