//! Id and name lookup of registered blocks.

use lumen_utils::BlockId;
use rustc_hash::FxHashMap;

use crate::{Block, RegistryExt};

/// Resolves block ids and names to block descriptors.
pub struct BlockRegistry {
    by_id: FxHashMap<BlockId, Block>,
    by_name: FxHashMap<&'static str, BlockId>,
    allows_registering: bool,
}

impl BlockRegistry {
    /// Creates an empty registry open for registration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_id: FxHashMap::default(),
            by_name: FxHashMap::default(),
            allows_registering: true,
        }
    }

    /// Registers a block.
    ///
    /// # Panics
    /// Panics if the registry is frozen, or if the block's id or name is already taken.
    pub fn register(&mut self, block: Block) {
        if !self.allows_registering {
            panic!("Cannot register block after registry is frozen");
        }
        if self.by_id.contains_key(&block.id) {
            panic!("Block id {:?} is already registered", block.id);
        }
        if self.by_name.contains_key(block.name) {
            panic!("Block {} is already registered", block.name);
        }
        log::trace!("Registered block {} as {:?}", block.name, block.id);
        self.by_name.insert(block.name, block.id);
        self.by_id.insert(block.id, block);
    }

    /// Looks up a descriptor by id.
    #[must_use]
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.by_id.get(&id)
    }

    /// Looks up an id by name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    /// Number of registered blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether nothing has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Iterates over every registered block, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.by_id.values()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryExt for BlockRegistry {
    fn freeze(&mut self) {
        self.allows_registering = false;
    }
}
