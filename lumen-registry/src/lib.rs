//! Block descriptors and the registry resolving block ids to them.

pub mod block;
pub mod registry;
pub mod vanilla;

pub use block::Block;
pub use registry::BlockRegistry;

/// Behaviour shared by registries that are filled once at startup.
pub trait RegistryExt {
    /// Prevents any further registration.
    fn freeze(&mut self);
}
