//! Chunk storage: blocks plus three light channels per chunk.

pub mod flat_generator;
pub mod level_chunk;
pub mod light_storage;
pub mod ram_store;

pub use flat_generator::FlatChunkGenerator;
pub use level_chunk::{BlockStorage, Chunk, LightChannel};
pub use light_storage::LightStorage;
pub use ram_store::RamChunkStore;
