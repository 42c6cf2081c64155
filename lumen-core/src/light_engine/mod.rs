//! Voxel light propagation using a bidirectional flood fill.
//!
//! Three channels are maintained per block: block light, sunlight, and the sunlight-regen
//! channel that decides where sunlight is seeded. Each channel's behaviour is described by
//! a [`PropagationRules`] implementation and applied by a [`BatchPropagator`].

mod batch_propagator;
mod block_change;
mod chunk_cache;
mod internal;
mod level_light_engine;
pub mod light_queue;
mod merger;
pub mod rules;
mod sunlight_regen;
pub mod world_view;

// Re-export main types for convenience
pub use batch_propagator::{BatchPropagator, Propagator, ValueChange};
pub use block_change::BlockChange;
pub use chunk_cache::ChunkCache;
pub use internal::InternalLightProcessor;
pub use level_light_engine::LevelLightEngine;
pub use light_queue::LightQueue;
pub use merger::LightMerger;
pub use rules::{
    LightRules, PropagationComparison, PropagationRules, SunlightRegenRules, SunlightRules,
};
pub use sunlight_regen::SunlightRegenBatchPropagator;
pub use world_view::{
    ChunkNeighborhood, ChunkProvider, NeighborhoodView, PropagatorWorldView, ProviderView,
    SingleChunkView,
};
