//! # Lumen core
//!
//! Chunk storage and the voxel light propagation engine.

pub mod chunk;
pub mod error;
pub mod light_engine;

pub use error::LightError;
