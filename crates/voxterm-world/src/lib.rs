//! Voxel world storage, persistence and generation for the voxterm engine.

pub mod generation;
pub mod grid;
pub mod persistence;
pub mod registry;
pub mod world;

pub use generation::{TerrainConfig, TerrainGenerator};
pub use grid::VoxelGrid;
pub use registry::BlockRegistry;
pub use world::World;

/// World seed for procedural generation.
pub type WorldSeed = u64;
