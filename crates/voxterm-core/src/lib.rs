//! Core types, math, and constants for the voxterm engine.
//!
//! This crate provides the foundational types used throughout the engine:
//! - Block ids, block-type records and terminal colours
//! - Rays and axis-aligned faces
//! - Engine-wide tuning constants
//! - The shared error type

pub mod error;
pub mod math;
pub mod types;

pub use error::{Error, Result};
pub use math::{Face, Ray};
pub use types::{BlockId, BlockType, TermColor};

/// Engine-wide constants.
///
/// Everything that tunes the simulation is fixed at compile time.
pub mod constants {
    /// Default world width (x extent) in blocks.
    pub const WORLD_WIDTH: i32 = 64;
    /// Default world height (y extent) in blocks.
    pub const WORLD_HEIGHT: i32 = 64;
    /// Default world depth (z extent, vertical) in blocks.
    pub const WORLD_DEPTH: i32 = 16;
    /// Minimum terrain surface height.
    pub const GROUND_HEIGHT: i32 = 3;

    /// Horizontal field of view half-extent multiplier.
    pub const FOV_HORIZONTAL: f32 = 1.0;
    /// Vertical field of view half-extent multiplier.
    pub const FOV_VERTICAL: f32 = 0.7;
    /// Eye height above the block the player stands on.
    pub const EYE_HEIGHT: f32 = 1.6;
    /// Maximum distance a render ray travels.
    pub const FAR_PLANE: f32 = 20.0;
    /// Distance from a face edge (in block units) drawn as a grid line.
    pub const EDGE_THRESHOLD: f32 = 0.03;

    /// Downward acceleration in blocks per second squared.
    pub const GRAVITY: f32 = 0.05;
    /// Vertical velocity applied by a jump.
    pub const JUMP_FORCE: f32 = 0.4;
    /// Base horizontal speed added per movement command.
    pub const PLAYER_SPEED: f32 = 0.15;
    /// Rotation applied per frame while a look key is held.
    pub const PLAYER_TURN_SPEED: f32 = 0.05;
    /// Player collision height.
    pub const PLAYER_HEIGHT: f32 = 1.8;
    /// Player collision width.
    pub const PLAYER_WIDTH: f32 = 0.6;
    /// Velocity magnitude cap.
    pub const MAX_SPEED: f32 = 10.0;
    /// Pitch limit in radians.
    pub const MAX_PITCH: f32 = 1.5;
    /// Reach of place/break interactions.
    pub const INTERACTION_REACH: f32 = 5.0;

    /// Capacity of a block registry.
    pub const MAX_BLOCK_TYPES: usize = 16;
    /// Number of hotbar slots.
    pub const INVENTORY_SLOTS: u8 = 9;
    /// Default world save file.
    pub const SAVE_FILE: &str = "world.dat";

    /// Whether distant hits are darkened.
    pub const ENABLE_FOG: bool = true;
    /// Whether hit brightness adjusts the bright colour modifier.
    pub const ENABLE_SHADING: bool = true;
    /// Distance where fog starts.
    pub const FOG_START: f32 = 10.0;
    /// Distance where fog reaches full strength.
    pub const FOG_END: f32 = 15.0;
    /// Fraction of brightness removed at full fog.
    pub const FOG_STRENGTH: f32 = 0.8;

    /// Lower bound of every shaded brightness.
    pub const MIN_BRIGHTNESS: f32 = 0.2;
    /// Attenuation applied per occluding block above a cell.
    pub const OCCLUSION_FACTOR: f32 = 0.7;
    /// Time of day advanced per second of game time.
    pub const DAY_SPEED: f32 = 0.001;

    /// Target frame rate of the game loop.
    pub const TARGET_FPS: u32 = 30;
}
