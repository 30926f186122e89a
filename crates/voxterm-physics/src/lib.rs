//! Voxel collision and physics for the voxterm engine.
//!
//! Everything here runs against a [`World`](voxterm_world::World): the DDA
//! raycaster shared by rendering and block targeting, the player body with
//! its per-axis collision tests, the inventory and place/break interaction.

pub mod interaction;
pub mod inventory;
pub mod player;
pub mod raycast;

pub use interaction::{break_block, inspect, place_block, target_block, Target};
pub use inventory::Inventory;
pub use player::{MovementState, Player};
pub use raycast::{cast_ray, cast_ray_with, RayCast, RayConfig, RayHit};
