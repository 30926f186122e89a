//! The simulated world: grid, registry and time of day.

use glam::IVec3;
use tracing::debug;
use voxterm_core::constants::{
    DAY_SPEED, EYE_HEIGHT, GROUND_HEIGHT, MIN_BRIGHTNESS, OCCLUSION_FACTOR,
};
use voxterm_core::math::smoothstep;
use voxterm_core::{BlockId, BlockType, Result};

use crate::grid::VoxelGrid;
use crate::registry::BlockRegistry;

/// A block world with its own palette and day/night state.
///
/// The world owns its registry; every query that needs block metadata goes
/// through it rather than a process-wide table.
#[derive(Clone, Debug)]
pub struct World {
    grid: VoxelGrid,
    registry: BlockRegistry,
    time_of_day: f32,
    sky_brightness: f32,
}

impl World {
    /// Create an all-air world using the default registry.
    pub fn new(width: i32, height: i32, depth: i32) -> Result<Self> {
        Ok(Self::from_grid(VoxelGrid::new(width, height, depth)?))
    }

    /// Wrap a grid with the default registry, starting at noon.
    pub fn from_grid(grid: VoxelGrid) -> Self {
        Self::with_registry(grid, BlockRegistry::default())
    }

    /// Wrap a grid with a custom registry, starting at noon.
    pub fn with_registry(grid: VoxelGrid, registry: BlockRegistry) -> Self {
        Self {
            grid,
            registry,
            time_of_day: 0.5,
            sky_brightness: 1.0,
        }
    }

    #[inline]
    pub const fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut VoxelGrid {
        &mut self.grid
    }

    #[inline]
    pub const fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    #[inline]
    pub const fn width(&self) -> i32 {
        self.grid.width()
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.grid.height()
    }

    #[inline]
    pub const fn depth(&self) -> i32 {
        self.grid.depth()
    }

    /// Block at a cell, air outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.grid.get(x, y, z)
    }

    /// Set a cell.
    ///
    /// Writes outside the grid and ids the registry does not know are ignored
    /// and return false.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, block: BlockId) -> bool {
        self.registry.contains(block) && self.grid.set(x, y, z, block)
    }

    /// Set a cell by vector.
    #[inline]
    pub fn set_at(&mut self, cell: IVec3, block: BlockId) -> bool {
        self.set(cell.x, cell.y, cell.z, block)
    }

    /// Returns true if the coordinate lies inside the grid.
    #[inline]
    pub const fn is_valid_position(&self, x: i32, y: i32, z: i32) -> bool {
        self.grid.is_valid_position(x, y, z)
    }

    /// Whether the cell holds a registered solid block.
    ///
    /// False outside the grid and for ids the registry does not know.
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.registry.is_solid(self.grid.get(x, y, z))
    }

    /// Block type record, air for unknown ids.
    #[inline]
    pub fn block_type(&self, id: BlockId) -> &BlockType {
        self.registry.get(id)
    }

    /// Sky light reaching a cell.
    ///
    /// Starts from the sky brightness and darkens by [`OCCLUSION_FACTOR`] for
    /// every non-air, non-water cell above, all the way to the ceiling. Valid
    /// cells always land in `[0.2, 1.0]`; cells outside the grid get `0.0`.
    pub fn brightness_at(&self, x: i32, y: i32, z: i32) -> f32 {
        if !self.is_valid_position(x, y, z) {
            return 0.0;
        }

        let mut brightness = self.sky_brightness;
        for above in z + 1..self.depth() {
            let block = self.grid.get(x, y, above);
            if block != BlockId::AIR && block != BlockId::WATER {
                brightness *= OCCLUSION_FACTOR;
            }
        }

        brightness.clamp(MIN_BRIGHTNESS, 1.0)
    }

    /// Time of day in `[0, 1)`: 0 is midnight, 0.5 is noon.
    #[inline]
    pub const fn time_of_day(&self) -> f32 {
        self.time_of_day
    }

    /// Current sky brightness.
    #[inline]
    pub const fn sky_brightness(&self) -> f32 {
        self.sky_brightness
    }

    /// Set the time of day (wrapped into `[0, 1)`) and update sky light.
    pub fn set_time(&mut self, time: f32) {
        let wrapped = time.rem_euclid(1.0);
        self.time_of_day = if wrapped >= 1.0 { 0.0 } else { wrapped };
        self.update_lighting();
    }

    /// Advance the clock by `dt` seconds of game time.
    pub fn advance_time(&mut self, dt: f32) {
        self.set_time(self.time_of_day + DAY_SPEED * dt);
    }

    /// Recompute sky brightness from the time of day.
    pub fn update_lighting(&mut self) {
        let t = self.time_of_day;
        self.sky_brightness = if t < 0.25 {
            smoothstep(0.0, 0.25, t) * 0.8 + 0.2
        } else if t < 0.5 {
            smoothstep(0.25, 0.5, t) * 0.2 + 0.8
        } else if t < 0.75 {
            (1.0 - smoothstep(0.5, 0.75, t)) * 0.2 + 0.8
        } else {
            (1.0 - smoothstep(0.75, 1.0, t)) * 0.8 + 0.2
        };
    }

    /// Restore persisted time and sky values verbatim.
    pub(crate) fn restore_sky(&mut self, time_of_day: f32, sky_brightness: f32) {
        self.time_of_day = time_of_day;
        self.sky_brightness = sky_brightness;
    }

    /// Highest non-air cell in a column, if any.
    pub fn surface_height(&self, x: i32, y: i32) -> Option<i32> {
        (0..self.depth()).rev().find(|&z| !self.get(x, y, z).is_air())
    }

    /// Eye position z for a player spawning in column `(x, y)`.
    ///
    /// Picks the highest solid cell with two free cells above it; falls back
    /// to standing on the minimum ground height.
    pub fn find_spawn(&self, x: i32, y: i32) -> f32 {
        let spawn = (0..self.depth() - 1).rev().find(|&z| {
            self.is_solid(x, y, z) && !self.is_solid(x, y, z + 1) && !self.is_solid(x, y, z + 2)
        });
        debug!(x, y, ?spawn, "spawn column searched");
        spawn.map_or(GROUND_HEIGHT as f32 + EYE_HEIGHT, |z| {
            z as f32 + 1.0 + EYE_HEIGHT
        })
    }
}
