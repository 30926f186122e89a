//! Procedural terrain generation.

use glam::IVec3;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};
use voxterm_core::constants::GROUND_HEIGHT;
use voxterm_core::BlockId;

use crate::world::World;
use crate::WorldSeed;

/// Terrain generator configuration.
#[derive(Debug, Clone)]
pub struct TerrainConfig {
    /// Seed for noise generation and tree placement.
    pub seed: WorldSeed,
    /// Noise frequency of the heightmap per block.
    pub terrain_scale: f64,
    /// Fraction of the world depth the tallest terrain reaches.
    pub height_fraction: f64,
    /// Lowest allowed surface height.
    pub min_height: i32,
    /// Number of noise octaves for detail.
    pub octaves: usize,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Depth of the dirt layer below the surface block.
    pub dirt_depth: i32,
    /// Noise frequency of the moisture map per block.
    pub moisture_scale: f64,
    /// Moisture above which the surface becomes a pond.
    pub water_threshold: f64,
    /// Moisture below which the surface becomes sand.
    pub sand_threshold: f64,
    /// One tree attempt per this many columns.
    pub tree_spacing: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            terrain_scale: 0.05,
            height_fraction: 0.7,
            min_height: GROUND_HEIGHT,
            octaves: 4,
            persistence: 0.5,
            dirt_depth: 3,
            moisture_scale: 0.1,
            water_threshold: 0.6,
            sand_threshold: -0.3,
            tree_spacing: 100,
        }
    }
}

/// Procedural terrain generator using fractal noise.
pub struct TerrainGenerator {
    config: TerrainConfig,
    height_noise: Fbm<Perlin>,
    moisture_noise: Fbm<Perlin>,
}

impl TerrainGenerator {
    /// Create a new terrain generator with the given configuration.
    pub fn new(config: TerrainConfig) -> Self {
        let height_noise = Fbm::<Perlin>::new(config.seed as u32)
            .set_octaves(config.octaves)
            .set_persistence(config.persistence);
        let moisture_noise = Fbm::<Perlin>::new(config.seed.wrapping_add(1) as u32)
            .set_octaves(2)
            .set_persistence(0.5);

        Self {
            config,
            height_noise,
            moisture_noise,
        }
    }

    /// Create a terrain generator with default configuration.
    pub fn with_seed(seed: WorldSeed) -> Self {
        Self::new(TerrainConfig {
            seed,
            ..Default::default()
        })
    }

    /// Get the terrain configuration.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Surface height of a column in a world `depth` blocks tall.
    ///
    /// The surface block sits at `height - 1`; the result is never below the
    /// configured minimum.
    pub fn height_at(&self, x: i32, y: i32, depth: i32) -> i32 {
        let nx = f64::from(x) * self.config.terrain_scale;
        let ny = f64::from(y) * self.config.terrain_scale;
        let noise = self.height_noise.get([nx, ny]).clamp(-1.0, 1.0);
        let height = (noise * 0.5 + 0.5) * f64::from(depth) * self.config.height_fraction;
        (height as i32).max(self.config.min_height)
    }

    fn moisture_at(&self, x: i32, y: i32) -> f64 {
        let scale = self.config.moisture_scale;
        self.moisture_noise
            .get([f64::from(x) * scale, f64::from(y) * scale])
    }

    /// Heightmap for a `width x height` area, in row-major (y, x) order.
    pub fn heightmap(&self, width: i32, height: i32, depth: i32) -> Vec<i32> {
        (0..height)
            .into_par_iter()
            .flat_map_iter(|y| (0..width).map(move |x| self.height_at(x, y, depth)))
            .collect()
    }

    /// Fill `world` with terrain and trees.
    ///
    /// Everything previously in the world is replaced.
    pub fn generate(&self, world: &mut World) {
        let (width, height, depth) = (world.width(), world.height(), world.depth());
        let heights = self.heightmap(width, height, depth);
        let dirt_depth = self.config.dirt_depth;

        let size = world.grid().size();
        world.grid_mut().fill(IVec3::ZERO, size, BlockId::AIR);

        for y in 0..height {
            for x in 0..width {
                let surface = heights[(y * width + x) as usize];
                for z in 0..surface.min(depth) {
                    let block = if z < surface - 1 - dirt_depth {
                        BlockId::STONE
                    } else if z < surface - 1 {
                        BlockId::DIRT
                    } else {
                        self.surface_block(x, y)
                    };
                    world.set(x, y, z, block);
                }
                if self.is_pond(x, y) {
                    world.set(x, y, surface, BlockId::WATER);
                }
            }
        }

        let trees = self.plant_trees(world, &heights);
        info!(
            seed = self.config.seed,
            width,
            height,
            depth,
            trees,
            blocks = world.grid().count_non_air(),
            "terrain generated"
        );
    }

    fn is_pond(&self, x: i32, y: i32) -> bool {
        self.moisture_at(x, y) > self.config.water_threshold
    }

    fn surface_block(&self, x: i32, y: i32) -> BlockId {
        let moisture = self.moisture_at(x, y);
        if moisture > self.config.water_threshold {
            BlockId::DIRT
        } else if moisture < self.config.sand_threshold {
            BlockId::SAND
        } else {
            BlockId::GRASS
        }
    }

    /// Place trees on grass columns. Returns how many were planted.
    fn plant_trees(&self, world: &mut World, heights: &[i32]) -> usize {
        let (width, height, depth) = (world.width(), world.height(), world.depth());
        if width < 8 || height < 8 || self.config.tree_spacing <= 0 {
            return 0;
        }

        let attempts = (width * height) / self.config.tree_spacing;
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut planted = 0;

        for _ in 0..attempts {
            let tx = rng.gen_range(3..=width - 4);
            let ty = rng.gen_range(3..=height - 4);
            let trunk = rng.gen_range(4..=6);
            let surface = heights[(ty * width + tx) as usize];

            if surface >= depth - 5 || world.get(tx, ty, surface - 1) != BlockId::GRASS {
                continue;
            }

            for z in surface..surface + trunk {
                world.set(tx, ty, z, BlockId::WOOD);
            }

            let crown = surface + trunk - 1;
            for lz in crown - 2..=crown + 1 {
                for ly in ty - 2..=ty + 2 {
                    for lx in tx - 2..=tx + 2 {
                        let (dx, dy, dz) = (lx - tx, ly - ty, lz - crown);
                        let dist = ((dx * dx + dy * dy) as f32 + (dz * dz) as f32 * 2.0).sqrt();
                        if dist < 2.5 && world.get(lx, ly, lz).is_air() {
                            world.set(lx, ly, lz, BlockId::LEAVES);
                        }
                    }
                }
            }
            planted += 1;
        }

        planted
    }

    /// Build a small brick house near the middle of the world.
    ///
    /// The house is 7 wide, 9 long and 4 tall with a wooden floor and roof,
    /// a door on the south wall and a window on the east wall. Returns false
    /// when it does not fit.
    pub fn generate_structures(&self, world: &mut World) -> bool {
        const WIDTH: i32 = 7;
        const LENGTH: i32 = 9;
        const HEIGHT: i32 = 4;

        let hx = world.width() / 2;
        let hy = world.height() / 2;
        let hz = world.surface_height(hx, hy).map_or(0, |z| z + 1);

        if hx + WIDTH >= world.width()
            || hy + LENGTH >= world.height()
            || hz + HEIGHT >= world.depth()
        {
            debug!(hx, hy, hz, "house does not fit");
            return false;
        }

        let origin = IVec3::new(hx, hy, hz);
        let far = origin + IVec3::new(WIDTH - 1, LENGTH - 1, HEIGHT);
        let grid = world.grid_mut();

        grid.fill(origin, far, BlockId::BRICK);
        grid.fill(origin + IVec3::new(1, 1, 1), far - IVec3::new(1, 1, 1), BlockId::AIR);
        grid.fill(origin, origin + IVec3::new(WIDTH - 1, LENGTH - 1, 0), BlockId::WOOD);
        grid.fill(origin.with_z(hz + HEIGHT), far, BlockId::WOOD);

        // Door: two cells tall in the middle of the south wall.
        grid.fill(
            origin + IVec3::new(WIDTH / 2, 0, 1),
            origin + IVec3::new(WIDTH / 2, 0, 2),
            BlockId::AIR,
        );
        grid.set_at(origin + IVec3::new(WIDTH - 1, LENGTH / 2, 2), BlockId::AIR);

        info!(x = hx, y = hy, z = hz, "house built");
        true
    }
}
