//! Voxel grid traversal (3D DDA).

use glam::{IVec3, Vec3};
use voxterm_core::constants::{ENABLE_FOG, FOG_END, FOG_START, FOG_STRENGTH, MIN_BRIGHTNESS};
use voxterm_core::math::{cell_of, Axis};
use voxterm_core::{BlockId, Face, Ray};
use voxterm_world::World;

/// A ray striking a non-air cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Block in the struck cell.
    pub block: BlockId,
    /// Distance from the ray origin, never beyond the requested maximum.
    pub distance: f32,
    /// Point where the ray enters the cell.
    pub point: Vec3,
    /// Face the ray entered through.
    pub face: Face,
    /// Shaded brightness in `[0.2, 1.0]`.
    pub brightness: f32,
    /// The struck cell.
    pub cell: IVec3,
}

impl RayHit {
    /// Outward normal of the struck face.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.face.normal()
    }
}

/// Outcome of a cast. A miss reports the full requested distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCast {
    pub hit: Option<RayHit>,
    pub distance: f32,
}

impl RayCast {
    #[inline]
    pub const fn miss(max_distance: f32) -> Self {
        Self {
            hit: None,
            distance: max_distance,
        }
    }

    #[inline]
    pub const fn is_hit(&self) -> bool {
        self.hit.is_some()
    }
}

/// Tunables for a cast.
#[derive(Debug, Clone, Copy)]
pub struct RayConfig {
    /// Darken hits between the fog start and end distances.
    pub fog: bool,
}

impl Default for RayConfig {
    fn default() -> Self {
        Self { fog: ENABLE_FOG }
    }
}

/// Cast a ray with the default configuration.
pub fn cast_ray(world: &World, origin: Vec3, direction: Vec3, max_distance: f32) -> RayCast {
    cast_ray_with(
        world,
        &Ray::new(origin, direction),
        max_distance,
        &RayConfig::default(),
    )
}

/// Walk the grid cell by cell along `ray` until a non-air cell is entered.
///
/// The cell containing the origin is never tested. Each step advances along
/// the axis whose next boundary is strictly closest, with ties resolved
/// X, then Y, then Z. Water counts as a hit.
///
/// Cells outside the grid end the walk only once the ray is moving away from
/// the grid on that axis, so rays starting outside still reach it. A zero
/// direction is a miss.
pub fn cast_ray_with(world: &World, ray: &Ray, max_distance: f32, config: &RayConfig) -> RayCast {
    if ray.is_degenerate() {
        return RayCast::miss(max_distance);
    }

    let origin = ray.origin;
    let dir = ray.direction;
    let size = world.grid().size();

    let mut cell = cell_of(origin);
    let mut step = IVec3::ZERO;
    let mut t_delta = Vec3::splat(f32::INFINITY);
    let mut t_max = Vec3::splat(f32::INFINITY);

    for axis in 0..3 {
        let d = dir[axis];
        if d > 0.0 {
            step[axis] = 1;
            t_delta[axis] = 1.0 / d;
            t_max[axis] = (cell[axis] as f32 + 1.0 - origin[axis]) * t_delta[axis];
        } else if d < 0.0 {
            step[axis] = -1;
            t_delta[axis] = 1.0 / -d;
            t_max[axis] = (origin[axis] - cell[axis] as f32) * t_delta[axis];
        }
    }

    let mut distance = 0.0;
    while distance < max_distance {
        let axis = if t_max.x < t_max.y && t_max.x < t_max.z {
            Axis::X
        } else if t_max.y < t_max.z {
            Axis::Y
        } else {
            Axis::Z
        };
        let i = axis.index();

        distance = t_max[i];
        t_max[i] += t_delta[i];
        cell[i] += step[i];

        if distance > max_distance {
            break;
        }

        if !world.is_valid_position(cell.x, cell.y, cell.z) {
            if is_leaving(cell, step, size) {
                break;
            }
            continue;
        }

        let block = world.get(cell.x, cell.y, cell.z);
        if block.is_air() {
            continue;
        }

        let face = Face::entered_by(axis, step[i]);
        let mut brightness = world.brightness_at(cell.x, cell.y, cell.z) * face.brightness();
        if config.fog {
            let fog = ((distance - FOG_START) / (FOG_END - FOG_START)).clamp(0.0, 1.0);
            brightness *= 1.0 - fog * FOG_STRENGTH;
        }

        return RayCast {
            hit: Some(RayHit {
                block,
                distance,
                point: ray.at(distance),
                face,
                brightness: brightness.clamp(MIN_BRIGHTNESS, 1.0),
                cell,
            }),
            distance,
        };
    }

    RayCast::miss(max_distance)
}

/// True if an out-of-grid cell can never lead back into the grid.
#[inline]
fn is_leaving(cell: IVec3, step: IVec3, size: IVec3) -> bool {
    (0..3).any(|i| (cell[i] < 0 && step[i] <= 0) || (cell[i] >= size[i] && step[i] >= 0))
}
