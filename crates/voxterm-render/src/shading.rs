//! Glyph and colour for a ray hit.

use voxterm_core::constants::{EDGE_THRESHOLD, ENABLE_SHADING};
use voxterm_core::TermColor;
use voxterm_physics::RayHit;
use voxterm_world::BlockRegistry;

/// Glyph drawn where a face meets its neighbours.
pub const EDGE_GLYPH: char = '#';

/// Below this brightness the bright modifier is stripped.
const DIM_BELOW: f32 = 0.4;
/// Above this brightness the bright modifier is added.
const BRIGHT_ABOVE: f32 = 0.8;

fn near_edge(v: f32) -> bool {
    let frac = v - v.floor();
    frac < EDGE_THRESHOLD || frac > 1.0 - EDGE_THRESHOLD
}

/// Character for a hit: the block glyph, or [`EDGE_GLYPH`] close to the
/// border of the struck face.
pub fn hit_glyph(hit: &RayHit, registry: &BlockRegistry) -> char {
    let (u, v) = hit.face.plane_axes();
    if near_edge(hit.point[u.index()]) || near_edge(hit.point[v.index()]) {
        EDGE_GLYPH
    } else {
        registry.get(hit.block).glyph
    }
}

/// Foreground colour for a hit, brightened or dimmed by its shading.
pub fn hit_color(hit: &RayHit, registry: &BlockRegistry) -> TermColor {
    let color = registry.get(hit.block).fg;
    if !ENABLE_SHADING {
        return color;
    }
    if hit.brightness < DIM_BELOW {
        color.dim()
    } else if hit.brightness > BRIGHT_ABOVE {
        color.bright()
    } else {
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec3, Vec3};
    use voxterm_core::{BlockId, Face};

    fn hit(point: Vec3, face: Face, brightness: f32) -> RayHit {
        RayHit {
            block: BlockId::DIRT,
            distance: 1.0,
            point,
            face,
            brightness,
            cell: IVec3::ZERO,
        }
    }

    #[test]
    fn face_centre_uses_block_glyph() {
        let registry = BlockRegistry::default();
        let glyph = hit_glyph(&hit(Vec3::new(0.5, 0.5, 1.0), Face::PosZ, 0.5), &registry);
        assert_eq!(glyph, registry.get(BlockId::DIRT).glyph);
    }

    #[test]
    fn face_border_draws_edge() {
        let registry = BlockRegistry::default();
        // The z coordinate is the face plane itself and is ignored.
        assert_eq!(
            hit_glyph(&hit(Vec3::new(0.01, 0.5, 1.0), Face::PosZ, 0.5), &registry),
            EDGE_GLYPH
        );
        assert_eq!(
            hit_glyph(&hit(Vec3::new(3.0, 0.5, 2.99), Face::NegX, 0.5), &registry),
            EDGE_GLYPH
        );
        assert_ne!(
            hit_glyph(&hit(Vec3::new(3.0, 0.5, 2.5), Face::NegX, 0.5), &registry),
            EDGE_GLYPH
        );
    }

    #[test]
    fn brightness_bands() {
        let registry = BlockRegistry::default();
        let base = registry.get(BlockId::DIRT).fg;
        let at = |b| hit_color(&hit(Vec3::splat(0.5), Face::PosZ, b), &registry);
        assert!(!at(0.3).is_bright());
        assert!(at(0.9).is_bright());
        assert_eq!(at(0.6), base);
        assert_eq!(at(0.9).base(), base.base());
    }
}
