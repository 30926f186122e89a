//! Camera basis and per-cell ray directions.

use glam::Vec3;
use voxterm_core::constants::{FOV_HORIZONTAL, FOV_VERTICAL};
use voxterm_physics::Player;

/// Orthonormal view basis with world up fixed to +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl CameraBasis {
    /// Build a basis looking along `direction`.
    ///
    /// `right = forward × Z` and `up = right × forward`. The direction must
    /// not be vertical; player pitch is clamped so it never is.
    pub fn new(position: Vec3, direction: Vec3) -> Self {
        let forward = direction.normalize_or_zero();
        let right = forward.cross(Vec3::Z);
        let up = right.cross(forward);
        Self {
            position,
            forward,
            right: right.normalize_or_zero(),
            up: up.normalize_or_zero(),
        }
    }

    /// Basis at the player's eye.
    pub fn from_player(player: &Player) -> Self {
        Self::new(player.camera_position(), player.view_direction())
    }

    /// Ray direction through cell `(x, y)` of a `width x height` screen.
    ///
    /// The horizontal offset is scaled by the screen aspect so cells keep
    /// their proportions.
    pub fn ray_direction(&self, x: u16, y: u16, width: u16, height: u16) -> Vec3 {
        let (w, h) = (f32::from(width.max(1)), f32::from(height.max(1)));
        let aspect = w / h;
        let sx = (2.0 * f32::from(x) / w - 1.0) * aspect * FOV_HORIZONTAL;
        let sy = (1.0 - 2.0 * f32::from(y) / h) * FOV_VERTICAL;
        (self.forward + self.right * sx + self.up * sy).normalize_or_zero()
    }
}
