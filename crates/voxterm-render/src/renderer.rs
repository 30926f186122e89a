//! Per-cell raycast renderer.

use rayon::prelude::*;
use tracing::{debug, info};
use voxterm_core::constants::FAR_PLANE;
use voxterm_core::{Ray, Result, TermColor};
use voxterm_physics::{cast_ray_with, Player, RayConfig};
use voxterm_world::World;

use crate::camera::CameraBasis;
use crate::framebuffer::{Cell, Framebuffer};
use crate::overlay::{self, Overlays};
use crate::shading::{hit_color, hit_glyph};

/// Sky brightness above which the sky is drawn in daylight colours.
const DAYLIGHT: f32 = 0.5;

/// Casts one ray per framebuffer cell and draws overlays on top.
#[derive(Debug)]
pub struct Renderer {
    framebuffer: Framebuffer,
    overlays: Overlays,
}

impl Renderer {
    /// Create a new renderer for a `width x height` screen.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        info!(width, height, "Creating renderer");
        Ok(Self {
            framebuffer: Framebuffer::new(width, height)?,
            overlays: Overlays::default(),
        })
    }

    #[inline]
    pub const fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    #[inline]
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    #[inline]
    pub const fn overlays(&self) -> Overlays {
        self.overlays
    }

    /// Flip one overlay on or off. Returns whether it is now shown.
    pub fn toggle(&mut self, overlay: Overlays) -> bool {
        self.overlays.toggle(overlay);
        let shown = self.overlays.contains(overlay);
        debug!(?overlay, shown, "overlay toggled");
        shown
    }

    /// Match a new screen size. A no-op if the size is unchanged.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        if (width, height) == (self.framebuffer.width(), self.framebuffer.height()) {
            return Ok(());
        }
        info!(width, height, "Resizing renderer");
        self.framebuffer.resize(width, height)
    }

    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Draw the world as seen from the player's eye.
    ///
    /// Rows are cast in parallel. Hits only replace a cell when strictly
    /// nearer than its recorded depth; misses paint a two-band sky.
    pub fn render_world(&mut self, world: &World, player: &Player) {
        let camera = CameraBasis::from_player(player);
        let (width, height) = (self.framebuffer.width(), self.framebuffer.height());
        let config = RayConfig::default();
        let registry = world.registry();

        let (upper_sky, lower_sky) = if world.sky_brightness() > DAYLIGHT {
            (TermColor::CYAN, TermColor::BLUE)
        } else {
            (TermColor::BLACK, TermColor::BLACK)
        };

        self.framebuffer
            .rows_mut()
            .enumerate()
            .for_each(|(y, (cells, depths))| {
                let y = y as u16;
                for (x, (cell, depth)) in cells.iter_mut().zip(depths.iter_mut()).enumerate() {
                    let dir = camera.ray_direction(x as u16, y, width, height);
                    let ray = Ray::new(camera.position, dir);
                    match cast_ray_with(world, &ray, FAR_PLANE, &config).hit {
                        Some(hit) if hit.distance < *depth => {
                            *depth = hit.distance;
                            *cell = Cell::new(
                                hit_glyph(&hit, registry),
                                hit_color(&hit, registry),
                                TermColor::BLACK,
                            );
                        }
                        Some(_) => {}
                        None => {
                            let bg = if u32::from(y) * 2 < u32::from(height) {
                                upper_sky
                            } else {
                                lower_sky
                            };
                            *cell = Cell::new(' ', TermColor::BLACK, bg);
                        }
                    }
                }
            });
    }

    /// Draw the enabled overlays and the frame rate.
    pub fn render_overlays(&mut self, world: &World, player: &Player, fps: f32) {
        let fb = &mut self.framebuffer;
        if self.overlays.contains(Overlays::HUD) {
            overlay::draw_hud(fb, world, player);
        }
        if self.overlays.contains(Overlays::DEBUG) {
            overlay::draw_debug(fb, world, player);
        }
        if self.overlays.contains(Overlays::MINIMAP) {
            overlay::draw_minimap(fb, world, player);
        }
        overlay::draw_fps(fb, fps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec3, Vec3};
    use voxterm_core::BlockId;

    fn floor_world() -> World {
        let mut world = World::new(32, 32, 8).unwrap();
        world
            .grid_mut()
            .fill(IVec3::ZERO, IVec3::new(31, 31, 1), BlockId::STONE);
        world
    }

    #[test]
    fn horizon_splits_ground_and_sky() {
        let world = floor_world();
        let player = Player::new(Vec3::new(16.5, 16.5, 3.6));
        let mut renderer = Renderer::new(40, 20).unwrap();
        renderer.render_world(&world, &player);
        let fb = renderer.framebuffer();

        // Top row looks up into the daylight sky.
        let top = fb.get(20, 0).unwrap();
        assert_eq!(top.glyph, ' ');
        assert_eq!(top.bg, TermColor::CYAN);
        assert_eq!(fb.depth_at(20, 0), Some(f32::INFINITY));

        // Bottom row looks down at the floor.
        let bottom = fb.get(20, 19).unwrap();
        assert_eq!(bottom.bg, TermColor::BLACK);
        assert!(fb.depth_at(20, 19).unwrap() < FAR_PLANE);
    }

    #[test]
    fn night_sky_is_black() {
        let mut world = World::new(8, 8, 8).unwrap();
        world.set_time(0.0);
        let player = Player::new(Vec3::new(4.5, 4.5, 4.5));
        let mut renderer = Renderer::new(10, 10).unwrap();
        renderer.render_world(&world, &player);
        assert!(renderer
            .framebuffer()
            .cells()
            .iter()
            .all(|c| c.bg == TermColor::BLACK && c.glyph == ' '));
    }

    #[test]
    fn lower_half_of_day_sky_is_blue() {
        let world = World::new(8, 8, 8).unwrap();
        let player = Player::new(Vec3::new(4.5, 4.5, 4.5));
        let mut renderer = Renderer::new(10, 10).unwrap();
        renderer.render_world(&world, &player);
        let fb = renderer.framebuffer();
        assert_eq!(fb.get(3, 4).map(|c| c.bg), Some(TermColor::CYAN));
        assert_eq!(fb.get(3, 5).map(|c| c.bg), Some(TermColor::BLUE));
    }

    #[test]
    fn nearer_hits_already_drawn_are_kept() {
        let world = floor_world();
        let player = Player::new(Vec3::new(16.5, 16.5, 3.6));
        let mut renderer = Renderer::new(40, 20).unwrap();
        let marker = Cell::new('@', TermColor::RED, TermColor::BLACK);
        assert!(renderer
            .framebuffer_mut()
            .set_pixel_depth(20, 19, marker, 0.01));

        renderer.render_world(&world, &player);
        assert_eq!(renderer.framebuffer().get(20, 19), Some(&marker));
    }

    #[test]
    fn overlay_toggles() {
        let mut renderer = Renderer::new(80, 24).unwrap();
        assert!(renderer.toggle(Overlays::DEBUG));
        assert!(!renderer.toggle(Overlays::HUD));
        assert_eq!(renderer.overlays(), Overlays::DEBUG | Overlays::MINIMAP);

        let world = floor_world();
        let player = Player::new(Vec3::new(16.5, 16.5, 3.6));
        renderer.render_overlays(&world, &player, 29.97);
        let fb = renderer.framebuffer();
        assert_eq!(fb.get(40, 12).map(|c| c.glyph), Some(' '));
        assert_eq!(fb.get(2, 4).map(|c| c.glyph), Some('V'));
        assert_eq!(fb.get(68, 2).map(|c| c.glyph), Some('F'));
    }

    #[test]
    fn resize_reallocates() {
        let mut renderer = Renderer::new(10, 10).unwrap();
        renderer.resize(30, 5).unwrap();
        assert_eq!(renderer.framebuffer().cells().len(), 150);
        let world = World::new(4, 4, 4).unwrap();
        renderer.render_world(&world, &Player::new(Vec3::splat(2.0)));
    }
}
