//! Player body, movement and collision.

use glam::Vec3;
use tracing::debug;
use voxterm_core::constants::{
    EYE_HEIGHT, GRAVITY, GROUND_HEIGHT, INVENTORY_SLOTS, JUMP_FORCE, MAX_PITCH, MAX_SPEED,
    PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH, WORLD_HEIGHT, WORLD_WIDTH,
};
use voxterm_core::math::{cell_of, wrap_angle};
use voxterm_core::BlockId;
use voxterm_world::World;

use crate::inventory::Inventory;

const GROUND_FRICTION: f32 = 0.8;
const AIR_FRICTION: f32 = 0.98;
const FLY_DAMPING: f32 = 0.9;
const STAMINA_REGEN: f32 = 0.1;
const STAMINA_DRAIN: f32 = 0.2;
const MAX_STAT: f32 = 100.0;
/// Minimum distance kept between the player and the horizontal world edges.
const EDGE_MARGIN: f32 = 1.0;

/// How the player is currently moving.
///
/// Ground contact is tracked apart from this: a flying player can still be
/// standing on a block, see [`Player::is_grounded`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MovementState {
    /// Standing on a solid cell; friction is high and jumping is allowed.
    Grounded,
    /// Falling or jumping under gravity.
    #[default]
    Airborne,
    /// Gravity off, vertical velocity damped each tick.
    Flying,
}

/// The player: a vertical box whose top is the camera.
///
/// `position` is the eye point; the feet are `height` below it.
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec3,
    pub velocity: Vec3,
    pub height: f32,
    pub width: f32,
    pub health: f32,
    pub inventory: Inventory,
    pitch: f32,
    yaw: f32,
    state: MovementState,
    on_ground: bool,
    stamina: f32,
    selected_slot: u8,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec3::new(
            WORLD_WIDTH as f32 / 2.0,
            WORLD_HEIGHT as f32 / 2.0,
            GROUND_HEIGHT as f32 + EYE_HEIGHT,
        ))
    }
}

impl Player {
    /// Create a player at `position` with the starting inventory.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            height: PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            health: MAX_STAT,
            inventory: Inventory::default(),
            pitch: 0.0,
            yaw: 0.0,
            state: MovementState::Airborne,
            on_ground: false,
            stamina: MAX_STAT,
            selected_slot: 1,
        }
    }

    /// Create a player centred on the spawn column in the middle of `world`.
    pub fn spawn(world: &World) -> Self {
        let x = world.width() / 2;
        let y = world.height() / 2;
        Self::new(Vec3::new(
            x as f32 + 0.5,
            y as f32 + 0.5,
            world.find_spawn(x, y),
        ))
    }

    #[inline]
    pub const fn state(&self) -> MovementState {
        self.state
    }

    /// Whether the last tick ended standing on a solid cell, flying or not.
    #[inline]
    pub const fn is_grounded(&self) -> bool {
        self.on_ground
    }

    #[inline]
    pub fn is_flying(&self) -> bool {
        self.state == MovementState::Flying
    }

    #[inline]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    #[inline]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub const fn stamina(&self) -> f32 {
        self.stamina
    }

    /// Advance the simulation by one tick.
    ///
    /// Collisions are resolved one at a time against single cells, in a fixed
    /// order: ground, X wall, Y wall, ceiling.
    pub fn update(&mut self, world: &World, dt: f32) {
        if self.is_flying() {
            self.velocity.z *= FLY_DAMPING;
        } else {
            self.velocity.z -= GRAVITY * dt;
        }

        let current = self.position;
        let mut next = current + self.velocity * dt;

        // Ground: the cell under the feet.
        let feet = cell_of(next - Vec3::Z * self.height);
        let on_ground =
            feet.z >= 0 && feet.z < world.depth() && world.is_solid(feet.x, feet.y, feet.z);
        if on_ground {
            next.z = feet.z as f32 + 1.0 + self.height;
            self.velocity.z = 0.0;
        }

        let wall = cell_of(next);

        // X wall, sampled on the row the player is leaving.
        if world.is_solid(wall.x, current.y.floor() as i32, wall.z) {
            next.x = current.x;
            self.velocity.x = 0.0;
        }

        // Y wall, sampled after any X correction.
        if world.is_solid(next.x.floor() as i32, wall.y, wall.z) {
            next.y = current.y;
            self.velocity.y = 0.0;
        }

        // Ceiling: the cell at eye level.
        if wall.z < world.depth() && world.is_solid(wall.x, wall.y, wall.z) {
            next.z = current.z;
            self.velocity.z = 0.0;
        }

        self.position = next;

        if self.velocity.length() > MAX_SPEED {
            self.velocity = self.velocity.normalize() * MAX_SPEED;
        }

        let friction = if on_ground { GROUND_FRICTION } else { AIR_FRICTION };
        self.velocity.x *= friction;
        self.velocity.y *= friction;

        self.position.x = self
            .position
            .x
            .max(EDGE_MARGIN)
            .min(world.width() as f32 - EDGE_MARGIN);
        self.position.y = self
            .position
            .y
            .max(EDGE_MARGIN)
            .min(world.height() as f32 - EDGE_MARGIN);

        self.stamina = (self.stamina + STAMINA_REGEN).min(MAX_STAT);

        self.on_ground = on_ground;
        if !self.is_flying() {
            self.state = if on_ground {
                MovementState::Grounded
            } else {
                MovementState::Airborne
            };
        }
    }

    /// Push the player along the ground plane.
    ///
    /// `forward` and `right` are combined relative to yaw only, so looking up
    /// or down never changes horizontal speed. The result is added straight
    /// to the velocity; friction in [`Player::update`] bleeds it off.
    pub fn move_horizontal(&mut self, forward: f32, right: f32, dt: f32) {
        let direction =
            (self.forward_vector() * forward + self.right_vector() * right).normalize_or_zero();
        let speed = if self.is_flying() {
            PLAYER_SPEED * 2.0
        } else {
            PLAYER_SPEED
        };

        if dt > 0.0 && direction != Vec3::ZERO && self.is_grounded() && self.stamina > 0.0 {
            self.stamina = (self.stamina - STAMINA_DRAIN).max(0.0);
        }

        self.velocity.x += direction.x * speed;
        self.velocity.y += direction.y * speed;
    }

    /// Jump when on the ground, flying or not; otherwise ascend at half
    /// strength when flying.
    pub fn jump(&mut self) {
        if self.on_ground {
            self.velocity.z = JUMP_FORCE;
            self.on_ground = false;
            if !self.is_flying() {
                self.state = MovementState::Airborne;
            }
        } else if self.is_flying() {
            self.velocity.z = JUMP_FORCE * 0.5;
        }
    }

    /// Switch between flying and falling.
    pub fn toggle_flying(&mut self) {
        self.state = if self.is_flying() {
            MovementState::Airborne
        } else {
            MovementState::Flying
        };
        debug!(state = ?self.state, "flying toggled");
    }

    /// Turn the view. Pitch saturates at ±[`MAX_PITCH`]; yaw wraps into `[0, 2π)`.
    pub fn rotate(&mut self, pitch: f32, yaw: f32) {
        self.pitch = (self.pitch + pitch).clamp(-MAX_PITCH, MAX_PITCH);
        self.yaw = wrap_angle(self.yaw + yaw);
    }

    /// Unit view direction from pitch and yaw.
    pub fn view_direction(&self) -> Vec3 {
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(cp * cy, cp * sy, sp)
    }

    /// Horizontal unit vector the player faces.
    pub fn forward_vector(&self) -> Vec3 {
        let (s, c) = self.yaw.sin_cos();
        Vec3::new(c, s, 0.0)
    }

    /// Horizontal unit vector a quarter turn from forward.
    pub fn right_vector(&self) -> Vec3 {
        let (s, c) = (self.yaw + std::f32::consts::FRAC_PI_2).sin_cos();
        Vec3::new(c, s, 0.0)
    }

    /// Eye position rays are cast from.
    #[inline]
    pub const fn camera_position(&self) -> Vec3 {
        self.position
    }

    /// Whether the eye cell is solid.
    pub fn is_colliding(&self, world: &World) -> bool {
        let cell = cell_of(self.position);
        world.is_solid(cell.x, cell.y, cell.z)
    }

    /// Select hotbar slot `slot`; values outside `1..=9` are ignored.
    pub fn select_slot(&mut self, slot: u8) {
        if (1..=INVENTORY_SLOTS).contains(&slot) {
            self.selected_slot = slot;
        }
    }

    #[inline]
    pub const fn selected_slot(&self) -> u8 {
        self.selected_slot
    }

    /// Block placed by the selected slot: slot `n` places block id `n`.
    #[inline]
    pub const fn selected_block(&self) -> BlockId {
        BlockId(self.selected_slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::IVec3;
    use std::f32::consts::TAU;

    fn floored_world() -> World {
        let mut world = World::new(8, 8, 8).unwrap();
        world
            .grid_mut()
            .fill(IVec3::ZERO, IVec3::new(7, 7, 0), BlockId::STONE);
        world
    }

    #[test]
    fn dropped_player_settles_on_floor() {
        let world = floored_world();
        let mut player = Player::new(Vec3::new(4.5, 4.5, 6.0));

        for _ in 0..200 {
            player.update(&world, 1.0);
        }

        assert!(player.is_grounded());
        assert_eq!(player.velocity.z, 0.0);
        assert_relative_eq!(player.position.z, 0.0 + 1.0 + PLAYER_HEIGHT);
        assert_relative_eq!(player.position.x, 4.5);
        assert_relative_eq!(player.position.y, 4.5);
    }

    #[test]
    fn falling_player_is_airborne() {
        let world = floored_world();
        let mut player = Player::new(Vec3::new(4.5, 4.5, 7.0));
        player.update(&world, 1.0);
        assert_eq!(player.state(), MovementState::Airborne);
        assert!(player.velocity.z < 0.0);
    }

    #[test]
    fn jump_only_from_ground() {
        let world = floored_world();
        let mut player = Player::new(Vec3::new(4.5, 4.5, 2.8));
        player.update(&world, 1.0);
        assert!(player.is_grounded());

        player.jump();
        assert_eq!(player.state(), MovementState::Airborne);
        assert_relative_eq!(player.velocity.z, JUMP_FORCE);

        // A second press mid-air does nothing.
        player.velocity.z = 0.1;
        player.jump();
        assert_relative_eq!(player.velocity.z, 0.1);
    }

    #[test]
    fn flying_ignores_gravity_and_ascends() {
        let world = floored_world();
        let mut player = Player::new(Vec3::new(4.5, 4.5, 6.0));
        player.toggle_flying();
        assert!(player.is_flying());

        player.update(&world, 1.0);
        assert!(player.is_flying());
        assert_relative_eq!(player.position.z, 6.0);

        player.jump();
        assert_relative_eq!(player.velocity.z, JUMP_FORCE * 0.5);
        player.update(&world, 1.0);
        assert_relative_eq!(player.velocity.z, JUMP_FORCE * 0.5 * 0.9);

        player.toggle_flying();
        assert_eq!(player.state(), MovementState::Airborne);
    }

    #[test]
    fn flying_on_the_ground_still_counts_as_grounded() {
        let world = floored_world();
        // Feet just inside the floor; flying has no gravity to pull them in.
        let mut player = Player::new(Vec3::new(4.5, 4.5, 2.7));
        player.toggle_flying();
        player.update(&world, 1.0);

        assert!(player.is_flying());
        assert!(player.is_grounded());
        assert_relative_eq!(player.position.z, 1.0 + PLAYER_HEIGHT);

        player.move_horizontal(1.0, 0.0, 0.1);
        assert_relative_eq!(player.stamina(), MAX_STAT - STAMINA_DRAIN);

        player.jump();
        assert_relative_eq!(player.velocity.z, JUMP_FORCE);
        assert!(!player.is_grounded());
        assert_eq!(player.state(), MovementState::Flying);
    }

    #[test]
    fn walls_stop_horizontal_motion() {
        let mut world = floored_world();
        world.grid_mut().fill(IVec3::new(5, 0, 1), IVec3::new(5, 7, 7), BlockId::BRICK);
        let mut player = Player::new(Vec3::new(4.5, 4.5, 2.8));
        player.velocity.x = 1.0;

        player.update(&world, 1.0);
        assert_relative_eq!(player.position.x, 4.5);
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn position_kept_away_from_edges() {
        let world = floored_world();
        let mut player = Player::new(Vec3::new(1.2, 6.8, 2.8));
        player.velocity = Vec3::new(-5.0, 5.0, 0.0);
        player.update(&world, 1.0);
        assert_relative_eq!(player.position.x, 1.0);
        assert_relative_eq!(player.position.y, 7.0);
    }

    #[test]
    fn speed_is_capped() {
        let world = World::new(64, 64, 64).unwrap();
        let mut player = Player::new(Vec3::new(32.0, 32.0, 32.0));
        player.velocity = Vec3::new(0.0, 0.0, -50.0);
        player.update(&world, 0.01);
        assert!(player.velocity.length() <= MAX_SPEED + 1e-4);
    }

    #[test]
    fn yaw_wraps_and_pitch_saturates() {
        let mut player = Player::default();
        for _ in 0..500 {
            player.rotate(0.05, 0.3);
            assert!((0.0..TAU).contains(&player.yaw()));
            assert!(player.pitch() <= MAX_PITCH);
        }
        assert_relative_eq!(player.pitch(), MAX_PITCH);

        for _ in 0..500 {
            player.rotate(-0.07, -0.9);
            assert!((0.0..TAU).contains(&player.yaw()));
            assert!(player.pitch() >= -MAX_PITCH);
        }
        assert_relative_eq!(player.pitch(), -MAX_PITCH);
    }

    #[test]
    fn movement_is_level_and_normalized() {
        let mut player = Player::default();
        player.rotate(1.0, 0.0);
        player.move_horizontal(1.0, 1.0, 0.1);
        assert_relative_eq!(player.velocity.z, 0.0);
        assert_relative_eq!(player.velocity.truncate().length(), PLAYER_SPEED, epsilon = 1e-6);
    }

    #[test]
    fn running_drains_stamina_only_on_ground() {
        let world = floored_world();
        let mut player = Player::new(Vec3::new(4.5, 4.5, 2.8));
        player.move_horizontal(1.0, 0.0, 0.1);
        assert_relative_eq!(player.stamina(), MAX_STAT);

        player.update(&world, 1.0);
        player.move_horizontal(1.0, 0.0, 0.1);
        assert_relative_eq!(player.stamina(), MAX_STAT - STAMINA_DRAIN);
    }

    #[test]
    fn view_basis() {
        let mut player = Player::default();
        assert_relative_eq!(player.view_direction().x, 1.0);
        assert_relative_eq!(player.right_vector().y, 1.0, epsilon = 1e-6);

        player.rotate(0.5, 1.0);
        assert_relative_eq!(player.view_direction().length(), 1.0, epsilon = 1e-6);
        let dot = player.forward_vector().dot(player.right_vector());
        assert_relative_eq!(dot, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn slot_selection() {
        let mut player = Player::default();
        assert_eq!(player.selected_block(), BlockId::DIRT);
        player.select_slot(8);
        assert_eq!(player.selected_block(), BlockId::BRICK);
        player.select_slot(0);
        player.select_slot(10);
        assert_eq!(player.selected_slot(), 8);
    }

    #[test]
    fn colliding_when_eye_in_block() {
        let world = floored_world();
        let player = Player::new(Vec3::new(2.5, 2.5, 0.5));
        assert!(player.is_colliding(&world));
        assert!(!Player::new(Vec3::new(2.5, 2.5, 3.0)).is_colliding(&world));
    }
}
