//! Block targeting, breaking and placing.
//!
//! Every operation casts one ray from the player's eye along the view
//! direction, reaching [`INTERACTION_REACH`] blocks. Fog never applies.

use glam::{IVec3, Vec3};
use tracing::debug;
use voxterm_core::constants::INTERACTION_REACH;
use voxterm_core::math::cell_of;
use voxterm_core::{BlockId, BlockType, Ray};
use voxterm_world::World;

use crate::player::Player;
use crate::raycast::{cast_ray_with, RayConfig, RayHit};

/// The block under the crosshair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    /// Where the view ray meets the block.
    pub point: Vec3,
    /// Outward normal of the face looked at.
    pub normal: Vec3,
    /// The targeted cell.
    pub cell: IVec3,
    /// Block in the targeted cell.
    pub block: BlockId,
}

impl From<RayHit> for Target {
    fn from(hit: RayHit) -> Self {
        Self {
            point: hit.point,
            normal: hit.normal(),
            cell: hit.cell,
            block: hit.block,
        }
    }
}

impl Target {
    /// Cell just outside the targeted face, where a new block would go.
    pub fn adjacent_cell(&self) -> IVec3 {
        cell_of(self.point + self.normal * 0.5)
    }
}

fn view_hit(player: &Player, world: &World) -> Option<RayHit> {
    let ray = Ray::new(player.camera_position(), player.view_direction());
    cast_ray_with(world, &ray, INTERACTION_REACH, &RayConfig { fog: false }).hit
}

/// What the player is looking at, without changing anything.
pub fn target_block(player: &Player, world: &World) -> Option<Target> {
    view_hit(player, world).map(Target::from)
}

/// Registry record of the block the player is looking at.
pub fn inspect<'w>(player: &Player, world: &'w World) -> Option<&'w BlockType> {
    view_hit(player, world).map(|hit| world.block_type(hit.block))
}

/// Break the targeted block into the player's inventory.
///
/// Returns the broken block and its cell.
pub fn break_block(player: &mut Player, world: &mut World) -> Option<(BlockId, IVec3)> {
    let target = target_block(player, world)?;
    player.inventory.give(target.block, 1);
    world.set_at(target.cell, BlockId::AIR);
    debug!(block = target.block.0, cell = ?target.cell, "block broken");
    Some((target.block, target.cell))
}

/// Place one `block` from the inventory against the targeted face.
///
/// Nothing happens if nothing is targeted, the neighbour cell is outside the
/// world, the block is not registered or none are held. Returns the filled
/// cell.
pub fn place_block(player: &mut Player, world: &mut World, block: BlockId) -> Option<IVec3> {
    let target = target_block(player, world)?;
    let cell = target.adjacent_cell();

    if !world.is_valid_position(cell.x, cell.y, cell.z)
        || !world.registry().contains(block)
        || player.inventory.count(block) == 0
    {
        return None;
    }

    world.set_at(cell, block);
    player.inventory.take(block);
    debug!(block = block.0, ?cell, "block placed");
    Some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use voxterm_core::Face;

    /// Two stone layers; the player looks straight down at the top one.
    fn setup() -> (World, Player) {
        let mut world = World::new(4, 4, 6).unwrap();
        world
            .grid_mut()
            .fill(IVec3::ZERO, IVec3::new(3, 3, 1), BlockId::STONE);
        let mut player = Player::new(Vec3::new(1.5, 1.5, 3.5));
        player.rotate(-10.0, 0.0);
        (world, player)
    }

    #[test]
    fn target_reports_face_and_point() {
        let (world, player) = setup();
        let target = target_block(&player, &world).unwrap();
        assert_eq!(target.cell, IVec3::new(1, 1, 1));
        assert_eq!(target.normal, Face::PosZ.normal());
        assert_relative_eq!(target.point.z, 2.0, epsilon = 1e-4);
        assert_eq!(target.adjacent_cell(), IVec3::new(1, 1, 2));
        assert_eq!(inspect(&player, &world).map(|t| t.name), Some("Stone"));
    }

    #[test]
    fn break_then_place_is_net_zero() {
        let (mut world, mut player) = setup();
        let before = player.inventory.count(BlockId::STONE);

        let (broken, cell) = break_block(&mut player, &mut world).unwrap();
        assert_eq!(broken, BlockId::STONE);
        assert_eq!(cell, IVec3::new(1, 1, 1));
        assert!(world.get(1, 1, 1).is_air());
        assert_eq!(player.inventory.count(BlockId::STONE), before + 1);

        let placed = place_block(&mut player, &mut world, BlockId::STONE).unwrap();
        assert_eq!(placed, IVec3::new(1, 1, 1));
        assert_eq!(world.get(1, 1, 1), BlockId::STONE);
        assert_eq!(player.inventory.count(BlockId::STONE), before);
    }

    #[test]
    fn place_needs_inventory() {
        let (mut world, mut player) = setup();
        assert_eq!(player.inventory.count(BlockId::SAND), 0);
        assert_eq!(place_block(&mut player, &mut world, BlockId::SAND), None);
        assert!(world.get(1, 1, 2).is_air());

        assert_eq!(place_block(&mut player, &mut world, BlockId(40)), None);
    }

    #[test]
    fn nothing_in_reach() {
        let mut world = World::new(4, 4, 12).unwrap();
        world.set(1, 1, 0, BlockId::STONE);
        let mut player = Player::new(Vec3::new(1.5, 1.5, 10.5));
        player.rotate(-10.0, 0.0);

        assert_eq!(target_block(&player, &world), None);
        assert_eq!(break_block(&mut player, &mut world), None);
        assert_eq!(world.get(1, 1, 0), BlockId::STONE);
    }

    #[test]
    fn place_outside_world_is_refused() {
        // Looking down at the top of the world from above it.
        let mut world = World::new(4, 4, 2).unwrap();
        world.grid_mut().fill(IVec3::ZERO, IVec3::new(3, 3, 1), BlockId::STONE);
        let mut player = Player::new(Vec3::new(1.5, 1.5, 3.5));
        player.rotate(-10.0, 0.0);

        let before = player.inventory.count(BlockId::DIRT);
        assert_eq!(place_block(&mut player, &mut world, BlockId::DIRT), None);
        assert_eq!(player.inventory.count(BlockId::DIRT), before);
    }
}
