//! Text overlays drawn on top of the rendered world.

use bitflags::bitflags;
use voxterm_core::constants::INVENTORY_SLOTS;
use voxterm_core::TermColor;
use voxterm_physics::{inspect, MovementState, Player};
use voxterm_world::World;

use crate::framebuffer::Framebuffer;

bitflags! {
    /// Overlays enabled on the game view.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Overlays: u8 {
        /// Crosshair, hotbar, position and stats.
        const HUD = 1 << 0;
        /// Velocity, rotation and movement state.
        const DEBUG = 1 << 1;
        /// Top-down map around the player.
        const MINIMAP = 1 << 2;
    }
}

impl Default for Overlays {
    fn default() -> Self {
        Self::HUD | Self::MINIMAP
    }
}

/// Side length of the minimap in cells.
pub const MINIMAP_SIZE: i32 = 16;

/// Key help shown at the bottom of the HUD.
pub const CONTROLS_LINE: &str =
    "WASD: Look | IJKL: Move | Space: Jump | F: Fly | E: Place | R: Break";

const TEXT: TermColor = TermColor::WHITE;
const HIGHLIGHT: TermColor = TermColor::WHITE.bright();

/// Crosshair, hotbar, coordinates, stats, clock and held block.
pub fn draw_hud(fb: &mut Framebuffer, world: &World, player: &Player) {
    let (w, h) = (i32::from(fb.width()), i32::from(fb.height()));

    fb.set_pixel(w / 2, h / 2, '+', TEXT, TermColor::BLACK);

    let slots = i32::from(INVENTORY_SLOTS);
    let bar_x = (w - slots) / 2;
    let bar_y = h - 2;
    for i in 0..slots {
        fb.set_pixel(bar_x + i, bar_y, '[', TEXT, TermColor::BLACK);
    }
    let selected = bar_x + i32::from(player.selected_slot()) - 1;
    fb.set_pixel(selected, bar_y, '*', HIGHLIGHT, TermColor::BLACK);

    let p = player.position;
    fb.draw_text(2, 1, &format!("X:{:.1} Y:{:.1} Z:{:.1}", p.x, p.y, p.z), TEXT);
    fb.draw_text(
        2,
        2,
        &format!("HP:{:.0} SP:{:.0}", player.health, player.stamina()),
        TEXT,
    );

    let block = player.selected_block();
    fb.draw_text(
        2,
        3,
        &format!(
            "{} x{}",
            world.block_type(block).name,
            player.inventory.count(block)
        ),
        TEXT,
    );

    fb.draw_text(w - 13, 1, &format!("Time: {:.2}", world.time_of_day()), TEXT);
    fb.draw_text(2, h - 1, CONTROLS_LINE, TEXT);
}

/// Velocity, rotation in degrees, movement state and the block in reach.
pub fn draw_debug(fb: &mut Framebuffer, world: &World, player: &Player) {
    let v = player.velocity;
    fb.draw_text(2, 4, &format!("VEL: X:{:.2} Y:{:.2} Z:{:.2}", v.x, v.y, v.z), TEXT);
    fb.draw_text(
        2,
        5,
        &format!(
            "ROT: P:{:.2} Y:{:.2}",
            player.pitch().to_degrees(),
            player.yaw().to_degrees()
        ),
        TEXT,
    );
    let state = match player.state() {
        MovementState::Grounded => "GROUNDED",
        MovementState::Airborne => "AIRBORNE",
        MovementState::Flying => "FLYING",
    };
    fb.draw_text(2, 6, &format!("STATE: {state}"), TEXT);

    let looking_at = inspect(player, world).map_or("-", |block| block.name);
    fb.draw_text(2, 7, &format!("LOOK: {looking_at}"), TEXT);
}

/// Top-down map of the highest block in each column around the player.
pub fn draw_minimap(fb: &mut Framebuffer, world: &World, player: &Player) {
    let map_x = i32::from(fb.width()) - MINIMAP_SIZE - 2;
    let map_y = 2;
    fb.draw_rect(
        map_x - 1,
        map_y - 1,
        MINIMAP_SIZE + 2,
        MINIMAP_SIZE + 2,
        ' ',
        TEXT,
        TermColor::BLACK,
    );

    let px = player.position.x as i32;
    let py = player.position.y as i32;
    for y in 0..MINIMAP_SIZE {
        for x in 0..MINIMAP_SIZE {
            let wx = px + x - MINIMAP_SIZE / 2;
            let wy = py + y - MINIMAP_SIZE / 2;
            let Some(z) = world.surface_height(wx, wy) else {
                continue;
            };
            let block = world.block_type(world.get(wx, wy, z));
            fb.set_pixel(map_x + x, map_y + y, block.glyph, block.fg, TermColor::BLACK);
        }
    }

    fb.set_pixel(
        map_x + MINIMAP_SIZE / 2,
        map_y + MINIMAP_SIZE / 2,
        'P',
        HIGHLIGHT,
        TermColor::BLACK,
    );
}

/// Frame rate in the top-right corner.
pub fn draw_fps(fb: &mut Framebuffer, fps: f32) {
    let x = i32::from(fb.width()) - 12;
    fb.draw_text(x, 2, &format!("FPS: {fps:.1}"), TEXT);
}

fn centred(fb: &mut Framebuffer, y: i32, text: &str, fg: TermColor) {
    let x = (i32::from(fb.width()) - text.chars().count() as i32) / 2;
    fb.draw_text(x, y, text, fg);
}

/// Title card shown before the game starts.
pub fn draw_title_screen(fb: &mut Framebuffer) {
    fb.clear();
    let h = i32::from(fb.height());
    centred(fb, h / 4, "VOXEL EXPLORER", HIGHLIGHT);
    centred(fb, h / 4 + 2, "An ASCII Raycasting Engine", TermColor::CYAN);

    let controls = [
        "WASD / Arrows - Look around",
        "IJKL - Move",
        "Space - Jump",
        "F - Toggle flying",
        "E - Place block   R - Break block",
        "1-9 - Select block",
        "H - HUD   O - Debug   M - Minimap",
        "F5 - Save world",
        "P - Pause   Q - Quit",
    ];
    for (i, line) in controls.iter().enumerate() {
        centred(fb, h / 2 + i as i32, line, TEXT);
    }
    centred(fb, h - 3, "Press any key to start...", TermColor::YELLOW.bright());
}

/// Pause box over the frozen game view.
pub fn draw_pause_menu(fb: &mut Framebuffer) {
    let (w, h) = (i32::from(fb.width()), i32::from(fb.height()));
    let (x0, y0) = (w / 4, h / 4);
    let (bw, bh) = (w * 3 / 4 - x0, h * 3 / 4 - y0);

    fb.fill_rect(x0, y0, bw, bh, ' ', TEXT, TermColor::BLUE);
    fb.draw_rect(x0, y0, bw, bh, '#', TEXT, TermColor::BLUE);

    let mut line = |y: i32, text: &str, fg: TermColor| {
        let x = (w - text.chars().count() as i32) / 2;
        for (i, glyph) in text.chars().enumerate() {
            fb.set_pixel(x + i as i32, y, glyph, fg, TermColor::BLUE);
        }
    };
    line(h / 3, "GAME PAUSED", HIGHLIGHT);
    line(h / 2, "R - Resume Game", TEXT);
    line(h / 2 + 1, "Q - Quit Game", TEXT);
    line(h * 2 / 3, "IJKL move, WASD look, Space jump", TEXT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec3, Vec3};
    use voxterm_core::BlockId;

    fn row(fb: &Framebuffer, y: i32) -> String {
        (0..i32::from(fb.width()))
            .filter_map(|x| fb.get(x, y).map(|c| c.glyph))
            .collect()
    }

    fn scene() -> (World, Player) {
        let mut world = World::new(32, 32, 8).unwrap();
        world
            .grid_mut()
            .fill(IVec3::ZERO, IVec3::new(31, 31, 1), BlockId::GRASS);
        let player = Player::new(Vec3::new(10.5, 12.5, 3.6));
        (world, player)
    }

    #[test]
    fn default_overlays() {
        let overlays = Overlays::default();
        assert!(overlays.contains(Overlays::HUD | Overlays::MINIMAP));
        assert!(!overlays.contains(Overlays::DEBUG));
    }

    #[test]
    fn hud_layout() {
        let (world, player) = scene();
        let mut fb = Framebuffer::new(80, 24).unwrap();
        draw_hud(&mut fb, &world, &player);

        assert_eq!(fb.get(40, 12).map(|c| c.glyph), Some('+'));
        assert!(row(&fb, 1).contains("X:10.5 Y:12.5 Z:3.6"));
        assert!(row(&fb, 1).contains("Time: 0.50"));
        assert!(row(&fb, 2).contains("HP:100 SP:100"));
        assert!(row(&fb, 3).contains("Dirt x64"));
        assert!(row(&fb, 23).starts_with("  WASD: Look"));

        // Slot 1 selected: the first bracket is replaced by the marker.
        let bar = row(&fb, 22);
        assert_eq!(&bar[35..44], "*[[[[[[[[");
        assert_eq!(fb.get(35, 22).map(|c| c.fg), Some(HIGHLIGHT));
    }

    #[test]
    fn minimap_shows_columns_and_player() {
        let (world, player) = scene();
        let mut fb = Framebuffer::new(80, 24).unwrap();
        draw_minimap(&mut fb, &world, &player);

        let map_x = 80 - MINIMAP_SIZE - 2;
        let grass = world.block_type(BlockId::GRASS).glyph;
        assert_eq!(fb.get(map_x, 2).map(|c| c.glyph), Some(grass));
        assert_eq!(fb.get(map_x + 8, 2 + 8).map(|c| c.glyph), Some('P'));
    }

    #[test]
    fn debug_lines() {
        let (world, mut player) = scene();
        player.rotate(0.5, 0.0);
        let mut fb = Framebuffer::new(60, 10).unwrap();
        draw_debug(&mut fb, &world, &player);
        assert!(row(&fb, 4).contains("VEL: X:0.00 Y:0.00 Z:0.00"));
        assert!(row(&fb, 5).contains("ROT: P:28.65"));
        assert!(row(&fb, 6).contains("STATE: AIRBORNE"));
        assert!(row(&fb, 7).contains("LOOK: -"));

        // Straight down at the grass floor.
        player.rotate(-10.0, 0.0);
        fb.clear();
        draw_debug(&mut fb, &world, &player);
        assert!(row(&fb, 7).contains("LOOK: Grass"));
    }

    #[test]
    fn pause_and_title() {
        let mut fb = Framebuffer::new(80, 24).unwrap();
        draw_pause_menu(&mut fb);
        assert_eq!(fb.get(20, 6).map(|c| c.glyph), Some('#'));
        assert_eq!(fb.get(30, 10).map(|c| c.bg), Some(TermColor::BLUE));
        assert!(row(&fb, 8).contains("GAME PAUSED"));

        draw_title_screen(&mut fb);
        assert!(row(&fb, 6).contains("VOXEL EXPLORER"));
        assert!(row(&fb, 21).contains("Press any key"));
    }

    #[test]
    fn tiny_screens_do_not_panic() {
        let (world, player) = scene();
        let mut fb = Framebuffer::new(3, 2).unwrap();
        draw_hud(&mut fb, &world, &player);
        draw_minimap(&mut fb, &world, &player);
        draw_fps(&mut fb, 30.0);
        draw_pause_menu(&mut fb);
        draw_title_screen(&mut fb);
    }
}
