//! The explorer: world, player, controls and screens.

use anyhow::Context as _;
use tracing::{debug, info, warn};
use voxterm_app::{AppContext, Frame, TerminalApp};
use voxterm_core::constants::{
    INVENTORY_SLOTS, PLAYER_TURN_SPEED, WORLD_DEPTH, WORLD_HEIGHT, WORLD_WIDTH,
};
use voxterm_core::TermColor;
use voxterm_input::{ActionMap, InputBinding, InputManager, KeyCode, Modifiers};
use voxterm_physics::{break_block, place_block, Player};
use voxterm_render::overlay::{draw_pause_menu, draw_title_screen};
use voxterm_render::{FramebufferWidget, Overlays, Renderer};
use voxterm_world::{TerrainGenerator, World, WorldSeed};

use crate::config::GameConfig;

/// Seconds a status message stays on screen.
const STATUS_SECONDS: f32 = 2.0;

mod action {
    pub const QUIT: &str = "quit";
    pub const PAUSE: &str = "pause";
    pub const RESUME: &str = "resume";
    pub const FORWARD: &str = "forward";
    pub const BACK: &str = "back";
    pub const LEFT: &str = "left";
    pub const RIGHT: &str = "right";
    pub const LOOK_UP: &str = "look_up";
    pub const LOOK_DOWN: &str = "look_down";
    pub const TURN_LEFT: &str = "turn_left";
    pub const TURN_RIGHT: &str = "turn_right";
    pub const JUMP: &str = "jump";
    pub const FLY: &str = "fly";
    pub const PLACE: &str = "place";
    pub const BREAK: &str = "break";
    pub const HUD: &str = "toggle_hud";
    pub const DEBUG: &str = "toggle_debug";
    pub const MINIMAP: &str = "toggle_minimap";
    pub const SAVE: &str = "save";
}

/// Key layout of the explorer.
pub fn bindings() -> ActionMap {
    ActionMap::builder()
        .bind(action::QUIT, 'q')
        .bind(
            action::QUIT,
            InputBinding::KeyWithModifiers(KeyCode::Char('c'), Modifiers::CTRL),
        )
        .bind(action::PAUSE, 'p')
        .bind(action::RESUME, 'r')
        .bind(action::FORWARD, 'i')
        .bind(action::BACK, 'k')
        .bind(action::LEFT, 'j')
        .bind(action::RIGHT, 'l')
        .bind_many(action::LOOK_UP, [KeyCode::Char('w'), KeyCode::Up])
        .bind_many(action::LOOK_DOWN, [KeyCode::Char('s'), KeyCode::Down])
        .bind_many(action::TURN_LEFT, [KeyCode::Char('a'), KeyCode::Left])
        .bind_many(action::TURN_RIGHT, [KeyCode::Char('d'), KeyCode::Right])
        .bind(action::JUMP, ' ')
        .bind(action::FLY, 'f')
        .bind(action::PLACE, 'e')
        .bind(action::BREAK, 'r')
        .bind(action::HUD, 'h')
        .bind(action::DEBUG, 'o')
        .bind(action::MINIMAP, 'm')
        .bind(action::SAVE, KeyCode::F(5))
        .build()
}

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Playing,
    Paused,
}

#[derive(Debug, Clone)]
struct Status {
    text: String,
    remaining: f32,
}

/// Generate the default-sized world with terrain, trees and the house.
pub fn generate_world(seed: WorldSeed) -> voxterm_core::Result<World> {
    let mut world = World::new(WORLD_WIDTH, WORLD_HEIGHT, WORLD_DEPTH)?;
    let generator = TerrainGenerator::with_seed(seed);
    generator.generate(&mut world);
    if !generator.generate_structures(&mut world) {
        debug!("world too small for the house");
    }
    Ok(world)
}

/// The whole game state.
pub struct Game {
    config: GameConfig,
    world: World,
    player: Player,
    renderer: Renderer,
    screen: Screen,
    status: Option<Status>,
    quit: bool,
}

impl Game {
    /// Create a new game on the title screen.
    pub fn new(config: GameConfig, width: u16, height: u16) -> anyhow::Result<Self> {
        let world = if config.load {
            World::load(&config.world_path)
                .with_context(|| format!("failed to load {}", config.world_path.display()))?
        } else {
            generate_world(config.seed).context("failed to create world")?
        };
        let player = Player::spawn(&world);
        info!(position = ?player.position, "player spawned");

        Ok(Self {
            config,
            world,
            player,
            renderer: Renderer::new(width, height)?,
            screen: Screen::Title,
            status: None,
            quit: false,
        })
    }

    fn show_status(&mut self, text: String) {
        self.status = Some(Status {
            text,
            remaining: STATUS_SECONDS,
        });
    }

    /// React to this frame's input.
    pub fn handle_input(&mut self, input: &InputManager, dt: f32) {
        if input.is_action_just_pressed(action::QUIT) {
            info!("quit requested");
            self.quit = true;
            return;
        }

        match self.screen {
            Screen::Title => {
                if input.any_key_just_pressed() {
                    info!("game started");
                    self.screen = Screen::Playing;
                }
            }
            Screen::Paused => {
                if input.is_action_just_pressed(action::PAUSE)
                    || input.is_action_just_pressed(action::RESUME)
                {
                    info!("resumed");
                    self.screen = Screen::Playing;
                }
            }
            Screen::Playing => {
                if input.is_action_just_pressed(action::PAUSE) {
                    info!("paused");
                    self.screen = Screen::Paused;
                } else {
                    self.play_input(input, dt);
                }
            }
        }
    }

    fn play_input(&mut self, input: &InputManager, dt: f32) {
        // Continuous controls start on the frame after the key went down.
        let axis = |pos: &str, neg: &str| {
            f32::from(u8::from(input.is_action_held(pos)))
                - f32::from(u8::from(input.is_action_held(neg)))
        };

        let forward = axis(action::FORWARD, action::BACK);
        let right = axis(action::RIGHT, action::LEFT);
        self.player.move_horizontal(forward, right, dt);

        let pitch = axis(action::LOOK_UP, action::LOOK_DOWN) * PLAYER_TURN_SPEED;
        let yaw = axis(action::TURN_RIGHT, action::TURN_LEFT) * PLAYER_TURN_SPEED;
        self.player.rotate(pitch, yaw);

        if input.is_action_just_pressed(action::JUMP) {
            self.player.jump();
        }
        if input.is_action_just_pressed(action::FLY) {
            self.player.toggle_flying();
        }
        if input.is_action_just_pressed(action::PLACE) {
            let block = self.player.selected_block();
            place_block(&mut self.player, &mut self.world, block);
        }
        if input.is_action_just_pressed(action::BREAK) {
            break_block(&mut self.player, &mut self.world);
        }

        for slot in 1..=INVENTORY_SLOTS {
            if input.is_key_just_pressed(KeyCode::Char(char::from(b'0' + slot))) {
                self.player.select_slot(slot);
            }
        }

        for (name, overlay) in [
            (action::HUD, Overlays::HUD),
            (action::DEBUG, Overlays::DEBUG),
            (action::MINIMAP, Overlays::MINIMAP),
        ] {
            if input.is_action_just_pressed(name) {
                self.renderer.toggle(overlay);
            }
        }

        if input.is_action_just_pressed(action::SAVE) {
            self.save_world();
        }
    }

    fn save_world(&mut self) {
        let path = &self.config.world_path;
        let text = match self.world.save(path) {
            Ok(()) => format!("World saved to {}", path.display()),
            Err(e) => {
                warn!("save failed: {e}");
                format!("Save failed: {e}")
            }
        };
        self.show_status(text);
    }

    /// Advance the simulation unless paused or on the title screen.
    pub fn step(&mut self, dt: f32) {
        if let Some(status) = &mut self.status {
            status.remaining -= dt;
            if status.remaining <= 0.0 {
                self.status = None;
            }
        }

        if self.screen == Screen::Playing {
            self.world.advance_time(dt);
            self.player.update(&self.world, dt);
        }
    }

    /// Draw the current screen into the renderer's framebuffer.
    pub fn draw(&mut self, fps: f32) {
        self.renderer.clear();
        if self.screen == Screen::Title {
            draw_title_screen(self.renderer.framebuffer_mut());
            return;
        }

        self.renderer.render_world(&self.world, &self.player);
        self.renderer.render_overlays(&self.world, &self.player, fps);

        let fb = self.renderer.framebuffer_mut();
        if let Some(status) = &self.status {
            let y = i32::from(fb.height()) - 3;
            fb.draw_text(2, y, &status.text, TermColor::YELLOW.bright());
        }
        if self.screen == Screen::Paused {
            draw_pause_menu(fb);
        }
    }
}

impl TerminalApp for Game {
    fn init(ctx: &mut AppContext) -> anyhow::Result<Self> {
        let config = GameConfig::from_args();
        info!(
            seed = config.seed,
            load = config.load,
            world = %config.world_path.display(),
            "starting game"
        );
        *ctx.input.actions_mut() = bindings();
        Self::new(config, ctx.width, ctx.height)
    }

    fn update(&mut self, ctx: &mut AppContext, dt: f32) {
        self.handle_input(&ctx.input, dt);
        self.step(dt);
    }

    fn render(&mut self, ctx: &AppContext, frame: &mut Frame) {
        self.draw(ctx.fps());
        frame.render_widget(
            FramebufferWidget::new(self.renderer.framebuffer()),
            frame.area(),
        );
    }

    fn on_resize(&mut self, _ctx: &mut AppContext, width: u16, height: u16) -> anyhow::Result<()> {
        self.renderer.resize(width, height)?;
        Ok(())
    }

    fn should_exit(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxterm_core::BlockId;
    use voxterm_input::{Event, KeyEvent, KeyModifiers};

    fn game() -> (Game, InputManager) {
        let config = GameConfig {
            seed: 7,
            ..GameConfig::default()
        };
        let game = Game::new(config, 80, 24).unwrap();
        (game, InputManager::with_actions(bindings()))
    }

    /// Release everything, then press `code` for one frame.
    fn tap(game: &mut Game, input: &mut InputManager, code: KeyCode) {
        input.process_event(&Event::FocusLost);
        input.update();
        input.end_frame();
        input.process_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        input.update();
        game.handle_input(input, 1.0 / 30.0);
    }

    /// Keep the key from the last `tap` down for one more frame.
    fn hold(game: &mut Game, input: &mut InputManager) {
        input.end_frame();
        input.update();
        game.handle_input(input, 1.0 / 30.0);
    }

    fn row(game: &Game, y: i32) -> String {
        let fb = game.renderer.framebuffer();
        (0..i32::from(fb.width()))
            .filter_map(|x| fb.get(x, y).map(|c| c.glyph))
            .collect()
    }

    #[test]
    fn title_then_play() {
        let (mut game, mut input) = game();
        assert_eq!(game.screen, Screen::Title);
        game.draw(0.0);
        assert!(row(&game, 6).contains("VOXEL EXPLORER"));

        tap(&mut game, &mut input, KeyCode::Char('x'));
        assert_eq!(game.screen, Screen::Playing);
        assert!(!game.should_exit());
    }

    #[test]
    fn pause_freezes_time() {
        let (mut game, mut input) = game();
        tap(&mut game, &mut input, KeyCode::Enter);
        tap(&mut game, &mut input, KeyCode::Char('p'));
        assert_eq!(game.screen, Screen::Paused);

        let time = game.world.time_of_day();
        let position = game.player.position;
        game.step(1.0);
        assert_eq!(game.world.time_of_day(), time);
        assert_eq!(game.player.position, position);

        game.draw(30.0);
        assert!(row(&game, 8).contains("GAME PAUSED"));

        tap(&mut game, &mut input, KeyCode::Char('r'));
        assert_eq!(game.screen, Screen::Playing);
        game.step(1.0);
        assert!(game.world.time_of_day() > time);
    }

    #[test]
    fn quit_from_any_screen() {
        let (mut game, mut input) = game();
        tap(&mut game, &mut input, KeyCode::Char('q'));
        assert!(game.should_exit());
    }

    #[test]
    fn controls_reach_the_player() {
        let (mut game, mut input) = game();
        tap(&mut game, &mut input, KeyCode::Enter);

        tap(&mut game, &mut input, KeyCode::Char('3'));
        assert_eq!(game.player.selected_block(), BlockId::STONE);

        tap(&mut game, &mut input, KeyCode::Char('f'));
        assert!(game.player.is_flying());

        // Look and move wait until the key is held past its first frame.
        tap(&mut game, &mut input, KeyCode::Right);
        assert_eq!(game.player.yaw(), 0.0);
        hold(&mut game, &mut input);
        assert!(game.player.yaw() > 0.0);

        tap(&mut game, &mut input, KeyCode::Char('i'));
        assert_eq!(game.player.velocity.x, 0.0);
        hold(&mut game, &mut input);
        assert!(game.player.velocity.x > 0.0);
    }

    #[test]
    fn overlay_keys_toggle() {
        let (mut game, mut input) = game();
        tap(&mut game, &mut input, KeyCode::Enter);
        tap(&mut game, &mut input, KeyCode::Char('o'));
        tap(&mut game, &mut input, KeyCode::Char('m'));
        assert_eq!(game.renderer.overlays(), Overlays::HUD | Overlays::DEBUG);
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("voxterm-game-{}.dat", std::process::id()));
        let (mut game, mut input) = game();
        game.config.world_path.clone_from(&path);
        tap(&mut game, &mut input, KeyCode::Enter);
        tap(&mut game, &mut input, KeyCode::F(5));
        assert!(game.status.as_ref().is_some_and(|s| s.text.starts_with("World saved")));

        let loaded = Game::new(
            GameConfig {
                world_path: path.clone(),
                load: true,
                ..GameConfig::default()
            },
            40,
            20,
        )
        .unwrap();
        assert_eq!(loaded.world.grid().as_bytes(), game.world.grid().as_bytes());
        std::fs::remove_file(&path).unwrap();

        // The status line expires.
        game.step(STATUS_SECONDS + 0.1);
        assert!(game.status.is_none());
    }

    #[test]
    fn missing_world_file_fails() {
        let config = GameConfig {
            world_path: std::env::temp_dir().join("voxterm-does-not-exist.dat"),
            load: true,
            ..GameConfig::default()
        };
        assert!(Game::new(config, 10, 10).is_err());
    }

    #[test]
    fn generated_world_has_terrain() {
        let world = generate_world(1).unwrap();
        assert_eq!(world.width(), WORLD_WIDTH);
        assert!(world.surface_height(5, 5).is_some());
    }
}
