//! Voxel Explorer: a first-person ASCII voxel world in the terminal.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p voxterm --release -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! - `--seed <N>`: Terrain seed (default: 42)
//! - `--world <PATH>`: World file used by F5 and `--load` (default: world.dat)
//! - `--load`: Load the world file instead of generating one
//! - `-h, --help`: Print help message
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Log level written to `voxterm.log` (e.g., info, debug, trace)

mod config;
mod game;

use voxterm_app::{run_app, AppConfig};
use voxterm_core::constants::TARGET_FPS;

use crate::game::Game;

fn main() -> anyhow::Result<()> {
    // Check for help flag before taking over the terminal
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    run_app::<Game>(AppConfig::new("Voxel Explorer").with_target_fps(TARGET_FPS))
}

fn print_help() {
    eprintln!(
        "Voxel Explorer - an ASCII raycasting voxel engine

USAGE:
    voxterm [OPTIONS]

OPTIONS:
    --seed <N>          Terrain seed (default: 42)
    --world <PATH>      World file for saving and loading (default: world.dat)
    --load              Load the world file instead of generating a new one
    -h, --help          Print this help message

CONTROLS:
    WASD / Arrows       Look around
    IJKL                Move
    Space               Jump (ascend while flying)
    F                   Toggle flying
    E / R               Place / break block
    1-9                 Select block
    H / O / M           Toggle HUD / debug / minimap
    F5                  Save world
    P                   Pause
    Q                   Quit

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level written to voxterm.log (e.g., info, debug)"
    );
}
