//! Command-line options.

use std::path::PathBuf;

use voxterm_core::constants::SAVE_FILE;
use voxterm_world::WorldSeed;

/// Default terrain seed.
pub const DEFAULT_SEED: WorldSeed = 42;

/// How the game world is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Terrain seed for a freshly generated world.
    pub seed: WorldSeed,
    /// Where F5 saves and `--load` loads.
    pub world_path: PathBuf,
    /// Load `world_path` instead of generating.
    pub load: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            world_path: PathBuf::from(SAVE_FILE),
            load: false,
        }
    }
}

impl GameConfig {
    /// Parse the process arguments.
    pub fn from_args() -> Self {
        Self::parse(std::env::args().skip(1))
    }

    /// Parse options, ignoring anything unknown or malformed.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    if let Some(seed) = args.next().and_then(|v| v.parse().ok()) {
                        config.seed = seed;
                    }
                }
                "--world" => {
                    if let Some(path) = args.next() {
                        config.world_path = PathBuf::from(path);
                    }
                }
                "--load" => config.load = true,
                _ => {}
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> GameConfig {
        GameConfig::parse(args.iter().map(ToString::to_string))
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.world_path, PathBuf::from("world.dat"));
    }

    #[test]
    fn all_options() {
        let config = parse(&["--seed", "7", "--world", "saves/a.dat", "--load"]);
        assert_eq!(config.seed, 7);
        assert_eq!(config.world_path, PathBuf::from("saves/a.dat"));
        assert!(config.load);
    }

    #[test]
    fn bad_values_are_ignored() {
        let config = parse(&["--seed", "many", "--frobnicate", "--seed"]);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert!(!config.load);
    }
}
