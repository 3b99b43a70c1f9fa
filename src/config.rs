//! Runtime configuration read from the environment.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `RECYCLE_TETRIS_SEED` | RNG seed | derived from the clock |
//! | `RECYCLE_TETRIS_SAVE_DIR` | directory for save files | `.` |
//! | `RECYCLE_TETRIS_AUTOSAVE` | write the autosave slot on quit | on |
//! | `RECYCLE_TETRIS_PARTICLES` | draw recycling particles | on |
//!
//! Values that fail to parse fall back to the default.

use std::path::PathBuf;

use chrono::Utc;

pub const SEED_VAR: &str = "RECYCLE_TETRIS_SEED";
pub const SAVE_DIR_VAR: &str = "RECYCLE_TETRIS_SAVE_DIR";
pub const AUTOSAVE_VAR: &str = "RECYCLE_TETRIS_AUTOSAVE";
pub const PARTICLES_VAR: &str = "RECYCLE_TETRIS_PARTICLES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    pub save_dir: PathBuf,
    pub autosave: bool,
    pub particles: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            save_dir: PathBuf::from("."),
            autosave: true,
            particles: true,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(seed) = lookup(SEED_VAR).and_then(|v| v.trim().parse().ok()) {
            config.seed = seed;
        }
        if let Some(dir) = lookup(SAVE_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.save_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup(AUTOSAVE_VAR).and_then(|v| parse_flag(&v)) {
            config.autosave = flag;
        }
        if let Some(flag) = lookup(PARTICLES_VAR).and_then(|v| parse_flag(&v)) {
            config.particles = flag;
        }
        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn clock_seed() -> u32 {
    let now = Utc::now();
    (now.timestamp() as u32) ^ now.timestamp_subsec_nanos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_every_variable() {
        let config = GameConfig::from_lookup(lookup(&[
            (SEED_VAR, "12345"),
            (SAVE_DIR_VAR, "/tmp/recycle"),
            (AUTOSAVE_VAR, "false"),
            (PARTICLES_VAR, "0"),
        ]));
        assert_eq!(config.seed, 12345);
        assert_eq!(config.save_dir, PathBuf::from("/tmp/recycle"));
        assert!(!config.autosave);
        assert!(!config.particles);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = GameConfig::from_lookup(lookup(&[
            (SEED_VAR, "not-a-number"),
            (SAVE_DIR_VAR, "  "),
            (AUTOSAVE_VAR, "maybe"),
        ]));
        assert_eq!(config.save_dir, PathBuf::from("."));
        assert!(config.autosave);
        assert!(config.particles);
    }
}
