//! YAML configuration loading.
//!
//! A `.kansa.yml` in the working directory (or an explicit `--config`
//! path) deserializes straight into the engine's config; omitted keys keep
//! their defaults. Bounds checking happens later, at registry-build time,
//! so a bad value fails the same way no matter where it came from.

use anyhow::{Context, Result};
use kansa_engine::EngineConfig;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_LOCATIONS: [&str; 2] = [".kansa.yml", ".kansa.yaml"];

pub fn load(explicit: Option<&Path>) -> Result<EngineConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => DEFAULT_LOCATIONS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists()),
    };

    match path {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            let config: EngineConfig = serde_yaml::from_str(&text)
                .with_context(|| format!("failed to parse config file: {}", path.display()))?;
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}
