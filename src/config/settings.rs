// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, File};
use duration_string::DurationString;
use serde::Deserialize;

use super::error::ConfigError;
use crate::builtin::{BUILT_IN_PACK_NAMES, DEFAULT_CURRENT_PACK};

const DEFAULT_PACKS_DIRECTORY: &str = "CustomSoundpacks";
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);
const DEFAULT_DECODE_THREADS: usize = 2;

/// A YAML representation of the host settings.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct Settings {
    /// The directory holding one sub-directory per custom pack (default: CustomSoundpacks).
    packs_directory: Option<String>,

    /// The directory holding one sub-directory per built-in pack. Built-in packs are
    /// skipped if this isn't set.
    built_in_directory: Option<String>,

    /// The built-in packs to register, in order.
    built_in_packs: Option<Vec<String>>,

    /// The qualified name of the pack to make current once the built-in packs are
    /// registered (default: vanilla:default).
    default_pack: Option<String>,

    /// How long the host loop sleeps between ticks (default: 16ms).
    tick_interval: Option<String>,

    /// Number of decoder worker threads (default: 2, must be >= 1).
    decode_threads: Option<usize>,

    /// The directory relative paths are resolved against.
    #[serde(skip)]
    base_path: PathBuf,
}

impl Settings {
    /// Parses settings from a file. Relative paths inside are resolved against the
    /// directory containing the file.
    pub fn deserialize(path: &Path) -> Result<Settings, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize::<Settings>()?;
        settings.base_path = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(settings)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    /// Returns the custom packs directory.
    pub fn packs_directory(&self) -> PathBuf {
        self.resolve(
            self.packs_directory
                .as_deref()
                .unwrap_or(DEFAULT_PACKS_DIRECTORY),
        )
    }

    /// Returns the built-in packs directory, if configured.
    pub fn built_in_directory(&self) -> Option<PathBuf> {
        self.built_in_directory
            .as_deref()
            .map(|directory| self.resolve(directory))
    }

    /// Returns the names of the built-in packs, in registration order.
    pub fn built_in_packs(&self) -> Vec<String> {
        match &self.built_in_packs {
            Some(names) => names.clone(),
            None => BUILT_IN_PACK_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Returns the qualified name of the pack to start with.
    pub fn default_pack(&self) -> &str {
        self.default_pack.as_deref().unwrap_or(DEFAULT_CURRENT_PACK)
    }

    /// Returns the tick interval of the host loop.
    pub fn tick_interval(&self) -> Result<Duration, ConfigError> {
        match &self.tick_interval {
            Some(tick_interval) => Ok(DurationString::from_string(tick_interval.clone())
                .map_err(|e| ConfigError::InvalidDuration(tick_interval.clone(), e.to_string()))?
                .into()),
            None => Ok(DEFAULT_TICK_INTERVAL),
        }
    }

    /// Returns the number of decoder worker threads.
    pub fn decode_threads(&self) -> usize {
        self.decode_threads.unwrap_or(DEFAULT_DECODE_THREADS).max(1)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_full_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soundpacks.yaml");
        fs::write(
            &path,
            r#"
packs_directory: custom
built_in_directory: /opt/host/packs
built_in_packs:
  - default
  - bass
default_pack: vanilla:bass
tick_interval: 5ms
decode_threads: 4
"#,
        )
        .unwrap();

        let settings = Settings::deserialize(&path).expect("settings should parse");

        assert_eq!(dir.path().join("custom"), settings.packs_directory());
        assert_eq!(
            Some(PathBuf::from("/opt/host/packs")),
            settings.built_in_directory()
        );
        assert_eq!(vec!["default", "bass"], settings.built_in_packs());
        assert_eq!("vanilla:bass", settings.default_pack());
        assert_eq!(Duration::from_millis(5), settings.tick_interval().unwrap());
        assert_eq!(4, settings.decode_threads());
    }

    #[test]
    fn test_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soundpacks.yaml");
        fs::write(&path, "decode_threads: 0\n").unwrap();

        let settings = Settings::deserialize(&path).expect("settings should parse");

        assert_eq!(dir.path().join("CustomSoundpacks"), settings.packs_directory());
        assert_eq!(None, settings.built_in_directory());
        assert_eq!(
            vec!["default", "bass", "muted", "eightbit", "club", "fart"],
            settings.built_in_packs()
        );
        assert_eq!("vanilla:default", settings.default_pack());
        assert_eq!(Duration::from_millis(16), settings.tick_interval().unwrap());
        assert_eq!(1, settings.decode_threads());
    }

    #[test]
    fn test_invalid_tick_interval() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soundpacks.yaml");
        fs::write(&path, "tick_interval: soon\n").unwrap();

        let settings = Settings::deserialize(&path).expect("settings should parse");
        assert!(matches!(
            settings.tick_interval(),
            Err(ConfigError::InvalidDuration(_, _))
        ));
    }
}
