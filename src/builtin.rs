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

//! Built-in packs shipped with the host.
//!
//! The host hands over fully decoded samples; they are copied into fresh packs in the
//! `vanilla` namespace so that the host keeps ownership of its own buffers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::audio::{decode_file, AudioFormat, Sample};
use crate::loader::{LoadError, PackFiles};
use crate::pack::{qualify, Pitch, ResourcePack, BUILT_IN_NAMESPACE, NOTE_COUNT};
use crate::registry::{copy_notes, PackRegistry};

/// The built-in packs, in the order the host registers them.
pub const BUILT_IN_PACK_NAMES: [&str; 6] = ["default", "bass", "muted", "eightbit", "club", "fart"];

/// The pack made current once the built-in packs are registered.
pub const DEFAULT_CURRENT_PACK: &str = "vanilla:default";

/// Returns the volume modifier of a built-in pack. Unknown packs play at full volume.
pub fn volume_modifier_for(name: &str) -> f32 {
    match name {
        "bass" => 0.72,
        "muted" => 0.34,
        "eightbit" | "club" => 0.25,
        "fart" => 0.75,
        _ => 1.0,
    }
}

/// A built-in pack as provided by the host.
#[derive(Debug)]
pub struct BuiltInPack {
    pub name: String,
    pub volume_modifier: f32,
    pub notes: [Sample; NOTE_COUNT],
}

/// Provides the host's built-in packs, fully decoded.
pub trait BuiltInSource {
    fn packs(&self) -> Result<Vec<BuiltInPack>, LoadError>;
}

/// Reads built-in packs from `<directory>/<name>/`, one file per pitch, decoding
/// synchronously.
pub struct DirectoryBuiltInSource {
    directory: PathBuf,
    names: Vec<String>,
}

impl DirectoryBuiltInSource {
    pub fn new(directory: &Path, names: Vec<String>) -> DirectoryBuiltInSource {
        DirectoryBuiltInSource {
            directory: directory.to_path_buf(),
            names,
        }
    }

    fn read_pack(&self, name: &str) -> Result<BuiltInPack, LoadError> {
        let directory = self.directory.join(name);
        let files =
            PackFiles::list(&directory).map_err(|e| LoadError::Io(directory.clone(), e))?;

        let mut notes: Vec<Sample> = Vec::with_capacity(NOTE_COUNT);
        for pitch in Pitch::ALL {
            let file = files
                .note_file(pitch)
                .ok_or(LoadError::NoteFileMissing(pitch))?;
            let sample = decode_file(file, AudioFormat::from_path(file))
                .map_err(|e| LoadError::NoteDecode(pitch, e.to_string()))?;
            notes.push(sample);
        }

        let notes: [Sample; NOTE_COUNT] = match notes.try_into() {
            Ok(notes) => notes,
            Err(_) => unreachable!("one note is decoded per pitch"),
        };
        Ok(BuiltInPack {
            name: name.to_string(),
            volume_modifier: volume_modifier_for(name),
            notes,
        })
    }
}

impl BuiltInSource for DirectoryBuiltInSource {
    fn packs(&self) -> Result<Vec<BuiltInPack>, LoadError> {
        if !self.directory.is_dir() {
            return Err(LoadError::Io(
                self.directory.clone(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            ));
        }

        let mut packs = Vec::with_capacity(self.names.len());
        for name in &self.names {
            match self.read_pack(name) {
                Ok(pack) => packs.push(pack),
                Err(e) => warn!(
                    pack = %name,
                    directory = ?self.directory,
                    error = %e,
                    "Unable to read built-in pack"
                ),
            }
        }
        Ok(packs)
    }
}

/// Registers every built-in pack from the source, in order, then makes the default
/// pack current.
pub fn register_built_in<S: BuiltInSource + ?Sized>(
    registry: &mut PackRegistry,
    source: &S,
    default_pack: &str,
) -> Result<(), LoadError> {
    for built_in in source.packs()? {
        let pack = ResourcePack::with_notes(
            &built_in.name,
            BUILT_IN_NAMESPACE,
            built_in.volume_modifier,
            None,
            copy_notes(&built_in.notes),
        );
        info!(
            pack = %qualify(BUILT_IN_NAMESPACE, &built_in.name),
            volume = built_in.volume_modifier,
            "Registering built-in pack"
        );
        registry.add(Arc::new(pack));
    }

    match registry.find(default_pack) {
        Some(pack) => registry.set_current(pack),
        None => warn!(pack = default_pack, "Default pack is not registered"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tempfile::tempdir;

    use super::*;
    use crate::testutil::{write_pack, PackFixture};

    struct FixedSource {
        names: Vec<&'static str>,
    }

    impl BuiltInSource for FixedSource {
        fn packs(&self) -> Result<Vec<BuiltInPack>, LoadError> {
            Ok(self
                .names
                .iter()
                .map(|name| BuiltInPack {
                    name: name.to_string(),
                    volume_modifier: volume_modifier_for(name),
                    notes: std::array::from_fn(|i| {
                        Sample::new(&format!("{}{}", name, i), vec![0.5; 32], 1, 44100)
                    }),
                })
                .collect())
        }
    }

    #[test]
    fn test_volume_table() {
        assert_eq!(1.0, volume_modifier_for("default"));
        assert_eq!(0.72, volume_modifier_for("bass"));
        assert_eq!(0.34, volume_modifier_for("muted"));
        assert_eq!(0.25, volume_modifier_for("eightbit"));
        assert_eq!(0.25, volume_modifier_for("club"));
        assert_eq!(0.75, volume_modifier_for("fart"));
        assert_eq!(1.0, volume_modifier_for("kazoo"));
    }

    #[test]
    fn test_startup_then_swap() {
        let mut registry = PackRegistry::new();
        let changes = Rc::new(RefCell::new(Vec::new()));
        {
            let changes = Rc::clone(&changes);
            registry.subscribe(move |event| {
                changes.borrow_mut().push((
                    event.old.qualified_name(),
                    event.new.qualified_name(),
                ));
            });
        }
        let source = FixedSource {
            names: BUILT_IN_PACK_NAMES.to_vec(),
        };

        register_built_in(&mut registry, &source, DEFAULT_CURRENT_PACK).unwrap();

        assert_eq!(6, registry.len());
        assert!(registry.packs().all(|pack| pack.is_built_in() && pack.is_complete()));
        assert_eq!("vanilla:default", registry.current().qualified_name());
        assert_eq!(1, changes.borrow().len());

        let bass = registry.find("vanilla:bass").unwrap();
        assert_eq!(0.72, bass.volume_modifier());
        registry.set_current(bass);

        assert_eq!(
            vec![
                (
                    "unknown:Custom Soundpack".to_string(),
                    "vanilla:default".to_string()
                ),
                ("vanilla:default".to_string(), "vanilla:bass".to_string()),
            ],
            *changes.borrow()
        );
    }

    #[test]
    fn test_missing_default_pack() {
        let mut registry = PackRegistry::new();
        let source = FixedSource {
            names: vec!["bass"],
        };

        register_built_in(&mut registry, &source, DEFAULT_CURRENT_PACK).unwrap();

        assert_eq!(1, registry.len());
        assert_eq!("unknown:Custom Soundpack", registry.current().qualified_name());
    }

    #[test]
    fn test_directory_source() {
        let dir = tempdir().unwrap();
        write_pack(dir.path(), &PackFixture::new("default", "vanilla").no_manifest());
        write_pack(dir.path(), &PackFixture::new("bass", "vanilla").no_manifest());
        write_pack(
            dir.path(),
            &PackFixture::new("muted", "vanilla")
                .no_manifest()
                .without(Pitch::A2),
        );
        let source = DirectoryBuiltInSource::new(
            dir.path(),
            vec![
                "default".to_string(),
                "muted".to_string(),
                "bass".to_string(),
                "club".to_string(),
            ],
        );

        let packs = source.packs().expect("directory should be readable");

        let names: Vec<&str> = packs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(vec!["default", "bass"], names);
        assert_eq!(0.72, packs[1].volume_modifier);
        assert_eq!(
            PackFixture::level(Pitch::E2),
            packs[0].notes[Pitch::E2.index()].data()[0]
        );
    }

    #[test]
    fn test_directory_source_missing_directory() {
        let dir = tempdir().unwrap();
        let source = DirectoryBuiltInSource::new(&dir.path().join("nope"), vec![]);

        assert!(matches!(source.packs(), Err(LoadError::Io(_, _))));
    }
}
