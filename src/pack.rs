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

//! The runtime pack entity: identity, provenance and fifteen owned note samples.

mod pitch;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::audio::Sample;
use crate::config::PackDescriptor;

pub use pitch::{Pitch, NOTE_COUNT};

/// The namespace reserved for packs supplied by the host itself.
pub const BUILT_IN_NAMESPACE: &str = "vanilla";

/// The name given to packs that don't declare one.
pub const DEFAULT_NAME: &str = "Custom Soundpack";

/// The namespace given to packs that don't declare one.
pub const DEFAULT_NAMESPACE: &str = "unknown";

/// Joins a namespace and name into a qualified name.
pub fn qualify(namespace: &str, name: &str) -> String {
    format!("{}:{}", namespace, name)
}

/// A resource pack. Each pack exclusively owns its note samples; see
/// [`crate::registry::PackRegistry::clone_pack`] for making an independent copy.
pub struct ResourcePack {
    /// The name of the pack.
    name: String,
    /// The namespace of the pack.
    namespace: String,
    /// Volume scalar applied by the host while the pack is current.
    volume_modifier: f32,
    /// The directory the pack was loaded from, if any.
    source_directory: Option<PathBuf>,
    /// One slot per pitch, filled in as the notes are decoded.
    notes: [Option<Sample>; NOTE_COUNT],
}

impl ResourcePack {
    /// Creates an empty pack with no notes loaded.
    pub fn new(
        name: &str,
        namespace: &str,
        volume_modifier: f32,
        source_directory: Option<PathBuf>,
    ) -> ResourcePack {
        ResourcePack {
            name: name.to_string(),
            namespace: namespace.to_string(),
            volume_modifier,
            source_directory,
            notes: std::array::from_fn(|_| None),
        }
    }

    /// Creates an empty pack from a parsed manifest.
    pub fn from_descriptor(descriptor: &PackDescriptor, source_directory: &Path) -> ResourcePack {
        ResourcePack::new(
            descriptor.name(),
            descriptor.namespace(),
            descriptor.volume_modifier(),
            Some(source_directory.to_path_buf()),
        )
    }

    /// Creates a pack with every note already in place.
    pub fn with_notes(
        name: &str,
        namespace: &str,
        volume_modifier: f32,
        source_directory: Option<PathBuf>,
        notes: [Sample; NOTE_COUNT],
    ) -> ResourcePack {
        ResourcePack {
            name: name.to_string(),
            namespace: namespace.to_string(),
            volume_modifier,
            source_directory,
            notes: notes.map(Some),
        }
    }

    /// The pack the registry starts with before anything real is current.
    pub fn placeholder() -> ResourcePack {
        ResourcePack::new(DEFAULT_NAME, DEFAULT_NAMESPACE, 1.0, None)
    }

    /// Gets the name of the pack.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the namespace of the pack.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Gets the `namespace:name` identity of the pack.
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }

    /// Returns true if the pack has the given qualified name.
    pub fn has_qualified_name(&self, qualified_name: &str) -> bool {
        let namespace_len = self.namespace.len();
        qualified_name.len() == namespace_len + 1 + self.name.len()
            && qualified_name.starts_with(self.namespace.as_str())
            && qualified_name[namespace_len..].starts_with(':')
            && qualified_name.ends_with(self.name.as_str())
    }

    /// Gets the volume modifier.
    pub fn volume_modifier(&self) -> f32 {
        self.volume_modifier
    }

    /// Gets the directory the pack was loaded from.
    pub fn source_directory(&self) -> Option<&Path> {
        self.source_directory.as_deref()
    }

    /// Returns true if the pack was supplied by the host.
    pub fn is_built_in(&self) -> bool {
        self.namespace == BUILT_IN_NAMESPACE
    }

    /// Gets the sample for the given pitch, if it's been loaded.
    pub fn note(&self, pitch: Pitch) -> Option<&Sample> {
        self.notes[pitch.index()].as_ref()
    }

    /// Gets the sample for the given pitch for modification.
    pub fn note_mut(&mut self, pitch: Pitch) -> Option<&mut Sample> {
        self.notes[pitch.index()].as_mut()
    }

    /// Installs the sample for the given pitch.
    pub(crate) fn set_note(&mut self, pitch: Pitch, sample: Sample) {
        self.notes[pitch.index()] = Some(sample);
    }

    /// Iterates over the loaded notes in pitch order.
    pub fn notes(&self) -> impl Iterator<Item = (Pitch, &Sample)> {
        Pitch::ALL
            .iter()
            .zip(self.notes.iter())
            .filter_map(|(pitch, note)| note.as_ref().map(|sample| (*pitch, sample)))
    }

    /// Returns the number of notes loaded so far.
    pub fn loaded_notes(&self) -> usize {
        self.notes.iter().filter(|note| note.is_some()).count()
    }

    /// Returns true once every note slot is filled.
    pub fn is_complete(&self) -> bool {
        self.notes.iter().all(Option::is_some)
    }

    /// Returns the memory used by the loaded notes, in bytes.
    pub fn memory_size(&self) -> usize {
        self.notes().map(|(_, sample)| sample.memory_size()).sum()
    }
}

impl fmt::Display for ResourcePack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

impl fmt::Debug for ResourcePack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourcePack")
            .field("qualified_name", &self.qualified_name())
            .field("volume_modifier", &self.volume_modifier)
            .field("source_directory", &self.source_directory)
            .field("loaded_notes", &self.loaded_notes())
            .finish()
    }
}
