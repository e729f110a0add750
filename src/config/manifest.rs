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
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::pack::{qualify, DEFAULT_NAME, DEFAULT_NAMESPACE};

/// The format revision reported when a manifest doesn't specify one.
pub const UNSPECIFIED_FORMAT_REVISION: i32 = -1;

/// A JSON representation of a pack manifest.
///
/// Keys are accepted in camelCase as well as the PascalCase used by older packs.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackDescriptor {
    /// The name of the pack.
    #[serde(default = "default_name", alias = "Name")]
    name: String,

    /// The namespace of the pack, usually the author.
    #[serde(default = "default_namespace", alias = "Namespace")]
    namespace: String,

    /// Scales the host's playback volume while this pack is current.
    #[serde(default = "default_volume_modifier", alias = "VolumeModifier")]
    volume_modifier: f32,

    /// The revision of the pack layout this manifest was written against.
    #[serde(
        default = "default_format_revision",
        alias = "SoundpackFormatRevision",
        alias = "soundpackFormatRevision"
    )]
    format_revision: i32,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_volume_modifier() -> f32 {
    1.0
}

fn default_format_revision() -> i32 {
    UNSPECIFIED_FORMAT_REVISION
}

impl PackDescriptor {
    /// Creates a new pack descriptor.
    pub fn new(name: &str, namespace: &str, volume_modifier: f32, format_revision: i32) -> Self {
        PackDescriptor {
            name: name.to_string(),
            namespace: namespace.to_string(),
            volume_modifier,
            format_revision,
        }
    }

    /// Parses a manifest file.
    pub fn parse(path: &Path) -> Result<PackDescriptor, ConfigError> {
        PackDescriptor::from_json(&fs::read_to_string(path)?)
    }

    /// Parses a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<PackDescriptor, ConfigError> {
        Ok(serde_json::from_str(json)?)
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

    /// Gets the volume modifier.
    pub fn volume_modifier(&self) -> f32 {
        self.volume_modifier
    }

    /// Gets the format revision, which is [`UNSPECIFIED_FORMAT_REVISION`] if missing.
    pub fn format_revision(&self) -> i32 {
        self.format_revision
    }

    /// Returns true if the manifest declared its format revision.
    pub fn has_format_revision(&self) -> bool {
        self.format_revision != UNSPECIFIED_FORMAT_REVISION
    }
}
