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
use std::path::PathBuf;

use crate::pack::Pitch;

/// Errors that stop a single pack from loading. None of these affect other loads or
/// the registry.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("No manifest (*.json) found in pack directory {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("Error parsing manifest {}: {}", .0.display(), .1)]
    ManifestParse(PathBuf, String),

    #[error("Audio file not found for note {0}")]
    NoteFileMissing(Pitch),

    #[error("Error loading note {0}: {1}")]
    NoteDecode(Pitch, String),

    #[error("Unable to read pack directory {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
}
