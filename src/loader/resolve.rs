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

//! Locating the manifest and note files inside a pack directory.
//!
//! Directory listings are sorted by file name before anything is matched, so the same
//! directory always resolves to the same files regardless of platform listing order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::pack::Pitch;

const MANIFEST_EXTENSION: &str = "json";

/// The files of a pack directory, split into manifests and note candidates.
#[derive(Debug, Default)]
pub(crate) struct PackFiles {
    pub manifests: Vec<PathBuf>,
    pub candidates: Vec<PathBuf>,
}

/// Manifest extensions are matched ignoring case, like audio extensions.
fn is_manifest(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION))
}

impl PackFiles {
    /// Lists the regular files directly inside the directory.
    pub fn list(directory: &Path) -> io::Result<PackFiles> {
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(directory)? {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let (manifests, candidates): (Vec<PathBuf>, Vec<PathBuf>) = files
            .into_iter()
            .partition(|path| is_manifest(path));
        Ok(PackFiles {
            manifests,
            candidates,
        })
    }

    /// Returns the first note file whose stem ends with the pitch token.
    pub fn note_file(&self, pitch: Pitch) -> Option<&Path> {
        find_note_file(&self.candidates, pitch)
    }
}

/// Returns the first path whose stem ends with the pitch token. Matching is
/// case-sensitive: "kazooC1.wav" matches C1, "kazooc1.wav" does not.
pub(crate) fn find_note_file(candidates: &[PathBuf], pitch: Pitch) -> Option<&Path> {
    candidates
        .iter()
        .find(|path| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| stem.ends_with(pitch.token()))
        })
        .map(PathBuf::as_path)
}
