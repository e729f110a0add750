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

//! Cooperative pack loading.
//!
//! A load reads the pack's manifest synchronously, then resolves and decodes the
//! fifteen notes over many ticks. The host drives every load by calling
//! [`PackLoader::tick`] once per frame; nothing here blocks on the decoder.

mod error;
mod load;
mod resolve;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::audio::Decoder;
use crate::pack::ResourcePack;
use crate::registry::PackRegistry;

pub use error::LoadError;
pub use load::LoadState;
pub(crate) use resolve::PackFiles;

use load::{PackLoad, Step};

/// Identifies a load started by [`PackLoader::load_pack`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadHandle {
    id: u64,
    qualified_name: String,
    directory: PathBuf,
}

impl LoadHandle {
    /// The qualified name from the pack's manifest.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// The directory the pack is being loaded from.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// A load that finished during a tick.
#[derive(Debug)]
pub struct LoadOutcome {
    pub handle: LoadHandle,
    pub result: Result<ResourcePack, LoadError>,
}

struct ActiveLoad {
    handle: LoadHandle,
    load: PackLoad,
}

/// Drives any number of concurrent pack loads. Loads are independent: each one has at
/// most one decode in flight, and different loads interleave freely.
pub struct PackLoader<D: Decoder> {
    decoder: D,
    loads: Vec<ActiveLoad>,
    next_id: u64,
}

impl<D: Decoder> PackLoader<D> {
    /// Creates a new loader that decodes notes with the given decoder.
    pub fn new(decoder: D) -> PackLoader<D> {
        PackLoader {
            decoder,
            loads: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns the decoder.
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Starts loading the pack in the given directory.
    ///
    /// Manifest problems are reported here, before any note is touched. On success the
    /// returned handle can be used to follow the load; the notes are resolved by later
    /// calls to [`PackLoader::tick`].
    pub fn load_pack(&mut self, directory: &Path) -> Result<LoadHandle, LoadError> {
        let load = PackLoad::begin(directory)?;

        let handle = LoadHandle {
            id: self.next_id,
            qualified_name: load.pack().qualified_name(),
            directory: directory.to_path_buf(),
        };
        self.next_id += 1;

        info!(
            pack = %handle.qualified_name,
            directory = ?directory,
            "Loading pack"
        );
        self.loads.push(ActiveLoad {
            handle: handle.clone(),
            load,
        });
        Ok(handle)
    }

    /// Starts loading every pack directory inside the given directory, in file name
    /// order. Directories that fail before their notes are touched are logged and
    /// skipped.
    pub fn load_all(&mut self, directory: &Path) -> Result<Vec<LoadHandle>, LoadError> {
        let io_error = |e| LoadError::Io(directory.to_path_buf(), e);

        let mut pack_directories: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(directory).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_dir() {
                pack_directories.push(path);
            }
        }
        pack_directories.sort();

        info!(
            directory = ?directory,
            count = pack_directories.len(),
            "Loading custom packs"
        );

        let mut handles = Vec::new();
        for pack_directory in pack_directories {
            match self.load_pack(&pack_directory) {
                Ok(handle) => handles.push(handle),
                Err(e) => warn!(
                    directory = ?pack_directory,
                    error = %e,
                    "Failed to load pack"
                ),
            }
        }
        Ok(handles)
    }

    /// Advances every pending load by one step and returns the loads that finished.
    pub fn tick(&mut self) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::new();

        for mut active in std::mem::take(&mut self.loads) {
            match active.load.advance(&self.decoder) {
                Step::Pending => self.loads.push(active),
                Step::Complete => {
                    let pack = active.load.into_pack();
                    info!(
                        pack = %active.handle.qualified_name,
                        memory_kb = pack.memory_size() / 1024,
                        "Successfully loaded pack"
                    );
                    outcomes.push(LoadOutcome {
                        handle: active.handle,
                        result: Ok(pack),
                    });
                }
                Step::Failed(e) => {
                    warn!(
                        pack = %active.handle.qualified_name,
                        directory = ?active.handle.directory,
                        error = %e,
                        "Failed to load pack"
                    );
                    outcomes.push(LoadOutcome {
                        handle: active.handle,
                        result: Err(e),
                    });
                }
            }
        }

        outcomes
    }

    /// Advances every pending load and adds the packs that finished to the registry.
    /// Failed loads leave the registry untouched.
    pub fn tick_into(&mut self, registry: &mut PackRegistry) -> Vec<Arc<ResourcePack>> {
        self.tick()
            .into_iter()
            .filter_map(|outcome| outcome.result.ok())
            .map(|pack| {
                let pack = Arc::new(pack);
                registry.add(Arc::clone(&pack));
                pack
            })
            .collect()
    }

    /// Returns the number of loads still in progress.
    pub fn pending(&self) -> usize {
        self.loads.len()
    }

    /// Returns true if no loads are in progress.
    pub fn is_idle(&self) -> bool {
        self.loads.is_empty()
    }

    fn find(&self, handle: &LoadHandle) -> Option<&PackLoad> {
        self.loads
            .iter()
            .find(|active| active.handle.id == handle.id)
            .map(|active| &active.load)
    }

    /// Returns the state of an in-progress load, or None once it has finished.
    pub fn state(&self, handle: &LoadHandle) -> Option<LoadState> {
        self.find(handle).map(PackLoad::state)
    }

    /// Returns the partially loaded pack of an in-progress load.
    pub fn pack(&self, handle: &LoadHandle) -> Option<&ResourcePack> {
        self.find(handle).map(PackLoad::pack)
    }

    /// Returns how many notes an in-progress load has installed.
    pub fn progress(&self, handle: &LoadHandle) -> Option<usize> {
        self.pack(handle).map(ResourcePack::loaded_notes)
    }
}
