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

//! The state machine behind a single pack load.

use std::path::Path;

use tracing::{debug, warn};

use super::error::LoadError;
use super::resolve::PackFiles;
use crate::audio::{AudioFormat, DecodeTicket, Decoder};
use crate::config::PackDescriptor;
use crate::pack::{Pitch, ResourcePack};

/// Where a pack load currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// The note file for this pitch will be located and submitted on the next tick.
    ResolvingNote(Pitch),
    /// Waiting on the decoder for this pitch.
    AwaitingDecode(Pitch),
    /// Every note is in place.
    Complete,
    /// The load was abandoned.
    Failed,
}

/// The result of advancing a load by one tick.
pub(crate) enum Step {
    /// Still waiting on the decoder.
    Pending,
    /// Every slot is filled; the pack can be taken with [`PackLoad::into_pack`].
    Complete,
    /// The load was abandoned.
    Failed(LoadError),
}

enum Stage {
    Resolving(Pitch),
    Awaiting(Pitch, DecodeTicket),
    Complete,
    Failed,
}

/// A single pack load. The manifest is handled up front in [`PackLoad::begin`]; the
/// notes are then resolved strictly in pitch order with at most one decode in flight.
pub(crate) struct PackLoad {
    pack: ResourcePack,
    files: PackFiles,
    stage: Stage,
}

impl PackLoad {
    /// Reads the directory and its manifest and returns an empty pack ready to have its
    /// notes resolved. Nothing is submitted to a decoder yet.
    pub fn begin(directory: &Path) -> Result<PackLoad, LoadError> {
        let files =
            PackFiles::list(directory).map_err(|e| LoadError::Io(directory.to_path_buf(), e))?;

        let manifest = match files.manifests.as_slice() {
            [] => return Err(LoadError::ManifestNotFound(directory.to_path_buf())),
            [manifest] => manifest,
            [manifest, ..] => {
                warn!(
                    directory = ?directory,
                    manifest = ?manifest,
                    count = files.manifests.len(),
                    "Multiple manifests in pack directory, using the first"
                );
                manifest
            }
        };

        let descriptor = PackDescriptor::parse(manifest)
            .map_err(|e| LoadError::ManifestParse(manifest.clone(), e.to_string()))?;

        if !descriptor.has_format_revision() {
            warn!(
                pack = %descriptor.qualified_name(),
                directory = ?directory,
                "Missing format revision in pack manifest"
            );
        }

        Ok(PackLoad {
            pack: ResourcePack::from_descriptor(&descriptor, directory),
            files,
            stage: Stage::Resolving(Pitch::C1),
        })
    }

    /// Returns the current state of the load.
    pub fn state(&self) -> LoadState {
        match self.stage {
            Stage::Resolving(pitch) => LoadState::ResolvingNote(pitch),
            Stage::Awaiting(pitch, _) => LoadState::AwaitingDecode(pitch),
            Stage::Complete => LoadState::Complete,
            Stage::Failed => LoadState::Failed,
        }
    }

    /// Returns the pack as loaded so far.
    pub fn pack(&self) -> &ResourcePack {
        &self.pack
    }

    /// Consumes the load, returning the pack.
    pub fn into_pack(self) -> ResourcePack {
        self.pack
    }

    /// Advances the load. A decode that resolved since the last tick is installed and
    /// the next note is submitted straight away, so each note costs one suspension.
    pub fn advance<D: Decoder + ?Sized>(&mut self, decoder: &D) -> Step {
        loop {
            match &mut self.stage {
                Stage::Resolving(pitch) => {
                    let pitch = *pitch;
                    let Some(file) = self.files.note_file(pitch) else {
                        self.stage = Stage::Failed;
                        return Step::Failed(LoadError::NoteFileMissing(pitch));
                    };

                    let format = AudioFormat::from_path(file);
                    debug!(
                        pack = %self.pack,
                        pitch = %pitch,
                        file = ?file,
                        format = %format,
                        "Submitting note for decoding"
                    );
                    let ticket = decoder.submit(file, format);
                    self.stage = Stage::Awaiting(pitch, ticket);
                    return Step::Pending;
                }
                Stage::Awaiting(pitch, ticket) => {
                    let pitch = *pitch;
                    let Some(result) = ticket.poll() else {
                        return Step::Pending;
                    };

                    match result {
                        Ok(sample) => {
                            debug!(
                                pack = %self.pack,
                                pitch = %pitch,
                                slot = pitch.index(),
                                "Putting note into slot"
                            );
                            self.pack.set_note(pitch, sample);
                            match pitch.next() {
                                Some(next) => self.stage = Stage::Resolving(next),
                                None => {
                                    self.stage = Stage::Complete;
                                    return Step::Complete;
                                }
                            }
                        }
                        Err(detail) => {
                            self.stage = Stage::Failed;
                            return Step::Failed(LoadError::NoteDecode(pitch, detail));
                        }
                    }
                }
                // Finished loads are removed by the driver and never advanced again.
                Stage::Complete | Stage::Failed => return Step::Pending,
            }
        }
    }
}
