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
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::audio::{AudioFormat, DecodeCompleter, DecodeTicket, Decoder, Sample};

struct Request {
    path: PathBuf,
    completer: DecodeCompleter,
}

#[derive(Default)]
struct State {
    requests: Vec<PathBuf>,
    pending: VecDeque<Request>,
}

/// A decoder that only resolves requests when a test tells it to. Successful decodes
/// produce a short silent sample named after the file stem.
#[derive(Default)]
pub struct ManualDecoder {
    state: Mutex<State>,
}

impl ManualDecoder {
    pub fn new() -> ManualDecoder {
        ManualDecoder::default()
    }

    /// Every path submitted so far, in submission order.
    pub fn requests(&self) -> Vec<PathBuf> {
        self.state.lock().requests.clone()
    }

    /// The number of submitted requests not yet resolved.
    pub fn in_flight(&self) -> usize {
        self.state.lock().pending.len()
    }

    fn sample_for(path: &Path) -> Sample {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        Sample::silent(&stem, 16, 1, 44100)
    }

    /// Resolves the oldest pending request successfully.
    pub fn complete_next(&self) -> bool {
        let request = self.state.lock().pending.pop_front();
        match request {
            Some(request) => {
                let sample = Self::sample_for(&request.path);
                request.completer.complete(Ok(sample));
                true
            }
            None => false,
        }
    }

    /// Fails the oldest pending request.
    pub fn fail_next(&self, detail: &str) -> bool {
        let request = self.state.lock().pending.pop_front();
        match request {
            Some(request) => {
                request.completer.complete(Err(detail.to_string()));
                true
            }
            None => false,
        }
    }

    /// Resolves the pending request for the given path successfully.
    pub fn complete_path(&self, path: &Path) -> bool {
        let mut state = self.state.lock();
        let Some(position) = state.pending.iter().position(|r| r.path == path) else {
            return false;
        };
        let request = state.pending.remove(position);
        drop(state);

        match request {
            Some(request) => {
                let sample = Self::sample_for(&request.path);
                request.completer.complete(Ok(sample));
                true
            }
            None => false,
        }
    }

    /// Resolves every pending request successfully.
    pub fn complete_all(&self) {
        while self.complete_next() {}
    }
}

impl Decoder for ManualDecoder {
    fn submit(&self, path: &Path, _format: AudioFormat) -> DecodeTicket {
        let (completer, ticket) = DecodeTicket::channel();
        let mut state = self.state.lock();
        state.requests.push(path.to_path_buf());
        state.pending.push_back(Request {
            path: path.to_path_buf(),
            completer,
        });
        ticket
    }
}
