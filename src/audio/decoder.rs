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

//! The asynchronous decode contract used by the pack loader.
//!
//! A decoder accepts a file and a format hint and hands back a [`DecodeTicket`]. The
//! ticket is polled without blocking once per tick until the decode resolves. Where
//! the decode actually runs is up to the decoder.

use std::fmt;
use std::path::Path;

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};

use super::sample::Sample;

/// The result of a decode: a sample, or a description of what went wrong.
pub type DecodeResult = Result<Sample, String>;

/// The container format of an audio file, as guessed from its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Ogg,
    /// Anything else. The decoder makes a best-effort attempt.
    Unknown,
}

impl AudioFormat {
    /// Guesses the format from the extension of the given path. Matching ignores case.
    pub fn from_path(path: &Path) -> AudioFormat {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("wav") => AudioFormat::Wav,
            Some("mp3") => AudioFormat::Mp3,
            Some("ogg") => AudioFormat::Ogg,
            _ => AudioFormat::Unknown,
        }
    }

    /// The extension to hint to a format probe, if the format is known.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            AudioFormat::Wav => Some("wav"),
            AudioFormat::Mp3 => Some("mp3"),
            AudioFormat::Ogg => Some("ogg"),
            AudioFormat::Unknown => None,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.extension() {
            Some(ext) => write!(f, "{}", ext),
            None => write!(f, "unknown"),
        }
    }
}

/// Anything that can decode audio files asynchronously.
pub trait Decoder {
    /// Submits a file for decoding. The returned ticket resolves on some later poll.
    fn submit(&self, path: &Path, format: AudioFormat) -> DecodeTicket;
}

impl<D: Decoder + ?Sized> Decoder for &D {
    fn submit(&self, path: &Path, format: AudioFormat) -> DecodeTicket {
        (**self).submit(path, format)
    }
}

/// The receiving half of a single decode request.
pub struct DecodeTicket {
    receiver: Receiver<DecodeResult>,
}

/// The sending half of a single decode request. Consumed on completion.
pub struct DecodeCompleter {
    sender: Sender<DecodeResult>,
}

impl DecodeTicket {
    /// Creates a linked completer and ticket.
    pub fn channel() -> (DecodeCompleter, DecodeTicket) {
        let (sender, receiver) = bounded(1);
        (DecodeCompleter { sender }, DecodeTicket { receiver })
    }

    /// Returns the result if the decode has resolved, or None if it's still running.
    /// A completer that is dropped without completing resolves the ticket as an error.
    pub fn poll(&mut self) -> Option<DecodeResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err("decoder abandoned the request".to_string()))
            }
        }
    }
}

impl DecodeCompleter {
    /// Resolves the linked ticket.
    pub fn complete(self, result: DecodeResult) {
        // The ticket may already be gone if its load was dropped, which is fine.
        let _ = self.sender.send(result);
    }
}
