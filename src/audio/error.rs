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
/// Error types for decoding audio files.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Unsupported audio file '{0}': {1}")]
    Unsupported(String, String),

    #[error("No audio track found in '{0}'")]
    NoAudioTrack(String),

    #[error("Sample rate not specified in '{0}'")]
    MissingSampleRate(String),

    #[error("Decoder panicked on '{0}': {1}")]
    Panicked(String, String),

    #[error("Unable to start decoder pool: {0}")]
    Pool(String),

    #[error("Audio file error: {0}")]
    AudioError(#[from] symphonia::core::errors::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
