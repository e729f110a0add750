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

//! Decoded sample buffers and the copy routine used when a pack's samples must be
//! duplicated.

use std::fmt;
use std::time::Duration;

/// A fully decoded audio sample. Samples are interleaved if multi-channel.
///
/// A sample exclusively owns its data. There is intentionally no `Clone` impl: copies
/// are made through [`clone_sample`] so that callers can supply a staging buffer.
#[derive(PartialEq)]
pub struct Sample {
    /// A display name for the sample, usually the stem of the file it came from.
    name: String,
    /// The sample data as f32 samples.
    data: Vec<f32>,
    /// Number of channels in the sample.
    channel_count: u16,
    /// Sample rate of the audio data.
    sample_rate: u32,
}

impl Sample {
    /// Creates a new sample from interleaved data.
    pub fn new(name: &str, data: Vec<f32>, channel_count: u16, sample_rate: u32) -> Sample {
        Sample {
            name: name.to_string(),
            data,
            channel_count: channel_count.max(1),
            sample_rate,
        }
    }

    /// Creates a silent sample with room for the given number of samples.
    pub fn silent(name: &str, sample_count: usize, channel_count: u16, sample_rate: u32) -> Sample {
        Sample::new(name, vec![0.0; sample_count], channel_count, sample_rate)
    }

    /// Returns the name of the sample.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of channels.
    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    /// Returns the sample rate.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Returns the total number of samples across all channels.
    pub fn sample_count(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.data.len() / self.channel_count as usize
    }

    /// Returns the duration of the sample.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Returns the memory size in bytes.
    pub fn memory_size(&self) -> usize {
        self.data.len() * std::mem::size_of::<f32>()
    }

    /// Returns the sample data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the sample data for in-place modification.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

impl fmt::Debug for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sample")
            .field("name", &self.name)
            .field("channel_count", &self.channel_count)
            .field("sample_rate", &self.sample_rate)
            .field("frames", &self.frames())
            .finish()
    }
}

/// Copies a sample into a new, independently owned sample.
///
/// The data is staged through `scratch` when it is long enough to hold every sample of
/// the source. Otherwise the copy is made straight into a buffer sized exactly to the
/// source, which becomes the new sample's storage. Callers copying several samples in a
/// row should size one scratch buffer to the largest of them and pass it to every call.
pub fn clone_sample(sample: &Sample, scratch: Option<&mut Vec<f32>>) -> Sample {
    let count = sample.sample_count();

    let data = match scratch {
        Some(buf) if buf.len() >= count => {
            let staging = &mut buf[..count];
            staging.copy_from_slice(sample.data());
            staging.to_vec()
        }
        _ => sample.data().to_vec(),
    };

    Sample::new(
        sample.name(),
        data,
        sample.channel_count(),
        sample.sample_rate(),
    )
}

/// Returns a scratch buffer large enough to stage any of the given samples.
pub fn scratch_for<'a, I>(samples: I) -> Vec<f32>
where
    I: IntoIterator<Item = &'a Sample>,
{
    let largest = samples
        .into_iter()
        .map(|s| s.sample_count())
        .max()
        .unwrap_or(0);
    vec![0.0; largest]
}
