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
use std::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::config::PackDescriptor;
use crate::pack::Pitch;

/// Writes a wav file with one inner vector per channel. Channels are interleaved on
/// the way out.
pub fn write_wav<S: hound::Sample + Copy + 'static>(
    path: PathBuf,
    samples: Vec<Vec<S>>,
    sample_rate: u32,
) -> Result<(), Box<dyn Error>> {
    let tempwav = File::create(path)?;

    // Determine sample format based on the type
    let sample_format = if std::any::TypeId::of::<S>() == std::any::TypeId::of::<f32>() {
        SampleFormat::Float
    } else if std::any::TypeId::of::<S>() == std::any::TypeId::of::<i32>() {
        SampleFormat::Int
    } else {
        return Err("Unsupported sample format".into());
    };

    let num_channels = samples.len();
    assert!(num_channels <= u16::MAX.into(), "Too many channels!");
    let mut writer = WavWriter::new(
        tempwav,
        WavSpec {
            channels: num_channels as u16,
            sample_rate,
            bits_per_sample: 32,
            sample_format,
        },
    )?;

    let frames = samples.iter().map(Vec::len).max().unwrap_or(0);
    for frame in 0..frames {
        for channel in &samples {
            writer.write_sample(channel[frame])?;
        }
    }
    writer.finalize()?;

    Ok(())
}

/// Describes a pack directory to write for a test.
pub struct PackFixture {
    name: String,
    namespace: String,
    volume_modifier: f32,
    manifest: bool,
    format_revision: bool,
    missing: Vec<Pitch>,
}

impl PackFixture {
    pub fn new(name: &str, namespace: &str) -> PackFixture {
        PackFixture {
            name: name.to_string(),
            namespace: namespace.to_string(),
            volume_modifier: 1.0,
            manifest: true,
            format_revision: true,
            missing: Vec::new(),
        }
    }

    pub fn volume(mut self, volume_modifier: f32) -> PackFixture {
        self.volume_modifier = volume_modifier;
        self
    }

    /// Leaves out the note file for the given pitch.
    pub fn without(mut self, pitch: Pitch) -> PackFixture {
        self.missing.push(pitch);
        self
    }

    /// Leaves out the manifest.
    pub fn no_manifest(mut self) -> PackFixture {
        self.manifest = false;
        self
    }

    /// Leaves the format revision out of the manifest.
    pub fn without_format_revision(mut self) -> PackFixture {
        self.format_revision = false;
        self
    }

    /// The constant level every note file for the pitch is written at.
    pub fn level(pitch: Pitch) -> f32 {
        (pitch.index() + 1) as f32 / 32.0
    }
}

/// Writes a pack directory named after the fixture into the parent directory: a
/// `pack.json` manifest and one short mono wav per pitch named `<name><PITCH>.wav`.
pub fn write_pack(parent: &Path, fixture: &PackFixture) -> PathBuf {
    let directory = parent.join(&fixture.name);
    fs::create_dir_all(&directory).expect("unable to create pack directory");

    if fixture.manifest {
        let descriptor = PackDescriptor::new(
            &fixture.name,
            &fixture.namespace,
            fixture.volume_modifier,
            1,
        );
        let mut json = serde_json::to_value(&descriptor).expect("unable to serialize manifest");
        if !fixture.format_revision {
            if let Some(fields) = json.as_object_mut() {
                fields.remove("formatRevision");
            }
        }
        fs::write(directory.join("pack.json"), json.to_string()).expect("unable to write manifest");
    }

    for pitch in Pitch::ALL {
        if fixture.missing.contains(&pitch) {
            continue;
        }
        let path = directory.join(format!("{}{}.wav", fixture.name, pitch.token()));
        write_wav(path, vec![vec![PackFixture::level(pitch); 64]], 44100)
            .expect("unable to write note");
    }

    directory
}

/// Overwrites the sample rate in the fmt chunk of a wav written by [`write_wav`] with 0.
pub fn zero_sample_rate(path: &Path) {
    let mut bytes = fs::read(path).expect("unable to read wav");
    assert_eq!(b"fmt ", &bytes[12..16], "unexpected wav layout");
    bytes[24..28].copy_from_slice(&0u32.to_le_bytes());
    fs::write(path, bytes).expect("unable to write wav");
}
