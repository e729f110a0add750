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

//! File decoding backed by symphonia. Files are decoded fully into memory.

use std::any::Any;
use std::fs::File;
use std::io::ErrorKind;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use rayon::ThreadPoolBuilder;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};
use tracing::{debug, warn};

use super::decoder::{AudioFormat, DecodeTicket, Decoder};
use super::error::DecodeError;
use super::sample::Sample;

/// Decodes the given file into memory, blocking until done.
/// Supports WAV, MP3, OGG/Vorbis, FLAC and the other formats symphonia supports.
///
/// symphonia panics on some malformed headers. A panic while decoding is caught and
/// reported as [`DecodeError::Panicked`] so that a bad file only fails its own pack.
pub fn decode_file(path: &Path, format: AudioFormat) -> Result<Sample, DecodeError> {
    panic::catch_unwind(AssertUnwindSafe(|| decode(path, format))).unwrap_or_else(|payload| {
        let detail = panic_message(payload.as_ref());
        warn!(path = ?path, error = %detail, "Decoder panicked");
        Err(DecodeError::Panicked(
            path.to_string_lossy().to_string(),
            detail,
        ))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn decode(path: &Path, format: AudioFormat) -> Result<Sample, DecodeError> {
    let file_path = path.to_string_lossy().to_string();

    // Include the path in the error so the user sees which file failed.
    let file = File::open(path).map_err(|e| {
        DecodeError::IoError(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Unknown formats get no hint and rely on probing alone.
    let mut hint = Hint::new();
    if let Some(extension) = format.extension() {
        hint.with_extension(extension);
    }

    let meta_opts: MetadataOptions = Default::default();
    let fmt_opts: FormatOptions = Default::default();
    let probed = get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .map_err(|e| DecodeError::Unsupported(file_path.clone(), e.to_string()))?;
    let mut format_reader = probed.format;

    let track = format_reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| DecodeError::NoAudioTrack(file_path.clone()))?;
    let track_id = track.id;
    let params = track.codec_params.clone();

    let sample_rate = params
        .sample_rate
        .ok_or_else(|| DecodeError::MissingSampleRate(file_path.clone()))?;

    let decoder_opts: DecoderOptions = Default::default();
    let mut decoder = get_codecs()
        .make(&params, &decoder_opts)
        .map_err(|e| DecodeError::Unsupported(file_path.clone(), e.to_string()))?;

    // A value of 0 means the container didn't say. It's filled in from the first
    // decoded packet.
    let mut channels = params.channels.map(|c| c.count() as u16).unwrap_or(0);
    let mut data: Vec<f32> = Vec::new();
    let mut sample_buffer: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format_reader.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                if channels == 0 {
                    channels = decoded.spec().channels.count() as u16;
                }
                let buffer = sample_buffer.get_or_insert_with(|| {
                    SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec())
                });
                buffer.copy_interleaved_ref(decoded);
                data.extend_from_slice(buffer.samples());
            }
            // Corrupt packets are skipped rather than failing the whole file.
            Err(SymphoniaError::DecodeError(e)) => {
                warn!(path = %file_path, error = e, "Skipping undecodable packet");
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if channels == 0 {
        return Err(DecodeError::NoAudioTrack(file_path));
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    let sample = Sample::new(&name, data, channels, sample_rate);
    debug!(
        path = %file_path,
        channels,
        sample_rate,
        duration_ms = sample.duration().as_millis(),
        memory_kb = sample.memory_size() / 1024,
        "Decoded sample"
    );
    Ok(sample)
}

/// A decoder that runs symphonia on a dedicated Rayon thread pool. Results come back
/// through the ticket, so submitting never blocks the caller.
pub struct SymphoniaDecoder {
    pool: rayon::ThreadPool,
}

impl SymphoniaDecoder {
    /// Creates a new decoder with the given number of worker threads.
    pub fn new(num_threads: usize) -> Result<SymphoniaDecoder, DecodeError> {
        let threads = num_threads.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("soundpacks-decode-{i}"))
            .build()
            .map_err(|e| DecodeError::Pool(e.to_string()))?;
        Ok(SymphoniaDecoder { pool })
    }
}

impl Decoder for SymphoniaDecoder {
    fn submit(&self, path: &Path, format: AudioFormat) -> DecodeTicket {
        let (completer, ticket) = DecodeTicket::channel();
        let path = path.to_path_buf();
        self.pool.spawn(move || {
            let result = decode_file(&path, format).map_err(|e| e.to_string());
            completer.complete(result);
        });
        ticket
    }
}

impl std::fmt::Debug for SymphoniaDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymphoniaDecoder")
            .field("threads", &self.pool.current_num_threads())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::testutil::{eventually_resolved, write_wav, zero_sample_rate};

    #[test]
    fn test_decode_wav() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("packC1.wav");
        write_wav(path.clone(), vec![vec![0.25f32; 441], vec![-0.25f32; 441]], 44100).unwrap();

        let sample = decode_file(&path, AudioFormat::Wav).expect("decode should succeed");

        assert_eq!("packC1", sample.name());
        assert_eq!(2, sample.channel_count());
        assert_eq!(44100, sample.sample_rate());
        assert_eq!(441, sample.frames());
        assert_eq!(&[0.25f32, -0.25], &sample.data()[..2]);
    }

    #[test]
    fn test_decode_missing_file() {
        let dir = tempdir().unwrap();
        let result = decode_file(&dir.path().join("nope.wav"), AudioFormat::Wav);
        assert!(matches!(result, Err(DecodeError::IoError(_))));
    }

    #[test]
    fn test_decode_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("C1.ogg");
        std::fs::write(&path, b"definitely not vorbis").unwrap();

        assert!(decode_file(&path, AudioFormat::Ogg).is_err());
    }

    #[test]
    fn test_decode_zero_sample_rate_does_not_panic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("packC1.wav");
        write_wav(path.clone(), vec![vec![0.25f32; 441]], 44100).unwrap();
        zero_sample_rate(&path);

        let result = decode_file(&path, AudioFormat::Wav);

        assert!(result.is_err());
    }

    #[test]
    fn test_symphonia_decoder_resolves_ticket() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("D1.wav");
        write_wav(path.clone(), vec![vec![0.5f32; 100]], 48000).unwrap();

        let decoder = SymphoniaDecoder::new(1).unwrap();
        let ticket = decoder.submit(&path, AudioFormat::Wav);

        let sample = eventually_resolved(ticket).expect("decode should succeed");
        assert_eq!(100, sample.frames());
        assert_eq!(48000, sample.sample_rate());
    }

    #[test]
    fn test_symphonia_decoder_reports_errors() {
        let dir = tempdir().unwrap();
        let decoder = SymphoniaDecoder::new(1).unwrap();
        let ticket = decoder.submit(&dir.path().join("E1.wav"), AudioFormat::Wav);

        let error = eventually_resolved(ticket).expect_err("decode should fail");
        assert!(error.contains("E1.wav"));
    }
}
