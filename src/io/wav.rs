use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;
use thiserror::Error;

use crate::track::{ChannelRole, MemoryTrack, Track, TrackError};

/// Custom error types for WAV file handling.
#[derive(Error, Debug)]
pub enum AudioError {
    /// Error when opening or decoding a WAV file.
    #[error("Failed to open WAV file: {0}")]
    OpenError(#[from] hound::Error),

    /// Error when the WAV format is not usable (e.g. not two channels).
    #[error("Unsupported WAV format")]
    UnsupportedFormat,

    /// General I/O error during audio processing.
    #[error("Audio IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the underlying track storage.
    #[error("Track error: {0}")]
    TrackError(#[from] TrackError),
}

/// Loads a stereo WAV file into a linked left/right track pair.
///
/// The two channels are deinterleaved into separate [`MemoryTrack`]s at
/// the file's sample rate. The left track is marked selected and linked,
/// so the returned pair is immediately eligible for the stereo-to-mono
/// effect when placed adjacently in a collection.
///
/// # Arguments
/// * `path` - Path to a 2-channel WAV file
///
/// # Returns
/// Returns `Result<(MemoryTrack, MemoryTrack), AudioError>` containing
/// the left and right tracks, or an error if the file cannot be read or
/// is not stereo.
///
/// # Examples
/// ```no_run
/// use monomix::load_stereo_pair;
/// let (left, right) = load_stereo_pair("stereo.wav").unwrap();
/// assert_eq!(left.samples().len(), right.samples().len());
/// ```
pub fn load_stereo_pair<P: AsRef<Path>>(path: P) -> Result<(MemoryTrack, MemoryTrack), AudioError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    if spec.channels != 2 {
        return Err(AudioError::UnsupportedFormat);
    }

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
            .collect::<Result<Vec<_>, _>>()?,
    };

    let mut left_samples = Vec::with_capacity(samples.len() / 2);
    let mut right_samples = Vec::with_capacity(samples.len() / 2);
    for frame in samples.chunks_exact(2) {
        left_samples.push(frame[0]);
        right_samples.push(frame[1]);
    }

    let mut left = MemoryTrack::with_samples("left", spec.sample_rate, left_samples);
    left.set_selected(true);
    left.set_linked(true);
    left.set_channel(ChannelRole::Left);

    let mut right = MemoryTrack::with_samples("right", spec.sample_rate, right_samples);
    right.set_selected(true);
    right.set_channel(ChannelRole::Right);

    Ok((left, right))
}

/// Exports a track's flushed content as a mono 32-bit float WAV file.
///
/// # Arguments
/// * `path` - Path to the output WAV file
/// * `track` - Track whose samples are written
///
/// # Returns
/// Returns `Result<(), AudioError>` indicating success or failure.
pub fn export_mono_wav<P: AsRef<Path>>(path: P, track: &MemoryTrack) -> Result<(), AudioError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: track.rate(),
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for sample in track.samples() {
        writer.write_sample(*sample)?;
    }

    writer.finalize()?;
    Ok(())
}
