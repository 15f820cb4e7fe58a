use thiserror::Error;

/// Custom error types for track storage operations.
///
/// This enum covers the failure conditions a track implementation may hit
/// while reading, writing, or restructuring sample data. In-memory tracks
/// rarely fail, but host-backed tracks (disk-paged sequences, project
/// databases) surface their I/O problems through these variants.
#[derive(Error, Debug)]
pub enum TrackError {
    /// Error when two tracks with different sample rates are combined.
    #[error("Sample rates mismatch: expected {0}, found {1}")]
    RateMismatch(u32, u32),

    /// Error when a clear or read range is invalid.
    #[error("Invalid sample range")]
    InvalidRange,

    /// General I/O error from the underlying track storage.
    #[error("Track IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error when a block read fails.
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Error when a block write or append fails.
    #[error("Write failed: {0}")]
    WriteFailed(String),
}

/// Channel role of a track within a stereo pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRole {
    Left,
    Right,
    Mono,
}

/// Capability interface for a named, selectable audio track.
///
/// The down-mix effect depends only on this trait, never on a concrete
/// track type, so a host can substitute its own storage (or a test
/// double). Sample positions are absolute sample indices at the track's
/// rate; times are seconds. A track occupies the time span
/// `[start_time, end_time)`; reads outside that span yield silence.
///
/// A track flagged as linked is the first of a stereo pair and its
/// immediate successor in the collection is treated as its right channel.
/// That convention is maintained by the host and is not validated here.
pub trait Track {
    /// Display name of the track.
    fn name(&self) -> &str;

    /// Whether this is a wave (sample-carrying) track. Non-wave tracks
    /// (labels, time rulers) are ignored by audio effects.
    fn is_wave(&self) -> bool;

    /// Sample rate in Hz.
    fn rate(&self) -> u32;

    /// Whether the track is currently selected.
    fn selected(&self) -> bool;

    fn set_selected(&mut self, selected: bool);

    /// Whether the track is flagged as the first of a linked stereo pair.
    fn linked(&self) -> bool;

    fn set_linked(&mut self, linked: bool);

    /// Channel role within a stereo pair.
    fn channel(&self) -> ChannelRole;

    fn set_channel(&mut self, role: ChannelRole);

    /// Start of the occupied time span, in seconds.
    fn start_time(&self) -> f64;

    /// End of the occupied time span, in seconds.
    fn end_time(&self) -> f64;

    /// Converts a time in seconds to an absolute sample index at this
    /// track's rate, rounding to the nearest sample.
    fn time_to_samples(&self, time: f64) -> u64 {
        (time * self.rate() as f64 + 0.5).max(0.0) as u64
    }

    /// Natural block granularity of the underlying storage, in samples.
    /// Streaming consumers size their buffers from this.
    fn max_block_size(&self) -> usize;

    /// Reads `buffer.len()` samples starting at absolute sample index
    /// `start`. Positions outside the occupied span are filled with
    /// silence; a short tail is therefore the caller's concern, not an
    /// error.
    fn get(&self, buffer: &mut [f32], start: u64) -> Result<(), TrackError>;

    /// Appends samples at the end of the track. Appends may be buffered
    /// by the implementation and are not guaranteed readable until
    /// [`Track::flush`] is called.
    fn append(&mut self, samples: &[f32]) -> Result<(), TrackError>;

    /// Removes the samples in the time range `[start, end)`, shifting any
    /// later audio earlier.
    fn clear(&mut self, start: f64, end: f64) -> Result<(), TrackError>;

    /// Inserts the full content of `source` into this track at time `at`.
    ///
    /// # Returns
    /// Returns `Err(TrackError::RateMismatch)` if the source rate differs.
    fn paste(&mut self, at: f64, source: &Self) -> Result<(), TrackError>;

    /// Makes all buffered appends durable and readable.
    fn flush(&mut self) -> Result<(), TrackError>;
}

/// Capability to create new, empty tracks. Supplied by the host so that
/// effects can stage output in the host's own track storage.
pub trait TrackFactory {
    type Track: Track;

    /// Creates a new empty mono track at the given sample rate.
    fn new_track(&self, rate: u32) -> Self::Track;
}
