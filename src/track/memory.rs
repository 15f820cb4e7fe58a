use crate::track::handle::{ChannelRole, Track, TrackError, TrackFactory};

/// Natural block granularity of [`MemoryTrack`], in samples.
pub const NATURAL_BLOCK_SIZE: usize = 1024;

/// In-memory reference implementation of [`Track`].
///
/// Holds its samples in a `Vec<f32>` starting at a time offset, with a
/// separate pending buffer for appends that become readable only after
/// [`Track::flush`]. Suitable as host track storage for small projects
/// and as a substitute for host-backed tracks in tests.
#[derive(Debug, Clone)]
pub struct MemoryTrack {
    name: String,
    rate: u32,
    /// Start of the occupied span, in seconds.
    offset: f64,
    samples: Vec<f32>,
    pending: Vec<f32>,
    selected: bool,
    linked: bool,
    channel: ChannelRole,
}

impl MemoryTrack {
    /// Creates a new empty mono track.
    ///
    /// # Arguments
    /// * `name` - Display name of the track
    /// * `rate` - Sample rate in Hz
    pub fn new(name: impl Into<String>, rate: u32) -> Self {
        Self {
            name: name.into(),
            rate,
            offset: 0.0,
            samples: Vec::new(),
            pending: Vec::new(),
            selected: false,
            linked: false,
            channel: ChannelRole::Mono,
        }
    }

    /// Creates a track pre-filled with samples starting at time zero.
    pub fn with_samples(name: impl Into<String>, rate: u32, samples: Vec<f32>) -> Self {
        let mut track = Self::new(name, rate);
        track.samples = samples;
        track
    }

    /// Moves the occupied span to start at `seconds`.
    pub fn set_offset(&mut self, seconds: f64) {
        self.offset = seconds;
    }

    /// Flushed sample content of the track.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Absolute sample index of the first occupied sample.
    fn first_sample(&self) -> u64 {
        self.time_to_samples(self.offset)
    }
}

impl Track for MemoryTrack {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_wave(&self) -> bool {
        true
    }

    fn rate(&self) -> u32 {
        self.rate
    }

    fn selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn linked(&self) -> bool {
        self.linked
    }

    fn set_linked(&mut self, linked: bool) {
        self.linked = linked;
    }

    fn channel(&self) -> ChannelRole {
        self.channel
    }

    fn set_channel(&mut self, role: ChannelRole) {
        self.channel = role;
    }

    fn start_time(&self) -> f64 {
        self.offset
    }

    fn end_time(&self) -> f64 {
        self.offset + self.samples.len() as f64 / self.rate as f64
    }

    fn max_block_size(&self) -> usize {
        NATURAL_BLOCK_SIZE
    }

    fn get(&self, buffer: &mut [f32], start: u64) -> Result<(), TrackError> {
        let first = self.first_sample();
        let len = self.samples.len() as u64;
        for (i, slot) in buffer.iter_mut().enumerate() {
            let position = start + i as u64;
            *slot = if position >= first && position < first + len {
                self.samples[(position - first) as usize]
            } else {
                0.0
            };
        }
        Ok(())
    }

    fn append(&mut self, samples: &[f32]) -> Result<(), TrackError> {
        self.pending.extend_from_slice(samples);
        Ok(())
    }

    fn clear(&mut self, start: f64, end: f64) -> Result<(), TrackError> {
        if end < start {
            return Err(TrackError::InvalidRange);
        }
        let first = self.first_sample();
        let from = self.time_to_samples(start).saturating_sub(first) as usize;
        let to = self.time_to_samples(end).saturating_sub(first) as usize;
        let from = from.min(self.samples.len());
        let to = to.min(self.samples.len());
        self.samples.drain(from..to);
        Ok(())
    }

    fn paste(&mut self, at: f64, source: &Self) -> Result<(), TrackError> {
        if source.rate != self.rate {
            return Err(TrackError::RateMismatch(self.rate, source.rate));
        }
        if self.samples.is_empty() {
            self.offset = at;
            self.samples = source.samples.clone();
            return Ok(());
        }
        let at_sample = self.time_to_samples(at);
        let index = at_sample.saturating_sub(self.first_sample()) as usize;
        if index > self.samples.len() {
            // gap between current end and the paste point reads as silence
            self.samples.resize(index, 0.0);
        }
        let tail = self.samples.split_off(index);
        self.samples.extend_from_slice(&source.samples);
        self.samples.extend(tail);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TrackError> {
        self.samples.append(&mut self.pending);
        Ok(())
    }
}

/// Factory producing [`MemoryTrack`] instances.
pub struct MemoryTrackFactory;

impl TrackFactory for MemoryTrackFactory {
    type Track = MemoryTrack;

    fn new_track(&self, rate: u32) -> MemoryTrack {
        MemoryTrack::new("output", rate)
    }
}
