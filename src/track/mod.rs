pub mod handle;
pub mod memory;

pub use handle::{ChannelRole, Track, TrackError, TrackFactory};
pub use memory::{MemoryTrack, MemoryTrackFactory, NATURAL_BLOCK_SIZE};
