use thiserror::Error;

use crate::track::TrackError;

pub mod stereo_to_mono;

pub use stereo_to_mono::StereoToMono;

/// Custom error types for effect execution.
///
/// A rate mismatch between the tracks of a candidate pair is deliberately
/// absent: it is a skip condition handled inside the scan, not a failure.
#[derive(Error, Debug)]
pub enum EffectError {
    /// The progress callback requested cancellation.
    #[error("Processing cancelled")]
    Cancelled,

    /// A track read, write, or restructuring operation failed.
    #[error("Track error: {0}")]
    Track(#[from] TrackError),
}

/// Capability metadata an effect declares to its host.
///
/// Hosts use this to decide where an effect appears (menus vs.
/// programmatic invocation only), whether to show a configuration dialog,
/// and how many audio channels it consumes and produces.
pub trait Effect {
    /// Short identifying name.
    fn name(&self) -> &'static str;

    /// One-line description for host UIs.
    fn description(&self) -> &'static str;

    /// Number of input audio channels the effect requires.
    fn audio_in_count(&self) -> usize;

    /// Number of output audio channels the effect produces.
    fn audio_out_count(&self) -> usize;

    /// Whether the effect is hidden from interactive effect menus.
    fn is_hidden(&self) -> bool {
        false
    }

    /// Whether the effect presents a configuration dialog.
    fn is_interactive(&self) -> bool {
        true
    }
}
