//! # monomix: Stereo-Pair Down-Mixing for Track Collections
//!
//! monomix implements one audio-processing effect: converting a linked
//! left/right stereo pair of tracks into a single mono track. The effect
//! scans an ordered track collection for selected, linked pairs, streams
//! their samples through a fixed-size buffer, averages corresponding
//! left/right samples into mono frames, and replaces each pair with one
//! mono track holding the mixed signal.
//!
//! ## Key Features
//! - Track Abstraction: the mixer depends only on a capability trait
//!   (read at offset, append, clear, paste, metadata), not on a concrete
//!   track type, so hosts can plug in their own track storage.
//! - Bounded Memory: samples are streamed block by block; peak memory use
//!   is independent of track length.
//! - Cooperative Cancellation: a synchronous progress callback is polled
//!   once per block and can abort the run.
//! - WAV I/O: loading a stereo file into a ready-to-mix track pair and
//!   exporting the mixed result, built on `hound`.
//!
//! ## Usage
//! ```no_run
//! use monomix::{load_stereo_pair, MemoryTrackFactory, StereoToMono};
//!
//! let (left, right) = load_stereo_pair("stereo.wav").unwrap();
//! let mut tracks = vec![left, right];
//! StereoToMono
//!     .process(&mut tracks, &MemoryTrackFactory, &mut |_, _| false)
//!     .unwrap();
//! assert_eq!(tracks.len(), 1);
//! ```
//!
//! ## Modules
//! See the individual module documentation for detailed information on
//! available functionality.

/// Track abstraction module.
///
/// Defines the track capability trait the mixer operates on, channel role
/// metadata, and an in-memory reference track implementation.
pub mod track;

/// Effect module.
///
/// Contains the stereo-to-mono effect, its declared capability metadata,
/// and the effect error types.
pub mod effect;

/// Audio input/output module.
///
/// Provides functions for loading stereo WAV files into track pairs and
/// exporting mono tracks.
pub mod io;

// Re-export all public items from the modules for convenient access at the crate root.
pub use effect::*;
pub use io::*;
pub use track::*;
