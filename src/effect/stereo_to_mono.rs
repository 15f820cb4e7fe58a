use log::debug;

use crate::effect::{Effect, EffectError};
use crate::track::{ChannelRole, Track, TrackFactory};

/// Converts linked stereo track pairs to mono.
///
/// The effect scans a track collection for wave tracks that are selected
/// and flagged as the first of a linked pair, treats each one's immediate
/// successor as its right channel, and mixes the two down to a single
/// mono track by averaging corresponding samples. The right track is
/// removed; the left track receives the mixed signal and is reclassified
/// as mono. Pairs whose tracks disagree on sample rate are skipped
/// untouched.
///
/// This effect is invoked programmatically by hosts (e.g. as part of a
/// "make mono" command) rather than picked from an effect menu, so it
/// declares itself hidden and non-interactive.
pub struct StereoToMono;

impl Effect for StereoToMono {
    fn name(&self) -> &'static str {
        "Stereo To Mono"
    }

    fn description(&self) -> &'static str {
        "Converts stereo tracks to mono"
    }

    fn audio_in_count(&self) -> usize {
        2
    }

    fn audio_out_count(&self) -> usize {
        1
    }

    fn is_hidden(&self) -> bool {
        true
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

impl StereoToMono {
    /// Runs the effect over a track collection.
    ///
    /// Operates on a working copy of the collection so the caller's view
    /// stays valid while tracks are removed, then commits the copy back.
    /// The commit also happens when a pair fails mid-run: pairs mixed
    /// before the failure keep their mixed state (the operation is not
    /// atomic across pairs), while the failing pair itself is left
    /// unmodified because its mixed signal is pasted only after the full
    /// streaming pass completes.
    ///
    /// A single staging track is created at the rate of the first wave
    /// track and reused (cleared) across all pairs found in this run.
    ///
    /// # Arguments
    /// * `tracks` - Ordered track collection, mutated in place on commit
    /// * `factory` - Host capability to create the mono staging track
    /// * `progress` - Called once per block with the scan position and the
    ///   covered fraction of the current pair scaled to 0..2; returning
    ///   `true` requests cancellation
    ///
    /// # Returns
    /// Returns `Result<(), EffectError>`, failing on cancellation or on a
    /// track I/O error.
    pub fn process<T, F, P>(
        &self,
        tracks: &mut Vec<T>,
        factory: &F,
        progress: &mut P,
    ) -> Result<(), EffectError>
    where
        T: Track + Clone,
        F: TrackFactory<Track = T>,
        P: FnMut(usize, f64) -> bool,
    {
        let mut working = tracks.clone();

        let Some(rate) = working.iter().find(|t| t.is_wave()).map(Track::rate) else {
            return Ok(());
        };
        let mut out = factory.new_track(rate);

        let mut cursor = 0;
        let mut count = 0;
        let result = loop {
            if cursor >= working.len() {
                break Ok(());
            }
            let candidate = &working[cursor];
            // A linked track's successor is trusted to be its right
            // channel; the host maintains that pairing invariant.
            let forms_pair = candidate.is_wave()
                && candidate.selected()
                && candidate.linked()
                && cursor + 1 < working.len();
            if forms_pair {
                let left_rate = working[cursor].rate();
                let right_rate = working[cursor + 1].rate();
                if left_rate == right_rate {
                    let (head, tail) = working.split_at_mut(cursor + 1);
                    match mix_pair(&mut head[cursor], &mut tail[0], &mut out, count, progress) {
                        Ok(()) => {
                            working.remove(cursor + 1);
                            if let Err(e) = out.clear(out.start_time(), out.end_time()) {
                                break Err(e.into());
                            }
                            // The removal invalidated the forward scan;
                            // restart from the head of the collection.
                            cursor = 0;
                        }
                        Err(e) => break Err(e),
                    }
                } else {
                    debug!(
                        "skipping pair at {cursor}: rates {left_rate} and {right_rate} differ"
                    );
                    cursor += 2;
                }
            } else {
                cursor += 1;
            }
            count += 1;
        };

        *tracks = working;
        result
    }
}

/// Streams one left/right pair into `out` as averaged mono frames, then
/// swaps the mixed signal into the left track.
///
/// The processed range is the union of both tracks' occupied spans in
/// shared sample units. Samples are pulled in fixed-size blocks (twice
/// the left track's natural granularity) so memory stays bounded for
/// arbitrarily long tracks; the final block is short when the range is
/// not a multiple of the block size. Cancellation is checked once per
/// block, and a cancelled or failed pair leaves both tracks unmodified
/// since the left track is rewritten only after the full range has been
/// staged.
fn mix_pair<T, P>(
    left: &mut T,
    right: &mut T,
    out: &mut T,
    count: usize,
    progress: &mut P,
) -> Result<(), EffectError>
where
    T: Track,
    P: FnMut(usize, f64) -> bool,
{
    let start = left
        .time_to_samples(left.start_time())
        .min(right.time_to_samples(right.start_time()));
    let end = left
        .time_to_samples(left.end_time())
        .max(right.time_to_samples(right.end_time()));

    debug!(
        "mixing '{}' and '{}' over [{start}, {end}) at {} Hz",
        left.name(),
        right.name(),
        left.rate()
    );

    let block_len = left.max_block_size() * 2;
    let mut left_buffer = vec![0.0f32; block_len];
    let mut right_buffer = vec![0.0f32; block_len];

    let mut index = start;
    while index < end {
        left.get(&mut left_buffer, index)?;
        right.get(&mut right_buffer, index)?;
        let limit = block_len.min((end - index) as usize);
        for i in 0..limit {
            left_buffer[i] = (left_buffer[i] + right_buffer[i]) / 2.0;
        }
        index += limit as u64;
        out.append(&left_buffer[..limit])?;

        // One pass over the pair counts as half of the host's two-pass
        // cost metric, hence the 0..2 scale.
        let fraction = 2.0 * (index - start) as f64 / (end - start) as f64;
        if progress(count, fraction) {
            return Err(EffectError::Cancelled);
        }
    }

    let paste_at = left.start_time().min(right.start_time());
    left.clear(left.start_time(), left.end_time())?;
    out.flush()?;
    left.paste(paste_at, out)?;
    left.set_linked(false);
    right.set_linked(false);
    left.set_channel(ChannelRole::Mono);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::{MemoryTrack, MemoryTrackFactory};

    fn stereo_pair(rate_left: u32, rate_right: u32) -> (MemoryTrack, MemoryTrack) {
        let mut left = MemoryTrack::with_samples("left", rate_left, vec![1.0, 1.0, -1.0, -1.0]);
        left.set_selected(true);
        left.set_linked(true);
        left.set_channel(ChannelRole::Left);
        let mut right = MemoryTrack::with_samples("right", rate_right, vec![0.0, 0.0, 0.0, 0.0]);
        right.set_selected(true);
        right.set_channel(ChannelRole::Right);
        (left, right)
    }

    #[test]
    fn test_pair_averaged_into_mono() {
        let (left, right) = stereo_pair(8, 8);
        let mut tracks = vec![left, right];
        StereoToMono
            .process(&mut tracks, &MemoryTrackFactory, &mut |_, _| false)
            .unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].samples(), &[0.5, 0.5, -0.5, -0.5]);
        assert_eq!(tracks[0].channel(), ChannelRole::Mono);
        assert!(!tracks[0].linked());
    }

    #[test]
    fn test_rate_mismatch_pair_skipped() {
        let (left, right) = stereo_pair(8, 16);
        let mut tracks = vec![left, right];
        StereoToMono
            .process(&mut tracks, &MemoryTrackFactory, &mut |_, _| false)
            .unwrap();
        assert_eq!(tracks.len(), 2);
        assert!(tracks[0].linked());
        assert_eq!(tracks[0].samples(), &[1.0, 1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_trailing_linked_track_without_partner() {
        let (left, _) = stereo_pair(8, 8);
        let mut tracks = vec![left];
        StereoToMono
            .process(&mut tracks, &MemoryTrackFactory, &mut |_, _| false)
            .unwrap();
        assert_eq!(tracks.len(), 1);
        assert!(tracks[0].linked());
    }

    #[test]
    fn test_zero_length_pair_is_success() {
        let mut left = MemoryTrack::new("left", 8);
        left.set_selected(true);
        left.set_linked(true);
        let right = MemoryTrack::new("right", 8);
        let mut tracks = vec![left, right];
        StereoToMono
            .process(&mut tracks, &MemoryTrackFactory, &mut |_, _| false)
            .unwrap();
        assert_eq!(tracks.len(), 1);
        assert!(tracks[0].samples().is_empty());
    }

    #[test]
    fn test_declared_capabilities() {
        let effect = StereoToMono;
        assert_eq!(effect.audio_in_count(), 2);
        assert_eq!(effect.audio_out_count(), 1);
        assert!(effect.is_hidden());
        assert!(!effect.is_interactive());
    }
}
