//! Binary spectrum generators for property-based testing.
//!
//! Provides both strategy functions (for use with `#[strategy(...)]`) and
//! `Arbitrary`-deriving structs for common delay estimator inputs.

use proptest::prelude::*;
use test_strategy::Arbitrary;

/// Number of frames in a [`DelayedSpectra`] sequence.
pub const DELAYED_SPECTRA_FRAMES: usize = 1200;

/// Dimensions of a delay estimator whose history is long enough to shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub struct EstimatorDimensions {
    #[strategy(2..=64usize)]
    pub max_delay: usize,
    #[strategy(0..=8usize)]
    pub lookahead: usize,
}

impl EstimatorDimensions {
    pub fn history_size(&self) -> usize {
        self.max_delay + self.lookahead
    }

    pub fn near_history_size(&self) -> usize {
        self.lookahead + 1
    }
}

/// A far-end/near-end spectrum stream where the near-end repeats the
/// far-end `offset` frames later.
///
/// A negative `offset` means the near-end leads the far-end, which the
/// estimator can only detect through its lookahead.
#[derive(Debug, Clone, Arbitrary)]
pub struct DelayedSpectra {
    pub dimensions: EstimatorDimensions,
    #[strategy(-(#dimensions.lookahead as isize)..#dimensions.max_delay as isize)]
    pub offset: isize,
    #[strategy(spectrum_sequence(DELAYED_SPECTRA_FRAMES + #dimensions.history_size()))]
    pub base: Vec<u32>,
}

impl DelayedSpectra {
    /// Yields `(far, near)` pairs, `DELAYED_SPECTRA_FRAMES` of them.
    pub fn frames(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let lookahead = self.dimensions.lookahead;
        (lookahead..lookahead + DELAYED_SPECTRA_FRAMES).map(move |i| {
            let far = self.base[(i as isize + self.offset) as usize];
            (far, self.base[i])
        })
    }

    /// The delay an estimator reports once converged, including the
    /// lookahead offset.
    pub fn expected_delay(&self) -> usize {
        (self.offset + self.dimensions.lookahead as isize) as usize
    }
}

/// Generate an arbitrary binary spectrum.
pub fn binary_spectrum() -> impl Strategy<Value = u32> {
    any::<u32>()
}

/// Generate `len` non-empty binary spectra.
pub fn spectrum_sequence(len: usize) -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(1..=u32::MAX, len..=len)
}

/// Generate up to `max_len` unrelated `(far, near)` spectrum pairs.
pub fn spectrum_pairs(max_len: usize) -> impl Strategy<Value = Vec<(u32, u32)>> {
    proptest::collection::vec((binary_spectrum(), binary_spectrum()), 0..=max_len)
}

/// Binary spectra `1, 3, 9, 27, ...` (powers of three, wrapping at 32 bits).
///
/// Every word is distinct within the first `2^30` entries and has bit 0 set.
pub fn geometric_spectra(len: usize) -> Vec<u32> {
    std::iter::successors(Some(1u32), |prev| Some(prev.wrapping_mul(3)))
        .take(len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn geometric_sequence() {
        assert_eq!(geometric_spectra(5), vec![1, 3, 9, 27, 81]);
        let long = geometric_spectra(30);
        assert_eq!(long[21], 3u32.pow(20).wrapping_mul(3));
        assert!(long.iter().all(|w| w & 1 == 1));
    }

    #[proptest]
    fn dimensions_are_shiftable(dimensions: EstimatorDimensions) {
        assert!(dimensions.history_size() > 1);
        assert_eq!(dimensions.near_history_size(), dimensions.lookahead + 1);
    }

    #[proptest]
    fn sequence_correct_length(#[strategy(spectrum_sequence(50))] seq: Vec<u32>) {
        assert_eq!(seq.len(), 50);
        assert!(seq.iter().all(|&w| w != 0));
    }

    #[proptest]
    fn pairs_bounded(#[strategy(spectrum_pairs(20))] pairs: Vec<(u32, u32)>) {
        assert!(pairs.len() <= 20);
    }

    #[proptest(ProptestConfig::with_cases(32))]
    fn delayed_spectra_consistent(spectra: DelayedSpectra) {
        let history_size = spectra.dimensions.history_size();
        assert_eq!(spectra.base.len(), DELAYED_SPECTRA_FRAMES + history_size);
        assert!(spectra.expected_delay() < history_size);

        let frames: Vec<_> = spectra.frames().collect();
        assert_eq!(frames.len(), DELAYED_SPECTRA_FRAMES);

        // The near-end equals the far-end `offset` frames earlier.
        let start = spectra.offset.max(0) as usize;
        for t in start..frames.len() {
            let source = (t as isize - spectra.offset) as usize;
            if source < frames.len() {
                assert_eq!(frames[t].1, frames[source].0);
            }
        }
    }
}
