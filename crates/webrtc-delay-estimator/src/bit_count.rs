//! Bit counting on binary spectra.
//!
//! Ported from the `BitCount` / `BitCountComparison` helpers in
//! `modules/audio_processing/utility/delay_estimator.c`.

/// Returns the number of set bits in `word`, in `0..=32`.
#[inline]
pub fn bit_count(word: u32) -> u32 {
    word.count_ones()
}

/// Compares `binary_vector` with every row of `binary_matrix` and stores the
/// number of differing bits per row in `bit_counts`.
///
/// Only the first `min(binary_matrix.len(), bit_counts.len())` rows are
/// compared; callers pass equally sized slices.
pub fn bit_count_comparison(binary_vector: u32, binary_matrix: &[u32], bit_counts: &mut [u32]) {
    debug_assert_eq!(binary_matrix.len(), bit_counts.len());
    for (count, &row) in bit_counts.iter_mut().zip(binary_matrix) {
        *count = bit_count(binary_vector ^ row);
    }
}
