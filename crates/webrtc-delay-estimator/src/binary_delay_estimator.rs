//! Delay estimation on binary converted spectra.
//!
//! Ported from `modules/audio_processing/utility/delay_estimator.c`.
//!
//! Every call to [`BinaryDelayEstimator::process`] compares the current
//! near-end binary spectrum against a history of far-end binary spectra, one
//! candidate delay per history slot. The per-candidate Hamming distances are
//! smoothed over time, and the candidate with the lowest smoothed distance is
//! reported once it stands out clearly enough from the rest.

use std::num::NonZero;

use crate::bit_count::{bit_count, bit_count_comparison};
use crate::config::DelayEstimatorConfig;
use crate::fixed_point::Q9;
use crate::history::History;

/// Right shifts used for smoothing at an empty far-end binary spectrum. The
/// number of shifts decreases linearly with the far-end bit count.
const SHIFTS_AT_ZERO: u32 = 13;
const SHIFTS_LINEAR_SLOPE: u32 = 3;

/// Initial value of every smoothed bit count.
const INITIAL_MEAN_BIT_COUNT: Q9 = Q9::from_int(20);
/// Upper bound of a smoothed bit count (all 32 bits differ).
const MAX_MEAN_BIT_COUNT: Q9 = Q9::from_int(32);
const INITIAL_PROBABILITY: Q9 = Q9::from_int(32);

const PROBABILITY_OFFSET: Q9 = Q9::from_int(2);
const PROBABILITY_LOWER_LIMIT: Q9 = Q9::from_int(17);
/// 5.5 in Q9.
const PROBABILITY_MIN_SPREAD: Q9 = Q9::from_raw(2816);

/// Raw encoding of "no delay estimated yet".
pub const DELAY_UNKNOWN: i32 = -2;

// ─── Error ───────────────────────────────────────────────────────────

/// Errors returned when constructing a delay estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `max_delay + lookahead` must be greater than one for the far-end
    /// history to be shifted.
    HistoryTooShort { history_size: usize },
    /// A negative `max_delay` or `lookahead` was supplied.
    NegativeDimension,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HistoryTooShort { history_size } => {
                write!(f, "history size {history_size} is too short, must be > 1")
            }
            Self::NegativeDimension => write!(f, "negative max delay or lookahead"),
        }
    }
}

impl std::error::Error for Error {}

// ─── BinaryDelayEstimator ───────────────────────────────────────────

/// Estimates the delay between a far-end and a near-end stream of binary
/// spectra.
///
/// One instance tracks one stream. It is not synchronized; drive it from a
/// single thread.
#[derive(derive_more::Debug)]
pub struct BinaryDelayEstimator {
    config: DelayEstimatorConfig,

    /// Smoothed `bit_counts`, one per candidate delay.
    #[debug(skip)]
    mean_bit_counts: Vec<Q9>,
    /// Bit counts of the far-end spectra held in `binary_far_history`.
    #[debug(skip)]
    far_bit_counts: History<u32>,
    /// Per-candidate Hamming distances of the latest frame.
    #[debug(skip)]
    bit_counts: Vec<u32>,

    #[debug(skip)]
    binary_far_history: History<u32>,
    #[debug(skip)]
    binary_near_history: History<u32>,

    /// Adaptive threshold below which a best candidate is always trusted.
    /// Never increases between calls to [`init`](Self::init).
    minimum_probability: Q9,
    /// Quality of the last accepted candidate, slowly drifting upwards.
    last_delay_probability: Q9,

    last_delay: Option<usize>,
}

impl BinaryDelayEstimator {
    /// Creates and initializes a delay estimator.
    ///
    /// Fails if `config.max_delay + config.lookahead <= 1`.
    pub fn new(config: DelayEstimatorConfig) -> Result<Self, Error> {
        if let Err(err) = config.validate() {
            tracing::warn!(
                "Invalid delay estimator config (max_delay: {}, lookahead: {}): {}",
                config.max_delay,
                config.lookahead,
                err
            );
            return Err(err);
        }
        let history_size = config.history_size();
        let (Some(history_len), Some(near_history_len)) = (
            NonZero::new(history_size),
            NonZero::new(config.near_history_size()),
        ) else {
            return Err(Error::HistoryTooShort { history_size });
        };

        let mut estimator = Self {
            config,
            mean_bit_counts: vec![INITIAL_MEAN_BIT_COUNT; history_size],
            far_bit_counts: History::new(history_len),
            bit_counts: vec![0; history_size],
            binary_far_history: History::new(history_len),
            binary_near_history: History::new(near_history_len),
            minimum_probability: INITIAL_PROBABILITY,
            last_delay_probability: INITIAL_PROBABILITY,
            last_delay: None,
        };
        estimator.init();
        Ok(estimator)
    }

    /// Resets all history and adaptive state, restarting estimation without
    /// reallocating.
    pub fn init(&mut self) {
        self.bit_counts.fill(0);
        self.binary_far_history.clear();
        self.binary_near_history.clear();
        self.far_bit_counts.clear();
        self.mean_bit_counts.fill(INITIAL_MEAN_BIT_COUNT);
        self.minimum_probability = INITIAL_PROBABILITY;
        self.last_delay_probability = INITIAL_PROBABILITY;
        self.last_delay = None;
    }

    /// Processes one frame and returns the current delay estimate.
    ///
    /// The returned delay is in `0..history_size()` and offset by the
    /// lookahead; see [`compensated_delay`](Self::compensated_delay). `None`
    /// means no reliable estimate has been found since the last
    /// [`init`](Self::init). Once set, the estimate only changes when a more
    /// reliable candidate appears.
    pub fn process(
        &mut self,
        binary_far_spectrum: u32,
        binary_near_spectrum: u32,
    ) -> Option<usize> {
        self.binary_far_history.push(binary_far_spectrum);
        self.far_bit_counts.push(bit_count(binary_far_spectrum));

        let binary_near_spectrum = if self.binary_near_history.len() > 1 {
            // With lookahead, compare against the near-end spectrum received
            // `lookahead` frames ago.
            self.binary_near_history.push(binary_near_spectrum);
            self.binary_near_history.oldest()
        } else {
            binary_near_spectrum
        };

        bit_count_comparison(
            binary_near_spectrum,
            self.binary_far_history.as_slice(),
            &mut self.bit_counts,
        );

        self.update_mean_bit_counts();

        let (candidate_delay, value_best_candidate, value_worst_candidate) =
            self.find_candidates();

        // 1) If the spread between the best and the worst candidate is too
        //    small the situation is unreliable and `last_delay` is kept.
        // 2) Otherwise `last_delay` is updated if the best candidate is below
        //    either the adaptive `minimum_probability` or the drifting
        //    `last_delay_probability`.
        self.update_minimum_probability(value_best_candidate, value_worst_candidate);
        self.last_delay_probability = self.last_delay_probability.saturating_add(Q9::EPSILON);

        let Some(candidate_delay) = candidate_delay else {
            return self.last_delay;
        };
        if value_worst_candidate > value_best_candidate + PROBABILITY_OFFSET {
            // Reliable delay value for usage.
            if value_best_candidate < self.minimum_probability {
                self.set_last_delay(candidate_delay);
            }
            if value_best_candidate < self.last_delay_probability {
                self.set_last_delay(candidate_delay);
                self.last_delay_probability = value_best_candidate;
            }
        }

        self.last_delay
    }

    /// Updates `mean_bit_counts` for every candidate whose far-end spectrum
    /// has at least one bit set. An empty far-end spectrum means a weak
    /// far-end signal and likely a poor echo condition.
    fn update_mean_bit_counts(&mut self) {
        let far_bit_counts = self.far_bit_counts.as_slice();
        for ((mean, &count), &far_bit_count) in self
            .mean_bit_counts
            .iter_mut()
            .zip(&self.bit_counts)
            .zip(far_bit_counts)
        {
            if far_bit_count > 0 {
                // Piecewise linear in the far-end bit count; at most 6 is
                // subtracted since `far_bit_count <= 32`.
                let shifts = SHIFTS_AT_ZERO - ((SHIFTS_LINEAR_SLOPE * far_bit_count) >> 4);
                mean.smooth_toward(Q9::from_int(count as i32), shifts);
            }
        }
    }

    /// Returns the index and value of the lowest smoothed bit count (first
    /// index on ties) and the highest smoothed bit count.
    fn find_candidates(&self) -> (Option<usize>, Q9, Q9) {
        let mut candidate_delay = None;
        let mut value_best_candidate = MAX_MEAN_BIT_COUNT;
        let mut value_worst_candidate = Q9::ZERO;
        for (i, &mean) in self.mean_bit_counts.iter().enumerate() {
            if mean < value_best_candidate {
                value_best_candidate = mean;
                candidate_delay = Some(i);
            }
            if mean > value_worst_candidate {
                value_worst_candidate = mean;
            }
        }
        (candidate_delay, value_best_candidate, value_worst_candidate)
    }

    /// Lowers `minimum_probability` toward `value_best_candidate +
    /// PROBABILITY_OFFSET` when the valley is distinct, never below
    /// `PROBABILITY_LOWER_LIMIT`.
    fn update_minimum_probability(&mut self, value_best_candidate: Q9, value_worst_candidate: Q9) {
        if self.minimum_probability > PROBABILITY_LOWER_LIMIT
            && value_worst_candidate - value_best_candidate > PROBABILITY_MIN_SPREAD
        {
            let threshold = (value_best_candidate + PROBABILITY_OFFSET).max(PROBABILITY_LOWER_LIMIT);
            if self.minimum_probability > threshold {
                self.minimum_probability = threshold;
            }
        }
    }

    fn set_last_delay(&mut self, delay: usize) {
        if self.last_delay != Some(delay) {
            tracing::debug!(
                "Delay estimate changed: {:?} -> {} (minimum probability {:.2})",
                self.last_delay,
                delay,
                self.minimum_probability.to_f32()
            );
        }
        self.last_delay = Some(delay);
    }

    /// Returns the delay last returned by [`process`](Self::process).
    pub fn last_delay(&self) -> Option<usize> {
        self.last_delay
    }

    /// Returns the last delay in the signed encoding used across the C API:
    /// the delay itself, or [`DELAY_UNKNOWN`].
    pub fn last_delay_raw(&self) -> i32 {
        self.last_delay.map_or(DELAY_UNKNOWN, |delay| delay as i32)
    }

    /// Returns the last delay with the lookahead removed. Negative values
    /// mean the near-end leads the far-end.
    pub fn compensated_delay(&self) -> Option<isize> {
        let lookahead = self.config.lookahead as isize;
        self.last_delay.map(|delay| delay as isize - lookahead)
    }

    pub fn config(&self) -> &DelayEstimatorConfig {
        &self.config
    }

    /// Number of candidate delays.
    pub fn history_size(&self) -> usize {
        self.config.history_size()
    }

    pub fn max_delay(&self) -> usize {
        self.config.max_delay
    }

    pub fn lookahead(&self) -> usize {
        self.config.lookahead
    }

    /// Smoothed bit count per candidate delay.
    pub fn mean_bit_counts(&self) -> &[Q9] {
        &self.mean_bit_counts
    }

    /// Hamming distance per candidate delay from the latest frame.
    pub fn bit_counts(&self) -> &[u32] {
        &self.bit_counts
    }

    /// Current adaptive reliability threshold.
    pub fn minimum_probability(&self) -> Q9 {
        self.minimum_probability
    }
}
