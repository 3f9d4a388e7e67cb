//! Delay estimator configuration.

use crate::binary_delay_estimator::Error;

/// Dimensions of a [`BinaryDelayEstimator`](crate::BinaryDelayEstimator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayEstimatorConfig {
    /// Largest delay, in frames, where the near-end lags the far-end.
    pub max_delay: usize,
    /// Number of near-end frames buffered before comparison. Allows
    /// estimating delays where the near-end leads the far-end by up to
    /// `lookahead` frames. Reported delays are offset by this amount.
    pub lookahead: usize,
}

impl Default for DelayEstimatorConfig {
    fn default() -> Self {
        Self {
            max_delay: 100,
            lookahead: 10,
        }
    }
}

impl DelayEstimatorConfig {
    pub fn new(max_delay: usize, lookahead: usize) -> Self {
        Self {
            max_delay,
            lookahead,
        }
    }

    /// Number of candidate delays, `max_delay + lookahead`.
    pub fn history_size(&self) -> usize {
        self.max_delay + self.lookahead
    }

    /// Length of the near-end lookahead buffer, `lookahead + 1`.
    pub fn near_history_size(&self) -> usize {
        self.lookahead + 1
    }

    /// Checks that the far-end history is long enough to shift.
    pub fn validate(&self) -> Result<(), Error> {
        let history_size = self.history_size();
        if history_size <= 1 {
            return Err(Error::HistoryTooShort { history_size });
        }
        Ok(())
    }

    /// Builds a configuration from signed dimensions, as received over the
    /// C API.
    pub fn from_signed(max_delay: i32, lookahead: i32) -> Result<Self, Error> {
        let max_delay = usize::try_from(max_delay).map_err(|_| Error::NegativeDimension)?;
        let lookahead = usize::try_from(lookahead).map_err(|_| Error::NegativeDimension)?;
        let config = Self::new(max_delay, lookahead);
        config.validate()?;
        Ok(config)
    }
}
