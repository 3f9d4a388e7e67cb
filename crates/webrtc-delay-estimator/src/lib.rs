//! Binary spectrum delay estimation.
//!
//! Estimates the delay, in frames, between a far-end (render) and a near-end
//! (capture) stream of 32-bit binary spectra, as used to align the echo path
//! before echo cancellation. Producing the binary spectra from audio is left
//! to the caller.
//!
//! Provides both a Rust API ([`BinaryDelayEstimator`]) and a C-compatible
//! FFI ([`ffi`]).
//!
//! ```
//! use webrtc_delay_estimator::{BinaryDelayEstimator, DelayEstimatorConfig};
//!
//! let mut estimator = BinaryDelayEstimator::new(DelayEstimatorConfig::new(100, 10))?;
//! assert_eq!(estimator.process(0x0F0F_0F0F, 0x0000_FFFF), None);
//! # Ok::<(), webrtc_delay_estimator::Error>(())
//! ```

pub mod bit_count;
mod binary_delay_estimator;
pub mod config;
pub mod ffi;
pub mod fixed_point;
pub(crate) mod history;

// Public re-exports.
pub use binary_delay_estimator::{BinaryDelayEstimator, DELAY_UNKNOWN, Error};
pub use config::DelayEstimatorConfig;
pub use fixed_point::{Q9, mean_estimator_fix};
