//! Property-based test framework for the binary delay estimator.
//!
//! Provides binary spectrum generators and delay track comparison utilities.
//!
//! # Usage
//!
//! ```ignore
//! use webrtc_delay_estimator_proptest::generators::*;
//! use test_strategy::proptest;
//!
//! #[proptest]
//! fn my_test(spectra: DelayedSpectra) {
//!     assert!(spectra.expected_delay() < spectra.dimensions.history_size());
//! }
//! ```

pub mod comparison;
pub mod generators;

pub use proptest;
pub use test_strategy;
