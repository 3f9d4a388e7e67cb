//! C-compatible FFI layer for the binary delay estimator.
//!
//! This module exposes `extern "C"` functions and `#[repr(C)]` types that
//! allow C and C++ consumers to drive a [`BinaryDelayEstimator`](crate::BinaryDelayEstimator).
//!
//! # Symbol prefix
//!
//! - Functions: `wde_*`
//! - Types: `Wde*`
//!
//! # Thread safety
//!
//! **NOT thread-safe.** All calls on the same [`WdeBinaryDelayEstimator`](types::WdeBinaryDelayEstimator)
//! handle must be serialized by the caller. Distinct handles are independent.

pub mod types;

pub mod functions;
mod panic_guard;
