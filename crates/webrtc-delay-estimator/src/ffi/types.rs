//! C-compatible type definitions for the delay estimator C API.

use crate::BinaryDelayEstimator;

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// Error codes returned by C API functions.
///
/// `0` = success, negative = error.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WdeError {
    /// Operation succeeded.
    None = 0,
    /// Null pointer passed to a function that requires non-null.
    NullPointer = -1,
    /// Internal error (panic caught at FFI boundary).
    Internal = -2,
}

// ---------------------------------------------------------------------------
// Delay encoding
// ---------------------------------------------------------------------------

/// Returned by `wde_process()` and `wde_last_delay()` on a null handle or
/// internal error.
pub const WDE_DELAY_ERROR: i32 = -1;

/// Returned by `wde_process()` and `wde_last_delay()` while no delay has been
/// estimated.
pub const WDE_DELAY_UNKNOWN: i32 = -2;

// ---------------------------------------------------------------------------
// Opaque handle
// ---------------------------------------------------------------------------

/// Opaque handle to a binary delay estimator.
///
/// Created via `wde_create()`. Destroyed via `wde_destroy()`.
///
/// **NOT thread-safe**: all calls on the same handle must be serialized.
pub struct WdeBinaryDelayEstimator {
    pub(crate) inner: BinaryDelayEstimator,
}
