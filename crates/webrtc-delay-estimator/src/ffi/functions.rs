//! Exported `extern "C"` functions for the delay estimator C API.
//!
//! # Symbol prefix
//!
//! All public symbols use the `wde_` prefix.

use crate::BinaryDelayEstimator;
use crate::config::DelayEstimatorConfig;

use super::panic_guard::{ffi_guard, ffi_guard_delay, ffi_guard_ptr};
use super::types::{WDE_DELAY_ERROR, WdeBinaryDelayEstimator, WdeError};

// ─── Version ─────────────────────────────────────────────────────────

/// Returns a pointer to a static null-terminated version string.
///
/// The returned pointer is valid for the lifetime of the process.
#[unsafe(no_mangle)]
pub extern "C" fn wde_version() -> *const std::ffi::c_char {
    c"0.1.0".as_ptr()
}

// ─── Lifecycle ───────────────────────────────────────────────────────

/// Creates a new, initialized binary delay estimator.
///
/// Returns `NULL` if `max_delay` or `lookahead` is negative, if
/// `max_delay + lookahead <= 1`, or on internal error.
/// The caller owns the returned pointer and must free it with
/// [`wde_destroy()`].
#[unsafe(no_mangle)]
pub extern "C" fn wde_create(max_delay: i32, lookahead: i32) -> *mut WdeBinaryDelayEstimator {
    ffi_guard_ptr! {
        let config = match DelayEstimatorConfig::from_signed(max_delay, lookahead) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("wde_create({max_delay}, {lookahead}) failed: {err}");
                return std::ptr::null_mut();
            }
        };
        match BinaryDelayEstimator::new(config) {
            Ok(inner) => Box::into_raw(Box::new(WdeBinaryDelayEstimator { inner })),
            Err(_) => std::ptr::null_mut(),
        }
    }
}

/// Destroys a delay estimator and frees its memory.
///
/// Passing `NULL` is a safe no-op. After this call the pointer is invalid.
#[unsafe(no_mangle)]
pub extern "C" fn wde_destroy(handle: *mut WdeBinaryDelayEstimator) {
    if !handle.is_null() {
        // Safety: we created this pointer via Box::into_raw in wde_create,
        // and the caller guarantees single ownership.
        let _ = unsafe { Box::from_raw(handle) };
    }
}

/// Resets the estimator to its freshly created state.
///
/// Returns `WdeError::NullPointer` if `handle` is null.
#[unsafe(no_mangle)]
pub extern "C" fn wde_init(handle: *mut WdeBinaryDelayEstimator) -> WdeError {
    ffi_guard! {
        if handle.is_null() {
            return WdeError::NullPointer;
        }
        // Safety: the caller guarantees the pointer is valid and not aliased.
        let handle = unsafe { &mut *handle };
        handle.inner.init();
        WdeError::None
    }
}

// ─── Processing ──────────────────────────────────────────────────────

/// Processes one frame of binary spectra and returns the delay estimate.
///
/// Returns the delay in frames (offset by the lookahead), `-2` while no
/// delay has been estimated, or `-1` if `handle` is null.
#[unsafe(no_mangle)]
pub extern "C" fn wde_process(
    handle: *mut WdeBinaryDelayEstimator,
    binary_far_spectrum: u32,
    binary_near_spectrum: u32,
) -> i32 {
    ffi_guard_delay! {
        if handle.is_null() {
            return WDE_DELAY_ERROR;
        }
        // Safety: the caller guarantees the pointer is valid and not aliased.
        let handle = unsafe { &mut *handle };
        handle.inner.process(binary_far_spectrum, binary_near_spectrum);
        handle.inner.last_delay_raw()
    }
}

/// Returns the delay last returned by [`wde_process()`], with the same
/// encoding.
#[unsafe(no_mangle)]
pub extern "C" fn wde_last_delay(handle: *const WdeBinaryDelayEstimator) -> i32 {
    ffi_guard_delay! {
        if handle.is_null() {
            return WDE_DELAY_ERROR;
        }
        // Safety: the caller guarantees the pointer is valid.
        let handle = unsafe { &*handle };
        handle.inner.last_delay_raw()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
