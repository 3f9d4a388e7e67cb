//! Panic guard macros for FFI boundary safety.
//!
//! Every `extern "C"` function must catch panics to prevent undefined
//! behaviour when unwinding crosses the FFI boundary.

/// Wrap an FFI function body that returns [`WdeError`](super::types::WdeError).
///
/// On panic the macro returns `WdeError::Internal`.
macro_rules! ffi_guard {
    ($($body:tt)*) => {{
        use std::panic;
        use std::panic::AssertUnwindSafe;

        match panic::catch_unwind(AssertUnwindSafe(move || { $($body)* })) {
            Ok(result) => result,
            Err(_) => $crate::ffi::types::WdeError::Internal,
        }
    }};
}

/// Wrap an FFI function body that returns a delay in the C encoding.
///
/// On panic the macro returns [`WDE_DELAY_ERROR`](super::types::WDE_DELAY_ERROR).
macro_rules! ffi_guard_delay {
    ($($body:tt)*) => {{
        use std::panic;
        use std::panic::AssertUnwindSafe;

        match panic::catch_unwind(AssertUnwindSafe(move || { $($body)* })) {
            Ok(result) => result,
            Err(_) => $crate::ffi::types::WDE_DELAY_ERROR,
        }
    }};
}

/// Wrap an FFI function body that returns a pointer (or pointer-like value).
///
/// On panic the macro returns [`std::ptr::null_mut()`].
macro_rules! ffi_guard_ptr {
    ($($body:tt)*) => {{
        use std::panic;
        use std::panic::AssertUnwindSafe;
        use std::ptr;

        match panic::catch_unwind(AssertUnwindSafe(move || { $($body)* })) {
            Ok(result) => result,
            Err(_) => ptr::null_mut(),
        }
    }};
}

pub(crate) use ffi_guard;
pub(crate) use ffi_guard_delay;
pub(crate) use ffi_guard_ptr;
