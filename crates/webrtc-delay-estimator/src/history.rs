//! Fixed-length, most-recent-first history buffer.

use std::num::NonZero;

/// A history of the last `len` values, where index `i` holds the value
/// pushed `i` pushes ago.
///
/// The buffer is physically shifted on every push so that the whole history
/// is always available as one contiguous slice.
#[derive(Debug, Clone)]
pub(crate) struct History<T> {
    data: Vec<T>,
}

impl<T: Copy + Default> History<T> {
    pub(crate) fn new(len: NonZero<usize>) -> Self {
        Self {
            data: vec![T::default(); len.get()],
        }
    }

    /// Resets every slot to `T::default()`.
    pub(crate) fn clear(&mut self) {
        self.data.fill(T::default());
    }

    /// Shifts the history one slot back, discarding the oldest value, and
    /// inserts `value` at index 0.
    pub(crate) fn push(&mut self, value: T) {
        let len = self.data.len();
        self.data.copy_within(..len - 1, 1);
        self.data[0] = value;
    }

    /// Returns the oldest value still held.
    pub(crate) fn oldest(&self) -> T {
        self.data[self.data.len() - 1]
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.data
    }
}
