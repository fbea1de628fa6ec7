// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for parapet-buffer.
use parapet_lock::LockError;
use thiserror::Error;

/// Errors that can occur when working with secure buffers.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum BufferError {
    /// A memory pinning syscall failed. `LockError::LockFailed` during
    /// construction usually means the `RLIMIT_MEMLOCK` budget is exhausted.
    #[error("LockError: {0}")]
    Lock(#[from] LockError),

    /// A requested range `[lo, hi)` does not fit the buffer.
    #[error("range [{lo}, {hi}) out of bounds for buffer of length {len}")]
    OutOfBounds {
        /// Inclusive start of the requested range.
        lo: usize,
        /// Exclusive end of the requested range.
        hi: usize,
        /// Length of the buffer.
        len: usize,
    },

    /// A replacement source does not match the length of the target range.
    /// The buffer never resizes.
    #[error("replacement of length {actual} does not match range of length {expected}")]
    LengthMismatch {
        /// Length of the target range.
        expected: usize,
        /// Length of the replacement source.
        actual: usize,
    },

    /// The combined size of the inputs overflowed `usize`.
    #[error("allocation size overflow")]
    AllocationFailed,

    /// The buffer was already released; its storage is zeroed and unlocked
    /// and must not be accessed.
    #[error("buffer already released")]
    InvalidAccessor,
}
