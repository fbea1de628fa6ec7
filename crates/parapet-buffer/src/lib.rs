// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Memory-locked byte buffers with guaranteed zeroization on release.
//!
//! [`SecureBuffer`] owns a fixed-size heap region that is pinned in physical
//! RAM (`mlock`) from construction until teardown, and is overwritten with
//! zeros through an optimization-proof write before it is unpinned and freed.
//!
//! # Lifecycle
//!
//! A buffer is created by one of the constructors, mutated in place (never
//! resized), and torn down exactly once: either by an explicit
//! [`SecureBuffer::release`] call or automatically on drop. If teardown fails
//! on the drop path there is no caller left to receive the error, so the
//! process is aborted; secret memory that failed to be purged is treated as
//! worse than a crash.
//!
//! # Example
//!
//! ```rust
//! use parapet_buffer::{BufferError, SecureBuffer};
//!
//! fn example() -> Result<(), BufferError> {
//!     let mut buffer = SecureBuffer::from_bytes(&[1, 2, 3, 4])?;
//!
//!     buffer.replace(1..3, &[9, 9])?;
//!     assert_eq!(buffer.view(0..4)?, &[1, 9, 9, 4]);
//!
//!     buffer.release()?;
//!     assert!(buffer.is_all_zero());
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod error;
mod secure_buffer;

pub use error::BufferError;
pub use parapet_lock::LockError;
pub use secure_buffer::SecureBuffer;
