// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>Memory-locked, zeroized-on-release byte buffers for secret material.</em></p>
//!
//! ---
//!
//! Parapet manages the memory that holds secrets: a [`SecureBuffer`] is
//! pinned in physical RAM (`mlock`) for its entire lifetime and is
//! unconditionally overwritten with zeros, through an optimization-proof
//! write, before it is unpinned and freed.
//!
//! # Features
//!
//! - 🔒 **Locked from birth** — the region is pinned before any secret byte lands in it
//! - 🧹 **Guaranteed zeroization** — volatile-barrier zero-fill on release and on drop
//! - 🪞 **No silent copies** — views borrow the original storage, never duplicate it
//! - 💥 **Loud failure** — a failed unlock during drop aborts instead of leaking pinned secrets
//! - 📦 **`no_std` compatible** — only `alloc` and the pinning syscalls are required
//!
//! # Quick Start
//!
//! ```rust
//! use parapet::{BufferError, SecureBuffer};
//!
//! fn main() -> Result<(), BufferError> {
//!     let mut key = SecureBuffer::with_initializer(32, |region| {
//!         // fill from a PRNG; the region is already locked
//!         region.fill(0x42);
//!     })?;
//!
//!     key.replace(0..4, &[1, 2, 3, 4])?;
//!     assert_eq!(key.view(0..4)?, &[1, 2, 3, 4]);
//!
//!     key.release()?;
//!     assert!(key.is_all_zero());
//!     Ok(())
//! }
//! ```
//!
//! Cryptographic operations, key derivation, and random generation are out
//! of scope; Parapet only manages the memory that holds their inputs and
//! outputs.

#![cfg_attr(not(test), no_std)]

pub use parapet_buffer::{BufferError, SecureBuffer};
pub use parapet_lock::{
    LockError, is_all_zero, lock, lock_slice, slice_is_all_zero, unlock, unlock_slice, zero,
    zero_slice,
};
pub use parapet_util::{bytes_to_hex, constant_time_eq, fill_bytes_with_pattern, hex_to_bytes};
