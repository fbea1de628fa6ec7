// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! SecureBuffer - fixed-size, memory-locked byte container.
//!
//! The backing storage is a boxed slice: it is allocated once, never
//! reallocated, and its heap address stays put even when the `SecureBuffer`
//! value itself moves. The OS lock is tied to that address range, so address
//! stability is load-bearing, not cosmetic.

use alloc::boxed::Box;
use alloc::string::String;
use core::ops::Range;

use subtle::ConstantTimeEq;

use crate::error::BufferError;

/// Exit code used instead of `abort()` when a drop-path release failure is
/// escalated under test, so subprocess tests can observe the escalation.
#[cfg(test)]
pub(crate) const RELEASE_FAILURE_EXIT_CODE: i32 = 9;

/// A byte container pinned in physical RAM for its entire lifetime.
///
/// The region is locked at construction and stays locked until teardown.
/// Teardown zero-fills the region with an optimization-proof write, then
/// unlocks it. Every access after a successful [`release`](Self::release)
/// fails with [`BufferError::InvalidAccessor`].
///
/// # Ownership and views
///
/// A `SecureBuffer` exclusively owns its region. [`view`](Self::view) and
/// [`view_mut`](Self::view_mut) return borrows into the original storage;
/// no operation produces an independent heap copy of the contents (the one
/// exception is [`concat`](Self::concat), which by construction must copy
/// into a fresh locked region).
///
/// # Threading
///
/// `SecureBuffer` is `Send` and `Sync`. All mutation goes through
/// `&mut self`, so concurrent shared use is read-only unless callers add
/// their own synchronization; there is no internal lock for data races.
pub struct SecureBuffer {
    buf: Box<[u8]>,
    released: bool,
}

impl SecureBuffer {
    fn abort() -> ! {
        // Exit instead of abort under test so the escalation is observable
        #[cfg(test)]
        std::process::exit(RELEASE_FAILURE_EXIT_CODE);

        #[cfg(all(not(test), unix))]
        unsafe {
            libc::abort()
        }

        #[cfg(all(not(test), not(unix)))]
        panic!("failed to unlock secure memory during teardown");
    }

    /// Allocates `count` zero bytes and locks them.
    ///
    /// Fails with [`BufferError::Lock`] if `mlock` reports failure; in that
    /// case the region never held data and is simply freed. Locking zero
    /// bytes is a success.
    pub fn zeroed(count: usize) -> Result<Self, BufferError> {
        let buf = alloc::vec![0u8; count].into_boxed_slice();

        parapet_lock::lock_slice(&buf)?;

        Ok(Self {
            buf,
            released: false,
        })
    }

    /// Allocates a locked region of exactly `source.len()` bytes and copies
    /// `source` into it once.
    ///
    /// The region is locked before the copy, so the copied bytes never sit
    /// in swappable memory owned by this buffer. The caller remains
    /// responsible for the lifetime of `source` itself.
    pub fn from_bytes(source: &[u8]) -> Result<Self, BufferError> {
        let mut buffer = Self::zeroed(source.len())?;
        buffer.buf.copy_from_slice(source);

        Ok(buffer)
    }

    /// Allocates `count` bytes, locks them, then runs `init` with exclusive
    /// access to the locked region.
    ///
    /// The lock is in place before `init` runs: material produced by the
    /// initializer (a PRNG, a key derivation routine) is written directly
    /// into pinned memory and never exists in an ordinary unlocked
    /// allocation. There is no opt-out of locking.
    pub fn with_initializer<F>(count: usize, init: F) -> Result<Self, BufferError>
    where
        F: FnOnce(&mut [u8]),
    {
        let mut buffer = Self::zeroed(count)?;
        init(&mut buffer.buf);

        Ok(buffer)
    }

    /// Builds one locked region holding the contents of all `buffers`
    /// concatenated in order.
    ///
    /// This is the one unavoidable copy in the API: the result must be a
    /// single contiguous locked region. The inputs are unaffected and the
    /// caller remains responsible for releasing them. Fails with
    /// [`BufferError::InvalidAccessor`] if any input was already released,
    /// and with [`BufferError::AllocationFailed`] if the summed length
    /// overflows `usize`.
    pub fn concat(buffers: &[SecureBuffer]) -> Result<SecureBuffer, BufferError> {
        let mut total = 0usize;
        for buffer in buffers {
            buffer.guard()?;
            total = total
                .checked_add(buffer.buf.len())
                .ok_or(BufferError::AllocationFailed)?;
        }

        let mut out = Self::zeroed(total)?;

        let mut offset = 0;
        for buffer in buffers {
            out.buf[offset..offset + buffer.buf.len()].copy_from_slice(&buffer.buf);
            offset += buffer.buf.len();
        }

        Ok(out)
    }

    fn guard(&self) -> Result<(), BufferError> {
        if self.released {
            return Err(BufferError::InvalidAccessor);
        }

        Ok(())
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), BufferError> {
        if range.start > range.end || range.end > self.buf.len() {
            return Err(BufferError::OutOfBounds {
                lo: range.start,
                hi: range.end,
                len: self.buf.len(),
            });
        }

        Ok(())
    }

    /// Returns a read-only borrow of the sub-range `[lo, hi)`.
    ///
    /// Fails with [`BufferError::OutOfBounds`] if `lo > hi` or `hi > len`;
    /// indices are checked, never clamped.
    pub fn view(&self, range: Range<usize>) -> Result<&[u8], BufferError> {
        self.guard()?;
        self.check_range(&range)?;

        Ok(&self.buf[range])
    }

    /// Returns a mutable borrow of the sub-range `[lo, hi)`.
    ///
    /// Mutations through the returned slice land in the buffer's own locked
    /// storage. Same bounds checking as [`view`](Self::view).
    pub fn view_mut(&mut self, range: Range<usize>) -> Result<&mut [u8], BufferError> {
        self.guard()?;
        self.check_range(&range)?;

        Ok(&mut self.buf[range])
    }

    /// Runs `f` with exclusive mutable access to the whole locked region.
    ///
    /// The borrow cannot escape the call. Intended for interop with APIs
    /// that want a raw pointer and length; take them from the slice inside
    /// the closure.
    pub fn with_mutable_access<R, F>(&mut self, f: F) -> Result<R, BufferError>
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        self.guard()?;

        Ok(f(&mut self.buf))
    }

    /// Overwrites the sub-range `[lo, hi)` in place with `source`.
    ///
    /// The buffer never resizes: `source.len()` must equal the range length
    /// ([`BufferError::LengthMismatch`]), and the range must be in bounds
    /// ([`BufferError::OutOfBounds`]).
    pub fn replace(&mut self, range: Range<usize>, source: &[u8]) -> Result<(), BufferError> {
        self.guard()?;
        self.check_range(&range)?;

        if source.len() != range.len() {
            return Err(BufferError::LengthMismatch {
                expected: range.len(),
                actual: source.len(),
            });
        }

        self.buf[range].copy_from_slice(source);

        Ok(())
    }

    /// Overwrites `source.len()` bytes starting at `offset`.
    ///
    /// Convenience for `replace(offset..offset + source.len(), source)`.
    pub fn write(&mut self, source: &[u8], offset: usize) -> Result<(), BufferError> {
        let hi = offset
            .checked_add(source.len())
            .ok_or(BufferError::OutOfBounds {
                lo: offset,
                hi: usize::MAX,
                len: self.buf.len(),
            })?;

        self.replace(offset..hi, source)
    }

    /// Returns the length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the buffer has zero length.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns `true` if every byte of the region is zero.
    ///
    /// Constant structure: delegates to the accumulating scan in
    /// `parapet-lock`, which never exits early on the first non-zero byte.
    /// Usable after release, where it reports on the zeroed storage.
    pub fn is_all_zero(&self) -> bool {
        parapet_lock::slice_is_all_zero(&self.buf)
    }

    /// Lowercase hex encoding of the entire contents, for diagnostics.
    ///
    /// This copies secret bytes into an ordinary unlocked `String`. Callers
    /// are responsible for not logging secret buffers.
    pub fn to_hex(&self) -> String {
        parapet_util::bytes_to_hex(&self.buf)
    }

    /// Constant-time content equality.
    ///
    /// Unlike `==`, the comparison does not branch on the secret contents.
    /// Use this when comparing MACs, tags, or anything an attacker can time.
    pub fn ct_eq(&self, other: &SecureBuffer) -> bool {
        self.buf.ct_eq(&other.buf).into()
    }

    /// Zero-fills the region with an optimization-proof write, then unlocks
    /// it.
    ///
    /// Returns [`LockError::UnlockFailed`](parapet_lock::LockError) wrapped
    /// in [`BufferError::Lock`] if unlocking fails; the region is zeroed
    /// either way and the buffer is marked released, so a later drop does
    /// not abort over a failure the caller already received. Calling
    /// `release` a second time is a no-op returning `Ok(())`.
    pub fn release(&mut self) -> Result<(), BufferError> {
        if self.released {
            return Ok(());
        }

        self.released = true;

        parapet_lock::zero_slice(&mut self.buf);
        parapet_lock::unlock_slice(&self.buf)?;

        Ok(())
    }
}

impl Drop for SecureBuffer {
    /// Runs the release path. There is no caller left to receive a failure
    /// here, so a failed unlock escalates to process abort.
    fn drop(&mut self) {
        if self.release().is_err() {
            Self::abort();
        }
    }
}

/// Content equality, NOT constant-time.
///
/// Exists for tests and verification. The comparison short-circuits on the
/// first differing byte; do not use it to compare secrets where timing
/// matters. See [`SecureBuffer::ct_eq`].
impl PartialEq for SecureBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl Eq for SecureBuffer {}

impl core::fmt::Debug for SecureBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecureBuffer")
            .field("len", &self.buf.len())
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}
