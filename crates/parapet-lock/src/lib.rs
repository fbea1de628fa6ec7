// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Memory locking and optimization-proof zeroization primitives.
//!
//! This crate is the syscall layer underneath `parapet-buffer`. It exposes
//! exactly four operations over a raw region:
//!
//! - [`lock`] / [`unlock`]: pin/unpin a region with `mlock`/`munlock` so it
//!   is never written to swap.
//! - [`zero`]: overwrite a region with zero bytes in a way the optimizer
//!   cannot elide.
//! - [`is_all_zero`]: constant-structure check that a region contains only
//!   zero bytes (no early exit on the first non-zero byte).
//!
//! Safe slice-level wrappers ([`lock_slice`], [`unlock_slice`],
//! [`zero_slice`], [`slice_is_all_zero`]) are provided for callers that
//! already hold a slice.
//!
//! On non-Unix targets `lock`/`unlock` succeed as no-ops; there is no
//! portable pinning syscall to wire up. The zeroization primitives work
//! everywhere.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]


use thiserror::Error;

/// Errors from the memory pinning syscalls.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum LockError {
    /// `mlock` returned non-zero. The usual cause is an exhausted
    /// `RLIMIT_MEMLOCK` budget.
    #[error("mlock failed")]
    LockFailed,

    /// `munlock` returned non-zero.
    #[error("munlock failed")]
    UnlockFailed,
}

/// Pins `len` bytes starting at `ptr` into physical RAM.
///
/// Locking zero bytes is a success and performs no syscall.
///
/// # Safety
///
/// `ptr` must be valid for reads of `len` bytes for the duration of the lock.
#[cfg(unix)]
pub unsafe fn lock(ptr: *const u8, len: usize) -> Result<(), LockError> {
    if len == 0 {
        return Ok(());
    }

    let failed = unsafe { libc::mlock(ptr as *const libc::c_void, len) } != 0;

    if failed {
        return Err(LockError::LockFailed);
    }

    Ok(())
}

/// Pins `len` bytes starting at `ptr` into physical RAM.
///
/// No-op success on non-Unix targets.
///
/// # Safety
///
/// `ptr` must be valid for reads of `len` bytes for the duration of the lock.
#[cfg(not(unix))]
pub unsafe fn lock(ptr: *const u8, len: usize) -> Result<(), LockError> {
    let _ = (ptr, len);
    Ok(())
}

/// Unpins `len` bytes starting at `ptr`.
///
/// Unlocking zero bytes is a success and performs no syscall.
///
/// # Safety
///
/// `ptr` must be valid for reads of `len` bytes.
#[cfg(unix)]
pub unsafe fn unlock(ptr: *const u8, len: usize) -> Result<(), LockError> {
    if len == 0 {
        return Ok(());
    }

    let failed = unsafe { libc::munlock(ptr as *const libc::c_void, len) } != 0;

    if failed {
        return Err(LockError::UnlockFailed);
    }

    Ok(())
}

/// Unpins `len` bytes starting at `ptr`.
///
/// No-op success on non-Unix targets.
///
/// # Safety
///
/// `ptr` must be valid for reads of `len` bytes.
#[cfg(not(unix))]
pub unsafe fn unlock(ptr: *const u8, len: usize) -> Result<(), LockError> {
    let _ = (ptr, len);
    Ok(())
}

/// Overwrites `len` bytes starting at `ptr` with zeros.
///
/// Uses `write_bytes` (memset) followed by a volatile read of the region so
/// the store cannot be removed by dead-store elimination.
///
/// # Safety
///
/// `ptr` must be valid for writes of `len` bytes.
pub unsafe fn zero(ptr: *mut u8, len: usize) {
    if len == 0 {
        return;
    }

    unsafe {
        core::ptr::write_bytes(ptr, 0, len);
        // Volatile read prevents the optimizer from removing the write_bytes
        core::ptr::read_volatile(ptr as *const u8);
    }
}

/// Returns `true` if all `len` bytes starting at `ptr` are zero.
///
/// Constant structure: the scan accumulates an OR over every byte and never
/// exits early, so execution does not depend on where a non-zero byte sits.
///
/// # Safety
///
/// `ptr` must be valid for reads of `len` bytes.
pub unsafe fn is_all_zero(ptr: *const u8, len: usize) -> bool {
    if len == 0 {
        return true;
    }

    let slice = unsafe { core::slice::from_raw_parts(ptr, len) };
    slice_is_all_zero(slice)
}

/// Pins the memory backing `slice`. See [`lock`].
pub fn lock_slice(slice: &[u8]) -> Result<(), LockError> {
    unsafe { lock(slice.as_ptr(), slice.len()) }
}

/// Unpins the memory backing `slice`. See [`unlock`].
pub fn unlock_slice(slice: &[u8]) -> Result<(), LockError> {
    unsafe { unlock(slice.as_ptr(), slice.len()) }
}

/// Zero-fills `slice` with an optimization-proof write. See [`zero`].
pub fn zero_slice(slice: &mut [u8]) {
    unsafe { zero(slice.as_mut_ptr(), slice.len()) }
}

/// Returns `true` if every byte of `slice` is zero, without early exit.
pub fn slice_is_all_zero(slice: &[u8]) -> bool {
    slice.iter().fold(0u8, |acc, &byte| acc | byte) == 0
}
