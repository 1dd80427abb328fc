/*
MIT License

Copyright (c) 2021 Philipp Schuster

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Module for [`LookupContext`], the per-registration state that libarchive
//! hands back to the lookup trampolines.

use alloc::vec::Vec;
use core::ffi::{c_char, CStr};
use core::fmt::{Debug, Formatter};

/// Capacity the name buffer starts with. Covers the 32 bytes of the
/// `uname`/`gname` field of a ustar header, including the NULL-byte.
pub const INITIAL_NAME_CAPACITY: usize = 33;

/// Host lookup handle. Must report its result through
/// [`LookupContext::set_name`] (or [`LookupContext::set_name_bytes`]) before
/// it returns.
pub type HostLookupFn = unsafe extern "C" fn(context: *mut LookupContext, id: i64);

/// Host teardown handle. Called once, when libarchive discards the context.
pub type HostCleanupFn = unsafe extern "C" fn();

/// State of one uname or gname registration.
///
/// Once registered, the context is owned by libarchive and only released by
/// [`crate::cleanup_adapter`].
pub struct LookupContext {
    lookup: Option<HostLookupFn>,
    cleanup: Option<HostCleanupFn>,
    /// Most recently reported name, including the NULL-byte. The allocation
    /// is refilled in place and only ever grows.
    buffer: Vec<u8>,
    /// No name is available for the last queried id.
    absent: bool,
}

impl LookupContext {
    pub(crate) fn new(lookup: Option<HostLookupFn>, cleanup: Option<HostCleanupFn>) -> Self {
        Self {
            lookup,
            cleanup,
            buffer: Vec::with_capacity(INITIAL_NAME_CAPACITY),
            absent: true,
        }
    }

    /// Turns the pointer a [`HostLookupFn`] receives into a reference.
    /// Returns `None` for a null pointer.
    ///
    /// # Safety
    /// `ptr` must be null or the context passed to the currently running
    /// lookup handle. The reference must not outlive that call.
    pub unsafe fn from_ptr<'a>(ptr: *mut LookupContext) -> Option<&'a mut LookupContext> {
        unsafe { ptr.as_mut() }
    }

    /// Reports the name for the id currently being looked up. `None` means
    /// there is no name. The buffer of a previous name is kept for reuse.
    pub fn set_name(&mut self, name: Option<&CStr>) {
        match name {
            Some(name) => self.set_name_bytes(name.to_bytes()),
            None => self.absent = true,
        }
    }

    /// Reports `name` as the name for the id currently being looked up.
    /// Like a C string, the name ends at the first NULL-byte, if any.
    pub fn set_name_bytes(&mut self, name: &[u8]) {
        let len = memchr::memchr(0, name).unwrap_or(name.len());
        self.buffer.clear();
        self.buffer.reserve(len + 1);
        self.buffer.extend_from_slice(&name[..len]);
        self.buffer.push(0);
        self.absent = false;
    }

    /// The name reported during the last lookup, if any.
    pub fn name(&self) -> Option<&CStr> {
        if self.absent {
            None
        } else {
            CStr::from_bytes_with_nul(&self.buffer).ok()
        }
    }

    /// Whether no name was reported for the last queried id.
    pub const fn is_absent(&self) -> bool {
        self.absent
    }

    pub(crate) const fn lookup_handle(&self) -> Option<HostLookupFn> {
        self.lookup
    }

    pub(crate) const fn cleanup_handle(&self) -> Option<HostCleanupFn> {
        self.cleanup
    }

    /// Marks the start of a lookup: until the host reports, there is no name.
    pub(crate) fn begin_lookup(&mut self) {
        self.absent = true;
    }

    /// Pointer handed back to libarchive: the buffer, or null without a name.
    pub(crate) fn name_ptr(&self) -> *const c_char {
        if self.absent {
            core::ptr::null()
        } else {
            self.buffer.as_ptr().cast()
        }
    }

    #[cfg(test)]
    pub(crate) fn buffer_capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[cfg(test)]
    pub(crate) fn buffer_ptr(&self) -> *const u8 {
        self.buffer.as_ptr()
    }
}

impl Debug for LookupContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LookupContext")
            .field("lookup", &self.lookup.is_some())
            .field("cleanup", &self.cleanup.is_some())
            .field("name", &self.name())
            .finish()
    }
}
