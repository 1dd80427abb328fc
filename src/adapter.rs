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
//! The two trampolines installed into libarchive for every registration.
//!
//! libarchive only takes plain function pointers, so both are free functions
//! that receive the [`LookupContext`] as their opaque first argument.

use crate::context::LookupContext;
use alloc::boxed::Box;
use core::ffi::{c_char, c_void};

/// libarchive's id-to-name lookup callback.
pub type NativeLookupFn = unsafe extern "C" fn(data: *mut c_void, id: i64) -> *const c_char;

/// libarchive's cleanup callback for the lookup data.
pub type NativeCleanupFn = unsafe extern "C" fn(data: *mut c_void);

/// Resolves `id` through the host lookup handle stored in the context.
///
/// Returns a pointer to the NULL-terminated name, valid until the next call
/// on the same context, or null if the host reported no name.
///
/// # Safety
/// `data` must be a context created by [`crate::register`] that has not been
/// released by [`cleanup_adapter`] yet.
pub unsafe extern "C" fn lookup_adapter(data: *mut c_void, id: i64) -> *const c_char {
    let context = data.cast::<LookupContext>();
    // No reference into the context is held while the host runs: the host
    // gets its own through `LookupContext::from_ptr`.
    unsafe {
        (*context).begin_lookup();
        if let Some(lookup) = (*context).lookup_handle() {
            lookup(context, id);
        }
        let name = (*context).name_ptr();
        log::trace!("lookup of id {} found a name: {}", id, !name.is_null());
        name
    }
}

/// Notifies the host and releases the context together with its buffer.
///
/// # Safety
/// `data` must be null or a context created by [`crate::register`]. This is
/// the only place a context is freed; it must not be used afterwards.
pub unsafe extern "C" fn cleanup_adapter(data: *mut c_void) {
    if data.is_null() {
        return;
    }
    let context = unsafe { Box::from_raw(data.cast::<LookupContext>()) };
    if let Some(cleanup) = context.cleanup_handle() {
        unsafe { cleanup() };
    }
    log::debug!("released lookup context {:p}", data);
    drop(context);
}
