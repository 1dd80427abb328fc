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
//! libarchive entry points and the C ABI of this crate, for hosts that are
//! not written in Rust.

use crate::adapter::{NativeCleanupFn, NativeLookupFn};
use crate::context::{HostCleanupFn, HostLookupFn, LookupContext};
use crate::registration::{register, Archive, LookupKind, LookupRegistrar, SetLookupFn};
use core::ffi::{c_char, c_int, c_void, CStr};

#[link(name = "archive")]
extern "C" {
    pub fn archive_read_disk_new() -> *mut Archive;
    pub fn archive_read_free(archive: *mut Archive) -> c_int;
    pub fn archive_error_string(archive: *mut Archive) -> *const c_char;
    pub fn archive_read_disk_set_gname_lookup(
        archive: *mut Archive,
        data: *mut c_void,
        lookup: Option<NativeLookupFn>,
        cleanup: Option<NativeCleanupFn>,
    ) -> c_int;
    pub fn archive_read_disk_set_uname_lookup(
        archive: *mut Archive,
        data: *mut c_void,
        lookup: Option<NativeLookupFn>,
        cleanup: Option<NativeCleanupFn>,
    ) -> c_int;
    pub fn archive_read_disk_gname(archive: *mut Archive, gid: i64) -> *const c_char;
    pub fn archive_read_disk_uname(archive: *mut Archive, uid: i64) -> *const c_char;
}

/// The system libarchive.
#[derive(Copy, Clone, Debug, Default)]
pub struct Libarchive;

impl LookupRegistrar for Libarchive {
    fn entry_point(&self, kind: LookupKind) -> SetLookupFn {
        match kind {
            LookupKind::GroupName => archive_read_disk_set_gname_lookup,
            LookupKind::UserName => archive_read_disk_set_uname_lookup,
        }
    }
}

/// C ABI for [`register`] with [`LookupKind::GroupName`].
///
/// # Safety
/// `archive` must come from `archive_read_disk_new`.
#[no_mangle]
pub unsafe extern "C" fn archive_name_lookup_set_gname(
    archive: *mut Archive,
    lookup: Option<HostLookupFn>,
    cleanup: Option<HostCleanupFn>,
) -> c_int {
    unsafe { register(&Libarchive, archive, LookupKind::GroupName, lookup, cleanup) }.code()
}

/// C ABI for [`register`] with [`LookupKind::UserName`].
///
/// # Safety
/// `archive` must come from `archive_read_disk_new`.
#[no_mangle]
pub unsafe extern "C" fn archive_name_lookup_set_uname(
    archive: *mut Archive,
    lookup: Option<HostLookupFn>,
    cleanup: Option<HostCleanupFn>,
) -> c_int {
    unsafe { register(&Libarchive, archive, LookupKind::UserName, lookup, cleanup) }.code()
}

/// C ABI for [`LookupContext::set_name`]. A null `name` reports no name.
///
/// # Safety
/// Only callable from within a lookup handle, with the context it received.
/// A non-null `name` must be a NULL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn archive_name_lookup_set_name(
    context: *mut LookupContext,
    name: *const c_char,
) {
    let Some(context) = (unsafe { LookupContext::from_ptr(context) }) else {
        log::warn!("name reported without a lookup context");
        return;
    };
    let name = if name.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(name) })
    };
    context.set_name(name);
}
