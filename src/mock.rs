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
//! Stand-in for libarchive's disk reader, used by the unit tests. It keeps
//! one lookup slot per kind and follows libarchive's ownership rules: the
//! previous cleanup runs when a slot is replaced or cleared, and all
//! remaining cleanups run when the reader is dropped.

use crate::adapter::{NativeCleanupFn, NativeLookupFn};
use crate::registration::{Archive, LookupKind, LookupRegistrar, SetLookupFn};
use crate::status::ArchiveStatus;
use core::ffi::{c_int, c_void, CStr};
use std::boxed::Box;
use std::string::String;
use std::vec::Vec;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct Slot {
    data: *mut c_void,
    lookup: Option<NativeLookupFn>,
    cleanup: Option<NativeCleanupFn>,
    registrations: usize,
    clears: usize,
}

impl Slot {
    const fn new() -> Self {
        Self {
            data: core::ptr::null_mut(),
            lookup: None,
            cleanup: None,
            registrations: 0,
            clears: 0,
        }
    }

    fn install(
        &mut self,
        data: *mut c_void,
        lookup: Option<NativeLookupFn>,
        cleanup: Option<NativeCleanupFn>,
    ) {
        self.release();
        if data.is_null() && lookup.is_none() && cleanup.is_none() {
            self.clears += 1;
        } else {
            self.registrations += 1;
        }
        self.data = data;
        self.lookup = lookup;
        self.cleanup = cleanup;
    }

    fn release(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            if !self.data.is_null() {
                unsafe { cleanup(self.data) };
            }
        }
        self.data = core::ptr::null_mut();
        self.lookup = None;
    }

    fn resolve(&self, id: i64) -> Option<String> {
        let lookup = self.lookup?;
        let name = unsafe { lookup(self.data, id) };
        if name.is_null() {
            None
        } else {
            let name = unsafe { CStr::from_ptr(name) };
            Some(name.to_str().expect("name is not UTF-8").into())
        }
    }
}

/// Owner names as a tar writer would put them into a header.
#[derive(Debug, PartialEq, Eq)]
pub struct HeaderNames {
    pub uname: Option<String>,
    pub gname: Option<String>,
}

pub struct MockDiskReader {
    gname: Slot,
    uname: Slot,
    reject: Option<ArchiveStatus>,
}

impl MockDiskReader {
    /// Boxed, so the archive pointer stays valid while the test moves the
    /// reader around.
    pub fn new() -> Box<Self> {
        Box::new(Self {
            gname: Slot::new(),
            uname: Slot::new(),
            reject: None,
        })
    }

    pub fn as_archive(&mut self) -> *mut Archive {
        (self as *mut Self).cast()
    }

    /// Makes every following registration call fail with `status`.
    pub fn reject_with(&mut self, status: ArchiveStatus) {
        self.reject = Some(status);
    }

    const fn slot(&self, kind: LookupKind) -> &Slot {
        match kind {
            LookupKind::GroupName => &self.gname,
            LookupKind::UserName => &self.uname,
        }
    }

    pub fn has_lookup(&self, kind: LookupKind) -> bool {
        let slot = self.slot(kind);
        !slot.data.is_null() || slot.lookup.is_some()
    }

    pub fn registrations(&self, kind: LookupKind) -> usize {
        self.slot(kind).registrations
    }

    pub fn clears(&self, kind: LookupKind) -> usize {
        self.slot(kind).clears
    }

    pub fn gname(&self, gid: i64) -> Option<String> {
        self.gname.resolve(gid)
    }

    pub fn uname(&self, uid: i64) -> Option<String> {
        self.uname.resolve(uid)
    }

    /// Walks entries given as `(uid, gid)` and resolves their owner names,
    /// one after the other.
    pub fn build(&self, entries: &[(i64, i64)]) -> Vec<HeaderNames> {
        entries
            .iter()
            .map(|&(uid, gid)| HeaderNames {
                uname: self.uname(uid),
                gname: self.gname(gid),
            })
            .collect()
    }
}

impl Drop for MockDiskReader {
    fn drop(&mut self) {
        self.gname.release();
        self.uname.release();
    }
}

unsafe fn set_lookup(
    archive: *mut Archive,
    kind: LookupKind,
    data: *mut c_void,
    lookup: Option<NativeLookupFn>,
    cleanup: Option<NativeCleanupFn>,
) -> c_int {
    let reader = unsafe { &mut *archive.cast::<MockDiskReader>() };
    if let Some(status) = reader.reject {
        return status.code();
    }
    let slot = match kind {
        LookupKind::GroupName => &mut reader.gname,
        LookupKind::UserName => &mut reader.uname,
    };
    slot.install(data, lookup, cleanup);
    ArchiveStatus::OK.code()
}

unsafe extern "C" fn set_gname_lookup(
    archive: *mut Archive,
    data: *mut c_void,
    lookup: Option<NativeLookupFn>,
    cleanup: Option<NativeCleanupFn>,
) -> c_int {
    unsafe { set_lookup(archive, LookupKind::GroupName, data, lookup, cleanup) }
}

unsafe extern "C" fn set_uname_lookup(
    archive: *mut Archive,
    data: *mut c_void,
    lookup: Option<NativeLookupFn>,
    cleanup: Option<NativeCleanupFn>,
) -> c_int {
    unsafe { set_lookup(archive, LookupKind::UserName, data, lookup, cleanup) }
}

/// Registrar pointing at the mock entry points.
pub struct MockLibrary;

impl LookupRegistrar for MockLibrary {
    fn entry_point(&self, kind: LookupKind) -> SetLookupFn {
        match kind {
            LookupKind::GroupName => set_gname_lookup,
            LookupKind::UserName => set_uname_lookup,
        }
    }
}
