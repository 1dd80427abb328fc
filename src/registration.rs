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
//! Installing host lookups into libarchive, for both lookup kinds.

use crate::adapter::{cleanup_adapter, lookup_adapter, NativeCleanupFn, NativeLookupFn};
use crate::context::{HostCleanupFn, HostLookupFn, LookupContext};
use crate::status::ArchiveStatus;
use alloc::boxed::Box;
use core::ffi::{c_int, c_void};
use core::fmt::{Display, Formatter};
use core::marker::{PhantomData, PhantomPinned};

/// Opaque `struct archive` handle of libarchive.
#[repr(C)]
#[derive(Debug)]
pub struct Archive {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Signature of `archive_read_disk_set_gname_lookup` and
/// `archive_read_disk_set_uname_lookup`. Passing null data and no callbacks
/// clears the registration.
pub type SetLookupFn = unsafe extern "C" fn(
    archive: *mut Archive,
    data: *mut c_void,
    lookup: Option<NativeLookupFn>,
    cleanup: Option<NativeCleanupFn>,
) -> c_int;

/// Which id is resolved to a name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// Group ids to `gname`.
    GroupName,
    /// User ids to `uname`.
    UserName,
}

impl LookupKind {
    /// Name of the header field the lookup fills.
    pub const fn name(self) -> &'static str {
        match self {
            Self::GroupName => "gname",
            Self::UserName => "uname",
        }
    }
}

impl Display for LookupKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of the native registration entry point for each [`LookupKind`].
pub trait LookupRegistrar {
    fn entry_point(&self, kind: LookupKind) -> SetLookupFn;
}

/// Registers a host lookup of the given kind on `archive`, or clears the
/// current one if both handles are `None`.
///
/// A registration allocates a [`LookupContext`] that belongs to libarchive
/// from then on; libarchive releases it through [`cleanup_adapter`] when the
/// registration is replaced or cleared, or the archive is freed. The status
/// code of the native call is returned unchanged.
///
/// If the native call fails with `ARCHIVE_FATAL`, libarchive has not taken
/// the context, so it is released right away (calling the host cleanup).
///
/// # Safety
/// `archive` must be a valid disk reader handle for the entry points of
/// `registrar`.
pub unsafe fn register<R: LookupRegistrar + ?Sized>(
    registrar: &R,
    archive: *mut Archive,
    kind: LookupKind,
    lookup: Option<HostLookupFn>,
    cleanup: Option<HostCleanupFn>,
) -> ArchiveStatus {
    let set_lookup = registrar.entry_point(kind);

    if lookup.is_none() && cleanup.is_none() {
        log::debug!("clearing {} lookup", kind);
        let code = unsafe { set_lookup(archive, core::ptr::null_mut(), None, None) };
        return ArchiveStatus::from_code(code);
    }

    let context = Box::into_raw(Box::new(LookupContext::new(lookup, cleanup))).cast::<c_void>();
    log::debug!("registering {} lookup with context {:p}", kind, context);
    let status = ArchiveStatus::from_code(unsafe {
        set_lookup(
            archive,
            context,
            Some(lookup_adapter),
            Some(cleanup_adapter),
        )
    });

    if status == ArchiveStatus::FATAL {
        log::warn!("{} lookup registration failed: {}", kind, status);
        unsafe { cleanup_adapter(context) };
    }
    status
}
