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
//! Lets host code supply user and group names to libarchive while it reads
//! files from disk to build an archive.
//!
//! libarchive's disk reader resolves the numeric owner of each entry to the
//! `uname` and `gname` of the tar/cpio header through a pair of callbacks and
//! an opaque data pointer. This crate provides that pair:
//!
//! - [`register`] installs a host lookup for a [`LookupKind`] (or clears it)
//!   and allocates the [`LookupContext`] libarchive owns from then on.
//! - [`lookup_adapter`] calls the host lookup handle, which reports its answer
//!   through [`LookupContext::set_name`], and returns the name or null.
//! - [`cleanup_adapter`] notifies the host and frees the context. libarchive
//!   calls it once, after the last lookup.
//!
//! The name is kept in one buffer per context, which is refilled in place and
//! only grows. The pointer returned to libarchive stays valid until the next
//! lookup on the same context.
//!
//! Resolving ids is left to the host, and so is caching: libarchive already
//! caches names itself.
//!
//! With the `libarchive` feature, the crate links the system libarchive,
//! provides `Libarchive` as the [`LookupRegistrar`], and exports the C ABI
//! functions `archive_name_lookup_set_gname`, `archive_name_lookup_set_uname`
//! and `archive_name_lookup_set_name`.

#![cfg_attr(not(test), no_std)]
#![deny(rustdoc::all)]
#![allow(rustdoc::missing_doc_code_examples)]
#![deny(clippy::all)]
#![deny(clippy::missing_const_for_fn)]
#![deny(missing_debug_implementations)]

extern crate alloc;

mod adapter;
mod context;
#[cfg(feature = "libarchive")]
mod ffi;
#[cfg(test)]
mod mock;
mod registration;
mod status;

pub use adapter::*;
pub use context::*;
#[cfg(feature = "libarchive")]
pub use ffi::*;
pub use registration::*;
pub use status::*;
