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
//! Status codes returned by libarchive's registration calls.

use core::ffi::c_int;
use core::fmt::{Debug, Display, Formatter};

/// Raw libarchive status code, passed through exactly as libarchive
/// returned it.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ArchiveStatus(c_int);

impl ArchiveStatus {
    /// `ARCHIVE_OK`
    pub const OK: Self = Self(0);
    /// `ARCHIVE_EOF`
    pub const EOF: Self = Self(1);
    /// `ARCHIVE_RETRY`
    pub const RETRY: Self = Self(-10);
    /// `ARCHIVE_WARN`
    pub const WARN: Self = Self(-20);
    /// `ARCHIVE_FAILED`
    pub const FAILED: Self = Self(-25);
    /// `ARCHIVE_FATAL`
    pub const FATAL: Self = Self(-30);

    pub const fn from_code(code: c_int) -> Self {
        Self(code)
    }

    /// The code as libarchive returned it.
    pub const fn code(self) -> c_int {
        self.0
    }

    pub const fn is_ok(self) -> bool {
        self.0 == Self::OK.0
    }

    /// Maps `OK`, `EOF` and `WARN` to `Ok`, everything else to an error.
    pub const fn into_result(self) -> Result<Self, RegistrationError> {
        match self {
            Self::OK | Self::EOF | Self::WARN => Ok(self),
            status => Err(RegistrationError(status)),
        }
    }

    const fn name(self) -> Option<&'static str> {
        match self {
            Self::OK => Some("ARCHIVE_OK"),
            Self::EOF => Some("ARCHIVE_EOF"),
            Self::RETRY => Some("ARCHIVE_RETRY"),
            Self::WARN => Some("ARCHIVE_WARN"),
            Self::FAILED => Some("ARCHIVE_FAILED"),
            Self::FATAL => Some("ARCHIVE_FATAL"),
            _ => None,
        }
    }
}

impl Debug for ArchiveStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}({})", name, self.0),
            None => write!(f, "ArchiveStatus({})", self.0),
        }
    }
}

impl Display for ArchiveStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "unknown status {}", self.0),
        }
    }
}

/// libarchive refused a lookup registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RegistrationError(ArchiveStatus);

impl RegistrationError {
    pub const fn status(self) -> ArchiveStatus {
        self.0
    }
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "libarchive rejected the lookup registration with {}", self.0)
    }
}

impl core::error::Error for RegistrationError {}
