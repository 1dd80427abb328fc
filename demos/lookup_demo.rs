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
use archive_name_lookup::{
    archive_error_string, archive_read_disk_gname, archive_read_disk_new, archive_read_disk_uname,
    archive_read_free, register, HostLookupFn, Libarchive, LookupContext, LookupKind,
};
use std::ffi::{c_char, CStr};

unsafe extern "C" fn group_name(context: *mut LookupContext, gid: i64) {
    let Some(context) = (unsafe { LookupContext::from_ptr(context) }) else {
        return;
    };
    match gid {
        0 => context.set_name(Some(c"root")),
        1000 => context.set_name(Some(c"staff")),
        _ => context.set_name(None),
    }
}

unsafe extern "C" fn user_name(context: *mut LookupContext, uid: i64) {
    let Some(context) = (unsafe { LookupContext::from_ptr(context) }) else {
        return;
    };
    // Names don't need to be valid C strings up front.
    let name = format!("user{}", uid);
    context.set_name_bytes(name.as_bytes());
}

unsafe extern "C" fn done() {
    log::info!("libarchive released a lookup");
}

fn show(ptr: *const c_char) -> String {
    if ptr.is_null() {
        "<none>".to_owned()
    } else {
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
    }
}

/// This example needs the `libarchive` feature.
fn main() {
    // log: not mandatory
    std::env::set_var("RUST_LOG", "trace");
    env_logger::init();

    unsafe {
        let archive = archive_read_disk_new();
        let lookups: [(LookupKind, HostLookupFn); 2] = [
            (LookupKind::GroupName, group_name),
            (LookupKind::UserName, user_name),
        ];
        for (kind, lookup) in lookups {
            let status = register(&Libarchive, archive, kind, Some(lookup), Some(done));
            if let Err(err) = status.into_result() {
                eprintln!("{}: {}", err, show(archive_error_string(archive)));
                archive_read_free(archive);
                return;
            }
        }

        for id in [0, 1000, 2000] {
            println!(
                "id {}: uname={} gname={}",
                id,
                show(archive_read_disk_uname(archive, id)),
                show(archive_read_disk_gname(archive, id)),
            );
        }

        archive_read_free(archive);
    }
}
