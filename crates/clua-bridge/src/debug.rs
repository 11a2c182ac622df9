//! Accessors for `lua_Debug` fields whose layout depends on the release

use clua_sys::lua_Debug;
use std::os::raw::c_ushort;

/// Length in bytes of the record's `source` field.
///
/// 5.4 records it in `srclen`, since the source need not be nul-terminated.
/// 5.3 always terminates it, so the length is measured; a record without
/// source information yields 0.
pub fn source_length(ar: &lua_Debug) -> usize {
    #[cfg(feature = "lua54")]
    {
        ar.srclen
    }
    #[cfg(feature = "lua53")]
    {
        if ar.source.is_null() {
            0
        } else {
            // SAFETY: a non-null 5.3 source is a nul-terminated string owned by the VM
            unsafe { libc::strlen(ar.source) }
        }
    }
}

/// `(ftransfer, ntransfer)` of the record; `(0, 0)` on 5.3, which has neither
pub fn transfer_counts(ar: &lua_Debug) -> (c_ushort, c_ushort) {
    #[cfg(feature = "lua54")]
    {
        (ar.ftransfer, ar.ntransfer)
    }
    #[cfg(feature = "lua53")]
    {
        let _ = ar;
        (0, 0)
    }
}

/// C entry point for [`source_length`]
///
/// # Safety
/// `ar` must point to a record filled by `lua_getinfo`.
#[no_mangle]
pub unsafe extern "C" fn clua_debug_srclen(ar: *const lua_Debug) -> usize {
    source_length(&*ar)
}

/// C entry point for [`transfer_counts`]
///
/// # Safety
/// `ar` must point to a valid record; both out-pointers must be writable.
#[no_mangle]
pub unsafe extern "C" fn clua_debug_gettransfers(
    ar: *const lua_Debug,
    ftransfer: *mut c_ushort,
    ntransfer: *mut c_ushort,
) {
    let (first, count) = transfer_counts(&*ar);
    *ftransfer = first;
    *ntransfer = count;
}
