//! Version of the linked Lua VM
//!
//! Taken from the numeric `LUA_VERSION_*_N` macros when the headers define
//! them, otherwise parsed out of the `LUA_VERSION_MAJOR`/`MINOR`/`RELEASE`
//! strings.

use clua_sys as sys;
use std::fmt;
use std::os::raw::c_int;

/// Version triple of a Lua release
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LuaVersion {
    pub major: c_int,
    pub minor: c_int,
    pub release: c_int,
}

impl LuaVersion {
    /// Version of the VM the bridge was built against
    pub const LINKED: LuaVersion = LuaVersion {
        major: component(sys::LUA_VERSION_MAJOR_N, sys::LUA_VERSION_MAJOR),
        minor: component(sys::LUA_VERSION_MINOR_N, sys::LUA_VERSION_MINOR),
        release: component(sys::LUA_VERSION_RELEASE_N, sys::LUA_VERSION_RELEASE),
    };

    /// `major * 100 + minor`, as `LUA_VERSION_NUM`
    pub const fn num(self) -> c_int {
        self.major * 100 + self.minor
    }
}

impl fmt::Display for LuaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.release)
    }
}

const fn component(numeric: Option<c_int>, text: Option<&str>) -> c_int {
    match (numeric, text) {
        (Some(n), _) => n,
        (None, Some(s)) => parse_decimal(s),
        (None, None) => panic!("version component missing from lua.h"),
    }
}

const fn parse_decimal(s: &str) -> c_int {
    let bytes = s.as_bytes();
    let mut value: c_int = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            panic!("version component is not a decimal number");
        }
        value = value * 10 + (b - b'0') as c_int;
        i += 1;
    }
    value
}

// ============================================================================
// C Entry Points
// ============================================================================

/// Major version of the linked VM
#[no_mangle]
pub extern "C" fn clua_version_major() -> c_int {
    LuaVersion::LINKED.major
}

/// Minor version of the linked VM
#[no_mangle]
pub extern "C" fn clua_version_minor() -> c_int {
    LuaVersion::LINKED.minor
}

/// Release number of the linked VM
#[no_mangle]
pub extern "C" fn clua_version_release() -> c_int {
    LuaVersion::LINKED.release
}

/// `LUA_VERSION_NUM` of the linked VM
#[no_mangle]
pub extern "C" fn clua_version_num() -> c_int {
    sys::LUA_VERSION_NUM
}
