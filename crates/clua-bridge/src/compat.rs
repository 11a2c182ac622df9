//! Version-compatibility shims
//!
//! Constants and fixed-arity entry points whose definitions differ, or are
//! missing, between the Lua 5.3 and 5.4 release families.

use clua_sys as sys;
use clua_sys::lua_State;
use std::ffi::CStr;
use std::os::raw::c_int;

// ============================================================================
// Registry
// ============================================================================

/// Pseudo-index of the registry.
///
/// Derived from the `LUAI_MAXSTACK` of the linked build rather than written
/// as a literal, since the stack limit depends on how the VM was configured.
pub const LUA_REGISTRYINDEX: c_int = -sys::LUAI_MAXSTACK - 1000;

/// Registry key of the table of loaded modules
pub const LUA_LOADED_TABLE: &CStr = match sys::LUA_LOADED_TABLE {
    Some(name) => name,
    // Early 5.3 headers use the key without defining the symbol
    None => c"_LOADED",
};

/// Registry key of the table of preloaded module loaders
pub const LUA_PRELOAD_TABLE: &CStr = match sys::LUA_PRELOAD_TABLE {
    Some(name) => name,
    None => c"_PRELOAD",
};

// ============================================================================
// Release Capabilities
// ============================================================================

/// Release family of the linked VM, fixed at build time
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LuaRelease {
    /// Lua 5.3.x
    Lua53 = 503,
    /// Lua 5.4.x
    Lua54 = 504,
}

/// Set of release-dependent features of the linked VM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities(u32);

impl Capabilities {
    /// `lua_gc` accepts two and three extra arguments (`clua_gc2`, `clua_gc3`)
    pub const GC_EXTENDED_ARGS: Capabilities = Capabilities(1 << 0);
    /// Generational collection mode is available
    pub const GC_GENERATIONAL: Capabilities = Capabilities(1 << 1);
    /// Full userdata carries an explicit number of user values
    pub const USER_VALUE_COUNT: Capabilities = Capabilities(1 << 2);
    /// `lua_Debug` records `ftransfer` / `ntransfer`
    pub const DEBUG_TRANSFERS: Capabilities = Capabilities(1 << 3);
    /// `lua_Debug` records the source length
    pub const DEBUG_SOURCE_LENGTH: Capabilities = Capabilities(1 << 4);

    /// No capabilities
    pub const fn empty() -> Self {
        Capabilities(0)
    }

    /// Raw bit representation
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Union of two sets
    pub const fn union(self, other: Capabilities) -> Self {
        Capabilities(self.0 | other.0)
    }

    /// Whether every capability in `other` is present
    pub const fn contains(self, other: Capabilities) -> bool {
        self.0 & other.0 == other.0
    }
}

impl LuaRelease {
    /// Release family the crate was built against
    #[cfg(feature = "lua53")]
    pub const LINKED: LuaRelease = LuaRelease::Lua53;
    /// Release family the crate was built against
    #[cfg(feature = "lua54")]
    pub const LINKED: LuaRelease = LuaRelease::Lua54;

    /// `LUA_VERSION_NUM` of the release family
    pub const fn version_num(self) -> c_int {
        self as c_int
    }

    /// Features available in this release family
    pub const fn capabilities(self) -> Capabilities {
        match self {
            LuaRelease::Lua53 => Capabilities::empty(),
            LuaRelease::Lua54 => Capabilities::GC_EXTENDED_ARGS
                .union(Capabilities::GC_GENERATIONAL)
                .union(Capabilities::USER_VALUE_COUNT)
                .union(Capabilities::DEBUG_TRANSFERS)
                .union(Capabilities::DEBUG_SOURCE_LENGTH),
        }
    }
}

/// `LUA_VERSION_NUM` of the release family the bridge was built against
#[no_mangle]
pub extern "C" fn clua_release() -> c_int {
    LuaRelease::LINKED.version_num()
}

/// Capability bits of the linked release (see [`Capabilities`])
#[no_mangle]
pub extern "C" fn clua_capabilities() -> u32 {
    LuaRelease::LINKED.capabilities().bits()
}

// ============================================================================
// Garbage Collector
// ============================================================================

/// Generational mode, as returned by [`clua_setgen`] / [`clua_setinc`]
pub const CLUA_GCGEN: c_int = 10;
/// Incremental mode, as returned by [`clua_setgen`] / [`clua_setinc`]
pub const CLUA_GCINC: c_int = 11;

/// `lua_gc` with no extra argument
///
/// # Safety
/// `L` must be a valid state.
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_gc0(L: *mut lua_State, what: c_int) -> c_int {
    sys::lua_gc(L, what, 0 as c_int)
}

/// `lua_gc` with one extra argument
///
/// # Safety
/// `L` must be a valid state.
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_gc1(L: *mut lua_State, what: c_int, arg1: c_int) -> c_int {
    sys::lua_gc(L, what, arg1)
}

/// `lua_gc` with two extra arguments. Only built for 5.4.
///
/// # Safety
/// `L` must be a valid state.
#[cfg(feature = "lua54")]
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_gc2(
    L: *mut lua_State,
    what: c_int,
    arg1: c_int,
    arg2: c_int,
) -> c_int {
    sys::lua_gc(L, what, arg1, arg2)
}

/// `lua_gc` with three extra arguments. Only built for 5.4.
///
/// # Safety
/// `L` must be a valid state.
#[cfg(feature = "lua54")]
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_gc3(
    L: *mut lua_State,
    what: c_int,
    arg1: c_int,
    arg2: c_int,
    arg3: c_int,
) -> c_int {
    sys::lua_gc(L, what, arg1, arg2, arg3)
}

/// Switch the collector to generational mode and return the previous mode.
///
/// 5.3 has no generational mode; the call does nothing and returns 0, which
/// is neither [`CLUA_GCGEN`] nor [`CLUA_GCINC`].
///
/// # Safety
/// `L` must be a valid state.
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_setgen(
    L: *mut lua_State,
    minormul: c_int,
    majormul: c_int,
) -> c_int {
    #[cfg(feature = "lua54")]
    {
        sys::lua_gc(L, sys::LUA_GCGEN, minormul, majormul)
    }
    #[cfg(feature = "lua53")]
    {
        let _ = (L, minormul, majormul);
        0
    }
}

/// Switch the collector to incremental mode and return the previous mode.
///
/// Zero arguments keep the current setting. 5.3 applies `pause` and
/// `stepmul` individually and cannot set `stepsize`.
///
/// # Safety
/// `L` must be a valid state.
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_setinc(
    L: *mut lua_State,
    pause: c_int,
    stepmul: c_int,
    stepsize: c_int,
) -> c_int {
    #[cfg(feature = "lua54")]
    {
        sys::lua_gc(L, sys::LUA_GCINC, pause, stepmul, stepsize)
    }
    #[cfg(feature = "lua53")]
    {
        if pause != 0 {
            sys::lua_gc(L, sys::LUA_GCSETPAUSE, pause);
        }
        if stepmul != 0 {
            sys::lua_gc(L, sys::LUA_GCSETSTEPMUL, stepmul);
        }
        let _ = stepsize;
        CLUA_GCINC
    }
}
