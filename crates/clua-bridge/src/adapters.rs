//! Call adapters
//!
//! Multi-step stack protocols packaged behind a single entry point. Most
//! adapters are `lua_CFunction`s that read their operands from stack slots
//! 1, 2 and 3: push the adapter, push the operands, then invoke it with
//! `lua_pcall` to receive failures as a status code, or with `lua_call` to
//! let them unwind.

use crate::compat::{LUA_PRELOAD_TABLE, LUA_REGISTRYINDEX};
use crate::promoted::{lua_pop, lua_pushcfunction};
use clua_sys as sys;
use clua_sys::{lua_CFunction, lua_State};
use std::os::raw::{c_int, c_void};

// ============================================================================
// Closure Trampoline
// ============================================================================

/// Return value a closure dispatcher uses to ask the trampoline to raise the
/// value on top of the stack as a Lua error.
pub const CLUA_CALLCLOSURE_ERROR: c_int = -2;

/// Trampoline through which foreign closures become Lua C functions.
///
/// Push it with `lua_pushcclosure(L, clua_callclosurewrapper, n)`, carrying
/// the foreign handle in its upvalues. When Lua calls it, the dispatcher
/// installed with [`clua_setclosuredispatcher`] runs with the same state and
/// reads the handle through `lua_upvalueindex`. The dispatcher's return value
/// is the number of results, or [`CLUA_CALLCLOSURE_ERROR`] to raise the value
/// on top of the stack.
///
/// # Safety
/// Must only be invoked by the VM as a C function.
///
/// # Unwinding
/// Raises the dispatcher's error value, or an error when no dispatcher is
/// installed.
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_callclosurewrapper(L: *mut lua_State) -> c_int {
    // The dispatcher lives in the registry, keyed by this function
    lua_pushcfunction(L, clua_callclosurewrapper);
    sys::lua_rawget(L, LUA_REGISTRYINDEX);
    let dispatcher = sys::lua_tocfunction(L, -1);
    lua_pop(L, 1);

    let Some(dispatch) = dispatcher else {
        tracing::warn!("closure called with no dispatcher installed");
        sys::lua_pushstring(L, c"no closure dispatcher installed".as_ptr());
        return sys::lua_error(L);
    };

    let ret = dispatch(L);
    if ret == CLUA_CALLCLOSURE_ERROR {
        sys::lua_error(L)
    } else {
        ret
    }
}

/// Install the dispatcher invoked by [`clua_callclosurewrapper`].
///
/// Passing `None` (a null function pointer) removes it.
///
/// # Safety
/// `L` must be a valid state.
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_setclosuredispatcher(
    L: *mut lua_State,
    dispatcher: Option<lua_CFunction>,
) {
    lua_pushcfunction(L, clua_callclosurewrapper);
    match dispatcher {
        Some(f) => lua_pushcfunction(L, f),
        None => sys::lua_pushnil(L),
    }
    sys::lua_rawset(L, LUA_REGISTRYINDEX);
    tracing::debug!(installed = dispatcher.is_some(), "closure dispatcher updated");
}

/// Whether `f` is [`clua_callclosurewrapper`]
#[no_mangle]
pub extern "C" fn clua_iscallclosurewrapper(f: Option<lua_CFunction>) -> bool {
    match f {
        Some(f) => std::ptr::fn_addr_eq(f, clua_callclosurewrapper as lua_CFunction),
        None => false,
    }
}

// ============================================================================
// Metamethod-Aware Operations
// ============================================================================

/// `t[k]` for operands `(t, k)`, honouring `__index`. Returns one value.
///
/// # Safety
/// Must only be invoked by the VM as a C function.
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_gettable(L: *mut lua_State) -> c_int {
    sys::lua_gettable(L, 1);
    1
}

/// `t[k] = v` for operands `(t, k, v)`, honouring `__newindex`. Returns nothing.
///
/// # Safety
/// Must only be invoked by the VM as a C function.
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_settable(L: *mut lua_State) -> c_int {
    sys::lua_settable(L, 1);
    0
}

/// `tostring(v)` for operand `(v)`, honouring `__tostring` and `__name`.
/// Returns one string.
///
/// # Safety
/// Must only be invoked by the VM as a C function.
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_tostring(L: *mut lua_State) -> c_int {
    sys::luaL_tolstring(L, 1, std::ptr::null_mut());
    1
}

/// `luaL_requiref` for operands `(modname, openf, global)`. Returns nothing.
///
/// # Safety
/// Must only be invoked by the VM as a C function.
///
/// # Unwinding
/// Raises if the module name is not a string or `openf` is not a C function.
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_requiref(L: *mut lua_State) -> c_int {
    let name = sys::luaL_checklstring(L, 1, std::ptr::null_mut());
    let Some(openf) = sys::lua_tocfunction(L, 2) else {
        return sys::luaL_error(L, c"bad argument #2 to 'requiref' (C function expected)".as_ptr());
    };
    let global = sys::lua_toboolean(L, 3);
    sys::luaL_requiref(L, name, openf, global);
    0
}

/// `lua_compare` for operands `(a, b, op)`. Returns the result as an integer.
///
/// # Safety
/// Must only be invoked by the VM as a C function.
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_compare(L: *mut lua_State) -> c_int {
    let op = sys::lua_tointegerx(L, 3, std::ptr::null_mut()) as c_int;
    let result = sys::lua_compare(L, 1, 2, op);
    sys::lua_pushinteger(L, result.into());
    1
}

// ============================================================================
// Userdata
// ============================================================================

/// Allocate a full userdata with as few user values as the release allows
///
/// # Safety
/// `L` must be a valid state.
///
/// # Unwinding
/// Raises on memory errors.
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_newuserdata(L: *mut lua_State, size: usize) -> *mut c_void {
    #[cfg(feature = "lua54")]
    {
        sys::lua_newuserdatauv(L, size, 0)
    }
    #[cfg(feature = "lua53")]
    {
        sys::lua_newuserdata(L, size)
    }
}

// ============================================================================
// Module Searcher
// ============================================================================

/// `package.searchers` entry that looks the module up in the preload table.
///
/// On 5.4 a hit returns the loader plus `":preload:"`; on 5.3 just the
/// loader. A miss returns the message `require` folds into its error.
///
/// # Safety
/// Must only be invoked by the VM as a C function.
///
/// # Unwinding
/// Raises if the module name is not a string.
#[no_mangle]
pub unsafe extern "C-unwind" fn clua_searcher_preload(L: *mut lua_State) -> c_int {
    let name = sys::luaL_checklstring(L, 1, std::ptr::null_mut());
    sys::lua_getfield(L, LUA_REGISTRYINDEX, LUA_PRELOAD_TABLE.as_ptr());
    let found = sys::lua_getfield(L, -1, name) != sys::LUA_TNIL;

    #[cfg(feature = "lua54")]
    {
        if found {
            sys::lua_pushstring(L, c":preload:".as_ptr());
            2
        } else {
            sys::lua_pushfstring(L, c"no field package.preload['%s']".as_ptr(), name);
            1
        }
    }
    #[cfg(feature = "lua53")]
    {
        if !found {
            sys::lua_pushfstring(L, c"\n\tno field package.preload['%s']".as_ptr(), name);
        }
        1
    }
}
