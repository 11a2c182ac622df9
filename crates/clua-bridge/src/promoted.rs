//! Macro promotion set
//!
//! Lua defines these entry points as preprocessor macros. Each one is
//! reproduced here as an ordinary exported function with the macro's name,
//! argument order and return type, expanding to exactly the same sequence of
//! VM calls.
//!
//! Functions that can raise a Lua error outside of a protected call say so
//! under `# Unwinding`: the error travels through the VM's own unwind
//! mechanism and is only stopped by an enclosing `lua_pcall`.

use crate::compat::LUA_REGISTRYINDEX;
use clua_sys as sys;
use clua_sys::{lua_CFunction, lua_Integer, lua_Number, lua_State};
use std::borrow::Cow;
use std::os::raw::{c_char, c_int, c_void};

// ============================================================================
// Stack
// ============================================================================

/// Whether the value at `n` is absent or nil.
///
/// Relies on `LUA_TNONE` ordering below `LUA_TNIL`.
///
/// # Safety
/// `L` must be a valid state and `n` an acceptable index.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_isnoneornil(L: *mut lua_State, n: c_int) -> bool {
    sys::lua_type(L, n) <= sys::LUA_TNIL
}

/// Pop `n` values from the stack
///
/// # Safety
/// `L` must be a valid state holding at least `n` values above the base.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_pop(L: *mut lua_State, n: c_int) {
    sys::lua_settop(L, -n - 1);
}

/// Move the top value into `index`, shifting up the values above it
///
/// # Safety
/// `L` must be a valid state and `index` a valid, non-pseudo index.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_insert(L: *mut lua_State, index: c_int) {
    sys::lua_rotate(L, index, 1);
}

/// Remove the value at `index`, shifting down the values above it
///
/// # Safety
/// `L` must be a valid state and `index` a valid, non-pseudo index.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_remove(L: *mut lua_State, index: c_int) {
    sys::lua_rotate(L, index, -1);
    lua_pop(L, 1);
}

/// Move the top value into `index` without shifting, then pop it
///
/// # Safety
/// `L` must be a valid state and `index` a valid index.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_replace(L: *mut lua_State, index: c_int) {
    sys::lua_copy(L, -1, index);
    lua_pop(L, 1);
}

/// Pseudo-index of the `i`-th upvalue of the running C function
#[no_mangle]
pub extern "C" fn lua_upvalueindex(i: c_int) -> c_int {
    LUA_REGISTRYINDEX - i
}

// ============================================================================
// Calls
// ============================================================================

/// Call a function without protection.
///
/// # Safety
/// `L` must be a valid state with the function and `nargs` arguments on top.
///
/// # Unwinding
/// Errors raised by the callee propagate out of this call.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_call(L: *mut lua_State, nargs: c_int, nresults: c_int) {
    sys::lua_callk(L, nargs, nresults, 0, None);
}

/// Call a function in protected mode, returning the status code.
///
/// On error the error object (after `msgh`, if non-zero) is left on top.
///
/// # Safety
/// `L` must be a valid state with the function and `nargs` arguments on top.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_pcall(
    L: *mut lua_State,
    nargs: c_int,
    nresults: c_int,
    msgh: c_int,
) -> c_int {
    sys::lua_pcallk(L, nargs, nresults, msgh, 0, None)
}

/// Yield the running coroutine with `nresults` values.
///
/// # Safety
/// `L` must be a running coroutine and the call must be the return
/// expression of a C function.
///
/// # Unwinding
/// Yielding outside a coroutine raises an error in the calling context.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_yield(L: *mut lua_State, nresults: c_int) -> c_int {
    sys::lua_yieldk(L, nresults, 0, None)
}

/// Load and run a file, returning the first failing status.
///
/// A load failure (`LUA_ERRFILE`, `LUA_ERRSYNTAX`, `LUA_ERRMEM`) is returned
/// without calling anything. Otherwise the chunk runs under `lua_pcall` with
/// `LUA_MULTRET`, and its status is returned. On failure the error message
/// is on top of the stack.
///
/// # Safety
/// `L` must be a valid state and `filename` a nul-terminated path, or null
/// for standard input.
#[no_mangle]
pub unsafe extern "C-unwind" fn luaL_dofile(L: *mut lua_State, filename: *const c_char) -> c_int {
    let status = sys::luaL_loadfilex(L, filename, std::ptr::null());
    if status != sys::LUA_OK {
        trace_dofile(filename, "load", status);
        return status;
    }
    let status = lua_pcall(L, 0, sys::LUA_MULTRET, 0);
    trace_dofile(filename, "call", status);
    status
}

unsafe fn trace_dofile(filename: *const c_char, phase: &str, status: c_int) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    let path = if filename.is_null() {
        Cow::Borrowed("<stdin>")
    } else {
        std::ffi::CStr::from_ptr(filename).to_string_lossy()
    };
    match crate::error::check_status(status) {
        Ok(_) => tracing::debug!(path = %path, phase, "dofile completed"),
        Err(err) => tracing::debug!(path = %path, phase, error = %err, "dofile failed"),
    }
}

// ============================================================================
// Push and Registration
// ============================================================================

/// Push a new empty table
///
/// # Safety
/// `L` must be a valid state.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_newtable(L: *mut lua_State) {
    sys::lua_createtable(L, 0, 0);
}

/// Push a C function with no upvalues
///
/// # Safety
/// `L` must be a valid state.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_pushcfunction(L: *mut lua_State, f: lua_CFunction) {
    sys::lua_pushcclosure(L, f, 0);
}

/// Set the global `name` to the C function `f`
///
/// # Safety
/// `L` must be a valid state and `name` nul-terminated.
///
/// # Unwinding
/// A `__newindex` metamethod on the globals table may raise.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_register(
    L: *mut lua_State,
    name: *const c_char,
    f: lua_CFunction,
) {
    lua_pushcfunction(L, f);
    sys::lua_setglobal(L, name);
}

/// Push a nul-terminated string
///
/// # Safety
/// `L` must be a valid state and `s` nul-terminated.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_pushliteral(L: *mut lua_State, s: *const c_char) -> *const c_char {
    sys::lua_pushstring(L, s)
}

/// Push the globals table
///
/// # Safety
/// `L` must be a valid state.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_pushglobaltable(L: *mut lua_State) {
    sys::lua_rawgeti(L, LUA_REGISTRYINDEX, sys::LUA_RIDX_GLOBALS);
}

// ============================================================================
// Conversion and Lookup
// ============================================================================

/// Convert the value at `index` to a number, or 0
///
/// # Safety
/// `L` must be a valid state and `index` an acceptable index.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_tonumber(L: *mut lua_State, index: c_int) -> lua_Number {
    sys::lua_tonumberx(L, index, std::ptr::null_mut())
}

/// Convert the value at `index` to an integer, or 0
///
/// # Safety
/// `L` must be a valid state and `index` an acceptable index.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_tointeger(L: *mut lua_State, index: c_int) -> lua_Integer {
    sys::lua_tointegerx(L, index, std::ptr::null_mut())
}

/// Convert the value at `index` to a string in place, or return null.
///
/// Numbers are converted in the stack slot itself.
///
/// # Safety
/// `L` must be a valid state and `index` an acceptable index.
///
/// # Unwinding
/// Raises on memory errors while converting a number.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_tostring(L: *mut lua_State, index: c_int) -> *const c_char {
    sys::lua_tolstring(L, index, std::ptr::null_mut())
}

/// Name of the type of the value at `index`
///
/// # Safety
/// `L` must be a valid state and `index` an acceptable index.
#[no_mangle]
pub unsafe extern "C-unwind" fn luaL_typename(L: *mut lua_State, index: c_int) -> *const c_char {
    sys::lua_typename(L, sys::lua_type(L, index))
}

/// Push the metatable registered under `name` and return its type.
///
/// Returns `LUA_TNIL` (with nil pushed) when nothing is registered.
///
/// # Safety
/// `L` must be a valid state and `name` nul-terminated.
#[no_mangle]
pub unsafe extern "C-unwind" fn luaL_getmetatable(L: *mut lua_State, name: *const c_char) -> c_int {
    sys::lua_getfield(L, LUA_REGISTRYINDEX, name)
}

/// Raw memory area associated with the state
///
/// # Safety
/// `L` must be a valid state.
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_getextraspace(L: *mut lua_State) -> *mut c_void {
    L.cast::<u8>().sub(sys::LUA_EXTRASPACE).cast()
}

// ============================================================================
// Userdata
// ============================================================================

/// Allocate a full userdata with one user value and push it
///
/// # Safety
/// `L` must be a valid state.
///
/// # Unwinding
/// Raises on memory errors.
#[cfg(feature = "lua54")]
#[no_mangle]
pub unsafe extern "C-unwind" fn lua_newuserdata(L: *mut lua_State, size: usize) -> *mut c_void {
    sys::lua_newuserdatauv(L, size, 1)
}

// 5.3 exports lua_newuserdata as a real function with one implicit user value
#[cfg(feature = "lua53")]
pub use clua_sys::lua_newuserdata;
