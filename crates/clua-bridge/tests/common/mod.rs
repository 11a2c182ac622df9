//! Shared fixtures for the bridge integration tests

#![allow(dead_code, non_snake_case)]

use clua_bridge::{lua_pcall, lua_tostring};
use clua_sys as sys;
use clua_sys::lua_State;
use std::ffi::{CStr, CString};
use std::os::raw::c_int;

/// Fresh state with the standard libraries, closed on drop
pub struct LuaState(*mut lua_State);

impl LuaState {
    pub fn new() -> Self {
        unsafe {
            let state = sys::luaL_newstate();
            assert!(!state.is_null(), "luaL_newstate failed");
            sys::luaL_openlibs(state);
            LuaState(state)
        }
    }

    pub fn ptr(&self) -> *mut lua_State {
        self.0
    }

    /// Load and run `code` under `lua_pcall`, keeping every result
    pub fn exec(&self, code: &str) -> c_int {
        let chunk = CString::new(code).expect("chunk contains a nul byte");
        unsafe {
            let status = sys::luaL_loadstring(self.0, chunk.as_ptr());
            if status != sys::LUA_OK {
                return status;
            }
            lua_pcall(self.0, 0, sys::LUA_MULTRET, 0)
        }
    }

    /// Run `code`, panicking with the Lua error message on failure
    pub fn exec_ok(&self, code: &str) {
        let status = self.exec(code);
        assert_eq!(status, sys::LUA_OK, "chunk failed: {}", self.string_at(-1));
    }

    pub fn top(&self) -> c_int {
        unsafe { sys::lua_gettop(self.0) }
    }

    /// String conversion of the value at `index`, or a placeholder
    pub fn string_at(&self, index: c_int) -> String {
        unsafe {
            let s = lua_tostring(self.0, index);
            if s.is_null() {
                "<not a string>".to_string()
            } else {
                CStr::from_ptr(s).to_string_lossy().into_owned()
            }
        }
    }

    pub fn integer_at(&self, index: c_int) -> i64 {
        unsafe { sys::lua_tointegerx(self.0, index, std::ptr::null_mut()) }
    }
}

impl Drop for LuaState {
    fn drop(&mut self) {
        unsafe { sys::lua_close(self.0) }
    }
}

/// Resume `co` from `from` with `narg` arguments, returning `(status, nresults)`
pub unsafe fn resume(co: *mut lua_State, from: *mut lua_State, narg: c_int) -> (c_int, c_int) {
    #[cfg(feature = "lua54")]
    {
        let mut nres = 0;
        let status = sys::lua_resume(co, from, narg, &mut nres);
        (status, nres)
    }
    #[cfg(feature = "lua53")]
    {
        let status = sys::lua_resume(co, from, narg);
        (status, sys::lua_gettop(co))
    }
}
