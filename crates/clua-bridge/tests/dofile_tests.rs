//! luaL_dofile status propagation
//!
//! Each failure mode is distinguished only by the VM's status code, with the
//! error value left on top of the stack.

#![allow(non_snake_case)]

mod common;

use clua_bridge::{check_status, luaL_dofile, StatusError};
use clua_sys as sys;
use common::LuaState;
use std::ffi::CString;
use std::io::Write;
use std::os::raw::c_int;
use std::path::Path;
use tempfile::NamedTempFile;

fn script(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp script");
    file.write_all(source.as_bytes()).expect("write temp script");
    file.flush().expect("flush temp script");
    file
}

fn dofile(state: &LuaState, path: &Path) -> c_int {
    let path = CString::new(path.to_str().expect("utf-8 temp path")).unwrap();
    unsafe { luaL_dofile(state.ptr(), path.as_ptr()) }
}

#[test]
fn test_missing_file_reports_file_error() {
    let state = LuaState::new();
    let dir = tempfile::tempdir().unwrap();
    let status = dofile(&state, &dir.path().join("missing.lua"));

    assert_eq!(status, sys::LUA_ERRFILE);
    assert_eq!(check_status(status), Err(StatusError::File));
    assert_eq!(state.top(), 1);
    let message = state.string_at(-1);
    assert!(message.contains("cannot open"), "unexpected message: {}", message);
    assert!(message.contains("missing.lua"));
}

#[test]
fn test_syntax_error_is_not_called() {
    let state = LuaState::new();
    state.exec_ok("ran = false");
    let file = script("ran = true\nlocal = = 1\n");

    let status = dofile(&state, file.path());
    assert_eq!(status, sys::LUA_ERRSYNTAX);
    assert_eq!(state.top(), 1);

    unsafe {
        sys::lua_getglobal(state.ptr(), c"ran".as_ptr());
        assert_eq!(sys::lua_toboolean(state.ptr(), -1), 0);
    }
}

#[test]
fn test_runtime_error_leaves_raised_value() {
    let state = LuaState::new();
    let file = script("error(42)\n");

    let status = dofile(&state, file.path());
    assert_eq!(status, sys::LUA_ERRRUN);
    assert_eq!(state.top(), 1);
    unsafe {
        assert_eq!(sys::lua_type(state.ptr(), -1), sys::LUA_TNUMBER);
    }
    assert_eq!(state.integer_at(-1), 42);
}

#[test]
fn test_runtime_error_message() {
    let state = LuaState::new();
    let file = script("error('boom')\n");

    assert_eq!(dofile(&state, file.path()), sys::LUA_ERRRUN);
    assert!(state.string_at(-1).ends_with("boom"));
}

#[test]
fn test_success_keeps_all_results() {
    let state = LuaState::new();
    let file = script("counter = (counter or 0) + 1\nreturn 1, 2, 3\n");

    assert_eq!(dofile(&state, file.path()), sys::LUA_OK);
    assert_eq!(state.top(), 3);
    assert_eq!(state.integer_at(1), 1);
    assert_eq!(state.integer_at(3), 3);

    assert_eq!(dofile(&state, file.path()), sys::LUA_OK);
    assert_eq!(state.top(), 6);
    state.exec_ok("assert(counter == 2)");
}
