//! C libraries of the bridge
//!
//! Builds `libclua_capi.so` and `libclua_capi.a`, exporting every promoted
//! macro and `clua_*` entry point of `clua-bridge`. The VM is not part of
//! either library. Both link the Lua the host itself links, located through
//! the build script's environment:
//!
//! - `LUA_INCLUDE_DIR` (required): headers of the host's Lua
//! - `LUA_LIB_DIR`: directory holding the library
//! - `LUA_LIB_NAME`: library name, `lua5.3` / `lua5.4` by default
//! - `LUA_LINK`: must be `dylib` (the default)
//!
//! The host then calls `luaL_newstate`, `lua_settop` and the rest of the real
//! API from its own Lua, and the bridge's `lua_pop` operates on the same VM.
//! A bridge carrying a private copy of the VM would hide that copy from the
//! host, so such a build is rejected below.

pub use clua_bridge::*;

const _: () = assert!(
    clua_sys::LUA_SHARED_LIBRARY,
    "clua-capi must link the host's shared Lua: disable `vendored` and keep LUA_LINK=dylib"
);
