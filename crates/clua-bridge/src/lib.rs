//! C FFI bridge over the Lua C API
//!
//! Lua's C API mixes real functions with preprocessor macros, variadic
//! functions and constants that only the C preprocessor can see. This crate
//! re-exports all of those as ordinary, linkable functions so that a foreign
//! caller sees one uniform API whichever Lua 5.3 or 5.4 point-release is
//! linked underneath.
//!
//! The API follows these principles:
//! - ABI-stable (uses only C-compatible types)
//! - Same name, argument order and stack effect as the Lua macro it replaces
//! - Never owns a `lua_State`; the host creates and closes it
//! - Never caches stack state; every call re-reads the live state
//! - Two error regimes kept apart: status codes from protected calls, and
//!   errors that unwind through the VM (documented under `# Unwinding`)
//!
//! A `lua_State` is not thread-safe. Calls against one state must be
//! serialized by the host; distinct states may be used from distinct threads.

#![allow(non_snake_case)]

pub mod adapters;
pub mod compat;
pub mod debug;
pub mod error;
pub mod promoted;
pub mod version;

pub use adapters::*;
pub use compat::*;
pub use debug::{clua_debug_gettransfers, clua_debug_srclen, source_length, transfer_counts};
pub use error::{check_status, StatusError, ThreadStatus};
pub use promoted::*;
pub use version::*;

pub use clua_sys::{
    lua_CFunction, lua_Debug, lua_Integer, lua_KContext, lua_KFunction, lua_Number, lua_State,
};
