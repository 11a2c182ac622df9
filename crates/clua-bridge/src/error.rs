//! Status codes of the protected regime
//!
//! `lua_pcall`, `luaL_dofile` and the loaders report failures as an integer
//! status with the error value left on the stack. This module gives Rust
//! callers a typed view of that status. It deliberately has no variant for
//! errors that unwind (unprotected calls, yields outside a coroutine): those
//! never produce a status in the frame that caused them.

use clua_sys as sys;
use std::os::raw::c_int;

/// Non-error outcome of a status-returning call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadStatus {
    /// `LUA_OK`
    Ok,
    /// `LUA_YIELD`: the coroutine suspended
    Yield,
}

/// Failure reported through a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    /// `LUA_ERRRUN`
    #[error("runtime error")]
    Runtime,

    /// `LUA_ERRSYNTAX`
    #[error("syntax error during precompilation")]
    Syntax,

    /// `LUA_ERRMEM`
    #[error("memory allocation error")]
    Memory,

    /// `LUA_ERRGCMM` (5.3 only)
    #[cfg(feature = "lua53")]
    #[error("error while running a __gc metamethod")]
    GcMetamethod,

    /// `LUA_ERRERR`
    #[error("error while running the message handler")]
    MessageHandler,

    /// `LUA_ERRFILE`
    #[error("cannot open or read the file")]
    File,

    /// Any other code
    #[error("unknown status code {0}")]
    Unknown(c_int),
}

impl StatusError {
    /// Raw status code of this error
    pub fn code(self) -> c_int {
        match self {
            StatusError::Runtime => sys::LUA_ERRRUN,
            StatusError::Syntax => sys::LUA_ERRSYNTAX,
            StatusError::Memory => sys::LUA_ERRMEM,
            #[cfg(feature = "lua53")]
            StatusError::GcMetamethod => sys::LUA_ERRGCMM,
            StatusError::MessageHandler => sys::LUA_ERRERR,
            StatusError::File => sys::LUA_ERRFILE,
            StatusError::Unknown(code) => code,
        }
    }
}

/// Classify a raw status code
pub fn check_status(code: c_int) -> Result<ThreadStatus, StatusError> {
    match code {
        sys::LUA_OK => Ok(ThreadStatus::Ok),
        sys::LUA_YIELD => Ok(ThreadStatus::Yield),
        sys::LUA_ERRRUN => Err(StatusError::Runtime),
        sys::LUA_ERRSYNTAX => Err(StatusError::Syntax),
        sys::LUA_ERRMEM => Err(StatusError::Memory),
        #[cfg(feature = "lua53")]
        sys::LUA_ERRGCMM => Err(StatusError::GcMetamethod),
        sys::LUA_ERRERR => Err(StatusError::MessageHandler),
        sys::LUA_ERRFILE => Err(StatusError::File),
        other => Err(StatusError::Unknown(other)),
    }
}
