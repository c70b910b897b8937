//! OpenGL and EGL bindings.
//!
//! The raw function tables are generated at build time. Every wrapper in this
//! crate goes through [`khronos_call!`], which asserts the entry point was
//! loaded, optionally logs the call and checks the API error state in debug
//! builds.

#![warn(rust_2018_idioms, future_incompatible)]
#![deny(clippy::all, clippy::if_not_else, clippy::enum_glob_use)]

#[macro_use]
mod macros;

pub mod egl;
pub mod gl;
pub mod khronos;

pub use crate::khronos::{call_log_enabled, set_call_log_enabled, Error, Extensions};

#[doc(hidden)]
pub use log as __log;
