//! Native OpenGL windows.
//!
//! A [`Window`] owns a native window, its render context and the message loop
//! driving it. Messages are translated by a [`Platform`] and forwarded to a
//! [`WindowHandler`].

#![warn(rust_2018_idioms, future_incompatible)]
#![deny(clippy::all, clippy::if_not_else, clippy::enum_glob_use)]

pub mod error;
pub mod geometry;
pub mod input;
pub mod platform;
pub mod style;
pub mod window;

pub use crate::error::{Error, Result};
pub use crate::geometry::{Point, Rect, Size};
pub use crate::input::{KeyCode, MouseButtons};
pub use crate::platform::{DefaultPlatform, Headless, Platform, RawHandle, RenderContext};
pub use crate::style::NativeWindowStyles;
pub use crate::window::{NativeWindow, StopHandle, Window, WindowHandler};
