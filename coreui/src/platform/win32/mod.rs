//! Win32 window system.

pub mod translate;

#[cfg(windows)]
mod context;
#[cfg(windows)]
mod window;

#[cfg(windows)]
pub use self::window::Win32;
