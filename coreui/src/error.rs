//! Errors raised by window operations.

use std::fmt::{self, Display, Formatter};
use std::io;

use crate::input::KeyCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// The operation needs a native window, but none was created.
    NoHandle,

    /// `create` was called on a window which already owns a native handle.
    AlreadyCreated,

    /// The native window was mutated from a thread other than its creator.
    CrossThread,

    /// The geometry or styles can't be changed while fullscreen.
    Fullscreen,

    /// The message loop is already running.
    LoopRunning,

    /// The message loop isn't running.
    LoopNotRunning,

    /// The key has no platform virtual key.
    UnsupportedKey(KeyCode),

    /// No monitor could be found for the window.
    NoMonitor,

    /// A platform call failed.
    Os { call: &'static str, source: io::Error },

    /// Render context creation or activation failed.
    Context(String),
}

impl Error {
    /// Wrap the calling thread's last OS error.
    pub fn last_os(call: &'static str) -> Self {
        Error::Os { call, source: io::Error::last_os_error() }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Os { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoHandle => f.write_str("Window has not been created"),
            Error::AlreadyCreated => f.write_str("Window has already been created"),
            Error::CrossThread => f.write_str("Window accessed from a thread other than its owner"),
            Error::Fullscreen => f.write_str("Operation not allowed while fullscreen"),
            Error::LoopRunning => f.write_str("Message loop is already running"),
            Error::LoopNotRunning => f.write_str("Message loop is not running"),
            Error::UnsupportedKey(key) => write!(f, "Key {:?} has no platform mapping", key),
            Error::NoMonitor => f.write_str("Unable to find a monitor for the window"),
            Error::Os { call, source } => write!(f, "{} failed: {}", call, source),
            Error::Context(err) => write!(f, "Render context error: {}", err),
        }
    }
}

impl From<opengl::Error> for Error {
    fn from(val: opengl::Error) -> Self {
        Error::Context(val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_error_source() {
        let err = Error::Os { call: "CreateWindowExW", source: io::Error::from_raw_os_error(5) };

        assert!(err.to_string().starts_with("CreateWindowExW failed: "));
        assert!(std::error::Error::source(&err).is_some());
        assert!(std::error::Error::source(&Error::NoHandle).is_none());
    }

    #[test]
    fn gl_error_becomes_context_error() {
        let err = Error::from(opengl::Error::Gl(0x0505));
        assert_eq!(err.to_string(), "Render context error: GL error 0x0505 (GL_OUT_OF_MEMORY)");
    }
}
