//! Shared plumbing for the Khronos APIs: call log, error checks, extensions.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::iter::FromIterator;
use std::sync::atomic::{AtomicBool, Ordering};

use log::error;

/// Process-wide switch for the call log.
static CALL_LOG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable or disable logging of every wrapped call to the `opengl::call` target.
pub fn set_call_log_enabled(enabled: bool) {
    CALL_LOG_ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn call_log_enabled() -> bool {
    CALL_LOG_ENABLED.load(Ordering::Relaxed)
}

/// Errors reported by the API error state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Value returned by `glGetError`.
    Gl(u32),

    /// Value returned by `eglGetError`.
    Egl(i32),
}

impl Error {
    fn name(self) -> Option<&'static str> {
        let name = match self {
            Error::Gl(0x0500) => "GL_INVALID_ENUM",
            Error::Gl(0x0501) => "GL_INVALID_VALUE",
            Error::Gl(0x0502) => "GL_INVALID_OPERATION",
            Error::Gl(0x0503) => "GL_STACK_OVERFLOW",
            Error::Gl(0x0504) => "GL_STACK_UNDERFLOW",
            Error::Gl(0x0505) => "GL_OUT_OF_MEMORY",
            Error::Gl(0x0506) => "GL_INVALID_FRAMEBUFFER_OPERATION",
            Error::Egl(0x3001) => "EGL_NOT_INITIALIZED",
            Error::Egl(0x3002) => "EGL_BAD_ACCESS",
            Error::Egl(0x3003) => "EGL_BAD_ALLOC",
            Error::Egl(0x3004) => "EGL_BAD_ATTRIBUTE",
            Error::Egl(0x3005) => "EGL_BAD_CONFIG",
            Error::Egl(0x3006) => "EGL_BAD_CONTEXT",
            Error::Egl(0x3007) => "EGL_BAD_CURRENT_SURFACE",
            Error::Egl(0x3008) => "EGL_BAD_DISPLAY",
            Error::Egl(0x3009) => "EGL_BAD_MATCH",
            Error::Egl(0x300A) => "EGL_BAD_NATIVE_PIXMAP",
            Error::Egl(0x300B) => "EGL_BAD_NATIVE_WINDOW",
            Error::Egl(0x300C) => "EGL_BAD_PARAMETER",
            Error::Egl(0x300D) => "EGL_BAD_SURFACE",
            Error::Egl(0x300E) => "EGL_CONTEXT_LOST",
            _ => return None,
        };

        Some(name)
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (api, code) = match *self {
            Error::Gl(code) => ("GL", code as i64),
            Error::Egl(code) => ("EGL", code as i64),
        };

        match self.name() {
            Some(name) => write!(f, "{} error 0x{:04X} ({})", api, code, name),
            None => write!(f, "{} error 0x{:04X}", api, code),
        }
    }
}

/// API tables which can report their error state.
pub trait ErrorCheck {
    /// Consume the pending error, if any.
    fn check_errors(&self) -> Result<(), Error>;
}

/// Assert the error state is clean after `command` in debug builds.
#[inline]
pub fn debug_check_errors<A: ErrorCheck + ?Sized>(api: &A, command: &str) {
    if !cfg!(debug_assertions) || command.ends_with("GetError") {
        return;
    }

    if let Err(err) = api.check_errors() {
        error!("{} raised by {}", err, command);
        debug_assert!(false, "{} raised by {}", err, command);
    }
}

/// Set of extension names advertised by a driver.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Extensions {
    names: BTreeSet<String>,
}

impl Extensions {
    /// Parse a space separated extension string.
    pub fn parse(extensions: &str) -> Self {
        extensions.split_whitespace().map(str::to_owned).collect()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl FromIterator<String> for Extensions {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Extensions { names: iter.into_iter().filter(|name| !name.is_empty()).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extension_string() {
        let extensions = Extensions::parse("GL_APPLE_fence  GL_NV_texture_multisample\n");

        assert_eq!(extensions.len(), 2);
        assert!(extensions.contains("GL_APPLE_fence"));
        assert!(extensions.contains("GL_NV_texture_multisample"));
        assert!(!extensions.contains("GL_APPLE"));
    }

    #[test]
    fn parse_empty_extension_string() {
        assert!(Extensions::parse("   ").is_empty());
        assert!(Extensions::parse("").is_empty());
    }

    #[test]
    fn collect_skips_empty_names() {
        let extensions: Extensions =
            vec![String::new(), "EGL_KHR_create_context".into()].into_iter().collect();

        assert_eq!(extensions.iter().collect::<Vec<_>>(), vec!["EGL_KHR_create_context"]);
    }

    #[test]
    fn error_display() {
        assert_eq!(Error::Gl(0x0502).to_string(), "GL error 0x0502 (GL_INVALID_OPERATION)");
        assert_eq!(Error::Egl(0x3008).to_string(), "EGL error 0x3008 (EGL_BAD_DISPLAY)");
        assert_eq!(Error::Gl(0x1234).to_string(), "GL error 0x1234");
    }

    #[test]
    fn toggle_call_log() {
        set_call_log_enabled(true);
        assert!(call_log_enabled());
        set_call_log_enabled(false);
        assert!(!call_log_enabled());
    }
}
