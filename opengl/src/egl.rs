//! EGL 1.5 with the context and platform extensions.

#![allow(clippy::all, non_camel_case_types, non_upper_case_globals, missing_docs)]

use std::ffi::{c_void, CStr};
use std::os::raw::{c_char, c_long};

use crate::khronos::{Error, ErrorCheck, Extensions};

pub type khronos_utime_nanoseconds_t = khronos_uint64_t;
pub type khronos_uint64_t = u64;
pub type khronos_ssize_t = c_long;
pub type EGLint = i32;
pub type EGLNativeDisplayType = *const c_void;
pub type EGLNativePixmapType = *const c_void;
pub type EGLNativeWindowType = *const c_void;
pub type NativeDisplayType = EGLNativeDisplayType;
pub type NativePixmapType = EGLNativePixmapType;
pub type NativeWindowType = EGLNativeWindowType;

include!(concat!(env!("OUT_DIR"), "/egl_bindings.rs"));

// SAFETY: The generated table is already `Send`; its entry points are immutable
// after loading and valid on every thread.
unsafe impl Sync for Egl {}

/// `EGLClientPixmapHI`.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ClientPixmap {
    pub data: *mut c_void,
    pub width: EGLint,
    pub height: EGLint,
    pub stride: EGLint,
}

/// `EGLSetBlobFuncANDROID`.
pub type SetBlobFunc = extern "C" fn(
    key: *const c_void,
    key_size: khronos_ssize_t,
    value: *const c_void,
    value_size: khronos_ssize_t,
);

/// `EGLGetBlobFuncANDROID`.
pub type GetBlobFunc = extern "C" fn(
    key: *const c_void,
    key_size: khronos_ssize_t,
    value: *mut c_void,
    value_size: khronos_ssize_t,
) -> khronos_ssize_t;

impl ErrorCheck for Egl {
    fn check_errors(&self) -> Result<(), Error> {
        if !self.GetError.is_loaded() {
            return Ok(());
        }

        match unsafe { self.GetError() } {
            code if code == SUCCESS as types::EGLint => Ok(()),
            code => Err(Error::Egl(code)),
        }
    }
}

impl Egl {
    /// Pending error as reported by `eglGetError`.
    pub fn get_error(&self) -> types::EGLint {
        egl_call!(self, GetError())
    }

    /// Query a display string such as `EGL_VENDOR` or `EGL_EXTENSIONS`.
    ///
    /// A null `display` queries client extensions.
    pub fn query_string(&self, display: types::EGLDisplay, name: types::EGLint) -> Option<String> {
        let dpy = display;
        let string = egl_call!(self, QueryString(dpy, name));
        if string.is_null() {
            return None;
        }

        let string = unsafe { CStr::from_ptr(string as *const c_char) };
        Some(string.to_string_lossy().into_owned())
    }

    /// Extensions supported by `display`.
    pub fn extensions(&self, display: types::EGLDisplay) -> Extensions {
        if !self.QueryString.is_loaded() {
            return Extensions::default();
        }

        self.query_string(display, EXTENSIONS as types::EGLint)
            .map(|extensions| Extensions::parse(&extensions))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::{mem, ptr};

    use super::*;

    #[test]
    fn client_pixmap_layout() {
        let pointer = mem::size_of::<*mut c_void>();
        let unpadded = pointer + 3 * mem::size_of::<EGLint>();

        assert_eq!(mem::size_of::<ClientPixmap>(), (unpadded + pointer - 1) / pointer * pointer);
    }

    #[test]
    fn unloaded_table() {
        let egl = Egl::load_with(|_| ptr::null());

        assert!(!egl.GetDisplay.is_loaded());
        assert_eq!(egl.check_errors(), Ok(()));
        assert!(egl.extensions(ptr::null()).is_empty());
    }
}
