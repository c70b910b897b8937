//! Core commands used by the window demo.

use std::ffi::CStr;
use std::os::raw::c_char;

use crate::gl::{self, types, Gl};
use crate::khronos::{Error, ErrorCheck, Extensions};

impl ErrorCheck for Gl {
    fn check_errors(&self) -> Result<(), Error> {
        if !self.GetError.is_loaded() {
            return Ok(());
        }

        match unsafe { self.GetError() } {
            gl::NO_ERROR => Ok(()),
            err => Err(Error::Gl(err)),
        }
    }
}

impl Gl {
    /// Pending error as reported by `glGetError`.
    pub fn get_error(&self) -> types::GLenum {
        gl_call!(self, GetError())
    }

    pub fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        gl_call!(self, ClearColor(red, green, blue, alpha))
    }

    pub fn clear(&self, mask: types::GLbitfield) {
        gl_call!(self, Clear(mask))
    }

    pub fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        gl_call!(self, Viewport(x, y, width, height))
    }

    /// Query a driver string such as `GL_VERSION` or `GL_RENDERER`.
    pub fn get_string(&self, name: types::GLenum) -> Option<String> {
        let string = gl_call!(self, GetString(name));
        if string.is_null() {
            return None;
        }

        let string = unsafe { CStr::from_ptr(string as *const c_char) };
        Some(string.to_string_lossy().into_owned())
    }

    /// Extensions supported by the current context.
    ///
    /// Uses the indexed query on GL 3.0+ contexts and falls back to the legacy
    /// extension string otherwise.
    pub fn extensions(&self) -> Extensions {
        if !self.GetString.is_loaded() {
            return Extensions::default();
        }

        if !self.GetStringi.is_loaded() || !self.GetIntegerv.is_loaded() {
            let extensions = self.get_string(gl::EXTENSIONS);
            return extensions.map(|extensions| Extensions::parse(&extensions)).unwrap_or_default();
        }

        let mut count: types::GLint = 0;
        let pname = gl::NUM_EXTENSIONS;
        let data = &mut count as *mut types::GLint;
        gl_call!(self, GetIntegerv(pname, data));

        let name = gl::EXTENSIONS;
        (0..count.max(0) as types::GLuint)
            .filter_map(|index| {
                let string = gl_call!(self, GetStringi(name, index));
                if string.is_null() {
                    None
                } else {
                    let string = unsafe { CStr::from_ptr(string as *const c_char) };
                    Some(string.to_string_lossy().into_owned())
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use super::*;

    #[test]
    fn unloaded_table_reports_missing_commands() {
        let gl = Gl::load_with(|_| ptr::null());

        assert!(!gl.Clear.is_loaded());
        assert!(!gl.GenFencesAPPLE.is_loaded());
        assert_eq!(gl.check_errors(), Ok(()));
        assert!(gl.extensions().is_empty());
    }
}
