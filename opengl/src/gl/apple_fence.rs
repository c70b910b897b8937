//! `GL_APPLE_fence`.

use crate::gl::{self, types, Gl};

impl Gl {
    /// Generate `count` fence names.
    pub fn gen_fences_apple(&self, count: usize) -> Vec<types::GLuint> {
        let mut fences = vec![0; count];
        let n = count as types::GLsizei;
        let names = fences.as_mut_ptr();
        gl_call!(self, GenFencesAPPLE(n, names));
        fences
    }

    /// Generate a single fence name.
    pub fn gen_fence_apple(&self) -> types::GLuint {
        let mut fence = 0;
        let n = 1;
        let names = &mut fence as *mut types::GLuint;
        gl_call!(self, GenFencesAPPLE(n, names));
        fence
    }

    pub fn delete_fences_apple(&self, fences: &[types::GLuint]) {
        let n = fences.len() as types::GLsizei;
        let names = fences.as_ptr();
        gl_call!(self, DeleteFencesAPPLE(n, names))
    }

    pub fn set_fence_apple(&self, fence: types::GLuint) {
        gl_call!(self, SetFenceAPPLE(fence))
    }

    pub fn is_fence_apple(&self, fence: types::GLuint) -> bool {
        gl_call!(self, IsFenceAPPLE(fence)) == gl::TRUE
    }

    /// Check whether the commands preceding `fence` have completed.
    pub fn test_fence_apple(&self, fence: types::GLuint) -> bool {
        gl_call!(self, TestFenceAPPLE(fence)) == gl::TRUE
    }

    /// Block until the commands preceding `fence` have completed.
    pub fn finish_fence_apple(&self, fence: types::GLuint) {
        gl_call!(self, FinishFenceAPPLE(fence))
    }

    pub fn test_object_apple(&self, object: types::GLenum, name: types::GLuint) -> bool {
        gl_call!(self, TestObjectAPPLE(object, name)) == gl::TRUE
    }

    pub fn finish_object_apple(&self, object: types::GLenum, name: types::GLint) {
        gl_call!(self, FinishObjectAPPLE(object, name))
    }
}
