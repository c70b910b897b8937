//! `GL_SGIS_detail_texture`.

use crate::gl::{self, types, Gl};

impl Gl {
    /// Set the detail texture function from `(level, amplitude)` pairs.
    pub fn detail_tex_func_sgis(&self, target: types::GLenum, points: &[(f32, f32)]) {
        let flat: Vec<types::GLfloat> = points.iter().flat_map(|&(x, y)| [x, y]).collect();
        let n = points.len() as types::GLsizei;
        let points = flat.as_ptr();
        gl_call!(self, DetailTexFuncSGIS(target, n, points))
    }

    /// Read back the detail texture function of `target`.
    pub fn get_detail_tex_func_sgis(&self, target: types::GLenum) -> Vec<(f32, f32)> {
        let mut count: types::GLint = 0;
        let pname = gl::DETAIL_TEXTURE_FUNC_POINTS_SGIS;
        let params = &mut count as *mut types::GLint;
        gl_call!(self, GetTexParameteriv(target, pname, params));

        let mut flat: Vec<types::GLfloat> = vec![0.; count.max(0) as usize * 2];
        let points = flat.as_mut_ptr();
        gl_call!(self, GetDetailTexFuncSGIS(target, points));

        flat.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect()
    }
}
