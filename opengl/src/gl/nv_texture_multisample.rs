//! `GL_NV_texture_multisample`.

use crate::gl::{self, types, Gl};

#[inline]
fn boolean(value: bool) -> types::GLboolean {
    if value {
        gl::TRUE
    } else {
        gl::FALSE
    }
}

impl Gl {
    #[allow(clippy::too_many_arguments)]
    pub fn tex_image_2d_multisample_coverage_nv(
        &self,
        target: types::GLenum,
        coverage_samples: i32,
        color_samples: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        fixed_sample_locations: bool,
    ) {
        let fixed = boolean(fixed_sample_locations);
        gl_call!(
            self,
            TexImage2DMultisampleCoverageNV(
                target,
                coverage_samples,
                color_samples,
                internal_format,
                width,
                height,
                fixed
            )
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn tex_image_3d_multisample_coverage_nv(
        &self,
        target: types::GLenum,
        coverage_samples: i32,
        color_samples: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        depth: i32,
        fixed_sample_locations: bool,
    ) {
        let fixed = boolean(fixed_sample_locations);
        gl_call!(
            self,
            TexImage3DMultisampleCoverageNV(
                target,
                coverage_samples,
                color_samples,
                internal_format,
                width,
                height,
                depth,
                fixed
            )
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn texture_image_2d_multisample_nv(
        &self,
        texture: types::GLuint,
        target: types::GLenum,
        samples: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        fixed_sample_locations: bool,
    ) {
        let fixed = boolean(fixed_sample_locations);
        gl_call!(
            self,
            TextureImage2DMultisampleNV(
                texture,
                target,
                samples,
                internal_format,
                width,
                height,
                fixed
            )
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn texture_image_3d_multisample_nv(
        &self,
        texture: types::GLuint,
        target: types::GLenum,
        samples: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        depth: i32,
        fixed_sample_locations: bool,
    ) {
        let fixed = boolean(fixed_sample_locations);
        gl_call!(
            self,
            TextureImage3DMultisampleNV(
                texture,
                target,
                samples,
                internal_format,
                width,
                height,
                depth,
                fixed
            )
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn texture_image_2d_multisample_coverage_nv(
        &self,
        texture: types::GLuint,
        target: types::GLenum,
        coverage_samples: i32,
        color_samples: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        fixed_sample_locations: bool,
    ) {
        let fixed = boolean(fixed_sample_locations);
        gl_call!(
            self,
            TextureImage2DMultisampleCoverageNV(
                texture,
                target,
                coverage_samples,
                color_samples,
                internal_format,
                width,
                height,
                fixed
            )
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn texture_image_3d_multisample_coverage_nv(
        &self,
        texture: types::GLuint,
        target: types::GLenum,
        coverage_samples: i32,
        color_samples: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        depth: i32,
        fixed_sample_locations: bool,
    ) {
        let fixed = boolean(fixed_sample_locations);
        gl_call!(
            self,
            TextureImage3DMultisampleCoverageNV(
                texture,
                target,
                coverage_samples,
                color_samples,
                internal_format,
                width,
                height,
                depth,
                fixed
            )
        )
    }
}
