//! Extension feature tables.
//!
//! Each generated extension is described by the extension string that
//! advertises it and the commands it introduces.

use crate::gl::Gl;
use crate::khronos::Extensions;

/// An extension together with the commands it requires.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Feature {
    pub name: &'static str,
    pub commands: &'static [&'static str],
}

pub const APPLE_FENCE: Feature = Feature {
    name: "GL_APPLE_fence",
    commands: &[
        "glGenFencesAPPLE",
        "glDeleteFencesAPPLE",
        "glSetFenceAPPLE",
        "glIsFenceAPPLE",
        "glTestFenceAPPLE",
        "glFinishFenceAPPLE",
        "glTestObjectAPPLE",
        "glFinishObjectAPPLE",
    ],
};

pub const SGIS_DETAIL_TEXTURE: Feature = Feature {
    name: "GL_SGIS_detail_texture",
    commands: &["glDetailTexFuncSGIS", "glGetDetailTexFuncSGIS"],
};

pub const NV_TEXTURE_MULTISAMPLE: Feature = Feature {
    name: "GL_NV_texture_multisample",
    commands: &[
        "glTexImage2DMultisampleCoverageNV",
        "glTexImage3DMultisampleCoverageNV",
        "glTextureImage2DMultisampleNV",
        "glTextureImage3DMultisampleNV",
        "glTextureImage2DMultisampleCoverageNV",
        "glTextureImage3DMultisampleCoverageNV",
    ],
};

impl Feature {
    #[inline]
    pub fn is_advertised(&self, extensions: &Extensions) -> bool {
        extensions.contains(self.name)
    }
}

impl Gl {
    /// Check that `feature` is advertised by the driver and all of its
    /// commands were resolved by the loader.
    pub fn supports(&self, feature: &Feature) -> bool {
        feature.commands.iter().all(|command| self.command_loaded(command))
            && feature.is_advertised(&self.extensions())
    }

    pub(crate) fn command_loaded(&self, command: &str) -> bool {
        match command {
            "glGenFencesAPPLE" => self.GenFencesAPPLE.is_loaded(),
            "glDeleteFencesAPPLE" => self.DeleteFencesAPPLE.is_loaded(),
            "glSetFenceAPPLE" => self.SetFenceAPPLE.is_loaded(),
            "glIsFenceAPPLE" => self.IsFenceAPPLE.is_loaded(),
            "glTestFenceAPPLE" => self.TestFenceAPPLE.is_loaded(),
            "glFinishFenceAPPLE" => self.FinishFenceAPPLE.is_loaded(),
            "glTestObjectAPPLE" => self.TestObjectAPPLE.is_loaded(),
            "glFinishObjectAPPLE" => self.FinishObjectAPPLE.is_loaded(),
            "glDetailTexFuncSGIS" => self.DetailTexFuncSGIS.is_loaded(),
            "glGetDetailTexFuncSGIS" => self.GetDetailTexFuncSGIS.is_loaded(),
            "glTexImage2DMultisampleCoverageNV" => {
                self.TexImage2DMultisampleCoverageNV.is_loaded()
            },
            "glTexImage3DMultisampleCoverageNV" => {
                self.TexImage3DMultisampleCoverageNV.is_loaded()
            },
            "glTextureImage2DMultisampleNV" => self.TextureImage2DMultisampleNV.is_loaded(),
            "glTextureImage3DMultisampleNV" => self.TextureImage3DMultisampleNV.is_loaded(),
            "glTextureImage2DMultisampleCoverageNV" => {
                self.TextureImage2DMultisampleCoverageNV.is_loaded()
            },
            "glTextureImage3DMultisampleCoverageNV" => {
                self.TextureImage3DMultisampleCoverageNV.is_loaded()
            },
            _ => false,
        }
    }
}
