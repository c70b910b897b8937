use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};

use std::env;
use std::fs::File;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let dest = env::var("OUT_DIR").unwrap();

    let mut file = File::create(Path::new(&dest).join("gl_bindings.rs")).unwrap();
    Registry::new(Api::Gl, (4, 5), Profile::Compatibility, Fallbacks::All, [
        "GL_APPLE_fence",
        "GL_SGIS_detail_texture",
        "GL_NV_texture_multisample",
    ])
    .write_bindings(StructGenerator, &mut file)
    .unwrap();

    let mut file = File::create(Path::new(&dest).join("egl_bindings.rs")).unwrap();
    Registry::new(Api::Egl, (1, 5), Profile::Core, Fallbacks::All, [
        "EGL_KHR_create_context",
        "EGL_EXT_create_context_robustness",
        "EGL_KHR_create_context_no_error",
        "EGL_KHR_platform_x11",
        "EGL_KHR_platform_android",
        "EGL_KHR_platform_wayland",
        "EGL_KHR_platform_gbm",
        "EGL_EXT_platform_base",
        "EGL_EXT_platform_x11",
        "EGL_MESA_platform_gbm",
        "EGL_EXT_platform_wayland",
        "EGL_EXT_platform_device",
    ])
    .write_bindings(StructGenerator, &mut file)
    .unwrap();
}
