//! OpenGL 4.5 compatibility profile with the vendor extensions the crate wraps.

#![allow(clippy::all, non_upper_case_globals, missing_docs)]

include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));

mod apple_fence;
mod commands;
mod features;
mod nv_texture_multisample;
mod sgis_detail_texture;

pub use self::features::{Feature, APPLE_FENCE, NV_TEXTURE_MULTISAMPLE, SGIS_DETAIL_TEXTURE};

// SAFETY: The generated table is already `Send`; its entry points are immutable
// after loading and valid on every thread.
unsafe impl Sync for Gl {}
