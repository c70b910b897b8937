/// Call a generated Khronos entry point.
///
/// Arguments must be plain identifiers so their values can be written to the
/// call log after the call.
#[macro_export]
macro_rules! khronos_call {
    ($api:expr, $prefix:literal, $command:ident($($arg:ident),* $(,)?)) => {{
        let api = $api;
        debug_assert!(
            api.$command.is_loaded(),
            concat!($prefix, stringify!($command), " not implemented")
        );

        #[allow(unused_unsafe, clippy::let_unit_value)]
        let ret = unsafe { api.$command($($arg),*) };

        if $crate::call_log_enabled() {
            $crate::__log::trace!(
                target: "opengl::call",
                concat!($prefix, stringify!($command), "{:?} = {:?}"),
                ($($arg,)*),
                ret
            );
        }

        $crate::khronos::debug_check_errors(api, concat!($prefix, stringify!($command)));

        ret
    }};
}

/// Shorthand for [`khronos_call!`] on a [`crate::gl::Gl`] table.
macro_rules! gl_call {
    ($api:expr, $($call:tt)*) => {
        khronos_call!($api, "gl", $($call)*)
    };
}

/// Shorthand for [`khronos_call!`] on a [`crate::egl::Egl`] table.
macro_rules! egl_call {
    ($api:expr, $($call:tt)*) => {
        khronos_call!($api, "egl", $($call)*)
    };
}
