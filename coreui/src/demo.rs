//! Window handler of the demo executable.

use std::time::Instant;

use log::{debug, info, warn};

use coreui::{KeyCode, MouseButtons, NativeWindow, Point, RenderContext, Size, WindowHandler};
use opengl::gl::{self, Gl};

use crate::config::{Bindings, Config};

/// Clears the window with a color cycling over time.
pub struct Demo {
    gl: Option<Gl>,
    bindings: Bindings,
    print_events: bool,
    frame_limit: Option<u64>,
    frames: u64,
    start: Instant,
}

impl Demo {
    pub fn new(config: &Config) -> Self {
        Self {
            gl: None,
            bindings: config.bindings,
            print_events: config.debug.print_events,
            frame_limit: config.debug.frames,
            frames: 0,
            start: Instant::now(),
        }
    }

    fn print_event(&self, event: std::fmt::Arguments<'_>) {
        if self.print_events {
            info!("window event: {}", event);
        }
    }

    fn stop(window: &dyn NativeWindow) {
        if let Err(err) = window.stop() {
            warn!("Unable to stop the message loop: {}", err);
        }
    }
}

/// Background color at `seconds` since startup.
fn clear_color(seconds: f32) -> [f32; 4] {
    let phase = |offset: f32| 0.5 + 0.5 * (seconds + offset).sin();
    [phase(0.), phase(2.094), phase(4.189), 1.]
}

impl WindowHandler for Demo {
    fn on_created(&mut self, window: &dyn NativeWindow, context: &dyn RenderContext) {
        self.print_event(format_args!("Created {:?}", window.raw_handle()));

        let gl = Gl::load_with(|symbol| context.get_proc_address(symbol));
        if !gl.Clear.is_loaded() || !gl.ClearColor.is_loaded() {
            info!("No OpenGL entry points available, rendering is disabled");
            return;
        }

        if let Some(renderer) = gl.get_string(gl::RENDERER) {
            info!("Running on {}", renderer);
        }
        if let Some(version) = gl.get_string(gl::VERSION) {
            info!("OpenGL version {}", version);
        }

        for feature in [gl::APPLE_FENCE, gl::SGIS_DETAIL_TEXTURE, gl::NV_TEXTURE_MULTISAMPLE] {
            debug!("{} supported: {}", feature.name, gl.supports(&feature));
        }

        self.gl = Some(gl);
    }

    fn on_render(&mut self, window: &dyn NativeWindow) {
        if let Some(gl) = &self.gl {
            if let Ok(size) = window.client_size() {
                gl.viewport(0, 0, size.width as i32, size.height as i32);
            }

            let [red, green, blue, alpha] = clear_color(self.start.elapsed().as_secs_f32());
            gl.clear_color(red, green, blue, alpha);
            gl.clear(gl::COLOR_BUFFER_BIT);
        }
    }

    fn on_context_update(&mut self, window: &dyn NativeWindow) {
        self.frames += 1;

        if self.frame_limit.map_or(false, |limit| self.frames >= limit) {
            info!("Presented {} frames, stopping", self.frames);
            Self::stop(window);
        }
    }

    fn on_resize(&mut self, _window: &dyn NativeWindow, size: Size) {
        self.print_event(format_args!("Resized to {}x{}", size.width, size.height));
    }

    fn on_key_down(&mut self, window: &dyn NativeWindow, key: KeyCode) {
        self.print_event(format_args!("KeyDown {:?}", key));

        if key == self.bindings.quit {
            Self::stop(window);
        } else if key == self.bindings.toggle_fullscreen {
            let fullscreen = !window.fullscreen();
            if let Err(err) = window.set_fullscreen(fullscreen) {
                warn!("Unable to toggle fullscreen: {}", err);
            }
        } else if key == self.bindings.toggle_animation {
            window.set_animation(!window.animation());
            if let Err(err) = window.invalidate() {
                warn!("Unable to repaint: {}", err);
            }
        }
    }

    fn on_key_up(&mut self, _window: &dyn NativeWindow, key: KeyCode) {
        self.print_event(format_args!("KeyUp {:?}", key));
    }

    fn on_mouse_enter(&mut self, _: &dyn NativeWindow, location: Point, _: MouseButtons) {
        self.print_event(format_args!("MouseEnter {:?}", location));
    }

    fn on_mouse_leave(&mut self, _window: &dyn NativeWindow) {
        self.print_event(format_args!("MouseLeave"));
    }

    fn on_mouse_down(&mut self, _: &dyn NativeWindow, location: Point, buttons: MouseButtons) {
        self.print_event(format_args!("MouseDown {:?} {:?}", location, buttons));
    }

    fn on_mouse_up(&mut self, _: &dyn NativeWindow, location: Point, buttons: MouseButtons) {
        self.print_event(format_args!("MouseUp {:?} {:?}", location, buttons));
    }

    fn on_mouse_wheel(
        &mut self,
        _window: &dyn NativeWindow,
        location: Point,
        _buttons: MouseButtons,
        ticks: i32,
    ) {
        self.print_event(format_args!("MouseWheel {:?} {}", location, ticks));
    }

    fn on_close(&mut self, window: &dyn NativeWindow) {
        self.print_event(format_args!("Close"));
        Self::stop(window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_in_range() {
        for step in 0..100 {
            let color = clear_color(step as f32 * 0.1);
            assert!(color.iter().all(|channel| (0. ..=1.).contains(channel)), "{:?}", color);
            assert_eq!(color[3], 1.);
        }
    }
}
