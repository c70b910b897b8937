use crate::geometry::{Point, Size};
use crate::input::{KeyCode, MouseButtons};
use crate::platform::RenderContext;
use crate::window::NativeWindow;

/// Receiver of window events.
///
/// Every event is delivered on the thread running the window's message loop.
/// Events triggered while the handler is already running, for example by
/// resizing the window from `on_key_down`, are delivered right after the
/// running callback returns.
#[allow(unused_variables)]
pub trait WindowHandler: Send {
    /// Native window and render context were created; the context is current.
    fn on_created(&mut self, window: &dyn NativeWindow, context: &dyn RenderContext) {}

    fn on_render(&mut self, window: &dyn NativeWindow) {}

    /// Called after `on_render`, right before the buffers are swapped.
    fn on_context_update(&mut self, window: &dyn NativeWindow) {}

    fn on_resize(&mut self, window: &dyn NativeWindow, size: Size) {}

    fn on_key_down(&mut self, window: &dyn NativeWindow, key: KeyCode) {}

    fn on_key_up(&mut self, window: &dyn NativeWindow, key: KeyCode) {}

    fn on_mouse_enter(
        &mut self,
        window: &dyn NativeWindow,
        location: Point,
        buttons: MouseButtons,
    ) {
    }

    fn on_mouse_leave(&mut self, window: &dyn NativeWindow) {}

    fn on_mouse_move(
        &mut self,
        window: &dyn NativeWindow,
        location: Point,
        buttons: MouseButtons,
    ) {
    }

    fn on_mouse_down(
        &mut self,
        window: &dyn NativeWindow,
        location: Point,
        buttons: MouseButtons,
    ) {
    }

    fn on_mouse_up(
        &mut self,
        window: &dyn NativeWindow,
        location: Point,
        buttons: MouseButtons,
    ) {
    }

    fn on_mouse_double_click(
        &mut self,
        window: &dyn NativeWindow,
        location: Point,
        buttons: MouseButtons,
    ) {
    }

    fn on_mouse_wheel(
        &mut self,
        window: &dyn NativeWindow,
        location: Point,
        buttons: MouseButtons,
        ticks: i32,
    ) {
    }

    /// The user asked to close the window.
    fn on_close(&mut self, window: &dyn NativeWindow) {}
}

impl WindowHandler for () {}
