//! Platform independent window adapter.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::geometry::{Point, Size};
use crate::input::KeyCode;
use crate::platform::{RawHandle, Waker};
use crate::style::NativeWindowStyles;

mod adapter;
mod handler;

pub use self::adapter::{Window, CLASS_NAME};
pub use self::handler::WindowHandler;

/// Capabilities of a native window, as seen by its handler.
pub trait NativeWindow {
    /// Native handle, `None` until the window is created.
    fn raw_handle(&self) -> Option<RawHandle>;

    /// Create the native window with a client area of `width` x `height`.
    ///
    /// `x` and `y` position the outer frame.
    fn create(
        &self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        styles: NativeWindowStyles,
    ) -> Result<()>;

    /// Destroy the native window and stop its message loop.
    fn destroy(&self) -> Result<()>;

    /// Pump messages until the loop is stopped. Blocks the calling thread.
    fn run(&self) -> Result<()>;

    /// Stop the running message loop.
    fn stop(&self) -> Result<()>;

    fn stop_handle(&self) -> StopHandle;

    fn is_running(&self) -> bool;

    /// Show the window and schedule a paint.
    fn show(&self) -> Result<()>;

    fn hide(&self) -> Result<()>;

    /// Schedule a paint.
    fn invalidate(&self) -> Result<()>;

    /// Screen position of the outer frame.
    fn location(&self) -> Result<Point>;

    fn set_location(&self, location: Point) -> Result<()>;

    fn client_size(&self) -> Result<Size>;

    fn set_client_size(&self, size: Size) -> Result<()>;

    fn styles(&self) -> Result<NativeWindowStyles>;

    fn set_styles(&self, styles: NativeWindowStyles) -> Result<()>;

    fn supported_styles(&self) -> NativeWindowStyles;

    fn fullscreen(&self) -> bool;

    fn set_fullscreen(&self, fullscreen: bool) -> Result<()>;

    fn set_caption(&self, caption: &str) -> Result<()>;

    /// Move the cursor to `position` in client coordinates.
    fn set_cursor_position(&self, position: Point) -> Result<()>;

    fn cursor_visible(&self) -> bool;

    fn set_cursor_visible(&self, visible: bool) -> Result<()>;

    /// Whether every paint schedules the next one.
    fn animation(&self) -> bool;

    fn set_animation(&self, animation: bool);

    /// Press and release `key` as if it was typed.
    fn emulate_key_press(&self, key: KeyCode) -> Result<()>;
}

/// Thread safe handle stopping a window's message loop.
#[derive(Clone)]
pub struct StopHandle {
    waker: Arc<Mutex<Option<Arc<dyn Waker>>>>,
}

impl StopHandle {
    pub(crate) fn new(waker: Arc<Mutex<Option<Arc<dyn Waker>>>>) -> Self {
        Self { waker }
    }

    /// Post the stop request to the running loop.
    pub fn stop(&self) -> Result<()> {
        let waker = self.waker.lock().clone().ok_or(Error::LoopNotRunning)?;
        waker.wake_stop()
    }

    pub fn is_running(&self) -> bool {
        self.waker.lock().is_some()
    }
}
