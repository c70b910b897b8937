//! Per OS window system seam.
//!
//! [`Platform`] is everything the window adapter needs from the native window
//! system. Native messages are translated into [`Message`]s and delivered to the
//! window's [`MessageSink`], possibly from inside another platform call, so
//! implementations must not hold their own locks while dispatching.

use std::ffi::c_void;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::geometry::{Point, Rect, Size};
use crate::input::{KeyCode, MouseButtons};
use crate::style::NativeWindowStyles;

pub mod headless;
pub mod win32;

pub use self::headless::Headless;
#[cfg(windows)]
pub use self::win32::Win32;

/// Platform selected at build time.
#[cfg(windows)]
pub type DefaultPlatform = Win32;
#[cfg(not(windows))]
pub type DefaultPlatform = Headless;

/// Opaque native window identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawHandle(pub isize);

/// Native window message, already translated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Message {
    /// Window was created; sent before `create_window` returns.
    Created(RawHandle),
    Destroyed,
    Paint,
    /// Client area was resized.
    Size(Size),
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseMove(Point, MouseButtons),
    MouseLeave,
    MouseDown(Point, MouseButtons),
    MouseUp(Point, MouseButtons),
    MouseDoubleClick(Point, MouseButtons),
    /// Wheel rotation in ticks.
    MouseWheel(Point, MouseButtons, i32),
    Close,
}

/// Result of dispatching a message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Handled,

    /// Let the platform run its default handling.
    Default,

    /// Abort the native operation which produced the message.
    Failed,
}

/// Receiver of the messages of one native window.
pub trait MessageSink: Send + Sync {
    fn dispatch(&self, message: Message) -> Dispatch;
}

/// Device context and GL context pair of a native window.
pub trait RenderContext: Send {
    fn make_current(&self) -> Result<()>;

    fn swap_buffers(&self) -> Result<()>;

    /// Address of a GL entry point, null when unavailable.
    fn get_proc_address(&self, symbol: &str) -> *const c_void;
}

/// Thread safe handle waking up the message loop.
pub trait Waker: Send + Sync {
    /// Post the stop sentinel to the loop.
    fn wake_stop(&self) -> Result<()>;
}

/// Outcome of a single [`Platform::pump`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pump {
    Continue,

    /// Stop sentinel received.
    Stop,

    /// Platform quit message received.
    Quit,
}

/// Native style bits saved while fullscreen.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SavedStyle {
    pub style: u32,
    pub ex_style: u32,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MonitorInfo {
    pub area: Rect,
    pub work_area: Rect,
}

pub trait Platform: Send + Sync + 'static {
    /// Reference counts of the classes registered through this platform.
    fn classes(&self) -> &ClassRegistry;

    fn register_class(&self, class: &str) -> Result<()>;

    fn unregister_class(&self, class: &str) -> Result<()>;

    /// Create a hidden window with the outer rectangle `frame`.
    fn create_window(
        &self,
        class: &str,
        frame: Rect,
        styles: NativeWindowStyles,
        sink: Arc<dyn MessageSink>,
    ) -> Result<RawHandle>;

    fn destroy_window(&self, handle: RawHandle) -> Result<()>;

    /// Outer rectangle at `origin` of a window whose client area is `client`.
    fn frame_rect(&self, origin: Point, client: Size, styles: NativeWindowStyles) -> Result<Rect>;

    /// Outer rectangle of the window.
    fn window_rect(&self, handle: RawHandle) -> Result<Rect>;

    fn client_size(&self, handle: RawHandle) -> Result<Size>;

    /// Move and/or resize the outer rectangle.
    fn set_window_pos(
        &self,
        handle: RawHandle,
        origin: Option<Point>,
        size: Option<Size>,
    ) -> Result<()>;

    fn styles(&self, handle: RawHandle) -> Result<NativeWindowStyles>;

    /// Replace the decorations while keeping the client rectangle in place.
    fn set_styles(&self, handle: RawHandle, styles: NativeWindowStyles) -> Result<()>;

    /// Strip caption and sizing frame, returning the previous native styles.
    fn enter_fullscreen_style(&self, handle: RawHandle) -> Result<SavedStyle>;

    fn restore_style(&self, handle: RawHandle, saved: SavedStyle) -> Result<()>;

    /// Monitor nearest to the window, falling back to the primary one.
    fn monitor_info(&self, handle: RawHandle) -> Result<MonitorInfo>;

    fn show(&self, handle: RawHandle, visible: bool) -> Result<()>;

    fn invalidate(&self, handle: RawHandle) -> Result<()>;

    fn set_caption(&self, handle: RawHandle, caption: &str) -> Result<()>;

    /// Move the cursor to `position` in client coordinates.
    fn set_cursor_position(&self, handle: RawHandle, position: Point) -> Result<()>;

    fn set_cursor_visible(&self, visible: bool) -> Result<()>;

    /// Request a [`Message::MouseLeave`] once the cursor leaves the window.
    fn track_mouse_leave(&self, handle: RawHandle) -> Result<()>;

    /// Synthesize a key transition as if it came from the keyboard.
    fn emulate_key(&self, handle: RawHandle, key: KeyCode, down: bool) -> Result<()>;

    /// Wait for the next message of the calling thread and dispatch it.
    fn pump(&self) -> Result<Pump>;

    /// Waker for the loop running on the calling thread.
    fn waker(&self) -> Arc<dyn Waker>;

    fn create_context(&self, handle: RawHandle) -> Result<Box<dyn RenderContext>>;
}

/// Process wide reference count of registered window classes.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: Mutex<Vec<(String, usize)>>,
}

impl ClassRegistry {
    pub const fn new() -> Self {
        Self { classes: parking_lot::const_mutex(Vec::new()) }
    }

    /// Take a reference to `class`, running `register` for the first one.
    pub fn acquire<F>(&self, class: &str, register: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        let mut classes = self.classes.lock();
        if let Some((_, count)) = classes.iter_mut().find(|(name, _)| name == class) {
            *count += 1;
            return Ok(());
        }

        register()?;
        classes.push((class.to_owned(), 1));

        Ok(())
    }

    /// Drop a reference to `class`, running `unregister` for the last one.
    pub fn release<F>(&self, class: &str, unregister: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        let mut classes = self.classes.lock();
        let index = match classes.iter().position(|(name, _)| name == class) {
            Some(index) => index,
            None => return Ok(()),
        };

        classes[index].1 -= 1;
        if classes[index].1 == 0 {
            classes.swap_remove(index);
            unregister()?;
        }

        Ok(())
    }

    pub fn count(&self, class: &str) -> usize {
        let classes = self.classes.lock();
        classes.iter().find(|(name, _)| name == class).map_or(0, |(_, count)| *count)
    }
}
