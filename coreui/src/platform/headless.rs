//! In-memory platform.
//!
//! Windows are plain records and the message queue is a channel, which makes
//! the adapter usable without a window system and fully scriptable from tests.

use std::collections::{HashMap, HashSet};
use std::ffi::c_void;
use std::io;
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use log::trace;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::geometry::{self, FrameMetrics, Point, Rect, Size};
use crate::input::KeyCode;
use crate::platform::win32::translate;
use crate::platform::{
    ClassRegistry, Dispatch, Message, MessageSink, MonitorInfo, Platform, Pump, RawHandle,
    RenderContext, SavedStyle, Waker,
};
use crate::style::NativeWindowStyles;

const DEFAULT_METRICS: FrameMetrics =
    FrameMetrics { border: Size::new(1, 1), size_frame: Size::new(4, 4), caption: 23 };

const DEFAULT_MONITOR: MonitorInfo = MonitorInfo {
    area: Rect { x: 0, y: 0, width: 1920, height: 1080 },
    work_area: Rect { x: 0, y: 0, width: 1920, height: 1040 },
};

enum Event {
    Message(RawHandle, Message),
    Stop,
    Quit,
}

struct HeadlessWindow {
    frame: Rect,
    styles: NativeWindowStyles,
    visible: bool,
    caption: String,
    tracking_leave: bool,
    sink: Arc<dyn MessageSink>,
    swaps: Arc<AtomicUsize>,
}

#[derive(Default)]
struct Inner {
    next_handle: isize,
    classes: HashSet<String>,
    windows: HashMap<RawHandle, HeadlessWindow>,
    cursor_position: Option<(RawHandle, Point)>,
    cursor_visible: bool,
}

pub struct Headless {
    inner: Mutex<Inner>,
    sender: Mutex<Sender<Event>>,
    receiver: Mutex<Receiver<Event>>,
    registry: ClassRegistry,
    metrics: FrameMetrics,
    monitor: MonitorInfo,
}

impl Default for Headless {
    fn default() -> Self {
        Self::new()
    }
}

impl Headless {
    pub fn new() -> Self {
        Self::with_metrics(DEFAULT_METRICS, DEFAULT_MONITOR)
    }

    pub fn with_metrics(metrics: FrameMetrics, monitor: MonitorInfo) -> Self {
        let (sender, receiver) = mpsc::channel();
        let inner = Inner { next_handle: 1, cursor_visible: true, ..Default::default() };

        Self {
            inner: Mutex::new(inner),
            sender: Mutex::new(sender),
            receiver: Mutex::new(receiver),
            registry: ClassRegistry::new(),
            metrics,
            monitor,
        }
    }

    /// Queue `message` for `handle`; delivered by the next [`Platform::pump`].
    pub fn post(&self, handle: RawHandle, message: Message) {
        let _ = self.sender.lock().send(Event::Message(handle, message));
    }

    /// Queue a virtual key transition, dropping keys without a [`KeyCode`].
    pub fn post_virtual_key(&self, handle: RawHandle, virtual_key: u16, down: bool) {
        match translate::key_code(virtual_key) {
            Some(key) if down => self.post(handle, Message::KeyDown(key)),
            Some(key) => self.post(handle, Message::KeyUp(key)),
            None => trace!("Dropping untranslatable virtual key 0x{:02X}", virtual_key),
        }
    }

    /// Queue the platform quit message.
    pub fn post_quit(&self) {
        let _ = self.sender.lock().send(Event::Quit);
    }

    pub fn is_registered(&self, class: &str) -> bool {
        self.inner.lock().classes.contains(class)
    }

    pub fn window_count(&self) -> usize {
        self.inner.lock().windows.len()
    }

    pub fn is_visible(&self, handle: RawHandle) -> bool {
        self.inner.lock().windows.get(&handle).map_or(false, |window| window.visible)
    }

    pub fn caption(&self, handle: RawHandle) -> Option<String> {
        self.inner.lock().windows.get(&handle).map(|window| window.caption.clone())
    }

    pub fn is_tracking_leave(&self, handle: RawHandle) -> bool {
        self.inner.lock().windows.get(&handle).map_or(false, |window| window.tracking_leave)
    }

    /// Number of buffer swaps presented by the window's context.
    pub fn swap_count(&self, handle: RawHandle) -> usize {
        let inner = self.inner.lock();
        inner.windows.get(&handle).map_or(0, |window| window.swaps.load(Ordering::Relaxed))
    }

    pub fn cursor_position(&self) -> Option<(RawHandle, Point)> {
        self.inner.lock().cursor_position
    }

    pub fn cursor_visible(&self) -> bool {
        self.inner.lock().cursor_visible
    }

    fn with_window<T, F>(&self, handle: RawHandle, f: F) -> Result<T>
    where
        F: FnOnce(&mut HeadlessWindow) -> T,
    {
        let mut inner = self.inner.lock();
        match inner.windows.get_mut(&handle) {
            Some(window) => Ok(f(window)),
            None => Err(invalid_handle()),
        }
    }

    /// Deliver `message` synchronously, without holding any lock.
    fn send(&self, handle: RawHandle, message: Message) -> Dispatch {
        let sink = match self.inner.lock().windows.get(&handle) {
            Some(window) => window.sink.clone(),
            None => return Dispatch::Default,
        };

        sink.dispatch(message)
    }

    fn client_size_of(&self, window: &HeadlessWindow) -> Size {
        geometry::frame_to_client_size(window.frame.size(), window.styles, &self.metrics)
    }
}

impl Platform for Headless {
    fn classes(&self) -> &ClassRegistry {
        &self.registry
    }

    fn register_class(&self, class: &str) -> Result<()> {
        self.inner.lock().classes.insert(class.to_owned());
        Ok(())
    }

    fn unregister_class(&self, class: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        if !inner.classes.remove(class) {
            return Err(Error::Os {
                call: "unregister_class",
                source: io::Error::new(io::ErrorKind::NotFound, "class not registered"),
            });
        }

        Ok(())
    }

    fn create_window(
        &self,
        class: &str,
        frame: Rect,
        styles: NativeWindowStyles,
        sink: Arc<dyn MessageSink>,
    ) -> Result<RawHandle> {
        let handle = {
            let mut inner = self.inner.lock();
            if !inner.classes.contains(class) {
                return Err(Error::Os {
                    call: "create_window",
                    source: io::Error::new(io::ErrorKind::NotFound, "class not registered"),
                });
            }

            let handle = RawHandle(inner.next_handle);
            inner.next_handle += 1;

            let window = HeadlessWindow {
                frame,
                styles: styles.normalized(),
                visible: false,
                caption: String::new(),
                tracking_leave: false,
                swaps: Arc::new(AtomicUsize::new(0)),
                sink,
            };
            inner.windows.insert(handle, window);

            handle
        };

        if self.send(handle, Message::Created(handle)) == Dispatch::Failed {
            self.send(handle, Message::Destroyed);
            self.inner.lock().windows.remove(&handle);
            return Err(Error::Os {
                call: "create_window",
                source: io::Error::new(io::ErrorKind::Other, "creation aborted by the window"),
            });
        }

        let client = self.client_size(handle)?;
        self.send(handle, Message::Size(client));

        Ok(handle)
    }

    fn destroy_window(&self, handle: RawHandle) -> Result<()> {
        self.send(handle, Message::Destroyed);

        match self.inner.lock().windows.remove(&handle) {
            Some(_) => Ok(()),
            None => Err(invalid_handle()),
        }
    }

    fn frame_rect(
        &self,
        origin: Point,
        client: Size,
        styles: NativeWindowStyles,
    ) -> Result<Rect> {
        Ok(geometry::client_to_frame(origin, client, styles, &self.metrics))
    }

    fn window_rect(&self, handle: RawHandle) -> Result<Rect> {
        self.with_window(handle, |window| window.frame)
    }

    fn client_size(&self, handle: RawHandle) -> Result<Size> {
        let inner = self.inner.lock();
        let window = inner.windows.get(&handle).ok_or_else(invalid_handle)?;
        Ok(self.client_size_of(window))
    }

    fn set_window_pos(
        &self,
        handle: RawHandle,
        origin: Option<Point>,
        size: Option<Size>,
    ) -> Result<()> {
        let resized = {
            let mut inner = self.inner.lock();
            let window = inner.windows.get_mut(&handle).ok_or_else(invalid_handle)?;

            if let Some(origin) = origin {
                window.frame.x = origin.x;
                window.frame.y = origin.y;
            }

            match size {
                Some(size) if size != window.frame.size() => {
                    window.frame.width = size.width;
                    window.frame.height = size.height;
                    Some(self.client_size_of(window))
                },
                _ => None,
            }
        };

        if let Some(client) = resized {
            self.send(handle, Message::Size(client));
        }

        Ok(())
    }

    fn styles(&self, handle: RawHandle) -> Result<NativeWindowStyles> {
        self.with_window(handle, |window| window.styles)
    }

    fn set_styles(&self, handle: RawHandle, styles: NativeWindowStyles) -> Result<()> {
        let metrics = self.metrics;
        self.with_window(handle, |window| {
            let client =
                geometry::frame_to_client_size(window.frame.size(), window.styles, &metrics);
            window.styles = styles.normalized();
            window.frame =
                geometry::client_to_frame(window.frame.origin(), client, window.styles, &metrics);
        })
    }

    fn enter_fullscreen_style(&self, handle: RawHandle) -> Result<SavedStyle> {
        self.with_window(handle, |window| {
            let saved = SavedStyle { style: window.styles.bits(), ex_style: 0 };
            window.styles.remove(NativeWindowStyles::CAPTION | NativeWindowStyles::RESIZEABLE);
            saved
        })
    }

    fn restore_style(&self, handle: RawHandle, saved: SavedStyle) -> Result<()> {
        self.with_window(handle, |window| {
            window.styles = NativeWindowStyles::from_bits_truncate(saved.style);
        })
    }

    fn monitor_info(&self, handle: RawHandle) -> Result<MonitorInfo> {
        self.with_window(handle, |_| self.monitor)
    }

    fn show(&self, handle: RawHandle, visible: bool) -> Result<()> {
        self.with_window(handle, |window| window.visible = visible)
    }

    fn invalidate(&self, handle: RawHandle) -> Result<()> {
        self.with_window(handle, |_| ())?;
        self.post(handle, Message::Paint);
        Ok(())
    }

    fn set_caption(&self, handle: RawHandle, caption: &str) -> Result<()> {
        self.with_window(handle, |window| window.caption = caption.to_owned())
    }

    fn set_cursor_position(&self, handle: RawHandle, position: Point) -> Result<()> {
        self.with_window(handle, |_| ())?;
        self.inner.lock().cursor_position = Some((handle, position));
        Ok(())
    }

    fn set_cursor_visible(&self, visible: bool) -> Result<()> {
        self.inner.lock().cursor_visible = visible;
        Ok(())
    }

    fn track_mouse_leave(&self, handle: RawHandle) -> Result<()> {
        self.with_window(handle, |window| window.tracking_leave = true)
    }

    fn emulate_key(&self, handle: RawHandle, key: KeyCode, down: bool) -> Result<()> {
        self.with_window(handle, |_| ())?;

        let message = if down { Message::KeyDown(key) } else { Message::KeyUp(key) };
        self.send(handle, message);

        Ok(())
    }

    fn pump(&self) -> Result<Pump> {
        let event = self.receiver.lock().recv();
        match event {
            Ok(Event::Message(handle, message)) => {
                if message == Message::MouseLeave {
                    let _ = self.with_window(handle, |window| window.tracking_leave = false);
                }

                self.send(handle, message);
                Ok(Pump::Continue)
            },
            Ok(Event::Stop) => Ok(Pump::Stop),
            Ok(Event::Quit) | Err(_) => Ok(Pump::Quit),
        }
    }

    fn waker(&self) -> Arc<dyn Waker> {
        Arc::new(HeadlessWaker { sender: Mutex::new(self.sender.lock().clone()) })
    }

    fn create_context(&self, handle: RawHandle) -> Result<Box<dyn RenderContext>> {
        let swaps = self.with_window(handle, |window| window.swaps.clone())?;
        Ok(Box::new(HeadlessContext { swaps }))
    }
}

struct HeadlessWaker {
    sender: Mutex<Sender<Event>>,
}

impl Waker for HeadlessWaker {
    fn wake_stop(&self) -> Result<()> {
        self.sender.lock().send(Event::Stop).map_err(|_| Error::Os {
            call: "wake_stop",
            source: io::Error::new(io::ErrorKind::BrokenPipe, "message queue closed"),
        })
    }
}

/// Context without any GL entry points.
struct HeadlessContext {
    swaps: Arc<AtomicUsize>,
}

impl RenderContext for HeadlessContext {
    fn make_current(&self) -> Result<()> {
        Ok(())
    }

    fn swap_buffers(&self) -> Result<()> {
        self.swaps.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn get_proc_address(&self, _symbol: &str) -> *const c_void {
        ptr::null()
    }
}

fn invalid_handle() -> Error {
    Error::Os {
        call: "headless",
        source: io::Error::new(io::ErrorKind::InvalidInput, "invalid window handle"),
    }
}
