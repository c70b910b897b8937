use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};

use log::{debug, error, info, trace, warn};
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::geometry::{Point, Size};
use crate::input::{KeyCode, MouseButtons};
use crate::platform::{
    DefaultPlatform, Dispatch, Message, MessageSink, Platform, Pump, RawHandle, RenderContext,
    SavedStyle, Waker,
};
use crate::style::NativeWindowStyles;
use crate::window::{NativeWindow, StopHandle, WindowHandler};

/// Window class shared by all adapter windows.
pub const CLASS_NAME: &str = "CoreUI.NativeWindow";

/// Geometry and native styles to restore when leaving fullscreen.
#[derive(Debug, Copy, Clone)]
struct Restore {
    location: Point,
    client_size: Size,
    styles: NativeWindowStyles,
    saved: SavedStyle,
}

#[derive(Debug)]
struct State {
    handle: Option<RawHandle>,

    /// Thread which created the native window.
    owner: Option<ThreadId>,

    /// Class reference held by this window.
    class: Option<&'static str>,

    fullscreen: Option<Restore>,
    cursor_visible: bool,
}

type WakerSlot = Arc<Mutex<Option<Arc<dyn Waker>>>>;

struct Shared<P: Platform> {
    platform: Arc<P>,
    state: Mutex<State>,
    handler: Mutex<Box<dyn WindowHandler>>,

    /// Render context, taken out while a paint is in progress.
    context: Mutex<Option<Box<dyn RenderContext>>>,

    /// Waker of the running loop, `None` while stopped.
    waker: WakerSlot,

    /// Messages raised while the handler was running.
    pending: Mutex<VecDeque<Message>>,

    animation: AtomicBool,
    tracking_leave: AtomicBool,
}

/// Native window adapter over the platform `P`.
///
/// State lives behind short lock sections which are never held across platform
/// calls, since those may synchronously dispatch messages back to the window.
pub struct Window<P: Platform = DefaultPlatform> {
    shared: Arc<Shared<P>>,
}

impl<P: Platform> Window<P> {
    pub fn new<H: WindowHandler + 'static>(platform: Arc<P>, handler: H) -> Self {
        let state = State {
            handle: None,
            owner: None,
            class: None,
            fullscreen: None,
            cursor_visible: true,
        };

        let shared = Shared {
            platform,
            state: Mutex::new(state),
            handler: Mutex::new(Box::new(handler)),
            context: Mutex::new(None),
            waker: Arc::new(Mutex::new(None)),
            pending: Mutex::new(VecDeque::new()),
            animation: AtomicBool::new(false),
            tracking_leave: AtomicBool::new(false),
        };

        Self { shared: Arc::new(shared) }
    }

    pub fn platform(&self) -> &Arc<P> {
        &self.shared.platform
    }

    fn handle(&self) -> Result<RawHandle> {
        self.shared.state.lock().handle.ok_or(Error::NoHandle)
    }

    /// Handle of a window owned by the calling thread.
    fn owned_handle(&self) -> Result<RawHandle> {
        let state = self.shared.state.lock();
        let handle = state.handle.ok_or(Error::NoHandle)?;

        if state.owner != Some(thread::current().id()) {
            return Err(Error::CrossThread);
        }

        Ok(handle)
    }

    /// Handle of an owned window whose geometry may change.
    fn mutable_handle(&self) -> Result<RawHandle> {
        let handle = self.owned_handle()?;

        if self.shared.state.lock().fullscreen.is_some() {
            return Err(Error::Fullscreen);
        }

        Ok(handle)
    }

    fn with_handler<F>(&self, f: F)
    where
        F: FnOnce(&mut dyn WindowHandler, &dyn NativeWindow),
    {
        match self.shared.handler.try_lock() {
            Some(mut handler) => f(&mut **handler, self),
            None => warn!("Window handler is busy, dropping event"),
        }
    }

    fn dispatch(&self, message: Message) -> Dispatch {
        match message {
            Message::Created(handle) => return self.created(handle),
            Message::Destroyed => {
                self.shared.state.lock().handle = None;
                let context = self.shared.context.lock().take();
                drop(context);
                debug!("Native window destroyed");
                return Dispatch::Handled;
            },
            Message::MouseLeave => self.shared.tracking_leave.store(false, Ordering::Relaxed),
            _ => (),
        }

        self.notify(message);

        Dispatch::Handled
    }

    /// Deliver `message` to the handler.
    ///
    /// Messages raised while the handler is running are queued and delivered
    /// in order once it returns.
    fn notify(&self, message: Message) {
        if self.shared.handler.is_locked() {
            trace!("Deferring {:?} until the handler returns", message);
            self.shared.pending.lock().push_back(message);
            return;
        }

        match message {
            Message::Created(_) => self.notify_created(),
            Message::Destroyed => (),
            Message::Paint => self.paint(),
            Message::Size(size) => {
                self.with_handler(|handler, window| handler.on_resize(window, size));
            },
            Message::KeyDown(key) => {
                self.with_handler(|handler, window| handler.on_key_down(window, key));
            },
            Message::KeyUp(key) => {
                self.with_handler(|handler, window| handler.on_key_up(window, key));
            },
            Message::MouseMove(location, buttons) => self.mouse_move(location, buttons),
            Message::MouseLeave => {
                self.with_handler(|handler, window| handler.on_mouse_leave(window));
            },
            Message::MouseDown(location, buttons) => {
                self.with_handler(|handler, window| {
                    handler.on_mouse_down(window, location, buttons)
                });
            },
            Message::MouseUp(location, buttons) => {
                self.with_handler(|handler, window| handler.on_mouse_up(window, location, buttons));
            },
            Message::MouseDoubleClick(location, buttons) => {
                self.with_handler(|handler, window| {
                    handler.on_mouse_double_click(window, location, buttons)
                });
            },
            Message::MouseWheel(location, buttons, ticks) => {
                self.with_handler(|handler, window| {
                    handler.on_mouse_wheel(window, location, buttons, ticks)
                });
            },
            Message::Close => self.with_handler(|handler, window| handler.on_close(window)),
        }

        self.flush_pending();
    }

    fn flush_pending(&self) {
        loop {
            let message = self.shared.pending.lock().pop_front();
            match message {
                Some(message) => self.notify(message),
                None => return,
            }
        }
    }

    fn created(&self, handle: RawHandle) -> Dispatch {
        self.shared.state.lock().handle = Some(handle);

        let context = match self.shared.platform.create_context(handle) {
            Ok(context) => context,
            Err(err) => {
                error!("Unable to create render context: {}", err);
                return Dispatch::Failed;
            },
        };

        // Handlers allocate GL resources as soon as they are notified.
        if let Err(err) = context.make_current() {
            error!("Unable to make render context current: {}", err);
            return Dispatch::Failed;
        }

        *self.shared.context.lock() = Some(context);
        self.notify(Message::Created(handle));

        Dispatch::Handled
    }

    fn notify_created(&self) {
        let context = self.shared.context.lock().take();

        match &context {
            Some(context) => {
                self.with_handler(|handler, window| handler.on_created(window, &**context));
            },
            None => debug!("Window destroyed before its creation was delivered"),
        }

        self.restore_context(context);
    }

    fn paint(&self) {
        let context = self.shared.context.lock().take();

        if let Some(Err(err)) = context.as_ref().map(|context| context.make_current()) {
            error!("Unable to make render context current: {}", err);
        }

        self.with_handler(|handler, window| {
            handler.on_render(window);
            handler.on_context_update(window);
        });

        if let Some(Err(err)) = context.as_ref().map(|context| context.swap_buffers()) {
            error!("Unable to swap buffers: {}", err);
        }

        self.restore_context(context);

        let handle = self.shared.state.lock().handle;
        if let (true, Some(handle)) = (self.shared.animation.load(Ordering::Relaxed), handle) {
            if let Err(err) = self.shared.platform.invalidate(handle) {
                warn!("Unable to schedule the next animation frame: {}", err);
            }
        }
    }

    /// Put the context back unless the window was destroyed meanwhile.
    fn restore_context(&self, context: Option<Box<dyn RenderContext>>) {
        let handle = self.shared.state.lock().handle;
        if let (Some(context), Some(_)) = (context, handle) {
            let mut slot = self.shared.context.lock();
            if slot.is_none() {
                *slot = Some(context);
            }
        }
    }

    fn mouse_move(&self, location: Point, buttons: MouseButtons) {
        // There is no native enter message, the first move after a leave emulates it.
        let entered = !self.shared.tracking_leave.swap(true, Ordering::Relaxed);

        self.with_handler(|handler, window| {
            if entered {
                handler.on_mouse_enter(window, location, buttons);
            }
            handler.on_mouse_move(window, location, buttons);
        });

        if entered {
            let tracked =
                self.handle().and_then(|handle| self.shared.platform.track_mouse_leave(handle));
            if let Err(err) = tracked {
                warn!("Unable to track mouse leave: {}", err);
                self.shared.tracking_leave.store(false, Ordering::Relaxed);
            }
        }
    }
}

impl<P: Platform> NativeWindow for Window<P> {
    fn raw_handle(&self) -> Option<RawHandle> {
        self.shared.state.lock().handle
    }

    fn create(
        &self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        styles: NativeWindowStyles,
    ) -> Result<()> {
        let platform = &self.shared.platform;
        let styles = styles.normalized();
        let client = Size::new(width, height);
        let frame = platform.frame_rect(Point::new(x, y), client, styles)?;

        {
            let mut state = self.shared.state.lock();
            if state.owner.is_some() {
                return Err(Error::AlreadyCreated);
            }

            // Claimed before creation, since creation already dispatches messages.
            state.owner = Some(thread::current().id());
        }

        let registered =
            platform.classes().acquire(CLASS_NAME, || platform.register_class(CLASS_NAME));
        if let Err(err) = registered {
            self.shared.state.lock().owner = None;
            return Err(err);
        }
        self.shared.state.lock().class = Some(CLASS_NAME);

        let sink: Arc<dyn MessageSink> = Arc::new(Sink { shared: Arc::downgrade(&self.shared) });
        match platform.create_window(CLASS_NAME, frame, styles, sink) {
            Ok(handle) => {
                self.shared.state.lock().handle = Some(handle);
                info!("Created window {:?} with {}x{} client area", handle, width, height);
                Ok(())
            },
            Err(err) => {
                error!("Unable to create window: {}", err);
                if let Err(err) = self.shared.teardown() {
                    warn!("Unable to release the window class: {}", err);
                }
                Err(err)
            },
        }
    }

    fn destroy(&self) -> Result<()> {
        self.owned_handle()?;

        if self.is_running() {
            self.stop()?;
        }

        self.shared.teardown()
    }

    fn run(&self) -> Result<()> {
        {
            let state = self.shared.state.lock();
            if state.owner.map_or(false, |owner| owner != thread::current().id()) {
                return Err(Error::CrossThread);
            }
        }

        let waker = self.shared.platform.waker();
        {
            let mut slot = self.shared.waker.lock();
            if slot.is_some() {
                return Err(Error::LoopRunning);
            }
            *slot = Some(waker);
        }
        let _running = LoopGuard { slot: &self.shared.waker };

        debug!("Message loop started");

        loop {
            match self.shared.platform.pump()? {
                Pump::Continue => (),
                Pump::Stop => {
                    debug!("Message loop stopped");
                    return Ok(());
                },
                Pump::Quit => {
                    debug!("Message loop received quit");
                    return Ok(());
                },
            }
        }
    }

    fn stop(&self) -> Result<()> {
        self.stop_handle().stop()
    }

    fn stop_handle(&self) -> StopHandle {
        StopHandle::new(self.shared.waker.clone())
    }

    fn is_running(&self) -> bool {
        self.shared.waker.lock().is_some()
    }

    fn show(&self) -> Result<()> {
        let handle = self.owned_handle()?;
        self.shared.platform.show(handle, true)?;
        self.shared.platform.invalidate(handle)
    }

    fn hide(&self) -> Result<()> {
        let handle = self.owned_handle()?;
        self.shared.platform.show(handle, false)
    }

    fn invalidate(&self) -> Result<()> {
        let handle = self.handle()?;
        self.shared.platform.invalidate(handle)
    }

    fn location(&self) -> Result<Point> {
        let handle = self.handle()?;
        Ok(self.shared.platform.window_rect(handle)?.origin())
    }

    fn set_location(&self, location: Point) -> Result<()> {
        let handle = self.mutable_handle()?;
        self.shared.platform.set_window_pos(handle, Some(location), None)
    }

    fn client_size(&self) -> Result<Size> {
        let handle = self.handle()?;
        self.shared.platform.client_size(handle)
    }

    fn set_client_size(&self, size: Size) -> Result<()> {
        let handle = self.mutable_handle()?;

        let platform = &self.shared.platform;
        let styles = platform.styles(handle)?;
        let frame = platform.frame_rect(Point::default(), size, styles)?;

        platform.set_window_pos(handle, None, Some(frame.size()))
    }

    fn styles(&self) -> Result<NativeWindowStyles> {
        let handle = self.handle()?;
        self.shared.platform.styles(handle)
    }

    fn set_styles(&self, styles: NativeWindowStyles) -> Result<()> {
        let handle = self.mutable_handle()?;
        self.shared.platform.set_styles(handle, styles.normalized())
    }

    fn supported_styles(&self) -> NativeWindowStyles {
        NativeWindowStyles::all()
    }

    fn fullscreen(&self) -> bool {
        self.shared.state.lock().fullscreen.is_some()
    }

    fn set_fullscreen(&self, fullscreen: bool) -> Result<()> {
        let handle = self.owned_handle()?;
        let platform = &self.shared.platform;

        let restore = self.shared.state.lock().fullscreen;
        match (fullscreen, restore) {
            (true, Some(_)) | (false, None) => Ok(()),
            (true, None) => {
                let restore = Restore {
                    location: platform.window_rect(handle)?.origin(),
                    client_size: platform.client_size(handle)?,
                    styles: platform.styles(handle)?,
                    saved: SavedStyle::default(),
                };
                let monitor = platform.monitor_info(handle)?;

                let saved = platform.enter_fullscreen_style(handle)?;
                self.shared.state.lock().fullscreen = Some(Restore { saved, ..restore });

                let area = monitor.work_area;
                debug!("Entering fullscreen on {:?}", area);
                platform.set_window_pos(handle, Some(area.origin()), Some(area.size()))
            },
            (false, Some(restore)) => {
                self.shared.state.lock().fullscreen = None;
                platform.restore_style(handle, restore.saved)?;

                let frame =
                    platform.frame_rect(restore.location, restore.client_size, restore.styles)?;
                debug!("Leaving fullscreen to {:?}", frame);
                platform.set_window_pos(handle, Some(frame.origin()), Some(frame.size()))
            },
        }
    }

    fn set_caption(&self, caption: &str) -> Result<()> {
        let handle = self.owned_handle()?;
        self.shared.platform.set_caption(handle, caption)
    }

    fn set_cursor_position(&self, position: Point) -> Result<()> {
        let handle = self.owned_handle()?;
        self.shared.platform.set_cursor_position(handle, position)
    }

    fn cursor_visible(&self) -> bool {
        self.shared.state.lock().cursor_visible
    }

    fn set_cursor_visible(&self, visible: bool) -> Result<()> {
        self.owned_handle()?;

        if self.shared.state.lock().cursor_visible == visible {
            return Ok(());
        }

        self.shared.platform.set_cursor_visible(visible)?;
        self.shared.state.lock().cursor_visible = visible;

        Ok(())
    }

    fn animation(&self) -> bool {
        self.shared.animation.load(Ordering::Relaxed)
    }

    fn set_animation(&self, animation: bool) {
        let previous = self.shared.animation.swap(animation, Ordering::Relaxed);

        // Kick off the paint chain once the window exists.
        let handle = self.shared.state.lock().handle;
        if let (true, false, Some(handle)) = (animation, previous, handle) {
            if let Err(err) = self.shared.platform.invalidate(handle) {
                warn!("Unable to start the animation: {}", err);
            }
        }
    }

    fn emulate_key_press(&self, key: KeyCode) -> Result<()> {
        let handle = self.owned_handle()?;
        self.shared.platform.emulate_key(handle, key, true)?;
        self.shared.platform.emulate_key(handle, key, false)
    }
}

impl<P: Platform> Shared<P> {
    /// Release the context, the native window and the class reference.
    fn teardown(&self) -> Result<()> {
        let (handle, owner, class) = {
            let mut state = self.state.lock();
            state.fullscreen = None;
            (state.handle.take(), state.owner.take(), state.class.take())
        };

        let context = self.context.lock().take();
        drop(context);

        let mut result = Ok(());

        if let Some(handle) = handle {
            if owner == Some(thread::current().id()) {
                result = self.platform.destroy_window(handle);
            } else {
                warn!("Leaking window {:?}, it was dropped outside of its owner thread", handle);
            }
        }

        if let Some(class) = class {
            let platform = &self.platform;
            let released = platform.classes().release(class, || platform.unregister_class(class));
            result = result.and(released);
        }

        result
    }
}

impl<P: Platform> Drop for Shared<P> {
    fn drop(&mut self) {
        if let Err(err) = self.teardown() {
            error!("Unable to tear the window down: {}", err);
        }
    }
}

/// Message sink of a native window.
struct Sink<P: Platform> {
    shared: Weak<Shared<P>>,
}

impl<P: Platform> MessageSink for Sink<P> {
    fn dispatch(&self, message: Message) -> Dispatch {
        match self.shared.upgrade() {
            Some(shared) => Window { shared }.dispatch(message),
            None => Dispatch::Default,
        }
    }
}

/// Marks the loop as stopped when `run` returns.
struct LoopGuard<'a> {
    slot: &'a Mutex<Option<Arc<dyn Waker>>>,
}

impl Drop for LoopGuard<'_> {
    fn drop(&mut self) {
        *self.slot.lock() = None;
    }
}
