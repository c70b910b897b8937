use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use coreui::platform::Message;
use coreui::window::CLASS_NAME;
use coreui::{
    Error, Headless, KeyCode, MouseButtons, NativeWindow, NativeWindowStyles, Platform, Point,
    RenderContext, Size, Window, WindowHandler,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Created,
    Resize(Size),
    Render(usize),
    ContextUpdate(usize),
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    Enter,
    Move(Point),
    Leave,
    Down(Point, MouseButtons),
    Up(Point, MouseButtons),
    DoubleClick(Point, MouseButtons),
    Wheel(i32),
    Close,
    RunResult(String),
}

type KeyAction = Box<dyn FnMut(&dyn NativeWindow, KeyCode) + Send>;

struct Recorder {
    events: Arc<Mutex<Vec<Event>>>,
    platform: Arc<Headless>,

    /// Stop the loop after this many frames.
    frames: Option<usize>,
    on_key: Option<KeyAction>,
}

impl Recorder {
    fn new(platform: &Arc<Headless>) -> (Self, Arc<Mutex<Vec<Event>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let recorder =
            Self { events: events.clone(), platform: platform.clone(), frames: None, on_key: None };
        (recorder, events)
    }

    fn swaps(&self, window: &dyn NativeWindow) -> usize {
        window.raw_handle().map_or(0, |handle| self.platform.swap_count(handle))
    }

    fn push(&self, event: Event) {
        self.events.lock().push(event);
    }
}

impl WindowHandler for Recorder {
    fn on_created(&mut self, _: &dyn NativeWindow, _: &dyn RenderContext) {
        self.push(Event::Created);
    }

    fn on_render(&mut self, window: &dyn NativeWindow) {
        self.push(Event::Render(self.swaps(window)));
    }

    fn on_context_update(&mut self, window: &dyn NativeWindow) {
        let swaps = self.swaps(window);
        self.push(Event::ContextUpdate(swaps));

        if self.frames == Some(swaps + 1) {
            window.stop().unwrap();
        }
    }

    fn on_resize(&mut self, _: &dyn NativeWindow, size: Size) {
        self.push(Event::Resize(size));
    }

    fn on_key_down(&mut self, window: &dyn NativeWindow, key: KeyCode) {
        self.push(Event::KeyDown(key));

        if let Some(action) = &mut self.on_key {
            action(window, key);
        }
    }

    fn on_key_up(&mut self, _: &dyn NativeWindow, key: KeyCode) {
        self.push(Event::KeyUp(key));
    }

    fn on_mouse_enter(&mut self, _: &dyn NativeWindow, _: Point, _: MouseButtons) {
        self.push(Event::Enter);
    }

    fn on_mouse_leave(&mut self, _: &dyn NativeWindow) {
        self.push(Event::Leave);
    }

    fn on_mouse_move(&mut self, _: &dyn NativeWindow, location: Point, _: MouseButtons) {
        self.push(Event::Move(location));
    }

    fn on_mouse_down(&mut self, _: &dyn NativeWindow, location: Point, buttons: MouseButtons) {
        self.push(Event::Down(location, buttons));
    }

    fn on_mouse_up(&mut self, _: &dyn NativeWindow, location: Point, buttons: MouseButtons) {
        self.push(Event::Up(location, buttons));
    }

    fn on_mouse_double_click(&mut self, _: &dyn NativeWindow, at: Point, buttons: MouseButtons) {
        self.push(Event::DoubleClick(at, buttons));
    }

    fn on_mouse_wheel(&mut self, _: &dyn NativeWindow, _: Point, _: MouseButtons, ticks: i32) {
        self.push(Event::Wheel(ticks));
    }

    fn on_close(&mut self, _: &dyn NativeWindow) {
        self.push(Event::Close);
    }
}

fn decorated() -> NativeWindowStyles {
    NativeWindowStyles::BORDER | NativeWindowStyles::CAPTION
}

#[test]
fn client_area_excludes_frame() {
    let platform = Arc::new(Headless::new());
    let window = Window::new(platform.clone(), ());

    window.create(10, 20, 100, 80, decorated()).unwrap();
    let handle = window.raw_handle().unwrap();

    let frame = platform.window_rect(handle).unwrap();
    assert_eq!(frame.origin(), Point::new(10, 20));
    assert_eq!(frame.size(), Size::new(100 + 2, 80 + 23 + 2));

    assert_eq!(window.location().unwrap(), Point::new(10, 20));
    assert_eq!(window.client_size().unwrap(), Size::new(100, 80));
}

#[test]
fn resizeable_frame_uses_sizing_border() {
    let platform = Arc::new(Headless::new());
    let window = Window::new(platform.clone(), ());

    window.create(0, 0, 100, 80, NativeWindowStyles::all()).unwrap();
    let frame = platform.window_rect(window.raw_handle().unwrap()).unwrap();

    assert_eq!(frame.size(), Size::new(100 + 8, 80 + 23 + 8));
}

#[test]
fn created_before_first_resize() {
    let platform = Arc::new(Headless::new());
    let (recorder, events) = Recorder::new(&platform);
    let window = Window::new(platform, recorder);

    window.create(0, 0, 320, 240, decorated()).unwrap();

    assert_eq!(*events.lock(), vec![Event::Created, Event::Resize(Size::new(320, 240))]);
}

#[test]
fn operations_require_a_handle() {
    let window = Window::new(Arc::new(Headless::new()), ());

    assert!(window.raw_handle().is_none());
    assert!(matches!(window.location(), Err(Error::NoHandle)));
    assert!(matches!(window.set_caption("title"), Err(Error::NoHandle)));
    assert!(matches!(window.set_fullscreen(true), Err(Error::NoHandle)));
    assert!(matches!(window.destroy(), Err(Error::NoHandle)));
}

#[test]
fn create_twice_fails() {
    let window = Window::new(Arc::new(Headless::new()), ());

    window.create(0, 0, 100, 100, decorated()).unwrap();
    assert!(matches!(window.create(0, 0, 100, 100, decorated()), Err(Error::AlreadyCreated)));
}

#[test]
fn class_registered_once_and_released_with_last_window() {
    let platform = Arc::new(Headless::new());
    let first = Window::new(platform.clone(), ());
    let second = Window::new(platform.clone(), ());

    first.create(0, 0, 100, 100, decorated()).unwrap();
    second.create(0, 0, 100, 100, decorated()).unwrap();
    assert!(platform.is_registered(CLASS_NAME));
    assert_eq!(platform.classes().count(CLASS_NAME), 2);

    first.destroy().unwrap();
    assert!(platform.is_registered(CLASS_NAME));
    assert_eq!(platform.window_count(), 1);

    drop(second);
    assert!(!platform.is_registered(CLASS_NAME));
    assert_eq!(platform.window_count(), 0);
}

#[test]
fn stop_before_run_fails() {
    let window = Window::new(Arc::new(Headless::new()), ());
    assert!(matches!(window.stop(), Err(Error::LoopNotRunning)));

    window.create(0, 0, 100, 100, decorated()).unwrap();
    assert!(matches!(window.stop(), Err(Error::LoopNotRunning)));
    assert!(!window.is_running());
}

#[test]
fn second_run_reports_loop_running() {
    let platform = Arc::new(Headless::new());
    let (mut recorder, events) = Recorder::new(&platform);
    let results = events.clone();
    recorder.on_key = Some(Box::new(move |window, _| {
        let result = window.run().map_err(|err| err.to_string());
        results.lock().push(Event::RunResult(result.unwrap_err()));
        window.stop().unwrap();
    }));

    let window = Window::new(platform.clone(), recorder);
    window.create(0, 0, 100, 100, decorated()).unwrap();
    platform.post(window.raw_handle().unwrap(), Message::KeyDown(KeyCode::Return));

    window.run().unwrap();

    let expected = Event::RunResult(Error::LoopRunning.to_string());
    assert!(events.lock().contains(&expected));
}

#[test]
fn quit_message_ends_loop() {
    let platform = Arc::new(Headless::new());
    let window = Window::new(platform.clone(), ());
    window.create(0, 0, 100, 100, decorated()).unwrap();

    platform.post_quit();
    window.run().unwrap();

    assert!(!window.is_running());
}

#[test]
fn stop_from_another_thread() {
    let platform = Arc::new(Headless::new());
    let window = Window::new(platform, ());
    window.create(0, 0, 100, 100, decorated()).unwrap();

    let stop = window.stop_handle();
    thread::scope(|scope| {
        scope.spawn(move || {
            while !stop.is_running() {
                thread::yield_now();
            }
            stop.stop().unwrap();
        });

        window.run().unwrap();
    });

    assert!(!window.stop_handle().is_running());
}

#[test]
fn mutators_fail_from_other_threads() {
    let window = Window::new(Arc::new(Headless::new()), ());
    window.create(0, 0, 100, 100, decorated()).unwrap();

    thread::scope(|scope| {
        scope
            .spawn(|| {
                let window: &dyn NativeWindow = &window;
                assert!(matches!(window.set_location(Point::new(1, 1)), Err(Error::CrossThread)));
                let size = Size::new(50, 50);
                assert!(matches!(window.set_client_size(size), Err(Error::CrossThread)));
                let styles = NativeWindowStyles::BORDER;
                assert!(matches!(window.set_styles(styles), Err(Error::CrossThread)));
                assert!(matches!(window.set_fullscreen(true), Err(Error::CrossThread)));
                assert!(matches!(window.set_caption("other"), Err(Error::CrossThread)));
                assert!(matches!(window.run(), Err(Error::CrossThread)));

                // Queries are fine from anywhere.
                assert_eq!(window.client_size().unwrap(), Size::new(100, 100));
            })
            .join()
            .unwrap();
    });

    assert_eq!(window.location().unwrap(), Point::new(0, 0));
}

#[test]
fn fullscreen_round_trip_restores_geometry() {
    let platform = Arc::new(Headless::new());
    let window = Window::new(platform, ());
    window.create(30, 40, 640, 480, NativeWindowStyles::all()).unwrap();

    window.set_fullscreen(true).unwrap();
    assert!(window.fullscreen());
    assert_eq!(window.location().unwrap(), Point::new(0, 0));
    assert_eq!(window.client_size().unwrap(), Size::new(1920 - 2, 1040 - 2));
    assert_eq!(window.styles().unwrap(), NativeWindowStyles::BORDER);

    // Enabling again keeps the first snapshot.
    window.set_fullscreen(true).unwrap();

    window.set_fullscreen(false).unwrap();
    assert!(!window.fullscreen());
    assert_eq!(window.location().unwrap(), Point::new(30, 40));
    assert_eq!(window.client_size().unwrap(), Size::new(640, 480));
    assert_eq!(window.styles().unwrap(), NativeWindowStyles::all());

    window.set_fullscreen(false).unwrap();
    assert_eq!(window.location().unwrap(), Point::new(30, 40));
}

#[test]
fn geometry_locked_while_fullscreen() {
    let window = Window::new(Arc::new(Headless::new()), ());
    window.create(0, 0, 100, 100, decorated()).unwrap();
    window.set_fullscreen(true).unwrap();

    assert!(matches!(window.set_location(Point::new(5, 5)), Err(Error::Fullscreen)));
    assert!(matches!(window.set_client_size(Size::new(5, 5)), Err(Error::Fullscreen)));
    let styles = NativeWindowStyles::all();
    assert!(matches!(window.set_styles(styles), Err(Error::Fullscreen)));

    window.set_fullscreen(false).unwrap();
    window.set_location(Point::new(5, 5)).unwrap();
    assert_eq!(window.location().unwrap(), Point::new(5, 5));
}

#[test]
fn styles_without_border_drop_decorations() {
    let window = Window::new(Arc::new(Headless::new()), ());
    window.create(0, 0, 100, 100, decorated()).unwrap();

    window.set_styles(NativeWindowStyles::CAPTION | NativeWindowStyles::RESIZEABLE).unwrap();

    assert_eq!(window.styles().unwrap(), NativeWindowStyles::empty());
    assert_eq!(window.client_size().unwrap(), Size::new(100, 100));
    assert_eq!(window.supported_styles(), NativeWindowStyles::all());
}

#[test]
fn set_client_size_resizes_frame() {
    let platform = Arc::new(Headless::new());
    let (recorder, events) = Recorder::new(&platform);
    let window = Window::new(platform.clone(), recorder);
    window.create(0, 0, 100, 100, decorated()).unwrap();

    window.set_client_size(Size::new(200, 150)).unwrap();

    assert_eq!(window.client_size().unwrap(), Size::new(200, 150));
    let frame = platform.window_rect(window.raw_handle().unwrap()).unwrap();
    assert_eq!(frame.size(), Size::new(202, 175));
    assert_eq!(events.lock().last(), Some(&Event::Resize(Size::new(200, 150))));
}

#[test]
fn paint_renders_updates_then_swaps() {
    let platform = Arc::new(Headless::new());
    let (mut recorder, events) = Recorder::new(&platform);
    recorder.frames = Some(1);

    let window = Window::new(platform.clone(), recorder);
    window.create(0, 0, 100, 100, decorated()).unwrap();
    let handle = window.raw_handle().unwrap();

    window.show().unwrap();
    assert!(platform.is_visible(handle));

    window.run().unwrap();

    assert_eq!(platform.swap_count(handle), 1);
    assert_eq!(events.lock()[2..], [Event::Render(0), Event::ContextUpdate(0)]);
}

#[test]
fn animation_repaints_continuously() {
    let platform = Arc::new(Headless::new());
    let (mut recorder, events) = Recorder::new(&platform);
    recorder.frames = Some(3);

    let window = Window::new(platform.clone(), recorder);
    window.create(0, 0, 100, 100, decorated()).unwrap();
    window.set_animation(true);
    assert!(window.animation());

    window.run().unwrap();

    assert_eq!(platform.swap_count(window.raw_handle().unwrap()), 3);
    let renders = events.lock().iter().filter(|event| matches!(event, Event::Render(_))).count();
    assert_eq!(renders, 3);
}

#[test]
fn animation_enabled_before_create() {
    let platform = Arc::new(Headless::new());
    let (mut recorder, _events) = Recorder::new(&platform);
    recorder.frames = Some(2);

    let window = Window::new(platform.clone(), recorder);
    window.set_animation(true);
    window.create(0, 0, 100, 100, decorated()).unwrap();
    window.show().unwrap();

    window.run().unwrap();

    assert_eq!(platform.swap_count(window.raw_handle().unwrap()), 2);
}

#[test]
fn untranslatable_keys_are_dropped() {
    let platform = Arc::new(Headless::new());
    let (recorder, events) = Recorder::new(&platform);
    let window = Window::new(platform.clone(), recorder);
    window.create(0, 0, 100, 100, decorated()).unwrap();
    let handle = window.raw_handle().unwrap();
    events.lock().clear();

    platform.post_virtual_key(handle, 0xFF, true);
    platform.post_virtual_key(handle, 0x41, true);
    platform.post_virtual_key(handle, 0xFF, false);
    platform.post_virtual_key(handle, 0x41, false);
    platform.post_quit();
    window.run().unwrap();

    assert_eq!(*events.lock(), vec![Event::KeyDown(KeyCode::A), Event::KeyUp(KeyCode::A)]);
}

#[test]
fn emulated_key_press() {
    let platform = Arc::new(Headless::new());
    let (recorder, events) = Recorder::new(&platform);
    let window = Window::new(platform, recorder);
    window.create(0, 0, 100, 100, decorated()).unwrap();
    events.lock().clear();

    window.emulate_key_press(KeyCode::F11).unwrap();

    assert_eq!(*events.lock(), vec![Event::KeyDown(KeyCode::F11), Event::KeyUp(KeyCode::F11)]);
}

#[test]
fn mouse_enter_once_per_hover() {
    let platform = Arc::new(Headless::new());
    let (recorder, events) = Recorder::new(&platform);
    let window = Window::new(platform.clone(), recorder);
    window.create(0, 0, 100, 100, decorated()).unwrap();
    let handle = window.raw_handle().unwrap();
    events.lock().clear();

    let buttons = MouseButtons::empty();
    platform.post(handle, Message::MouseMove(Point::new(1, 1), buttons));
    platform.post(handle, Message::MouseMove(Point::new(2, 2), buttons));
    platform.post(handle, Message::MouseLeave);
    platform.post(handle, Message::MouseMove(Point::new(3, 3), buttons));
    platform.post(handle, Message::MouseWheel(Point::new(3, 3), buttons, -2));
    platform.post_quit();
    window.run().unwrap();

    assert_eq!(*events.lock(), vec![
        Event::Enter,
        Event::Move(Point::new(1, 1)),
        Event::Move(Point::new(2, 2)),
        Event::Leave,
        Event::Enter,
        Event::Move(Point::new(3, 3)),
        Event::Wheel(-2),
    ]);
    assert!(platform.is_tracking_leave(handle));
}

#[test]
fn mouse_buttons_are_routed() {
    let platform = Arc::new(Headless::new());
    let (recorder, events) = Recorder::new(&platform);
    let window = Window::new(platform.clone(), recorder);
    window.create(0, 0, 100, 100, decorated()).unwrap();
    let handle = window.raw_handle().unwrap();
    events.lock().clear();

    let location = Point::new(5, 6);
    let held = MouseButtons::LEFT | MouseButtons::X1;
    platform.post(handle, Message::MouseDown(location, held));
    platform.post(handle, Message::MouseUp(location, MouseButtons::X1));
    platform.post(handle, Message::MouseDoubleClick(location, MouseButtons::RIGHT));
    platform.post_quit();
    window.run().unwrap();

    assert_eq!(*events.lock(), vec![
        Event::Down(location, held),
        Event::Up(location, MouseButtons::X1),
        Event::DoubleClick(location, MouseButtons::RIGHT),
    ]);
}

#[test]
fn resizes_from_key_handler_are_delivered() {
    let platform = Arc::new(Headless::new());
    let (mut recorder, events) = Recorder::new(&platform);
    recorder.on_key = Some(Box::new(|window, key| {
        if key == KeyCode::F11 {
            window.set_fullscreen(!window.fullscreen()).unwrap();
        }
    }));

    let window = Window::new(platform.clone(), recorder);
    window.create(30, 40, 640, 480, NativeWindowStyles::all()).unwrap();
    let handle = window.raw_handle().unwrap();
    events.lock().clear();

    platform.post(handle, Message::KeyDown(KeyCode::F11));
    platform.post(handle, Message::KeyDown(KeyCode::F11));
    platform.post_quit();
    window.run().unwrap();

    assert_eq!(*events.lock(), vec![
        Event::KeyDown(KeyCode::F11),
        Event::Resize(Size::new(1918, 1038)),
        Event::KeyDown(KeyCode::F11),
        Event::Resize(Size::new(640, 480)),
    ]);
    assert_eq!(window.client_size().unwrap(), Size::new(640, 480));
}

#[test]
fn keys_emulated_from_handler_follow_the_callback() {
    let platform = Arc::new(Headless::new());
    let (mut recorder, events) = Recorder::new(&platform);
    recorder.on_key = Some(Box::new(|window, key| {
        if key == KeyCode::A {
            window.emulate_key_press(KeyCode::B).unwrap();
        }
    }));

    let window = Window::new(platform, recorder);
    window.create(0, 0, 100, 100, decorated()).unwrap();
    events.lock().clear();

    window.emulate_key_press(KeyCode::A).unwrap();

    assert_eq!(*events.lock(), vec![
        Event::KeyDown(KeyCode::A),
        Event::KeyDown(KeyCode::B),
        Event::KeyUp(KeyCode::B),
        Event::KeyUp(KeyCode::A),
    ]);
}

#[test]
fn close_does_not_destroy() {
    let platform = Arc::new(Headless::new());
    let (recorder, events) = Recorder::new(&platform);
    let window = Window::new(platform.clone(), recorder);
    window.create(0, 0, 100, 100, decorated()).unwrap();

    platform.post(window.raw_handle().unwrap(), Message::Close);
    platform.post_quit();
    window.run().unwrap();

    assert_eq!(events.lock().last(), Some(&Event::Close));
    assert!(window.raw_handle().is_some());
}

#[test]
fn destroy_from_handler_stops_loop() {
    let platform = Arc::new(Headless::new());
    let (mut recorder, _events) = Recorder::new(&platform);
    recorder.on_key = Some(Box::new(|window, _| window.destroy().unwrap()));

    let window = Window::new(platform.clone(), recorder);
    window.create(0, 0, 100, 100, decorated()).unwrap();

    platform.post(window.raw_handle().unwrap(), Message::KeyDown(KeyCode::Escape));
    window.run().unwrap();

    assert!(window.raw_handle().is_none());
    assert_eq!(platform.window_count(), 0);
    assert!(!platform.is_registered(CLASS_NAME));
}

#[test]
fn caption_and_cursor() {
    let platform = Arc::new(Headless::new());
    let window = Window::new(platform.clone(), ());
    window.create(0, 0, 100, 100, decorated()).unwrap();
    let handle = window.raw_handle().unwrap();

    window.set_caption("CoreUI").unwrap();
    assert_eq!(platform.caption(handle).as_deref(), Some("CoreUI"));

    window.set_cursor_position(Point::new(4, 2)).unwrap();
    assert_eq!(platform.cursor_position(), Some((handle, Point::new(4, 2))));

    assert!(window.cursor_visible());
    window.set_cursor_visible(false).unwrap();
    assert!(!window.cursor_visible());
    assert!(!platform.cursor_visible());

    window.hide().unwrap();
    assert!(!platform.is_visible(handle));
}
