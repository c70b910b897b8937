#![cfg(windows)]

use std::sync::Arc;

use coreui::platform::Win32;
use coreui::{NativeWindow, NativeWindowStyles, Point, Size, Window};

#[test]
fn native_client_area_matches_request() {
    let styles = [
        NativeWindowStyles::BORDER,
        NativeWindowStyles::BORDER | NativeWindowStyles::CAPTION,
        NativeWindowStyles::all(),
    ];

    for styles in styles {
        let window = Window::new(Arc::new(Win32::new()), ());
        window.create(100, 120, 640, 480, styles).unwrap();

        assert_eq!(window.location().unwrap(), Point::new(100, 120), "{:?}", styles);
        assert_eq!(window.client_size().unwrap(), Size::new(640, 480), "{:?}", styles);

        window.set_client_size(Size::new(320, 200)).unwrap();
        assert_eq!(window.client_size().unwrap(), Size::new(320, 200), "{:?}", styles);

        window.set_fullscreen(true).unwrap();
        window.set_fullscreen(false).unwrap();
        assert_eq!(window.location().unwrap(), Point::new(100, 120), "{:?}", styles);
        assert_eq!(window.client_size().unwrap(), Size::new(320, 200), "{:?}", styles);

        window.destroy().unwrap();
    }
}
