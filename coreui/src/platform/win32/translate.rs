//! Conversions between Win32 message parameters and platform neutral values.
//!
//! These are plain integer mappings, so they are compiled and tested on every
//! OS.

use crate::geometry::Point;
use crate::input::{KeyCode, MouseButtons};
use crate::style::NativeWindowStyles;

pub const WS_BORDER: u32 = 0x0080_0000;
pub const WS_CAPTION: u32 = 0x00C0_0000;
pub const WS_THICKFRAME: u32 = 0x0004_0000;

const MK_LBUTTON: usize = 0x0001;
const MK_RBUTTON: usize = 0x0002;
const MK_MBUTTON: usize = 0x0010;
const MK_XBUTTON1: usize = 0x0020;
const MK_XBUTTON2: usize = 0x0040;

const WHEEL_DELTA: i32 = 120;

/// Virtual key codes, in both directions.
const VIRTUAL_KEYS: &[(u16, KeyCode)] = &[
    (0x08, KeyCode::Back),
    (0x09, KeyCode::Tab),
    (0x0D, KeyCode::Return),
    (0x10, KeyCode::Shift),
    (0x11, KeyCode::Control),
    (0x12, KeyCode::Menu),
    (0x14, KeyCode::CapsLock),
    (0x1B, KeyCode::Escape),
    (0x20, KeyCode::Space),
    (0x23, KeyCode::End),
    (0x24, KeyCode::Home),
    (0x25, KeyCode::Left),
    (0x26, KeyCode::Up),
    (0x27, KeyCode::Right),
    (0x28, KeyCode::Down),
    (0x2D, KeyCode::Insert),
    (0x2E, KeyCode::Delete),
    (0x30, KeyCode::N0),
    (0x31, KeyCode::N1),
    (0x32, KeyCode::N2),
    (0x33, KeyCode::N3),
    (0x34, KeyCode::N4),
    (0x35, KeyCode::N5),
    (0x36, KeyCode::N6),
    (0x37, KeyCode::N7),
    (0x38, KeyCode::N8),
    (0x39, KeyCode::N9),
    (0x41, KeyCode::A),
    (0x42, KeyCode::B),
    (0x43, KeyCode::C),
    (0x44, KeyCode::D),
    (0x45, KeyCode::E),
    (0x46, KeyCode::F),
    (0x47, KeyCode::G),
    (0x48, KeyCode::H),
    (0x49, KeyCode::I),
    (0x4A, KeyCode::J),
    (0x4B, KeyCode::K),
    (0x4C, KeyCode::L),
    (0x4D, KeyCode::M),
    (0x4E, KeyCode::N),
    (0x4F, KeyCode::O),
    (0x50, KeyCode::P),
    (0x51, KeyCode::Q),
    (0x52, KeyCode::R),
    (0x53, KeyCode::S),
    (0x54, KeyCode::T),
    (0x55, KeyCode::U),
    (0x56, KeyCode::V),
    (0x57, KeyCode::W),
    (0x58, KeyCode::X),
    (0x59, KeyCode::Y),
    (0x5A, KeyCode::Z),
    (0x5B, KeyCode::LeftWindows),
    (0x5C, KeyCode::RightWindows),
    (0x5D, KeyCode::Application),
    (0x60, KeyCode::Numpad0),
    (0x61, KeyCode::Numpad1),
    (0x62, KeyCode::Numpad2),
    (0x63, KeyCode::Numpad3),
    (0x64, KeyCode::Numpad4),
    (0x65, KeyCode::Numpad5),
    (0x66, KeyCode::Numpad6),
    (0x67, KeyCode::Numpad7),
    (0x68, KeyCode::Numpad8),
    (0x69, KeyCode::Numpad9),
    (0x6A, KeyCode::Multiply),
    (0x6B, KeyCode::Add),
    (0x6C, KeyCode::Separator),
    (0x6D, KeyCode::Subtract),
    (0x6E, KeyCode::Decimal),
    (0x6F, KeyCode::Divide),
    (0x70, KeyCode::F1),
    (0x71, KeyCode::F2),
    (0x72, KeyCode::F3),
    (0x73, KeyCode::F4),
    (0x74, KeyCode::F5),
    (0x75, KeyCode::F6),
    (0x76, KeyCode::F7),
    (0x77, KeyCode::F8),
    (0x78, KeyCode::F9),
    (0x79, KeyCode::F10),
    (0x7A, KeyCode::F11),
    (0x7B, KeyCode::F12),
    (0x7C, KeyCode::F13),
    (0x7D, KeyCode::F14),
    (0x7E, KeyCode::F15),
    (0x7F, KeyCode::F16),
    (0x80, KeyCode::F17),
    (0x81, KeyCode::F18),
    (0x82, KeyCode::F19),
    (0x83, KeyCode::F20),
    (0x84, KeyCode::F21),
    (0x85, KeyCode::F22),
    (0x86, KeyCode::F23),
    (0x87, KeyCode::F24),
    (0x90, KeyCode::NumLock),
    (0x91, KeyCode::ScrollLock),
    (0xBA, KeyCode::Oem1),
    (0xBB, KeyCode::Plus),
    (0xBC, KeyCode::Comma),
    (0xBD, KeyCode::Minus),
    (0xBE, KeyCode::Period),
    (0xBF, KeyCode::Oem2),
    (0xC0, KeyCode::Oem3),
];

/// Key code of a virtual key, `None` for keys without a mapping.
pub fn key_code(virtual_key: u16) -> Option<KeyCode> {
    VIRTUAL_KEYS.iter().find(|(vk, _)| *vk == virtual_key).map(|(_, key)| *key)
}

/// Virtual key of a key code.
pub fn virtual_key(key: KeyCode) -> Option<u16> {
    VIRTUAL_KEYS.iter().find(|(_, code)| *code == key).map(|(vk, _)| *vk)
}

/// Cursor location packed in a mouse message `LPARAM`.
///
/// Coordinates are signed, they are negative on multi-monitor setups and
/// while capturing outside of the window.
pub fn mouse_location(lparam: isize) -> Point {
    let x = (lparam & 0xFFFF) as u16 as i16;
    let y = ((lparam >> 16) & 0xFFFF) as u16 as i16;
    Point::new(i32::from(x), i32::from(y))
}

/// Buttons held during a mouse message, from the `MK_*` bits of `WPARAM`.
pub fn mouse_buttons(wparam: usize) -> MouseButtons {
    let mut buttons = MouseButtons::empty();
    buttons.set(MouseButtons::LEFT, wparam & MK_LBUTTON != 0);
    buttons.set(MouseButtons::RIGHT, wparam & MK_RBUTTON != 0);
    buttons.set(MouseButtons::MIDDLE, wparam & MK_MBUTTON != 0);
    buttons.set(MouseButtons::X1, wparam & MK_XBUTTON1 != 0);
    buttons.set(MouseButtons::X2, wparam & MK_XBUTTON2 != 0);
    buttons
}

/// Wheel rotation of a `WM_MOUSEWHEEL` in ticks.
pub fn wheel_ticks(wparam: usize) -> i32 {
    let delta = ((wparam >> 16) & 0xFFFF) as u16 as i16;
    i32::from(delta) / WHEEL_DELTA
}

pub fn styles_from_native(style: u32) -> NativeWindowStyles {
    let mut styles = NativeWindowStyles::empty();
    styles.set(NativeWindowStyles::BORDER, style & WS_BORDER != 0);
    styles.set(NativeWindowStyles::CAPTION, style & WS_CAPTION == WS_CAPTION);
    styles.set(NativeWindowStyles::RESIZEABLE, style & WS_THICKFRAME != 0);
    styles.normalized()
}

pub fn styles_to_native(styles: NativeWindowStyles) -> u32 {
    let styles = styles.normalized();

    let mut style = 0;
    if styles.contains(NativeWindowStyles::BORDER) {
        style |= WS_BORDER;
    }
    if styles.contains(NativeWindowStyles::CAPTION) {
        style |= WS_CAPTION;
    }
    if styles.contains(NativeWindowStyles::RESIZEABLE) {
        style |= WS_THICKFRAME;
    }

    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_code_round_trip() {
        for (vk, key) in VIRTUAL_KEYS {
            let native = virtual_key(*key).unwrap();
            assert_eq!(native, *vk);
            assert_eq!(key_code(native), Some(*key));
        }
    }

    #[test]
    fn virtual_keys_are_unique() {
        for (index, (vk, key)) in VIRTUAL_KEYS.iter().enumerate() {
            assert!(VIRTUAL_KEYS[index + 1..].iter().all(|(other, _)| other != vk), "{:?}", key);
            assert!(VIRTUAL_KEYS[index + 1..].iter().all(|(_, other)| other != key), "{:?}", key);
        }
    }

    #[test]
    fn unknown_virtual_key() {
        assert_eq!(key_code(0x01), None);
        assert_eq!(key_code(0xFF), None);
    }

    #[test]
    fn signed_mouse_location() {
        assert_eq!(mouse_location(0x0020_0010), Point::new(16, 32));
        assert_eq!(mouse_location(0xFFFE_FFFF_u32 as isize), Point::new(-1, -2));
    }

    #[test]
    fn mouse_buttons_from_wparam() {
        assert_eq!(mouse_buttons(0x0001 | 0x0010), MouseButtons::LEFT | MouseButtons::MIDDLE);
        assert_eq!(mouse_buttons(0x0004 | 0x0008), MouseButtons::empty());
        let buttons = MouseButtons::RIGHT | MouseButtons::X1 | MouseButtons::X2;
        assert_eq!(mouse_buttons(0x0062), buttons);
    }

    #[test]
    fn wheel_delta_ticks() {
        assert_eq!(wheel_ticks(120 << 16), 1);
        assert_eq!(wheel_ticks(((-240i16 as u16) as usize) << 16), -2);
        assert_eq!(wheel_ticks(60 << 16), 0);
    }

    #[test]
    fn native_styles() {
        let styles = NativeWindowStyles::BORDER | NativeWindowStyles::CAPTION;
        assert_eq!(styles_to_native(styles), WS_CAPTION);
        assert_eq!(styles_from_native(WS_CAPTION), styles);
        assert_eq!(styles_from_native(WS_THICKFRAME), NativeWindowStyles::empty());
        let all = NativeWindowStyles::all();
        assert_eq!(styles_from_native(styles_to_native(all)), all);
    }
}
