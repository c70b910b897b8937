//! Platform independent input values.

use bitflags::bitflags;
use serde::Deserialize;

/// Keyboard key, independent of the keyboard layout.
#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Back,
    Tab,
    Return,
    Shift,
    Control,
    /// Alt key.
    Menu,
    CapsLock,
    Escape,
    Space,
    End,
    Home,
    Left,
    Up,
    Right,
    Down,
    Insert,
    Delete,
    N0,
    N1,
    N2,
    N3,
    N4,
    N5,
    N6,
    N7,
    N8,
    N9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    LeftWindows,
    RightWindows,
    Application,
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    Multiply,
    Add,
    Separator,
    Subtract,
    Decimal,
    Divide,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    NumLock,
    ScrollLock,
    Plus,
    Comma,
    Minus,
    Period,
    /// `;:` on US layouts.
    Oem1,
    /// `/?` on US layouts.
    Oem2,
    /// `` `~ `` on US layouts.
    Oem3,
}

bitflags! {
    /// Mouse buttons held during a mouse event.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        const LEFT   = 0b0_0001;
        const RIGHT  = 0b0_0010;
        const MIDDLE = 0b0_0100;
        const X1     = 0b0_1000;
        const X2     = 0b1_0000;
    }
}
