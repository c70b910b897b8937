//! Win32 windows driven through User32.

use std::ffi::{c_void, OsStr};
use std::iter::once;
use std::mem;
use std::os::windows::ffi::OsStrExt;
use std::ptr;
use std::sync::Arc;

use log::{debug, trace};
use windows_sys::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows_sys::Win32::Graphics::Gdi::{
    ClientToScreen, GetMonitorInfoW, InvalidateRect, MonitorFromWindow, ValidateRect,
    MONITORINFO, MONITOR_DEFAULTTONEAREST, MONITOR_DEFAULTTOPRIMARY,
};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::System::Threading::GetCurrentThreadId;
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{TrackMouseEvent, TME_LEAVE, TRACKMOUSEEVENT};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRectEx, CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW,
    GetClientRect, GetMessageW, GetWindowRect, LoadCursorW, PostThreadMessageW, RegisterClassExW,
    SendMessageW, SetCursorPos, SetWindowPos, SetWindowTextW, ShowCursor, ShowWindow,
    TranslateMessage, UnregisterClassW, CREATESTRUCTW, CS_DBLCLKS, CS_HREDRAW, CS_OWNDC,
    CS_VREDRAW, GWLP_USERDATA, GWL_EXSTYLE, GWL_STYLE, HOVER_DEFAULT, IDC_ARROW, MSG,
    SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SW_HIDE, SW_SHOW,
    WM_CLOSE, WM_CREATE, WM_DESTROY, WM_KEYDOWN, WM_KEYUP, WM_LBUTTONDBLCLK, WM_LBUTTONDOWN,
    WM_LBUTTONUP, WM_MBUTTONDBLCLK, WM_MBUTTONDOWN, WM_MBUTTONUP, WM_MOUSELEAVE, WM_MOUSEMOVE,
    WM_MOUSEWHEEL, WM_NCCREATE, WM_NCDESTROY, WM_PAINT, WM_RBUTTONDBLCLK, WM_RBUTTONDOWN,
    WM_RBUTTONUP, WM_SIZE, WM_USER, WM_XBUTTONDBLCLK, WM_XBUTTONDOWN, WM_XBUTTONUP, WNDCLASSEXW,
    WS_CLIPCHILDREN, WS_CLIPSIBLINGS, WS_EX_APPWINDOW, WS_EX_CLIENTEDGE, WS_EX_DLGMODALFRAME,
    WS_EX_STATICEDGE, WS_EX_WINDOWEDGE, WS_MINIMIZEBOX, WS_SYSMENU,
};
#[cfg(target_pointer_width = "64")]
use windows_sys::Win32::UI::WindowsAndMessaging::{GetWindowLongPtrW, SetWindowLongPtrW};
#[cfg(target_pointer_width = "32")]
use windows_sys::Win32::UI::WindowsAndMessaging::{
    GetWindowLongW as GetWindowLongPtrW, SetWindowLongW as SetWindowLongPtrW,
};

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect, Size};
use crate::input::KeyCode;
use crate::platform::win32::context::WglContext;
use crate::platform::win32::translate::{self, WS_BORDER, WS_CAPTION, WS_THICKFRAME};
use crate::platform::{
    ClassRegistry, Dispatch, Message, MessageSink, MonitorInfo, Platform, Pump, RawHandle,
    RenderContext, SavedStyle, Waker,
};
use crate::style::NativeWindowStyles;

/// Thread message ending the loop of the receiving thread.
const STOP_MESSAGE: u32 = WM_USER + 13;

const EX_STYLE: u32 = WS_EX_APPWINDOW;

/// Window classes are process wide.
static CLASSES: ClassRegistry = ClassRegistry::new();

pub fn win32_string<S: AsRef<OsStr> + ?Sized>(value: &S) -> Vec<u16> {
    OsStr::new(value).encode_wide().chain(once(0)).collect()
}

#[derive(Debug, Default)]
pub struct Win32;

impl Win32 {
    pub fn new() -> Self {
        Self
    }
}

/// Native style of a window with `styles` decorations.
fn window_style(styles: NativeWindowStyles) -> u32 {
    translate::styles_to_native(styles)
        | WS_SYSMENU
        | WS_MINIMIZEBOX
        | WS_CLIPCHILDREN
        | WS_CLIPSIBLINGS
}

#[inline]
fn hwnd(handle: RawHandle) -> HWND {
    handle.0 as HWND
}

fn check(call: &'static str, result: i32) -> Result<()> {
    if result == 0 {
        Err(Error::last_os(call))
    } else {
        Ok(())
    }
}

fn rect(rect: RECT) -> Rect {
    Rect {
        x: rect.left,
        y: rect.top,
        width: (rect.right - rect.left).max(0) as u32,
        height: (rect.bottom - rect.top).max(0) as u32,
    }
}

impl Platform for Win32 {
    fn classes(&self) -> &ClassRegistry {
        &CLASSES
    }

    fn register_class(&self, class: &str) -> Result<()> {
        let class = win32_string(class);

        let window_class = WNDCLASSEXW {
            cbSize: mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_OWNDC | CS_DBLCLKS | CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(window_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: unsafe { GetModuleHandleW(ptr::null()) },
            hIcon: 0,
            hCursor: unsafe { LoadCursorW(0, IDC_ARROW) },
            hbrBackground: 0,
            lpszMenuName: ptr::null(),
            lpszClassName: class.as_ptr(),
            hIconSm: 0,
        };

        if unsafe { RegisterClassExW(&window_class) } == 0 {
            return Err(Error::last_os("RegisterClassExW"));
        }

        Ok(())
    }

    fn unregister_class(&self, class: &str) -> Result<()> {
        let class = win32_string(class);
        check("UnregisterClassW", unsafe {
            UnregisterClassW(class.as_ptr(), GetModuleHandleW(ptr::null()))
        })
    }

    fn create_window(
        &self,
        class: &str,
        frame: Rect,
        styles: NativeWindowStyles,
        sink: Arc<dyn MessageSink>,
    ) -> Result<RawHandle> {
        let class = win32_string(class);
        let title = win32_string("");
        let style = window_style(styles);

        // The window procedure clones the sink during `WM_NCCREATE`.
        let sink = &sink as *const Arc<dyn MessageSink>;

        let window = unsafe {
            CreateWindowExW(
                EX_STYLE,
                class.as_ptr(),
                title.as_ptr(),
                style,
                frame.x,
                frame.y,
                frame.width as i32,
                frame.height as i32,
                0,
                0,
                GetModuleHandleW(ptr::null()),
                sink as *const c_void,
            )
        };

        if window == 0 {
            return Err(Error::last_os("CreateWindowExW"));
        }

        Ok(RawHandle(window))
    }

    fn destroy_window(&self, handle: RawHandle) -> Result<()> {
        check("DestroyWindow", unsafe { DestroyWindow(hwnd(handle)) })
    }

    fn frame_rect(
        &self,
        origin: Point,
        client: Size,
        styles: NativeWindowStyles,
    ) -> Result<Rect> {
        let mut frame = RECT {
            left: origin.x,
            top: origin.y,
            right: origin.x + client.width as i32,
            bottom: origin.y + client.height as i32,
        };
        check("AdjustWindowRectEx", unsafe {
            AdjustWindowRectEx(&mut frame, window_style(styles), 0, EX_STYLE)
        })?;

        // The frame grows around the client area, keep the outer origin in place.
        let frame = rect(frame);
        Ok(Rect { x: origin.x, y: origin.y, ..frame })
    }

    fn window_rect(&self, handle: RawHandle) -> Result<Rect> {
        let mut window_rect: RECT = unsafe { mem::zeroed() };
        check("GetWindowRect", unsafe { GetWindowRect(hwnd(handle), &mut window_rect) })?;
        Ok(rect(window_rect))
    }

    fn client_size(&self, handle: RawHandle) -> Result<Size> {
        let mut client_rect: RECT = unsafe { mem::zeroed() };
        check("GetClientRect", unsafe { GetClientRect(hwnd(handle), &mut client_rect) })?;
        Ok(rect(client_rect).size())
    }

    fn set_window_pos(
        &self,
        handle: RawHandle,
        origin: Option<Point>,
        size: Option<Size>,
    ) -> Result<()> {
        let mut flags = SWP_NOZORDER | SWP_NOACTIVATE;
        if origin.is_none() {
            flags |= SWP_NOMOVE;
        }
        if size.is_none() {
            flags |= SWP_NOSIZE;
        }

        let origin = origin.unwrap_or_default();
        let size = size.unwrap_or_default();

        check("SetWindowPos", unsafe {
            SetWindowPos(
                hwnd(handle),
                0,
                origin.x,
                origin.y,
                size.width as i32,
                size.height as i32,
                flags,
            )
        })
    }

    fn styles(&self, handle: RawHandle) -> Result<NativeWindowStyles> {
        let style = unsafe { GetWindowLongPtrW(hwnd(handle), GWL_STYLE) } as u32;
        Ok(translate::styles_from_native(style))
    }

    fn set_styles(&self, handle: RawHandle, styles: NativeWindowStyles) -> Result<()> {
        let frame = self.window_rect(handle)?;
        let client = self.client_size(handle)?;

        let style = unsafe { GetWindowLongPtrW(hwnd(handle), GWL_STYLE) } as u32;
        let style = (style & !(WS_BORDER | WS_CAPTION | WS_THICKFRAME))
            | translate::styles_to_native(styles);
        unsafe { SetWindowLongPtrW(hwnd(handle), GWL_STYLE, style as _) };

        let frame = self.frame_rect(frame.origin(), client, styles)?;
        check("SetWindowPos", unsafe {
            SetWindowPos(
                hwnd(handle),
                0,
                frame.x,
                frame.y,
                frame.width as i32,
                frame.height as i32,
                SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED,
            )
        })
    }

    fn enter_fullscreen_style(&self, handle: RawHandle) -> Result<SavedStyle> {
        let window = hwnd(handle);
        let saved = unsafe {
            SavedStyle {
                style: GetWindowLongPtrW(window, GWL_STYLE) as u32,
                ex_style: GetWindowLongPtrW(window, GWL_EXSTYLE) as u32,
            }
        };

        let style = saved.style & !(WS_CAPTION | WS_THICKFRAME);
        let ex_style = saved.ex_style
            & !(WS_EX_DLGMODALFRAME | WS_EX_WINDOWEDGE | WS_EX_CLIENTEDGE | WS_EX_STATICEDGE);
        self.write_styles(window, style, ex_style)?;

        Ok(saved)
    }

    fn restore_style(&self, handle: RawHandle, saved: SavedStyle) -> Result<()> {
        self.write_styles(hwnd(handle), saved.style, saved.ex_style)
    }

    fn monitor_info(&self, handle: RawHandle) -> Result<MonitorInfo> {
        let window = hwnd(handle);
        let mut monitor = unsafe { MonitorFromWindow(window, MONITOR_DEFAULTTONEAREST) };
        if monitor == 0 {
            monitor = unsafe { MonitorFromWindow(window, MONITOR_DEFAULTTOPRIMARY) };
        }
        if monitor == 0 {
            return Err(Error::NoMonitor);
        }

        let mut info: MONITORINFO = unsafe { mem::zeroed() };
        info.cbSize = mem::size_of::<MONITORINFO>() as u32;
        check("GetMonitorInfoW", unsafe { GetMonitorInfoW(monitor, &mut info) })?;

        Ok(MonitorInfo { area: rect(info.rcMonitor), work_area: rect(info.rcWork) })
    }

    fn show(&self, handle: RawHandle, visible: bool) -> Result<()> {
        // The return value is the previous visibility, not an error.
        unsafe { ShowWindow(hwnd(handle), if visible { SW_SHOW } else { SW_HIDE }) };
        Ok(())
    }

    fn invalidate(&self, handle: RawHandle) -> Result<()> {
        check("InvalidateRect", unsafe { InvalidateRect(hwnd(handle), ptr::null(), 0) })
    }

    fn set_caption(&self, handle: RawHandle, caption: &str) -> Result<()> {
        let caption = win32_string(caption);
        check("SetWindowTextW", unsafe { SetWindowTextW(hwnd(handle), caption.as_ptr()) })
    }

    fn set_cursor_position(&self, handle: RawHandle, position: Point) -> Result<()> {
        let mut point = POINT { x: position.x, y: position.y };
        check("ClientToScreen", unsafe { ClientToScreen(hwnd(handle), &mut point) })?;
        check("SetCursorPos", unsafe { SetCursorPos(point.x, point.y) })
    }

    fn set_cursor_visible(&self, visible: bool) -> Result<()> {
        // `ShowCursor` adjusts a display counter, the cursor is shown while it is positive.
        unsafe {
            if visible {
                while ShowCursor(1) < 0 {}
            } else {
                while ShowCursor(0) >= 0 {}
            }
        }

        Ok(())
    }

    fn track_mouse_leave(&self, handle: RawHandle) -> Result<()> {
        let mut event = TRACKMOUSEEVENT {
            cbSize: mem::size_of::<TRACKMOUSEEVENT>() as u32,
            dwFlags: TME_LEAVE,
            hwndTrack: hwnd(handle),
            dwHoverTime: HOVER_DEFAULT,
        };

        check("TrackMouseEvent", unsafe { TrackMouseEvent(&mut event) })
    }

    fn emulate_key(&self, handle: RawHandle, key: KeyCode, down: bool) -> Result<()> {
        let virtual_key = translate::virtual_key(key).ok_or(Error::UnsupportedKey(key))?;
        let message = if down { WM_KEYDOWN } else { WM_KEYUP };

        unsafe { SendMessageW(hwnd(handle), message, virtual_key as WPARAM, 0) };

        Ok(())
    }

    fn pump(&self) -> Result<Pump> {
        let mut msg: MSG = unsafe { mem::zeroed() };

        match unsafe { GetMessageW(&mut msg, 0, 0, 0) } {
            -1 => Err(Error::last_os("GetMessageW")),
            0 => Ok(Pump::Quit),
            _ if msg.hwnd == 0 && msg.message == STOP_MESSAGE => Ok(Pump::Stop),
            _ => {
                unsafe {
                    TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
                Ok(Pump::Continue)
            },
        }
    }

    fn waker(&self) -> Arc<dyn Waker> {
        Arc::new(Win32Waker { thread_id: unsafe { GetCurrentThreadId() } })
    }

    fn create_context(&self, handle: RawHandle) -> Result<Box<dyn RenderContext>> {
        Ok(Box::new(WglContext::new(hwnd(handle))?))
    }
}

impl Win32 {
    fn write_styles(&self, window: HWND, style: u32, ex_style: u32) -> Result<()> {
        unsafe {
            SetWindowLongPtrW(window, GWL_STYLE, style as _);
            SetWindowLongPtrW(window, GWL_EXSTYLE, ex_style as _);
        }

        check("SetWindowPos", unsafe {
            SetWindowPos(
                window,
                0,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED,
            )
        })
    }
}

/// Posts the stop sentinel to the thread running the loop.
struct Win32Waker {
    thread_id: u32,
}

impl Waker for Win32Waker {
    fn wake_stop(&self) -> Result<()> {
        check("PostThreadMessageW", unsafe {
            PostThreadMessageW(self.thread_id, STOP_MESSAGE, 0, 0)
        })
    }
}

/// Route of a native message.
enum Route {
    Dispatch(Message),

    /// Handled without notifying the window.
    Drop,

    /// Left to `DefWindowProcW`.
    Default,
}

fn route(window: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> Route {
    let location = || translate::mouse_location(lparam);
    let buttons = || translate::mouse_buttons(wparam);

    let message = match msg {
        WM_CREATE => Message::Created(RawHandle(window)),
        WM_DESTROY => Message::Destroyed,
        WM_PAINT => Message::Paint,
        WM_SIZE => {
            let width = (lparam & 0xFFFF) as u32;
            let height = ((lparam >> 16) & 0xFFFF) as u32;
            Message::Size(Size::new(width, height))
        },
        WM_KEYDOWN | WM_KEYUP => match translate::key_code(wparam as u16) {
            Some(key) if msg == WM_KEYDOWN => Message::KeyDown(key),
            Some(key) => Message::KeyUp(key),
            None => {
                trace!("Dropping untranslatable virtual key 0x{:02X}", wparam);
                return Route::Drop;
            },
        },
        WM_MOUSEMOVE => Message::MouseMove(location(), buttons()),
        WM_MOUSELEAVE => Message::MouseLeave,
        WM_LBUTTONDOWN | WM_RBUTTONDOWN | WM_MBUTTONDOWN | WM_XBUTTONDOWN => {
            Message::MouseDown(location(), buttons())
        },
        WM_LBUTTONUP | WM_RBUTTONUP | WM_MBUTTONUP | WM_XBUTTONUP => {
            Message::MouseUp(location(), buttons())
        },
        WM_LBUTTONDBLCLK | WM_RBUTTONDBLCLK | WM_MBUTTONDBLCLK | WM_XBUTTONDBLCLK => {
            Message::MouseDoubleClick(location(), buttons())
        },
        WM_MOUSEWHEEL => {
            Message::MouseWheel(location(), buttons(), translate::wheel_ticks(wparam))
        },
        WM_CLOSE => Message::Close,
        _ => return Route::Default,
    };

    Route::Dispatch(message)
}

unsafe extern "system" fn window_proc(
    window: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_NCCREATE {
        let create = &*(lparam as *const CREATESTRUCTW);
        let sink = &*(create.lpCreateParams as *const Arc<dyn MessageSink>);
        let sink = Box::into_raw(Box::new(sink.clone()));
        SetWindowLongPtrW(window, GWLP_USERDATA, sink as _);
        return DefWindowProcW(window, msg, wparam, lparam);
    }

    let userdata = GetWindowLongPtrW(window, GWLP_USERDATA);
    if userdata == 0 {
        return DefWindowProcW(window, msg, wparam, lparam);
    }

    if msg == WM_NCDESTROY {
        SetWindowLongPtrW(window, GWLP_USERDATA, 0);
        drop(Box::from_raw(userdata as *mut Arc<dyn MessageSink>));
        debug!("Released message sink of window {:#x}", window);
        return DefWindowProcW(window, msg, wparam, lparam);
    }

    let sink = (*(userdata as *const Arc<dyn MessageSink>)).clone();
    let message = match route(window, msg, wparam, lparam) {
        Route::Dispatch(message) => message,
        Route::Drop => return 0,
        Route::Default => return DefWindowProcW(window, msg, wparam, lparam),
    };

    let dispatch = sink.dispatch(message);

    // Paint messages repeat until the update region is validated.
    if msg == WM_PAINT {
        ValidateRect(window, ptr::null());
    }

    match dispatch {
        Dispatch::Handled => 0,
        Dispatch::Default => DefWindowProcW(window, msg, wparam, lparam),
        Dispatch::Failed => -1,
    }
}
