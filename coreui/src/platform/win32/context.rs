//! WGL context bound to a window's device context.

use std::ffi::{c_void, CString};
use std::mem;

use log::debug;
use windows_sys::Win32::Foundation::{FreeLibrary, HMODULE, HWND};
use windows_sys::Win32::Graphics::Gdi::{GetDC, ReleaseDC, HDC};
use windows_sys::Win32::Graphics::OpenGL::{
    wglCreateContext, wglDeleteContext, wglGetCurrentContext, wglGetProcAddress, wglMakeCurrent,
    ChoosePixelFormat, SetPixelFormat, SwapBuffers, HGLRC, PFD_DOUBLEBUFFER, PFD_DRAW_TO_WINDOW,
    PFD_MAIN_PLANE, PFD_SUPPORT_OPENGL, PFD_TYPE_RGBA, PIXELFORMATDESCRIPTOR,
};
use windows_sys::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};

use crate::error::{Error, Result};
use crate::platform::win32::window::win32_string;
use crate::platform::RenderContext;

pub struct WglContext {
    window: HWND,
    hdc: HDC,
    hglrc: HGLRC,
    opengl32: HMODULE,
}

impl WglContext {
    pub fn new(window: HWND) -> Result<Self> {
        let hdc = unsafe { GetDC(window) };
        if hdc == 0 {
            return Err(Error::last_os("GetDC"));
        }

        match unsafe { Self::create(window, hdc) } {
            Ok(context) => Ok(context),
            Err(err) => {
                unsafe { ReleaseDC(window, hdc) };
                Err(err)
            },
        }
    }

    unsafe fn create(window: HWND, hdc: HDC) -> Result<Self> {
        let descriptor = PIXELFORMATDESCRIPTOR {
            nSize: mem::size_of::<PIXELFORMATDESCRIPTOR>() as u16,
            nVersion: 1,
            dwFlags: PFD_DRAW_TO_WINDOW | PFD_SUPPORT_OPENGL | PFD_DOUBLEBUFFER,
            iPixelType: PFD_TYPE_RGBA as _,
            cColorBits: 32,
            cDepthBits: 24,
            cStencilBits: 8,
            iLayerType: PFD_MAIN_PLANE as _,
            ..mem::zeroed()
        };

        let format = ChoosePixelFormat(hdc, &descriptor);
        if format == 0 {
            return Err(Error::last_os("ChoosePixelFormat"));
        }

        if SetPixelFormat(hdc, format, &descriptor) == 0 {
            return Err(Error::last_os("SetPixelFormat"));
        }

        let hglrc = wglCreateContext(hdc);
        if hglrc == 0 {
            return Err(Error::last_os("wglCreateContext"));
        }

        let opengl32 = LoadLibraryW(win32_string("opengl32.dll").as_ptr());
        debug!("Created WGL context {:#x} with pixel format {}", hglrc, format);

        Ok(Self { window, hdc, hglrc, opengl32 })
    }
}

impl RenderContext for WglContext {
    fn make_current(&self) -> Result<()> {
        if unsafe { wglMakeCurrent(self.hdc, self.hglrc) } == 0 {
            return Err(Error::last_os("wglMakeCurrent"));
        }

        Ok(())
    }

    fn swap_buffers(&self) -> Result<()> {
        if unsafe { SwapBuffers(self.hdc) } == 0 {
            return Err(Error::last_os("SwapBuffers"));
        }

        Ok(())
    }

    fn get_proc_address(&self, symbol: &str) -> *const c_void {
        let symbol = match CString::new(symbol) {
            Ok(symbol) => symbol,
            Err(_) => return std::ptr::null(),
        };

        // Extension entry points come from the driver, GL 1.1 ones only from opengl32.
        unsafe {
            let address = wglGetProcAddress(symbol.as_ptr() as *const u8)
                .map_or(0, |address| address as usize);
            if !matches!(address, 0 | 1 | 2 | 3 | usize::MAX) {
                return address as *const c_void;
            }

            if self.opengl32 == 0 {
                return std::ptr::null();
            }

            GetProcAddress(self.opengl32, symbol.as_ptr() as *const u8)
                .map_or(std::ptr::null(), |address| address as *const c_void)
        }
    }
}

impl Drop for WglContext {
    fn drop(&mut self) {
        unsafe {
            if wglGetCurrentContext() == self.hglrc {
                wglMakeCurrent(0, 0);
            }

            wglDeleteContext(self.hglrc);
            ReleaseDC(self.window, self.hdc);

            if self.opengl32 != 0 {
                FreeLibrary(self.opengl32);
            }
        }
    }
}
