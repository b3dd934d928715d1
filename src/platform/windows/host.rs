//! The hidden host window whose message loop drives the hooks.

use super::{DISPATCHER, HOOKS, remove_hooks};
use crate::error::{Error, Result};
use crate::shell::{self, OnCreate};
use log::{debug, error, warn};
use std::ffi::c_void;
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CREATESTRUCTW, CreateWindowExW, DefWindowProcW, DispatchMessageW, GetMessageW, MSG,
    PostQuitMessage, RegisterClassW, TranslateMessage, WINDOW_EX_STYLE, WM_CREATE, WM_DESTROY,
    WNDCLASSW, WS_OVERLAPPEDWINDOW,
};
use windows::core::{PCWSTR, w};

const CLASS_NAME: PCWSTR = w!("HookcastHost");
const WINDOW_TITLE: PCWSTR = w!("Hookcast");

/// Create the host window, pump messages until quit, then remove the hooks.
///
/// Hooks are installed while the window handles `WM_CREATE`. On success the
/// stream gets `HookInstalled` then `WindowCreationSucceeded`; if either the
/// hooks or the window fail, `WindowCreationFailed` is the only signal
/// written and an error is returned. The binary turns that error into exit
/// status 1 rather than 0, so a supervisor can tell it apart from a clean
/// shutdown.
///
/// Returns the status of [`remove_hooks`](super::remove_hooks).
pub fn run_host() -> Result<i32> {
    let instance = unsafe { GetModuleHandleW(None) }
        .map_err(|e| Error::Platform(format!("GetModuleHandleW failed: {e}")))?;

    let class = WNDCLASSW {
        lpfnWndProc: Some(host_window_proc),
        hInstance: instance.into(),
        lpszClassName: CLASS_NAME,
        ..Default::default()
    };
    if unsafe { RegisterClassW(&class) } == 0 {
        warn!("RegisterClassW failed");
    }

    HOOKS.with(|hooks| {
        DISPATCHER.with(|dispatcher| {
            let busy = |_| Error::Platform("hook state is busy".into());
            let mut hooks = hooks.try_borrow_mut().map_err(busy)?;
            let mut dispatcher = dispatcher.try_borrow_mut().map_err(busy)?;
            shell::start(&mut *hooks, &mut *dispatcher, |on_create| {
                create_window(instance.into(), on_create)
            })
        })
    })?;

    let mut msg = MSG::default();
    // GetMessageW returns -1 on error and 0 on WM_QUIT.
    while unsafe { GetMessageW(&mut msg, None, 0, 0) }.0 > 0 {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
    debug!("message loop finished");

    Ok(remove_hooks())
}

/// Create the zero-sized host window, passing `on_create` to `WM_CREATE`
/// through the creation parameters.
fn create_window(instance: HINSTANCE, mut on_create: &mut OnCreate<'_>) -> Result<()> {
    let param = &mut on_create as *mut &mut OnCreate<'_> as *const c_void;
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            CLASS_NAME,
            WINDOW_TITLE,
            WS_OVERLAPPEDWINDOW,
            0,
            0,
            0,
            0,
            None,
            None,
            Some(instance),
            Some(param),
        )
    }
    .map_err(|e| Error::WindowCreationFailed(e.to_string()))?;
    debug!("host window created: {hwnd:?}");
    Ok(())
}

unsafe extern "system" fn host_window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_CREATE => {
            let create = unsafe { &*(lparam.0 as *const CREATESTRUCTW) };
            let on_create = create.lpCreateParams as *mut &mut OnCreate<'_>;
            if on_create.is_null() {
                return LRESULT(0);
            }
            // Valid for the duration of the CreateWindowExW call in create_window.
            match unsafe { (*on_create)() } {
                Ok(()) => LRESULT(0),
                Err(e) => {
                    error!("{e}");
                    // Makes CreateWindowExW fail.
                    LRESULT(-1)
                }
            }
        }
        WM_DESTROY => {
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}
