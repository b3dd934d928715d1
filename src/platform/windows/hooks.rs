//! Low-level hook callbacks and registration.

use super::{hook_handle, with_dispatcher};
use crate::error::{Error, Result};
use crate::event::{KeyInput, KeyMessage, MouseInput, MouseMessage};
use crate::lifecycle::{HookBackend, HookKind, start_failed};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, GetSystemMetrics, HC_ACTION, HHOOK, KBDLLHOOKSTRUCT, MSLLHOOKSTRUCT,
    SM_CXSCREEN, SM_CYSCREEN, SetWindowsHookExW, UnhookWindowsHookEx, WH_KEYBOARD_LL,
    WH_MOUSE_LL,
};

/// Get VK code from KBDLLHOOKSTRUCT
unsafe fn get_vk_code(lparam: LPARAM) -> u32 {
    let kb = unsafe { *(lparam.0 as *const KBDLLHOOKSTRUCT) };
    kb.vkCode
}

/// Get point from MSLLHOOKSTRUCT
unsafe fn get_mouse_point(lparam: LPARAM) -> (i32, i32) {
    let mouse = unsafe { *(lparam.0 as *const MSLLHOOKSTRUCT) };
    (mouse.pt.x, mouse.pt.y)
}

/// Mouse hook callback
unsafe extern "system" fn mouse_callback(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    // lparam only points at an MSLLHOOKSTRUCT for HC_ACTION.
    if code == HC_ACTION as i32 {
        let (x, y) = unsafe { get_mouse_point(lparam) };
        let input = MouseInput::new(MouseMessage::from_raw(wparam.0 as u32), x, y);
        with_dispatcher(|dispatcher| dispatcher.on_mouse(code, &input));
    }

    unsafe { CallNextHookEx(hook_handle(HookKind::Mouse), code, wparam, lparam) }
}

/// Keyboard hook callback
unsafe extern "system" fn keyboard_callback(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 {
        let vk_code = unsafe { get_vk_code(lparam) };
        let input = KeyInput::new(KeyMessage::from_raw(wparam.0 as u32), vk_code);
        with_dispatcher(|dispatcher| dispatcher.on_keyboard(code, &input));
    }

    unsafe { CallNextHookEx(hook_handle(HookKind::Keyboard), code, wparam, lparam) }
}

/// Registers the callbacks above as global low-level hooks.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32HookBackend;

impl HookBackend for Win32HookBackend {
    type Handle = HHOOK;

    fn register(&mut self, kind: HookKind) -> Result<HHOOK> {
        let hook = unsafe {
            match kind {
                HookKind::Mouse => SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_callback), None, 0),
                HookKind::Keyboard => {
                    SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_callback), None, 0)
                }
            }
        };
        hook.map_err(|e| start_failed(kind, e))
    }

    fn unregister(&mut self, kind: HookKind, handle: HHOOK) -> Result<()> {
        unsafe { UnhookWindowsHookEx(handle) }
            .map_err(|e| Error::HookStopFailed(format!("{kind:?} hook: {e}")))
    }

    fn screen_size(&self) -> (i32, i32) {
        unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) }
    }
}
