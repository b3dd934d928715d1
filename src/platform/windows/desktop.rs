//! Foreground window queries.

use crate::dispatch::Desktop;
use crate::error::{Error, Result};
use crate::signal::WindowTitle;
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowTextLengthW, GetWindowTextW,
};

/// The interactive desktop of the current session.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Desktop;

impl Desktop for Win32Desktop {
    fn foreground_window_title(&self) -> Result<Option<WindowTitle>> {
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.is_invalid() {
            return Ok(None);
        }

        let len = unsafe { GetWindowTextLengthW(hwnd) }.max(0) as usize;
        let mut buffer: Vec<u16> = Vec::new();
        buffer
            .try_reserve_exact(len + 1)
            .map_err(|_| Error::Allocation)?;
        buffer.resize(len + 1, 0);

        // The title may have shrunk since its length was read.
        let copied = unsafe { GetWindowTextW(hwnd, &mut buffer) }.max(0) as usize;
        buffer.truncate(copied);
        Ok(Some(WindowTitle::from_units(buffer)))
    }
}
