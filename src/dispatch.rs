//! Hook dispatch: classify raw input and emit signals.
//!
//! The OS invokes the mouse and keyboard hooks for every raw input event.
//! [`Dispatcher`] decides whether an event is reported and writes the
//! matching records. It never fails outward: the hook callback has no error
//! channel, so write failures are logged and the event is passed on anyway.
//! Forwarding to the next hook in the chain is done by the platform
//! trampoline after the dispatcher returns.

use crate::codec::SignalWriter;
use crate::error::Result;
use crate::event::{HC_ACTION, KeyInput, KeyMessage, MouseInput, MouseMessage};
use crate::keycode::TrackedKey;
use crate::signal::{Signal, WindowTitle};
use log::{debug, warn};
use std::io::Write;

/// Queries the dispatcher makes against the desktop.
pub trait Desktop {
    /// Title of the current foreground window.
    ///
    /// `Ok(None)` means no window has focus.
    fn foreground_window_title(&self) -> Result<Option<WindowTitle>>;
}

/// What a mouse event turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    /// Report a pointer move.
    Moved { x: i32, y: i32 },
    /// Report a click followed by the foreground window title.
    Clicked { x: i32, y: i32 },
}

/// Decide what, if anything, a mouse event reports.
pub fn classify_mouse(code: i32, input: &MouseInput) -> Option<MouseAction> {
    if code != HC_ACTION {
        return None;
    }
    match input.message {
        MouseMessage::Move => Some(MouseAction::Moved {
            x: input.x,
            y: input.y,
        }),
        MouseMessage::PrimaryDown => Some(MouseAction::Clicked {
            x: input.x,
            y: input.y,
        }),
        MouseMessage::Other(_) => None,
    }
}

/// Decide whether a keyboard event reports a key press.
pub fn classify_keyboard(code: i32, input: &KeyInput) -> Option<TrackedKey> {
    if code != HC_ACTION || input.message != KeyMessage::KeyDown {
        return None;
    }
    TrackedKey::from_vk(input.vk_code)
}

/// Turns raw hook events into signals on a sink.
pub struct Dispatcher<W: Write, D: Desktop> {
    writer: SignalWriter<W>,
    desktop: D,
}

impl<W: Write, D: Desktop> Dispatcher<W, D> {
    pub fn new(sink: W, desktop: D) -> Self {
        Self {
            writer: SignalWriter::new(sink),
            desktop,
        }
    }

    /// Handle one low-level mouse event.
    pub fn on_mouse(&mut self, code: i32, input: &MouseInput) {
        match classify_mouse(code, input) {
            Some(MouseAction::Moved { x, y }) => self.emit(&Signal::MouseMoved { x, y }),
            Some(MouseAction::Clicked { x, y }) => {
                let title = self.foreground_title();
                let pair = [
                    Signal::MouseClicked { x, y },
                    Signal::ForegroundWindowTitle { title },
                ];
                if let Err(e) = self.writer.write_signals(&pair) {
                    warn!("dropped click at ({x}, {y}): {e}");
                }
            }
            None => {}
        }
    }

    /// Handle one low-level keyboard event.
    pub fn on_keyboard(&mut self, code: i32, input: &KeyInput) {
        if let Some(key) = classify_keyboard(code, input) {
            self.emit(&Signal::KeyPressed { key_code: key.vk() });
        }
    }

    /// Write a signal, logging instead of failing.
    pub fn emit(&mut self, signal: &Signal) {
        if let Err(e) = self.writer.write_signal(signal) {
            warn!("dropped {} signal: {e}", signal.kind().name());
        }
    }

    fn foreground_title(&self) -> WindowTitle {
        match self.desktop.foreground_window_title() {
            Ok(Some(title)) => title,
            Ok(None) => {
                debug!("no foreground window");
                WindowTitle::no_foreground_window()
            }
            Err(e) => {
                warn!("foreground window title unavailable: {e}");
                WindowTitle::no_foreground_window()
            }
        }
    }

    /// Borrow the signal sink.
    pub fn sink(&self) -> &W {
        self.writer.get_ref()
    }

    /// Borrow the desktop.
    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    /// Take the dispatcher apart.
    pub fn into_parts(self) -> (W, D) {
        (self.writer.into_inner(), self.desktop)
    }
}
