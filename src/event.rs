//! Raw input records handed from the OS hooks to the dispatcher.
//!
//! These carry only what the dispatcher looks at, using the Windows message
//! numbers, so the classification logic runs the same with or without a
//! live hook.

/// Hook code meaning "this event carries data and may be processed".
/// Any other code must be passed along the chain untouched.
pub const HC_ACTION: i32 = 0;

const WM_KEYDOWN: u32 = 0x0100;
const WM_MOUSEMOVE: u32 = 0x0200;
const WM_LBUTTONDOWN: u32 = 0x0201;

/// The message a low-level mouse hook received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseMessage {
    /// `WM_MOUSEMOVE`.
    Move,
    /// `WM_LBUTTONDOWN`.
    PrimaryDown,
    /// Any other mouse message (button up, wheel, ...).
    Other(u32),
}

impl MouseMessage {
    /// Classify a raw message number.
    pub fn from_raw(message: u32) -> Self {
        match message {
            WM_MOUSEMOVE => MouseMessage::Move,
            WM_LBUTTONDOWN => MouseMessage::PrimaryDown,
            other => MouseMessage::Other(other),
        }
    }
}

/// The message a low-level keyboard hook received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMessage {
    /// `WM_KEYDOWN`.
    KeyDown,
    /// Anything else, including key up and the `WM_SYS*` variants.
    Other(u32),
}

impl KeyMessage {
    /// Classify a raw message number.
    pub fn from_raw(message: u32) -> Self {
        match message {
            WM_KEYDOWN => KeyMessage::KeyDown,
            other => KeyMessage::Other(other),
        }
    }
}

/// A low-level mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseInput {
    pub message: MouseMessage,
    /// Screen X coordinate.
    pub x: i32,
    /// Screen Y coordinate.
    pub y: i32,
}

impl MouseInput {
    pub fn new(message: MouseMessage, x: i32, y: i32) -> Self {
        Self { message, x, y }
    }

    /// A pointer move to `(x, y)`.
    pub fn moved(x: i32, y: i32) -> Self {
        Self::new(MouseMessage::Move, x, y)
    }

    /// A primary button press at `(x, y)`.
    pub fn primary_down(x: i32, y: i32) -> Self {
        Self::new(MouseMessage::PrimaryDown, x, y)
    }
}

/// A low-level keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub message: KeyMessage,
    /// Windows virtual key code.
    pub vk_code: u32,
}

impl KeyInput {
    pub fn new(message: KeyMessage, vk_code: u32) -> Self {
        Self { message, vk_code }
    }

    /// A key-down for `vk_code`.
    pub fn key_down(vk_code: u32) -> Self {
        Self::new(KeyMessage::KeyDown, vk_code)
    }
}
