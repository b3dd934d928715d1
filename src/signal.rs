//! Signal types for the hook output stream.
//!
//! A [`Signal`] is one record of the output protocol. Every record starts
//! with a single kind byte (see [`SignalKind`]) followed by a payload whose
//! shape is fixed by that kind. The stream is not self-describing: a reader
//! has to know the payload shape of each kind to find the next record.

#[cfg(feature = "json")]
use serde::Serialize;

/// Text reported when a click happens and no window has focus.
pub const NO_FOREGROUND_WINDOW: &str = "No foreground window.";

/// The leading byte of every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SignalKind {
    /// The host window could not be created.
    WindowCreationFailed = 0,
    /// The host window was created.
    WindowCreationSucceeded = 1,
    /// Both hooks are registered.
    HookInstalled = 2,
    /// The pointer moved.
    MouseMoved = 3,
    /// The primary button went down.
    MouseClicked = 4,
    /// A tracked key went down.
    KeyPressed = 5,
    /// Title of the window that had focus when a click happened.
    ForegroundWindowTitle = 6,
}

impl SignalKind {
    /// All kinds in wire order.
    pub const ALL: [SignalKind; 7] = [
        SignalKind::WindowCreationFailed,
        SignalKind::WindowCreationSucceeded,
        SignalKind::HookInstalled,
        SignalKind::MouseMoved,
        SignalKind::MouseClicked,
        SignalKind::KeyPressed,
        SignalKind::ForegroundWindowTitle,
    ];

    /// The kind byte written to the stream.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Parse a kind byte read from the stream.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.get(byte as usize).copied()
    }

    /// Human-readable name, used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            SignalKind::WindowCreationFailed => "WindowCreationFailed",
            SignalKind::WindowCreationSucceeded => "WindowCreationSucceeded",
            SignalKind::HookInstalled => "HookInstalled",
            SignalKind::MouseMoved => "MouseMoved",
            SignalKind::MouseClicked => "MouseClicked",
            SignalKind::KeyPressed => "KeyPressed",
            SignalKind::ForegroundWindowTitle => "ForegroundWindowTitle",
        }
    }
}

/// A window title as 16-bit code units, always ending in a zero unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowTitle {
    units: Vec<u16>,
}

impl WindowTitle {
    /// Build a title from text.
    pub fn from_text(text: &str) -> Self {
        Self::from_units(text.encode_utf16().collect())
    }

    /// Build a title from raw code units.
    ///
    /// Anything from the first zero unit on is dropped, then a single
    /// terminator is appended.
    pub fn from_units(mut units: Vec<u16>) -> Self {
        if let Some(end) = units.iter().position(|&unit| unit == 0) {
            units.truncate(end);
        }
        units.push(0);
        Self { units }
    }

    /// The fallback title used when there is no foreground window.
    pub fn no_foreground_window() -> Self {
        Self::from_text(NO_FOREGROUND_WINDOW)
    }

    /// Code units including the terminator.
    pub fn units(&self) -> &[u16] {
        &self.units
    }

    /// Code units without the terminator.
    pub fn text_units(&self) -> &[u16] {
        &self.units[..self.units.len() - 1]
    }

    /// Number of code units including the terminator.
    ///
    /// This is the value of the length field on the wire.
    pub fn len_with_terminator(&self) -> usize {
        self.units.len()
    }

    /// Whether the title has no text.
    pub fn is_empty(&self) -> bool {
        self.units.len() == 1
    }

    /// Decode the title, replacing unpaired surrogates.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(self.text_units())
    }
}

impl std::fmt::Display for WindowTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

#[cfg(feature = "json")]
impl Serialize for WindowTitle {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

/// One record of the output protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
#[cfg_attr(feature = "json", serde(tag = "kind"))]
pub enum Signal {
    /// The host window could not be created. Always the last record.
    WindowCreationFailed,
    /// The host window was created and the message loop is about to start.
    WindowCreationSucceeded,
    /// Hooks are registered; carries the primary screen size.
    HookInstalled {
        screen_width: i32,
        screen_height: i32,
    },
    /// The pointer moved to screen coordinates `(x, y)`.
    MouseMoved { x: i32, y: i32 },
    /// The primary button went down at `(x, y)`.
    MouseClicked { x: i32, y: i32 },
    /// A tracked key went down.
    KeyPressed { key_code: u8 },
    /// Title of the foreground window, sent right after `MouseClicked`.
    ForegroundWindowTitle { title: WindowTitle },
}

impl Signal {
    /// The kind byte of this record.
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::WindowCreationFailed => SignalKind::WindowCreationFailed,
            Signal::WindowCreationSucceeded => SignalKind::WindowCreationSucceeded,
            Signal::HookInstalled { .. } => SignalKind::HookInstalled,
            Signal::MouseMoved { .. } => SignalKind::MouseMoved,
            Signal::MouseClicked { .. } => SignalKind::MouseClicked,
            Signal::KeyPressed { .. } => SignalKind::KeyPressed,
            Signal::ForegroundWindowTitle { .. } => SignalKind::ForegroundWindowTitle,
        }
    }

    /// Title signal from text.
    pub fn window_title(text: &str) -> Self {
        Signal::ForegroundWindowTitle {
            title: WindowTitle::from_text(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_bytes_are_stable() {
        assert_eq!(SignalKind::WindowCreationFailed.as_byte(), 0);
        assert_eq!(SignalKind::WindowCreationSucceeded.as_byte(), 1);
        assert_eq!(SignalKind::HookInstalled.as_byte(), 2);
        assert_eq!(SignalKind::MouseMoved.as_byte(), 3);
        assert_eq!(SignalKind::MouseClicked.as_byte(), 4);
        assert_eq!(SignalKind::KeyPressed.as_byte(), 5);
        assert_eq!(SignalKind::ForegroundWindowTitle.as_byte(), 6);
    }

    #[test]
    fn test_kind_from_byte() {
        for kind in SignalKind::ALL {
            assert_eq!(SignalKind::from_byte(kind.as_byte()), Some(kind));
        }
        assert_eq!(SignalKind::from_byte(7), None);
        assert_eq!(SignalKind::from_byte(0xFF), None);
    }

    #[test]
    fn test_title_appends_terminator() {
        let title = WindowTitle::from_text("Notepad");
        assert_eq!(title.len_with_terminator(), 8);
        assert_eq!(title.units().last(), Some(&0));
        assert_eq!(title.to_string_lossy(), "Notepad");
    }

    #[test]
    fn test_title_does_not_double_terminate() {
        let title = WindowTitle::from_units(vec![0x41, 0x42, 0]);
        assert_eq!(title.units(), &[0x41, 0x42, 0]);
    }

    #[test]
    fn test_title_drops_units_after_embedded_zero() {
        let title = WindowTitle::from_units(vec![0x41, 0, 0x42, 0x43]);
        assert_eq!(title.units(), &[0x41, 0]);
    }

    #[test]
    fn test_empty_title() {
        let title = WindowTitle::from_units(Vec::new());
        assert!(title.is_empty());
        assert_eq!(title.len_with_terminator(), 1);
        assert_eq!(title.to_string(), "");
    }

    #[test]
    fn test_fallback_title_length() {
        let title = WindowTitle::no_foreground_window();
        assert_eq!(title.len_with_terminator(), 22);
        assert_eq!(title.to_string(), "No foreground window.");
    }

    #[test]
    fn test_non_bmp_title_uses_surrogate_pairs() {
        let title = WindowTitle::from_text("a\u{1F600}");
        assert_eq!(title.len_with_terminator(), 4);
        assert_eq!(title.to_string_lossy(), "a\u{1F600}");
    }

    #[test]
    fn test_signal_kind() {
        assert_eq!(Signal::MouseMoved { x: 1, y: 2 }.kind(), SignalKind::MouseMoved);
        assert_eq!(
            Signal::window_title("x").kind(),
            SignalKind::ForegroundWindowTitle
        );
        assert_eq!(
            Signal::WindowCreationFailed.kind(),
            SignalKind::WindowCreationFailed
        );
    }
}
