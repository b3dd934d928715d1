//! Virtual key codes reported by the keyboard hook.

/// A key whose presses are reported.
///
/// Only Escape and the first six function keys are tracked; every other key
/// is passed through without producing a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TrackedKey {
    Escape = 0x1B,
    F1 = 0x70,
    F2 = 0x71,
    F3 = 0x72,
    F4 = 0x73,
    F5 = 0x74,
    F6 = 0x75,
}

impl TrackedKey {
    /// Every tracked key.
    pub const ALL: [TrackedKey; 7] = [
        TrackedKey::Escape,
        TrackedKey::F1,
        TrackedKey::F2,
        TrackedKey::F3,
        TrackedKey::F4,
        TrackedKey::F5,
        TrackedKey::F6,
    ];

    /// Look up a Windows virtual key code.
    pub fn from_vk(vk: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.vk() as u32 == vk)
    }

    /// The virtual key code, as written in `KeyPressed` records.
    pub fn vk(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracked_keys() {
        assert_eq!(TrackedKey::from_vk(0x1B), Some(TrackedKey::Escape));
        assert_eq!(TrackedKey::from_vk(0x70), Some(TrackedKey::F1));
        assert_eq!(TrackedKey::from_vk(0x75), Some(TrackedKey::F6));
    }

    #[test]
    fn test_untracked_keys() {
        assert_eq!(TrackedKey::from_vk(0x76), None); // F7
        assert_eq!(TrackedKey::from_vk(0x41), None); // A
        assert_eq!(TrackedKey::from_vk(0x0D), None); // Enter
        // Truncation to u8 must not alias onto a tracked key.
        assert_eq!(TrackedKey::from_vk(0x11B), None);
    }

    #[test]
    fn test_vk_roundtrip() {
        for key in TrackedKey::ALL {
            assert_eq!(TrackedKey::from_vk(key.vk() as u32), Some(key));
        }
    }
}
