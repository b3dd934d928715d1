//! Hook registration lifecycle.
//!
//! [`HookSet`] owns the two global hook slots (mouse and keyboard). It is
//! generic over a [`HookBackend`] so the state machine can be driven without
//! touching the OS.

use crate::error::{Error, Result};
use crate::signal::Signal;
use log::{debug, warn};
use std::fmt;

/// Which global hook a slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    Mouse,
    Keyboard,
}

/// Registers and unregisters global hooks with the OS.
pub trait HookBackend {
    /// OS-assigned handle of a registered hook.
    type Handle: Copy + fmt::Debug;

    /// Install the callback for `kind` as a global low-level hook.
    fn register(&mut self, kind: HookKind) -> Result<Self::Handle>;

    /// Remove a hook previously returned by [`register`](Self::register).
    fn unregister(&mut self, kind: HookKind, handle: Self::Handle) -> Result<()>;

    /// Primary screen size in pixels.
    fn screen_size(&self) -> (i32, i32);
}

/// The mouse and keyboard hook slots.
///
/// Installing over an existing registration removes the old hooks first, and
/// dropping the set removes whatever is still installed.
pub struct HookSet<B: HookBackend> {
    backend: B,
    mouse: Option<B::Handle>,
    keyboard: Option<B::Handle>,
}

impl<B: HookBackend> HookSet<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            mouse: None,
            keyboard: None,
        }
    }

    /// Register both hooks.
    ///
    /// On success returns the `HookInstalled` signal carrying the current
    /// screen size, for the caller to emit. If either registration fails no
    /// hook is left installed.
    pub fn install(&mut self) -> Result<Signal> {
        if self.is_any_installed() {
            debug!("hooks already installed, reinstalling");
            self.remove();
        }

        let mouse = self.backend.register(HookKind::Mouse)?;
        self.mouse = Some(mouse);

        match self.backend.register(HookKind::Keyboard) {
            Ok(keyboard) => self.keyboard = Some(keyboard),
            Err(e) => {
                self.remove();
                return Err(e);
            }
        }
        debug!("hooks installed: mouse={:?} keyboard={:?}", self.mouse, self.keyboard);

        let (screen_width, screen_height) = self.backend.screen_size();
        Ok(Signal::HookInstalled {
            screen_width,
            screen_height,
        })
    }

    /// Unregister whatever is installed.
    ///
    /// Always returns status `0`; unregister failures are only logged.
    pub fn remove(&mut self) -> i32 {
        for kind in [HookKind::Mouse, HookKind::Keyboard] {
            let Some(handle) = self.slot_mut(kind).take() else {
                continue;
            };
            match self.backend.unregister(kind, handle) {
                Ok(()) => debug!("{kind:?} hook removed"),
                Err(e) => warn!("{kind:?} hook {handle:?} not removed cleanly: {e}"),
            }
        }
        0
    }

    /// Handle of the hook in `kind`'s slot.
    pub fn handle(&self, kind: HookKind) -> Option<B::Handle> {
        match kind {
            HookKind::Mouse => self.mouse,
            HookKind::Keyboard => self.keyboard,
        }
    }

    pub fn is_installed(&self, kind: HookKind) -> bool {
        self.handle(kind).is_some()
    }

    pub fn is_any_installed(&self) -> bool {
        self.mouse.is_some() || self.keyboard.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn slot_mut(&mut self, kind: HookKind) -> &mut Option<B::Handle> {
        match kind {
            HookKind::Mouse => &mut self.mouse,
            HookKind::Keyboard => &mut self.keyboard,
        }
    }
}

impl<B: HookBackend> Drop for HookSet<B> {
    fn drop(&mut self) {
        if self.is_any_installed() {
            self.remove();
        }
    }
}

/// Map an OS registration error for `kind`.
pub fn start_failed(kind: HookKind, reason: impl fmt::Display) -> Error {
    Error::HookStartFailed(format!("{kind:?} hook: {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Register(HookKind, u32),
        Unregister(HookKind, u32),
    }

    #[derive(Default)]
    struct FakeBackend {
        calls: Rc<RefCell<Vec<Call>>>,
        next: u32,
        refuse: Option<HookKind>,
        fail_unregister: bool,
    }

    impl HookBackend for FakeBackend {
        type Handle = u32;

        fn register(&mut self, kind: HookKind) -> Result<u32> {
            if self.refuse == Some(kind) {
                return Err(start_failed(kind, "access denied"));
            }
            self.next += 1;
            self.calls.borrow_mut().push(Call::Register(kind, self.next));
            Ok(self.next)
        }

        fn unregister(&mut self, kind: HookKind, handle: u32) -> Result<()> {
            self.calls.borrow_mut().push(Call::Unregister(kind, handle));
            if self.fail_unregister {
                Err(Error::HookStopFailed("invalid hook handle".into()))
            } else {
                Ok(())
            }
        }

        fn screen_size(&self) -> (i32, i32) {
            (1920, 1080)
        }
    }

    #[test]
    fn test_install_registers_both_and_reports_screen() {
        let mut hooks = HookSet::new(FakeBackend::default());
        let signal = hooks.install().unwrap();
        assert_eq!(
            signal,
            Signal::HookInstalled {
                screen_width: 1920,
                screen_height: 1080
            }
        );
        assert_eq!(hooks.handle(HookKind::Mouse), Some(1));
        assert_eq!(hooks.handle(HookKind::Keyboard), Some(2));
    }

    #[test]
    fn test_remove_unregisters_both() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = HookSet::new(FakeBackend {
            calls: calls.clone(),
            ..Default::default()
        });
        hooks.install().unwrap();
        assert_eq!(hooks.remove(), 0);
        assert!(!hooks.is_any_installed());
        assert_eq!(
            calls.borrow()[2..],
            [
                Call::Unregister(HookKind::Mouse, 1),
                Call::Unregister(HookKind::Keyboard, 2)
            ]
        );
    }

    #[test]
    fn test_remove_when_nothing_installed() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = HookSet::new(FakeBackend {
            calls: calls.clone(),
            ..Default::default()
        });
        assert_eq!(hooks.remove(), 0);
        assert_eq!(hooks.remove(), 0);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_reinstall_removes_previous_hooks() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = HookSet::new(FakeBackend {
            calls: calls.clone(),
            ..Default::default()
        });
        hooks.install().unwrap();
        hooks.install().unwrap();
        assert_eq!(
            *calls.borrow(),
            vec![
                Call::Register(HookKind::Mouse, 1),
                Call::Register(HookKind::Keyboard, 2),
                Call::Unregister(HookKind::Mouse, 1),
                Call::Unregister(HookKind::Keyboard, 2),
                Call::Register(HookKind::Mouse, 3),
                Call::Register(HookKind::Keyboard, 4),
            ]
        );
    }

    #[test]
    fn test_keyboard_failure_rolls_back_mouse() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = HookSet::new(FakeBackend {
            calls: calls.clone(),
            refuse: Some(HookKind::Keyboard),
            ..Default::default()
        });
        let err = hooks.install().unwrap_err();
        assert!(matches!(err, Error::HookStartFailed(_)));
        assert!(!hooks.is_any_installed());
        assert_eq!(
            *calls.borrow(),
            vec![
                Call::Register(HookKind::Mouse, 1),
                Call::Unregister(HookKind::Mouse, 1),
            ]
        );
    }

    #[test]
    fn test_mouse_failure_installs_nothing() {
        let mut hooks = HookSet::new(FakeBackend {
            refuse: Some(HookKind::Mouse),
            ..Default::default()
        });
        assert!(hooks.install().is_err());
        assert!(!hooks.is_installed(HookKind::Keyboard));
    }

    #[test]
    fn test_unregister_failure_still_returns_zero() {
        let mut hooks = HookSet::new(FakeBackend {
            fail_unregister: true,
            ..Default::default()
        });
        hooks.install().unwrap();
        assert_eq!(hooks.remove(), 0);
        assert!(!hooks.is_any_installed());
    }

    #[test]
    fn test_drop_removes_hooks() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        {
            let mut hooks = HookSet::new(FakeBackend {
                calls: calls.clone(),
                ..Default::default()
            });
            hooks.install().unwrap();
        }
        assert_eq!(calls.borrow().len(), 4);
    }
}
