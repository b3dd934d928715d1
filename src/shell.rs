//! Host window startup.
//!
//! The host window installs the hooks from its creation handler. [`start`]
//! decides what the stream reports for that step: `HookInstalled` followed by
//! `WindowCreationSucceeded` when both the hooks and the window come up, and
//! only `WindowCreationFailed` otherwise, with no hook left installed.

use crate::dispatch::{Desktop, Dispatcher};
use crate::error::{Error, Result};
use crate::lifecycle::{HookBackend, HookSet};
use crate::signal::Signal;
use log::debug;
use std::io::Write;

/// Creation handler handed to the window; an `Err` must abort creation.
pub type OnCreate<'a> = dyn FnMut() -> Result<()> + 'a;

/// Create the host window with `create_window` and report the outcome.
///
/// `create_window` runs the platform window creation and calls the handler
/// it is given while the window handles its creation message. The
/// `HookInstalled` record is held back until creation has succeeded.
pub fn start<B, W, D, F>(
    hooks: &mut HookSet<B>,
    dispatcher: &mut Dispatcher<W, D>,
    create_window: F,
) -> Result<()>
where
    B: HookBackend,
    W: Write,
    D: Desktop,
    F: FnOnce(&mut OnCreate<'_>) -> Result<()>,
{
    let mut installed = None;
    let created = {
        let mut on_create = || -> Result<()> {
            installed = Some(hooks.install()?);
            Ok(())
        };
        create_window(&mut on_create)
    };

    match (created, installed) {
        (Ok(()), Some(signal)) => {
            dispatcher.emit(&signal);
            dispatcher.emit(&Signal::WindowCreationSucceeded);
            Ok(())
        }
        (Ok(()), None) => {
            dispatcher.emit(&Signal::WindowCreationFailed);
            Err(Error::WindowCreationFailed(
                "window created without running its creation handler".into(),
            ))
        }
        (Err(e), _) => {
            if hooks.is_any_installed() {
                debug!("window creation failed after hooks were installed");
                hooks.remove();
            }
            dispatcher.emit(&Signal::WindowCreationFailed);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::SignalReader;
    use crate::lifecycle::{HookKind, start_failed};
    use crate::signal::WindowTitle;

    struct NoWindows;

    impl Desktop for NoWindows {
        fn foreground_window_title(&self) -> Result<Option<WindowTitle>> {
            Ok(None)
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        next: u32,
        refuse: Option<HookKind>,
    }

    impl HookBackend for FakeBackend {
        type Handle = u32;

        fn register(&mut self, kind: HookKind) -> Result<u32> {
            if self.refuse == Some(kind) {
                return Err(start_failed(kind, "access denied"));
            }
            self.next += 1;
            Ok(self.next)
        }

        fn unregister(&mut self, _kind: HookKind, _handle: u32) -> Result<()> {
            Ok(())
        }

        fn screen_size(&self) -> (i32, i32) {
            (1280, 720)
        }
    }

    fn signals(dispatcher: &Dispatcher<Vec<u8>, NoWindows>) -> Vec<Signal> {
        SignalReader::new(dispatcher.sink().as_slice())
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    /// Behaves like a window whose creation message returns -1 on error.
    fn window(on_create: &mut OnCreate<'_>) -> Result<()> {
        on_create().map_err(|e| Error::WindowCreationFailed(e.to_string()))
    }

    #[test]
    fn test_success_reports_hooks_then_window() {
        let mut hooks = HookSet::new(FakeBackend::default());
        let mut dispatcher = Dispatcher::new(Vec::new(), NoWindows);

        start(&mut hooks, &mut dispatcher, window).unwrap();

        assert_eq!(
            signals(&dispatcher),
            vec![
                Signal::HookInstalled {
                    screen_width: 1280,
                    screen_height: 720
                },
                Signal::WindowCreationSucceeded,
            ]
        );
        assert!(hooks.is_installed(HookKind::Mouse));
        assert!(hooks.is_installed(HookKind::Keyboard));
    }

    #[test]
    fn test_refused_keyboard_hook_fails_creation() {
        let mut hooks = HookSet::new(FakeBackend {
            refuse: Some(HookKind::Keyboard),
            ..Default::default()
        });
        let mut dispatcher = Dispatcher::new(Vec::new(), NoWindows);

        let err = start(&mut hooks, &mut dispatcher, window).unwrap_err();

        assert!(matches!(err, Error::WindowCreationFailed(_)));
        assert_eq!(signals(&dispatcher), vec![Signal::WindowCreationFailed]);
        assert!(!hooks.is_any_installed());
    }

    #[test]
    fn test_window_failure_after_install_removes_hooks() {
        let mut hooks = HookSet::new(FakeBackend::default());
        let mut dispatcher = Dispatcher::new(Vec::new(), NoWindows);

        let result = start(&mut hooks, &mut dispatcher, |on_create| {
            on_create()?;
            Err(Error::WindowCreationFailed("out of desktop heap".into()))
        });

        assert!(result.is_err());
        assert_eq!(signals(&dispatcher), vec![Signal::WindowCreationFailed]);
        assert!(!hooks.is_any_installed());
    }

    #[test]
    fn test_window_failure_before_creation_message() {
        let mut hooks = HookSet::new(FakeBackend::default());
        let mut dispatcher = Dispatcher::new(Vec::new(), NoWindows);

        let result = start(&mut hooks, &mut dispatcher, |_| {
            Err(Error::WindowCreationFailed("class not registered".into()))
        });

        assert!(result.is_err());
        assert_eq!(signals(&dispatcher), vec![Signal::WindowCreationFailed]);
        assert_eq!(hooks.backend().next, 0);
    }

    #[test]
    fn test_missing_creation_message_is_a_failure() {
        let mut hooks = HookSet::new(FakeBackend::default());
        let mut dispatcher = Dispatcher::new(Vec::new(), NoWindows);

        assert!(start(&mut hooks, &mut dispatcher, |_| Ok(())).is_err());
        assert_eq!(signals(&dispatcher), vec![Signal::WindowCreationFailed]);
    }
}
