//! Windows implementation using low-level hooks (`SetWindowsHookExW`).
//!
//! Everything here runs on the thread that owns the host window's message
//! loop: the OS delivers `WH_MOUSE_LL`/`WH_KEYBOARD_LL` callbacks on the thread
//! that installed them, so process-wide state lives in thread-locals and needs
//! no locking.

mod desktop;
mod hooks;
mod host;

pub use desktop::Win32Desktop;
pub use hooks::Win32HookBackend;
pub use host::run_host;

use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::lifecycle::{HookKind, HookSet};
use crate::signal::Signal;
use log::{debug, error, warn};
use std::cell::RefCell;
use std::io::{self, Stdout};
use windows::Win32::UI::WindowsAndMessaging::HHOOK;

type StdoutDispatcher = Dispatcher<Stdout, Win32Desktop>;

thread_local! {
    /// Writes signals to stdout for the hooks and the host window.
    static DISPATCHER: RefCell<StdoutDispatcher> =
        RefCell::new(Dispatcher::new(io::stdout(), Win32Desktop));

    /// Hooks installed from this thread.
    static HOOKS: RefCell<HookSet<Win32HookBackend>> =
        RefCell::new(HookSet::new(Win32HookBackend));
}

/// Run `f` on the dispatcher.
///
/// The dispatcher stays borrowed while the host window is being created; a
/// hook event that arrives while it is borrowed is dropped.
fn with_dispatcher(f: impl FnOnce(&mut StdoutDispatcher)) {
    DISPATCHER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut dispatcher) => f(&mut dispatcher),
        Err(_) => debug!("nested hook event dropped"),
    });
}

fn emit(signal: &Signal) {
    with_dispatcher(|dispatcher| dispatcher.emit(signal));
}

/// Handle passed to `CallNextHookEx` for `kind`.
fn hook_handle(kind: HookKind) -> Option<HHOOK> {
    HOOKS.with(|cell| cell.try_borrow().ok().and_then(|hooks| hooks.handle(kind)))
}

/// Install the mouse and keyboard hooks and emit `HookInstalled`.
///
/// Must be called on the thread that runs the message loop.
pub fn try_install_hooks() -> Result<()> {
    let signal = HOOKS.with(|cell| {
        let mut hooks = cell
            .try_borrow_mut()
            .map_err(|_| Error::Platform("hook state is busy".into()))?;
        hooks.install()
    })?;
    emit(&signal);
    Ok(())
}

/// Install the mouse and keyboard hooks, logging any failure.
pub fn install_hooks() {
    if let Err(e) = try_install_hooks() {
        error!("{e}");
    }
}

/// Remove both hooks. Returns `0`.
pub fn remove_hooks() -> i32 {
    HOOKS.with(|cell| match cell.try_borrow_mut() {
        Ok(mut hooks) => hooks.remove(),
        Err(_) => {
            warn!("hook state is busy, hooks left in place");
            0
        }
    })
}
