//! # hookcast
//!
//! Global low-level input hooks that stream compact binary event records to
//! stdout for another process to consume.
//!
//! ## Overview
//!
//! - A hidden host window runs the message loop the hooks are delivered on
//!   ([`run_host`]).
//! - [`install_hooks`] registers a mouse and a keyboard hook and emits
//!   [`Signal::HookInstalled`]; [`remove_hooks`] unregisters them.
//! - The hooks report pointer moves, primary clicks (each followed by the
//!   foreground window title) and presses of Escape and F1-F6.
//! - Every record is written and flushed as soon as it is produced.
//!
//! ## Reading the stream
//!
//! ```no_run
//! use hookcast::{Signal, SignalReader};
//! use std::process::{Command, Stdio};
//!
//! let mut child = Command::new("hookcast")
//!     .stdout(Stdio::piped())
//!     .spawn()
//!     .expect("failed to spawn hookcast");
//! let stdout = child.stdout.take().unwrap();
//!
//! for signal in SignalReader::new(stdout) {
//!     match signal.expect("protocol error") {
//!         Signal::MouseClicked { x, y } => println!("click at ({x}, {y})"),
//!         Signal::ForegroundWindowTitle { title } => println!("  in {title}"),
//!         other => println!("{other:?}"),
//!     }
//! }
//! ```
//!
//! The wire format is documented in [`codec`].

pub mod codec;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod keycode;
pub mod lifecycle;
pub mod shell;
pub mod signal;

mod platform;

// Re-exports
pub use codec::{SignalReader, SignalWriter};
pub use dispatch::{Desktop, Dispatcher};
pub use error::{Error, Result};
pub use event::{KeyInput, MouseInput};
pub use keycode::TrackedKey;
pub use lifecycle::{HookBackend, HookKind, HookSet};
pub use signal::{NO_FOREGROUND_WINDOW, Signal, SignalKind, WindowTitle};

// Lifecycle entry points and host shell
pub use platform::{install_hooks, remove_hooks, run_host, try_install_hooks};
#[cfg(target_os = "windows")]
pub use platform::{Win32Desktop, Win32HookBackend};
