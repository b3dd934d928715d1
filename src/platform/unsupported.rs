//! Fallback for targets without global low-level input hooks.

use crate::error::{Error, Result};
use log::error;

fn not_supported() -> Error {
    Error::NotSupported(format!(
        "global low-level input hooks are not available on {}",
        std::env::consts::OS
    ))
}

pub fn try_install_hooks() -> Result<()> {
    Err(not_supported())
}

pub fn install_hooks() {
    if let Err(e) = try_install_hooks() {
        error!("{e}");
    }
}

pub fn remove_hooks() -> i32 {
    0
}

pub fn run_host() -> Result<i32> {
    Err(not_supported())
}
