//! Host shell: creates the hidden window, streams signals to stdout until
//! the window's message loop quits.
//!
//! Diagnostics go to stderr; set `RUST_LOG=debug` for lifecycle details.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use log::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match hookcast::run_host() {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
