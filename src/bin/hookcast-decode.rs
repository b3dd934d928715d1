//! Decode a hookcast stream from stdin into JSON lines on stdout.
//!
//! ```text
//! hookcast | hookcast-decode
//! ```

use hookcast::{Result, SignalReader};
use log::error;
use std::io::{self, Write};

fn run() -> Result<()> {
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    for signal in SignalReader::new(stdin) {
        let line = serde_json::to_string(&signal?).map_err(io::Error::from)?;
        writeln!(stdout, "{line}")?;
        stdout.flush()?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}
