//! Logging setup.

use chrono::Local;
use env_logger::{Builder, Env};
use std::io::Write;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,hyper=warn,h2=warn,reqwest=warn";

/// Installs the global logger. Later calls are ignored.
pub fn init() {
    let result = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();

    if result.is_err() {
        log::debug!("Logger already initialised");
    }
}
