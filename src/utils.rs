//! Process-level helpers for the demo binary
//!
//! - Logging to a file in the data directory
//! - Panic hooks that restore the terminal first
//! - Config/data directories and `--version` text

pub mod logging;
pub mod panic;
pub mod paths;

pub use logging::initialize_logging;
pub use panic::initialize_panic_handler;
pub use paths::{get_config_dir, get_data_dir, version};
