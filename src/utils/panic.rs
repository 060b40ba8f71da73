//! Panic reporting
//!
//! The terminal is put back into cooked mode before anything is printed, the
//! report goes to the log file with ANSI codes stripped, and the process exits
//! with a failure status.

use std::panic::{self, PanicHookInfo};
use std::process;

use color_eyre::config::{HookBuilder, PanicHook};
use color_eyre::eyre::Result;
use tracing::error;

use crate::infrastructure::tui::{real::RealTui, TuiLike};
use crate::utils::paths::{get_data_dir, LOG_ENV, LOG_FILE};

/// Where to look when reporting a crash: the log file and how to make it
/// verbose.
fn support_hint() -> String {
    format!(
        "Attach {} and rerun with {}=debug for selection and animation events",
        get_data_dir().join(LOG_FILE.as_str()).display(),
        LOG_ENV.as_str(),
    )
}

fn restore_terminal() {
    if let Ok(mut tui) = RealTui::new() {
        if let Err(e) = tui.exit() {
            error!("Unable to exit Terminal: {e:?}");
        }
    }
}

#[cfg(not(debug_assertions))]
fn report(panic_hook: &PanicHook, panic_info: &PanicHookInfo<'_>) {
    use human_panic::{handle_dump, print_msg, Metadata};

    let meta = Metadata::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        .support(support_hint());
    let file_path = handle_dump(&meta, panic_info);
    if let Err(e) = print_msg(file_path, &meta) {
        eprintln!("human-panic: printing error message to console failed: {e}");
    }
    eprintln!("{}", panic_hook.panic_report(panic_info));
}

#[cfg(debug_assertions)]
fn report(_panic_hook: &PanicHook, panic_info: &PanicHookInfo<'_>) {
    better_panic::Settings::auto()
        .most_recent_first(false)
        .lineno_suffix(true)
        .verbosity(better_panic::Verbosity::Full)
        .create_panic_handler()(panic_info);
}

pub fn initialize_panic_handler() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default()
        .panic_section(format!(
            "This is a bug in {}. {}",
            env!("CARGO_PKG_NAME"),
            support_hint()
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();

        let report_text = panic_hook.panic_report(panic_info).to_string();
        error!("Panic: {}", strip_ansi_escapes::strip_str(report_text));

        report(&panic_hook, panic_info);
        process::exit(libc::EXIT_FAILURE);
    }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_hint_names_log_file_and_level() {
        let hint = support_hint();
        assert!(hint.contains("segtui.log"), "got {hint}");
        assert!(hint.contains("SEGTUI_LOGLEVEL=debug"), "got {hint}");
    }
}
