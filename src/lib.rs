//! pixivdl library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules of the orchestration core.

pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod lists;
pub mod registry;
pub mod resolve;
pub mod session;
pub mod store;
pub mod ui;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;

use cli::Cli;
use errors::{EXIT_ABORTED, EXIT_NOT_LOGGED_IN};
use registry::Registry;
use session::{LoopExit, SessionContext, run_loop};
use ui::Console;
use ui::{menu, messages};

/// Entry point used by main.rs. Builds the session, runs the loop, tears
/// everything down and returns the process exit status.
pub fn run() -> i32 {
    let cli = Cli::parse();

    menu::set_console_title("");
    menu::print_header();

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = interrupted.clone();
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)).ok();
    }
    let mut console = Console::stdin(interrupted);

    let registry = Registry::new();
    let mut session = SessionContext::bootstrap(cli.config_location.as_deref());
    session.init_client();

    messages::warn("Username login is broken, use Cookies to log in.");
    match session.login() {
        Ok(()) => match session.open_store() {
            Ok(()) => {
                match run_loop(&mut session, &registry, &cli, &mut console) {
                    Ok(LoopExit::Done) => {}
                    Ok(LoopExit::Aborted) => {
                        messages::info("Aborted by operator.");
                        session.set_error_code(EXIT_ABORTED);
                    }
                    Err(e) => {
                        messages::error(format!("{e}"));
                        session.mark_partial_failure();
                    }
                }
                // Errors recorded by the last iteration have not been
                // drained inside the loop; surface them before teardown.
                let pending = session.errors.drain();
                if !pending.is_empty() {
                    for err in &pending {
                        messages::error(format!(
                            "{}: {} ==> {}",
                            err.kind, err.subject, err.message
                        ));
                    }
                    session.mark_partial_failure();
                }
            }
            Err(e) => {
                messages::error(format!("Cannot open database: {e}"));
                session.mark_partial_failure();
            }
        },
        Err(e) => {
            messages::error(format!("{e}"));
            session.set_error_code(EXIT_NOT_LOGGED_IN);
        }
    }

    session.close()
}
