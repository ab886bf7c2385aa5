use std::io::BufRead;

use crate::cli::Cli;
use crate::errors::{AppError, AppResult};
use crate::lists::FilterLists;
use crate::registry::Registry;
use crate::resolve::Resolver;
use crate::session::SessionContext;
use crate::ui::menu;
use crate::ui::messages;
use crate::ui::{Console, InterruptDecision};

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Exit token, end of input, or single-shot completion.
    Done,
    /// The operator declined to continue after an interrupt.
    Aborted,
}

/// The control-flow engine: executes exactly one operation (batch mode with
/// `--exit-when-done`) or loops over menu selections until an exit
/// condition. Deferred errors are drained and logged at the top of every
/// iteration.
pub fn run_loop<R: BufRead>(
    session: &mut SessionContext,
    registry: &Registry,
    cli: &Cli,
    console: &mut Console<R>,
) -> AppResult<LoopExit> {
    session.enter_loop();

    let mut op_is_valid = cli
        .start_action
        .as_deref()
        .is_some_and(|t| registry.is_batch_token(t));
    let mut args: Vec<String> = cli.args.clone();
    let mut all_mode = cli.number_of_pages == Some(0);
    let mut number_of_pages = cli.number_of_pages;

    let exit = loop {
        // 1. Drain deferred errors from the previous iteration.
        let pending = session.errors.drain();
        if !pending.is_empty() {
            for err in &pending {
                messages::error(format!("{}: {} ==> {}", err.kind, err.subject, err.message));
            }
            session.mark_partial_failure();
        }

        // Interrupt observed between iterations.
        if console.take_interrupt() {
            match confirm_or_abort(console)? {
                Some(LoopExit::Aborted) => break LoopExit::Aborted,
                Some(LoopExit::Done) => break LoopExit::Done,
                None => {}
            }
        }

        // 2. Obtain a selection: the invocation token once, then the menu.
        let sel = if op_is_valid {
            cli.start_action.clone().unwrap_or_default()
        } else {
            menu::print_menu();
            // Filter lists are re-read on every menu display so edits take
            // effect without a restart.
            session.lists = FilterLists::load(&session.config);
            match console.read_selection() {
                Ok(s) => s,
                Err(AppError::Eof) => break LoopExit::Done,
                Err(AppError::Interrupted) => {
                    match confirm_or_abort(console)? {
                        Some(exit) => break exit,
                        None => continue,
                    }
                }
                Err(e) => return Err(e),
            }
        };

        // 3. Special tokens.
        if sel == "x" {
            break LoopExit::Done;
        } else if sel == "-all" {
            all_mode = !all_mode;
            number_of_pages = if all_mode {
                Some(0)
            } else {
                Some(session.config.number_of_page)
            };
            println!("{} mode activated", if all_mode { "All" } else { "Paged" });
        } else {
            match run_one(
                session,
                registry,
                cli,
                console,
                &sel,
                op_is_valid,
                &args,
                number_of_pages,
            ) {
                Ok(()) => {}
                Err(AppError::Eof) => break LoopExit::Done,
                Err(AppError::Interrupted) => match confirm_or_abort(console)? {
                    Some(exit) => break exit,
                    None => {}
                },
                Err(e) => return Err(e),
            }
        }

        // 5. Single-shot termination; otherwise fall back to the menu.
        if cli.exit_when_done {
            break LoopExit::Done;
        }
        op_is_valid = false;
        args.clear();
    };

    session.begin_drain();
    Ok(exit)
}

/// Resolve parameters and dispatch one selection. Recoverable failures are
/// converted to log lines (plus a deferred record for domain errors) and
/// never escape; only end-of-input, interrupts and truly fatal errors do.
#[allow(clippy::too_many_arguments)]
fn run_one<R: BufRead>(
    session: &mut SessionContext,
    registry: &Registry,
    cli: &Cli,
    console: &mut Console<R>,
    sel: &str,
    op_is_valid: bool,
    args: &[String],
    number_of_pages: Option<u32>,
) -> AppResult<()> {
    let Some(entry) = registry.get(sel) else {
        messages::error(format!("Unknown selection: {sel}"));
        return Ok(());
    };

    let params = {
        let mut resolver = Resolver {
            cli,
            config: &session.config,
            console,
            number_of_pages,
            premium: session.client.is_premium(),
        };
        match resolver.resolve(entry.schema, op_is_valid, args) {
            Ok(p) => p,
            Err(AppError::Validation(msg)) => {
                // Aborts only this operation's resolution.
                messages::error(msg);
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    };

    match entry.handler.process(session, &params) {
        Ok(()) => Ok(()),
        Err(AppError::Validation(msg)) => {
            messages::error(msg);
            Ok(())
        }
        Err(AppError::Domain {
            message,
            code,
            subject,
            payload,
        }) => {
            if let Some(page) = &payload {
                session.dump_payload(&subject, page);
            }
            messages::error(format!("{subject}: {message}"));
            session.errors.record("Domain", subject, message);
            session.set_error_code(code);
            session.mark_partial_failure();
            Ok(())
        }
        Err(e @ (AppError::Eof | AppError::Interrupted)) => Err(e),
        Err(e) => {
            // IO/database failures inside a handler are survivable at the
            // session level; they surface at the next drain.
            messages::error(format!("{sel}: {e}"));
            session.errors.record("Handler", sel.to_string(), e.to_string());
            Ok(())
        }
    }
}

/// Operator decision after an interrupt: `None` resumes the loop.
fn confirm_or_abort<R: BufRead>(console: &mut Console<R>) -> AppResult<Option<LoopExit>> {
    messages::info("Keyboard Interrupt.");
    match console.confirm_interrupt() {
        Ok(InterruptDecision::Continue) => Ok(None),
        Ok(InterruptDecision::Abort) => Ok(Some(LoopExit::Aborted)),
        Err(AppError::Eof) => Ok(Some(LoopExit::Done)),
        Err(e) => Err(e),
    }
}
