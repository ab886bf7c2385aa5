use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use clap::Parser;

use pixivdl::cli::Cli;
use pixivdl::errors::AppResult;
use pixivdl::registry::{Entry, Handler, Registry};
use pixivdl::resolve::{Need, ResolvedParams};
use pixivdl::session::{LoopExit, Phase, SessionContext, run_loop};
use pixivdl::ui::Console;

struct StubHandler {
    calls: Arc<AtomicUsize>,
}

impl Handler for StubHandler {
    fn process(&self, _session: &mut SessionContext, _params: &ResolvedParams) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

const NO_NEEDS: &[Need] = &[];

fn stub_registry(calls: Arc<AtomicUsize>) -> Registry {
    Registry::from_entries(vec![(
        "1",
        Entry::new(Box::new(StubHandler { calls }), NO_NEEDS, true),
    )])
}

fn console(input: &str, interrupted: bool) -> Console<Cursor<Vec<u8>>> {
    Console::new(
        Cursor::new(input.as_bytes().to_vec()),
        Arc::new(AtomicBool::new(interrupted)),
    )
}

fn session() -> SessionContext {
    // No config file: the session degrades to defaults.
    let mut s = SessionContext::bootstrap(Some("/nonexistent/pixivdl-test-config.yaml"));
    s.init_client();
    s
}

#[test]
fn deferred_errors_drain_in_insertion_order_and_clear() {
    let mut s = session();
    s.errors.record("Domain", "1", "first");
    s.errors.record("Domain", "2", "second");
    s.errors.record("Member", "3", "third");

    let drained = s.errors.drain();
    assert_eq!(drained.len(), 3);
    assert_eq!(
        drained
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>(),
        vec!["first", "second", "third"]
    );
    assert!(s.errors.drain().is_empty());
}

#[test]
fn draining_a_deferred_error_escalates_the_exit_status() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = stub_registry(calls);
    let cli = Cli::parse_from(["pixivdl"]);
    let mut s = session();
    s.errors.record("Domain", "42", "boom");

    let mut con = console("x\n", false);
    let exit = run_loop(&mut s, &registry, &cli, &mut con).unwrap();
    assert_eq!(exit, LoopExit::Done);
    assert_eq!(s.error_code(), 1);
}

#[test]
fn unknown_selection_is_reported_and_the_loop_continues() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = stub_registry(calls.clone());
    let cli = Cli::parse_from(["pixivdl"]);
    let mut s = session();

    // Unknown token, then the stub, then exit.
    let mut con = console("zz\n1\nx\n", false);
    let exit = run_loop(&mut s, &registry, &cli, &mut con).unwrap();
    assert_eq!(exit, LoopExit::Done);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(s.error_code(), 0);
}

#[test]
fn dispatching_an_unknown_token_does_not_raise() {
    let registry = Registry::new();
    let mut s = session();
    let params = ResolvedParams::default();
    assert!(registry.dispatch("zz", &mut s, &params).is_ok());
    assert!(s.errors.is_empty());
}

#[test]
fn exit_when_done_runs_exactly_one_iteration() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = stub_registry(calls.clone());
    let cli = Cli::parse_from(["pixivdl", "-s", "1", "-x"]);
    let mut s = session();

    let mut con = console("", false);
    let exit = run_loop(&mut s, &registry, &cli, &mut con).unwrap();
    assert_eq!(exit, LoopExit::Done);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn batch_context_is_cleared_after_the_first_iteration() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = stub_registry(calls.clone());
    // No -x: after the batch iteration the loop falls back to the menu.
    let cli = Cli::parse_from(["pixivdl", "-s", "1"]);
    let mut s = session();

    let mut con = console("x\n", false);
    let exit = run_loop(&mut s, &registry, &cli, &mut con).unwrap();
    assert_eq!(exit, LoopExit::Done);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn end_of_input_terminates_the_loop_cleanly() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = stub_registry(calls);
    let cli = Cli::parse_from(["pixivdl"]);
    let mut s = session();

    let mut con = console("", false);
    let exit = run_loop(&mut s, &registry, &cli, &mut con).unwrap();
    assert_eq!(exit, LoopExit::Done);
    assert_eq!(s.error_code(), 0);
}

#[test]
fn declined_interrupt_aborts_without_running_anything() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = stub_registry(calls.clone());
    let cli = Cli::parse_from(["pixivdl", "-s", "1", "-x"]);
    let mut s = session();

    // Interrupt already pending; the operator declines to continue.
    let mut con = console("n\n", true);
    let exit = run_loop(&mut s, &registry, &cli, &mut con).unwrap();
    assert_eq!(exit, LoopExit::Aborted);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn accepted_interrupt_resumes_and_the_scheduled_operation_runs() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = stub_registry(calls.clone());
    let cli = Cli::parse_from(["pixivdl", "-s", "1", "-x"]);
    let mut s = session();

    let mut con = console("y\n", true);
    let exit = run_loop(&mut s, &registry, &cli, &mut con).unwrap();
    assert_eq!(exit, LoopExit::Done);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn failed_login_never_enters_the_loop() {
    let mut s = session();
    // Default config has no cookie, so login fails.
    assert!(s.login().is_err());
    assert_ne!(s.phase(), Phase::Looping);
    assert_eq!(s.phase(), Phase::ClientReady);
}

#[test]
fn reload_without_file_changes_is_idempotent() {
    let mut s = session();
    s.reload_config().unwrap();
    let first = s.config.clone();
    s.reload_config().unwrap();
    assert_eq!(first, s.config);
}
