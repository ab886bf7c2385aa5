use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use regex::Regex;

use crate::client::Client;
use crate::config::Config;
use crate::errors::{AppResult, EXIT_PARTIAL_FAILURE};
use crate::lists::FilterLists;
use crate::store::Store;
use crate::ui::messages;

pub mod aggregator;
pub mod main_loop;

pub use aggregator::{DeferredError, ErrorQueue};
pub use main_loop::{LoopExit, run_loop};

/// Session lifecycle. Transitions only move forward, except the in-loop
/// reload which stays in `Looping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    ConfigLoaded,
    ClientReady,
    LoggedIn,
    Looping,
    Draining,
    Closed,
}

/// The single long-lived container of configuration, authenticated client,
/// store handle and filter lists. Built once per process run, destroyed
/// exactly once, passed by reference into every operation.
pub struct SessionContext {
    pub config: Config,
    pub client: Client,
    pub lists: FilterLists,
    pub errors: ErrorQueue,
    config_path: Option<String>,
    store: Option<Store>,
    download_list_path: Option<PathBuf>,
    phase: Phase,
    error_code: i32,
}

impl SessionContext {
    /// `Uninitialized -> ConfigLoaded`. A bad or missing config file is
    /// logged and the session degrades to defaults; it never aborts here.
    pub fn bootstrap(config_path: Option<&str>) -> Self {
        let config = match Config::load(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                messages::error(format!("Failed to read configuration: {e}"));
                Config::default()
            }
        };
        SessionContext {
            config,
            client: Client::default(),
            lists: FilterLists::default(),
            errors: ErrorQueue::new(),
            config_path: config_path.map(str::to_string),
            store: None,
            download_list_path: None,
            phase: Phase::ConfigLoaded,
            error_code: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `ConfigLoaded -> ClientReady`: build the client handle and run the
    /// best-effort version check.
    pub fn init_client(&mut self) {
        self.client = Client::from_config(&self.config);
        if self.config.check_new_version {
            if let Some(v) = self.client.latest_version() {
                messages::info(format!("A newer version is available: {v}"));
            }
        }
        self.phase = Phase::ClientReady;
    }

    /// `ClientReady -> LoggedIn`. Failure leaves the phase untouched; the
    /// caller goes straight to teardown with the not-logged-in status.
    pub fn login(&mut self) -> AppResult<()> {
        self.client.login()?;
        self.phase = Phase::LoggedIn;
        Ok(())
    }

    /// `LoggedIn -> Looping` preparation: open the store, load filter
    /// lists, prepare the dated download list file, surface config warnings.
    pub fn open_store(&mut self) -> AppResult<()> {
        let store = Store::open(&self.config.root_directory, &self.config.db_path)?;
        self.store = Some(store);
        self.lists = FilterLists::load(&self.config);

        let dfilename = PathBuf::from(&self.config.download_list_directory).join(format!(
            "Downloaded_on_{}.txt",
            Local::now().date_naive().format("%Y-%m-%d")
        ));
        if let Some(parent) = dfilename.parent() {
            fs::create_dir_all(parent)?;
        }
        self.download_list_path = Some(dfilename);

        if self.config.enable_post_processing && !self.config.post_processing_cmd.is_empty() {
            messages::warn(format!(
                "Post Processing after download is enabled: {}",
                self.config.post_processing_cmd
            ));
        }
        if self.config.wants_media_encoding() && self.config.ffmpeg_codec.trim().is_empty() {
            messages::error("Missing FFmpeg codec setting; createWebm disabled.");
            self.config.create_webm = false;
        }

        if self.config.use_list {
            match crate::lists::parse_list_file("list.txt") {
                Ok(entries) => {
                    let ids: Vec<u64> = entries.iter().filter_map(|s| s.parse().ok()).collect();
                    let imported = self.store()?.import_members(&ids)?;
                    messages::info(format!("Imported {imported} members from list.txt."));
                }
                Err(e) => messages::warn(format!("Cannot import list.txt: {e}")),
            }
        }
        Ok(())
    }

    pub fn enter_loop(&mut self) {
        self.phase = Phase::Looping;
    }

    pub fn begin_drain(&mut self) {
        self.phase = Phase::Draining;
    }

    /// The store handle; operations must not run before it is open.
    pub fn store(&self) -> AppResult<&Store> {
        self.store
            .as_ref()
            .ok_or_else(|| crate::errors::AppError::Other("store is not open".to_string()))
    }

    /// Same-state transition (`Looping -> Looping`): reload configuration
    /// and filter lists without leaving the loop.
    pub fn reload_config(&mut self) -> AppResult<()> {
        match Config::load(self.config_path.as_deref()) {
            Ok(cfg) => {
                self.config = cfg;
                messages::info("Configuration reloaded.");
            }
            Err(e) => {
                messages::error(format!("Failed to reload configuration: {e}"));
            }
        }
        self.lists = FilterLists::load(&self.config);
        Ok(())
    }

    /// Append one downloaded subject to the dated download list file.
    pub fn note_downloaded(&self, line: &str) {
        if let Some(path) = &self.download_list_path {
            let result = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .and_then(|mut f| writeln!(f, "{line}"));
            if let Err(e) = result {
                messages::warn(format!("Cannot update {}: {e}", path.display()));
            }
        }
    }

    /// Escalate the final exit status, keeping an earlier, more specific
    /// fatal code when one was already set.
    pub fn set_error_code(&mut self, code: i32) {
        if self.error_code == 0 {
            self.error_code = code;
        }
    }

    pub fn error_code(&self) -> i32 {
        self.error_code
    }

    /// Mark the run as partially failed (some deferred error was recorded).
    pub fn mark_partial_failure(&mut self) {
        self.set_error_code(EXIT_PARTIAL_FAILURE);
    }

    /// Persist a raw payload captured by a handler to a diagnostic dump
    /// file named after the sanitized subject. Contents are not interpreted.
    pub fn dump_payload(&self, subject: &str, payload: &str) {
        let sanitized = sanitize_filename(subject);
        let fname = format!("Dump_{sanitized}.html");
        match fs::write(&fname, payload) {
            Ok(()) => messages::info(format!("Dumped payload to {fname}")),
            Err(e) => messages::warn(format!("Cannot write {fname}: {e}")),
        }
    }

    /// `Draining -> Closed`: close the store handle unconditionally, even
    /// when the loop exited through an error path. Returns the final exit
    /// status.
    pub fn close(&mut self) -> i32 {
        if let Some(store) = self.store.take() {
            if let Err(e) = store.close() {
                messages::error(format!("Failed to close database: {e}"));
            }
        }
        self.phase = Phase::Closed;
        self.error_code
    }
}

/// Replace anything unsafe for a filename.
pub fn sanitize_filename(raw: &str) -> String {
    let re = Regex::new(r"[^\w\-.]+").unwrap();
    re.replace_all(raw.trim(), "_").to_string()
}
