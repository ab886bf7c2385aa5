//! Operation handlers, one per content type, all implementing the
//! [`crate::registry::Handler`] contract. Network retrieval lives behind
//! the client boundary; what belongs here is the orchestration-visible
//! behavior: id validation, blacklist filtering, store bookkeeping,
//! progress logging and deferred-error recording.

pub mod batch;
pub mod bookmark;
pub mod fanbox;
pub mod image;
pub mod list;
pub mod maintenance;
pub mod member;
pub mod novel;
pub mod ranking;
pub mod sketch;
pub mod tags;

/// "[i of n] " progress prefix used in logs and the console title.
pub(crate) fn title_prefix(current: usize, total: usize) -> String {
    format!("[{current} of {total}] ")
}
