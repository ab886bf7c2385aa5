use std::fs;
use std::path::Path;

use crate::errors::{AppError, AppResult};
use crate::lists::parse_list_file;
use crate::registry::Handler;
use crate::resolve::ResolvedParams;
use crate::session::SessionContext;
use crate::ui::messages;

fn table_selected(flag: Option<char>) -> bool {
    matches!(flag, Some('y') | Some('o'))
}

/// Menu l: export the local database as plain text.
pub struct ExportDatabase;

impl Handler for ExportDatabase {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Export local database (l).");
        let filename = params
            .export_filename
            .as_deref()
            .ok_or_else(|| AppError::validation("Missing export filename"))?;
        let count = session.store()?.export_images(
            filename,
            table_selected(params.use_pixiv),
            table_selected(params.use_fanbox),
            table_selected(params.use_sketch),
        )?;
        messages::info(format!("Exported {count} rows to {filename}"));
        Ok(())
    }
}

/// Menu d: database maintenance — row counts plus a VACUUM pass.
pub struct ManageDatabase;

impl Handler for ManageDatabase {
    fn process(&self, session: &mut SessionContext, _params: &ResolvedParams) -> AppResult<()> {
        messages::info("Manage database (d).");
        let store = session.store()?;
        let stats = store.stats()?;
        messages::info(format!("Database: {}", store.path().display()));
        messages::info(format!(
            "members: {}, images: {}, fanbox posts: {}, sketch posts: {}",
            stats.members, stats.images, stats.fanbox_posts, stats.sketch_posts
        ));
        store.vacuum()?;
        messages::info("VACUUM completed.");
        Ok(())
    }
}

/// Menu i: import member ids from a list file into the database.
pub struct ImportList;

impl Handler for ImportList {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Import List mode (i).");
        let list_file = params
            .list_file
            .as_ref()
            .ok_or_else(|| AppError::validation("Missing list file"))?;
        let ids: Vec<u64> = parse_list_file(list_file)?
            .iter()
            .filter_map(|s| s.split_whitespace().next().unwrap_or("").parse().ok())
            .collect();
        let imported = session.store()?.import_members(&ids)?;
        messages::info(format!("Imported {imported} members from {}", list_file.display()));
        Ok(())
    }
}

/// Menu u: re-encode downloaded ugoira archives. Only counts and reports
/// here; the media pipeline runs in post-processing.
pub struct UgoiraReencode;

impl Handler for UgoiraReencode {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Re-encode Ugoira (u).");
        if !params.confirmed {
            messages::info("Cancelled.");
            return Ok(());
        }
        let mut count = 0usize;
        count_ugoira(Path::new(&session.config.root_directory), &mut count)?;
        messages::info(format!(
            "Found {count} ugoira archives under {} for re-encoding with {} ({}).",
            session.config.root_directory, session.config.ffmpeg, session.config.ffmpeg_codec
        ));
        Ok(())
    }
}

fn count_ugoira(dir: &Path, count: &mut usize) -> AppResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            count_ugoira(&path, count)?;
        } else if path.extension().is_some_and(|e| e == "ugoira") {
            *count += 1;
        }
    }
    Ok(())
}

/// Menu r: reload config and filter lists without leaving the loop.
pub struct ReloadConfig;

impl Handler for ReloadConfig {
    fn process(&self, session: &mut SessionContext, _params: &ResolvedParams) -> AppResult<()> {
        messages::info("Manual Reload Config (r).");
        session.reload_config()
    }
}

/// Menu c: print the current configuration.
pub struct PrintConfig;

impl Handler for PrintConfig {
    fn process(&self, session: &mut SessionContext, _params: &ResolvedParams) -> AppResult<()> {
        messages::info("Print Current Config (c).");
        session.config.print();
        Ok(())
    }
}
