use crate::errors::{AppError, AppResult};
use crate::handlers::title_prefix;
use crate::lists::parse_list_file;
use crate::registry::Handler;
use crate::resolve::ResolvedParams;
use crate::session::SessionContext;
use crate::ui::messages;

/// Menu 4: batch download members from a list file.
pub struct DownloadFromList;

impl Handler for DownloadFromList {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Batch mode from list (4).");
        let list_file = params
            .list_file
            .as_ref()
            .ok_or_else(|| AppError::validation("Missing list file"))?;
        let entries = parse_list_file(list_file)?;
        messages::info(format!(
            "Found {} entries in {}{}",
            entries.len(),
            list_file.display(),
            match params.filter_tag.as_deref() {
                Some(tag) => format!(", filtered by tag '{tag}'"),
                None => String::new(),
            }
        ));

        let total = entries.len();
        for (current, entry) in entries.iter().enumerate() {
            let prefix = title_prefix(current + 1, total);
            let Ok(member_id) = entry.split_whitespace().next().unwrap_or("").parse::<u64>()
            else {
                session
                    .errors
                    .record("List", entry.clone(), "not a valid member id");
                continue;
            };
            if session.lists.is_member_blacklisted(member_id) {
                messages::warn(format!("{prefix}Member {member_id} is blacklisted, skipping."));
                continue;
            }
            messages::info(format!("{prefix}Processing member {member_id}"));
            session.store()?.record_member(member_id, "")?;
            session.note_downloaded(&format!("member:{member_id}"));
            if params.include_sketch {
                messages::info(format!("{prefix}Including Pixiv Sketch for {member_id}."));
            }
        }
        Ok(())
    }
}

/// Menu 7: run a tag search per line of a tags list file.
pub struct DownloadFromTagsList;

impl Handler for DownloadFromTagsList {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Taglist mode (7).");
        let list_file = params
            .list_file
            .as_ref()
            .ok_or_else(|| AppError::validation("Missing tags list file"))?;
        let tags = parse_list_file(list_file)?;
        messages::info(format!("Found {} tags in {}", tags.len(), list_file.display()));

        let total = tags.len();
        for (current, tag) in tags.iter().enumerate() {
            let prefix = title_prefix(current + 1, total);
            if session.lists.is_tag_blacklisted(tag) {
                messages::warn(format!("{prefix}Tag '{tag}' is blacklisted, skipping."));
                continue;
            }
            let mut summary = format!(
                "{prefix}Searching '{tag}', pages {} to {}",
                params.pages.start, params.pages.end
            );
            if params.wildcard {
                summary.push_str(", partial match");
            }
            if let Some(order) = params.sort_order.as_deref() {
                summary.push_str(&format!(", sorted by {order}"));
            }
            if let Some(count) = params.bookmark_count {
                summary.push_str(&format!(", bookmark count >= {count}"));
            }
            messages::info(summary);
            session.note_downloaded(&format!("tags:{tag}"));
        }
        Ok(())
    }
}
