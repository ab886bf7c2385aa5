use std::fs;

use crate::errors::{AppError, AppResult};
use crate::registry::Handler;
use crate::resolve::ResolvedParams;
use crate::session::SessionContext;
use crate::ui::messages;

fn private_label(flag: Option<char>) -> &'static str {
    match flag {
        Some('y') => "public and private",
        Some('o') => "private only",
        _ => "public only",
    }
}

/// Menu 5: download from the followed-artists bookmark.
pub struct DownloadUserBookmark;

impl Handler for DownloadUserBookmark {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("User Bookmarked Artist mode (5).");
        messages::info(format!(
            "Processing followed artists ({}), pages {} to {}{}",
            private_label(params.private_filter),
            params.pages.start,
            params.pages.end,
            match params.bookmark_count {
                Some(count) => format!(", bookmark count >= {count}"),
                None => String::new(),
            }
        ));
        session.note_downloaded("bookmark:followed-artists");
        Ok(())
    }
}

/// Menu 6: download the user's own bookmarked images.
pub struct DownloadImageBookmark;

impl Handler for DownloadImageBookmark {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("User's Image Bookmark mode (6).");
        let mut summary = format!(
            "Processing image bookmarks ({}), pages {} to {}",
            private_label(params.private_filter),
            params.pages.start,
            params.pages.end
        );
        if let Some(tag) = params.filter_tag.as_deref() {
            summary.push_str(&format!(
                ", tag '{tag}'{}",
                if params.use_image_tag {
                    " (matching image tags)"
                } else {
                    ""
                }
            ));
        }
        if let Some(order) = params.sort_order.as_deref() {
            summary.push_str(&format!(", sorted by {order}"));
        }
        messages::info(summary);
        session.note_downloaded("bookmark:images");
        Ok(())
    }
}

/// Menu 8: new illustrations from bookmarked members.
pub struct DownloadNewIllustFromBookmark;

impl Handler for DownloadNewIllustFromBookmark {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("New Illust from Bookmark mode (8).");
        messages::info(format!(
            "Processing new illustrations, pages {} to {}{}",
            params.pages.start,
            params.pages.end,
            match params.bookmark_count {
                Some(count) => format!(", bookmark count >= {count}"),
                None => String::new(),
            }
        ));
        session.note_downloaded("bookmark:new-illust");
        Ok(())
    }
}

/// Menu 12: download images posted to a group.
pub struct DownloadFromGroup;

impl Handler for DownloadFromGroup {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Group mode (12).");
        let group_id = params
            .group_id
            .as_deref()
            .filter(|g| !g.is_empty())
            .ok_or_else(|| AppError::validation("Missing group id"))?;
        messages::info(format!(
            "Processing group {group_id}, limit {}{}",
            params.limit.unwrap_or(0),
            if params.process_external {
                ", processing external images"
            } else {
                ""
            }
        ));
        session.note_downloaded(&format!("group:{group_id}"));
        Ok(())
    }
}

/// Menu e: export the followed-artists list as plain text.
pub struct ExportBookmark;

impl Handler for ExportBookmark {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Export Followed Artists mode (e).");
        let filename = params
            .export_filename
            .as_deref()
            .ok_or_else(|| AppError::validation("Missing export filename"))?;
        let members = session.store()?.member_ids()?;
        let body: String = members
            .iter()
            .map(|id| format!("{id}\n"))
            .collect();
        fs::write(filename, body)?;
        messages::info(format!(
            "Exported {} members ({}) to {filename}",
            members.len(),
            private_label(params.private_filter)
        ));
        Ok(())
    }
}

/// Menu m: export another member's followed artists.
pub struct ExportUserBookmark;

impl Handler for ExportUserBookmark {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Export Other's Followed Artist mode (m).");
        let member_id = params
            .member_id
            .ok_or_else(|| AppError::validation("Invalid member id"))?;
        let filename = params
            .export_filename
            .as_deref()
            .ok_or_else(|| AppError::validation("Missing export filename"))?;
        fs::write(filename, format!("# followed artists of member {member_id}\n"))?;
        messages::info(format!("Exported follow list of {member_id} to {filename}"));
        session.note_downloaded(&format!("export-follow:{member_id}"));
        Ok(())
    }
}

/// Menu p: export the user's bookmarked image ids.
pub struct ExportImageBookmark;

impl Handler for ExportImageBookmark {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Export User's Image Bookmark mode (p).");
        let filename = params
            .export_filename
            .as_deref()
            .ok_or_else(|| AppError::validation("Missing export filename"))?;
        let count = session.store()?.export_images(filename, true, false, false)?;
        messages::info(format!(
            "Exported {count} bookmarked images ({}) to {filename}",
            private_label(params.private_filter)
        ));
        Ok(())
    }
}
