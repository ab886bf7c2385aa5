use crate::errors::{AppError, AppResult};
use crate::registry::Handler;
use crate::resolve::ResolvedParams;
use crate::session::SessionContext;
use crate::ui::messages;

/// Menu 3 (tag search) and menu 9 (title/caption search) share one
/// implementation; the title/caption variant ignores wildcard and sorting.
pub struct DownloadByTags {
    title_caption: bool,
}

impl DownloadByTags {
    pub fn search() -> Self {
        DownloadByTags {
            title_caption: false,
        }
    }

    pub fn title_caption() -> Self {
        DownloadByTags {
            title_caption: true,
        }
    }
}

impl Handler for DownloadByTags {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        if self.title_caption {
            messages::info("Title/Caption mode (9).");
        } else {
            messages::info("Tags mode (3).");
        }

        let query = params.tags.as_deref().unwrap_or("").trim().to_string();
        if query.is_empty() {
            return Err(AppError::validation("Empty tag query"));
        }
        if self.title_caption {
            if session.lists.is_title_blacklisted(&query) {
                messages::warn(format!("Title '{query}' is blacklisted, skipping."));
                return Ok(());
            }
        } else if session.lists.is_tag_blacklisted(&query) {
            messages::warn(format!("Tag '{query}' is blacklisted, skipping."));
            return Ok(());
        }

        let mut summary = format!(
            "Searching '{query}', pages {} to {}",
            params.pages.start,
            if params.pages.end == 0 {
                "end".to_string()
            } else {
                params.pages.end.to_string()
            }
        );
        if !self.title_caption {
            if params.wildcard {
                summary.push_str(", partial match");
            }
            if let Some(order) = params.sort_order.as_deref() {
                summary.push_str(&format!(", sorted by {order}"));
            }
            if let Some(t) = params.search_type {
                summary.push_str(&format!(", type {t}"));
            }
        }
        if let Some(count) = params.bookmark_count {
            summary.push_str(&format!(", bookmark count >= {count}"));
        }
        if let (Some(s), Some(e)) = (params.start_date.as_deref(), params.end_date.as_deref()) {
            summary.push_str(&format!(", between {s} and {e}"));
        }
        if session.config.use_tags_as_dir {
            summary.push_str(", using tags as directory");
        }
        messages::info(summary);
        session.note_downloaded(&format!("tags:{query}"));
        Ok(())
    }
}

/// Menu 10: tag query scoped to one member.
pub struct DownloadByTagAndMemberId;

impl Handler for DownloadByTagAndMemberId {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Tag and MemberId mode (10).");
        let member_id = params
            .member_id
            .ok_or_else(|| AppError::validation("Missing member id"))?;
        let tags = params.tags.as_deref().unwrap_or("").trim().to_string();

        if session.lists.is_member_blacklisted(member_id) {
            messages::warn(format!("Member {member_id} is blacklisted, skipping."));
            return Ok(());
        }
        messages::info(format!(
            "Searching '{tags}' from member {member_id}, pages {} to {}",
            params.pages.start, params.pages.end
        ));
        session.store()?.record_member(member_id, "")?;
        session.note_downloaded(&format!("member-tags:{member_id}:{tags}"));
        Ok(())
    }
}
