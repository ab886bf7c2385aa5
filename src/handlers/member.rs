use crate::errors::AppResult;
use crate::handlers::title_prefix;
use crate::registry::Handler;
use crate::resolve::ResolvedParams;
use crate::session::SessionContext;
use crate::ui::{menu, messages};

/// Menu 1: download by member_id.
pub struct DownloadByMemberId;

impl Handler for DownloadByMemberId {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Member id mode (1).");
        let total = params.ids.len();

        for (current, member_id) in params.ids.iter().enumerate() {
            let prefix = title_prefix(current + 1, total);
            menu::set_console_title(&format!("{prefix}member {member_id}"));

            if session.lists.is_member_blacklisted(*member_id) {
                messages::warn(format!("{prefix}Member {member_id} is blacklisted, skipping."));
                continue;
            }
            if let Err(e) = process_member(session, *member_id, &prefix, params) {
                messages::error(format!("Member ID: {member_id} is not valid"));
                session
                    .errors
                    .record("Member", member_id.to_string(), e.to_string());
            }
        }
        Ok(())
    }
}

fn process_member(
    session: &mut SessionContext,
    member_id: u64,
    prefix: &str,
    params: &ResolvedParams,
) -> AppResult<()> {
    messages::info(format!(
        "{prefix}Processing member {member_id}, pages {} to {}",
        params.pages.start,
        if params.pages.end == 0 {
            "end".to_string()
        } else {
            params.pages.end.to_string()
        }
    ));
    session.store()?.record_member(member_id, "")?;
    session.note_downloaded(&format!("member:{member_id}"));

    if params.include_sketch {
        match session.client.member_token(member_id)? {
            Some(token) => messages::info(format!(
                "{prefix}Processing Sketch artist {token} for member {member_id}"
            )),
            None => messages::info(format!(
                "{prefix}No Sketch profile known for member {member_id}, skipping Sketch."
            )),
        }
    }
    Ok(())
}

/// Menu 11: download a member's bookmarked images. Downloading your own id
/// this way is redirected to option 6.
pub struct DownloadMemberBookmark;

impl Handler for DownloadMemberBookmark {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Member Bookmark mode (11).");
        let my_id = session.client.my_id();
        let total = params.ids.len();

        for (current, member_id) in params.ids.iter().enumerate() {
            let prefix = title_prefix(current + 1, total);
            if my_id == Some(*member_id) {
                messages::error(format!(
                    "Member ID: {member_id} is your own id, use option 6 instead."
                ));
                continue;
            }
            messages::info(format!(
                "{prefix}Processing bookmarks of member {member_id}{}",
                match params.filter_tag.as_deref() {
                    Some(tag) => format!(" filtered by tag '{tag}'"),
                    None => String::new(),
                }
            ));
            session.store()?.record_member(*member_id, "")?;
            session.note_downloaded(&format!("member-bookmark:{member_id}"));
        }
        Ok(())
    }
}
