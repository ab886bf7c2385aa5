use crate::client::FanboxVia;
use crate::errors::{AppError, AppResult};
use crate::handlers::title_prefix;
use crate::lists::parse_list_file;
use crate::registry::Handler;
use crate::resolve::ResolvedParams;
use crate::session::SessionContext;
use crate::ui::messages;

/// Menu f1/f4/f5: download every artist on a FANBOX list. The supporting
/// and following lists come from the client; the custom list from a file.
pub struct DownloadFanboxList {
    via: FanboxVia,
}

impl DownloadFanboxList {
    pub fn new(via: FanboxVia) -> Self {
        DownloadFanboxList { via }
    }
}

impl Handler for DownloadFanboxList {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info(format!("Download FANBOX {} list mode.", self.via.label()));

        let ids: Vec<String> = match self.via {
            FanboxVia::Custom => {
                let list_file = params
                    .list_file
                    .as_ref()
                    .ok_or_else(|| AppError::validation("Missing FANBOX list file"))?;
                parse_list_file(list_file)?
            }
            via => session.client.fanbox_artist_list(via)?,
        };
        if ids.is_empty() {
            messages::info(format!("No artist in {} list!", self.via.label()));
            return Ok(());
        }

        let total = ids.len();
        for (current, artist_id) in ids.iter().enumerate() {
            let prefix = title_prefix(current + 1, total);
            messages::info(format!(
                "{prefix}Processing FANBOX artist {artist_id}, up to page {}",
                params.pages.end
            ));
            session.note_downloaded(&format!("fanbox-artist:{artist_id}"));
        }
        Ok(())
    }
}

/// Menu f2: download FANBOX posts by artist/creator id.
pub struct DownloadFanboxById;

impl Handler for DownloadFanboxById {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Download FANBOX by Artist or Creator ID mode.");
        let total = params.str_ids.len();
        for (current, artist_id) in params.str_ids.iter().enumerate() {
            messages::info(format!(
                "{}Processing FANBOX artist {artist_id}, up to page {}",
                title_prefix(current + 1, total),
                params.pages.end
            ));
            session.note_downloaded(&format!("fanbox-artist:{artist_id}"));
        }
        Ok(())
    }
}

/// Menu f3: download FANBOX posts by post id.
pub struct DownloadFanboxPost;

impl Handler for DownloadFanboxPost {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Download FANBOX by post id mode.");
        for post_id in &params.str_ids {
            session.store()?.record_fanbox_post(post_id, "", "")?;
            session.note_downloaded(&format!("fanbox-post:{post_id}"));
            messages::info(format!("Processing FANBOX post {post_id}"));
        }
        Ok(())
    }
}

/// Menu f6: download the Pixiv works of a FANBOX artist.
pub struct DownloadPixivByFanboxId;

impl Handler for DownloadPixivByFanboxId {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Download Pixiv by FANBOX Artist ID mode (f6).");
        let total = params.str_ids.len();
        for (current, artist_id) in params.str_ids.iter().enumerate() {
            messages::info(format!(
                "{}Processing Pixiv works of FANBOX artist {artist_id}, pages {} to {}",
                title_prefix(current + 1, total),
                params.pages.start,
                params.pages.end
            ));
            session.note_downloaded(&format!("fanbox-pixiv:{artist_id}"));
        }
        Ok(())
    }
}
