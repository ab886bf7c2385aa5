use crate::errors::AppResult;
use crate::handlers::title_prefix;
use crate::registry::Handler;
use crate::resolve::ResolvedParams;
use crate::session::SessionContext;
use crate::ui::messages;

/// Menu s1: download Sketch posts by creator id.
pub struct DownloadSketchByArtist;

impl Handler for DownloadSketchByArtist {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Download Sketch by Artist ID mode.");
        let total = params.str_ids.len();
        for (current, artist_id) in params.str_ids.iter().enumerate() {
            messages::info(format!(
                "{}Processing Sketch artist {artist_id}, pages {} to {}",
                title_prefix(current + 1, total),
                params.pages.start,
                params.pages.end
            ));
            session.note_downloaded(&format!("sketch-artist:{artist_id}"));
        }
        Ok(())
    }
}

/// Menu s2: download Sketch posts by post id.
pub struct DownloadSketchByPost;

impl Handler for DownloadSketchByPost {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Download Sketch by Post ID mode.");
        for post_id in &params.ids {
            session.store()?.record_sketch_post(*post_id, "", "")?;
            session.note_downloaded(&format!("sketch-post:{post_id}"));
            messages::info(format!("Processing Sketch post {post_id}"));
        }
        Ok(())
    }
}
