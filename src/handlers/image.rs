use crate::errors::{AppError, AppResult};
use crate::registry::Handler;
use crate::resolve::ResolvedParams;
use crate::session::SessionContext;
use crate::ui::messages;

/// Menu 2: download by image_id.
pub struct DownloadByImageId;

impl Handler for DownloadByImageId {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Image id mode (2).");
        for image_id in &params.ids {
            if let Err(e) = process_image(session, *image_id) {
                messages::error(format!("Image ID: {image_id} is not valid"));
                session
                    .errors
                    .record("Image", image_id.to_string(), e.to_string());
            }
        }
        Ok(())
    }
}

pub(crate) fn process_image(session: &mut SessionContext, image_id: u64) -> AppResult<()> {
    if image_id == 0 {
        return Err(AppError::domain("invalid image id", -1, image_id.to_string()));
    }
    if session.store()?.is_image_downloaded(image_id)? && !session.config.overwrite {
        messages::info(format!("Image {image_id} already downloaded, skipping."));
        return Ok(());
    }
    session.store()?.record_image(image_id, None, "")?;
    session.note_downloaded(&format!("image:{image_id}"));
    messages::info(format!("Processing image {image_id}"));
    Ok(())
}

/// Menu 13: download by manga series id.
pub struct DownloadMangaSeries;

impl Handler for DownloadMangaSeries {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Manga Series mode (13).");
        for series_id in &params.ids {
            messages::info(format!(
                "Processing manga series {series_id}, pages {} to {}",
                params.pages.start, params.pages.end
            ));
            session.note_downloaded(&format!("manga-series:{series_id}"));
        }
        Ok(())
    }
}

/// Menu 19: download by unlisted image id. Unlisted ids are opaque strings,
/// never parsed as numbers.
pub struct DownloadUnlistedImage;

impl Handler for DownloadUnlistedImage {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Unlisted ID mode (19).");
        for image_id in &params.str_ids {
            messages::info(format!("Processing unlisted image {image_id}"));
            session.note_downloaded(&format!("unlisted:{image_id}"));
        }
        Ok(())
    }
}
