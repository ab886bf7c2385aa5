use crate::errors::AppResult;
use crate::handlers::title_prefix;
use crate::registry::Handler;
use crate::resolve::ResolvedParams;
use crate::session::SessionContext;
use crate::ui::messages;

/// Menu 14: download novels by id.
pub struct DownloadByNovelId;

impl Handler for DownloadByNovelId {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Novel mode (14).");
        let total = params.ids.len();
        for (current, novel_id) in params.ids.iter().enumerate() {
            messages::info(format!(
                "{}Processing novel {novel_id}",
                title_prefix(current + 1, total)
            ));
            session.note_downloaded(&format!("novel:{novel_id}"));
        }
        Ok(())
    }
}

/// Menu 15: download novel series by id.
pub struct DownloadByNovelSeriesId;

impl Handler for DownloadByNovelSeriesId {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Novel Series mode (15).");
        let total = params.ids.len();
        for (current, series_id) in params.ids.iter().enumerate() {
            messages::info(format!(
                "{}Processing novel series {series_id}, pages {} to {}",
                title_prefix(current + 1, total),
                params.pages.start,
                params.pages.end
            ));
            session.note_downloaded(&format!("novel-series:{series_id}"));
        }
        Ok(())
    }
}
