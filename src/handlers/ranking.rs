use crate::errors::{AppError, AppResult};
use crate::registry::Handler;
use crate::resolve::ResolvedParams;
use crate::session::SessionContext;
use crate::ui::messages;

const STANDARD_MODES: &[&str] = &[
    "daily", "weekly", "monthly", "rookie", "original", "male", "female",
];
const R18_MODES: &[&str] = &["daily_r18", "weekly_r18", "male_r18", "female_r18"];

/// Menu 16 / 17: download by ranking, all-ages or R-18 mode set.
pub struct DownloadByRank {
    valid_modes: &'static [&'static str],
}

impl DownloadByRank {
    pub fn standard() -> Self {
        DownloadByRank {
            valid_modes: STANDARD_MODES,
        }
    }

    pub fn r18() -> Self {
        DownloadByRank {
            valid_modes: R18_MODES,
        }
    }
}

impl Handler for DownloadByRank {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Download Ranking mode.");
        let mode = params.rank_mode.as_deref().unwrap_or("daily");
        if !self.valid_modes.contains(&mode) {
            return Err(AppError::validation(format!(
                "Invalid ranking mode '{mode}', valid modes: {}",
                self.valid_modes.join(", ")
            )));
        }
        messages::info(format!(
            "Processing {mode} ranking ({}) for {}, pages {} to {}",
            params.rank_content.as_deref().unwrap_or("all"),
            params.rank_date.as_deref().unwrap_or("today"),
            params.pages.start,
            params.pages.end
        ));
        session.note_downloaded(&format!(
            "ranking:{mode}:{}",
            params.rank_date.as_deref().unwrap_or("today")
        ));
        Ok(())
    }
}

/// Menu 18: newest illustrations feed up to a page bound.
pub struct DownloadNewIllusts;

impl Handler for DownloadNewIllusts {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Download New Illust mode (18).");
        messages::info(format!(
            "Processing new illusts, mode {}, up to page {}",
            params.rank_mode.as_deref().unwrap_or("daily"),
            params.pages.end
        ));
        session.note_downloaded("new-illusts");
        Ok(())
    }
}
