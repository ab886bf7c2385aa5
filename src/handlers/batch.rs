use std::fs;

use serde::Deserialize;

use crate::errors::{AppError, AppResult};
use crate::handlers::{image, title_prefix};
use crate::registry::Handler;
use crate::resolve::ResolvedParams;
use crate::session::SessionContext;
use crate::ui::messages;

fn default_start_page() -> u32 {
    1
}

/// One job from the batch file.
#[derive(Debug, Deserialize)]
struct BatchJob {
    job_type: String,
    #[serde(default)]
    ids: Vec<u64>,
    #[serde(default = "default_start_page")]
    start_page: u32,
    #[serde(default)]
    end_page: u32,
}

/// Menu b: run a sequence of jobs from a JSON file. Individual job
/// failures become deferred errors; the file keeps processing.
pub struct ProcessBatchJob;

impl Handler for ProcessBatchJob {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()> {
        messages::info("Batch Download mode (b).");
        let path = params
            .batch_file
            .as_ref()
            .ok_or_else(|| AppError::validation("Missing batch job file"))?;
        let content = fs::read_to_string(path)?;
        let jobs: Vec<BatchJob> = serde_json::from_str(&content)
            .map_err(|e| AppError::validation(format!("Invalid batch file {}: {e}", path.display())))?;

        messages::info(format!("Found {} jobs in {}", jobs.len(), path.display()));
        let total = jobs.len();
        for (current, job) in jobs.iter().enumerate() {
            let prefix = title_prefix(current + 1, total);
            messages::info(format!(
                "{prefix}Job '{}', {} ids, pages {} to {}",
                job.job_type,
                job.ids.len(),
                job.start_page,
                job.end_page
            ));
            match job.job_type.as_str() {
                "member" => {
                    for member_id in &job.ids {
                        session.store()?.record_member(*member_id, "")?;
                        session.note_downloaded(&format!("member:{member_id}"));
                    }
                }
                "image" => {
                    for image_id in &job.ids {
                        if let Err(e) = image::process_image(session, *image_id) {
                            session
                                .errors
                                .record("Batch", image_id.to_string(), e.to_string());
                        }
                    }
                }
                other => {
                    session
                        .errors
                        .record("Batch", other.to_string(), "unsupported job type");
                }
            }
        }
        Ok(())
    }
}
