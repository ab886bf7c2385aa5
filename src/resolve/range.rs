use crate::errors::{AppError, AppResult};
use crate::ui::messages;

/// Resolved page bounds for a paginated retrieval. `end == 0` means
/// unbounded. After resolution `start <= end` unless `end == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

fn parse_page(raw: &str, what: &str) -> AppResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| AppError::validation(format!("Invalid {what} number: {raw}")))
}

/// Resolve a page range from raw start/end/count inputs.
///
/// - start defaults to 1 when absent;
/// - end falls back to the count, then to the configured default, then to 0;
/// - a start page bigger than a non-zero end page reinterprets the end as a
///   page count: end becomes start + end. This is documented policy, not an
///   error.
///
/// Malformed integers abort only the current operation's resolution.
pub fn resolve_page_range(
    start_raw: Option<&str>,
    end_raw: Option<&str>,
    count: Option<u32>,
    config_default: u32,
) -> AppResult<PageRange> {
    let start = match start_raw {
        Some(raw) => {
            let n = parse_page(raw, "page")?;
            println!("Start Page = {n}");
            n
        }
        None => 1,
    };

    let mut end = match end_raw {
        Some(raw) => {
            let n = parse_page(raw, "end page")?;
            println!("End Page = {n}");
            n
        }
        None => count.unwrap_or(config_default),
    };

    if start > end && end != 0 {
        let sum = start.checked_add(end).ok_or_else(|| {
            AppError::validation(format!("Page range out of bounds: {start} + {end}"))
        })?;
        messages::info(format!(
            "Start Page ({start}) is bigger than End Page ({end}), assuming as page count ({sum})."
        ));
        end = sum;
    }

    Ok(PageRange { start, end })
}
