use std::io::BufRead;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::cli::Cli;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::Console;
use crate::ui::messages;

pub mod range;

pub use range::{PageRange, resolve_page_range};

/// One field of an operation's parameter schema. The resolver walks the
/// schema in order; in batch mode each field comes from flags/arguments, in
/// interactive mode from the matching prompt. Both paths fill the same slot
/// of [`ResolvedParams`], which is what keeps the two surfaces equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Need {
    /// Comma/space separated numeric id list; non-numeric tokens are dropped.
    NumericIds(&'static str),
    /// Id list kept as raw strings (unlisted images, fanbox creator ids).
    StringIds(&'static str),
    /// Exactly one numeric id; a non-numeric token is a validation error.
    SingleMemberId,
    /// Op 10: first argument is a member id, the rest is the tag query.
    MemberThenTags,
    Tags,
    TitleCaption,
    /// Optional tag filter (list download, member bookmark).
    FilterTag,
    Pages,
    /// Only the end page is asked interactively; start stays 1.
    EndPageOnly,
    DateRange,
    BookmarkCount,
    /// y include / n exclude / o only private bookmarks, with a default.
    PrivateFilter(char),
    /// Image-tag filter plus its enable flag (image bookmarks).
    ImageTag,
    Wildcard,
    TagSortOrder,
    SortOrder,
    /// a=all / i=illust+ugoira / m=manga.
    SearchType,
    IncludeSketch,
    ListFile(&'static str),
    /// Custom FANBOX artist list; default path comes from config.
    FanboxListFile,
    ExportFilename(&'static str),
    /// y/n/o selector per exportable table (pixiv, fanbox, sketch).
    ExportTables,
    RankMode,
    RankContent,
    RankDate,
    /// Op 18: only an upper page bound.
    MaxPage,
    /// Op 12: group id, item limit, process-external flag.
    GroupParams,
    BatchFile,
    /// Ugoira re-encode double confirmation.
    ConfirmReencode,
}

/// Normalized parameter record consumed once by the dispatched handler.
/// Identical in shape regardless of whether it was built from flags or
/// from prompts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedParams {
    pub ids: Vec<u64>,
    pub str_ids: Vec<String>,
    pub member_id: Option<u64>,
    pub tags: Option<String>,
    pub filter_tag: Option<String>,
    pub pages: PageRange,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub bookmark_count: Option<i64>,
    pub private_filter: Option<char>,
    pub use_image_tag: bool,
    pub wildcard: bool,
    pub sort_order: Option<String>,
    pub search_type: Option<char>,
    pub include_sketch: bool,
    pub list_file: Option<PathBuf>,
    pub export_filename: Option<String>,
    pub use_pixiv: Option<char>,
    pub use_fanbox: Option<char>,
    pub use_sketch: Option<char>,
    pub rank_mode: Option<String>,
    pub rank_content: Option<String>,
    pub rank_date: Option<String>,
    pub group_id: Option<String>,
    pub limit: Option<i64>,
    pub process_external: bool,
    pub batch_file: Option<PathBuf>,
    pub confirmed: bool,
}

/// Builds [`ResolvedParams`] for one dispatch, from flags or prompts.
pub struct Resolver<'a, R: BufRead> {
    pub cli: &'a Cli,
    pub config: &'a Config,
    pub console: &'a mut Console<R>,
    /// Session-wide page-count override (the `-all` toggle / `-n` flag).
    pub number_of_pages: Option<u32>,
    pub premium: bool,
}

impl<'a, R: BufRead> Resolver<'a, R> {
    /// True when the schema expects positional arguments to be usable in
    /// batch mode at all.
    fn wants_positional(needs: &[Need]) -> bool {
        needs.iter().any(|n| {
            matches!(
                n,
                Need::NumericIds(_)
                    | Need::StringIds(_)
                    | Need::SingleMemberId
                    | Need::MemberThenTags
                    | Need::Tags
                    | Need::TitleCaption
                    | Need::GroupParams
            )
        })
    }

    pub fn resolve(
        &mut self,
        needs: &[Need],
        batch: bool,
        args: &[String],
    ) -> AppResult<ResolvedParams> {
        // An operation that expects ids/tags on the command line falls back
        // to prompts when none were given.
        let batch = batch && (!Self::wants_positional(needs) || !args.is_empty());
        let mut params = ResolvedParams::default();

        for need in needs {
            self.fill(*need, batch, args, &mut params)?;
        }
        Ok(params)
    }

    fn default_end_page(&self) -> u32 {
        self.number_of_pages.unwrap_or(self.config.number_of_page)
    }

    fn fill(
        &mut self,
        need: Need,
        batch: bool,
        args: &[String],
        params: &mut ResolvedParams,
    ) -> AppResult<()> {
        match need {
            Need::NumericIds(label) => {
                if batch {
                    params.ids = args.iter().filter_map(|t| t.parse::<u64>().ok()).collect();
                } else {
                    params.ids = self.console.ask_ids(label)?;
                    messages::info(format!("{label}: {:?}", params.ids));
                }
            }
            Need::StringIds(label) => {
                if batch {
                    params.str_ids = args.to_vec();
                } else {
                    params.str_ids = self.console.ask_ids_str(label)?;
                }
            }
            Need::SingleMemberId => {
                let raw = if batch {
                    args.first().cloned().unwrap_or_default()
                } else {
                    self.console.ask("Member Id", "")?
                };
                params.member_id = Some(
                    raw.parse::<u64>()
                        .map_err(|_| AppError::validation(format!("Invalid member id: {raw}")))?,
                );
            }
            Need::MemberThenTags => {
                if batch {
                    let raw = args.first().cloned().unwrap_or_default();
                    let member_id = raw.parse::<u64>().map_err(|_| {
                        AppError::validation(format!("Member ID: {raw} is not valid"))
                    })?;
                    params.member_id = Some(member_id);
                    params.tags = Some(args[1..].join(" "));
                } else {
                    let raw = self.console.ask("Member Id", "")?;
                    params.member_id = Some(raw.parse::<u64>().map_err(|_| {
                        AppError::validation(format!("Member ID: {raw} is not valid"))
                    })?);
                    params.tags = Some(self.console.ask("Tag", "")?);
                }
                if let (Some(id), Some(tags)) = (params.member_id, params.tags.as_deref()) {
                    messages::info(format!("Looking tags: {tags} from memberId: {id}"));
                }
            }
            Need::Tags => {
                params.tags = Some(if batch {
                    args.join(" ")
                } else {
                    self.console.ask("Tags", "")?
                });
            }
            Need::TitleCaption => {
                params.tags = Some(if batch {
                    args.join(" ")
                } else {
                    self.console.ask("Title/Caption", "")?
                });
            }
            Need::FilterTag => {
                let tag = if batch {
                    args.first().cloned().unwrap_or_default()
                } else {
                    self.console.ask("Tag", "")?
                };
                params.filter_tag = if tag.is_empty() { None } else { Some(tag) };
            }
            Need::Pages => {
                params.pages = if batch {
                    resolve_page_range(
                        self.cli.start_page.as_deref(),
                        self.cli.end_page.as_deref(),
                        self.number_of_pages,
                        self.config.number_of_page,
                    )?
                } else {
                    self.ask_pages()?
                };
            }
            Need::EndPageOnly => {
                params.pages = if batch {
                    resolve_page_range(
                        self.cli.start_page.as_deref(),
                        self.cli.end_page.as_deref(),
                        self.number_of_pages,
                        self.config.number_of_page,
                    )?
                } else {
                    let end = self.ask_page_number("End Page", self.default_end_page())?;
                    PageRange { start: 1, end }
                };
            }
            Need::MaxPage => {
                params.pages = if batch {
                    let end = match self.cli.end_page.as_deref() {
                        Some(raw) => raw.parse::<u32>().map_err(|_| {
                            AppError::validation(format!("Invalid end page number: {raw}"))
                        })?,
                        None => 0,
                    };
                    PageRange { start: 1, end }
                } else {
                    let end = self.ask_page_number("Max Page", 0)?;
                    PageRange { start: 1, end }
                };
            }
            Need::DateRange => {
                let (start, end) = if batch {
                    (self.cli.start_date.clone(), self.cli.end_date.clone())
                } else {
                    let s = self.console.ask("Start Date (YYYY-MM-DD)", "")?;
                    let e = self.console.ask("End Date (YYYY-MM-DD)", "")?;
                    (
                        if s.is_empty() { None } else { Some(s) },
                        if e.is_empty() { None } else { Some(e) },
                    )
                };
                params.start_date = validate_date(start)?;
                params.end_date = validate_date(end)?;
            }
            Need::BookmarkCount => {
                params.bookmark_count = if batch {
                    match self.cli.bookmark_count_limit {
                        -1 => None,
                        n => Some(n),
                    }
                } else {
                    let raw = self.console.ask("Bookmark Count", "")?;
                    if raw.is_empty() {
                        None
                    } else {
                        Some(raw.parse::<i64>().map_err(|_| {
                            AppError::validation(format!("Invalid bookmark count: {raw}"))
                        })?)
                    }
                };
            }
            Need::PrivateFilter(default) => {
                params.private_filter = Some(if batch {
                    match self.cli.bookmark_flag.as_deref() {
                        Some(raw) => parse_choice(raw, &['y', 'n', 'o'], "bookmark flag")?,
                        None => default,
                    }
                } else {
                    self.console
                        .ask_flag("Include Private bookmarks", &['y', 'n', 'o'], default)?
                });
            }
            Need::ImageTag => {
                if batch {
                    let tag = args.join(" ");
                    params.filter_tag = if tag.is_empty() { None } else { Some(tag) };
                    params.use_image_tag = self.cli.use_image_tag;
                } else {
                    let tag = self.console.ask("Tag (press enter for all images)", "")?;
                    if tag.is_empty() {
                        params.filter_tag = None;
                        params.use_image_tag = false;
                    } else {
                        params.filter_tag = Some(tag);
                        params.use_image_tag = self
                            .console
                            .ask_flag("Use Image Tags as filter", &['y', 'n'], 'n')?
                            == 'y';
                    }
                }
            }
            Need::Wildcard => {
                params.wildcard = if batch {
                    self.cli.use_wildcard_tag
                } else {
                    self.console
                        .ask_flag("Use Partial Match (s_tag)", &['y', 'n'], 'n')?
                        == 'y'
                };
            }
            Need::TagSortOrder => {
                params.sort_order = Some(if batch {
                    self.cli.tag_sort_order.clone()
                } else if self.premium {
                    self.console.ask(
                        "Sorting Order [date_d|date|popular_d|popular_male_d|popular_female_d]",
                        "date_d",
                    )?
                } else {
                    "date".to_string()
                });
            }
            Need::SortOrder => {
                params.sort_order = Some(if batch {
                    self.cli
                        .sort_order
                        .clone()
                        .unwrap_or_else(|| "desc".to_string())
                } else {
                    self.console
                        .ask("Sorting Order [asc|desc|date|date_d]", "desc")?
                });
            }
            Need::SearchType => {
                params.search_type = Some(if batch {
                    'a'
                } else {
                    self.console.ask_flag(
                        "Search type [a-all|i-Illustration and Ugoira|m-manga]",
                        &['a', 'i', 'm'],
                        'a',
                    )?
                });
            }
            Need::IncludeSketch => {
                params.include_sketch = if batch {
                    self.cli.include_sketch
                } else {
                    match self.config.default_sketch_option.to_lowercase().as_str() {
                        "y" => true,
                        "n" => false,
                        _ => {
                            self.console
                                .ask_flag("Include Pixiv Sketch", &['y', 'n'], 'n')?
                                == 'y'
                        }
                    }
                };
                if params.include_sketch {
                    println!("Including Pixiv Sketch.");
                }
            }
            Need::ListFile(default) => {
                let default_path = self.default_list_path(default);
                params.list_file = Some(if batch {
                    self.list_file_from_flag(&default_path)
                } else {
                    let raw = self
                        .console
                        .ask("List filename", &default_path.to_string_lossy())?;
                    PathBuf::from(raw)
                });
            }
            Need::FanboxListFile => {
                let default_path = self.default_list_path(self.config.list_path_fanbox.as_str());
                params.list_file = Some(if batch {
                    self.list_file_from_flag(&default_path)
                } else {
                    default_path
                });
            }
            Need::ExportFilename(default) => {
                params.export_filename = Some(if batch {
                    self.cli
                        .export_filename
                        .clone()
                        .unwrap_or_else(|| default.to_string())
                } else {
                    self.console.ask("Filename", default)?
                });
            }
            Need::ExportTables => {
                if batch {
                    params.use_pixiv = parse_choice_opt(self.cli.use_pixiv.as_deref())?;
                    params.use_fanbox = parse_choice_opt(self.cli.use_fanbox.as_deref())?;
                    params.use_sketch = parse_choice_opt(self.cli.use_sketch.as_deref())?;
                } else {
                    params.use_pixiv = Some(self.console.ask_flag(
                        "Include Pixiv database",
                        &['y', 'n', 'o'],
                        'n',
                    )?);
                    params.use_fanbox = Some(self.console.ask_flag(
                        "Include Fanbox database",
                        &['y', 'n', 'o'],
                        'n',
                    )?);
                    params.use_sketch = Some(self.console.ask_flag(
                        "Include Sketch database",
                        &['y', 'n', 'o'],
                        'n',
                    )?);
                }
            }
            Need::RankMode => {
                params.rank_mode = Some(if batch {
                    self.cli.rank_mode.clone()
                } else {
                    self.console.ask("Mode", "daily")?
                });
            }
            Need::RankContent => {
                params.rank_content = Some(if batch {
                    self.cli.rank_content.clone()
                } else {
                    self.console.ask("Type", "all")?
                });
            }
            Need::RankDate => {
                let today = Local::now().date_naive().format("%Y%m%d").to_string();
                params.rank_date = Some(if batch {
                    self.cli.rank_date.clone().unwrap_or(today)
                } else {
                    self.console.ask("Date (YYYYMMDD)", &today)?
                });
            }
            Need::GroupParams => {
                if batch && args.len() >= 3 {
                    params.group_id = Some(args[0].clone());
                    params.limit = Some(args[1].parse::<i64>().map_err(|_| {
                        AppError::validation(format!("Invalid limit: {}", args[1]))
                    })?);
                    params.process_external = args[2].eq_ignore_ascii_case("y");
                } else {
                    params.group_id = Some(self.console.ask("Group Id", "")?);
                    params.limit = Some(self.console.ask_int("Limit", 0)?);
                    params.process_external = self
                        .console
                        .ask_flag("Process External Image", &['y', 'n'], 'n')?
                        == 'y';
                }
            }
            Need::BatchFile => {
                params.batch_file = Some(if batch {
                    PathBuf::from(
                        self.cli
                            .batch_file
                            .clone()
                            .unwrap_or_else(|| "batch_job.json".to_string()),
                    )
                } else {
                    PathBuf::from(self.console.ask("Batch job file", "batch_job.json")?)
                });
            }
            Need::ConfirmReencode => {
                messages::warn("THIS ACTION CANNOT BE UNDONE!");
                let mut confirmed = self
                    .console
                    .ask_flag("Do you really want to proceed?", &['y', 'n'], 'n')?
                    == 'y';
                if confirmed && self.config.overwrite {
                    confirmed = self.console.ask_flag(
                        "Overwrite is set: re-download instead of local re-encode?",
                        &['y', 'n'],
                        'n',
                    )? == 'y';
                }
                params.confirmed = confirmed;
            }
        }
        Ok(())
    }

    /// Interactive page-range prompt; applies the same count tie-break as
    /// the flag path so both surfaces resolve identically.
    fn ask_pages(&mut self) -> AppResult<PageRange> {
        let start = self.ask_page_number("Start Page", 1)?;
        let mut end = self.ask_page_number("End Page", self.default_end_page())?;
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

    fn ask_page_number(&mut self, prompt: &str, default: u32) -> AppResult<u32> {
        let n = self.console.ask_int(prompt, default as i64)?;
        u32::try_from(n).map_err(|_| AppError::validation(format!("Invalid {prompt}: {n}")))
    }

    fn default_list_path(&self, name: &str) -> PathBuf {
        let p = Path::new(name);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            Path::new(&self.config.download_list_directory).join(p)
        }
    }

    /// Resolve `-f/--list-file`: relative paths are prefixed with the
    /// download list directory; a missing file falls back to the default
    /// with a warning.
    fn list_file_from_flag(&self, default_path: &Path) -> PathBuf {
        match self.cli.list_file.as_deref() {
            Some(raw) => {
                let candidate = self.default_list_path(raw);
                if candidate.exists() {
                    candidate
                } else {
                    messages::warn(format!(
                        "The given list file [{}] doesn't exist, using default list file [{}].",
                        candidate.display(),
                        default_path.display()
                    ));
                    default_path.to_path_buf()
                }
            }
            None => default_path.to_path_buf(),
        }
    }
}

fn validate_date(raw: Option<String>) -> AppResult<Option<String>> {
    match raw {
        None => Ok(None),
        Some(s) => {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map_err(|_| AppError::validation(format!("Invalid date (want YYYY-MM-DD): {s}")))?;
            Ok(Some(s))
        }
    }
}

fn parse_choice(raw: &str, allowed: &[char], what: &str) -> AppResult<char> {
    let c = raw.trim().to_lowercase().chars().next().unwrap_or(' ');
    if raw.trim().chars().count() == 1 && allowed.contains(&c) {
        Ok(c)
    } else {
        Err(AppError::validation(format!("Invalid {what}: {raw}")))
    }
}

fn parse_choice_opt(raw: Option<&str>) -> AppResult<Option<char>> {
    match raw {
        None => Ok(None),
        Some(r) => Ok(Some(parse_choice(r, &['y', 'n', 'o'], "table selector")?)),
    }
}
