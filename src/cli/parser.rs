use clap::Parser;

/// Command-line interface definition for pixivdl.
/// Every menu operation can also be started non-interactively with
/// `-s TOKEN` plus the matching flags and positional ids/tags.
#[derive(Parser, Debug)]
#[command(
    name = "pixivdl",
    version = env!("CARGO_PKG_VERSION"),
    about = "Interactive downloader for Pixiv, FANBOX and Sketch",
    long_about = None
)]
pub struct Cli {
    /// Action to load the program with (menu token, e.g. 1, 3, f2, s1, b, e)
    #[arg(short = 's', long = "start-action")]
    pub start_action: Option<String>,

    /// Exit the program when the started action is done
    #[arg(short = 'x', long = "exit-when-done", default_value_t = false)]
    pub exit_when_done: bool,

    /// Temporarily overwrite the configured number of pages (0 = unbounded)
    #[arg(short = 'n', long = "number-of-pages")]
    pub number_of_pages: Option<u32>,

    /// Load the config file from a custom location
    #[arg(short = 'c', long = "config")]
    pub config_location: Option<String>,

    /// JSON file for the batch job action (b)
    #[arg(long = "batch-file")]
    pub batch_file: Option<String>,

    /// Starting page
    #[arg(long = "start-page", alias = "sp")]
    pub start_page: Option<String>,

    /// End page. If the start page is larger than the end page, the end page
    /// is reinterpreted as a page count (start + end). Takes priority over -n.
    #[arg(long = "end-page", alias = "ep")]
    pub end_page: Option<String>,

    /// Include Pixiv Sketch when processing member ids (1)
    #[arg(long = "include-sketch", alias = "is", default_value_t = false)]
    pub include_sketch: bool,

    /// Use wildcard matching when downloading by tag (3) or tag list (7)
    #[arg(long = "use-wildcard-tag", alias = "wt", default_value_t = false)]
    pub use_wildcard_tag: bool,

    /// List file for download by list (4) or tag list (7); relative paths are
    /// prefixed with the configured download list directory
    #[arg(short = 'f', long = "list-file")]
    pub list_file: Option<String>,

    /// Private bookmark flag for options 5 and 6: y include, n exclude, o only
    #[arg(short = 'p', long = "bookmark-flag")]
    pub bookmark_flag: Option<String>,

    /// Sorting order for option 6 (asc|desc|date|date_d)
    #[arg(short = 'o', long = "sort-order")]
    pub sort_order: Option<String>,

    /// Sorting order for options 3 and 7
    /// (date|date_d|popular_d|popular_male_d|popular_female_d)
    #[arg(long = "tag-sort-order", default_value = "date_d")]
    pub tag_sort_order: String,

    /// Start date for options 3, 7 and 9 (YYYY-MM-DD)
    #[arg(long = "start-date")]
    pub start_date: Option<String>,

    /// End date for options 3, 7 and 9 (YYYY-MM-DD)
    #[arg(long = "end-date")]
    pub end_date: Option<String>,

    /// Use image tags for filtering in option 6
    #[arg(long = "use-image-tag", alias = "uit", default_value_t = false)]
    pub use_image_tag: bool,

    /// Bookmark count limit for options 3, 5, 7 and 8
    #[arg(long = "bookmark-count-limit", alias = "bcl", default_value_t = -1)]
    pub bookmark_count_limit: i64,

    /// Ranking mode (daily, weekly, monthly, rookie, original, male, female)
    #[arg(long = "rank-mode", alias = "rm", default_value = "daily")]
    pub rank_mode: String,

    /// Ranking content type
    #[arg(long = "rank-content", alias = "rc", default_value = "all")]
    pub rank_content: String,

    /// Ranking date (YYYYMMDD)
    #[arg(long = "rank-date", alias = "rd")]
    pub rank_date: Option<String>,

    /// Filename for exporting members/images (options e, m, p, l); each
    /// export has its own default when omitted
    #[arg(long = "export-filename", alias = "ef")]
    pub export_filename: Option<String>,

    /// Include the Pixiv table when exporting (y|n|o)
    #[arg(long = "use-pixiv", alias = "up")]
    pub use_pixiv: Option<String>,

    /// Include the FANBOX table when exporting (y|n|o)
    #[arg(long = "use-fanbox", alias = "uf")]
    pub use_fanbox: Option<String>,

    /// Include the Sketch table when exporting (y|n|o)
    #[arg(long = "use-sketch", alias = "us")]
    pub use_sketch: Option<String>,

    /// Trailing ids or tags for the started action
    #[arg(trailing_var_arg = true)]
    pub args: Vec<String>,
}
