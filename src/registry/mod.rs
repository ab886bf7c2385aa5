use std::collections::HashMap;

use crate::client::FanboxVia;
use crate::errors::AppResult;
use crate::handlers;
use crate::resolve::{Need, ResolvedParams};
use crate::session::SessionContext;
use crate::ui::messages;

/// One operation: executes with the session and its resolved parameters.
/// Implemented per operation variant; registered once, never at runtime.
pub trait Handler {
    fn process(&self, session: &mut SessionContext, params: &ResolvedParams) -> AppResult<()>;
}

/// A registry entry: the handler, its declarative parameter schema, and
/// whether the token may be started from the command line.
pub struct Entry {
    pub handler: Box<dyn Handler>,
    pub schema: &'static [Need],
    pub batch_ok: bool,
}

impl Entry {
    pub fn new(handler: Box<dyn Handler>, schema: &'static [Need], batch_ok: bool) -> Self {
        Entry {
            handler,
            schema,
            batch_ok,
        }
    }
}

/// Fixed token -> operation mapping. Immutable after construction,
/// exact-match lookup.
pub struct Registry {
    entries: HashMap<&'static str, Entry>,
}

const PAGED_IDS: &[Need] = &[
    Need::NumericIds("Member ids"),
    Need::Pages,
    Need::IncludeSketch,
];
const IMAGE_IDS: &[Need] = &[Need::NumericIds("Image ids")];
const TAGS_SEARCH: &[Need] = &[
    Need::Tags,
    Need::BookmarkCount,
    Need::Wildcard,
    Need::TagSortOrder,
    Need::Pages,
    Need::DateRange,
    Need::SearchType,
];
const FROM_LIST: &[Need] = &[Need::FilterTag, Need::IncludeSketch, Need::ListFile("list.txt")];
const USER_BOOKMARK: &[Need] = &[Need::PrivateFilter('n'), Need::Pages, Need::BookmarkCount];
const IMAGE_BOOKMARK: &[Need] = &[
    Need::PrivateFilter('n'),
    Need::ImageTag,
    Need::SortOrder,
    Need::Pages,
];
const TAGS_LIST: &[Need] = &[
    Need::ListFile("tags.txt"),
    Need::Wildcard,
    Need::TagSortOrder,
    Need::BookmarkCount,
    Need::Pages,
    Need::DateRange,
];
const NEW_ILLUST_BOOKMARK: &[Need] = &[Need::Pages, Need::BookmarkCount];
const TITLE_CAPTION: &[Need] = &[Need::TitleCaption, Need::Pages, Need::DateRange];
const TAG_AND_MEMBER: &[Need] = &[Need::MemberThenTags, Need::Pages];
const MEMBER_BOOKMARK: &[Need] = &[
    Need::NumericIds("Member ids"),
    Need::FilterTag,
    Need::Pages,
];
const GROUP: &[Need] = &[Need::GroupParams];
const MANGA_SERIES: &[Need] = &[Need::NumericIds("Manga Series IDs"), Need::Pages];
const NOVEL_IDS: &[Need] = &[Need::NumericIds("Novel IDs")];
const NOVEL_SERIES: &[Need] = &[Need::NumericIds("Novel Series IDs"), Need::Pages];
const RANKING: &[Need] = &[
    Need::RankMode,
    Need::RankContent,
    Need::RankDate,
    Need::Pages,
];
const NEW_ILLUSTS: &[Need] = &[Need::RankMode, Need::MaxPage];
const UNLISTED: &[Need] = &[Need::StringIds("Image ids")];
const FANBOX_LIST: &[Need] = &[Need::Pages];
const FANBOX_CUSTOM: &[Need] = &[Need::FanboxListFile, Need::Pages];
const FANBOX_ARTIST: &[Need] = &[Need::StringIds("Artist/Creator IDs"), Need::EndPageOnly];
const FANBOX_POSTS: &[Need] = &[Need::StringIds("Post ids")];
const PIXIV_BY_FANBOX: &[Need] = &[Need::StringIds("Artist/Creator IDs"), Need::Pages];
const SKETCH_ARTISTS: &[Need] = &[Need::Pages, Need::StringIds("Artist ids")];
const SKETCH_POSTS: &[Need] = &[Need::NumericIds("Post ids")];
const BATCH: &[Need] = &[Need::BatchFile];
const EXPORT_DB: &[Need] = &[Need::ExportFilename("export-database.txt"), Need::ExportTables];
const EXPORT_BOOKMARK: &[Need] = &[
    Need::ExportFilename("export.txt"),
    Need::PrivateFilter('y'),
];
const EXPORT_USER_BOOKMARK: &[Need] = &[
    Need::ExportFilename("export-user.txt"),
    Need::SingleMemberId,
];
const EXPORT_IMAGE_BOOKMARK: &[Need] = &[
    Need::ExportFilename("Exported_images.txt"),
    Need::PrivateFilter('n'),
    Need::ImageTag,
    Need::Pages,
];
const IMPORT_LIST: &[Need] = &[Need::ListFile("list.txt")];
const UGOIRA: &[Need] = &[Need::ConfirmReencode];
const NONE: &[Need] = &[];

impl Registry {
    pub fn new() -> Self {
        let mut entries: HashMap<&'static str, Entry> = HashMap::new();
        let mut add = |token: &'static str, entry: Entry| {
            entries.insert(token, entry);
        };

        add("1", Entry::new(Box::new(handlers::member::DownloadByMemberId), PAGED_IDS, true));
        add("2", Entry::new(Box::new(handlers::image::DownloadByImageId), IMAGE_IDS, true));
        add("3", Entry::new(Box::new(handlers::tags::DownloadByTags::search()), TAGS_SEARCH, true));
        add("4", Entry::new(Box::new(handlers::list::DownloadFromList), FROM_LIST, true));
        add("5", Entry::new(Box::new(handlers::bookmark::DownloadUserBookmark), USER_BOOKMARK, true));
        add("6", Entry::new(Box::new(handlers::bookmark::DownloadImageBookmark), IMAGE_BOOKMARK, true));
        add("7", Entry::new(Box::new(handlers::list::DownloadFromTagsList), TAGS_LIST, true));
        add("8", Entry::new(Box::new(handlers::bookmark::DownloadNewIllustFromBookmark), NEW_ILLUST_BOOKMARK, true));
        add("9", Entry::new(Box::new(handlers::tags::DownloadByTags::title_caption()), TITLE_CAPTION, true));
        add("10", Entry::new(Box::new(handlers::tags::DownloadByTagAndMemberId), TAG_AND_MEMBER, true));
        add("11", Entry::new(Box::new(handlers::member::DownloadMemberBookmark), MEMBER_BOOKMARK, true));
        add("12", Entry::new(Box::new(handlers::bookmark::DownloadFromGroup), GROUP, true));
        add("13", Entry::new(Box::new(handlers::image::DownloadMangaSeries), MANGA_SERIES, true));
        add("14", Entry::new(Box::new(handlers::novel::DownloadByNovelId), NOVEL_IDS, true));
        add("15", Entry::new(Box::new(handlers::novel::DownloadByNovelSeriesId), NOVEL_SERIES, true));
        add("16", Entry::new(Box::new(handlers::ranking::DownloadByRank::standard()), RANKING, true));
        add("17", Entry::new(Box::new(handlers::ranking::DownloadByRank::r18()), RANKING, true));
        add("18", Entry::new(Box::new(handlers::ranking::DownloadNewIllusts), NEW_ILLUSTS, true));
        add("19", Entry::new(Box::new(handlers::image::DownloadUnlistedImage), UNLISTED, true));

        add("f1", Entry::new(Box::new(handlers::fanbox::DownloadFanboxList::new(FanboxVia::Supporting)), FANBOX_LIST, true));
        add("f2", Entry::new(Box::new(handlers::fanbox::DownloadFanboxById), FANBOX_ARTIST, true));
        add("f3", Entry::new(Box::new(handlers::fanbox::DownloadFanboxPost), FANBOX_POSTS, true));
        add("f4", Entry::new(Box::new(handlers::fanbox::DownloadFanboxList::new(FanboxVia::Following)), FANBOX_LIST, true));
        add("f5", Entry::new(Box::new(handlers::fanbox::DownloadFanboxList::new(FanboxVia::Custom)), FANBOX_CUSTOM, true));
        add("f6", Entry::new(Box::new(handlers::fanbox::DownloadPixivByFanboxId), PIXIV_BY_FANBOX, false));

        add("s1", Entry::new(Box::new(handlers::sketch::DownloadSketchByArtist), SKETCH_ARTISTS, true));
        add("s2", Entry::new(Box::new(handlers::sketch::DownloadSketchByPost), SKETCH_POSTS, true));

        add("b", Entry::new(Box::new(handlers::batch::ProcessBatchJob), BATCH, true));
        add("l", Entry::new(Box::new(handlers::maintenance::ExportDatabase), EXPORT_DB, true));
        add("e", Entry::new(Box::new(handlers::bookmark::ExportBookmark), EXPORT_BOOKMARK, true));
        add("m", Entry::new(Box::new(handlers::bookmark::ExportUserBookmark), EXPORT_USER_BOOKMARK, true));
        add("p", Entry::new(Box::new(handlers::bookmark::ExportImageBookmark), EXPORT_IMAGE_BOOKMARK, true));
        add("u", Entry::new(Box::new(handlers::maintenance::UgoiraReencode), UGOIRA, false));
        add("d", Entry::new(Box::new(handlers::maintenance::ManageDatabase), NONE, true));
        add("r", Entry::new(Box::new(handlers::maintenance::ReloadConfig), NONE, false));
        add("c", Entry::new(Box::new(handlers::maintenance::PrintConfig), NONE, true));
        add("i", Entry::new(Box::new(handlers::maintenance::ImportList), IMPORT_LIST, false));

        Registry { entries }
    }

    /// Build a registry from explicit entries. Used by tests to observe
    /// dispatch with stub handlers; still immutable afterwards.
    pub fn from_entries(entries: Vec<(&'static str, Entry)>) -> Self {
        Registry {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, token: &str) -> Option<&Entry> {
        self.entries.get(token)
    }

    /// True when the token may be supplied with `-s` for a batch start.
    pub fn is_batch_token(&self, token: &str) -> bool {
        self.entries.get(token).is_some_and(|e| e.batch_ok)
    }

    /// Look up the handler and run it. An unknown token is reported and
    /// ignored; the loop moves on.
    pub fn dispatch(
        &self,
        token: &str,
        session: &mut SessionContext,
        params: &ResolvedParams,
    ) -> AppResult<()> {
        match self.entries.get(token) {
            Some(entry) => entry.handler.process(session, params),
            None => {
                messages::error(format!("Unknown selection: {token}"));
                Ok(())
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
