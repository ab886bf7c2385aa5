use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages;

/// Parse a plain-text list file: one entry per line, blank lines and
/// `#` comments skipped.
pub fn parse_list_file<P: AsRef<Path>>(path: P) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Blacklist / suppress lists, each loaded only when its config toggle is
/// enabled. Read-only from every operation's perspective.
#[derive(Debug, Default)]
pub struct FilterLists {
    pub blacklist_tags: Vec<String>,
    pub blacklist_members: Vec<u64>,
    pub blacklist_titles: Vec<String>,
    pub suppress_tags: Vec<String>,
}

impl FilterLists {
    /// (Re)load every enabled list. A missing file empties the list with a
    /// warning; a disabled toggle leaves it empty without touching the disk.
    pub fn load(config: &Config) -> Self {
        let mut lists = FilterLists::default();

        if config.use_blacklist_tags {
            lists.blacklist_tags = read_or_warn("blacklist_tags.txt");
            messages::info(format!(
                "Using Blacklist Tags: {} items.",
                lists.blacklist_tags.len()
            ));
        }
        if config.use_blacklist_members {
            lists.blacklist_members = read_or_warn("blacklist_members.txt")
                .iter()
                .filter_map(|s| s.parse::<u64>().ok())
                .collect();
            messages::info(format!(
                "Using Blacklist Members: {} members.",
                lists.blacklist_members.len()
            ));
        }
        if config.use_blacklist_titles {
            lists.blacklist_titles = read_or_warn("blacklist_titles.txt");
            messages::info(format!(
                "Using Blacklist Titles: {} items.",
                lists.blacklist_titles.len()
            ));
        }
        if config.use_suppress_tags {
            lists.suppress_tags = read_or_warn("suppress_tags.txt");
            messages::info(format!(
                "Using Suppress Tags: {} items.",
                lists.suppress_tags.len()
            ));
        }

        lists
    }

    pub fn is_member_blacklisted(&self, member_id: u64) -> bool {
        self.blacklist_members.contains(&member_id)
    }

    pub fn is_tag_blacklisted(&self, tag: &str) -> bool {
        self.blacklist_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn is_title_blacklisted(&self, title: &str) -> bool {
        self.blacklist_titles
            .iter()
            .any(|t| title.to_lowercase().contains(&t.to_lowercase()))
    }
}

fn read_or_warn(name: &str) -> Vec<String> {
    match parse_list_file(name) {
        Ok(entries) => entries,
        Err(e) => {
            messages::warn(format!("Cannot read {name}: {e}"));
            Vec::new()
        }
    }
}
