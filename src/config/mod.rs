use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};

fn default_number_of_page() -> u32 {
    0
}
fn default_list_dir() -> String {
    ".".to_string()
}
fn default_root_dir() -> String {
    ".".to_string()
}
fn default_db_path() -> String {
    "db.sqlite".to_string()
}
fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}
fn default_ffmpeg_codec() -> String {
    "libvpx-vp9".to_string()
}
fn default_sketch_option() -> String {
    "ask".to_string()
}
fn default_fanbox_list() -> String {
    "listfanbox.txt".to_string()
}

/// Typed application settings, stored as YAML.
/// Loaded once at startup and reloadable from the menu (r) without
/// restarting the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    // Credentials / session
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Session cookie, e.g. "PHPSESSID=12345_abcdef". Username login is
    /// broken upstream; the cookie is the supported path.
    #[serde(default)]
    pub cookie: String,

    // Paging
    #[serde(default = "default_number_of_page")]
    pub number_of_page: u32,

    // Paths
    #[serde(default = "default_root_dir")]
    pub root_directory: String,
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_list_dir")]
    pub download_list_directory: String,
    #[serde(default = "default_fanbox_list")]
    pub list_path_fanbox: String,

    // Filter lists
    #[serde(default)]
    pub use_blacklist_tags: bool,
    #[serde(default)]
    pub use_blacklist_members: bool,
    #[serde(default)]
    pub use_blacklist_titles: bool,
    #[serde(default)]
    pub use_suppress_tags: bool,

    // Behavior toggles
    #[serde(default)]
    pub use_list: bool,
    #[serde(default)]
    pub use_tags_as_dir: bool,
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default)]
    pub check_new_version: bool,
    #[serde(default = "default_sketch_option")]
    pub default_sketch_option: String,

    // Post-processing / media encoding
    #[serde(default)]
    pub enable_post_processing: bool,
    #[serde(default)]
    pub post_processing_cmd: String,
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,
    #[serde(default = "default_ffmpeg_codec")]
    pub ffmpeg_codec: String,
    #[serde(default)]
    pub create_gif: bool,
    #[serde(default)]
    pub create_apng: bool,
    #[serde(default)]
    pub create_webm: bool,
    #[serde(default)]
    pub create_webp: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            cookie: String::new(),
            number_of_page: default_number_of_page(),
            root_directory: default_root_dir(),
            db_path: default_db_path(),
            download_list_directory: default_list_dir(),
            list_path_fanbox: default_fanbox_list(),
            use_blacklist_tags: false,
            use_blacklist_members: false,
            use_blacklist_titles: false,
            use_suppress_tags: false,
            use_list: false,
            use_tags_as_dir: false,
            overwrite: false,
            check_new_version: false,
            default_sketch_option: default_sketch_option(),
            enable_post_processing: false,
            post_processing_cmd: String::new(),
            ffmpeg: default_ffmpeg(),
            ffmpeg_codec: default_ffmpeg_codec(),
            create_gif: false,
            create_apng: false,
            create_webm: false,
            create_webp: false,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pixivdl")
    }

    /// Return the full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Load configuration from the given path, or from the default location.
    /// The caller decides what to do on failure; the session degrades to
    /// defaults instead of aborting.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::config_file(),
        };
        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Dump the current configuration as YAML (menu option c).
    pub fn print(&self) {
        match serde_yaml::to_string(self) {
            Ok(yaml) => println!("{yaml}"),
            Err(e) => crate::ui::messages::error(format!("Cannot render config: {e}")),
        }
    }

    /// True when any animated media output is enabled and the encoder
    /// settings matter.
    pub fn wants_media_encoding(&self) -> bool {
        self.create_gif || self.create_apng || self.create_webm || self.create_webp
    }
}
