#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn pdl() -> Command {
    cargo_bin_cmd!("pixivdl")
}

/// Create a unique working directory inside the system temp dir.
pub fn setup_test_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{name}_pixivdl"));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).unwrap();
    path
}

/// Write a config file with a valid session cookie pointing every path at
/// the given directory; returns the config file path.
pub fn write_config(dir: &PathBuf, cookie: &str) -> String {
    let config_path = dir.join("config.yaml");
    let yaml = format!(
        "cookie: \"{cookie}\"\n\
         db_path: \"{}\"\n\
         root_directory: \"{}\"\n\
         download_list_directory: \"{}\"\n",
        dir.join("db.sqlite").to_string_lossy(),
        dir.to_string_lossy(),
        dir.to_string_lossy(),
    );
    fs::write(&config_path, yaml).unwrap();
    config_path.to_string_lossy().to_string()
}

pub fn logged_in_config(name: &str) -> (PathBuf, String) {
    let dir = setup_test_dir(name);
    let cfg = write_config(&dir, "PHPSESSID=123_abcdef0123456789");
    (dir, cfg)
}
