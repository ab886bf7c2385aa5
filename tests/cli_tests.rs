mod common;

use common::{logged_in_config, pdl, setup_test_dir, write_config};
use predicates::prelude::*;

#[test]
fn missing_cookie_exits_with_not_logged_in_status() {
    let dir = setup_test_dir("no_cookie");
    let cfg = write_config(&dir, "");

    pdl()
        .current_dir(&dir)
        .args(["-c", &cfg, "-s", "2", "-x", "1"])
        .assert()
        .code(100)
        .stderr(predicate::str::contains("no session cookie"))
        .stdout(predicate::str::contains("Input:").not());
}

#[test]
fn batch_image_download_runs_once_and_exits() {
    let (dir, cfg) = logged_in_config("batch_image");

    pdl()
        .current_dir(&dir)
        .args(["-c", &cfg, "-s", "2", "-x", "123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Image id mode (2)."))
        .stdout(predicate::str::contains("Processing image 123"));
}

#[test]
fn already_downloaded_image_is_skipped_on_the_second_run() {
    let (dir, cfg) = logged_in_config("image_skip");

    pdl()
        .current_dir(&dir)
        .args(["-c", &cfg, "-s", "2", "-x", "123"])
        .assert()
        .success();

    pdl()
        .current_dir(&dir)
        .args(["-c", &cfg, "-s", "2", "-x", "123"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Image 123 already downloaded, skipping.",
        ));
}

#[test]
fn menu_exit_token_terminates_cleanly() {
    let (dir, cfg) = logged_in_config("menu_exit");

    pdl()
        .current_dir(&dir)
        .args(["-c", &cfg])
        .write_stdin("x\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Input:"));
}

#[test]
fn end_of_input_terminates_cleanly() {
    let (dir, cfg) = logged_in_config("menu_eof");

    pdl()
        .current_dir(&dir)
        .args(["-c", &cfg])
        .assert()
        .success();
}

#[test]
fn inverted_page_range_is_reinterpreted_as_page_count() {
    let (dir, cfg) = logged_in_config("page_tiebreak");

    pdl()
        .current_dir(&dir)
        .args([
            "-c",
            &cfg,
            "-s",
            "1",
            "-x",
            "--start-page",
            "5",
            "--end-page",
            "2",
            "111",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("assuming as page count (7)"))
        .stdout(predicate::str::contains(
            "Processing member 111, pages 5 to 7",
        ));
}

#[test]
fn invalid_image_id_is_deferred_and_fails_the_run() {
    let (dir, cfg) = logged_in_config("invalid_image");

    pdl()
        .current_dir(&dir)
        .args(["-c", &cfg, "-s", "2", "-x", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Image ID: 0 is not valid"));
}

#[test]
fn recorded_members_round_trip_through_the_follow_export() {
    let (dir, cfg) = logged_in_config("member_export");

    pdl()
        .current_dir(&dir)
        .args(["-c", &cfg, "-s", "1", "-x", "2233", "4455"])
        .assert()
        .success();

    let out = dir.join("export.txt");
    pdl()
        .current_dir(&dir)
        .args([
            "-c",
            &cfg,
            "-s",
            "e",
            "-x",
            "--export-filename",
            &out.to_string_lossy(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 members"));

    let body = std::fs::read_to_string(&out).unwrap();
    assert_eq!(body, "2233\n4455\n");
}

#[test]
fn blacklisted_title_query_is_skipped() {
    let (dir, cfg) = logged_in_config("title_blacklist");
    std::fs::write(dir.join("blacklist_titles.txt"), "forbidden\n").unwrap();
    let mut yaml = std::fs::read_to_string(&cfg).unwrap();
    yaml.push_str("use_blacklist_titles: true\n");
    std::fs::write(&cfg, yaml).unwrap();

    pdl()
        .current_dir(&dir)
        .args(["-c", &cfg, "-s", "9", "-x", "Forbidden", "Work"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Title 'Forbidden Work' is blacklisted, skipping.",
        ));
}

#[test]
fn non_batch_token_falls_back_to_the_menu() {
    let (dir, cfg) = logged_in_config("non_batch_token");

    // "r" cannot be started from the command line; the menu takes over.
    pdl()
        .current_dir(&dir)
        .args(["-c", &cfg, "-s", "r"])
        .write_stdin("x\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Input:"));
}

#[test]
fn config_dump_prints_the_active_settings() {
    let (dir, cfg) = logged_in_config("config_dump");

    pdl()
        .current_dir(&dir)
        .args(["-c", &cfg, "-s", "c", "-x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cookie:"))
        .stdout(predicate::str::contains("number_of_page:"));
}
