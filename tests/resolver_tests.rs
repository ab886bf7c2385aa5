use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use clap::Parser;

use pixivdl::cli::Cli;
use pixivdl::config::Config;
use pixivdl::errors::AppError;
use pixivdl::resolve::{Need, PageRange, ResolvedParams, Resolver};
use pixivdl::ui::Console;

fn console(input: &str) -> Console<Cursor<Vec<u8>>> {
    Console::new(
        Cursor::new(input.as_bytes().to_vec()),
        Arc::new(AtomicBool::new(false)),
    )
}

fn resolve(
    cli_args: &[&str],
    config: &Config,
    input: &str,
    needs: &[Need],
    batch: bool,
) -> Result<ResolvedParams, AppError> {
    let cli = Cli::parse_from(cli_args);
    let mut con = console(input);
    let mut resolver = Resolver {
        cli: &cli,
        config,
        console: &mut con,
        number_of_pages: cli.number_of_pages,
        premium: false,
    };
    let args = cli.args.clone();
    resolver.resolve(needs, batch, &args)
}

const MEMBER_SCHEMA: &[Need] = &[
    Need::NumericIds("Member ids"),
    Need::Pages,
    Need::IncludeSketch,
];

#[test]
fn batch_flags_and_interactive_prompts_resolve_identically() {
    let config = Config {
        default_sketch_option: "ask".to_string(),
        ..Config::default()
    };

    let from_flags = resolve(
        &[
            "pixivdl",
            "-s",
            "1",
            "--start-page",
            "2",
            "--end-page",
            "5",
            "123",
            "456",
        ],
        &config,
        "",
        MEMBER_SCHEMA,
        true,
    )
    .unwrap();

    // Same semantic input answered at the prompts: ids, start, end, sketch.
    let from_prompts = resolve(
        &["pixivdl"],
        &config,
        "123,456\n2\n5\nn\n",
        MEMBER_SCHEMA,
        false,
    )
    .unwrap();

    assert_eq!(from_flags, from_prompts);
    assert_eq!(from_flags.ids, vec![123, 456]);
    assert_eq!(from_flags.pages, PageRange { start: 2, end: 5 });
    assert!(!from_flags.include_sketch);
}

#[test]
fn non_numeric_tokens_are_dropped_for_multi_id_operations() {
    let config = Config::default();
    let params = resolve(
        &["pixivdl", "-s", "2", "11", "abc", "22"],
        &config,
        "",
        &[Need::NumericIds("Image ids")],
        true,
    )
    .unwrap();
    assert_eq!(params.ids, vec![11, 22]);
}

#[test]
fn non_numeric_single_id_is_a_validation_error() {
    let config = Config::default();
    let result = resolve(
        &["pixivdl", "-s", "m", "abc"],
        &config,
        "",
        &[Need::SingleMemberId],
        true,
    );
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn batch_without_positional_args_falls_back_to_prompts() {
    let config = Config::default();
    let params = resolve(
        &["pixivdl", "-s", "2"],
        &config,
        "77,88\n",
        &[Need::NumericIds("Image ids")],
        true,
    )
    .unwrap();
    assert_eq!(params.ids, vec![77, 88]);
}

#[test]
fn interactive_pages_apply_the_count_tiebreak() {
    let config = Config::default();
    let params = resolve(&["pixivdl"], &config, "5\n2\n", &[Need::Pages], false).unwrap();
    assert_eq!(params.pages, PageRange { start: 5, end: 7 });
}

#[test]
fn interactive_tiebreak_overflow_is_a_validation_error() {
    let config = Config::default();
    let result = resolve(
        &["pixivdl"],
        &config,
        "4294967295\n1\n",
        &[Need::Pages],
        false,
    );
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn number_of_pages_flag_seeds_the_default_end_page() {
    let config = Config::default();
    // Operator accepts both defaults; -n 4 becomes the end page.
    let params = resolve(
        &["pixivdl", "-n", "4"],
        &config,
        "\n\n",
        &[Need::Pages],
        false,
    )
    .unwrap();
    assert_eq!(params.pages, PageRange { start: 1, end: 4 });
}

#[test]
fn invalid_date_flag_is_a_validation_error() {
    let config = Config::default();
    let result = resolve(
        &["pixivdl", "-s", "3", "--start-date", "2026/01/01", "tag"],
        &config,
        "",
        &[Need::Tags, Need::DateRange],
        true,
    );
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn eof_during_a_prompt_surfaces_as_end_of_input() {
    let config = Config::default();
    let result = resolve(&["pixivdl"], &config, "", &[Need::Tags], false);
    assert!(matches!(result, Err(AppError::Eof)));
}
