use ansi_term::{Colour, Style};
use unicode_width::UnicodeWidthStr;

const PADDING: usize = 60;
const HOMEPAGE: &str = "https://github.com/pixivdl/pixivdl";

/// Pad a section label with a rule to the menu width.
fn rule(label: &str) -> String {
    let width = UnicodeWidthStr::width(label);
    let fill = PADDING.saturating_sub(width);
    format!("{}{}", label, "\u{2500}".repeat(fill))
}

/// Set the terminal window title.
pub fn set_console_title(suffix: &str) {
    let title = if suffix.is_empty() {
        format!("pixivdl {}", env!("CARGO_PKG_VERSION"))
    } else {
        format!("pixivdl {} {}", env!("CARGO_PKG_VERSION"), suffix)
    };
    print!("\x1b]0;{title}\x07");
}

/// Banner box shown at startup and on top of the menu.
pub fn print_header() {
    let bold_yellow = Style::new().bold().fg(Colour::Yellow);
    let bold_cyan = Style::new().bold().fg(Colour::Cyan);
    let top = format!("\u{250c}{}\u{2510}", "\u{2500}".repeat(PADDING - 2));
    let bottom = format!("\u{2514}{}\u{2518}", "\u{2500}".repeat(PADDING - 2));

    println!("{top}");
    println!(
        "\u{2502} {}\u{2502}",
        bold_yellow.paint(format!(
            "{:<width$}",
            format!("pixivdl version {}", env!("CARGO_PKG_VERSION")),
            width = PADDING - 3
        ))
    );
    println!(
        "\u{2502} {}\u{2502}",
        bold_cyan.paint(format!("{:<width$}", HOMEPAGE, width = PADDING - 3))
    );
    println!("{bottom}");
}

/// Print the full interactive menu.
pub fn print_menu() {
    let bold = Style::new().bold();
    set_console_title("");
    print_header();

    println!("{}", bold.paint(rule("\u{2500}\u{2500} Pixiv ")));
    println!(" 1.  Download by member_id");
    println!(" 2.  Download by image_id");
    println!(" 3.  Download by tags");
    println!(" 4.  Download from list");
    println!(" 5.  Download from followed artists (/bookmark.php?type=user)");
    println!(" 6.  Download from bookmarked images (/bookmark.php)");
    println!(" 7.  Download from tags list");
    println!(" 8.  Download new illust from bookmarked members (/bookmark_new_illust.php)");
    println!(" 9.  Download by Title/Caption");
    println!(" 10. Download by Tag and Member Id");
    println!(" 11. Download Member Bookmark (/bookmark.php?id=)");
    println!(" 12. Download by Group Id");
    println!(" 13. Download by Manga Series Id");
    println!(" 14. Download by Novel Id");
    println!(" 15. Download by Novel Series Id");
    println!(" 16. Download by Rank");
    println!(" 17. Download by Rank R-18");
    println!(" 18. Download by New Illusts");
    println!(" 19. Download by Unlisted image_id");
    println!("{}", bold.paint(rule("\u{2500}\u{2500} FANBOX ")));
    println!(" f1. Download from supporting list (FANBOX)");
    println!(" f2. Download by artist/creator id (FANBOX)");
    println!(" f3. Download by post id (FANBOX)");
    println!(" f4. Download from following list (FANBOX)");
    println!(" f5. Download from custom list (FANBOX)");
    println!(" f6. Download Pixiv by FANBOX Artist ID");
    println!("{}", bold.paint(rule("\u{2500}\u{2500} Sketch ")));
    println!(" s1. Download by creator id (Sketch)");
    println!(" s2. Download by post id (Sketch)");
    println!("{}", bold.paint(rule("\u{2500}\u{2500} Batch Download ")));
    println!(" b. Batch Download from batch_job.json (experimental)");
    println!("{}", bold.paint(rule("\u{2500}\u{2500} Others ")));
    println!(" d. Manage database");
    println!(" l. Export local database.");
    println!(" e. Export online followed artist.");
    println!(" m. Export online other's followed artist.");
    println!(" p. Export online image bookmarks.");
    println!(" i. Import list file");
    println!(" u. Ugoira re-encode");
    println!(" r. Reload config");
    println!(" c. Print config");
    println!(" x. Exit");
}
