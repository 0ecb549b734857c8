//! CLI output formatting.
//!
//! Output is information-first: each post is shown by positional index, id
//! and title, with its neighbours as indented context lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Posts (newest first)
//! 001 #6 Post six
//!     Prev: #3
//! 002 #3 Post three
//!     Prev: #1
//!     Next: #6
//! 003 #1 Post one
//!     Next: #3
//!
//! Loaded 3 posts, skipped 1 folder
//! ```
//!
//! ## Check
//!
//! ```text
//! Skipped
//! 002-Draft: hidden
//! 004-MissingBody: cannot read posts/004-MissingBody/missing.md: No such file or directory
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::collection::{Collection, SkipReason, SkippedFolder};
use crate::config::DisplayOrder;
use crate::post::Post;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Header line for a post: index, id, title.
fn post_header(index: usize, post: &Post) -> String {
    if post.title().is_empty() {
        format!("{} #{}", format_index(index), post.id())
    } else {
        format!("{} #{} {}", format_index(index), post.id(), post.title())
    }
}

/// Neighbour lines for a post, chronological.
fn neighbour_lines(collection: &Collection, post: &Post, depth: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(prev) = collection.prev(post) {
        lines.push(format!("{}Prev: #{}", indent(depth), prev.id()));
    }
    if let Some(next) = collection.next(post) {
        lines.push(format!("{}Next: #{}", indent(depth), next.id()));
    }
    lines
}

/// Folder path shown relative to the posts root when possible.
fn display_folder(folder: &Path, root: &Path) -> String {
    folder
        .strip_prefix(root)
        .unwrap_or(folder)
        .display()
        .to_string()
}

fn skip_line(skipped: &SkippedFolder, root: &Path) -> String {
    let reason = match &skipped.reason {
        SkipReason::Hidden => "hidden".to_string(),
        SkipReason::Unreadable(err) => format!("unreadable: {err}"),
        SkipReason::Failed(err) => err.to_string(),
    };
    format!("{}: {}", display_folder(&skipped.folder, root), reason)
}

fn summary_line(collection: &Collection) -> String {
    format!(
        "Loaded {}, skipped {}",
        plural(collection.len(), "post"),
        plural(collection.skipped().len(), "folder")
    )
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(collection: &Collection, order: DisplayOrder) -> Vec<String> {
    let mut lines = Vec::new();
    let label = match order {
        DisplayOrder::NewestFirst => "newest first",
        DisplayOrder::OldestFirst => "oldest first",
    };
    lines.push(format!("Posts ({label})"));

    for (i, post) in collection.in_order(order).into_iter().enumerate() {
        lines.push(post_header(i + 1, post));
        lines.extend(neighbour_lines(collection, post, 1));
    }

    lines.push(String::new());
    lines.push(summary_line(collection));
    lines
}

pub fn print_scan_output(collection: &Collection, order: DisplayOrder) {
    for line in format_scan_output(collection, order) {
        println!("{}", line);
    }
}

// ============================================================================
// Show
// ============================================================================

/// Full view of one post: header, neighbours, blank line, body.
pub fn format_post_output(collection: &Collection, post: &Post) -> Vec<String> {
    let position = collection.position(post.id()).unwrap_or_default();
    let mut lines = vec![post_header(position + 1, post)];
    lines.extend(neighbour_lines(collection, post, 1));
    lines.push(String::new());
    lines.extend(post.body().lines().map(str::to_string));
    lines
}

pub fn print_post_output(collection: &Collection, post: &Post) {
    for line in format_post_output(collection, post) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(collection: &Collection, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    if !collection.skipped().is_empty() {
        lines.push("Skipped".to_string());
        for skipped in collection.skipped() {
            lines.push(skip_line(skipped, root));
        }
        lines.push(String::new());
    }
    lines.push(summary_line(collection));
    lines
}

pub fn print_check_output(collection: &Collection, root: &Path) {
    for line in format_check_output(collection, root) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::load;
    use crate::config::SiteConfig;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    fn three_posts() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "001-one", 1, true, "first line\nsecond line\n");
        write_post(tmp.path(), "002-two", 2, true, "two");
        write_post(tmp.path(), "003-three", 3, true, "three");
        tmp
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn scan_newest_first() {
        let tmp = three_posts();
        let collection = load(tmp.path(), &SiteConfig::default()).unwrap();
        let lines = format_scan_output(&collection, DisplayOrder::NewestFirst);

        assert_eq!(
            lines,
            vec![
                "Posts (newest first)",
                "001 #3 post 3",
                "    Prev: #2",
                "002 #2 post 2",
                "    Prev: #1",
                "    Next: #3",
                "003 #1 post 1",
                "    Next: #2",
                "",
                "Loaded 3 posts, skipped 0 folders",
            ]
        );
    }

    #[test]
    fn scan_oldest_first() {
        let tmp = three_posts();
        let collection = load(tmp.path(), &SiteConfig::default()).unwrap();
        let lines = format_scan_output(&collection, DisplayOrder::OldestFirst);

        assert_eq!(lines[0], "Posts (oldest first)");
        assert_eq!(lines[1], "001 #1 post 1");
    }

    #[test]
    fn show_includes_body_lines() {
        let tmp = three_posts();
        let collection = load(tmp.path(), &SiteConfig::default()).unwrap();
        let post = collection.get(1).unwrap();

        let lines = format_post_output(&collection, post);
        assert_eq!(
            lines,
            vec!["001 #1 post 1", "    Next: #2", "", "first line", "second line"]
        );
    }

    #[test]
    fn check_lists_skipped_folders_relative_to_root() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "001-ok", 1, true, "ok");
        write_post(tmp.path(), "002-draft", 2, false, "draft");
        let broken = tmp.path().join("003-broken");
        fs::create_dir_all(&broken).unwrap();
        write_meta_json(&broken, r#"{"title": "b", "visible": true, "path": "", "id": 3}"#);

        let collection = load(tmp.path(), &SiteConfig::default()).unwrap();
        let lines = format_check_output(&collection, tmp.path());

        assert_eq!(
            lines,
            vec![
                "Skipped",
                "002-draft: hidden",
                "003-broken: path does not exist for this post",
                "",
                "Loaded 1 post, skipped 2 folders",
            ]
        );
    }

    #[test]
    fn check_clean_tree_is_just_summary() {
        let tmp = three_posts();
        let collection = load(tmp.path(), &SiteConfig::default()).unwrap();
        assert_eq!(
            format_check_output(&collection, tmp.path()),
            vec!["Loaded 3 posts, skipped 0 folders"]
        );
    }
}
