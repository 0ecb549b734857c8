//! Shared test utilities for the gb test suite.
//!
//! Fixture writers build post folders inside a `TempDir`; extractors and
//! assertions work on loaded [`Collection`]s.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_post(tmp.path(), "001-Post1", 1, true, "hello");
//! let collection = load(tmp.path(), &SiteConfig::default()).unwrap();
//! assert_eq!(post_ids(collection.posts()), vec![1]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::collection::Collection;
use crate::post::Post;

// =========================================================================
// Fixture writers
// =========================================================================

/// Create `<root>/<folder_name>/` with a `meta.json` and a body file.
///
/// The descriptor uses title `post {id}` and body file `post{id}writeup.md`.
/// Returns the folder path.
pub fn write_post(root: &Path, folder_name: &str, id: i64, visible: bool, body: &str) -> PathBuf {
    let folder = root.join(folder_name);
    fs::create_dir_all(&folder).unwrap();

    let body_name = format!("post{id}writeup.md");
    let meta = serde_json::json!({
        "title": format!("post {id}"),
        "visible": visible,
        "path": body_name,
        "id": id,
    });
    write_meta_json(&folder, &meta.to_string());
    fs::write(folder.join(&body_name), body).unwrap();
    folder
}

/// Write raw descriptor text to `<folder>/meta.json`.
pub fn write_meta_json(folder: &Path, json: &str) {
    fs::write(folder.join("meta.json"), json).unwrap();
}

// =========================================================================
// Extractors and assertions
// =========================================================================

/// Ids of `posts` in iteration order.
pub fn post_ids<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Vec<i64> {
    posts.into_iter().map(Post::id).collect()
}

/// Assert every sequenced post is reachable by its own id and the index holds
/// nothing else.
pub fn assert_index_consistent(collection: &Collection) {
    for post in collection.posts() {
        let found = collection
            .get(post.id())
            .unwrap_or_else(|| panic!("post {} missing from index", post.id()));
        assert!(
            std::ptr::eq(found, post),
            "index entry for {} points at a different post",
            post.id()
        );
    }

    let mut indexed: Vec<i64> = collection.indexed_ids().collect();
    let mut sequenced = post_ids(collection.posts());
    indexed.sort_unstable();
    sequenced.sort_unstable();
    assert_eq!(indexed, sequenced, "index and sequence disagree");
}
