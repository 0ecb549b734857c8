//! Post records and body loading.
//!
//! A [`Post`] is what a post folder becomes once its descriptor has been
//! parsed and its body read. Posts never hold references to each other:
//! the previous/next relation is stored as positions into the owning
//! [`Collection`](crate::collection::Collection) and resolved through it.

use crate::meta::PostMeta;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single post folder could not be loaded.
///
/// None of these are fatal to a collection load; the folder is skipped.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The descriptor or body file is missing or unreadable.
    #[error("cannot read {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid descriptor {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("path does not exist for this post")]
    MissingField { folder: PathBuf },
    /// The descriptor's `path` uses `..` or names no file.
    #[error("body path {} does not stay inside {}", path.display(), folder.display())]
    OutsideFolder { folder: PathBuf, path: PathBuf },
    #[error("id {id} already used by {}", first.display())]
    DuplicateId { id: i64, first: PathBuf },
}

/// A loaded post.
///
/// Fields are read-only outside the crate. `prev`/`next` are positions in the
/// chronological sequence and are assigned once, by
/// [`link`](crate::collection::link).
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub(crate) title: String,
    pub(crate) id: i64,
    pub(crate) visible: bool,
    pub(crate) body: String,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl Post {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Body file contents, verbatim.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Position of the chronologically previous post, if any.
    pub fn prev_position(&self) -> Option<usize> {
        self.prev
    }

    /// Position of the chronologically next post, if any.
    pub fn next_position(&self) -> Option<usize> {
        self.next
    }
}

/// Read the body file named by `meta` and build an unlinked [`Post`].
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; the
/// body is otherwise kept exactly as stored.
pub fn load_post(meta: &PostMeta) -> Result<Post, LoadError> {
    let bytes = fs::read(&meta.path).map_err(|source| LoadError::NotFound {
        path: meta.path.clone(),
        source,
    })?;

    Ok(Post {
        title: meta.title.clone(),
        id: meta.id,
        visible: meta.visible,
        body: String::from_utf8_lossy(&bytes).into_owned(),
        prev: None,
        next: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::read_meta;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn loads_post_from_meta() {
        let tmp = TempDir::new().unwrap();
        let folder = write_post(tmp.path(), "001-Post1", 1, true, "# Post 1\n\nbody text\n");
        let meta = read_meta(&folder, "meta.json").unwrap();

        let post = load_post(&meta).unwrap();
        assert_eq!(post.title(), meta.title);
        assert_eq!(post.id(), meta.id);
        assert_eq!(post.visible(), meta.visible);
        assert_eq!(post.body(), "# Post 1\n\nbody text\n");
        assert_eq!(post.prev_position(), None);
        assert_eq!(post.next_position(), None);
    }

    #[test]
    fn body_is_exact_file_contents() {
        let tmp = TempDir::new().unwrap();
        let body_path = tmp.path().join("meta.json");
        let raw = "  leading space\r\nwindows line\n\n\ttrailing tab\t";
        fs::write(&body_path, raw).unwrap();

        let meta = PostMeta {
            title: "some title".into(),
            visible: true,
            path: body_path.clone(),
            id: 1,
        };
        let post = load_post(&meta).unwrap();
        assert_eq!(post.body(), fs::read_to_string(&body_path).unwrap());
    }

    #[test]
    fn missing_body_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("004-MissingBody").join("missing.md");
        let meta = PostMeta {
            title: "some title".into(),
            visible: true,
            path: missing.clone(),
            id: 4,
        };

        match load_post(&meta).unwrap_err() {
            LoadError::NotFound { path, source } => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_body_still_loads() {
        let tmp = TempDir::new().unwrap();
        let body_path = tmp.path().join("latin1.txt");
        fs::write(&body_path, b"caf\xe9").unwrap();
        let meta = PostMeta {
            path: body_path,
            visible: true,
            ..PostMeta::default()
        };

        let post = load_post(&meta).unwrap();
        assert!(post.body().starts_with("caf"));
    }

    #[test]
    fn not_found_message_names_the_file() {
        let meta = PostMeta {
            path: PathBuf::from("/definitely/not/here.md"),
            ..PostMeta::default()
        };
        let msg = load_post(&meta).unwrap_err().to_string();
        assert!(msg.contains("/definitely/not/here.md"));
    }
}
