//! Post descriptor parsing.
//!
//! Every post folder carries a small JSON descriptor (`meta.json` unless
//! configured otherwise) that names the post and points at its body file:
//!
//! ```json
//! {
//!   "title": "post 1",
//!   "visible": true,
//!   "path": "post1writeup.md",
//!   "id": 1
//! }
//! ```
//!
//! `path` is relative to the folder and is resolved against it here, so the
//! rest of the pipeline only ever sees paths it can open directly. A leading
//! `/` (or drive prefix) is dropped, so `"/notes/a.md"` still means
//! `<folder>/notes/a.md`; a `..` component is rejected because it would leave
//! the folder.
//!
//! Missing or `null` `title`, `visible` or `id` fall back to `""`, `false`
//! and `0`; a missing, `null` or empty `path` is an error because there is
//! nothing to load.

use crate::post::LoadError;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Parsed descriptor of a single post folder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PostMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub visible: bool,
    /// Body file path. Relative as written; joined with the folder by [`read_meta`].
    #[serde(deserialize_with = "null_as_default")]
    pub path: PathBuf,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
}

/// Treat an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Join a descriptor `path` onto `folder`, keeping the result inside it.
///
/// Root and prefix components are dropped. Returns `None` when the path has
/// a `..` component or nothing left to name a file.
fn resolve_body_path(folder: &Path, path: &Path) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
            Component::ParentDir => return None,
        }
    }
    if relative.as_os_str().is_empty() {
        return None;
    }
    Some(folder.join(relative))
}

/// Read and parse `<folder>/<meta_file>`.
///
/// The returned [`PostMeta::path`] is already joined with `folder`.
pub fn read_meta(folder: &Path, meta_file: &str) -> Result<PostMeta, LoadError> {
    let meta_path = folder.join(meta_file);
    let content = fs::read(&meta_path).map_err(|source| LoadError::NotFound {
        path: meta_path.clone(),
        source,
    })?;

    let mut meta: PostMeta =
        serde_json::from_slice(&content).map_err(|source| LoadError::Parse {
            path: meta_path,
            source,
        })?;

    if meta.path.as_os_str().is_empty() {
        return Err(LoadError::MissingField {
            folder: folder.to_path_buf(),
        });
    }
    let resolved =
        resolve_body_path(folder, &meta.path).ok_or_else(|| LoadError::OutsideFolder {
            folder: folder.to_path_buf(),
            path: meta.path.clone(),
        })?;
    meta.path = resolved;
    Ok(meta)
}
