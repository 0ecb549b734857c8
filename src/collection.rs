//! Loading a posts directory into a linked, id-indexed collection.
//!
//! ## Directory Structure
//!
//! ```text
//! posts/                           # Root
//! ├── config.toml                  # Optional, see `config`
//! ├── 001-Post1/                   # One folder per post
//! │   ├── meta.json                # Descriptor (title, visible, path, id)
//! │   └── post1writeup.md          # Body, named by the descriptor
//! ├── 002-Draft/                   # visible = false: never loaded
//! │   └── ...
//! └── 003-Post3/
//!     └── ...
//! ```
//!
//! Folders are visited in file-name order, which is taken to be chronological.
//! Files at the root are ignored. A folder that cannot be turned into a post
//! (no descriptor, bad JSON, no body path, unreadable body, id already taken)
//! is skipped and recorded in [`Collection::skipped`]; it never aborts the
//! load. Only an unreadable root is fatal.
//!
//! ## Links
//!
//! The collection owns its posts in one `Vec`, oldest first. Previous/next
//! links are positions into that `Vec`, assigned by [`link`] once every folder
//! has been read, and resolved with [`Collection::prev`] / [`Collection::next`].
//! Links always describe chronological adjacency: the newest-first view from
//! [`Collection::newest_first`] reorders references, not the posts, so it
//! leaves them untouched.
//!
//! ## Duplicate ids
//!
//! The first folder to claim an id keeps it. Later folders with the same id
//! are skipped with [`LoadError::DuplicateId`], so the sequence and the index
//! always contain exactly the same posts.

use crate::config::{DisplayOrder, SiteConfig};
use crate::meta::read_meta;
use crate::post::{LoadError, Post, load_post};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("cannot read posts directory {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A folder that did not produce a post.
#[derive(Debug)]
pub struct SkippedFolder {
    pub folder: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug)]
pub enum SkipReason {
    /// Descriptor has `visible = false`.
    Hidden,
    /// An entry under the root could not be inspected (e.g. a broken symlink).
    Unreadable(std::io::Error),
    Failed(LoadError),
}

impl SkippedFolder {
    /// True when the folder was skipped because of an error rather than by choice.
    pub fn is_error(&self) -> bool {
        matches!(self.reason, SkipReason::Failed(_) | SkipReason::Unreadable(_))
    }
}

/// Loaded posts, oldest first, with an id index.
#[derive(Debug, Default)]
pub struct Collection {
    posts: Vec<Post>,
    index: HashMap<i64, usize>,
    skipped: Vec<SkippedFolder>,
}

impl Collection {
    /// All posts in chronological (folder) order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Look up a post by id.
    pub fn get(&self, id: i64) -> Option<&Post> {
        self.index.get(&id).map(|&pos| &self.posts[pos])
    }

    /// Position of the post with `id` in [`posts`](Self::posts).
    pub fn position(&self, id: i64) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Ids in the index, in no particular order.
    pub fn indexed_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.index.keys().copied()
    }

    /// The post published just before `post`.
    pub fn prev(&self, post: &Post) -> Option<&Post> {
        post.prev.and_then(|pos| self.posts.get(pos))
    }

    /// The post published just after `post`.
    pub fn next(&self, post: &Post) -> Option<&Post> {
        post.next.and_then(|pos| self.posts.get(pos))
    }

    /// References to all posts, newest first.
    pub fn newest_first(&self) -> Vec<&Post> {
        let mut view: Vec<&Post> = self.posts.iter().collect();
        reverse_in_place(&mut view);
        view
    }

    /// References to all posts in the requested display order.
    pub fn in_order(&self, order: DisplayOrder) -> Vec<&Post> {
        match order {
            DisplayOrder::NewestFirst => self.newest_first(),
            DisplayOrder::OldestFirst => self.posts.iter().collect(),
        }
    }

    /// Entries that were visited but did not produce a post, in visit order.
    pub fn skipped(&self) -> &[SkippedFolder] {
        &self.skipped
    }
}

/// Load every post folder under `root`.
///
/// Per-folder problems are recorded in [`Collection::skipped`] and logged;
/// the only error returned is an unreadable root.
pub fn load(root: &Path, config: &SiteConfig) -> Result<Collection, CollectionError> {
    let root_unreadable = |source: std::io::Error| CollectionError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    };

    let root_meta = fs::metadata(root).map_err(root_unreadable)?;
    if !root_meta.is_dir() {
        return Err(root_unreadable(std::io::Error::new(
            std::io::ErrorKind::NotADirectory,
            "not a directory",
        )));
    }

    let mut posts: Vec<Post> = Vec::new();
    let mut folders: Vec<PathBuf> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut skipped = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(root_unreadable(err.into())),
            Err(err) => {
                // Broken symlink or an entry that vanished mid-scan
                let folder = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                warn!(folder = %folder.display(), error = %err, "skipping unreadable entry");
                skipped.push(SkippedFolder {
                    folder,
                    reason: SkipReason::Unreadable(err.into()),
                });
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let folder = entry.into_path();

        let post = match load_folder(&folder, &config.meta_file) {
            Ok(Some(post)) => post,
            Ok(None) => {
                debug!(folder = %folder.display(), "post is hidden");
                skipped.push(SkippedFolder {
                    folder,
                    reason: SkipReason::Hidden,
                });
                continue;
            }
            Err(err) => {
                warn!(folder = %folder.display(), error = %err, "skipping post folder");
                skipped.push(SkippedFolder {
                    folder,
                    reason: SkipReason::Failed(err),
                });
                continue;
            }
        };

        match index.entry(post.id) {
            Entry::Occupied(taken) => {
                let err = LoadError::DuplicateId {
                    id: post.id,
                    first: folders[*taken.get()].clone(),
                };
                warn!(folder = %folder.display(), error = %err, "skipping post folder");
                skipped.push(SkippedFolder {
                    folder,
                    reason: SkipReason::Failed(err),
                });
            }
            Entry::Vacant(slot) => {
                debug!(folder = %folder.display(), id = post.id, "loaded post");
                slot.insert(posts.len());
                posts.push(post);
                folders.push(folder);
            }
        }
    }

    link(&mut posts);

    info!(
        root = %root.display(),
        loaded = posts.len(),
        skipped = skipped.len(),
        "loaded posts"
    );

    Ok(Collection {
        posts,
        index,
        skipped,
    })
}

/// Read one folder. `Ok(None)` means the post exists but is not visible.
fn load_folder(folder: &Path, meta_file: &str) -> Result<Option<Post>, LoadError> {
    let meta = read_meta(folder, meta_file)?;
    if !meta.visible {
        return Ok(None);
    }
    load_post(&meta).map(Some)
}

/// Connect each post to its neighbours in `posts`.
///
/// The first post has no `prev`, the last has no `next`. Must be called on
/// the final sequence: positions are not adjusted afterwards.
pub fn link(posts: &mut [Post]) {
    let count = posts.len();
    for (i, post) in posts.iter_mut().enumerate() {
        post.prev = i.checked_sub(1);
        post.next = (i + 1 < count).then_some(i + 1);
    }
}

/// Reverse `items` in place by swapping from both ends toward the middle.
pub fn reverse_in_place<T>(items: &mut [T]) {
    if items.is_empty() {
        return;
    }
    let (mut left, mut right) = (0, items.len() - 1);
    while left < right {
        items.swap(left, right);
        left += 1;
        right -= 1;
    }
}
