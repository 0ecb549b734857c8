//! # gb
//!
//! Loads a directory of blog-post folders into an in-memory collection that
//! is ordered, linked and indexed by id. The filesystem is the data source:
//! each folder is one post, a small JSON descriptor names it, and folder
//! names decide the chronological order.
//!
//! # Pipeline
//!
//! ```text
//! 1. Meta     folder/meta.json  →  PostMeta     (descriptor → body path)
//! 2. Post     PostMeta          →  Post         (body file → text)
//! 3. Collect  root/*            →  Collection   (filter, index, skip bad folders)
//! 4. Link     Collection        →  prev/next    (once, over the final sequence)
//! ```
//!
//! Each stage is a plain function of the previous one. Any failure in stages
//! 1 and 2 drops only that folder; the load as a whole fails only when the
//! root directory cannot be listed.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`meta`] | Descriptor parsing and body-path resolution |
//! | [`post`] | `Post` record, body loading, per-folder `LoadError` |
//! | [`collection`] | Directory scan, visibility filter, id index, linking, reversal |
//! | [`config`] | `config.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup for the binary |
//!
//! # Design Decisions
//!
//! ## Positional Links
//!
//! Posts don't point at each other. The [`collection::Collection`] owns every
//! post in a single `Vec`, and previous/next are stored as positions in it.
//! That keeps ownership a tree while still giving reference-identical
//! neighbours through [`collection::Collection::prev`] and
//! [`collection::Collection::next`].
//!
//! ## Chronological Links, Reversible Views
//!
//! Newest-first display is a reversed `Vec<&Post>`, not a reordering of the
//! posts themselves, so previous/next always mean "published before/after"
//! whatever order the caller shows them in.
//!
//! ## First Id Wins
//!
//! If two folders claim the same id, the earlier folder keeps it and the later
//! one is skipped with an error, so lookup by id and iteration never disagree.

pub mod collection;
pub mod config;
pub mod logging;
pub mod meta;
pub mod output;
pub mod post;

#[cfg(test)]
pub(crate) mod test_helpers;
