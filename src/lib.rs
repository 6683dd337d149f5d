//! Build tooling for the Seadragon Ajax JavaScript library.
//!
//! The `seabuild` binary bundles each configured target into a single script
//! under `bin/v2/`. The `filetree` binary exposes [`tree::copy_tree`] on its
//! own. Everything else here is the plumbing they share.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod fileio;
pub mod jsheader;
pub mod logger;
pub mod pipeline;
pub mod tool;
pub mod tree;
