//! Worklog CLI library.
//!
//! This crate provides the `wl` command-line interface over the entry store.

mod cli;
pub mod commands;
mod config;
mod lock;
mod store;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use lock::StoreLock;
pub use store::{LockedStore, open_store};
