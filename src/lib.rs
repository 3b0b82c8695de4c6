//! twentyq: twenty questions on a binary decision tree that learns.
//!
//! Layers, innermost first:
//! - [`domain`]: the tree, its `[Q]`/`[A]` store codec, player responses
//! - [`application`]: play engine, tree store, game session
//! - [`infrastructure`]: filesystem and console boundaries
//! - [`cli`]: arguments, commands, interactive menu

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
