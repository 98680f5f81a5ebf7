//! # antmap
//!
//! Interactive console front end for antenna maps.
//!
//! `antmap` loads dot-map files from an input directory, builds the
//! equal-frequency graph with [`antgrid`] and offers a numbered menu to
//! traverse it, inspect intersections and danger points, edit antennas and
//! save results. The same operations are available as one-shot
//! subcommands.
//!
//! ## Modules
//!
//! - [`cli`] - Command line definition and one-shot subcommands
//! - [`config`] - `.antmap.toml` configuration
//! - [`console`] - Line-based terminal input and colored output
//! - [`ctx`] - Application context and state management
//! - [`io_ops`] - File listing and selection prompts
//! - [`lang`] - Localized message tables
//! - [`menu`] - Interactive main menu
//!
//! ## Example
//!
//! ```rust,no_run
//! use antmap::{config::AppConfig, console::Console, ctx::AppContext, menu::MenuHandler};
//!
//! let mut ctx = AppContext::new(AppConfig::default());
//! let mut console = Console::stdio();
//! MenuHandler::new(&mut ctx, &mut console).run().unwrap();
//! ```

/// Command line definition and one-shot subcommands.
pub mod cli;

/// Configuration file handling.
pub mod config;

/// Terminal input and output.
pub mod console;

/// Application context and state management.
pub mod ctx;

/// File listing and selection prompts.
pub mod io_ops;

/// Localized user-facing messages.
pub mod lang;

/// Interactive main menu.
pub mod menu;

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;
