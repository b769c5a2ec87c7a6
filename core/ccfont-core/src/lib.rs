//! ccfont-core: the quiet courier between Creative Cloud and your font folder
//!
//! Creative Cloud keeps activated fonts in a cache folder under names only a
//! sync engine could love (`ABCDEF01`, `10345`, ...). This library walks into
//! that cache, asks every file who it really is, and copies it out under the
//! family name it was born with.
//!
//! ## One Trip Through the Pipeline
//!
//! **Locate**: find the cache folder (named `r`) somewhere below the Adobe
//! `CoreSync` directory, visiting folders in name order so repeated runs agree.
//!
//! **Prepare**: make sure the output directory exists, unless this is a dry run.
//!
//! **Enumerate**: list the files sitting directly in the cache folder.
//!
//! **Resolve**: read each file's `name` table and pick its family name.
//!
//! **Copy**: write `<family>.otf` into the output directory and report
//! `<cache name>\t->\t<family>.otf` on the output sink.
//!
//! ## A Sample Run
//!
//! ```rust,no_run
//! use ccfont_core::config::CopyConfig;
//! use ccfont_core::copy::copy_fonts;
//!
//! let config = CopyConfig::new("/Users/me/Library/Application Support/Adobe/CoreSync", "/tmp/fonts")
//!     .dry_run(true);
//!
//! let summary = copy_fonts(&config, std::io::stdout())?;
//! println!("{} fonts would be copied", summary.records.len());
//! #
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## House Rules
//!
//! - One font at a time, one buffer at a time: each file's bytes are dropped
//!   before the next file is opened.
//! - A font that cannot be read or parsed is skipped and remembered in the
//!   summary; set `fail_fast` on the config to stop at the first one.
//! - Destinations are overwritten. Two files declaring the same family end
//!   up as whichever was copied last.
//!
//! Built on fontations (read-fonts, skrifa) and walkdir.

pub mod config;
pub mod copy;
pub mod discovery;
pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod fixtures;
pub mod names;
pub mod output;

pub use error::{CopyError, Result};
