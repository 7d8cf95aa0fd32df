//! The content layer for a personal portfolio site. The site is a static
//! single-page app whose content lives in a handful of files:
//!
//! 1. `info.xml`, the portfolio record: bio, links, skills, projects,
//!    education ([`crate::portfolio`])
//! 2. `.config`, the `KEY=VALUE` site settings: theme, maintenance mode,
//!    feature flags, palettes ([`crate::config`])
//! 3. `blogs.json` and `blogs/*.md`, the blog index and post bodies
//!    ([`crate::blog`], [`crate::markdown`])
//!
//! The parsers are pure functions over text. [`crate::site`] does the file
//! reading and applies the loading policy: fall back to default settings
//! when `.config` is unreadable, and skip the content files entirely while
//! maintenance mode is on.
//!
//! Settings are handled as immutable snapshots. Changing a value produces a
//! new [`config::SiteConfig`], and writing it back to disk is a separate,
//! explicit patch of the file text ([`config::serialize`]).

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod blog;
pub mod config;
pub mod markdown;
pub mod portfolio;
pub mod site;
mod xml;
