//! Exports [`Site`], which loads a site directory from disk: the settings
//! file ([`crate::config`]), the portfolio record ([`crate::portfolio`]), and
//! the blog index and posts ([`crate::blog`]). The parsers themselves never
//! touch the file system; this module does the I/O and applies the site's
//! loading policy:
//!
//! 1. `.config` is read first. If it can't be read, the site runs on
//!    [`SiteConfig::fallback`].
//! 2. If maintenance mode is on, nothing else is loaded.
//! 3. Otherwise `info.xml` and `blogs.json` are loaded, and failures in
//!    either are errors.

use std::fs;
use std::path::{Path, PathBuf};

use crate::blog::{self, BlogIndex, BlogPost};
use crate::config::{self, SiteConfig};
use crate::portfolio::{self, PortfolioRecord};

pub const CONFIG_FILE: &str = ".config";
pub const PORTFOLIO_FILE: &str = "info.xml";
pub const BLOG_INDEX_FILE: &str = "blogs.json";
pub const BLOG_DIRECTORY: &str = "blogs";

/// A loaded site directory.
#[derive(Debug, Clone)]
pub struct Site {
    /// The directory the files were read from.
    pub root: PathBuf,

    pub config: SiteConfig,

    /// `None` while the site is in maintenance mode.
    pub content: Option<Content>,
}

/// Everything the site shows outside maintenance mode.
#[derive(Debug, Clone)]
pub struct Content {
    pub portfolio: PortfolioRecord,
    pub blogs: BlogIndex,
}

impl Site {
    /// Walks up from `dir` to the first directory holding `info.xml` or
    /// `.config`.
    pub fn locate(dir: &Path) -> Result<PathBuf> {
        dir.ancestors()
            .find(|candidate| {
                candidate.join(PORTFOLIO_FILE).is_file() || candidate.join(CONFIG_FILE).is_file()
            })
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::NotASite(dir.to_owned()))
    }

    /// Loads the site rooted at `root`. See the module docs for the policy.
    pub fn load(root: &Path) -> Result<Site> {
        let config = load_config(root);
        let content = match config.in_maintenance() {
            true => {
                tracing::debug!(root = %root.display(), "maintenance mode on; skipping content");
                None
            }
            false => Some(Content {
                portfolio: load_portfolio(root)?,
                blogs: load_blogs(root)?,
            }),
        };
        Ok(Site {
            root: root.to_owned(),
            config,
            content,
        })
    }

    /// Reads and splits the body of the published post `id`.
    pub fn post(&self, id: &str) -> Result<BlogPost> {
        let content = self.content.as_ref().ok_or(Error::Maintenance)?;
        let entry = content
            .blogs
            .find(id)
            .ok_or_else(|| Error::PostNotFound(id.to_owned()))?;
        let path = self
            .root
            .join(BLOG_DIRECTORY)
            .join(format!("{}.md", entry.content_id()));
        Ok(BlogPost::from_markdown(&read(&path)?))
    }
}

/// Reads `.config` under `root`, falling back to [`SiteConfig::fallback`]
/// when the file can't be read.
pub fn load_config(root: &Path) -> SiteConfig {
    let path = root.join(CONFIG_FILE);
    match fs::read_to_string(&path) {
        Ok(text) => {
            tracing::debug!(path = %path.display(), "loading site config");
            config::parse(&text)
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                "Error loading config, using defaults: {}",
                e
            );
            SiteConfig::fallback()
        }
    }
}

/// Reads and parses `info.xml` under `root`.
pub fn load_portfolio(root: &Path) -> Result<PortfolioRecord> {
    let path = root.join(PORTFOLIO_FILE);
    portfolio::parse(&read(&path)?).map_err(|err| Error::Portfolio { path, err })
}

/// Reads and parses `blogs.json` under `root`.
pub fn load_blogs(root: &Path) -> Result<BlogIndex> {
    let path = root.join(BLOG_INDEX_FILE);
    BlogIndex::from_json(&read(&path)?).map_err(|err| Error::Blog { path, err })
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| Error::Io {
        path: path.to_owned(),
        err,
    })
}

/// The result of a fallible site operation.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for loading a site. Every variant that involves a file
/// carries its path.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when neither `dir` nor any parent holds site files.
    #[error("Could not find `{}` or `{}` in '{}' or any parent directory", PORTFOLIO_FILE, CONFIG_FILE, .0.display())]
    NotASite(PathBuf),

    /// Returned for I/O problems reading a site file.
    #[error("Reading '{}': {}", .path.display(), .err)]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned when `info.xml` doesn't parse.
    #[error("Parsing '{}': {}", .path.display(), .err)]
    Portfolio {
        path: PathBuf,
        #[source]
        err: portfolio::Error,
    },

    /// Returned when `blogs.json` doesn't parse.
    #[error("Parsing '{}': {}", .path.display(), .err)]
    Blog {
        path: PathBuf,
        #[source]
        err: blog::Error,
    },

    /// Returned when no published post has the requested id.
    #[error("No published post with id `{0}`")]
    PostNotFound(String),

    /// Returned when content is requested while the site is in maintenance
    /// mode.
    #[error("The site is in maintenance mode")]
    Maintenance,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Theme;

    const SITE: &str = "./testdata/site";
    const MAINTENANCE: &str = "./testdata/maintenance";

    #[test]
    fn test_load_site() -> Result<()> {
        let site = Site::load(Path::new(SITE))?;
        assert_eq!(Theme::Light, site.config.site_settings.theme);
        assert!(!site.config.in_maintenance());

        let content = site.content.as_ref().unwrap();
        assert_eq!("Ada Lovelace", content.portfolio.name);
        assert_eq!(2, content.portfolio.social.github.len());
        assert_eq!(2, content.portfolio.projects.len());
        assert_eq!(1, content.blogs.published().count());
        Ok(())
    }

    #[test]
    fn test_post() -> Result<()> {
        let site = Site::load(Path::new(SITE))?;
        let post = site.post("hello-world")?;
        assert!(post.body.starts_with("# Hello"), "{}", post.body);
        assert_eq!(
            Some(String::from("Hello, world!")),
            post.frontmatter.and_then(|f| f.title)
        );

        assert!(matches!(site.post("draft"), Err(Error::PostNotFound(_))));
        assert!(matches!(site.post("missing"), Err(Error::PostNotFound(_))));
        Ok(())
    }

    #[test]
    fn test_maintenance_skips_content() -> Result<()> {
        // The maintenance fixture has no info.xml; loading it must not try.
        let site = Site::load(Path::new(MAINTENANCE))?;
        assert!(site.config.in_maintenance());
        assert_eq!("2 hours", site.config.site_settings.maintenance_mode.estimated_time);
        assert!(site.content.is_none());
        assert!(matches!(site.post("hello-world"), Err(Error::Maintenance)));
        Ok(())
    }

    #[test]
    fn test_missing_config_falls_back() {
        assert_eq!(SiteConfig::fallback(), load_config(Path::new("./testdata/nowhere")));
    }

    #[test]
    fn test_missing_portfolio_is_an_error() {
        match load_portfolio(Path::new(MAINTENANCE)) {
            Err(Error::Io { path, .. }) => assert!(path.ends_with(PORTFOLIO_FILE)),
            other => panic!("wanted Io error; found {:?}", other),
        }
    }

    #[test]
    fn test_locate() -> Result<()> {
        let root = Site::locate(&Path::new(SITE).join(BLOG_DIRECTORY))?;
        assert_eq!(Path::new(SITE), root);
        Ok(())
    }
}
