//! Defines the [`BlogIndex`], [`BlogEntry`], and [`BlogPost`] types. The
//! index lives in `blogs.json`:
//!
//! ```json
//! {
//!   "blogs": [
//!     {
//!       "id": "hello-world",
//!       "title": "Hello, world!",
//!       "excerpt": "First post",
//!       "date": "2024-03-05",
//!       "readTime": "3 min read",
//!       "category": "Meta",
//!       "tags": ["intro"],
//!       "published": true,
//!       "content": "hello-world.md"
//!     }
//!   ]
//! }
//! ```
//!
//! and each post body lives in `blogs/{content_id}.md`, optionally preceded
//! by YAML frontmatter between `---` fences.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::markdown;

/// The number of entries [`BlogIndex::related`] returns at most.
pub const MAX_RELATED: usize = 3;

/// The parsed `blogs.json`. Entries keep file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogIndex {
    #[serde(default)]
    pub blogs: Vec<BlogEntry>,
}

/// One post's metadata from the index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogEntry {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub excerpt: String,

    #[serde(default)]
    pub description: Option<String>,

    /// The publication date, usually `YYYY-MM-DD`. See [`format_date`].
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub read_time: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub thumbnail: Option<String>,

    #[serde(default)]
    pub featured: bool,

    /// Unpublished entries are hidden from every listing and lookup.
    #[serde(default)]
    pub published: bool,

    /// The markdown file name under `blogs/`, e.g. `hello-world.md`.
    #[serde(default)]
    pub content: String,
}

impl BlogEntry {
    /// The body's file stem: `content` with its first `.md` removed.
    pub fn content_id(&self) -> String {
        self.content.replacen(".md", "", 1)
    }

    fn shares_topic_with(&self, other: &BlogEntry) -> bool {
        self.category == other.category || self.tags.iter().any(|tag| other.tags.contains(tag))
    }

    fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        term.is_empty()
            || self.title.to_lowercase().contains(&term)
            || self.excerpt.to_lowercase().contains(&term)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
    }
}

impl BlogIndex {
    /// Parses `blogs.json`. A document without a `blogs` key is an empty
    /// index.
    pub fn from_json(input: &str) -> Result<BlogIndex> {
        Ok(serde_json::from_str(input)?)
    }

    /// Published entries in index order.
    pub fn published(&self) -> impl Iterator<Item = &BlogEntry> {
        self.blogs.iter().filter(|blog| blog.published)
    }

    /// Looks up a published entry by id.
    pub fn find(&self, id: &str) -> Option<&BlogEntry> {
        self.published().find(|blog| blog.id == id)
    }

    /// Every category used in the index, sorted and deduplicated.
    pub fn categories(&self) -> Vec<&str> {
        self.blogs
            .iter()
            .map(|blog| blog.category.as_str())
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .collect()
    }

    /// Published entries whose title, excerpt or any tag contains `term`
    /// (ignoring case), restricted to `category` unless it is `"all"`. An
    /// empty `term` matches everything.
    pub fn search<'a>(&'a self, term: &'a str, category: &'a str) -> impl Iterator<Item = &'a BlogEntry> {
        self.published().filter(move |blog| {
            blog.matches(term) && (category == "all" || blog.category == category)
        })
    }

    /// Up to [`MAX_RELATED`] other published entries sharing `current`'s
    /// category or at least one of its tags, in index order.
    pub fn related(&self, current: &BlogEntry) -> Vec<&BlogEntry> {
        self.published()
            .filter(|blog| blog.id != current.id && blog.shares_topic_with(current))
            .take(MAX_RELATED)
            .collect()
    }
}

/// A post body with its frontmatter split off.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogPost {
    /// The parsed frontmatter, if the source had a fenced block that parsed as
    /// YAML.
    pub frontmatter: Option<Frontmatter>,

    /// The trimmed markdown after the frontmatter.
    pub body: String,
}

/// Optional metadata at the top of a post's markdown file. The index is
/// authoritative; this is informational.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Frontmatter {
    #[serde(default, alias = "Title")]
    pub title: Option<String>,

    #[serde(default, alias = "Date")]
    pub date: Option<String>,

    #[serde(default, alias = "Tags")]
    pub tags: Vec<String>,
}

impl BlogPost {
    /// Splits `input` into frontmatter and body. The frontmatter starts with
    /// a `---` line at the top of the file and ends at the next line that is
    /// `---` once trimmed. Without a closing fence the whole text is the body.
    pub fn from_markdown(input: &str) -> BlogPost {
        const FENCE: &str = "---";

        let source = input.trim_start();
        if !source.starts_with(FENCE) {
            return BlogPost {
                frontmatter: None,
                body: input.trim().to_owned(),
            };
        }

        let mut lines = source.split_inclusive('\n');
        let opening = lines.next().map(str::len).unwrap_or(0);
        let mut offset = opening;
        for line in lines {
            if line.trim() == FENCE {
                let yaml = &source[opening..offset];
                let frontmatter = match serde_yaml::from_str::<Frontmatter>(yaml) {
                    Ok(frontmatter) => Some(frontmatter),
                    Err(e) => {
                        tracing::debug!("ignoring unparseable frontmatter: {}", e);
                        None
                    }
                };
                return BlogPost {
                    frontmatter,
                    body: source[offset + line.len()..].trim().to_owned(),
                };
            }
            offset += line.len();
        }

        BlogPost {
            frontmatter: None,
            body: input.trim().to_owned(),
        }
    }

    /// Renders the body to HTML. See [`markdown::to_html`].
    pub fn to_html(&self) -> String {
        markdown::to_html(&self.body)
    }

    /// The table of contents for the body. See [`markdown::headings`].
    pub fn headings(&self) -> Vec<markdown::Heading> {
        markdown::headings(&self.body)
    }
}

/// Formats an ISO date (`2024-03-05`) or RFC 3339 timestamp as
/// `March 5, 2024`. Anything else is returned unchanged.
pub fn format_date(date: &str) -> String {
    let date = date.trim();
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.naive_local().date()));
    match parsed {
        Some(day) => day.format("%B %-d, %Y").to_string(),
        None => date.to_owned(),
    }
}

/// The result of a fallible blog operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error reading blog data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when `blogs.json` isn't valid JSON or doesn't match the
    /// expected shape.
    #[error("Failed to parse blog index: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod test {
    use super::*;

    const INDEX: &str = r#"{
      "blogs": [
        {"id": "rust", "title": "Why Rust", "excerpt": "Ownership explained", "date": "2024-03-05",
         "category": "Engineering", "tags": ["rust", "systems"], "published": true, "content": "rust.md"},
        {"id": "draft", "title": "Draft", "category": "Engineering", "tags": ["rust"],
         "published": false, "content": "draft.md"},
        {"id": "wasm", "title": "WASM notes", "excerpt": "Compiling to the web", "category": "Web",
         "tags": ["Rust"], "published": true, "content": "wasm.md"},
        {"id": "travel", "title": "Lisbon", "category": "Life", "tags": ["travel"],
         "published": true, "content": "travel.md", "featured": true},
        {"id": "cli", "title": "CLIs", "category": "Engineering", "published": true, "content": "cli.md"}
      ]
    }"#;

    #[test]
    fn test_from_json() -> Result<()> {
        let index = BlogIndex::from_json(INDEX)?;
        assert_eq!(5, index.blogs.len());
        let rust = &index.blogs[0];
        assert_eq!("rust", rust.content_id());
        assert!(!rust.featured);
        assert!(index.blogs[3].featured);
        Ok(())
    }

    #[test]
    fn test_from_json_without_blogs_key() -> Result<()> {
        assert!(BlogIndex::from_json("{}")?.blogs.is_empty());
        assert!(BlogIndex::from_json("[").is_err());
        Ok(())
    }

    #[test]
    fn test_published_and_find() -> Result<()> {
        let index = BlogIndex::from_json(INDEX)?;
        let ids: Vec<&str> = index.published().map(|b| b.id.as_str()).collect();
        assert_eq!(vec!["rust", "wasm", "travel", "cli"], ids);
        assert!(index.find("draft").is_none());
        assert_eq!(Some("WASM notes"), index.find("wasm").map(|b| b.title.as_str()));
        Ok(())
    }

    #[test]
    fn test_categories() -> Result<()> {
        let index = BlogIndex::from_json(INDEX)?;
        assert_eq!(vec!["Engineering", "Life", "Web"], index.categories());
        Ok(())
    }

    #[test]
    fn test_search() -> Result<()> {
        let index = BlogIndex::from_json(INDEX)?;
        let ids = |term: &str, category: &str| -> Vec<String> {
            index.search(term, category).map(|b| b.id.clone()).collect()
        };
        assert_eq!(vec!["rust", "wasm"], ids("RUST", "all"));
        assert_eq!(vec!["wasm"], ids("web", "all"));
        assert_eq!(vec!["rust", "cli"], ids("", "Engineering"));
        assert!(ids("nothing", "all").is_empty());
        Ok(())
    }

    #[test]
    fn test_related() -> Result<()> {
        let index = BlogIndex::from_json(INDEX)?;
        let current = index.find("rust").unwrap();
        let ids: Vec<&str> = index.related(current).iter().map(|b| b.id.as_str()).collect();
        // `wasm` shares no tag exactly ("Rust" != "rust") and another category.
        assert_eq!(vec!["cli"], ids);
        Ok(())
    }

    #[test]
    fn test_from_markdown_strips_frontmatter() {
        let post = BlogPost::from_markdown(
            "---\ntitle: Why Rust\ndate: 2024-03-05\ntags: [rust]\n---\n\n# Ownership\n\nBody.\n",
        );
        assert_eq!("# Ownership\n\nBody.", post.body);
        let frontmatter = post.frontmatter.unwrap();
        assert_eq!(Some(String::from("Why Rust")), frontmatter.title);
        assert_eq!(vec!["rust"], frontmatter.tags);
    }

    #[test]
    fn test_from_markdown_without_frontmatter() {
        let post = BlogPost::from_markdown("\n# Title\n\ntext --- more\n");
        assert_eq!(None, post.frontmatter);
        assert_eq!("# Title\n\ntext --- more", post.body);
    }

    #[test]
    fn test_from_markdown_unclosed_fence_keeps_text() {
        let post = BlogPost::from_markdown("---\ntitle: x\nbody");
        assert_eq!(None, post.frontmatter);
        assert_eq!("---\ntitle: x\nbody", post.body);
    }

    #[test]
    fn test_from_markdown_bad_yaml_still_strips() {
        let post = BlogPost::from_markdown("---\n: : :\n  - [\n---\nBody");
        assert_eq!(None, post.frontmatter);
        assert_eq!("Body", post.body);
    }

    #[test]
    fn test_to_html() {
        let post = BlogPost::from_markdown("---\ntitle: x\n---\n# Hi");
        assert_eq!("<h1 id=\"hi\">Hi</h1>\n", post.to_html());

        let ids: Vec<_> = post.headings().into_iter().map(|h| h.id).collect();
        assert_eq!(vec!["hi"], ids);
    }

    #[test]
    fn test_format_date() {
        assert_eq!("March 5, 2024", format_date("2024-03-05"));
        assert_eq!("December 31, 2023", format_date("2023-12-31T08:00:00+02:00"));
        assert_eq!("someday", format_date("someday"));
    }
}
