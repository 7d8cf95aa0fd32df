//! Converts blog markdown to HTML, and lists a post's headings for the table
//! of contents. Every rendered heading carries an `id` built by [`slug`] from
//! its plain text, and [`headings`] reports the same ids, so contents entries
//! link straight into the rendered post.

use pulldown_cmark::{html, Event, Options, Parser, Tag};

/// A heading as it appears in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1 for `#`, up to 6.
    pub level: u32,

    /// The heading's text with inline formatting stripped.
    pub text: String,

    /// The `id` attribute of the rendered heading.
    pub id: String,
}

/// Converts `markdown` to an HTML string. Heading levels are kept as
/// written; each heading gets an `id` unless its slug is empty.
pub fn to_html(markdown: &str) -> String {
    let events = blocks(markdown).into_iter().map(|block| match block {
        Block::Event(ev) => ev,
        Block::Heading { level, inner } => Event::Html(render_heading(level, &inner).into()),
    });
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Lists the headings of `markdown` in document order. Headings inside code
/// blocks are not headings and are skipped.
pub fn headings(markdown: &str) -> Vec<Heading> {
    blocks(markdown)
        .into_iter()
        .filter_map(|block| match block {
            Block::Event(_) => None,
            Block::Heading { level, inner } => {
                let text = plain_text(&inner);
                Some(Heading {
                    level,
                    id: slug(&text),
                    text,
                })
            }
        })
        .collect()
}

/// Turns heading text into an anchor id: lowercase, drop everything but
/// ASCII letters, digits, `_`, `-` and whitespace, then replace each run of
/// whitespace with a single `-`.
pub fn slug(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut id = String::with_capacity(kept.len());
    let mut in_space = false;
    for c in kept.chars() {
        match c.is_whitespace() {
            true => in_space = true,
            false => {
                if in_space {
                    id.push('-');
                    in_space = false;
                }
                id.push(c);
            }
        }
    }
    if in_space {
        id.push('-');
    }
    id
}

/// A top-level event, or a whole heading with the events between its start
/// and end tags.
enum Block<'a> {
    Event(Event<'a>),
    Heading { level: u32, inner: Vec<Event<'a>> },
}

fn blocks(markdown: &str) -> Vec<Block<'_>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut blocks = Vec::new();
    let mut open: Option<(u32, Vec<Event>)> = None;
    for ev in Parser::new_ext(markdown, options) {
        match ev {
            Event::Start(Tag::Heading(level)) => open = Some((level, Vec::new())),
            Event::End(Tag::Heading(_)) => {
                if let Some((level, inner)) = open.take() {
                    blocks.push(Block::Heading { level, inner });
                }
            }
            ev => match &mut open {
                Some((_, inner)) => inner.push(ev),
                None => blocks.push(Block::Event(ev)),
            },
        }
    }
    blocks
}

fn render_heading(level: u32, inner: &[Event]) -> String {
    let mut body = String::new();
    html::push_html(&mut body, inner.iter().cloned());
    match slug(&plain_text(inner)) {
        id if id.is_empty() => format!("<h{0}>{1}</h{0}>\n", level, body),
        id => format!("<h{0} id=\"{1}\">{2}</h{0}>\n", level, id, body),
    }
}

/// The visible text of a heading: text and inline code, without image alt
/// text.
fn plain_text(inner: &[Event]) -> String {
    let mut text = String::new();
    let mut images = 0;
    for ev in inner {
        match ev {
            Event::Start(Tag::Image(..)) => images += 1,
            Event::End(Tag::Image(..)) => images -= 1,
            Event::Text(s) | Event::Code(s) if images == 0 => text.push_str(s),
            _ => {}
        }
    }
    text.trim().to_owned()
}
