//! Markdown rendering.
//!
//! A thin policy layer over pulldown-cmark: GFM extensions plus smart
//! punctuation, syntect-highlighted fenced code blocks, slug anchors on
//! headings below the title level, and the filename-derived title
//! injection. Rendering never fails; a code block whose highlighting
//! fails degrades to escaped plain text while the rest of the document
//! still renders.

use std::collections::HashMap;
use std::sync::LazyLock;

use pulldown_cmark::{
    CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html,
};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::IgnoreList;
use crate::util::{display_title, escape_html};

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Highlight theme for fenced code blocks.
const CODE_THEME: &str = "InspiredGitHub";

/// Markdown renderer with a fixed, compile-time wired set of transforms.
#[derive(Clone, Debug)]
pub struct Renderer {
    options: Options,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer with GFM extensions, footnotes, and smart
    /// punctuation enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_SMART_PUNCTUATION,
        }
    }

    /// Render a Markdown body to HTML.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let events: Vec<Event<'_>> = Parser::new_ext(markdown, self.options).collect();
        let events = highlight_code_blocks(events);
        let events = anchor_headings(events);

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }

    /// Render a document body, injecting a title heading derived from the
    /// file stem when the body does not open with one.
    ///
    /// The heading is skipped when the body's first heading is already a
    /// level-1 heading, or when the stem is on the ignore list.
    #[must_use]
    pub fn render_document(&self, body: &str, stem: &str, ignore: &IgnoreList) -> String {
        if self.should_inject_title(body, stem, ignore) {
            let titled = format!("# {}\n\n{body}", display_title(stem));
            self.render(&titled)
        } else {
            self.render(body)
        }
    }

    /// Title-injection policy: inject unless the stem is ignore-listed or
    /// a level-1 heading appears before the first level-2 heading.
    fn should_inject_title(&self, body: &str, stem: &str, ignore: &IgnoreList) -> bool {
        !ignore.contains(stem) && !self.has_leading_h1(body)
    }

    /// Whether a level-1 heading appears before the first level-2 heading.
    fn has_leading_h1(&self, body: &str) -> bool {
        for event in Parser::new_ext(body, self.options) {
            if let Event::Start(Tag::Heading { level, .. }) = event {
                match level {
                    HeadingLevel::H1 => return true,
                    HeadingLevel::H2 => return false,
                    _ => {}
                }
            }
        }
        false
    }
}

/// Replace fenced code blocks with highlighted HTML.
fn highlight_code_blocks(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut iter = events.into_iter();

    while let Some(event) = iter.next() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                // First token of the info string is the language tag.
                let lang = info
                    .split(|c: char| c.is_whitespace() || c == ',')
                    .next()
                    .unwrap_or("")
                    .to_owned();
                let mut source = String::new();
                for inner in iter.by_ref() {
                    match inner {
                        Event::End(TagEnd::CodeBlock) => break,
                        Event::Text(text) => source.push_str(&text),
                        _ => {}
                    }
                }
                out.push(Event::Html(render_code_block(&lang, &source).into()));
            }
            other => out.push(other),
        }
    }
    out
}

/// Highlight one fenced block, degrading to escaped plain text when the
/// language is unknown or the highlighter fails.
fn render_code_block(lang: &str, source: &str) -> String {
    let syntax = (!lang.is_empty()).then(|| SYNTAX_SET.find_syntax_by_token(lang)).flatten();

    if let (Some(syntax), Some(theme)) = (syntax, THEME_SET.themes.get(CODE_THEME)) {
        match highlighted_html_for_string(source, &SYNTAX_SET, syntax, theme) {
            Ok(highlighted) => return highlighted,
            Err(err) => {
                tracing::warn!(lang, error = %err, "Highlighting failed, rendering plain");
            }
        }
    }

    format!("<pre><code>{}</code></pre>\n", escape_html(source))
}

/// Give headings below the title level a slug anchor id. Duplicate slugs
/// get a numeric suffix so ids stay unique within a document.
fn anchor_headings(mut events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    for i in 0..events.len() {
        let Event::Start(Tag::Heading { level, id, .. }) = &events[i] else {
            continue;
        };
        if *level == HeadingLevel::H1 || id.is_some() {
            continue;
        }

        let mut text = String::new();
        for event in &events[i + 1..] {
            match event {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
        }

        let slug = unique_slug(slugify(&text), &mut seen);
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(slug.into());
        }
    }
    events
}

/// Lowercase, trim, and dash-join a heading's text.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.extend(
            word.chars()
                .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
                .flat_map(char::to_lowercase),
        );
    }
    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}

/// Deduplicate a slug by appending `-1`, `-2`, ... on repeats.
fn unique_slug(slug: String, seen: &mut HashMap<String, usize>) -> String {
    let count = seen.entry(slug.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        slug
    } else {
        format!("{slug}-{}", *count - 1)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn renderer() -> Renderer {
        Renderer::new()
    }

    #[test]
    fn test_render_basic_markdown() {
        let html = renderer().render("Hello **world**");

        assert_eq!(html, "<p>Hello <strong>world</strong></p>\n");
    }

    #[test]
    fn test_render_unknown_language_degrades_to_plain() {
        let html = renderer().render("```nosuchlang\nlet x = 1;\n```");

        assert!(html.contains("<pre><code>let x = 1;\n</code></pre>"));
    }

    #[test]
    fn test_render_known_language_highlights() {
        let html = renderer().render("```rust\nfn main() {}\n```");

        // syntect wraps highlighted output in styled spans
        assert!(html.contains("<span"));
    }

    #[test]
    fn test_render_unfenced_code_untouched() {
        let html = renderer().render("    indented code\n");

        assert!(html.contains("<pre><code>indented code\n</code></pre>"));
    }

    #[test]
    fn test_headings_get_anchor_ids() {
        let html = renderer().render("# Title\n\n## My Section\n\n## My Section\n");

        assert!(html.contains("<h2 id=\"my-section\">"));
        assert!(html.contains("<h2 id=\"my-section-1\">"));
        // the title level carries no anchor
        assert!(html.contains("<h1>Title</h1>"));
    }

    #[test]
    fn test_render_document_injects_title() {
        let html = renderer().render_document("Some body.", "my-first-post", &IgnoreList::default());

        assert!(html.contains("<h1>My First Post</h1>"));
        assert!(html.contains("<p>Some body.</p>"));
    }

    #[test]
    fn test_render_document_keeps_existing_h1() {
        let html = renderer().render_document("# Real Title\n\nBody.", "some-file", &IgnoreList::default());

        assert!(html.contains("<h1>Real Title</h1>"));
        assert!(!html.contains("Some File"));
    }

    #[test]
    fn test_render_document_injects_when_first_heading_is_h2() {
        let html = renderer().render_document("## Section\n\n# Late H1", "post", &IgnoreList::default());

        assert!(html.contains("<h1>Post</h1>"));
    }

    #[test]
    fn test_render_document_respects_ignore_list() {
        let ignore = IgnoreList::new(["index"]);
        let html = renderer().render_document("Plain body.", "index", &ignore);

        assert!(!html.contains("<h1>"));
    }

    #[test]
    fn test_smart_punctuation() {
        let html = renderer().render("\"quoted\"");

        assert!(html.contains("\u{201c}quoted\u{201d}"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Section"), "my-section");
        assert_eq!(slugify("  What's new?  "), "whats-new");
        assert_eq!(slugify(""), "section");
    }
}
