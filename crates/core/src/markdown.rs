//! Lesson markdown sectioning.
//!
//! Lessons are split into sections at heading lines so search can point at
//! the closest heading. Fenced code blocks are opaque: shell comments such as
//! `# 1. Create a new directory` inside a fence are body text, not headings.

use std::sync::LazyLock;

use regex::Regex;

const FENCE: &str = "```";

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    // Static pattern; a failure here is a programming error caught by tests.
    Regex::new(r"^(#{1,6})\s+(.+)$").expect("heading pattern should compile")
});

static AUTOLINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<((?:https?|ftp|mailto):[^>\s]*)>").expect("autolink pattern should compile")
});

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!?\[([^\]]*)\](?:\([^)]*\)|\[[^\]]*\])").expect("link pattern should compile")
});

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</?[A-Za-z][^>]*>").expect("tag pattern should compile")
});

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);")
        .expect("entity pattern should compile")
});

/// A heading-delimited slice of a lesson.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    heading: String,
    level: u8,
    body: String,
}

impl Section {
    #[must_use]
    pub fn new(heading: impl Into<String>, level: u8, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            level,
            body: body.into(),
        }
    }

    /// Heading text, empty for content that precedes the first heading.
    #[must_use]
    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// 1 to 6 for headed sections, 0 for leading content.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Anchor id of the heading as rendered in the lesson.
    #[must_use]
    pub fn anchor(&self) -> String {
        heading_anchor(&self.heading)
    }
}

struct SectionBuilder {
    heading: String,
    level: u8,
    body: String,
}

impl SectionBuilder {
    fn leading() -> Self {
        Self {
            heading: String::new(),
            level: 0,
            body: String::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        self.body.push_str(line);
        self.body.push(' ');
    }

    fn finish(self, out: &mut Vec<Section>) {
        let body = self.body.trim();
        if body.is_empty() {
            return;
        }
        out.push(Section {
            heading: self.heading,
            level: self.level,
            body: body.to_string(),
        });
    }
}

/// Split raw lesson markdown into sections.
///
/// Sections whose body is blank are dropped, including the level-0 leading
/// section of a file that starts with a heading.
#[must_use]
pub fn parse_sections(markdown: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = SectionBuilder::leading();
    let mut in_fence = false;

    for raw_line in markdown.split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

        if line.trim().starts_with(FENCE) {
            in_fence = !in_fence;
            current.push_line(line);
            continue;
        }

        if !in_fence {
            if let Some((level, heading)) = match_heading(line) {
                let previous = std::mem::replace(
                    &mut current,
                    SectionBuilder {
                        heading,
                        level,
                        body: String::new(),
                    },
                );
                previous.finish(&mut sections);
                continue;
            }
        }

        current.push_line(line);
    }

    current.finish(&mut sections);
    sections
}

fn match_heading(line: &str) -> Option<(u8, String)> {
    let caps = HEADING.captures(line)?;
    let level = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
    let text = caps.get(2)?.as_str().trim();
    Some((level, text.to_string()))
}

/// Anchor id for a heading, given either its text or its full source line.
///
/// Only the first line counts, so a setext heading's underline is ignored.
/// Inline markup is reduced to the text a reader sees before slugging: links
/// and images keep their label, autolinks keep their target, and HTML tags
/// and character entities are dropped. The lesson renderer derives heading
/// ids through this function too, so search anchors always resolve.
#[must_use]
pub fn heading_anchor(source: &str) -> String {
    let line = source.lines().next().unwrap_or_default().trim();
    let text = match_heading(line).map_or_else(|| line.to_string(), |(_, text)| text);
    slugify(&strip_inline_markup(&text))
}

fn strip_inline_markup(text: &str) -> String {
    let text = AUTOLINK.replace_all(text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = HTML_TAG.replace_all(&text, "");
    ENTITY.replace_all(&text, "").into_owned()
}

/// Anchor slug for a heading.
///
/// Lowercases, trims, drops everything but word characters, whitespace and
/// hyphens, turns whitespace/underscore runs into one hyphen and strips
/// hyphens at both ends.
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for ch in lowered.trim().chars() {
        if ch.is_whitespace() || ch == '_' {
            pending_separator = true;
        } else if ch.is_alphanumeric() || ch == '-' {
            if pending_separator {
                slug.push('-');
                pending_separator = false;
            }
            slug.push(ch);
        }
    }

    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_inside_fence_is_body_text() {
        let sections = parse_sections("# Title\n```\n# not a heading\n```\nbody");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading(), "Title");
        assert_eq!(sections[0].level(), 1);
        assert!(sections[0].body().contains("# not a heading"));
        assert!(sections[0].body().ends_with("body"));
    }

    #[test]
    fn leading_content_forms_level_zero_section() {
        let sections = parse_sections("Intro text\n\n## Setup\nInstall git");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading(), "");
        assert_eq!(sections[0].level(), 0);
        assert_eq!(sections[0].body(), "Intro text");
        assert_eq!(sections[1].heading(), "Setup");
        assert_eq!(sections[1].level(), 2);
        assert_eq!(sections[1].body(), "Install git");
    }

    #[test]
    fn sections_without_body_are_dropped() {
        let sections = parse_sections("# Lesson\n## Empty\n\n## Filled\ntext\n");
        let headings: Vec<_> = sections.iter().map(Section::heading).collect();
        assert_eq!(headings, vec!["Filled"]);
    }

    #[test]
    fn body_lines_are_space_joined() {
        let sections = parse_sections("### Staging\nfirst line\r\nsecond line");
        assert_eq!(sections[0].level(), 3);
        assert_eq!(sections[0].body(), "first line second line");
    }

    #[test]
    fn heading_requires_space_and_at_most_six_hashes() {
        let sections = parse_sections("#hashtag\n####### seven\n###### Six\ntext");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].level(), 0);
        assert_eq!(sections[0].body(), "#hashtag ####### seven");
        assert_eq!(sections[1].heading(), "Six");
        assert_eq!(sections[1].level(), 6);
    }

    #[test]
    fn unterminated_fence_swallows_rest_of_file() {
        let sections = parse_sections("# A\n```bash\n# step\n## also code\n");
        assert_eq!(sections.len(), 1);
        assert!(sections[0].body().contains("## also code"));
    }

    #[test]
    fn slugify_matches_heading_ids() {
        assert_eq!(slugify("Basics of Git"), "basics-of-git");
        assert_eq!(slugify("  What is `HEAD`?  "), "what-is-head");
        assert_eq!(slugify("snake_case  and   spaces"), "snake-case-and-spaces");
        assert_eq!(slugify("Fetch & Pull"), "fetch-pull");
        assert_eq!(slugify("-- edge --"), "edge");
        assert_eq!(slugify("pre-commit hooks"), "pre-commit-hooks");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn heading_anchor_reads_visible_text() {
        assert_eq!(
            heading_anchor("Read the [Pro Git](https://git-scm.com/book) book"),
            "read-the-pro-git-book"
        );
        assert_eq!(heading_anchor("## Use <kbd>Ctrl</kbd> keys"), "use-ctrl-keys");
        assert_eq!(heading_anchor("![logo](git.png) Logo"), "logo-logo");
        assert_eq!(heading_anchor("Docs at <https://git-scm.com>"), "docs-at-httpsgit-scmcom");
        assert_eq!(heading_anchor("Tom &amp; Jerry"), "tom-jerry");
        assert_eq!(heading_anchor("Setext title\n============"), "setext-title");
    }

    #[test]
    fn section_anchor_ignores_inline_markup() {
        let sections = parse_sections("## See [the book][pro] first\ntext");
        assert_eq!(sections[0].anchor(), "see-the-book-first");
    }
}
