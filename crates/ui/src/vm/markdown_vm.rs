use pulldown_cmark::{CowStr, Event, Options, Parser, Tag};
use tutor_core::markdown::heading_anchor;

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Render lesson markdown to sanitized HTML.
///
/// Heading ids come from `heading_anchor` over each heading's source, the
/// same function search uses, so result anchors always scroll to a heading.
#[must_use]
pub fn render_lesson_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let events = Parser::new_ext(markdown, options)
        .into_offset_iter()
        .map(|(event, range)| match event {
            Event::Start(Tag::Heading {
                level,
                id: _,
                classes,
                attrs,
            }) => {
                let slug = markdown.get(range).map(heading_anchor).unwrap_or_default();
                let id = (!slug.is_empty()).then(|| CowStr::from(slug));
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                })
            }
            other => other,
        });

    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, events);
    sanitize_html(&html)
}

/// Clean rendered HTML, keeping `id` on headings.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let mut builder = ammonia::Builder::default();
    for tag in HEADING_TAGS {
        builder.add_tag_attributes(tag, &["id"]);
    }
    builder.clean(html).to_string()
}
