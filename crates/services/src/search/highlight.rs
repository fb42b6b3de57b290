use regex::RegexBuilder;

/// A run of text, emphasised when it matches the query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightSpan {
    pub text: String,
    pub emphasized: bool,
}

impl HighlightSpan {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            emphasized: false,
        }
    }

    fn marked(text: &str) -> Self {
        Self {
            text: text.to_string(),
            emphasized: true,
        }
    }
}

/// Split `text` at every case-insensitive occurrence of the literal `query`.
///
/// A blank query yields one plain span holding the whole text.
#[must_use]
pub fn highlight(text: &str, query: &str) -> Vec<HighlightSpan> {
    let query = query.trim();
    if query.is_empty() || text.is_empty() {
        return vec![HighlightSpan::plain(text)];
    }

    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(err) => {
            tracing::warn!(error = %err, "highlight pattern rejected");
            return vec![HighlightSpan::plain(text)];
        }
    };

    let mut spans = Vec::new();
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        if found.start() > cursor {
            spans.push(HighlightSpan::plain(&text[cursor..found.start()]));
        }
        spans.push(HighlightSpan::marked(found.as_str()));
        cursor = found.end();
    }
    if cursor < text.len() {
        spans.push(HighlightSpan::plain(&text[cursor..]));
    }
    spans
}
