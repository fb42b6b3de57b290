use std::fmt;

use serde::Serialize;
use tutor_core::model::LessonId;

use super::index::SearchIndex;
use super::matching::{contains_ignore_case, find_ignore_case};

/// Maximum number of results returned for one query.
pub const MAX_RESULTS: usize = 10;

const TITLE_SCORE: u32 = 100;
const HEADING_BASE_SCORE: u32 = 80;
const HEADING_LEVEL_PENALTY: u32 = 5;
const CONTENT_SCORE: u32 = 50;
const SNIPPET_BEFORE: usize = 50;
const SNIPPET_AFTER: usize = 100;
const ELLIPSIS: &str = "...";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Title,
    Heading,
    Content,
}

impl MatchKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Title => "title",
            MatchKind::Heading => "heading",
            MatchKind::Content => "content",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub lesson: LessonId,
    pub lesson_title: String,
    pub kind: MatchKind,
    pub heading: String,
    pub anchor: String,
    pub snippet: String,
    pub score: u32,
}

/// Rank lessons, headings and section bodies containing `query`.
///
/// Matching is case-insensitive literal containment. Results are ordered by
/// descending score, ties in lesson then section order, and capped at
/// `MAX_RESULTS`.
#[must_use]
pub fn search(query: &str, index: &SearchIndex) -> Vec<SearchResult> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for entry in index.entries() {
        if contains_ignore_case(&entry.title, query) {
            results.push(SearchResult {
                lesson: entry.lesson,
                lesson_title: entry.title.clone(),
                kind: MatchKind::Title,
                heading: String::new(),
                anchor: String::new(),
                snippet: entry.title.clone(),
                score: TITLE_SCORE,
            });
        }

        for section in &entry.sections {
            let (kind, snippet, score) = if contains_ignore_case(section.heading(), query) {
                (
                    MatchKind::Heading,
                    section.heading().to_string(),
                    heading_score(section.level()),
                )
            } else if let Some(found) = find_ignore_case(section.body(), query) {
                (
                    MatchKind::Content,
                    snippet_around(section.body(), found.start, found.end),
                    CONTENT_SCORE,
                )
            } else {
                continue;
            };

            results.push(SearchResult {
                lesson: entry.lesson,
                lesson_title: entry.title.clone(),
                kind,
                heading: section.heading().to_string(),
                anchor: section.anchor(),
                snippet,
                score,
            });
        }
    }

    // `sort_by` is stable, so equal scores keep encounter order.
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(MAX_RESULTS);
    results
}

fn heading_score(level: u8) -> u32 {
    HEADING_BASE_SCORE.saturating_sub(HEADING_LEVEL_PENALTY * u32::from(level))
}

/// Body text from 50 chars before the match to 100 chars after its end.
fn snippet_around(body: &str, match_start: usize, match_end: usize) -> String {
    let chars: Vec<char> = body.chars().collect();
    let start = match_start.saturating_sub(SNIPPET_BEFORE);
    let end = (match_end + SNIPPET_AFTER).min(chars.len());

    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}
