//! Full-text search over lesson markdown.

mod controller;
mod engine;
mod highlight;
mod index;
mod matching;

pub use controller::{SEARCH_DEBOUNCE, SearchController, SearchState};
pub use engine::{MAX_RESULTS, MatchKind, SearchResult, search};
pub use highlight::{HighlightSpan, highlight};
pub use index::{SearchIndex, SearchIndexEntry, SharedIndex, build_index};
pub use matching::find_ignore_case;
