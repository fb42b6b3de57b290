use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::OnceCell;

use storage::lessons::LessonStore;
use tutor_core::markdown::{Section, parse_sections};
use tutor_core::model::{LessonCatalog, LessonId};

use super::engine::{SearchResult, search};

/// One lesson as seen by search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchIndexEntry {
    pub lesson: LessonId,
    pub title: String,
    pub markdown: String,
    pub sections: Vec<Section>,
}

impl SearchIndexEntry {
    #[must_use]
    pub fn new(lesson: LessonId, title: impl Into<String>, markdown: impl Into<String>) -> Self {
        let markdown = markdown.into();
        let sections = parse_sections(&markdown);
        Self {
            lesson,
            title: title.into(),
            markdown,
            sections,
        }
    }
}

/// Entries in catalog order. Lessons that failed to load are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchIndex {
    entries: Vec<SearchIndexEntry>,
}

impl SearchIndex {
    #[must_use]
    pub fn new(entries: Vec<SearchIndexEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[SearchIndexEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.sections.len()).sum()
    }
}

/// Fetch every lesson concurrently and index the ones that load.
///
/// A failed fetch is logged and skipped; it does not cancel the others.
pub async fn build_index(catalog: &LessonCatalog, store: &dyn LessonStore) -> SearchIndex {
    let fetches = catalog.iter().map(|lesson| async move {
        match store.fetch(lesson).await {
            Ok(markdown) => Some(SearchIndexEntry::new(lesson.id(), lesson.title(), markdown)),
            Err(err) => {
                tracing::warn!(
                    lesson = %lesson.id(),
                    source = lesson.source().as_str(),
                    error = %err,
                    "lesson left out of search index"
                );
                None
            }
        }
    });

    let entries: Vec<_> = join_all(fetches).await.into_iter().flatten().collect();
    let index = SearchIndex::new(entries);
    tracing::info!(
        lessons = index.len(),
        sections = index.section_count(),
        skipped = catalog.len() - index.len(),
        "search index built"
    );
    index
}

/// Index slot shared between the builder and searchers. Empty until the
/// build publishes, and searches before that find nothing.
#[derive(Clone, Default)]
pub struct SharedIndex {
    cell: Arc<OnceCell<SearchIndex>>,
}

impl SharedIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the built index. Returns `false` if one was already published.
    pub fn publish(&self, index: SearchIndex) -> bool {
        self.cell.set(index).is_ok()
    }

    #[must_use]
    pub fn get(&self) -> Option<&SearchIndex> {
        self.cell.get()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.cell.initialized()
    }

    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        self.get()
            .map(|index| search(query, index))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::lessons::InMemoryLessonStore;

    #[tokio::test]
    async fn failed_fetches_are_skipped() {
        let catalog = LessonCatalog::new([
            ("Basics", "01.md"),
            ("Missing", "02.md"),
            ("Branches", "03.md"),
        ])
        .unwrap();
        let store = InMemoryLessonStore::new()
            .with_lesson("01.md", "# Basics\nintro text")
            .with_lesson("03.md", "# Branches\nmore text");

        let index = build_index(&catalog, &store).await;
        let lessons: Vec<_> = index.entries().iter().map(|e| e.lesson.value()).collect();
        assert_eq!(lessons, vec![0, 2]);
        assert_eq!(index.entries()[1].title, "Branches");
        assert_eq!(index.section_count(), 2);
    }

    #[test]
    fn unpublished_index_finds_nothing() {
        let shared = SharedIndex::new();
        assert!(!shared.is_ready());
        assert!(shared.search("git").is_empty());

        let entry = SearchIndexEntry::new(LessonId::new(0), "Git Basics", "# Intro\ntext");
        assert!(shared.publish(SearchIndex::new(vec![entry])));
        assert!(!shared.publish(SearchIndex::default()));
        assert_eq!(shared.search("git").len(), 1);
    }
}
