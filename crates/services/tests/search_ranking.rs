use std::sync::Arc;

use services::search::{MatchKind, SearchIndex, SearchIndexEntry, build_index, search};
use storage::lessons::InMemoryLessonStore;
use tutor_core::model::{LessonCatalog, LessonId};

#[test]
fn title_then_h1_then_h3() {
    let index = SearchIndex::new(vec![
        SearchIndexEntry::new(LessonId::new(0), "Git Basics", "# Welcome\nStart here."),
        SearchIndexEntry::new(
            LessonId::new(1),
            "Terminology",
            "# Basics of Git\nWords first.\n\n### Basics overview\nA short tour.",
        ),
    ]);

    let results = search("basics", &index);
    let ranked: Vec<_> = results
        .iter()
        .map(|r| (r.kind, r.score, r.snippet.as_str()))
        .collect();
    assert_eq!(
        ranked,
        vec![
            (MatchKind::Title, 100, "Git Basics"),
            (MatchKind::Heading, 75, "Basics of Git"),
            (MatchKind::Heading, 65, "Basics overview"),
        ]
    );
    assert_eq!(results[0].anchor, "");
    assert_eq!(results[1].anchor, "basics-of-git");
    assert_eq!(results[2].anchor, "basics-overview");
}

#[test]
fn query_is_literal_text() {
    let index = SearchIndex::new(vec![SearchIndexEntry::new(
        LessonId::new(0),
        "Lesson",
        "# Notes\nthe axb file",
    )]);
    assert!(search("a.b", &index).is_empty());
    assert_eq!(search("AXB", &index).len(), 1);
}

#[test]
fn equal_scores_keep_lesson_then_section_order() {
    let index = SearchIndex::new(vec![
        SearchIndexEntry::new(LessonId::new(0), "One", "## A\ncommit here\n## B\ncommit there"),
        SearchIndexEntry::new(LessonId::new(1), "Two", "## C\ncommit again"),
    ]);
    let headings: Vec<_> = search("commit", &index)
        .into_iter()
        .map(|r| (r.lesson.value(), r.heading))
        .collect();
    assert_eq!(
        headings,
        vec![(0, "A".to_string()), (0, "B".to_string()), (1, "C".to_string())]
    );
}

#[test]
fn fenced_shell_comments_are_content_not_headings() {
    let md = "# Setup\n```bash\n# Initialize a repository\ngit init\n```\n";
    let index = SearchIndex::new(vec![SearchIndexEntry::new(LessonId::new(0), "Lesson", md)]);

    let results = search("initialize", &index);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind, MatchKind::Content);
    assert_eq!(results[0].heading, "Setup");
    assert_eq!(results[0].anchor, "setup");
}

#[tokio::test]
async fn index_built_from_store_skips_missing_lessons() {
    let catalog = LessonCatalog::new([
        ("Git Basics", "01-git-basics.md"),
        ("Branches", "03-branches-and-merging.md"),
    ])
    .unwrap();
    let store = Arc::new(
        InMemoryLessonStore::new().with_lesson("01-git-basics.md", "# Git Basics\nrepositories"),
    );

    let index = build_index(&catalog, store.as_ref()).await;
    assert_eq!(index.len(), 1);
    assert!(search("branches", &index).is_empty());
    assert_eq!(search("repositories", &index).len(), 1);
}
