use std::time::Duration;

use services::schedule::Scheduler;
use services::search::{SEARCH_DEBOUNCE, SearchController, SearchIndex, SearchIndexEntry, SharedIndex};
use tutor_core::model::LessonId;

fn controller() -> SearchController {
    let index = SharedIndex::new();
    index.publish(SearchIndex::new(vec![SearchIndexEntry::new(
        LessonId::new(0),
        "Git Basics",
        "# Getting started\nInstall git first.",
    )]));
    SearchController::new(index, Scheduler::current())
}

#[tokio::test(start_paused = true)]
async fn rapid_typing_runs_one_search_for_last_query() {
    let search = controller();
    let mut updates = search.subscribe();

    for query in ["g", "gi", "git"] {
        search.input(query);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(search.executed_searches(), 0);

    tokio::time::sleep(SEARCH_DEBOUNCE).await;
    assert_eq!(search.executed_searches(), 1);

    updates.changed().await.unwrap();
    let state = updates.borrow_and_update().clone();
    assert_eq!(state.query, "git");
    assert!(!state.results.is_empty());
}

#[tokio::test(start_paused = true)]
async fn blank_query_clears_immediately_and_cancels_pending() {
    let search = controller();
    search.search_now("git");
    assert!(!search.current().results.is_empty());

    search.input("gi");
    search.input("   ");
    assert!(search.current().results.is_empty());

    tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;
    assert_eq!(search.executed_searches(), 1);
    assert!(search.current().results.is_empty());
}

#[tokio::test(start_paused = true)]
async fn searches_before_index_is_published_find_nothing() {
    let search = SearchController::new(SharedIndex::new(), Scheduler::current());
    search.input("git");
    tokio::time::sleep(SEARCH_DEBOUNCE + Duration::from_millis(10)).await;
    assert_eq!(search.executed_searches(), 1);
    assert!(search.current().results.is_empty());
}
