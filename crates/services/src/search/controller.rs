use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;

use crate::schedule::{Debouncer, Scheduler};

use super::engine::SearchResult;
use super::index::SharedIndex;

/// Idle time before a typed query is searched.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Latest published search outcome.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResult>,
}

/// Turns keystrokes into debounced searches and publishes the results.
#[derive(Clone)]
pub struct SearchController {
    index: SharedIndex,
    debouncer: Debouncer,
    state: Arc<watch::Sender<SearchState>>,
    latest_input: Arc<AtomicU64>,
    executed: Arc<AtomicU64>,
}

impl SearchController {
    #[must_use]
    pub fn new(index: SharedIndex, scheduler: Scheduler) -> Self {
        Self::with_delay(index, scheduler, SEARCH_DEBOUNCE)
    }

    #[must_use]
    pub fn with_delay(index: SharedIndex, scheduler: Scheduler, delay: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            index,
            debouncer: Debouncer::new(scheduler, delay),
            state: Arc::new(state),
            latest_input: Arc::new(AtomicU64::new(0)),
            executed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Handle a new value of the search box.
    ///
    /// Blank input clears the results at once and drops any pending search.
    /// A search that already started publishes only if no newer input
    /// arrived meanwhile.
    pub fn input(&self, query: &str) {
        let query = query.to_string();
        let seq = self.latest_input.fetch_add(1, Ordering::SeqCst) + 1;

        if query.trim().is_empty() {
            self.debouncer.cancel();
            self.state.send_replace(SearchState {
                query,
                results: Vec::new(),
            });
            return;
        }

        tracing::debug!(query = %query, "search scheduled");
        let index = self.index.clone();
        let state = Arc::clone(&self.state);
        let executed = Arc::clone(&self.executed);
        let latest_input = Arc::clone(&self.latest_input);
        self.debouncer.call(async move {
            let results = index.search(&query);
            executed.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(query = %query, hits = results.len(), "search executed");
            if !publish_if_latest(&state, &latest_input, seq, SearchState { query, results }) {
                tracing::debug!(seq, "stale search results dropped");
            }
        });
    }

    /// Run `query` now, bypassing the debounce window.
    pub fn search_now(&self, query: &str) -> SearchState {
        self.latest_input.fetch_add(1, Ordering::SeqCst);
        self.debouncer.cancel();
        let results = self.index.search(query);
        self.executed.fetch_add(1, Ordering::Relaxed);
        let state = SearchState {
            query: query.to_string(),
            results,
        };
        self.state.send_replace(state.clone());
        state
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn current(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Number of searches actually run since construction.
    #[must_use]
    pub fn executed_searches(&self) -> u64 {
        self.executed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn index(&self) -> &SharedIndex {
        &self.index
    }
}

/// Publish `next` only while `seq` is still the latest input. The check runs
/// under the channel lock, so a clear sent for a newer input is never
/// overwritten by older results.
fn publish_if_latest(
    state: &watch::Sender<SearchState>,
    latest_input: &AtomicU64,
    seq: u64,
    next: SearchState,
) -> bool {
    state.send_if_modified(|current| {
        if latest_input.load(Ordering::SeqCst) != seq {
            return false;
        }
        *current = next;
        true
    })
}
