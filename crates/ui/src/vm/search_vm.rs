use services::search::{HighlightSpan, SearchResult, highlight};

/// Keys the open search panel reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchKey {
    Up,
    Down,
    Enter,
    Escape,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelCommand {
    None,
    Activate(SearchResult),
    Close,
}

/// One row of the results list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRowVm {
    pub lesson_title: String,
    pub kind_label: &'static str,
    pub heading: Vec<HighlightSpan>,
    pub snippet: Vec<HighlightSpan>,
    pub selected: bool,
}

/// Result list with a keyboard-driven highlighted row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchPanelVm {
    query: String,
    results: Vec<SearchResult>,
    selected: usize,
}

impl SearchPanelVm {
    /// Replace the results; the highlight returns to the first row.
    pub fn set_results(&mut self, query: &str, results: Vec<SearchResult>) {
        self.query = query.to_string();
        self.results = results;
        self.selected = 0;
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        if index < self.results.len() {
            self.selected = index;
        }
    }

    pub fn handle_key(&mut self, key: SearchKey) -> PanelCommand {
        match key {
            SearchKey::Up => {
                self.selected = self.selected.saturating_sub(1);
                PanelCommand::None
            }
            SearchKey::Down => {
                if self.selected + 1 < self.results.len() {
                    self.selected += 1;
                }
                PanelCommand::None
            }
            SearchKey::Enter => self
                .results
                .get(self.selected)
                .cloned()
                .map_or(PanelCommand::None, PanelCommand::Activate),
            SearchKey::Escape => PanelCommand::Close,
        }
    }

    #[must_use]
    pub fn rows(&self) -> Vec<SearchRowVm> {
        self.results
            .iter()
            .enumerate()
            .map(|(index, result)| SearchRowVm {
                lesson_title: result.lesson_title.clone(),
                kind_label: result.kind.as_str(),
                heading: if result.heading.is_empty() {
                    Vec::new()
                } else {
                    highlight(&result.heading, &self.query)
                },
                snippet: highlight(&result.snippet, &self.query),
                selected: index == self.selected,
            })
            .collect()
    }

    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.results.is_empty() {
            return None;
        }
        if self.query.trim().is_empty() {
            Some("Type to search all lessons.")
        } else {
            Some("No results found.")
        }
    }
}

/// `Ctrl+K` or `Cmd+K`.
#[must_use]
pub fn is_open_shortcut(key: &str, ctrl: bool, meta: bool) -> bool {
    (ctrl || meta) && key.eq_ignore_ascii_case("k")
}
