use chapview_core::api::SearchResult;

use crate::common::{ListCursor, Load};

/// Search selection page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchesState {
    pub list: Load<Vec<SearchResult>>,
    pub cursor: ListCursor,
}

impl SearchesState {
    pub fn rows(&self) -> &[SearchResult] {
        self.list.loaded().map_or(&[], Vec::as_slice)
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.cursor.selected(self.rows().len())
    }

    pub fn highlighted(&self) -> Option<&SearchResult> {
        self.highlighted_index().map(|i| &self.rows()[i])
    }
}
