//! Browser state: where we are in the hierarchy and what the active list holds.

use notehub_core::api::models::Note;
use notehub_core::api::nodes::Listing;
use notehub_core::hierarchy::{Cursor, NodeId};

/// Contents of the single active list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState {
    #[default]
    Loading,
    Loaded(Listing),
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    pub cursor: Cursor,
    pub list: ListState,
    /// Highlighted row index.
    pub selected: usize,
    /// Row to highlight once the pending list arrives (by id).
    pub retained: Option<NodeId>,
    /// Labels of the ancestors drilled through, top-down.
    pub trail: Vec<String>,
}

impl BrowserState {
    /// Back to the top-level streams list.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn row_count(&self) -> usize {
        match &self.list {
            ListState::Loaded(listing) => listing.len(),
            ListState::Loading | ListState::Failed => 0,
        }
    }

    /// `(id, label)` of the highlighted row.
    pub fn selected_entry(&self) -> Option<(NodeId, String)> {
        match &self.list {
            ListState::Loaded(listing) => listing.entries().into_iter().nth(self.selected),
            ListState::Loading | ListState::Failed => None,
        }
    }

    pub fn selected_note(&self) -> Option<&Note> {
        match &self.list {
            ListState::Loaded(Listing::Notes(notes)) => notes.get(self.selected),
            _ => None,
        }
    }

    pub fn select_next(&mut self) {
        let count = self.row_count();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.row_count().saturating_sub(1);
    }

    /// Stores a freshly fetched list, restoring the retained highlight if present.
    pub fn apply_listing(&mut self, listing: Listing) {
        let retained = self.retained.take();
        let position = retained.and_then(|id| {
            listing
                .entries()
                .iter()
                .position(|(entry_id, _)| *entry_id == id)
        });
        self.selected = match position {
            Some(index) => index,
            None => self.selected.min(listing.len().saturating_sub(1)),
        };
        self.list = ListState::Loaded(listing);
    }
}

#[cfg(test)]
mod tests {
    use notehub_core::api::models::Stream;

    use super::*;

    fn streams(ids: &[i64]) -> Listing {
        Listing::Streams(
            ids.iter()
                .map(|id| Stream {
                    id: *id,
                    name: format!("Stream {id}"),
                })
                .collect(),
        )
    }

    #[test]
    fn test_retained_id_is_highlighted() {
        let mut browser = BrowserState {
            retained: Some(NodeId::Numeric(30)),
            ..BrowserState::default()
        };
        browser.apply_listing(streams(&[10, 20, 30]));
        assert_eq!(browser.selected, 2);
        assert_eq!(browser.retained, None);
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let mut browser = BrowserState {
            selected: 2,
            ..BrowserState::default()
        };
        browser.apply_listing(streams(&[10, 20]));
        assert_eq!(browser.selected, 1);

        browser.apply_listing(streams(&[]));
        assert_eq!(browser.selected, 0);
    }

    #[test]
    fn test_movement_stays_in_bounds() {
        let mut browser = BrowserState::default();
        browser.apply_listing(streams(&[1, 2]));
        browser.select_next();
        browser.select_next();
        assert_eq!(browser.selected, 1);
        browser.select_prev();
        browser.select_prev();
        assert_eq!(browser.selected, 0);
        browser.select_last();
        assert_eq!(
            browser.selected_entry(),
            Some((NodeId::Numeric(2), "Stream 2".to_string()))
        );
    }
}
