// Selection model for the batch view: toggles, select-all and range selection

use std::collections::HashSet;

use super::types::BatchRow;
use crate::content::ContentStatus;

/// Selected ids over an ordered row list.
///
/// Every selected id belongs to a row in `rows`; `set_rows` drops ids whose
/// row disappeared.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    rows: Vec<BatchRow>,
    selected: HashSet<String>,
    last_selected_index: Option<usize>,
}

impl SelectionSet {
    pub fn new(rows: Vec<BatchRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Replace the row list after a refresh
    pub fn set_rows(&mut self, rows: Vec<BatchRow>) {
        let live: HashSet<&str> = rows.iter().map(|row| row.id.as_str()).collect();
        self.selected.retain(|id| live.contains(id.as_str()));
        if self.last_selected_index.is_some_and(|index| index >= rows.len()) {
            self.last_selected_index = None;
        }
        self.rows = rows;
    }

    pub fn rows(&self) -> &[BatchRow] {
        &self.rows
    }

    /// Selected ids in row order
    pub fn selected_ids(&self) -> Vec<String> {
        self.selected_where(|_| true)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn last_selected_index(&self) -> Option<usize> {
        self.last_selected_index
    }

    /// Select every row, or clear if every row is already selected
    pub fn select_all(&mut self) {
        let all_selected = self.rows.iter().all(|row| self.selected.contains(&row.id));
        if all_selected {
            self.selected.clear();
        } else {
            self.selected = self.rows.iter().map(|row| row.id.clone()).collect();
        }
    }

    /// Toggle one row, or with `extend_range` add every row between the last
    /// clicked index and `index` inclusive. Range mode never deselects.
    pub fn select_row(&mut self, id: &str, index: usize, extend_range: bool) {
        match self.last_selected_index {
            Some(previous) if extend_range && !self.rows.is_empty() => {
                let last = self.rows.len() - 1;
                let start = previous.min(index).min(last);
                let end = previous.max(index).min(last);
                for row in &self.rows[start..=end] {
                    self.selected.insert(row.id.clone());
                }
            }
            _ => {
                if !self.selected.remove(id) && self.rows.iter().any(|row| row.id == id) {
                    self.selected.insert(id.to_string());
                }
            }
        }
        self.last_selected_index = Some(index);
    }

    /// Empty the selection; the last clicked index is kept
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected rows that can still be published (draft or in review)
    pub fn selected_for_publish(&self) -> Vec<String> {
        self.selected_where(|row| {
            matches!(row.status, ContentStatus::Draft | ContentStatus::InReview)
        })
    }

    pub fn selected_for_archive(&self) -> Vec<String> {
        self.selected_where(|row| row.status == ContentStatus::Published)
    }

    fn selected_where(&self, predicate: impl Fn(&BatchRow) -> bool) -> Vec<String> {
        self.rows
            .iter()
            .filter(|row| self.selected.contains(&row.id) && predicate(row))
            .map(|row| row.id.clone())
            .collect()
    }
}
