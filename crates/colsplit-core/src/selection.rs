//! Column selection state with a live search filter.
//!
//! Selection and filtering are independent: the filter only decides which
//! columns are visible, and therefore which columns the bulk
//! select/deselect operations touch. Hidden columns keep their checked state.

use std::collections::BTreeSet;

use colsplit_model::{Dataset, sort_columns};

use crate::error::{Result, SelectionError};
use crate::projection::project;

/// Whether a column name matches the search text, ignoring case. Empty
/// search text matches every column.
pub fn matches_search(text: &str, filter: &str) -> bool {
    filter.is_empty() || text.to_lowercase().contains(&filter.to_lowercase())
}

/// Checked columns plus the search filter, for one loaded file.
///
/// Built fresh for every load; the column list never changes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    /// Working column list in canonical order.
    columns: Vec<String>,
    selected: BTreeSet<String>,
    /// Lowercased search text.
    filter: String,
}

impl ColumnSelection {
    /// Start with nothing selected and an empty filter.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: sort_columns(columns),
            selected: BTreeSet::new(),
            filter: String::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Replace the search text. Matching is case-insensitive.
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.to_lowercase();
    }

    pub fn is_visible(&self, column: &str) -> bool {
        matches_search(column, &self.filter)
    }

    /// Columns matching the current filter, in canonical order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|column| self.is_visible(column))
    }

    /// Check every visible column. Returns how many columns were affected.
    pub fn select_all_visible(&mut self) -> usize {
        let visible: Vec<String> = self.visible_columns().map(str::to_string).collect();
        let count = visible.len();
        self.selected.extend(visible);
        tracing::debug!(count, filter = %self.filter, "selected visible columns");
        count
    }

    /// Uncheck every visible column. Returns how many columns were affected.
    pub fn deselect_all_visible(&mut self) -> usize {
        let visible: Vec<String> = self.visible_columns().map(str::to_string).collect();
        for column in &visible {
            self.selected.remove(column);
        }
        tracing::debug!(count = visible.len(), filter = %self.filter, "deselected visible columns");
        visible.len()
    }

    /// Flip one column regardless of visibility. Returns the new state.
    pub fn toggle(&mut self, column: &str) -> Result<bool> {
        self.ensure_known(column)?;
        if self.selected.remove(column) {
            Ok(false)
        } else {
            self.selected.insert(column.to_string());
            Ok(true)
        }
    }

    pub fn set_selected(&mut self, column: &str, selected: bool) -> Result<()> {
        self.ensure_known(column)?;
        if selected {
            self.selected.insert(column.to_string());
        } else {
            self.selected.remove(column);
        }
        Ok(())
    }

    /// Look `name` up in the column list: an exact match first, then a column
    /// that equals it once surrounding whitespace is ignored on both sides.
    pub fn find_column(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|column| *column == name)
            .or_else(|| {
                let trimmed = name.trim();
                self.columns.iter().find(|column| column.trim() == trimmed)
            })
            .map(String::as_str)
    }

    pub fn is_selected(&self, column: &str) -> bool {
        self.selected.contains(column)
    }

    /// Selected columns in canonical order.
    pub fn selected_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|column| self.selected.contains(column.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Project `dataset` onto the current selection.
    pub fn project(&self, dataset: &Dataset) -> Dataset {
        project(dataset, &self.selected_columns())
    }

    fn ensure_known(&self, column: &str) -> Result<()> {
        if self.columns.iter().any(|known| known == column) {
            Ok(())
        } else {
            Err(SelectionError::UnknownColumn(column.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> ColumnSelection {
        ColumnSelection::new(["user_id", "Email", "UserName", "created"])
    }

    #[test]
    fn search_ignores_case() {
        assert!(matches_search("customer_email", ""));
        assert!(matches_search("customer_email", "mail"));
        assert!(matches_search("Customer_Email", "EMAIL"));
        assert!(!matches_search("customer_email", "phone"));
    }

    #[test]
    fn find_column_tolerates_padding() {
        let state = ColumnSelection::new(["id", " name", "name "]);
        assert_eq!(state.find_column(" name"), Some(" name"));
        assert_eq!(state.find_column("name "), Some("name "));
        assert_eq!(state.find_column("id "), Some("id"));
        assert_eq!(state.find_column("email"), None);
    }

    #[test]
    fn starts_empty_in_canonical_order() {
        let state = selection();
        assert_eq!(state.columns(), ["created", "Email", "user_id", "UserName"]);
        assert!(state.is_empty());
        assert_eq!(state.filter(), "");
        assert_eq!(state.visible_columns().count(), 4);
    }

    #[test]
    fn filter_is_lowercased_and_case_insensitive() {
        let mut state = selection();
        state.set_filter("USER");
        assert_eq!(state.filter(), "user");
        let visible: Vec<&str> = state.visible_columns().collect();
        assert_eq!(visible, vec!["user_id", "UserName"]);
    }

    #[test]
    fn select_all_only_touches_visible() {
        let mut state = selection();
        state.set_filter("user");
        assert_eq!(state.select_all_visible(), 2);
        state.set_filter("");
        assert_eq!(state.selected_columns(), vec!["user_id", "UserName"]);
    }

    #[test]
    fn hidden_columns_keep_their_state() {
        let mut state = selection();
        state.select_all_visible();
        state.set_filter("mail");
        assert_eq!(state.deselect_all_visible(), 1);
        state.set_filter("");
        assert_eq!(
            state.selected_columns(),
            vec!["created", "user_id", "UserName"]
        );
    }

    #[test]
    fn toggle_ignores_visibility() {
        let mut state = selection();
        state.set_filter("zzz");
        assert_eq!(state.toggle("Email"), Ok(true));
        assert!(state.is_selected("Email"));
        assert_eq!(state.toggle("Email"), Ok(false));
        assert!(!state.is_selected("Email"));
    }

    #[test]
    fn unknown_column_is_rejected() {
        let mut state = selection();
        assert_eq!(
            state.toggle("email"),
            Err(SelectionError::UnknownColumn("email".to_string()))
        );
        assert!(state.set_selected("nope", true).is_err());
        assert!(state.is_empty());
    }

    #[test]
    fn selected_columns_follow_canonical_order() {
        let mut state = selection();
        state.set_selected("UserName", true).unwrap();
        state.set_selected("created", true).unwrap();
        state.set_selected("Email", true).unwrap();
        assert_eq!(state.selected_columns(), vec!["created", "Email", "UserName"]);
        assert_eq!(state.selected_count(), 3);
    }
}
