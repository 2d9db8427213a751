use ratatui::widgets::ListState;

use crate::ui::components::common::TextInputState;

/// One selectable row: a value plus the text shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem<T> {
    pub value: T,
    pub title: &'static str,
    pub description: &'static str,
}

/// Selection and filter state for a titled list of items.
///
/// The selection index always refers to the filtered view. Typing a filter
/// resets the selection to the first match.
#[derive(Debug, Clone)]
pub struct PickerState<T> {
    title: &'static str,
    items: Vec<PickerItem<T>>,
    filter: TextInputState,
    filtering: bool,
    selected: usize,
    pub list_state: ListState,
}

impl<T: Copy> PickerState<T> {
    pub fn new(title: &'static str, items: Vec<PickerItem<T>>) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            title,
            items,
            filter: TextInputState::new(),
            filtering: false,
            selected: 0,
            list_state,
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Items matching the filter, in original order.
    pub fn visible(&self) -> Vec<&PickerItem<T>> {
        let needle = self.filter.input().trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| needle.is_empty() || item.title.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_value(&self) -> Option<T> {
        self.visible().get(self.selected).map(|item| item.value)
    }

    /// Move selection to the next visible item, wrapping at the end.
    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.set_selected((self.selected + 1) % len);
    }

    /// Move selection to the previous visible item, wrapping to the end.
    pub fn select_previous(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let previous = if self.selected == 0 { len - 1 } else { self.selected - 1 };
        self.set_selected(previous);
    }

    // ----- Filtering -----

    /// Whether the filter input currently captures typed characters.
    pub fn is_filtering(&self) -> bool {
        self.filtering
    }

    pub fn filter_text(&self) -> &str {
        self.filter.input()
    }

    pub fn has_filter(&self) -> bool {
        !self.filter.is_empty()
    }

    pub fn start_filter(&mut self) {
        self.filtering = true;
    }

    /// Stop editing the filter but keep applying it.
    pub fn accept_filter(&mut self) {
        self.filtering = false;
    }

    pub fn clear_filter(&mut self) {
        self.filtering = false;
        self.filter.clear();
        self.set_selected(0);
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.insert_char(c);
        self.set_selected(0);
    }

    pub fn pop_filter_char(&mut self) {
        self.filter.backspace();
        self.set_selected(0);
    }

    fn set_selected(&mut self, index: usize) {
        self.selected = index;
        self.list_state.select(Some(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> PickerState<u8> {
        PickerState::new(
            "Numbers",
            vec![
                PickerItem { value: 1, title: "One", description: "first" },
                PickerItem { value: 2, title: "Two", description: "second" },
                PickerItem { value: 3, title: "Three", description: "third" },
            ],
        )
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = picker();
        assert_eq!(state.selected_value(), Some(1));
        state.select_previous();
        assert_eq!(state.selected_value(), Some(3));
        state.select_next();
        assert_eq!(state.selected_value(), Some(1));
    }

    #[test]
    fn filter_narrows_and_resets_selection() {
        let mut state = picker();
        state.select_next();
        state.start_filter();
        state.push_filter_char('t');
        assert_eq!(state.visible().len(), 2);
        assert_eq!(state.selected_value(), Some(2));
        state.push_filter_char('h');
        assert_eq!(state.selected_value(), Some(3));
        state.accept_filter();
        assert!(!state.is_filtering());
        assert!(state.has_filter());
        state.clear_filter();
        assert_eq!(state.visible().len(), 3);
        assert_eq!(state.selected_value(), Some(1));
    }

    #[test]
    fn no_match_has_no_selection() {
        let mut state = picker();
        state.start_filter();
        state.push_filter_char('z');
        assert!(state.visible().is_empty());
        assert_eq!(state.selected_value(), None);
        state.select_next();
        assert_eq!(state.selected_value(), None);
    }
}
