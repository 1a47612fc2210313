//! Ordered tab titles plus the selection index that tracks them.
//!
//! Tabs have no stable id: identity is position, so every structural change
//! re-resolves the selection with the rules below.

/// Index of a tracked tab after the tab at `removed_index` is erased.
///
/// Returns `None` when nothing remains or the removal index was invalid.
pub fn index_after_remove(tracked: usize, len_before: usize, removed_index: usize) -> Option<usize> {
    if len_before == 0 || removed_index >= len_before {
        return None;
    }

    let len_after = len_before - 1;
    if len_after == 0 {
        return None;
    }

    let next = if tracked > removed_index {
        tracked.saturating_sub(1)
    } else {
        tracked
    };

    Some(next.min(len_after - 1))
}

/// Index of a tracked tab after the tab at `from` is removed and reinserted
/// at `to`. The moved tab itself lands on `to`.
pub fn index_after_move(tracked: usize, from: usize, to: usize) -> usize {
    if from == to {
        tracked
    } else if tracked == from {
        to
    } else if from < tracked && tracked <= to {
        tracked - 1
    } else if to <= tracked && tracked < from {
        tracked + 1
    } else {
        tracked
    }
}

#[derive(Debug, Clone, Default)]
pub struct TabList {
    titles: Vec<String>,
    selected: Option<usize>,
}

impl TabList {
    pub fn new(titles: Vec<String>) -> Self {
        let selected = (!titles.is_empty()).then_some(0);
        Self { titles, selected }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn title(&self, index: usize) -> Option<&str> {
        self.titles.get(index).map(String::as_str)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Appends a tab. Selection is untouched unless the list was empty.
    pub fn push(&mut self, title: String) {
        self.titles.push(title);
        if self.selected.is_none() {
            self.selected = Some(self.titles.len() - 1);
        }
    }

    /// Removes the tab at `index`. The last remaining tab is never removed.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        let len_before = self.titles.len();
        if index >= len_before || len_before <= 1 {
            return None;
        }
        let title = self.titles.remove(index);
        self.selected = self
            .selected
            .and_then(|sel| index_after_remove(sel, len_before, index));
        Some(title)
    }

    pub fn rename(&mut self, index: usize, title: String) -> bool {
        match self.titles.get_mut(index) {
            Some(slot) => {
                *slot = title;
                true
            }
            None => false,
        }
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.titles.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Moves the tab at `from` so it ends up at `to`.
    pub fn move_tab(&mut self, from: usize, to: usize) -> bool {
        let len = self.titles.len();
        if from == to || from >= len || to >= len {
            return false;
        }
        let title = self.titles.remove(from);
        self.titles.insert(to, title);
        self.selected = self.selected.map(|sel| index_after_move(sel, from, to));
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strip_tabs.rs"]
mod tests;
