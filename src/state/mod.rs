use serde::Serialize;

use crate::dataset::Mode;
use crate::engine::{FilterState, Outcome, SortKey};

pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub key: SortKey,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Accuracy,
            ascending: false,
        }
    }
}

/// Everything a view needs besides the data. Transitions consume the state
/// and return the next one; nothing is mutated in place.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewState {
    pub mode: Mode,
    pub filters: FilterState,
    pub sort: SortState,
    pub page: usize,
    pub page_size: usize,
    pub selected: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: Mode::NoSearch,
            filters: FilterState::default(),
            sort: SortState::default(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            selected: 0,
        }
    }
}

impl ViewState {
    fn reset_position(self) -> Self {
        Self {
            page: 0,
            selected: 0,
            ..self
        }
    }

    pub fn with_mode(self, mode: Mode) -> Self {
        Self { mode, ..self }.reset_position()
    }

    pub fn with_filters(self, filters: FilterState) -> Self {
        Self { filters, ..self }.reset_position()
    }

    pub fn with_mode_filter(self, mode: Option<Mode>) -> Self {
        let filters = FilterState {
            mode,
            ..self.filters.clone()
        };
        self.with_filters(filters)
    }

    pub fn with_model_filter(self, model: Option<String>) -> Self {
        let filters = FilterState {
            model,
            ..self.filters.clone()
        };
        self.with_filters(filters)
    }

    pub fn with_difficulty_filter(self, difficulty: Option<u8>) -> Self {
        let filters = FilterState {
            difficulty,
            ..self.filters.clone()
        };
        self.with_filters(filters)
    }

    pub fn with_result_filter(self, result: Option<Outcome>) -> Self {
        let filters = FilterState {
            result,
            ..self.filters.clone()
        };
        self.with_filters(filters)
    }

    /// Re-selecting the active column flips direction; a new column starts descending.
    pub fn with_sort_column(self, key: SortKey) -> Self {
        let sort = if self.sort.key == key {
            SortState {
                key,
                ascending: !self.sort.ascending,
            }
        } else {
            SortState {
                key,
                ascending: false,
            }
        };
        Self { sort, ..self }
    }

    pub fn with_page(self, page: usize) -> Self {
        Self { page, ..self }
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        Self {
            page_size,
            page: 0,
            ..self
        }
    }

    pub fn select(self, index: usize) -> Self {
        Self {
            selected: index,
            ..self
        }
    }

    pub fn select_next(self, len: usize) -> Self {
        let last = len.saturating_sub(1);
        let selected = (self.selected + 1).min(last);
        Self { selected, ..self }
    }

    pub fn select_prev(self) -> Self {
        let selected = self.selected.saturating_sub(1);
        Self { selected, ..self }
    }
}
