use crate::column::ColumnId;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Single-column sort.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sort {
    pub column: ColumnId,
    pub direction: SortDirection,
}

impl Sort {
    pub fn ascending(column: impl Into<ColumnId>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: impl Into<ColumnId>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Next sort state when the user toggles `column`.
///
/// Cycles unsorted -> ascending -> descending -> unsorted. Toggling a different column than the
/// one currently sorted starts over at ascending.
pub fn next_toggle(current: Option<&Sort>, column: &ColumnId) -> Option<Sort> {
    match current {
        Some(s) if s.column == *column => match s.direction {
            SortDirection::Ascending => Some(Sort::descending(column.clone())),
            SortDirection::Descending => None,
        },
        _ => Some(Sort::ascending(column.clone())),
    }
}
