//! Pure row-model derivation.
//!
//! Nothing here holds state: [`derive`] maps `(rows, columns, filters, sort)` to the ordered list
//! of row indices that survive filtering, and [`crate::pagination::Pagination::slice`] cuts the
//! current page out of it. [`crate::state::TableViewState`] memoizes the result.

use crate::column::Column;
use crate::filter::FilterState;
use crate::filter::includes_text;
use crate::filter::normalize_needle;
use crate::sort::Sort;
use std::collections::BTreeMap;

struct Predicate<'a, T> {
    global: String,
    searchable: Vec<&'a Column<T>>,
    column_filters: Vec<(&'a Column<T>, String)>,
}

impl<'a, T> Predicate<'a, T> {
    fn new(columns: &'a [Column<T>], filters: &FilterState, skip_column: Option<&str>) -> Self {
        let column_filters = filters
            .column_filters()
            .filter(|(id, _)| Some(id.as_str()) != skip_column)
            .filter_map(|(id, value)| {
                columns
                    .iter()
                    .find(|c| c.id() == id && c.can_filter())
                    .map(|c| (c, normalize_needle(value)))
            })
            .collect();
        Self {
            global: normalize_needle(filters.global()),
            searchable: columns.iter().filter(|c| c.can_search()).collect(),
            column_filters,
        }
    }

    /// Global search first, then the per-column filters.
    fn matches(&self, row: &T) -> bool {
        if !self.global.is_empty()
            && !self
                .searchable
                .iter()
                .any(|c| includes_text(&c.render_cell(row), &self.global))
        {
            return false;
        }
        self.column_filters
            .iter()
            .all(|(c, needle)| includes_text(&c.render_cell(row), needle))
    }
}

/// Indices into `rows` that pass the global search and every column filter, ordered by `sort`.
///
/// The sort is stable, so rows with equal keys keep their data order. A sort naming a column that
/// is missing or not sortable is ignored.
pub fn derive<T>(
    rows: &[T],
    columns: &[Column<T>],
    filters: &FilterState,
    sort: Option<&Sort>,
) -> Vec<usize> {
    let predicate = Predicate::new(columns, filters, None);
    let mut indices: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| predicate.matches(row))
        .map(|(i, _)| i)
        .collect();

    let sort_column = sort.and_then(|s| {
        columns
            .iter()
            .find(|c| *c.id() == s.column && c.can_sort())
            .map(|c| (c, s.direction))
    });
    if let Some((column, direction)) = sort_column {
        let mut keyed: Vec<_> = indices
            .into_iter()
            .map(|i| (i, column.sort_key(&rows[i])))
            .collect();
        keyed.sort_by(|(_, a), (_, b)| direction.apply(a.total_cmp(b)));
        indices = keyed.into_iter().map(|(i, _)| i).collect();
    }

    indices
}

/// Distinct cell texts of `column` with their counts, over rows that pass every filter except the
/// column's own.
pub fn faceted_unique_values<T>(
    rows: &[T],
    columns: &[Column<T>],
    filters: &FilterState,
    column: &Column<T>,
) -> BTreeMap<String, usize> {
    let predicate = Predicate::new(columns, filters, Some(column.id().as_str()));
    let mut counts = BTreeMap::new();
    for row in rows.iter().filter(|row| predicate.matches(row)) {
        *counts.entry(column.render_cell(row)).or_insert(0) += 1;
    }
    counts
}
