use crate::column::Column;
use crate::column::ColumnId;
use crate::error::Result;
use crate::filter::FilterState;
use crate::listener::ColumnOrderListener;
use crate::listener::ColumnOrderListeners;
use crate::listener::ListenerId;
use crate::order::ColumnOrder;
use crate::pagination::Pagination;
use crate::pagination::PaginationSummary;
use crate::row_model;
use crate::sort;
use crate::sort::Sort;
use std::collections::BTreeMap;
use std::fmt;

/// Construction options for [`TableViewState`].
pub struct TableOptions {
    /// Rows per page. Must be positive.
    pub initial_page_size: usize,
    /// Registered before any later [`TableViewState::subscribe`] call, in this order.
    pub on_column_order_change: Vec<ColumnOrderListener>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            initial_page_size: Pagination::DEFAULT_PAGE_SIZE,
            on_column_order_change: Vec::new(),
        }
    }
}

impl fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("initial_page_size", &self.initial_page_size)
            .field("on_column_order_change", &self.on_column_order_change.len())
            .finish()
    }
}

impl TableOptions {
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.initial_page_size = page_size;
        self
    }

    pub fn on_column_order_change(mut self, listener: impl FnMut(&[ColumnId]) + 'static) -> Self {
        self.on_column_order_change.push(Box::new(listener));
        self
    }
}

/// One cell of a visible row, in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleCell<'a> {
    pub column: &'a ColumnId,
    pub text: String,
}

/// One row of the current page.
#[derive(Clone, Debug)]
pub struct VisibleRow<'a, T> {
    /// Position of the row in the data passed to the table.
    pub index: usize,
    pub row: &'a T,
    pub cells: Vec<VisibleCell<'a>>,
}

/// View state of one table: column order, filters, sort and the pagination cursor, together with
/// the immutable columns and the rows they describe.
///
/// Every mutator that changes an input of the row model recomputes it before returning and then
/// clamps the page index, so reads never observe a stale model or an out-of-range cursor. Rejected
/// operations leave the state exactly as it was.
pub struct TableViewState<T> {
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    order: ColumnOrder,
    filters: FilterState,
    sort: Option<Sort>,
    pagination: Pagination,
    row_model: Vec<usize>,
    listeners: ColumnOrderListeners,
}

impl<T> fmt::Debug for TableViewState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableViewState")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("order", &self.order)
            .field("filters", &self.filters)
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("filtered", &self.row_model.len())
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl<T> TableViewState<T> {
    pub fn new(columns: Vec<Column<T>>, rows: Vec<T>, options: TableOptions) -> Result<Self> {
        let order = ColumnOrder::new(columns.iter().map(|c| c.id().clone()).collect())?;
        let pagination = Pagination::new(options.initial_page_size)?;

        let mut listeners = ColumnOrderListeners::default();
        for listener in options.on_column_order_change {
            listeners.subscribe(listener);
        }

        let mut state = Self {
            columns,
            rows,
            order,
            filters: FilterState::default(),
            sort: None,
            pagination,
            row_model: Vec::new(),
            listeners,
        };
        state.recompute();
        Ok(state)
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.id() == id)
    }

    pub fn column_order(&self) -> &[ColumnId] {
        self.order.as_slice()
    }

    pub(crate) fn order(&self) -> &ColumnOrder {
        &self.order
    }

    /// Columns in display order.
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column<T>> {
        self.order.iter().filter_map(|id| self.column(id.as_str()))
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn global_filter(&self) -> &str {
        self.filters.global()
    }

    pub fn column_filter_value(&self, id: &str) -> Option<&str> {
        self.filters.column(id)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    /// Number of rows that pass the current filters.
    pub fn filtered_row_count(&self) -> usize {
        self.row_model.len()
    }

    /// Filtered and sorted data indices, before pagination.
    pub fn row_model(&self) -> &[usize] {
        &self.row_model
    }

    pub fn pagination(&self) -> PaginationSummary {
        self.pagination.summary(self.row_model.len())
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&[ColumnId]) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Replaces the column order.
    ///
    /// `order` must be a permutation of the column ids, otherwise
    /// [`crate::error::TableError::InvalidOrder`] is returned and nothing changes. Returns
    /// `Ok(false)` when `order` equals the current order; listeners only run for real changes.
    pub fn set_column_order(&mut self, order: Vec<ColumnId>) -> Result<bool> {
        if order.as_slice() == self.order.as_slice() {
            return Ok(false);
        }
        if let Err(err) = self.order.replace(order) {
            tracing::debug!(error = %err, "rejected column order");
            return Err(err);
        }
        tracing::debug!(order = ?self.order.as_slice(), "column order changed");
        self.listeners.notify(self.order.as_slice());
        Ok(true)
    }

    /// Restores declaration order.
    pub fn reset_column_order(&mut self) -> Result<bool> {
        let declared = self.columns.iter().map(|c| c.id().clone()).collect();
        self.set_column_order(declared)
    }

    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.filters.global() {
            return;
        }
        self.filters.set_global(text);
        self.recompute();
    }

    /// Sets the filter for one column, or clears it when `value` is empty.
    ///
    /// Unknown and non-filterable columns are ignored. Returns `true` if the filter changed.
    pub fn set_column_filter_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        let Some(column) = self.column(id).filter(|c| c.can_filter()) else {
            tracing::trace!(column = id, "ignored filter for unknown or unfilterable column");
            return false;
        };
        let id = column.id().clone();
        if !self.filters.set_column(id, value) {
            return false;
        }
        self.recompute();
        true
    }

    /// Replaces the sort. Sorting by an unknown or non-sortable column is ignored.
    pub fn set_sort(&mut self, sort: Option<Sort>) -> bool {
        if let Some(s) = &sort
            && !self.column(s.column.as_str()).is_some_and(|c| c.can_sort())
        {
            tracing::trace!(column = %s.column, "ignored sort for unknown or unsortable column");
            return false;
        }
        if sort == self.sort {
            return false;
        }
        self.sort = sort;
        self.recompute();
        true
    }

    /// Cycles the sort of `id`: unsorted, ascending, descending, unsorted.
    pub fn toggle_sort(&mut self, id: &str) -> bool {
        let Some(column) = self.column(id).filter(|c| c.can_sort()) else {
            return false;
        };
        let next = sort::next_toggle(self.sort.as_ref(), column.id());
        self.set_sort(next)
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if let Err(err) = self
            .pagination
            .set_page_size(page_size, self.row_model.len())
        {
            tracing::debug!(error = %err, "rejected page size");
            return Err(err);
        }
        tracing::debug!(
            page_size,
            page_index = self.pagination.page_index(),
            "page size changed"
        );
        Ok(())
    }

    pub fn set_page_index(&mut self, index: usize) -> bool {
        self.pagination.set_page_index(index, self.row_model.len())
    }

    pub fn next_page(&mut self) -> bool {
        self.pagination.next_page(self.row_model.len())
    }

    pub fn previous_page(&mut self) -> bool {
        self.pagination.previous_page(self.row_model.len())
    }

    pub fn first_page(&mut self) -> bool {
        self.set_page_index(0)
    }

    pub fn last_page(&mut self) -> bool {
        let last = self.pagination().page_count.saturating_sub(1);
        self.set_page_index(last)
    }

    /// Replaces the data. Filters, sort and column order are kept.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.recompute();
    }

    /// Number of rows on the current page.
    pub fn page_row_count(&self) -> usize {
        self.pagination.slice(self.row_model.len()).len()
    }

    /// The current page: rows with their cells in display order.
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_, T>> {
        let range = self.pagination.slice(self.row_model.len());
        let columns: Vec<&Column<T>> = self.ordered_columns().collect();
        self.row_model[range]
            .iter()
            .map(|&index| {
                let row = &self.rows[index];
                let cells = columns
                    .iter()
                    .map(|c| VisibleCell {
                        column: c.id(),
                        text: c.render_cell(row),
                    })
                    .collect();
                VisibleRow { index, row, cells }
            })
            .collect()
    }

    /// Distinct values of one column under every filter except its own. `None` for unknown ids.
    pub fn faceted_unique_values(&self, id: &str) -> Option<BTreeMap<String, usize>> {
        let column = self.column(id)?;
        Some(row_model::faceted_unique_values(
            &self.rows,
            &self.columns,
            &self.filters,
            column,
        ))
    }

    fn recompute(&mut self) {
        self.row_model =
            row_model::derive(&self.rows, &self.columns, &self.filters, self.sort.as_ref());
        self.pagination.clamp(self.row_model.len());
        tracing::trace!(
            rows = self.rows.len(),
            filtered = self.row_model.len(),
            page_index = self.pagination.page_index(),
            "row model recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Debug)]
    struct User {
        name: String,
        age: i64,
        email: String,
    }

    fn users(n: usize) -> Vec<User> {
        (0..n)
            .map(|i| User {
                name: format!("user{i:02}"),
                age: 20 + i as i64,
                email: format!("u{i}@example.com"),
            })
            .collect()
    }

    fn columns() -> Vec<Column<User>> {
        vec![
            Column::new("name", "Name", |u: &User| u.name.clone()),
            Column::new("age", "Age", |u: &User| u.age.to_string())
                .with_sort_key(|u| u.age.into()),
            Column::new("email", "Email", |u: &User| u.email.clone()).filterable(false),
        ]
    }

    fn ids(names: &[&str]) -> Vec<ColumnId> {
        names.iter().map(|n| ColumnId::from(*n)).collect()
    }

    fn recorded() -> (Rc<RefCell<Vec<Vec<ColumnId>>>>, TableOptions) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let options = TableOptions::default()
            .on_column_order_change(move |order| sink.borrow_mut().push(order.to_vec()));
        (log, options)
    }

    fn table(rows: usize) -> TableViewState<User> {
        TableViewState::new(columns(), users(rows), TableOptions::default()).expect("table")
    }

    fn assert_cursor_in_range(t: &TableViewState<User>) {
        let p = t.pagination();
        assert!(p.page_index < p.page_count.max(1), "{p:?}");
    }

    #[test]
    fn construction_validates_options_and_columns() {
        let err = TableViewState::new(columns(), users(3), TableOptions::default().page_size(0))
            .unwrap_err();
        assert_eq!(err, TableError::InvalidPageSize(0));

        let mut cols = columns();
        cols.push(Column::new("age", "Again", |u: &User| u.age.to_string()));
        let err = TableViewState::new(cols, users(3), TableOptions::default()).unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn(ColumnId::from("age")));

        let t = table(3);
        assert_eq!(t.column_order(), ids(&["name", "age", "email"]).as_slice());
        assert_eq!(t.pagination().page_size, 10);
    }

    #[test]
    fn accepted_order_is_read_back_and_notified_once() {
        let (log, options) = recorded();
        let mut t = TableViewState::new(columns(), users(3), options).expect("table");

        assert_eq!(t.set_column_order(ids(&["email", "name", "age"])), Ok(true));
        assert_eq!(t.column_order(), ids(&["email", "name", "age"]).as_slice());
        assert_eq!(t.set_column_order(ids(&["email", "name", "age"])), Ok(false));

        assert_eq!(*log.borrow(), vec![ids(&["email", "name", "age"])]);
        let headers: Vec<&str> = t.ordered_columns().map(|c| c.header()).collect();
        assert_eq!(headers, vec!["Email", "Name", "Age"]);
    }

    #[test]
    fn invalid_order_is_rejected_without_notification() {
        let (log, options) = recorded();
        let mut t = TableViewState::new(columns(), users(3), options).expect("table");

        for bad in [
            ids(&["name", "age"]),
            ids(&["name", "age", "age"]),
            ids(&["x", "age", "email"]),
        ] {
            assert!(matches!(
                t.set_column_order(bad),
                Err(TableError::InvalidOrder { .. })
            ));
        }
        assert_eq!(t.column_order(), ids(&["name", "age", "email"]).as_slice());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn reset_restores_declaration_order() {
        let mut t = table(1);
        t.set_column_order(ids(&["age", "email", "name"])).expect("order");
        assert_eq!(t.reset_column_order(), Ok(true));
        assert_eq!(t.column_order(), ids(&["name", "age", "email"]).as_slice());
        assert_eq!(t.reset_column_order(), Ok(false));
    }

    #[test]
    fn unsubscribed_listener_stops_receiving() {
        let mut t = table(1);
        let hits = Rc::new(RefCell::new(0));
        let sink = hits.clone();
        let id = t.subscribe(move |_| *sink.borrow_mut() += 1);
        t.set_column_order(ids(&["age", "name", "email"])).expect("order");
        assert!(t.unsubscribe(id));
        t.set_column_order(ids(&["name", "age", "email"])).expect("order");
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn filter_shrink_clamps_page_index() {
        let mut t = table(23);
        assert_eq!(t.pagination().page_count, 3);
        assert!(t.set_page_index(2));

        // only user00..user09 contain "user0"
        t.set_global_filter("user0");
        assert_eq!(t.filtered_row_count(), 10);
        assert_eq!(t.pagination().page_index, 0);
        assert_eq!(t.pagination().page_count, 1);
    }

    #[test]
    fn column_filter_respects_capability_flags() {
        let mut t = table(23);
        assert!(!t.set_column_filter_value("email", "u1"));
        assert!(!t.set_column_filter_value("missing", "u1"));
        assert_eq!(t.filtered_row_count(), 23);

        assert!(t.set_column_filter_value("age", "4"));
        assert_eq!(t.column_filter_value("age"), Some("4"));
        // ages 20..=42 containing "4": 24, 34, 40, 41, 42
        assert_eq!(t.filtered_row_count(), 5);

        assert!(t.set_column_filter_value("age", ""));
        assert_eq!(t.column_filter_value("age"), None);
        assert_eq!(t.filtered_row_count(), 23);
    }

    #[test]
    fn page_size_changes_keep_the_cursor_valid() {
        let mut t = table(23);
        assert_eq!(t.set_page_size(0), Err(TableError::InvalidPageSize(0)));
        assert_eq!(t.pagination().page_size, 10);

        t.set_page_size(3).expect("page size");
        assert!(t.last_page());
        assert_eq!(t.pagination().page_index, 7);

        t.set_page_size(10).expect("page size");
        assert_eq!(t.pagination().page_index, 2);
        assert_cursor_in_range(&t);

        t.set_global_filter("nobody");
        assert_eq!(t.pagination().page_index, 0);
        assert_eq!(t.pagination().page_count, 0);
        assert!(t.visible_rows().is_empty());
        assert_cursor_in_range(&t);
    }

    #[test]
    fn page_navigation_is_bounded() {
        let mut t = table(23);
        assert!(!t.previous_page());
        assert!(t.next_page());
        assert!(t.next_page());
        assert!(!t.next_page());
        assert!(!t.set_page_index(5));
        assert_eq!(t.visible_rows().len(), 3);
        assert_eq!(t.page_row_count(), 3);
        assert!(t.first_page());
        assert_eq!(t.visible_rows().len(), 10);
    }

    #[test]
    fn visible_rows_follow_sort_and_column_order() {
        let mut t = table(12);
        assert!(t.toggle_sort("age"));
        assert!(t.toggle_sort("age"));
        assert_eq!(t.sort(), Some(&Sort::descending("age")));
        t.set_column_order(ids(&["age", "name", "email"])).expect("order");

        let rows = t.visible_rows();
        assert_eq!(rows[0].index, 11);
        assert_eq!(rows[0].cells[0].column, "age");
        assert_eq!(rows[0].cells[0].text, "31");
        assert_eq!(rows[0].cells[1].text, "user11");

        assert!(t.toggle_sort("age"));
        assert_eq!(t.sort(), None);
        assert_eq!(t.visible_rows()[0].index, 0);
    }

    #[test]
    fn sort_on_unknown_or_unsortable_column_is_ignored() {
        let cols: Vec<Column<User>> = columns()
            .into_iter()
            .map(|c| if c.id() == "name" { c.sortable(false) } else { c })
            .collect();
        let mut t = TableViewState::new(cols, users(5), TableOptions::default()).expect("table");
        assert!(!t.toggle_sort("name"));
        assert!(!t.set_sort(Some(Sort::ascending("nope"))));
        assert!(t.set_sort(Some(Sort::ascending("email"))));
        assert!(!t.set_sort(Some(Sort::ascending("email"))));
        assert!(t.set_sort(None));
    }

    #[test]
    fn replacing_rows_recomputes_and_clamps() {
        let mut t = table(23);
        t.set_page_index(2);
        t.set_rows(users(4));
        assert_eq!(t.pagination().page_index, 0);
        assert_eq!(t.visible_rows().len(), 4);
    }

    #[test]
    fn facets_for_known_columns_only() {
        let t = table(3);
        let facets = t.faceted_unique_values("name").expect("known column");
        assert_eq!(facets.len(), 3);
        assert!(t.faceted_unique_values("nope").is_none());
    }
}
