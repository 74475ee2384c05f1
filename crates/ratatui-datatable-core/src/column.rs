use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Identity of a column. Cheap to clone.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnId(Arc<str>);

impl ColumnId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ColumnId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl Borrow<str> for ColumnId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ColumnId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ColumnId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Value used to order rows when a column is sorted.
///
/// Keys of the same kind compare naturally (floats by their total order). Mixed kinds order
/// `Integer < Float < Text` so a sort never has to give up on a comparison.
#[derive(Clone, Debug, PartialEq)]
pub enum SortKey {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Integer(_) => 0,
            SortKey::Float(_) => 1,
            SortKey::Text(_) => 2,
        }
    }

    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
            (SortKey::Float(a), SortKey::Float(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<i64> for SortKey {
    fn from(value: i64) -> Self {
        SortKey::Integer(value)
    }
}

impl From<f64> for SortKey {
    fn from(value: f64) -> Self {
        SortKey::Float(value)
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::Text(value)
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::Text(value.to_string())
    }
}

type CellFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;
type SortKeyFn<T> = Arc<dyn Fn(&T) -> SortKey + Send + Sync>;

/// Column descriptor.
///
/// Built once by the caller and never mutated by the table. Capability flags are fixed here so the
/// state machine can check them directly instead of probing for optional behavior.
pub struct Column<T> {
    id: ColumnId,
    header: String,
    cell: CellFn<T>,
    sort_key: Option<SortKeyFn<T>>,
    filterable: bool,
    sortable: bool,
    searchable: bool,
    width: u16,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            cell: self.cell.clone(),
            sort_key: self.sort_key.clone(),
            filterable: self.filterable,
            sortable: self.sortable,
            searchable: self.searchable,
            width: self.width,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("filterable", &self.filterable)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

impl<T> Column<T> {
    pub const DEFAULT_WIDTH: u16 = 12;

    pub fn new(
        id: impl Into<ColumnId>,
        header: impl Into<String>,
        cell: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            cell: Arc::new(cell),
            sort_key: None,
            filterable: true,
            sortable: true,
            searchable: true,
            width: Self::DEFAULT_WIDTH,
        }
    }

    /// Sort by a typed key instead of the rendered cell text.
    pub fn with_sort_key(mut self, f: impl Fn(&T) -> SortKey + Send + Sync + 'static) -> Self {
        self.sort_key = Some(Arc::new(f));
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Whether the global search looks at this column.
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Presentation hint, in terminal cells. The state machine ignores it.
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn id(&self) -> &ColumnId {
        &self.id
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn can_filter(&self) -> bool {
        self.filterable
    }

    pub fn can_sort(&self) -> bool {
        self.sortable
    }

    pub fn can_search(&self) -> bool {
        self.searchable
    }

    pub fn width_hint(&self) -> u16 {
        self.width
    }

    pub fn render_cell(&self, row: &T) -> String {
        (self.cell)(row)
    }

    pub fn sort_key(&self, row: &T) -> SortKey {
        match &self.sort_key {
            Some(f) => f(row),
            None => SortKey::Text(self.render_cell(row)),
        }
    }
}
