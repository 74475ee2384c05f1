use crate::column::ColumnId;

/// Rejections reported by [`crate::state::TableViewState`] and
/// [`crate::reorder::ReorderController`].
///
/// Every variant is recoverable: the rejected operation leaves the state exactly as it was, and
/// the caller decides whether to ignore, log or surface it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A proposed column order is not a permutation of the column id set.
    #[error("column order must list each of the {expected} columns once, got {got} ids")]
    InvalidOrder { expected: usize, got: usize },

    /// A drag event names a column id that is not in the current order.
    #[error("column `{0}` is not part of the current column order")]
    StaleReference(ColumnId),

    /// Page sizes must be positive.
    #[error("invalid page size {0}: must be greater than zero")]
    InvalidPageSize(usize),

    /// Two column descriptors share an id.
    #[error("duplicate column id `{0}`")]
    DuplicateColumn(ColumnId),
}

pub type Result<T, E = TableError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = TableError::StaleReference(ColumnId::from("email"));
        assert_eq!(
            err.to_string(),
            "column `email` is not part of the current column order"
        );
        assert!(TableError::InvalidPageSize(0).to_string().contains("page size 0"));
    }
}
