use crate::column::ColumnId;
use std::collections::BTreeMap;

/// Global search text plus per-column filter values.
///
/// Empty values are never stored: clearing a column filter removes its entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    global: String,
    columns: BTreeMap<ColumnId, String>,
}

impl FilterState {
    pub fn global(&self) -> &str {
        &self.global
    }

    pub fn set_global(&mut self, text: impl Into<String>) {
        self.global = text.into();
    }

    pub fn column(&self, id: &str) -> Option<&str> {
        self.columns.get(id).map(String::as_str)
    }

    /// Sets the value for `id`, or removes it when `value` is empty. Returns `true` if anything
    /// changed.
    pub fn set_column(&mut self, id: ColumnId, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.is_empty() {
            return self.columns.remove(id.as_str()).is_some();
        }
        match self.columns.get(id.as_str()) {
            Some(prev) if *prev == value => false,
            _ => {
                self.columns.insert(id, value);
                true
            }
        }
    }

    pub fn column_filters(&self) -> impl Iterator<Item = (&ColumnId, &str)> {
        self.columns.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn is_active(&self) -> bool {
        !self.global.is_empty() || !self.columns.is_empty()
    }
}

/// Case-insensitive substring test used by both the global search and column filters.
///
/// `needle` must already be lowercased (see [`normalize_needle`]); an empty needle matches
/// everything.
pub fn includes_text(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(needle)
}

pub fn normalize_needle(value: &str) -> String {
    value.to_lowercase()
}
