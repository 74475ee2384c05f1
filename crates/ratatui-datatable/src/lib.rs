//! `ratatui-datatable` is a data-table widget for ratatui: client-side sorting, filtering and
//! pagination, plus column reordering by dragging headers with the mouse (or moving them with the
//! keyboard).
//!
//! The state machine lives in `ratatui-datatable-core` and is re-exported here. This crate adds
//! [`view::DataTableView`], which paints a [`state::TableViewState`] into a ratatui buffer and
//! turns input events into state changes.
//!
//! ```no_run
//! use ratatui_datatable::column::Column;
//! use ratatui_datatable::state::TableOptions;
//! use ratatui_datatable::state::TableViewState;
//!
//! struct Host {
//!     name: String,
//!     load: f64,
//! }
//!
//! let columns = vec![
//!     Column::new("name", "Host", |h: &Host| h.name.clone()),
//!     Column::new("load", "Load", |h: &Host| format!("{:.2}", h.load))
//!         .with_sort_key(|h| h.load.into()),
//! ];
//! let options = TableOptions::default()
//!     .page_size(20)
//!     .on_column_order_change(|order| eprintln!("new order: {order:?}"));
//! let state = TableViewState::new(columns, Vec::<Host>::new(), options)?;
//! # Ok::<(), ratatui_datatable::error::TableError>(())
//! ```
pub use ratatui_datatable_core::column;
pub use ratatui_datatable_core::error;
pub use ratatui_datatable_core::filter;
pub use ratatui_datatable_core::input;
pub use ratatui_datatable_core::keymap;
pub use ratatui_datatable_core::listener;
pub use ratatui_datatable_core::order;
pub use ratatui_datatable_core::pagination;
pub use ratatui_datatable_core::reorder;
pub use ratatui_datatable_core::row_model;
pub use ratatui_datatable_core::sort;
pub use ratatui_datatable_core::state;

#[cfg(feature = "crossterm")]
pub use ratatui_datatable_core::crossterm_input;

pub mod render;
pub mod theme;
pub mod view;
