//! `ratatui-datatable-core` is the rendering-free half of `ratatui-datatable`.
//!
//! It owns the view state of a data table (column order, global search, per-column filters,
//! single-column sort and the pagination cursor) and keeps the derived row model consistent with
//! it. Rendering lives in the facade crate.
//!
//! ## Design goals
//!
//! - Narrow, validated mutators: every rejected operation leaves the state unchanged and returns a
//!   [`error::TableError`] or `false`.
//! - No async runtime, no timers: every mutation and derivation runs to completion on the caller's
//!   thread.
//! - Observers are explicit: [`state::TableViewState::subscribe`] registers column-order listeners
//!   that run in registration order.
//!
//! ## Getting started
//!
//! - [`state::TableViewState`]: the state machine.
//! - [`reorder::ReorderController`]: drag-and-drop column moves.
//! - [`row_model`]: the pure filter/sort derivation, usable on its own.
//! - [`keymap::TableBindings`]: configurable keys for table commands.
pub mod column;
pub mod error;
pub mod filter;
pub mod listener;
pub mod order;
pub mod pagination;
pub mod reorder;
pub mod row_model;
pub mod sort;
pub mod state;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod input;
pub mod keymap;
