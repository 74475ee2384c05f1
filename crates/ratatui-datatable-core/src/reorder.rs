use crate::column::ColumnId;
use crate::error::Result;
use crate::error::TableError;
use crate::order::ColumnOrder;
use crate::state::TableViewState;

/// A completed drag: `active` was released over `over`, or outside any drop target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragEnd {
    pub active: ColumnId,
    pub over: Option<ColumnId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// The order changed and listeners were notified.
    Moved,
    /// Dropped outside, onto its own slot, or no drag was in progress.
    Unchanged,
}

/// Turns header drag-and-drop into column moves.
///
/// A renderer calls [`ReorderController::begin`] when a header is picked up,
/// [`ReorderController::hover`] while it moves, and [`ReorderController::finish`] on release.
/// Hosts that recognize gestures themselves can call [`ReorderController::apply`] directly.
#[derive(Clone, Debug, Default)]
pub struct ReorderController {
    active: Option<ColumnId>,
    over: Option<ColumnId>,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, active: ColumnId) {
        self.over = Some(active.clone());
        self.active = Some(active);
    }

    /// Updates the current drop target. `None` means the pointer left every target.
    pub fn hover(&mut self, over: Option<ColumnId>) {
        if self.active.is_some() {
            self.over = over;
        }
    }

    pub fn active(&self) -> Option<&ColumnId> {
        self.active.as_ref()
    }

    pub fn over(&self) -> Option<&ColumnId> {
        self.over.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn cancel(&mut self) {
        self.active = None;
        self.over = None;
    }

    /// Ends the tracked drag and applies it. Without a drag in progress this is a no-op.
    pub fn finish<T>(&mut self, state: &mut TableViewState<T>) -> Result<ReorderOutcome> {
        let Some(active) = self.active.take() else {
            return Ok(ReorderOutcome::Unchanged);
        };
        let over = self.over.take();
        Self::apply(state, DragEnd { active, over })
    }

    /// Moves `event.active` into the slot of `event.over`.
    ///
    /// Both ids must be in the current order, otherwise [`TableError::StaleReference`] is returned
    /// and the state is not touched. Dropping onto the column's own slot changes nothing and
    /// notifies nobody.
    pub fn apply<T>(state: &mut TableViewState<T>, event: DragEnd) -> Result<ReorderOutcome> {
        let Some(over) = event.over else {
            return Ok(ReorderOutcome::Unchanged);
        };
        let order = state.order();
        let from = find(order, &event.active)?;
        let to = find(order, &over)?;
        if from == to {
            return Ok(ReorderOutcome::Unchanged);
        }

        let moved = order.moved(from, to);
        tracing::debug!(column = %event.active, from, to, "moving column");
        if state.set_column_order(moved)? {
            Ok(ReorderOutcome::Moved)
        } else {
            Ok(ReorderOutcome::Unchanged)
        }
    }
}

fn find(order: &ColumnOrder, id: &ColumnId) -> Result<usize> {
    order.index_of(id.as_str()).ok_or_else(|| {
        tracing::debug!(column = %id, "drag refers to a column that is no longer present");
        TableError::StaleReference(id.clone())
    })
}
