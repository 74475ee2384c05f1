use crate::render;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui_datatable_core::column::Column;
use ratatui_datatable_core::column::ColumnId;
use ratatui_datatable_core::error::TableError;
use ratatui_datatable_core::input::InputEvent;
use ratatui_datatable_core::input::KeyCode;
use ratatui_datatable_core::input::KeyEvent;
use ratatui_datatable_core::input::MouseButton;
use ratatui_datatable_core::input::MouseEvent;
use ratatui_datatable_core::input::MouseEventKind;
use ratatui_datatable_core::keymap::TableBindings;
use ratatui_datatable_core::keymap::TableCommand;
use ratatui_datatable_core::reorder::DragEnd;
use ratatui_datatable_core::reorder::ReorderController;
use ratatui_datatable_core::reorder::ReorderOutcome;
use ratatui_datatable_core::sort::SortDirection;
use ratatui_datatable_core::state::TableViewState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataTableAction {
    None,
    Redraw,
    /// An accepted reorder; carries the new order.
    ColumnOrderChanged(Vec<ColumnId>),
    /// The state rejected the interaction. Nothing changed.
    Rejected(TableError),
}

/// What keystrokes are currently typed into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditTarget {
    Search,
    ColumnFilter(ColumnId),
}

/// Options for [`DataTableView`].
///
/// A style left at `Style::default()` falls back to the [`Theme`] passed to `render`.
#[derive(Clone, Debug)]
pub struct DataTableViewOptions {
    pub show_filter_row: bool,
    pub show_footer: bool,
    pub column_gap: u16,
    pub min_column_width: u16,
    pub style: Style,
    pub header_style: Style,
    pub focus_style: Style,
    pub drop_target_style: Style,
    pub drag_source_style: Style,
    pub filter_placeholder: String,
    pub search_label: String,
}

impl Default for DataTableViewOptions {
    fn default() -> Self {
        Self {
            show_filter_row: true,
            show_footer: true,
            column_gap: 1,
            min_column_width: 3,
            style: Style::default(),
            header_style: Style::default(),
            focus_style: Style::default().add_modifier(Modifier::UNDERLINED),
            drop_target_style: Style::default(),
            drag_source_style: Style::default().add_modifier(Modifier::DIM),
            filter_placeholder: "Filter...".to_string(),
            search_label: "Search: ".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
struct HeaderHit {
    column: ColumnId,
    x: u16,
    width: u16,
}

/// Column geometry computed for one render pass.
#[derive(Clone, Copy, Debug)]
struct ColumnSlot {
    x: u16,
    width: u16,
}

/// Terminal renderer and input handler for a [`TableViewState`].
///
/// The view owns only interaction state (focused column, text being edited, a header drag in
/// progress, where the header was last painted, how far the current page is scrolled). Table state stays with the caller, who passes it
/// to `handle_event` and `render`, so the same state can be inspected or mutated elsewhere between
/// frames.
#[derive(Debug, Default)]
pub struct DataTableView {
    options: DataTableViewOptions,
    bindings: TableBindings,
    focused: usize,
    editing: Option<EditTarget>,
    reorder: ReorderController,
    header_y: Option<u16>,
    header_hits: Vec<HeaderHit>,
    row_offset: usize,
    body_rows: usize,
}

impl DataTableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DataTableViewOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &DataTableViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: DataTableViewOptions) {
        self.options = options;
        if !self.options.show_filter_row
            && matches!(self.editing, Some(EditTarget::ColumnFilter(_)))
        {
            self.editing = None;
        }
    }

    pub fn bindings(&self) -> &TableBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: TableBindings) {
        self.bindings = bindings;
    }

    /// Display index of the focused column.
    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn focused_column<'a, T>(&self, state: &'a TableViewState<T>) -> Option<&'a ColumnId> {
        state.column_order().get(self.focused)
    }

    pub fn set_focused(&mut self, index: usize, column_count: usize) {
        self.focused = index.min(column_count.saturating_sub(1));
    }

    pub fn editing(&self) -> Option<&EditTarget> {
        self.editing.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.reorder.is_dragging()
    }

    pub fn drag_source(&self) -> Option<&ColumnId> {
        self.reorder.active()
    }

    pub fn drop_target(&self) -> Option<&ColumnId> {
        self.reorder.over()
    }

    /// Index, within the current page, of the first painted body row.
    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// Body rows that fit in the last render. Zero before the first render.
    pub fn body_rows(&self) -> usize {
        self.body_rows
    }

    /// The column whose header was painted at `(x, y)` in the last render.
    pub fn header_column_at(&self, x: u16, y: u16) -> Option<&ColumnId> {
        if self.header_y != Some(y) {
            return None;
        }
        self.header_hits
            .iter()
            .find(|h| x >= h.x && x < h.x.saturating_add(h.width))
            .map(|h| &h.column)
    }

    pub fn handle_event<T>(
        &mut self,
        event: InputEvent,
        state: &mut TableViewState<T>,
    ) -> DataTableAction {
        self.focused = self.focused.min(state.column_order().len().saturating_sub(1));
        match event {
            InputEvent::Key(key) => {
                if self.editing.is_some() {
                    self.handle_edit_key(key, state)
                } else {
                    self.handle_key(key, state)
                }
            }
            InputEvent::Paste(text) => match self.editing.clone() {
                Some(target) => {
                    let mut value = current_value(&target, state);
                    value.extend(text.chars().filter(|c| !c.is_control()));
                    apply_value(&target, value, state);
                    DataTableAction::Redraw
                }
                None => DataTableAction::None,
            },
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse, state),
        }
    }

    fn handle_key<T>(&mut self, key: KeyEvent, state: &mut TableViewState<T>) -> DataTableAction {
        if key.code == KeyCode::Esc && self.reorder.is_dragging() {
            self.reorder.cancel();
            return DataTableAction::Redraw;
        }
        let Some(command) = self.bindings.command_for(&key) else {
            return DataTableAction::None;
        };
        let column_count = state.column_order().len();
        let redraw_if = |changed: bool| {
            if changed {
                DataTableAction::Redraw
            } else {
                DataTableAction::None
            }
        };

        match command {
            TableCommand::FocusPrevColumn => {
                let prev = self.focused;
                self.focused = self.focused.saturating_sub(1);
                redraw_if(prev != self.focused)
            }
            TableCommand::FocusNextColumn => {
                let prev = self.focused;
                self.set_focused(self.focused + 1, column_count);
                redraw_if(prev != self.focused)
            }
            TableCommand::MoveColumnLeft => match self.focused.checked_sub(1) {
                Some(target) => self.move_focused(target, state),
                None => DataTableAction::None,
            },
            TableCommand::MoveColumnRight if self.focused + 1 < column_count => {
                self.move_focused(self.focused + 1, state)
            }
            TableCommand::MoveColumnRight => DataTableAction::None,
            TableCommand::ToggleSort => match self.focused_column(state).cloned() {
                Some(id) => redraw_if(state.toggle_sort(id.as_str())),
                None => DataTableAction::None,
            },
            TableCommand::ScrollUp => self.scroll_rows_up(state),
            TableCommand::ScrollDown => self.scroll_rows_down(state),
            TableCommand::NextPage => self.turn_page(state.next_page()),
            TableCommand::PrevPage => self.turn_page(state.previous_page()),
            TableCommand::FirstPage => self.turn_page(state.first_page()),
            TableCommand::LastPage => self.turn_page(state.last_page()),
            TableCommand::EditSearch => {
                self.editing = Some(EditTarget::Search);
                DataTableAction::Redraw
            }
            TableCommand::EditColumnFilter => {
                let target = self
                    .focused_column(state)
                    .and_then(|id| state.column(id.as_str()))
                    .filter(|c| c.can_filter())
                    .map(|c| c.id().clone());
                match target {
                    Some(id) if self.options.show_filter_row => {
                        self.editing = Some(EditTarget::ColumnFilter(id));
                        DataTableAction::Redraw
                    }
                    _ => DataTableAction::None,
                }
            }
            TableCommand::ResetColumnOrder => {
                let focused_id = self.focused_column(state).cloned();
                match state.reset_column_order() {
                    Ok(true) => {
                        self.refocus(focused_id.as_ref(), state);
                        DataTableAction::ColumnOrderChanged(state.column_order().to_vec())
                    }
                    Ok(false) => DataTableAction::None,
                    Err(err) => DataTableAction::Rejected(err),
                }
            }
        }
    }

    fn handle_edit_key<T>(
        &mut self,
        key: KeyEvent,
        state: &mut TableViewState<T>,
    ) -> DataTableAction {
        let Some(target) = self.editing.clone() else {
            return DataTableAction::None;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.editing = None;
                DataTableAction::Redraw
            }
            KeyCode::Backspace => {
                let mut value = current_value(&target, state);
                if value.pop().is_none() {
                    return DataTableAction::None;
                }
                apply_value(&target, value, state);
                DataTableAction::Redraw
            }
            _ => match key.text_char() {
                Some(c) => {
                    let mut value = current_value(&target, state);
                    value.push(c);
                    apply_value(&target, value, state);
                    DataTableAction::Redraw
                }
                None => DataTableAction::None,
            },
        }
    }

    fn handle_mouse<T>(
        &mut self,
        mouse: MouseEvent,
        state: &mut TableViewState<T>,
    ) -> DataTableAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(id) = self.header_column_at(mouse.x, mouse.y).cloned() else {
                    return DataTableAction::None;
                };
                if let Some(index) = state.column_order().iter().position(|c| *c == id) {
                    self.focused = index;
                }
                self.editing = None;
                self.reorder.begin(id);
                DataTableAction::Redraw
            }
            MouseEventKind::Drag(MouseButton::Left) if self.reorder.is_dragging() => {
                let over = self.header_column_at(mouse.x, mouse.y).cloned();
                if over.as_ref() == self.reorder.over() {
                    return DataTableAction::None;
                }
                self.reorder.hover(over);
                DataTableAction::Redraw
            }
            MouseEventKind::Up(MouseButton::Left) if self.reorder.is_dragging() => {
                let over = self.header_column_at(mouse.x, mouse.y).cloned();
                self.reorder.hover(over);
                let active = self.reorder.active().cloned();
                match self.reorder.finish(state) {
                    Ok(ReorderOutcome::Moved) => {
                        self.refocus(active.as_ref(), state);
                        DataTableAction::ColumnOrderChanged(state.column_order().to_vec())
                    }
                    Ok(ReorderOutcome::Unchanged) => DataTableAction::Redraw,
                    Err(err) => DataTableAction::Rejected(err),
                }
            }
            MouseEventKind::ScrollDown => self.scroll_rows_down(state),
            MouseEventKind::ScrollUp => self.scroll_rows_up(state),
            _ => DataTableAction::None,
        }
    }

    fn max_row_offset<T>(&self, state: &TableViewState<T>) -> usize {
        state.page_row_count().saturating_sub(self.body_rows.max(1))
    }

    fn scroll_rows_down<T>(&mut self, state: &mut TableViewState<T>) -> DataTableAction {
        let max = self.max_row_offset(state);
        self.row_offset = self.row_offset.min(max);
        if self.row_offset < max {
            self.row_offset += 1;
            return DataTableAction::Redraw;
        }
        self.turn_page(state.next_page())
    }

    fn scroll_rows_up<T>(&mut self, state: &mut TableViewState<T>) -> DataTableAction {
        self.row_offset = self.row_offset.min(self.max_row_offset(state));
        if self.row_offset > 0 {
            self.row_offset -= 1;
            return DataTableAction::Redraw;
        }
        if !state.previous_page() {
            return DataTableAction::None;
        }
        // continue from the bottom of the previous page
        self.row_offset = self.max_row_offset(state);
        DataTableAction::Redraw
    }

    fn turn_page(&mut self, changed: bool) -> DataTableAction {
        if !changed {
            return DataTableAction::None;
        }
        self.row_offset = 0;
        DataTableAction::Redraw
    }

    fn move_focused<T>(&mut self, target: usize, state: &mut TableViewState<T>) -> DataTableAction {
        let order = state.column_order();
        let (Some(active), Some(over)) = (order.get(self.focused), order.get(target)) else {
            return DataTableAction::None;
        };
        let event = DragEnd {
            active: active.clone(),
            over: Some(over.clone()),
        };
        match ReorderController::apply(state, event) {
            Ok(ReorderOutcome::Moved) => {
                self.focused = target;
                DataTableAction::ColumnOrderChanged(state.column_order().to_vec())
            }
            Ok(ReorderOutcome::Unchanged) => DataTableAction::None,
            Err(err) => DataTableAction::Rejected(err),
        }
    }

    fn refocus<T>(&mut self, id: Option<&ColumnId>, state: &TableViewState<T>) {
        if let Some(index) = id.and_then(|id| state.column_order().iter().position(|c| c == id)) {
            self.focused = index;
        }
    }

    pub fn render<T>(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        state: &TableViewState<T>,
    ) {
        self.header_y = None;
        self.header_hits.clear();
        if area.width == 0 || area.height == 0 {
            return;
        }

        let base_style = if self.options.style == Style::default() {
            theme.text_primary
        } else {
            self.options.style
        };
        buf.set_style(area, base_style);

        let mut y = area.y;
        let bottom = area.y + area.height;
        let footer_y = (self.options.show_footer && area.height >= 2).then(|| bottom - 1);
        let body_bottom = footer_y.unwrap_or(bottom);

        let columns: Vec<&Column<T>> = state.ordered_columns().collect();
        let slots = self.layout_columns(area, &columns);

        self.render_header(area.x, y, buf, theme, state, &columns, &slots);
        self.header_y = Some(y);
        self.header_hits = columns
            .iter()
            .zip(&slots)
            .map(|(c, s)| HeaderHit {
                column: c.id().clone(),
                x: s.x,
                width: s.width,
            })
            .collect();
        y += 1;

        if self.options.show_filter_row && y < body_bottom {
            self.render_filter_row(y, buf, theme, state, &columns, &slots);
            y += 1;
        }

        let rows = state.visible_rows();
        self.body_rows = usize::from(body_bottom.saturating_sub(y));
        self.row_offset = self
            .row_offset
            .min(rows.len().saturating_sub(self.body_rows));
        let shown = rows.len().saturating_sub(self.row_offset).min(self.body_rows);
        for row in rows.iter().skip(self.row_offset).take(shown) {
            for (cell, slot) in row.cells.iter().zip(&slots) {
                render::render_fitted(
                    Rect::new(slot.x, y, slot.width, 1),
                    buf,
                    &cell.text,
                    base_style,
                );
            }
            y += 1;
        }

        if let Some(fy) = footer_y {
            let clipped =
                (shown > 0 && shown < rows.len()).then(|| (self.row_offset, shown, rows.len()));
            let footer = Rect::new(area.x, fy, area.width, 1);
            self.render_footer(footer, buf, theme, state, clipped);
        }
    }

    fn layout_columns<T>(&self, area: Rect, columns: &[&Column<T>]) -> Vec<ColumnSlot> {
        let right = area.x.saturating_add(area.width);
        let mut x = area.x;
        let mut slots = Vec::with_capacity(columns.len());
        for column in columns {
            if x >= right {
                break;
            }
            let wanted = column.width_hint().max(self.options.min_column_width).max(1);
            let width = wanted.min(right - x);
            slots.push(ColumnSlot { x, width });
            x = x.saturating_add(width).saturating_add(self.options.column_gap);
        }
        slots
    }

    #[allow(clippy::too_many_arguments)]
    fn render_header<T>(
        &self,
        x: u16,
        y: u16,
        buf: &mut Buffer,
        theme: &Theme,
        state: &TableViewState<T>,
        columns: &[&Column<T>],
        slots: &[ColumnSlot],
    ) {
        let header_style = if self.options.header_style == Style::default() {
            theme.header
        } else {
            self.options.header_style
        };
        let drop_style = if self.options.drop_target_style == Style::default() {
            theme.drop_target
        } else {
            self.options.drop_target_style
        };
        if let Some(last) = slots.last() {
            let end = last.x + last.width;
            buf.set_style(Rect::new(x, y, end - x, 1), header_style);
        }

        let dragging = self.reorder.active();
        let over = self.reorder.over().filter(|o| Some(*o) != dragging);
        for (i, (column, slot)) in columns.iter().zip(slots).enumerate() {
            let mut style = header_style;
            if i == self.focused {
                style = style.patch(self.options.focus_style).patch(theme.accent);
            }
            if Some(column.id()) == dragging {
                style = style.patch(self.options.drag_source_style);
            }
            if Some(column.id()) == over {
                style = style.patch(drop_style);
            }

            let indicator = match state.sort() {
                Some(s) if s.column == *column.id() => match s.direction {
                    SortDirection::Ascending => " ▲",
                    SortDirection::Descending => " ▼",
                },
                _ => "",
            };
            let text = format!("{}{indicator}", column.header());
            render::render_fitted(Rect::new(slot.x, y, slot.width, 1), buf, &text, style);
        }
    }

    fn render_filter_row<T>(
        &self,
        y: u16,
        buf: &mut Buffer,
        theme: &Theme,
        state: &TableViewState<T>,
        columns: &[&Column<T>],
        slots: &[ColumnSlot],
    ) {
        for (column, slot) in columns.iter().zip(slots) {
            let cell = Rect::new(slot.x, y, slot.width, 1);
            if !column.can_filter() {
                render::render_fitted(cell, buf, "—", theme.text_muted);
                continue;
            }
            let editing = matches!(
                &self.editing,
                Some(EditTarget::ColumnFilter(id)) if id == column.id()
            );
            let value = state.column_filter_value(column.id().as_str()).unwrap_or("");
            if editing {
                let text = format!("{value}_");
                // keep the cursor visible by showing the tail of long input
                let tail = tail_to_width(&text, slot.width);
                render::render_fitted(cell, buf, &tail, theme.accent);
            } else if value.is_empty() {
                let placeholder = &self.options.filter_placeholder;
                render::render_fitted(cell, buf, placeholder, theme.text_muted);
            } else {
                render::render_fitted(cell, buf, value, theme.text_primary);
            }
        }
    }

    fn render_footer<T>(
        &self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        state: &TableViewState<T>,
        clipped: Option<(usize, usize, usize)>,
    ) {
        let p = state.pagination();
        let enabled = |on: bool| if on { theme.accent } else { theme.text_muted };
        let mut spans = vec![
            Span::styled("‹ Prev", enabled(p.can_previous)),
            Span::styled(
                format!("  Page {} of {}  ", p.page_index + 1, p.page_count.max(1)),
                theme.text_primary,
            ),
            Span::styled("Next ›", enabled(p.can_next)),
        ];
        if state.filters().is_active() {
            let total = state.rows().len();
            spans.push(Span::styled(
                format!("  {} of {total} rows", p.row_count),
                theme.text_muted,
            ));
        } else {
            spans.push(Span::styled(format!("  {} rows", p.row_count), theme.text_muted));
        }
        if let Some((offset, shown, page_len)) = clipped {
            spans.push(Span::styled(
                format!("  showing {}-{} of {page_len}", offset + 1, offset + shown),
                theme.accent,
            ));
        }

        let searching = self.editing == Some(EditTarget::Search);
        if searching || !state.global_filter().is_empty() {
            let cursor = if searching { "_" } else { "" };
            spans.push(Span::styled("  ", theme.text_muted));
            spans.push(Span::styled(self.options.search_label.clone(), theme.text_muted));
            spans.push(Span::styled(
                format!("{}{cursor}", state.global_filter()),
                if searching { theme.accent } else { theme.text_primary },
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

fn current_value<T>(target: &EditTarget, state: &TableViewState<T>) -> String {
    match target {
        EditTarget::Search => state.global_filter().to_string(),
        EditTarget::ColumnFilter(id) => state
            .column_filter_value(id.as_str())
            .unwrap_or_default()
            .to_string(),
    }
}

fn apply_value<T>(target: &EditTarget, value: String, state: &mut TableViewState<T>) {
    match target {
        EditTarget::Search => state.set_global_filter(value),
        EditTarget::ColumnFilter(id) => {
            state.set_column_filter_value(id.as_str(), value);
        }
    }
}

fn tail_to_width(text: &str, max_cols: u16) -> String {
    use unicode_width::UnicodeWidthChar;

    let max_cols = max_cols as usize;
    let mut used = 0usize;
    let mut tail: Vec<char> = Vec::new();
    for ch in text.chars().rev() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_cols {
            break;
        }
        used += w;
        tail.push(ch);
    }
    tail.into_iter().rev().collect()
}
