use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// Table-level commands a key can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableCommand {
    FocusPrevColumn,
    FocusNextColumn,
    /// Move the focused column one slot left, like dropping it onto its left neighbour.
    MoveColumnLeft,
    MoveColumnRight,
    ToggleSort,
    /// Scroll the rows of the current page; past either end this turns the page.
    ScrollUp,
    ScrollDown,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    EditSearch,
    EditColumnFilter,
    ResetColumnOrder,
}

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && pattern.modifiers == event.modifiers
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_shift(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code).with_modifiers(KeyModifiers::SHIFT)
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::CTRL)
}

/// Key bindings for [`TableCommand`]s.
///
/// Defaults lean Vim-like: `h`/`l` focus columns, `H`/`L` (or `<`/`>`) move them, `j`/`k` scroll
/// rows, `n`/`p` and PageDown/PageUp turn pages, `/` edits the search and `f` the focused
/// column's filter.
#[derive(Clone, Debug)]
pub struct TableBindings {
    pub focus_prev: Vec<KeyEvent>,
    pub focus_next: Vec<KeyEvent>,
    pub move_left: Vec<KeyEvent>,
    pub move_right: Vec<KeyEvent>,
    pub toggle_sort: Vec<KeyEvent>,
    pub scroll_up: Vec<KeyEvent>,
    pub scroll_down: Vec<KeyEvent>,
    pub next_page: Vec<KeyEvent>,
    pub prev_page: Vec<KeyEvent>,
    pub first_page: Vec<KeyEvent>,
    pub last_page: Vec<KeyEvent>,
    pub edit_search: Vec<KeyEvent>,
    pub edit_filter: Vec<KeyEvent>,
    pub reset_order: Vec<KeyEvent>,
}

impl Default for TableBindings {
    fn default() -> Self {
        Self {
            focus_prev: vec![KeyEvent::new(KeyCode::Left), key_char('h')],
            focus_next: vec![KeyEvent::new(KeyCode::Right), key_char('l')],
            move_left: vec![
                key_shift(KeyCode::Left),
                KeyEvent::new(KeyCode::Char('H')).with_modifiers(KeyModifiers::SHIFT),
                key_char('H'),
                key_char('<'),
                KeyEvent::new(KeyCode::Char('<')).with_modifiers(KeyModifiers::SHIFT),
            ],
            move_right: vec![
                key_shift(KeyCode::Right),
                KeyEvent::new(KeyCode::Char('L')).with_modifiers(KeyModifiers::SHIFT),
                key_char('L'),
                key_char('>'),
                KeyEvent::new(KeyCode::Char('>')).with_modifiers(KeyModifiers::SHIFT),
            ],
            toggle_sort: vec![key_char('s')],
            scroll_up: vec![KeyEvent::new(KeyCode::Up), key_char('k')],
            scroll_down: vec![KeyEvent::new(KeyCode::Down), key_char('j')],
            next_page: vec![KeyEvent::new(KeyCode::PageDown), key_char('n'), key_ctrl('d')],
            prev_page: vec![KeyEvent::new(KeyCode::PageUp), key_char('p'), key_ctrl('u')],
            first_page: vec![KeyEvent::new(KeyCode::Home), key_char('g')],
            last_page: vec![
                KeyEvent::new(KeyCode::End),
                KeyEvent::new(KeyCode::Char('G')).with_modifiers(KeyModifiers::SHIFT),
                key_char('G'),
            ],
            edit_search: vec![key_char('/')],
            edit_filter: vec![key_char('f')],
            reset_order: vec![key_char('0')],
        }
    }
}

impl TableBindings {
    pub fn command_for(&self, key: &KeyEvent) -> Option<TableCommand> {
        let table = [
            (&self.focus_prev, TableCommand::FocusPrevColumn),
            (&self.focus_next, TableCommand::FocusNextColumn),
            (&self.move_left, TableCommand::MoveColumnLeft),
            (&self.move_right, TableCommand::MoveColumnRight),
            (&self.toggle_sort, TableCommand::ToggleSort),
            (&self.scroll_up, TableCommand::ScrollUp),
            (&self.scroll_down, TableCommand::ScrollDown),
            (&self.next_page, TableCommand::NextPage),
            (&self.prev_page, TableCommand::PrevPage),
            (&self.first_page, TableCommand::FirstPage),
            (&self.last_page, TableCommand::LastPage),
            (&self.edit_search, TableCommand::EditSearch),
            (&self.edit_filter, TableCommand::EditColumnFilter),
            (&self.reset_order, TableCommand::ResetColumnOrder),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.iter().any(|p| key_event_matches(p, key)))
            .map(|(_, command)| command)
    }
}
