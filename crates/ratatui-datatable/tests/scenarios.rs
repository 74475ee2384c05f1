use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_datatable::column::Column;
use ratatui_datatable::column::ColumnId;
use ratatui_datatable::error::TableError;
use ratatui_datatable::input::InputEvent;
use ratatui_datatable::input::KeyCode;
use ratatui_datatable::input::KeyEvent;
use ratatui_datatable::input::MouseButton;
use ratatui_datatable::input::MouseEvent;
use ratatui_datatable::input::MouseEventKind;
use ratatui_datatable::reorder::DragEnd;
use ratatui_datatable::reorder::ReorderController;
use ratatui_datatable::reorder::ReorderOutcome;
use ratatui_datatable::state::TableOptions;
use ratatui_datatable::state::TableViewState;
use ratatui_datatable::theme::Theme;
use ratatui_datatable::view::DataTableAction;
use ratatui_datatable::view::DataTableView;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug)]
struct Contact {
    name: String,
    age: u32,
    email: String,
}

fn contacts(n: usize) -> Vec<Contact> {
    (0..n)
        .map(|i| Contact {
            // every fifth contact has an "x" in its name
            name: if i % 5 == 0 {
                format!("Max {i}")
            } else {
                format!("Person {i}")
            },
            age: 18 + i as u32,
            email: format!("p{i}@mail.test"),
        })
        .collect()
}

fn columns() -> Vec<Column<Contact>> {
    vec![
        Column::new("name", "Name", |c: &Contact| c.name.clone()).width(10),
        Column::new("age", "Age", |c: &Contact| c.age.to_string())
            .with_sort_key(|c| (c.age as i64).into())
            .width(4),
        Column::new("email", "Email", |c: &Contact| c.email.clone()).width(14),
    ]
}

type OrderLog = Rc<RefCell<Vec<Vec<ColumnId>>>>;

type Step = Box<dyn Fn(&mut TableViewState<Contact>)>;

fn table(rows: usize) -> (TableViewState<Contact>, OrderLog) {
    let log: OrderLog = Rc::default();
    let sink = log.clone();
    let options =
        TableOptions::default().on_column_order_change(move |o| sink.borrow_mut().push(o.to_vec()));
    let state = TableViewState::new(columns(), contacts(rows), options).expect("table");
    (state, log)
}

fn ids(names: &[&str]) -> Vec<ColumnId> {
    names.iter().map(|n| ColumnId::from(*n)).collect()
}

fn drag(active: &str, over: &str) -> DragEnd {
    DragEnd {
        active: ColumnId::from(active),
        over: Some(ColumnId::from(over)),
    }
}

fn permutations(items: &[&'static str]) -> Vec<Vec<&'static str>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

#[test]
fn every_permutation_reads_back_exactly() {
    for p in permutations(&["name", "age", "email"]) {
        let (mut t, _) = table(3);
        t.set_column_order(ids(&p)).expect("permutation");
        assert_eq!(t.column_order(), ids(&p).as_slice());
    }
}

#[test]
fn malformed_orders_leave_state_and_listeners_untouched() {
    let (mut t, log) = table(3);
    for bad in [ids(&["name", "email"]), ids(&["name", "name", "email"])] {
        assert!(matches!(
            t.set_column_order(bad),
            Err(TableError::InvalidOrder { .. })
        ));
    }
    assert_eq!(t.column_order(), ids(&["name", "age", "email"]).as_slice());
    assert!(log.borrow().is_empty());
}

#[test]
fn dropping_a_column_on_itself_never_notifies() {
    let (mut t, log) = table(3);
    for id in ["name", "age", "email"] {
        assert_eq!(
            ReorderController::apply(&mut t, drag(id, id)),
            Ok(ReorderOutcome::Unchanged)
        );
    }
    assert!(log.borrow().is_empty());
}

#[test]
fn pagination_invariant_survives_mixed_operations() {
    let (mut t, _) = table(57);
    let check = |t: &TableViewState<Contact>| {
        let p = t.pagination();
        assert!(p.page_index < p.page_count.max(1), "{p:?}");
    };

    let steps: Vec<Step> = vec![
        Box::new(|t| {
            t.set_page_size(4).expect("page size");
        }),
        Box::new(|t| {
            t.last_page();
        }),
        Box::new(|t| t.set_global_filter("max")),
        Box::new(|t| {
            t.set_page_size(1).expect("page size");
        }),
        Box::new(|t| {
            t.last_page();
        }),
        Box::new(|t| {
            t.set_column_filter_value("age", "5");
        }),
        Box::new(|t| {
            t.set_page_size(25).expect("page size");
        }),
        Box::new(|t| t.set_global_filter("")),
        Box::new(|t| {
            t.set_column_filter_value("age", "");
        }),
        Box::new(|t| {
            t.last_page();
        }),
        Box::new(|t| t.set_global_filter("nothing matches this")),
        Box::new(|t| {
            assert_eq!(t.set_page_size(0), Err(TableError::InvalidPageSize(0)));
        }),
    ];
    for step in &steps {
        step(&mut t);
        check(&t);
    }
}

#[test]
fn two_moves_restore_the_starting_order() {
    let (mut t, log) = table(1);
    let cols = vec![
        Column::new("A", "A", |_: &Contact| String::new()),
        Column::new("B", "B", |_: &Contact| String::new()),
        Column::new("C", "C", |_: &Contact| String::new()),
    ];
    let mut abc = TableViewState::new(cols, contacts(1), TableOptions::default()).expect("table");
    ReorderController::apply(&mut abc, drag("C", "A")).expect("move");
    assert_eq!(abc.column_order(), ids(&["C", "A", "B"]).as_slice());
    ReorderController::apply(&mut abc, drag("C", "B")).expect("move");
    assert_eq!(abc.column_order(), ids(&["A", "B", "C"]).as_slice());

    // the same round trip on the contact table notifies twice
    ReorderController::apply(&mut t, drag("email", "name")).expect("move");
    ReorderController::apply(&mut t, drag("email", "age")).expect("move");
    assert_eq!(t.column_order(), ids(&["name", "age", "email"]).as_slice());
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn filter_that_shrinks_results_clamps_the_page() {
    let (mut t, _) = table(23);
    assert_eq!(t.pagination().page_count, 3);
    assert!(t.set_page_index(2));

    t.set_global_filter("x");
    let p = t.pagination();
    assert_eq!(p.row_count, 5);
    assert_eq!(p.page_index, 0);
    assert_eq!(p.page_count, 1);
}

#[test]
fn dragging_name_onto_email() {
    let (mut t, log) = table(3);
    assert_eq!(
        ReorderController::apply(&mut t, drag("name", "email")),
        Ok(ReorderOutcome::Moved)
    );
    assert_eq!(t.column_order(), ids(&["age", "email", "name"]).as_slice());
    assert_eq!(*log.borrow(), vec![ids(&["age", "email", "name"])]);
}

#[test]
fn stale_drag_is_rejected() {
    let (mut t, log) = table(3);
    assert_eq!(
        ReorderController::apply(&mut t, drag("phone", "age")),
        Err(TableError::StaleReference(ColumnId::from("phone")))
    );
    assert_eq!(t.column_order(), ids(&["name", "age", "email"]).as_slice());
    assert!(log.borrow().is_empty());
}

fn mouse(kind: MouseEventKind, x: u16, y: u16) -> InputEvent {
    InputEvent::Mouse(MouseEvent::new(kind, x, y))
}

fn header_line(buf: &Buffer) -> String {
    line_at(buf, 0)
}

#[test]
fn mouse_drag_on_the_header_reorders_columns() {
    let (mut t, log) = table(12);
    let mut view = DataTableView::new();
    let theme = Theme::default();
    let area = Rect::new(0, 0, 40, 8);
    let mut buf = Buffer::empty(area);
    view.render(area, &mut buf, &theme, &t);
    // name: x 0..10, age: x 11..15, email: x 16..30
    assert_eq!(header_line(&buf), "Name       Age  Email");

    let left = MouseButton::Left;
    assert_eq!(
        view.handle_event(mouse(MouseEventKind::Down(left), 2, 0), &mut t),
        DataTableAction::Redraw
    );
    assert_eq!(view.drag_source(), Some(&ColumnId::from("name")));
    view.handle_event(mouse(MouseEventKind::Drag(left), 12, 0), &mut t);
    assert_eq!(view.drop_target(), Some(&ColumnId::from("age")));
    view.handle_event(mouse(MouseEventKind::Drag(left), 20, 0), &mut t);
    assert_eq!(view.drop_target(), Some(&ColumnId::from("email")));

    let action = view.handle_event(mouse(MouseEventKind::Up(left), 20, 0), &mut t);
    assert_eq!(
        action,
        DataTableAction::ColumnOrderChanged(ids(&["age", "email", "name"]))
    );
    assert!(!view.is_dragging());
    assert_eq!(view.focused(), 2);
    assert_eq!(log.borrow().len(), 1);

    let mut buf = Buffer::empty(area);
    view.render(area, &mut buf, &theme, &t);
    assert_eq!(header_line(&buf), "Age  Email          Name");
}

fn line_at(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf[(x, y)].symbol().to_string())
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[test]
fn every_row_of_a_tall_page_is_reachable_in_a_short_area() {
    let (mut t, _) = table(23);
    let mut view = DataTableView::new();
    // header, filter row, three body rows, footer
    let area = Rect::new(0, 0, 80, 6);
    let render = |view: &mut DataTableView, t: &TableViewState<Contact>| {
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &Theme::default(), t);
        buf
    };

    let buf = render(&mut view, &t);
    assert!(line_at(&buf, 2).starts_with("Max 0"));
    assert!(line_at(&buf, 4).starts_with("Person 2"));
    assert!(line_at(&buf, 5).ends_with("showing 1-3 of 10"));

    let mut seen = Vec::new();
    let down = InputEvent::Key(KeyEvent::new(KeyCode::Down));
    for _ in 0..7 {
        assert_eq!(view.handle_event(down.clone(), &mut t), DataTableAction::Redraw);
        let buf = render(&mut view, &t);
        seen.push(line_at(&buf, 4));
    }
    assert!(seen[6].starts_with("Person 9"));
    assert_eq!(t.pagination().page_index, 0);
    let buf = render(&mut view, &t);
    assert!(line_at(&buf, 2).starts_with("Person 7"));
    assert!(line_at(&buf, 5).ends_with("showing 8-10 of 10"));

    // past the last row of the page, scrolling turns the page
    view.handle_event(down, &mut t);
    assert_eq!(t.pagination().page_index, 1);
    let buf = render(&mut view, &t);
    assert!(line_at(&buf, 2).starts_with("Max 10"));

    // the wheel scrolls the same way
    view.handle_event(mouse(MouseEventKind::ScrollUp, 3, 3), &mut t);
    assert_eq!(t.pagination().page_index, 0);
    let buf = render(&mut view, &t);
    assert!(line_at(&buf, 4).starts_with("Person 9"));
}

#[test]
fn release_outside_the_header_is_a_no_op() {
    let (mut t, log) = table(12);
    let mut view = DataTableView::new();
    let area = Rect::new(0, 0, 40, 8);
    let mut buf = Buffer::empty(area);
    view.render(area, &mut buf, &Theme::default(), &t);

    let left = MouseButton::Left;
    view.handle_event(mouse(MouseEventKind::Down(left), 12, 0), &mut t);
    view.handle_event(mouse(MouseEventKind::Drag(left), 20, 0), &mut t);
    view.handle_event(mouse(MouseEventKind::Drag(left), 20, 5), &mut t);
    assert_eq!(view.drop_target(), None);
    assert_eq!(
        view.handle_event(mouse(MouseEventKind::Up(left), 20, 5), &mut t),
        DataTableAction::Redraw
    );
    assert_eq!(t.column_order(), ids(&["name", "age", "email"]).as_slice());
    assert!(log.borrow().is_empty());
}

#[test]
fn escape_cancels_a_drag() {
    let (mut t, _) = table(3);
    let mut view = DataTableView::new();
    let area = Rect::new(0, 0, 40, 8);
    let mut buf = Buffer::empty(area);
    view.render(area, &mut buf, &Theme::default(), &t);

    let left = MouseButton::Left;
    view.handle_event(mouse(MouseEventKind::Down(left), 2, 0), &mut t);
    view.handle_event(InputEvent::Key(KeyEvent::new(KeyCode::Esc)), &mut t);
    assert!(!view.is_dragging());
    view.handle_event(mouse(MouseEventKind::Up(left), 20, 0), &mut t);
    assert_eq!(t.column_order(), ids(&["name", "age", "email"]).as_slice());
}
