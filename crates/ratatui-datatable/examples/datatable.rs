use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_datatable::column::Column;
use ratatui_datatable::crossterm_input::input_event_from_crossterm;
use ratatui_datatable::state::TableOptions;
use ratatui_datatable::state::TableViewState;
use ratatui_datatable::theme::Theme;
use ratatui_datatable::view::DataTableAction;
use ratatui_datatable::view::DataTableView;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
struct Employee {
    id: u32,
    name: String,
    team: &'static str,
    city: &'static str,
    salary: f64,
}

const FIRST: [&str; 8] = [
    "Ada", "Grace", "Linus", "Barbara", "Ken", "Margaret", "Dennis", "Frances",
];
const LAST: [&str; 6] = ["Lovelace", "Hopper", "Kernighan", "Liskov", "Hamilton", "Allen"];
const TEAMS: [&str; 4] = ["Platform", "Storage", "Compilers", "Infra"];
const CITIES: [&str; 5] = ["Berlin", "Lisbon", "Osaka", "Toronto", "Austin"];

fn employees(n: u32) -> Vec<Employee> {
    (0..n)
        .map(|i| {
            let i_us = i as usize;
            Employee {
                id: 1000 + i,
                name: format!("{} {}", FIRST[i_us % FIRST.len()], LAST[i_us % LAST.len()]),
                team: TEAMS[i_us % TEAMS.len()],
                city: CITIES[(i_us * 7) % CITIES.len()],
                salary: 48_000.0 + f64::from((i * 7919) % 90_000),
            }
        })
        .collect()
}

fn columns() -> Vec<Column<Employee>> {
    vec![
        Column::new("id", "ID", |e: &Employee| e.id.to_string())
            .with_sort_key(|e| i64::from(e.id).into())
            .filterable(false)
            .width(6),
        Column::new("name", "Name", |e: &Employee| e.name.clone()).width(20),
        Column::new("team", "Team", |e: &Employee| e.team.to_string()).width(10),
        Column::new("city", "City", |e: &Employee| e.city.to_string()).width(10),
        Column::new("salary", "Salary", |e: &Employee| format!("{:.0}", e.salary))
            .with_sort_key(|e| e.salary.into())
            .searchable(false)
            .width(8),
    ]
}

fn init_tracing() -> io::Result<()> {
    // stdout belongs to the terminal UI; RUST_LOG=debug writes to datatable.log
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = File::create("datatable.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    init_tracing()?;

    let options = TableOptions::default()
        .page_size(15)
        .on_column_order_change(|order| tracing::info!(?order, "column order changed"));
    let mut state = TableViewState::new(columns(), employees(240), options)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let mut view = DataTableView::new();
    let theme = Theme::default();

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &theme, &mut view, &mut state);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    view: &mut DataTableView,
    state: &mut TableViewState<Employee>,
) -> io::Result<()> {
    let mut status = String::from("drag a header to move a column");
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let block = Block::default()
                .title("DataTable (←→ focus, Shift+←→ move, j/k rows, s sort, / search, f filter, n/p page, 0 reset, q)")
                .borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let buf = f.buffer_mut();
            let table_area = Rect::new(
                inner.x,
                inner.y,
                inner.width,
                inner.height.saturating_sub(1),
            );
            let status_area = Rect::new(inner.x, inner.y + table_area.height, inner.width, 1);

            view.render(table_area, buf, theme, state);
            if status_area.width > 0 && status_area.height > 0 {
                let span = Span::styled(status.as_str(), theme.text_muted);
                buf.set_span(status_area.x, status_area.y, &span, status_area.width);
            }
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let event = crossterm::event::read()?;
        if let Event::Key(key) = &event
            && key.kind == KeyEventKind::Press
            && key.code == KeyCode::Char('q')
            && view.editing().is_none()
        {
            return Ok(());
        }

        let Some(ev) = input_event_from_crossterm(event) else {
            continue;
        };
        match view.handle_event(ev, state) {
            DataTableAction::ColumnOrderChanged(order) => {
                let names: Vec<&str> = order.iter().map(|id| id.as_str()).collect();
                status = format!("order: {}", names.join(", "));
            }
            DataTableAction::Rejected(err) => {
                status = format!("rejected: {err}");
            }
            DataTableAction::Redraw | DataTableAction::None => {}
        }
    }
}
