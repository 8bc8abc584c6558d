//! Master–detail contact browser built on datagrid-tui

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing_subscriber::EnvFilter;

mod data;
mod settings;

use datagrid_tui::ui::layout::DialogLayout;
use datagrid_tui::ui::widgets::table as table_view;
use datagrid_tui::{
    Column, DataTable, FieldOption, MasterDetail, TableViewEvent, TableViewProps, TableViewState,
    Theme,
};

use data::{sample_contacts, Contact, ContactLoader, DirectoryLoader};
use settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "datagrid-demo")]
#[command(about = "Paginated contact browser demoing the datagrid widgets")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Rows per page (overrides the config file)
    #[arg(short, long)]
    page_size: Option<usize>,

    /// Use the light theme
    #[arg(long)]
    light: bool,
}

/// Input events
enum AppEvent {
    Key(KeyEvent),
    Tick,
}

/// Poll for the next input event, yielding a tick when idle
fn next_event(tick_rate: Duration) -> Option<AppEvent> {
    if event::poll(tick_rate).ok()? {
        match event::read().ok()? {
            Event::Key(key) => Some(AppEvent::Key(key)),
            _ => None,
        }
    } else {
        Some(AppEvent::Tick)
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    matches!(
        (event.code, event.modifiers),
        (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Char('c'), KeyModifiers::CONTROL)
    )
}

struct DemoApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    master_detail: MasterDetail<Contact, DirectoryLoader, ContactLoader>,
    columns: Vec<Column<Contact>>,
    view: TableViewState,
    theme: Theme,
    tick_rate: Duration,
}

impl DemoApp {
    fn new(
        master_detail: MasterDetail<Contact, DirectoryLoader, ContactLoader>,
        columns: Vec<Column<Contact>>,
        theme: Theme,
    ) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            master_detail,
            columns,
            view: TableViewState::new(),
            theme,
            tick_rate: Duration::from_millis(100),
        })
    }

    async fn run(&mut self) -> Result<()> {
        loop {
            self.draw()?;

            match next_event(self.tick_rate) {
                Some(AppEvent::Key(key)) => {
                    if self.handle_key(key).await {
                        break;
                    }
                }
                Some(AppEvent::Tick) => {
                    self.master_detail.tick().await;
                }
                None => {}
            }
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let master_detail = &self.master_detail;
        let columns = &self.columns;
        let view = &mut self.view;
        let theme = &self.theme;

        self.terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(5),    // Content
                    Constraint::Length(1), // Status bar
                ])
                .split(frame.area());

            let props = TableViewProps {
                columns,
                show_search_box: true,
            };
            master_detail.render(frame, chunks[0], &props, view, theme, render_contact);

            let hint = if master_detail.detail().is_some() {
                " Esc = back  q = quit"
            } else {
                " / = search  Tab = column  o = column menu  ◂ ▸ = page  Enter = details  q = quit"
            };
            frame.render_widget(Paragraph::new(hint).style(theme.dim()), chunks[1]);
        })?;

        Ok(())
    }

    /// Returns true when the app should quit
    async fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.master_detail.detail().is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Backspace => {
                    self.master_detail.before_navigate("").await;
                }
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        // While typing in the search bar or a menu, keys belong to the table.
        if !self.view.editing() && is_quit(&key) {
            return true;
        }

        let outcome = table_view::handle_key(
            key,
            self.master_detail.table_mut(),
            &self.columns,
            &mut self.view,
        )
        .await;

        if let TableViewEvent::RowActivated(idx) = outcome {
            let name = self
                .master_detail
                .table()
                .results()
                .and_then(|rows| rows.get(idx))
                .map(|c| c.name.clone());
            if let Some(name) = name {
                self.master_detail.before_navigate(&name).await;
            }
        }

        false
    }
}

impl Drop for DemoApp {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn render_contact(contact: &Contact, frame: &mut Frame, area: Rect, theme: &Theme) {
    let dialog = DialogLayout::new(area, 60, 50).dialog;

    let block = Block::default()
        .title(format!(" {} ", contact.name))
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    let inner = block.inner(dialog);

    frame.render_widget(Clear, dialog);
    frame.render_widget(block, dialog);

    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {label:<8}"), theme.dim()),
            Span::styled(value, theme.normal()),
        ])
    };

    let lines = vec![
        Line::default(),
        field("Email", contact.email.clone()),
        field("City", contact.city.clone()),
        field("Age", contact.age.to_string()),
        field("Joined", contact.joined.format("%-d %B %Y").to_string()),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn columns() -> Vec<Column<Contact>> {
    vec![
        Column::new("name").sortable(),
        Column::new("email"),
        Column::new("city").sortable().options(vec![
            FieldOption::new("berlin", "Berlin"),
            FieldOption::new("dublin", "Dublin"),
            FieldOption::new("lisbon", "Lisbon"),
            FieldOption::new("madrid", "Madrid"),
            FieldOption::new("oslo", "Oslo"),
        ]),
        Column::new("age").sortable(),
        Column::new("joined").sortable(),
    ]
}

fn init_logging(settings: &Settings) -> Result<()> {
    let path = std::path::Path::new(&settings.log_file);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    if args.light {
        settings.theme = "light".to_string();
    }

    init_logging(&settings)?;
    tracing::info!("datagrid demo starting");

    let theme = match settings.theme.as_str() {
        "light" => Theme::light(),
        _ => Theme::dark(),
    };

    let contacts = sample_contacts();
    let table = DataTable::new(DirectoryLoader::new(contacts.clone()))
        .with_page_size(settings.page_size)
        .with_debounce_window(Duration::from_millis(settings.debounce_ms));
    let mut master_detail = MasterDetail::new(table, ContactLoader::new(contacts));

    // Initial list load
    master_detail.before_navigate("").await;

    let mut app = DemoApp::new(master_detail, columns(), theme)?;
    app.run().await
}
