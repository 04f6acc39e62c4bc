//! TUI inventory list.
//!
//! Provides a full-screen terminal UI with:
//! - A combined filter / new-item line that filters live while typing
//! - The projected rows with their inventory counts
//! - Key bindings: j/k navigate, / edit line, a add, s sort, +/- adjust, d delete, q quit

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use std::time::{Duration, Instant};
use stockpile_core::persist::{Gateway, KvStore};
use stockpile_core::session::{Intent, Notifier, Session};

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

/// Transient message shown in the status bar.
#[derive(Debug, Default)]
pub struct StatusLine {
    msg: Option<(String, Instant)>,
}

impl StatusLine {
    /// The current message, if it was posted less than `ttl` ago.
    pub fn current(&self, ttl: Duration) -> Option<&str> {
        self.msg
            .as_ref()
            .filter(|(_, at)| at.elapsed() < ttl)
            .map(|(msg, _)| msg.as_str())
    }
}

impl Notifier for StatusLine {
    fn notify(&mut self, message: &str) {
        self.msg = Some((message.to_string(), Instant::now()));
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InputMode {
    #[default]
    Normal,
    /// User is typing in the filter / new-item line.
    Edit,
}

pub struct InventoryView<K: KvStore> {
    session: Session<K, StatusLine>,
    /// Selected row in the current projection.
    table_state: TableState,
    input_mode: InputMode,
    should_quit: bool,
    /// How long a status message stays visible.
    status_ttl: Duration,
}

impl<K: KvStore> InventoryView<K> {
    /// Load the stored list through `gateway` and select the first row.
    pub fn open(gateway: Gateway<K>, status_ttl: Duration) -> Self {
        let mut view = Self {
            session: Session::open(gateway, StatusLine::default()),
            table_state: TableState::default(),
            input_mode: InputMode::Normal,
            should_quit: false,
            status_ttl,
        };
        view.clamp_selection();
        view
    }

    /// Returns true once the user asked to quit.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn render(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        render_into(frame, self, area);
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    fn clamp_selection(&mut self) {
        let len = self.session.rows().len();
        let selected = match (len, self.table_state.selected()) {
            (0, _) => None,
            (_, Some(i)) => Some(i.min(len - 1)),
            (_, None) => Some(0),
        };
        self.table_state.select(selected);
    }

    fn select_next(&mut self) {
        let len = self.session.rows().len();
        if len == 0 {
            return;
        }
        let i = self
            .table_state
            .selected()
            .map_or(0, |i| if i + 1 >= len { len - 1 } else { i + 1 });
        self.table_state.select(Some(i));
    }

    fn select_prev(&mut self) {
        if self.session.rows().is_empty() {
            return;
        }
        let i = self
            .table_state
            .selected()
            .map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(i));
    }

    fn select_first(&mut self) {
        if !self.session.rows().is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        let len = self.session.rows().len();
        if len > 0 {
            self.table_state.select(Some(len - 1));
        }
    }

    // -----------------------------------------------------------------------
    // Intents
    // -----------------------------------------------------------------------

    fn dispatch(&mut self, intent: Intent) -> bool {
        let changed = self.session.dispatch(intent);
        self.clamp_selection();
        changed
    }

    fn set_line(&mut self, text: String) {
        self.dispatch(Intent::FilterTextChanged(text));
        self.select_first();
    }

    fn add_from_line(&mut self) {
        let name = self.session.filter().to_string();
        if self.dispatch(Intent::AddItem(name.clone())) {
            self.input_mode = InputMode::Normal;
            // Select the new row; after an add the rows are in name order.
            if let Some(pos) = self.session.rows().iter().position(|r| r.name == name) {
                self.table_state.select(Some(pos));
            }
        }
    }

    fn adjust_selected(&mut self, delta: i64) {
        if let Some(row) = self.table_state.selected() {
            self.dispatch(Intent::AdjustRow { row, delta });
        }
    }

    fn delete_selected(&mut self) {
        if let Some(row) = self.table_state.selected() {
            self.dispatch(Intent::DeleteRow(row));
        }
    }

    // -----------------------------------------------------------------------
    // Keys
    // -----------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Edit => self.handle_edit_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char('g') | KeyCode::Home => self.select_first(),
            KeyCode::Char('G') | KeyCode::End => self.select_last(),

            KeyCode::Char('/' | 'i') => self.input_mode = InputMode::Edit,
            KeyCode::Char('a') => self.add_from_line(),
            KeyCode::Char('s') => {
                self.dispatch(Intent::CycleSort);
                self.select_first();
            }
            KeyCode::Char('+' | '=') => self.adjust_selected(1),
            KeyCode::Char('-') => self.adjust_selected(-1),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Esc => {
                if !self.session.filter().is_empty() {
                    self.set_line(String::new());
                }
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.set_line(String::new());
            }
            KeyCode::Enter => self.add_from_line(),
            KeyCode::Tab => self.input_mode = InputMode::Normal,
            KeyCode::Down => self.select_next(),
            KeyCode::Up => self.select_prev(),
            KeyCode::Backspace => {
                let mut text = self.session.filter().to_string();
                if text.pop().is_some() {
                    self.set_line(text);
                }
            }
            KeyCode::Char(c) => {
                let mut text = self.session.filter().to_string();
                text.push(c);
                self.set_line(text);
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn build_row(name: &str, inventory: u64) -> Row<'static> {
    Row::new([
        Cell::from(name.to_string()),
        Cell::from(Line::from(vec![
            Span::styled("Inventory: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                inventory.to_string(),
                if inventory == 0 {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::Cyan)
                },
            ),
        ])),
    ])
}

fn render_into<K: KvStore>(frame: &mut ratatui::Frame<'_>, app: &mut InventoryView<K>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    let input_area = chunks[0];
    let table_area = chunks[1];
    let status_area = chunks[2];

    // -----------------------------------------------------------------------
    // Filter / new-item line
    // -----------------------------------------------------------------------
    let editing = app.input_mode == InputMode::Edit;
    let line_style = if editing {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text = app.session.filter();
    let input = if text.is_empty() && !editing {
        Paragraph::new(Span::styled(
            "press / to filter or name a new item",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(text.to_string())
    };
    frame.render_widget(
        input.block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(line_style)
                .title(" filter / new item "),
        ),
        input_area,
    );
    if editing {
        let width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        let max_x = input_area.right().saturating_sub(2);
        frame.set_cursor_position((
            input_area.x.saturating_add(1).saturating_add(width).min(max_x),
            input_area.y + 1,
        ));
    }

    // -----------------------------------------------------------------------
    // Rows
    // -----------------------------------------------------------------------
    let rows: Vec<Row<'static>> = app
        .session
        .rows()
        .iter()
        .map(|r| build_row(&r.name, r.inventory))
        .collect();

    let sort = app.session.sort_mode();
    let block_title = format!(
        " stockpile — {} of {} items  [sort: {} {}] ",
        app.session.rows().len(),
        app.session.items().len(),
        sort.icon(),
        sort
    );

    let table = Table::new(rows, [Constraint::Min(10), Constraint::Length(20)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(if editing {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::Green)
                })
                .title(block_title)
                .title_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(" ");
    frame.render_stateful_widget(table, table_area, &mut app.table_state);

    // -----------------------------------------------------------------------
    // Status bar
    // -----------------------------------------------------------------------
    let status_text = build_status_bar(app, status_area.width);
    frame.render_widget(
        Paragraph::new(status_text).alignment(Alignment::Left),
        status_area,
    );
}

/// Build the status bar: a recent notification, or key hints.
fn build_status_bar<K: KvStore>(app: &InventoryView<K>, width: u16) -> Line<'static> {
    if let Some(msg) = app.session.notifier().current(app.status_ttl) {
        return Line::from(vec![Span::styled(
            msg.to_string(),
            Style::default().fg(Color::Yellow),
        )]);
    }

    let key_style = Style::default().fg(Color::Cyan);
    let dim_style = Style::default().fg(Color::DarkGray);

    let hints: &[(&str, &str)] = match app.input_mode {
        InputMode::Edit => &[
            ("ENTER", "add"),
            ("ESC", "clear"),
            ("TAB", "keep filter"),
        ],
        InputMode::Normal => &[
            ("j/k", "nav"),
            ("/", "filter"),
            ("a", "add"),
            ("s", "sort"),
            ("+/-", "count"),
            ("d", "delete"),
            ("q", "quit"),
        ],
    };
    let mut spans: Vec<Span<'static>> = Vec::new();
    for (key, desc) in hints {
        spans.push(Span::styled((*key).to_string(), key_style));
        spans.push(Span::styled(format!(" {desc}  "), dim_style));
    }

    let version = format!("stockpile {}", env!("CARGO_PKG_VERSION"));
    let left_len: usize = spans.iter().map(|span| span.content.chars().count()).sum();
    let right_len = version.chars().count();
    let width = usize::from(width);
    if width > left_len + right_len + 1 {
        spans.push(Span::raw(" ".repeat(width - left_len - right_len)));
    } else {
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(version, dim_style));

    Line::from(spans)
}
