use absence_tracker::roster::{Roster, Teacher};
use absence_tracker::store::RosterStore;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

pub struct App {
    pub roster: Roster,
    pub store: Box<dyn RosterStore>,
    /// Sorted snapshot currently on screen; selection indexes into this
    pub view: Vec<Teacher>,
    pub state: TableState,
    pub status: String,
    /// Name buffer while the add-teacher prompt is open
    pub input: Option<String>,
}

impl App {
    pub fn new(store: Box<dyn RosterStore>) -> Self {
        let roster = Roster::new(store.load());
        let view = roster.sorted_view();

        let mut state = TableState::default();
        if !view.is_empty() {
            state.select(Some(0));
        }

        Self {
            roster,
            store,
            view,
            state,
            status: String::new(),
            input: None,
        }
    }

    /// Re-sort the view after a mutation. Selection is not carried over;
    /// it resets to the first row of the new order.
    fn refresh(&mut self) {
        self.view = self.roster.sorted_view();
        if self.view.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn selected_teacher(&self) -> Option<&Teacher> {
        self.state.selected().and_then(|i| self.view.get(i))
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(self.roster.records())
    }

    /// Mark the selected teacher absent once more
    pub fn increment_selected(&mut self) -> Result<()> {
        let name = match self.selected_teacher() {
            Some(t) => t.name.clone(),
            None => {
                self.status = "⚠ Please select a teacher first.".to_string();
                return Ok(());
            }
        };

        self.roster.increment(&name);
        self.persist()?;
        self.refresh();
        self.status = format!("✅ Marked {} as absent for today.", name);

        Ok(())
    }

    /// Remove one absence from the selected teacher (floored at zero)
    pub fn decrement_selected(&mut self) -> Result<()> {
        let name = match self.selected_teacher() {
            Some(t) => t.name.clone(),
            None => {
                self.status = "⚠ Please select a teacher first.".to_string();
                return Ok(());
            }
        };

        self.roster.decrement(&name);
        self.persist()?;
        self.refresh();
        self.status = format!("➖ Removed one absence from {}.", name);

        Ok(())
    }

    /// Zero every absence count, no confirmation
    pub fn reset_all(&mut self) -> Result<()> {
        self.roster.reset_all();
        self.persist()?;
        self.refresh();
        self.status = "🔄 All absences have been reset to zero.".to_string();

        Ok(())
    }

    pub fn begin_add(&mut self) {
        self.input = Some(String::new());
        self.status.clear();
    }

    pub fn cancel_add(&mut self) {
        self.input = None;
    }

    /// Commit the add-teacher prompt. An empty name just closes the
    /// prompt; a duplicate (ignoring case) is rejected with an error
    /// message and no mutation.
    pub fn confirm_add(&mut self) -> Result<()> {
        let name = match self.input.take() {
            Some(buffer) => buffer.trim().to_string(),
            None => return Ok(()),
        };

        if name.is_empty() {
            return Ok(());
        }

        match self.roster.add(&name) {
            Ok(()) => {
                self.persist()?;
                self.refresh();
                self.status = format!("✅ Added {} to the list.", name);
            }
            Err(message) => {
                self.status = format!("❌ {}", message);
            }
        }

        Ok(())
    }

    pub fn next(&mut self) {
        let len = self.view.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.view.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Total absences across the roster, for the header line
    pub fn total_absences(&self) -> u32 {
        self.roster.records().iter().map(|t| t.absences).sum()
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // Add-teacher prompt captures all keys while open
            if app.input.is_some() {
                match key.code {
                    KeyCode::Enter => app.confirm_add()?,
                    KeyCode::Esc => app.cancel_add(),
                    KeyCode::Backspace => {
                        if let Some(buffer) = app.input.as_mut() {
                            buffer.pop();
                        }
                    }
                    KeyCode::Char(c) => {
                        if let Some(buffer) = app.input.as_mut() {
                            buffer.push(c);
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('+') | KeyCode::Char('=') => app.increment_selected()?,
                KeyCode::Char('-') => app.decrement_selected()?,
                KeyCode::Char('r') => app.reset_all()?,
                KeyCode::Char('a') => app.begin_add(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Home => {
                    if !app.view.is_empty() {
                        app.state.select(Some(0));
                    }
                }
                KeyCode::End => {
                    if !app.view.is_empty() {
                        app.state.select(Some(app.view.len() - 1));
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title header
            Constraint::Min(0),    // Roster table
            Constraint::Length(3), // Status bar / add prompt
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_table(f, chunks[1], app);

    if app.input.is_some() {
        render_add_prompt(f, chunks[2], app);
    } else {
        render_status_bar(f, chunks[2], app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let header_text = vec![Line::from(vec![
        Span::styled(
            "Teacher Absence Tracker",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Teachers: {}", app.roster.len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Total absences: {}", app.total_absences()),
            Style::default().fg(Color::Red),
        ),
    ])];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Teacher Name", "Absences"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.view.iter().map(|teacher| {
        let color = if teacher.absences > 0 {
            Color::Red
        } else {
            Color::Green
        };

        let cells = vec![
            Cell::from(teacher.name.clone()),
            Cell::from(teacher.absences.to_string()).style(Style::default().fg(color)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(rows, [Constraint::Min(30), Constraint::Length(10)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Roster - sorted by absences "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if !app.status.is_empty() {
        status_spans.push(Span::styled(
            format!(" {} ", app.status),
            Style::default().fg(Color::Cyan),
        ));
        status_spans.push(Span::raw("| "));
    }

    status_spans.push(Span::styled("+/-", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Absence | "));
    status_spans.push(Span::styled("a", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Add | "));
    status_spans.push(Span::styled("r", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Reset All | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_text = vec![Line::from(status_spans)];

    let status_bar = Paragraph::new(status_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_add_prompt(f: &mut Frame, area: Rect, app: &App) {
    let buffer = app.input.as_deref().unwrap_or("");

    let prompt_text = vec![Line::from(vec![
        Span::styled(
            " Enter teacher's name: ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(buffer),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        Span::raw("  ("),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" confirm, "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" cancel)"),
    ])];

    let prompt = Paragraph::new(prompt_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Add Teacher "),
    );

    f.render_widget(prompt, area);
}
