use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use expense_ledger::{
    format_amount, parse_date, pie_slices, summarize, Category, Expense, ExpenseStore, PieSlice,
    DATE_FORMAT,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        canvas::{self, Canvas},
        Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState,
    },
    Frame, Terminal,
};
use std::io;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Ledger,
    Chart,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Ledger => Page::Chart,
            Page::Chart => Page::Ledger,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Ledger => "Expenses",
            Page::Chart => "Pie Chart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// A modal in front of the current page. One at a time; input goes nowhere
/// else until it is dismissed.
#[derive(Debug, Clone)]
pub enum Modal {
    Notice { level: NoticeLevel, message: String },
    ConfirmDelete { id: Uuid },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Category,
    Amount,
    Description,
}

impl FormField {
    fn next(&self) -> Self {
        match self {
            FormField::Date => FormField::Category,
            FormField::Category => FormField::Amount,
            FormField::Amount => FormField::Description,
            FormField::Description => FormField::Date,
        }
    }

    fn previous(&self) -> Self {
        match self {
            FormField::Date => FormField::Description,
            FormField::Category => FormField::Date,
            FormField::Amount => FormField::Category,
            FormField::Description => FormField::Amount,
        }
    }

    fn label(&self) -> &str {
        match self {
            FormField::Date => "Date",
            FormField::Category => "Category",
            FormField::Amount => "Amount",
            FormField::Description => "Description",
        }
    }
}

/// The add-expense form: raw text for date and amount (parsed on submit),
/// a category picked by cycling the fixed set.
#[derive(Debug, Clone)]
pub struct ExpenseForm {
    pub field: FormField,
    pub date: String,
    pub category: Category,
    pub amount: String,
    pub description: String,
}

impl ExpenseForm {
    fn new() -> Self {
        ExpenseForm {
            field: FormField::Date,
            date: Local::now().date_naive().format(DATE_FORMAT).to_string(),
            category: Category::Food,
            amount: String::new(),
            description: String::new(),
        }
    }

    fn push_char(&mut self, c: char) {
        match self.field {
            FormField::Date => self.date.push(c),
            FormField::Amount => self.amount.push(c),
            FormField::Description => self.description.push(c),
            FormField::Category => {}
        }
    }

    fn pop_char(&mut self) {
        match self.field {
            FormField::Date => {
                self.date.pop();
            }
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::Category => {}
        }
    }
}

pub struct App {
    pub store: ExpenseStore,
    pub state: TableState,
    pub current_page: Page,
    pub form: Option<ExpenseForm>,
    pub modal: Option<Modal>,
}

impl App {
    pub fn new(store: ExpenseStore, load_warning: Option<String>) -> Self {
        let mut state = TableState::default();
        if !store.is_empty() {
            state.select(Some(0));
        }

        let modal = load_warning.map(|message| Modal::Notice {
            level: NoticeLevel::Error,
            message,
        });

        Self {
            store,
            state,
            current_page: Page::Ledger,
            form: None,
            modal,
        }
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        let sorted = self.store.sorted_desc();
        self.state.selected().and_then(|i| sorted.get(i).copied())
    }

    pub fn next(&mut self) {
        let len = self.store.len();
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
        let len = self.store.len();
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

    /// Keeps the selection valid after the record count changes.
    fn clamp_selection(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.state.select(None);
        } else {
            match self.state.selected() {
                Some(i) if i < len => {}
                _ => self.state.select(Some(len - 1)),
            }
        }
    }

    fn notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.modal = Some(Modal::Notice {
            level,
            message: message.into(),
        });
    }

    /// Parses and submits the form. Any validation failure becomes an error
    /// modal and the form stays open with its contents intact.
    fn submit_form(&mut self) {
        let Some(form) = self.form.clone() else {
            return;
        };

        let date = match parse_date(form.date.trim()) {
            Ok(date) => date,
            Err(e) => {
                self.notice(NoticeLevel::Error, e.to_string());
                return;
            }
        };

        let amount: f64 = match form.amount.trim().parse() {
            Ok(amount) => amount,
            Err(_) => {
                self.notice(NoticeLevel::Error, "Please enter a valid amount!");
                return;
            }
        };

        match self
            .store
            .add(date, form.category, amount, form.description.trim())
        {
            Ok(_) => {
                self.form = None;
                self.clamp_selection();
                if self.state.selected().is_none() {
                    self.state.select(Some(0));
                }
                self.notice(NoticeLevel::Success, "Expense added successfully!");
            }
            Err(e) => self.notice(NoticeLevel::Error, format!("{e:#}")),
        }
    }

    fn delete_confirmed(&mut self, id: Uuid) {
        match self.store.remove(id) {
            Ok(true) => {
                self.clamp_selection();
                self.notice(NoticeLevel::Info, "Expense deleted.");
            }
            Ok(false) => self.clamp_selection(),
            Err(e) => self.notice(NoticeLevel::Error, format!("{e:#}")),
        }
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

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };

        // Modals swallow input until dismissed.
        if let Some(modal) = app.modal.clone() {
            match modal {
                Modal::Notice { .. } => {
                    app.modal = None;
                }
                Modal::ConfirmDelete { id } => match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                        app.modal = None;
                        app.delete_confirmed(id);
                    }
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        app.modal = None;
                    }
                    _ => {}
                },
            }
            continue;
        }

        // Form mode.
        if app.form.is_some() {
            match key.code {
                KeyCode::Esc => app.form = None,
                KeyCode::Enter => app.submit_form(),
                KeyCode::Tab | KeyCode::Down => {
                    if let Some(form) = app.form.as_mut() {
                        form.field = form.field.next();
                    }
                }
                KeyCode::BackTab | KeyCode::Up => {
                    if let Some(form) = app.form.as_mut() {
                        form.field = form.field.previous();
                    }
                }
                KeyCode::Left => {
                    if let Some(form) = app.form.as_mut() {
                        if form.field == FormField::Category {
                            form.category = form.category.previous();
                        }
                    }
                }
                KeyCode::Right => {
                    if let Some(form) = app.form.as_mut() {
                        if form.field == FormField::Category {
                            form.category = form.category.next();
                        }
                    }
                }
                KeyCode::Backspace => {
                    if let Some(form) = app.form.as_mut() {
                        form.pop_char();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(form) = app.form.as_mut() {
                        form.push_char(c);
                    }
                }
                _ => {}
            }
            continue;
        }

        // Normal mode.
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Tab | KeyCode::Char('p') => app.current_page = app.current_page.next(),
            KeyCode::Char('a') => app.form = Some(ExpenseForm::new()),
            KeyCode::Char('d') | KeyCode::Delete => {
                if app.current_page == Page::Ledger {
                    if let Some(id) = app.selected_expense().map(|e| e.id) {
                        app.modal = Some(Modal::ConfirmDelete { id });
                    }
                }
            }
            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            KeyCode::Home => {
                if !app.store.is_empty() {
                    app.state.select(Some(0));
                }
            }
            KeyCode::End => {
                if !app.store.is_empty() {
                    app.state.select(Some(app.store.len() - 1));
                }
            }
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Summary panel
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Ledger => render_table(f, chunks[1], app),
        Page::Chart => render_chart(f, chunks[1], app),
    }

    render_summary(f, chunks[2], app);
    render_status_bar(f, chunks[3], app);

    if app.form.is_some() {
        render_form(f, app);
    }

    if app.modal.is_some() {
        render_modal(f, app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Ledger, Page::Chart];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Records: {}", app.store.len()),
        Style::default().fg(Color::White),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Expense Ledger "),
    );

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Date", "Category", "Amount", "Description"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let sorted = app.store.sorted_desc();
    let rows = sorted.iter().map(|expense| {
        let color = category_color(expense.category);

        let cells = vec![
            Cell::from(expense.formatted_date()),
            Cell::from(expense.category.as_str()).style(Style::default().fg(color)),
            Cell::from(expense.formatted_amount()).style(Style::default().fg(Color::Red)),
            Cell::from(truncate(&expense.description, 40)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(15),
            Constraint::Length(12),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Expense List (most recent first) "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let summary = summarize(app.store.records());

    let mut spans = vec![Span::styled(
        format!(" Total Expenses: {} ", format_amount(summary.total)),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )];

    if let Some(highest) = summary.highest() {
        spans.push(Span::raw("|  "));
        spans.push(Span::styled(
            format!(
                "Highest Category: {} ({})",
                highest.category,
                format_amount(highest.total)
            ),
            Style::default().fg(Color::Cyan),
        ));
    }

    let panel = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Summary "),
    );

    f.render_widget(panel, area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let summary = summarize(app.store.records());
    let slices = pie_slices(&summary.by_category);

    if slices.is_empty() {
        let empty = Paragraph::new("\n  No expenses to display in pie chart.").block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Expense Distribution by Category "),
        );
        f.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_pie(f, chunks[0], &slices);
    render_legend(f, chunks[1], &slices);
}

fn render_pie(f: &mut Frame, area: Rect, slices: &[PieSlice]) {
    let slices = slices.to_vec();

    let chart = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Expense Distribution by Category "),
        )
        // A little horizontal slack keeps the disc round-ish in cell space.
        .x_bounds([-1.4, 1.4])
        .y_bounds([-1.1, 1.1])
        .paint(move |ctx| {
            for slice in &slices {
                let color = category_color(slice.category);

                // Fill the slice with a fan of radial lines, from the top of
                // the circle going clockwise.
                let steps = (120.0 * slice.fraction).ceil().max(2.0) as u32;
                for i in 0..=steps {
                    let t = slice.start_angle
                        + (slice.end_angle - slice.start_angle) * f64::from(i)
                            / f64::from(steps);
                    let screen = std::f64::consts::FRAC_PI_2 - t;
                    ctx.draw(&canvas::Line {
                        x1: 0.0,
                        y1: 0.0,
                        x2: screen.cos(),
                        y2: screen.sin(),
                        color,
                    });
                }
            }
        });

    f.render_widget(chart, area);
}

fn render_legend(f: &mut Frame, area: Rect, slices: &[PieSlice]) {
    let mut lines = vec![Line::from("")];

    for slice in slices {
        let color = category_color(slice.category);
        lines.push(Line::from(vec![
            Span::styled("  ██ ", Style::default().fg(color)),
            Span::styled(
                format!("{:<13}", slice.category.as_str()),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("{:>10}  ", format_amount(slice.total)),
                Style::default().fg(Color::Red),
            ),
            Span::styled(
                format!("{:>5.1}%", slice.percentage()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let legend = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Legend "),
    );

    f.render_widget(legend, area);
}

fn render_form(f: &mut Frame, app: &App) {
    let Some(form) = &app.form else {
        return;
    };

    let area = centered_rect(52, 12, f.size());
    f.render_widget(Clear, area);

    let field_line = |field: FormField, value: String| {
        let active = form.field == field;
        let marker = if active { "→ " } else { "  " };
        let label_style = if active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };

        Line::from(vec![
            Span::styled(marker.to_string(), Style::default().fg(Color::Green)),
            Span::styled(format!("{:<12}", field.label()), label_style),
            Span::raw(value),
            Span::styled(
                if active { "▏" } else { "" },
                Style::default().fg(Color::Yellow),
            ),
        ])
    };

    let content = vec![
        Line::from(""),
        field_line(FormField::Date, form.date.clone()),
        Line::from(""),
        field_line(
            FormField::Category,
            format!("◄ {} ►", form.category.as_str()),
        ),
        Line::from(""),
        field_line(FormField::Amount, form.amount.clone()),
        Line::from(""),
        field_line(FormField::Description, form.description.clone()),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" Add | "),
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(" Next Field | "),
            Span::styled("◄/►", Style::default().fg(Color::Yellow)),
            Span::raw(" Category | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" Cancel"),
        ]),
    ];

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Add New Expense "),
    );

    f.render_widget(dialog, area);
}

fn render_modal(f: &mut Frame, app: &App) {
    let Some(modal) = &app.modal else {
        return;
    };

    let (title, message, color) = match modal {
        Modal::Notice { level, message } => match level {
            NoticeLevel::Success => (" Success ", message.clone(), Color::Green),
            NoticeLevel::Error => (" Error ", message.clone(), Color::Red),
            NoticeLevel::Info => (" Info ", message.clone(), Color::Cyan),
        },
        Modal::ConfirmDelete { .. } => (
            " Confirm ",
            "Are you sure you want to delete this expense?".to_string(),
            Color::Yellow,
        ),
    };

    let width = (message.len() as u16 + 6).clamp(30, f.size().width.saturating_sub(4));
    let area = centered_rect(width, 5, f.size());
    f.render_widget(Clear, area);

    let hint = match modal {
        Modal::Notice { .. } => "Press any key to continue",
        Modal::ConfirmDelete { .. } => "y confirm | n cancel",
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("  {hint}"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title),
    );

    f.render_widget(dialog, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.store.len();

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("a", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Add | "));
    status_spans.push(Span::styled("d", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Delete | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Chart | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Food => Color::Red,
        Category::Transport => Color::Blue,
        Category::Entertainment => Color::Magenta,
        Category::Bills => Color::Yellow,
        Category::Shopping => Color::Green,
        Category::Other => Color::Gray,
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
