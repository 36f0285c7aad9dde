use crate::member::Member;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
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
use std::collections::HashMap;
use std::io;

const PAGE_SIZE: usize = 20;

/// Read-only table view over a snapshot of the member list.
pub struct MemberBrowser {
    pub members: Vec<Member>,
    pub state: TableState,
    pub show_detail: bool,
}

impl MemberBrowser {
    pub fn new(members: Vec<Member>) -> Self {
        let mut state = TableState::default();
        if !members.is_empty() {
            state.select(Some(0));
        }

        Self {
            members,
            state,
            show_detail: false,
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_member(&self) -> Option<&Member> {
        self.state.selected().and_then(|i| self.members.get(i))
    }

    /// Member count per membership type, most common first.
    pub fn plan_summary(&self) -> Vec<(String, usize)> {
        let mut summary: HashMap<&str, usize> = HashMap::new();
        for member in &self.members {
            *summary.entry(member.membership_type()).or_insert(0) += 1;
        }

        let mut result: Vec<_> = summary
            .into_iter()
            .map(|(plan, count)| (plan.to_string(), count))
            .collect();

        result.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        result
    }

    pub fn next(&mut self) {
        let len = self.members.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.members.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.members.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + PAGE_SIZE).min(len - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.members.is_empty() {
            return;
        }
        let i = self
            .state
            .selected()
            .map(|i| i.saturating_sub(PAGE_SIZE))
            .unwrap_or(0);
        self.state.select(Some(i));
    }

    pub fn first(&mut self) {
        if !self.members.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        if !self.members.is_empty() {
            self.state.select(Some(self.members.len() - 1));
        }
    }
}

/// Open the browser on the alternate screen until 'q' or Esc.
pub fn run_browser(members: &[Member]) -> Result<()> {
    let mut browser = MemberBrowser::new(members.to_vec());

    // Guards drop in reverse order: leave the alternate screen, then raw mode
    enable_raw_mode()?;
    let _raw_mode = OnDrop::new(|| {
        let _ = disable_raw_mode();
    });

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _alternate_screen = OnDrop::new(|| {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    });

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut browser);
    terminal.show_cursor()?;

    res?;
    Ok(())
}

/// Runs `restore` when dropped, including on an early `?` return.
struct OnDrop<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> OnDrop<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    browser: &mut MemberBrowser,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, browser))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => browser.toggle_detail(),
                KeyCode::Down | KeyCode::Char('j') => browser.next(),
                KeyCode::Up | KeyCode::Char('k') => browser.previous(),
                KeyCode::PageDown => browser.page_down(),
                KeyCode::PageUp => browser.page_up(),
                KeyCode::Home => browser.first(),
                KeyCode::End => browser.last(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, browser: &mut MemberBrowser) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Members
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], browser);

    if browser.show_detail {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        render_table(f, content_chunks[0], browser);
        render_detail_panel(f, content_chunks[1], browser);
    } else {
        render_table(f, chunks[1], browser);
    }

    render_status_bar(f, chunks[2], browser);
}

fn render_header(f: &mut Frame, area: Rect, browser: &MemberBrowser) {
    let mut spans = vec![
        Span::styled(
            "Gym Members",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Total: {}", browser.members.len()),
            Style::default().fg(Color::White),
        ),
    ];

    for (plan, count) in browser.plan_summary() {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!("{}: {}", plan, count),
            Style::default().fg(Color::Green),
        ));
    }

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, browser: &mut MemberBrowser) {
    let header_cells = ["Member ID", "Name", "Age", "Phone", "Membership", "Reg. Date"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = browser.members.iter().map(|member| {
        Row::new(vec![
            Cell::from(member.id().to_string()),
            Cell::from(member.name().to_string()),
            Cell::from(member.age().to_string()),
            Cell::from(member.phone().to_string()),
            Cell::from(member.membership_type().to_string()),
            Cell::from(member.registration_date().to_string()),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(20),
            Constraint::Length(10),
            Constraint::Length(15),
            Constraint::Length(15),
            Constraint::Length(15),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Members "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut browser.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, browser: &MemberBrowser) {
    let selected = browser.state.selected().map(|i| i + 1).unwrap_or(0);

    let status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, browser.members.len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Details | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Nav | "),
        Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)),
        Span::raw(" Fast | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Back"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_detail_panel(f: &mut Frame, area: Rect, browser: &MemberBrowser) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Member Details ");

    let Some(member) = browser.selected_member() else {
        f.render_widget(Paragraph::new("No member selected").block(block), area);
        return;
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let fields = [
        ("  Member ID: ", member.id().to_string()),
        ("  Name: ", member.name().to_string()),
        ("  Age: ", member.age().to_string()),
        ("  Phone: ", member.phone().to_string()),
        ("  Membership: ", member.membership_type().to_string()),
        ("  Registered: ", member.registration_date().to_string()),
    ];

    let mut content = vec![Line::from("")];
    for (name, value) in fields {
        content.push(Line::from(vec![Span::styled(name, label), Span::raw(value)]));
        content.push(Line::from(""));
    }
    content.push(Line::from(vec![Span::styled(
        "  Press Enter to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )]));

    f.render_widget(Paragraph::new(content).block(block), area);
}
