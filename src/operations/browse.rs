use crate::models::transaction::TransactionEntry;
use crate::store::Store;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::{Alignment, Color, Constraint, Direction, Layout, Modifier, Rect, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use std::cmp::{max, min, Ordering};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortField {
    Category,
    Date,
    Amount,
}

impl SortField {
    fn next(self) -> Self {
        match self {
            SortField::Category => SortField::Date,
            SortField::Date => SortField::Amount,
            SortField::Amount => SortField::Category,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SortField::Category => "category",
            SortField::Date => "date",
            SortField::Amount => "amount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    List,
    Search,
    ConfirmQuit,
}

/// Viewer state over a snapshot taken once at launch. Search and sort
/// only rearrange the displayed rows; the store is never touched.
struct ViewerState {
    mode: Mode,

    entries: Vec<TransactionEntry>,
    filtered_indices: Vec<usize>,

    table_state: TableState,

    query: String,
    sort_field: SortField,

    input_buffer: String,

    last_page_size: usize,
}

impl ViewerState {
    fn new(entries: Vec<TransactionEntry>) -> Self {
        let mut state = Self {
            mode: Mode::List,
            entries,
            filtered_indices: Vec::new(),
            table_state: TableState::default(),
            query: String::new(),
            sort_field: SortField::Category,
            input_buffer: String::new(),
            last_page_size: 10,
        };
        state.recompute();
        state
    }

    fn recompute(&mut self) {
        self.filtered_indices = (0..self.entries.len())
            .filter(|&i| matches_query(&self.entries[i], &self.query))
            .collect();

        let entries = &self.entries;
        let field = self.sort_field;
        self.filtered_indices
            .sort_by(|&a, &b| compare_by(field, &entries[a], &entries[b]));

        if self.filtered_indices.is_empty() {
            self.table_state.select(None);
        } else {
            let selected = match self.table_state.selected() {
                Some(sel) => min(sel, self.filtered_indices.len().saturating_sub(1)),
                None => 0,
            };
            self.table_state.select(Some(selected));
        }
    }

    fn move_selection(&mut self, delta: i32) {
        if self.filtered_indices.is_empty() {
            self.table_state.select(None);
            return;
        }

        let current = self.table_state.selected().unwrap_or(0) as i32;
        let max_index = self.filtered_indices.len().saturating_sub(1) as i32;
        let next = (current + delta).clamp(0, max_index) as usize;
        self.table_state.select(Some(next));
    }

    fn page_up(&mut self) {
        let page = max(1, self.last_page_size) as i32;
        self.move_selection(-page);
    }

    fn page_down(&mut self) {
        let page = max(1, self.last_page_size) as i32;
        self.move_selection(page);
    }

    fn start_search(&mut self) {
        self.input_buffer = self.query.clone();
        self.mode = Mode::Search;
    }

    fn cancel_search(&mut self) {
        self.input_buffer.clear();
        self.mode = Mode::List;
    }

    fn commit_search(&mut self) {
        self.query = self.input_buffer.trim().to_string();
        self.input_buffer.clear();
        self.mode = Mode::List;
        self.recompute();
    }

    fn clear_search(&mut self) {
        self.query.clear();
        self.recompute();
    }

    fn cycle_sort(&mut self) {
        self.sort_field = self.sort_field.next();
        self.recompute();
    }
}

/// Case-insensitive substring match of the query against the
/// stringified form of one flattened row. An empty query matches all.
fn matches_query(entry: &TransactionEntry, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let haystack = format!("{} {} {}", entry.category, entry.amount, entry.date).to_lowercase();
    haystack.contains(&query.to_lowercase())
}

/// Ascending comparison on the chosen field: category and date compare
/// as strings, amount numerically.
fn compare_by(field: SortField, a: &TransactionEntry, b: &TransactionEntry) -> Ordering {
    match field {
        SortField::Category => a.category.cmp(&b.category),
        SortField::Date => a.date.cmp(&b.date),
        SortField::Amount => a.amount.cmp(&b.amount),
    }
}

pub fn run_browse(store: &Store) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Failed to enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Failed to enter alternate screen: {}", e))?;

    let result = (|| {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)
            .map_err(|e| format!("Failed to initialize terminal: {}", e))?;

        let mut state = ViewerState::new(store.flatten());

        loop {
            terminal
                .draw(|frame| {
                    let size = frame.area();
                    let layout = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([
                            Constraint::Length(3),
                            Constraint::Min(5),
                            Constraint::Length(2),
                        ])
                        .split(size);

                    render_header(frame, layout[0], &state);
                    render_table(frame, layout[1], &mut state);
                    render_footer(frame, layout[2], &state);

                    if state.mode == Mode::Search {
                        render_search_modal(frame, size, &state);
                    }
                    if state.mode == Mode::ConfirmQuit {
                        render_confirm_modal(frame, size);
                    }
                })
                .map_err(|e| format!("Failed to draw terminal UI: {}", e))?;

            if event::poll(std::time::Duration::from_millis(200))
                .map_err(|e| format!("Failed to poll input: {}", e))?
            {
                let event = event::read().map_err(|e| format!("Failed to read input: {}", e))?;
                if let Event::Key(key) = event {
                    if handle_key(&mut state, key) {
                        break;
                    }
                }
            }
        }

        Ok(())
    })();

    disable_raw_mode().map_err(|e| format!("Failed to disable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)
        .map_err(|e| format!("Failed to leave alternate screen: {}", e))?;

    result
}

fn handle_key(state: &mut ViewerState, key: KeyEvent) -> bool {
    // Many terminals emit both a Press and a Release event. Only act on Press/Repeat.
    if key.kind == KeyEventKind::Release {
        return false;
    }

    match state.mode {
        Mode::List => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => state.mode = Mode::ConfirmQuit,
            KeyCode::Up => state.move_selection(-1),
            KeyCode::Down => state.move_selection(1),
            KeyCode::PageUp => state.page_up(),
            KeyCode::PageDown => state.page_down(),
            KeyCode::Home => state.table_state.select(Some(0)),
            KeyCode::End => {
                if !state.filtered_indices.is_empty() {
                    state
                        .table_state
                        .select(Some(state.filtered_indices.len().saturating_sub(1)));
                }
            }
            KeyCode::Char('/') => state.start_search(),
            KeyCode::Char('s') => state.cycle_sort(),
            KeyCode::Char('x') => state.clear_search(),
            _ => {}
        },
        Mode::Search => {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
            {
                state.cancel_search();
                return false;
            }

            match key.code {
                KeyCode::Esc => state.cancel_search(),
                KeyCode::Enter => state.commit_search(),
                KeyCode::Backspace => {
                    state.input_buffer.pop();
                }
                KeyCode::Char(ch) => {
                    state.input_buffer.push(ch);
                }
                _ => {}
            }
        }
        Mode::ConfirmQuit => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => return true,
            KeyCode::Char('n') | KeyCode::Esc => state.mode = Mode::List,
            _ => {}
        },
    }

    false
}

fn render_header(frame: &mut ratatui::Frame, area: Rect, state: &ViewerState) {
    let query = if state.query.is_empty() {
        "(none)".to_string()
    } else {
        state.query.clone()
    };

    let line = Line::from(vec![
        Span::styled(
            "Transactions",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(format!("Sort: {}", state.sort_field.label())),
        Span::raw("  |  "),
        Span::raw(format!("Search: {}", query)),
        Span::raw("  |  "),
        Span::raw(format!("Rows: {}", state.filtered_indices.len())),
    ]);

    let block = Block::default().borders(Borders::ALL);
    let paragraph = Paragraph::new(line).block(block).alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut ratatui::Frame, area: Rect, state: &ViewerState) {
    let hint = match state.mode {
        Mode::List => {
            "↑/↓ move  PgUp/PgDn page  / search  s sort  x clear search  q/Esc close"
        }
        Mode::Search => "Type, Enter apply, Esc cancel",
        Mode::ConfirmQuit => "y close viewer, n stay",
    };

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(hint)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_table(frame: &mut ratatui::Frame, area: Rect, state: &mut ViewerState) {
    let block = Block::default().title("Transactions").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new([
        Cell::from("No.").style(bold),
        Cell::from("Category").style(bold),
        Cell::from("Amount").style(bold),
        Cell::from("Date").style(bold),
    ])
    .style(Style::default().fg(Color::White));

    let rows = state
        .filtered_indices
        .iter()
        .enumerate()
        .map(|(row, &idx)| {
            let entry = &state.entries[idx];
            Row::new([
                Cell::from((row + 1).to_string()),
                Cell::from(entry.category.clone()),
                Cell::from(entry.amount.to_string()),
                Cell::from(entry.date.clone()),
            ])
        });

    // Estimate a page size from the table height, leaving room for the
    // header row.
    state.last_page_size = inner.height.saturating_sub(2) as usize;
    if state.last_page_size == 0 {
        state.last_page_size = 1;
    }

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(40),
        Constraint::Length(14),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("➤ ")
        .column_spacing(1);

    frame.render_stateful_widget(table, inner, &mut state.table_state);

    if state.filtered_indices.is_empty() {
        let empty = Paragraph::new("No transactions match the current search")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
    }
}

fn render_search_modal(frame: &mut ratatui::Frame, area: Rect, state: &ViewerState) {
    let popup_area = centered_rect(80, 30, area);
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(vec![Span::styled(
            "Search transactions",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("Matches any part of a row, case-insensitive (empty clears)"),
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("> {}", state.input_buffer),
            Style::default().fg(Color::Yellow),
        )]),
    ];

    let block = Block::default().borders(Borders::ALL).title("Search");
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, popup_area);
}

fn render_confirm_modal(frame: &mut ratatui::Frame, area: Rect) {
    let popup_area = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(vec![Span::styled(
            "Do you really want to close the viewer?",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("y: yes    n: no"),
    ];

    let block = Block::default().borders(Borders::ALL).title("Quit?");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup_area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn entry(category: &str, amount: &str, date: &str) -> TransactionEntry {
        TransactionEntry {
            category: category.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            date: date.to_string(),
        }
    }

    fn fixture() -> Vec<TransactionEntry> {
        vec![
            entry("Food", "12.5", "2024-01-01"),
            entry("Transport", "5", "2024-01-02"),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let entries = fixture();
        assert!(matches_query(&entries[0], "food"));
        assert!(!matches_query(&entries[1], "food"));
        assert!(matches_query(&entries[1], "2024-01-02"));
        assert!(matches_query(&entries[0], "12.5"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        for e in fixture() {
            assert!(matches_query(&e, ""));
        }
    }

    #[test]
    fn test_viewer_filters_to_matching_rows() {
        let mut state = ViewerState::new(fixture());
        state.query = "food".to_string();
        state.recompute();

        assert_eq!(state.filtered_indices, vec![0]);
    }

    #[test]
    fn test_sort_by_amount_is_numeric_ascending() {
        let entries = vec![
            entry("Food", "12.5", "2024-01-01"),
            entry("Transport", "5", "2024-01-02"),
        ];
        let mut state = ViewerState::new(entries);
        state.sort_field = SortField::Amount;
        state.recompute();

        // 5 < 12.5 numerically even though "12.5" < "5" lexically.
        assert_eq!(state.filtered_indices, vec![1, 0]);
    }

    #[test]
    fn test_sort_by_category_and_date_is_lexical() {
        let entries = vec![
            entry("Transport", "5", "2024-01-02"),
            entry("Food", "12.5", "2024-01-01"),
        ];
        let mut state = ViewerState::new(entries);

        state.sort_field = SortField::Category;
        state.recompute();
        assert_eq!(state.filtered_indices, vec![1, 0]);

        state.sort_field = SortField::Date;
        state.recompute();
        assert_eq!(state.filtered_indices, vec![1, 0]);
    }
}
