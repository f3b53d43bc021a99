use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};
use tracing::warn;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::TasklistError;
use crate::models::{Filter, Outcome, TaskId};
use crate::session::Session;
use crate::storage::KeyValueStore;
use crate::view::clock::created_label;
use crate::view::{filtered_tasks, BoardView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Input,
}

/// Board state on top of a session: selection, input focus, and the time
/// last delivered by the clock.
pub struct BoardApp<S> {
    session: Session<S>,
    mode: Mode,
    list_state: ListState,
    now: DateTime<Local>,
    status: Option<String>,
    should_quit: bool,
}

impl<S: KeyValueStore> BoardApp<S> {
    pub fn new(session: Session<S>, now: DateTime<Local>) -> Self {
        let mut app = Self {
            session,
            mode: Mode::Normal,
            list_state: ListState::default(),
            now,
            status: None,
            should_quit: false,
        };
        app.clamp_selection();
        app
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Advance the clock and pick up tasks saved by other processes.
    pub fn on_tick(&mut self, now: DateTime<Local>) {
        self.now = now;
        if let Err(e) = self.session.refresh() {
            warn!(error = %e, "could not refresh tasks");
        }
        self.clamp_selection();
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        let visible = filtered_tasks(self.session.tasks(), self.session.filter());
        self.list_state
            .selected()
            .and_then(|i| visible.get(i))
            .map(|t| t.id)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<(), TasklistError> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Input => self.handle_input_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<(), TasklistError> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a') | KeyCode::Char('i') => self.mode = Mode::Input,
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => {
                if let Some(id) = self.selected_task_id() {
                    let outcome = self.session.toggle(id)?;
                    self.after_mutation(&outcome);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_task_id() {
                    let outcome = self.session.delete(id)?;
                    self.after_mutation(&outcome);
                }
            }
            KeyCode::Char('1') => self.set_filter(Filter::All),
            KeyCode::Char('2') => self.set_filter(Filter::Pending),
            KeyCode::Char('3') => self.set_filter(Filter::Completed),
            KeyCode::Tab => self.set_filter(self.session.filter().next()),
            KeyCode::BackTab => self.set_filter(self.session.filter().prev()),
            _ => {}
        }
        Ok(())
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Result<(), TasklistError> {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                let outcome = self.session.submit_draft()?;
                self.after_mutation(&outcome);
            }
            KeyCode::Backspace => {
                self.session.draft_mut().pop();
            }
            KeyCode::Char(c) => self.session.draft_mut().push(c),
            _ => {}
        }
        Ok(())
    }

    fn set_filter(&mut self, filter: Filter) {
        self.session.set_filter(filter);
        self.list_state.select(Some(0));
        self.clamp_selection();
    }

    fn after_mutation(&mut self, outcome: &Outcome) {
        self.status = match outcome {
            Outcome::Added(t) => Some(format!("Added: {}", t.text)),
            Outcome::Toggled { completed: true, .. } => Some("Marked completed".to_string()),
            Outcome::Toggled { completed: false, .. } => Some("Marked pending".to_string()),
            Outcome::Deleted(t) => Some(format!("Deleted: {}", t.text)),
            Outcome::Ignored(_) => self.status.take(),
        };
        self.clamp_selection();
    }

    fn visible_len(&self) -> usize {
        filtered_tasks(self.session.tasks(), self.session.filter()).len()
    }

    fn clamp_selection(&mut self) {
        match self.visible_len() {
            0 => self.list_state.select(None),
            len => {
                let i = self.list_state.selected().unwrap_or(0).min(len - 1);
                self.list_state.select(Some(i));
            }
        }
    }

    fn select_next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let i = self
            .list_state
            .selected()
            .map_or(0, |i| if i + 1 >= len { 0 } else { i + 1 });
        self.list_state.select(Some(i));
    }

    fn select_prev(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let i = self
            .list_state
            .selected()
            .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
        self.list_state.select(Some(i));
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let view = self.session.view(&self.now);
        let progress_height = if view.progress.is_some() { 3 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(progress_height),
                Constraint::Length(1),
            ])
            .split(frame.area());

        render_header(frame, chunks[0], &view);
        render_input(frame, chunks[1], self.session.draft(), self.mode);
        render_tabs(frame, chunks[2], &view);
        render_tasks(frame, chunks[3], &view, &mut self.list_state);
        if let Some(pct) = view.progress {
            render_progress(frame, chunks[4], pct);
        }
        render_footer(frame, chunks[5], self.mode, self.status.as_deref());
    }
}

fn render_header(frame: &mut Frame, area: Rect, view: &BoardView<'_>) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(24)])
        .split(inner);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Task Manager",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            view.summary.headline(),
            Style::default().fg(Color::Gray),
        )),
    ]);
    frame.render_widget(title, cols[0]);

    let clock = Paragraph::new(vec![
        Line::from(Span::styled(
            view.clock.time.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            view.clock.date.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(clock, cols[1]);
}

fn render_input(frame: &mut Frame, area: Rect, draft: &str, mode: Mode) {
    let focused = mode == Mode::Input;
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    // one column stays free for the cursor
    let room = usize::from(area.width.saturating_sub(2)).saturating_sub(usize::from(focused));
    let shown = visible_tail(draft, room);
    let content = if draft.is_empty() && !focused {
        Span::styled("Add a new task...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(shown)
    };
    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title("New task"),
    );
    frame.render_widget(input, area);

    if focused {
        let x = usize::from(area.x)
            .saturating_add(1)
            .saturating_add(shown.width());
        let x = u16::try_from(x)
            .unwrap_or(u16::MAX)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y.saturating_add(1)));
    }
}

/// The longest suffix of `text` that fits in `width` terminal columns.
fn visible_tail(text: &str, width: usize) -> &str {
    let mut used = 0usize;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        used = used.saturating_add(ch.width().unwrap_or(0));
        if used > width {
            break;
        }
        start = idx;
    }
    &text[start..]
}

fn render_tabs(frame: &mut Frame, area: Rect, view: &BoardView<'_>) {
    let tabs = Tabs::new(view.bucket_labels())
        .block(Block::default().borders(Borders::ALL))
        .select(view.filter.index())
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_tasks(frame: &mut Frame, area: Rect, view: &BoardView<'_>, state: &mut ListState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view.filter.heading());

    if view.tasks.is_empty() {
        let (title, hint) = view.filter.empty_state();
        let empty = Paragraph::new(vec![
            Line::from(Span::styled(title, Style::default().fg(Color::Gray))),
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = view
        .tasks
        .iter()
        .map(|t| {
            let (mark, text_style) = if t.completed {
                (
                    Span::styled("[x] ", Style::default().fg(Color::Green)),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                (Span::raw("[ ] "), Style::default())
            };
            ListItem::new(Line::from(vec![
                mark,
                Span::styled(t.text.clone(), text_style),
                Span::styled(
                    format!("  {}", created_label(t)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, state);
}

fn render_progress(frame: &mut Frame, area: Rect, pct: u8) {
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Overall Progress"))
        .gauge_style(Style::default().fg(Color::Blue))
        .percent(u16::from(pct));
    frame.render_widget(gauge, area);
}

fn render_footer(frame: &mut Frame, area: Rect, mode: Mode, status: Option<&str>) {
    let help = match mode {
        Mode::Normal => "a add  j/k move  space toggle  d delete  1/2/3 filter  q quit",
        Mode::Input => "Enter add  Esc done  Ctrl-C quit",
    };
    let mut spans = vec![Span::styled(help, Style::default().fg(Color::DarkGray))];
    if let Some(msg) = status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(msg.to_string(), Style::default().fg(Color::Cyan)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
