use crate::collection::{numbered, TaskIntent};
use crate::draft::DraftTaskManager;
use crate::store::TaskStore;
use crate::task::{Task, TaskId};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Draft,
    EditTitle { id: TaskId, buffer: String },
}

#[derive(Debug)]
pub struct App<S> {
    pub store: S,
    pub draft: DraftTaskManager,
    pub mode: Mode,
    /// Index into the display-ordered list.
    pub selected: usize,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl<S: TaskStore> App<S> {
    pub fn new(store: S, draft: DraftTaskManager) -> Self {
        Self {
            store,
            draft,
            mode: Mode::Browse,
            selected: 0,
            status: None,
            should_quit: false,
        }
    }

    fn selected_task(&self) -> Option<Task> {
        numbered(self.store.tasks())
            .get(self.selected)
            .map(|row| row.task.clone())
    }

    fn clamp_selection(&mut self) {
        let len = self.store.tasks().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn send(&mut self, intent: TaskIntent) {
        let id = intent.id();
        match intent.dispatch(&mut self.store) {
            Ok(()) => self.status = None,
            Err(err) => {
                warn!(task_id = id, error = %err, "task update failed");
                self.status = Some(err.to_string());
            }
        }
        // Pinning moves the task, so keep the selection on it.
        if let Some(position) = numbered(self.store.tasks())
            .iter()
            .position(|row| row.task.id == id)
        {
            self.selected = position;
        }
        self.clamp_selection();
    }

    fn is_text_input(key: &KeyEvent) -> bool {
        !key.modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode.clone() {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Draft => self.handle_draft_key(key),
            Mode::EditTitle { id, buffer } => self.handle_title_key(key, id, buffer),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        let selected = self.selected_task();

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('n') => self.mode = Mode::Draft,
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.store.tasks().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('p') => {
                if let Some(task) = selected {
                    self.send(TaskIntent::SetPinned {
                        id: task.id,
                        is_pinned: !task.is_pinned,
                    });
                }
            }
            KeyCode::Char('f') => {
                if let Some(task) = selected {
                    self.send(TaskIntent::SetFinished {
                        id: task.id,
                        is_finished: !task.is_finished,
                    });
                }
            }
            KeyCode::Char('d') => {
                if let Some(task) = selected {
                    self.send(TaskIntent::Delete { id: task.id });
                }
            }
            KeyCode::Char('e') => {
                if let Some(task) = selected {
                    self.mode = Mode::EditTitle {
                        id: task.id,
                        buffer: task.title,
                    };
                }
            }
            _ => {}
        }
    }

    fn handle_draft_key(&mut self, key: KeyEvent) {
        let draft = self.draft.draft().clone();
        match key.code {
            KeyCode::Esc => {
                self.draft.reset();
                self.mode = Mode::Browse;
            }
            KeyCode::Enter => {
                let store = &mut self.store;
                let created = self.draft.commit(|fields| store.create_task(fields));
                match created {
                    Ok(id) => {
                        debug!(task_id = id, "committed draft");
                        self.status = None;
                    }
                    Err(err) => {
                        warn!(error = %err, "creating task failed");
                        self.status = Some(err.to_string());
                    }
                }
                self.mode = Mode::Browse;
            }
            KeyCode::Tab => self.draft.set_pinned(!draft.is_pinned),
            KeyCode::Char('f') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.draft.set_finished(!draft.is_finished);
            }
            KeyCode::Char(c) if Self::is_text_input(&key) => {
                let mut title = draft.title;
                title.push(c);
                self.draft.set_title(title);
            }
            KeyCode::Backspace => {
                let mut title = draft.title;
                if title.pop().is_some() {
                    self.draft.set_title(title);
                }
            }
            _ => {}
        }
    }

    fn handle_title_key(&mut self, key: KeyEvent, id: TaskId, mut buffer: String) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Enter => {
                self.mode = Mode::Browse;
                self.send(TaskIntent::ChangeTitle { id, title: buffer });
            }
            KeyCode::Char(c) if Self::is_text_input(&key) => {
                buffer.push(c);
                self.mode = Mode::EditTitle { id, buffer };
            }
            KeyCode::Backspace => {
                buffer.pop();
                self.mode = Mode::EditTitle { id, buffer };
            }
            _ => {}
        }
    }
}

pub fn run_app<B: Backend, S: TaskStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
            if app.should_quit {
                return Ok(());
            }
        }
    }
}

pub fn render<S: TaskStore>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let rows = numbered(app.store.tasks());
    let tasks_block = Block::default()
        .title("Tasks")
        .borders(Borders::ALL)
        .border_style(if app.mode == Mode::Draft {
            Style::default()
        } else {
            Style::default().fg(Color::Cyan)
        });

    if rows.is_empty() {
        f.render_widget(
            Paragraph::new("No tasks yet. Press n to write one.").block(tasks_block),
            chunks[0],
        );
    } else {
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let title = match &app.mode {
                    Mode::EditTitle { id, buffer } if *id == row.task.id => format!("{buffer}_"),
                    _ => row.task.title.clone(),
                };
                let title_style = if row.task.is_finished {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:>3}. ", row.position)),
                    Span::raw(if row.task.is_finished { "[x] " } else { "[ ] " }),
                    Span::styled(
                        if row.task.is_pinned { "* " } else { "  " },
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::styled(title, title_style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(tasks_block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(app.selected));
        f.render_stateful_widget(list, chunks[0], &mut state);
    }

    let draft = app.draft.draft();
    let draft_line = Line::from(vec![
        Span::raw(if draft.is_finished { "[x] " } else { "[ ] " }),
        Span::styled(
            if draft.is_pinned { "* " } else { "  " },
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(if app.mode == Mode::Draft {
            format!("{}_", draft.title)
        } else {
            draft.title.clone()
        }),
    ]);
    let draft_block = Block::default()
        .title("New task")
        .borders(Borders::ALL)
        .border_style(if app.mode == Mode::Draft {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });
    f.render_widget(Paragraph::new(draft_line).block(draft_block), chunks[1]);

    let footer = match (&app.status, &app.mode) {
        (Some(message), _) => Span::styled(message.clone(), Style::default().fg(Color::Red)),
        (None, Mode::Browse) => Span::raw("n new  e edit  p pin  f finish  d delete  q quit"),
        (None, Mode::Draft) => Span::raw("Enter save  Tab pin  Ctrl-f finish  Esc discard"),
        (None, Mode::EditTitle { .. }) => Span::raw("Enter save  Esc cancel"),
    };
    f.render_widget(Paragraph::new(Line::from(footer)), chunks[2]);
}
