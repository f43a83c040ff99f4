// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use shelf_app::{
    DEFAULT_PLACEHOLDER_LABEL, DisplayEntry, DisplaySequence, Snapshot, ViewCommand, ViewEvent,
    ViewState, current_group, section_title,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::macros::format_description;

const HALF_PAGE_ROWS: isize = 10;
const FULL_PAGE_ROWS: isize = 20;
const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(4);

static EMPTY_SEQUENCE: DisplaySequence = DisplaySequence::new();

pub trait AppRuntime {
    fn load_snapshot(&mut self) -> Result<Snapshot>;

    fn placeholder_label(&self) -> &str {
        DEFAULT_PLACEHOLDER_LABEL
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Default)]
struct ViewData {
    snapshot: Option<Snapshot>,
    placeholder: String,
    help_visible: bool,
    list_state: ListState,
    status_token: u64,
}

impl ViewData {
    fn sequence(&self) -> &DisplaySequence {
        self.snapshot
            .as_ref()
            .map_or(&EMPTY_SEQUENCE, |snapshot| &snapshot.sequence)
    }
}

pub fn run_app<R: AppRuntime>(state: &mut ViewState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_view_data(state, runtime, &mut view_data) {
        emit_status(
            state,
            &mut view_data,
            &internal_tx,
            format!("load failed: {error:#}; press r to retry"),
        );
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &mut view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut ViewState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(ViewCommand::ClearStatus, view_data.sequence());
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_DELAY);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut ViewState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(ViewCommand::SetStatus(message.into()), view_data.sequence());
    bump_status_token(view_data, internal_tx);
}

fn bump_status_token(view_data: &mut ViewData, internal_tx: &Sender<InternalEvent>) {
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn refresh_view_data<R: AppRuntime>(
    state: &mut ViewState,
    runtime: &mut R,
    view_data: &mut ViewData,
) -> Result<()> {
    let snapshot = runtime.load_snapshot()?;
    view_data.placeholder = runtime.placeholder_label().to_owned();
    state.fit_to(&snapshot.sequence);
    view_data.snapshot = Some(snapshot);
    sync_list_state(state, view_data);
    Ok(())
}

fn sync_list_state(state: &ViewState, view_data: &mut ViewData) {
    if view_data.sequence().is_empty() {
        view_data.list_state.select(None);
        *view_data.list_state.offset_mut() = 0;
    } else {
        view_data.list_state.select(Some(state.cursor));
    }
}

fn handle_key_event<R: AppRuntime>(
    state: &mut ViewState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if is_quit_key(key) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    match key.code {
        KeyCode::Char('?') => {
            view_data.help_visible = true;
            return false;
        }
        KeyCode::Char('r') if key.modifiers == KeyModifiers::NONE => {
            reload(state, runtime, view_data, internal_tx);
            return false;
        }
        _ => {}
    }

    if let Some(command) = view_command_for_key(key) {
        apply_view_command(state, view_data, internal_tx, command);
    }
    false
}

fn is_quit_key(key: KeyEvent) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => true,
        (KeyCode::Char('c'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => true,
        (KeyCode::Char('q'), KeyModifiers::NONE) => true,
        _ => false,
    }
}

fn view_command_for_key(key: KeyEvent) -> Option<ViewCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('d'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(ViewCommand::MoveCursor(HALF_PAGE_ROWS))
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(ViewCommand::MoveCursor(-HALF_PAGE_ROWS))
        }
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(ViewCommand::MoveCursor(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(ViewCommand::MoveCursor(-1)),
        (KeyCode::PageDown, _) => Some(ViewCommand::MoveCursor(FULL_PAGE_ROWS)),
        (KeyCode::PageUp, _) => Some(ViewCommand::MoveCursor(-FULL_PAGE_ROWS)),
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Some(ViewCommand::JumpFirst),
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Some(ViewCommand::JumpLast),
        (KeyCode::Char('n'), KeyModifiers::NONE) | (KeyCode::Tab, _) => {
            Some(ViewCommand::NextGroup)
        }
        _ => None,
    }
}

fn apply_view_command(
    state: &mut ViewState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: ViewCommand,
) {
    let pin_to_top = command == ViewCommand::NextGroup;
    let events = state.dispatch(command, view_data.sequence());
    for event in events {
        match event {
            // Section jumps land with the header as the first visible row.
            ViewEvent::CursorMoved(index) if pin_to_top => {
                *view_data.list_state.offset_mut() = index;
            }
            ViewEvent::CursorMoved(_) => {}
            ViewEvent::StatusUpdated(_) => bump_status_token(view_data, internal_tx),
            ViewEvent::StatusCleared => {}
        }
    }
    sync_list_state(state, view_data);
}

fn reload<R: AppRuntime>(
    state: &mut ViewState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    match refresh_view_data(state, runtime, view_data) {
        Ok(()) => {
            let summary = view_data
                .snapshot
                .as_ref()
                .map(Snapshot::summary)
                .unwrap_or_default();
            emit_status(state, view_data, internal_tx, format!("reloaded: {summary}"));
        }
        Err(error) => emit_status(
            state,
            view_data,
            internal_tx,
            format!("reload failed: {error:#}; keeping previous data"),
        ),
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &ViewState, view_data: &mut ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new(title_text(view_data))
        .block(Block::default().title("shelf").borders(Borders::ALL));
    frame.render_widget(title, layout[0]);

    render_list(frame, layout[1], state, view_data);

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if view_data.help_visible {
        let area = centered_rect(60, 40, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_list(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &ViewState,
    view_data: &mut ViewData,
) {
    let items = view_data
        .sequence()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let mut style = match entry {
                DisplayEntry::Header(_) => Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                DisplayEntry::Record(_) => Style::default(),
            };
            if index == state.cursor {
                style = style.bg(Color::DarkGray);
            }
            ListItem::new(entry.render_line(&view_data.placeholder)).style(style)
        })
        .collect::<Vec<_>>();

    let list = List::new(items).block(
        Block::default()
            .title(list_title(state, view_data))
            .borders(Borders::ALL),
    );
    frame.render_stateful_widget(list, area, &mut view_data.list_state);
}

fn title_text(view_data: &ViewData) -> String {
    let Some(snapshot) = &view_data.snapshot else {
        return "no data loaded".to_owned();
    };
    let loaded_at = snapshot
        .fetched_at
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_else(|_| "unknown time".to_owned());
    format!("{} | loaded {loaded_at}", snapshot.summary())
}

fn list_title(state: &ViewState, view_data: &ViewData) -> String {
    let sequence = view_data.sequence();
    if sequence.is_empty() {
        return "no records".to_owned();
    }
    let total = sequence.group_count();
    match current_group(sequence, state.cursor) {
        Some((header_index, key)) => {
            let ordinal = sequence
                .iter()
                .take(header_index + 1)
                .filter(|entry| entry.is_header())
                .count();
            format!("{} ({ordinal}/{total})", section_title(key))
        }
        None => format!("{total} sections"),
    }
}

fn status_text(state: &ViewState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }

    let default = "j/k g/G ctrl+d/u pgup/pgdn | n next section | r reload | ? help | q quit";
    match &state.status_line {
        Some(status) => format!("{status} | {default}"),
        None => default.to_owned(),
    }
}

fn help_overlay_text() -> &'static str {
    "move: j/k or up/down | ctrl+d/u half page | pgup/pgdn page\n\
jump: g/G or home/end first/last | n or tab next section\n\
data: r reload (keeps previous data on failure)\n\
global: ? help | esc close help | q, ctrl+q or ctrl+c quit"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
