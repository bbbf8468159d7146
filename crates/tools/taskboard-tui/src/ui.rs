use crate::app::{App, InputMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};
use taskboard_sync::{HealthStatus, TaskListState};

pub fn draw(frame: &mut Frame, app: &App, view: &TaskListState, status: &HealthStatus) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Status indicator
            Constraint::Length(2), // Header
            Constraint::Length(3), // Input
            Constraint::Min(3),    // Task list
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    draw_status(frame, status, chunks[0]);
    draw_header(frame, chunks[1]);
    draw_input(frame, app, view, chunks[2]);
    draw_tasks(frame, app, view, chunks[3]);
    draw_help(frame, app, chunks[4]);
}

fn draw_status(frame: &mut Frame, status: &HealthStatus, area: ratatui::layout::Rect) {
    let color = match status {
        HealthStatus::Online { .. } => Color::Green,
        HealthStatus::Offline => Color::Red,
        HealthStatus::Checking => Color::Yellow,
    };
    let indicator = Paragraph::new(Line::from(vec![
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(status.to_string(), Style::default().fg(color)),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(indicator, area);
}

fn draw_header(frame: &mut Frame, area: ratatui::layout::Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Task Manager",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Full-stack app with load balancing",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn draw_input(frame: &mut Frame, app: &App, view: &TaskListState, area: ratatui::layout::Rect) {
    let editing = app.mode == InputMode::Editing;
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = if view.input.is_empty() && !editing {
        Span::styled("Enter a new task...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(view.input.as_str())
    };

    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .title(" New task ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style),
    );
    frame.render_widget(input, area);

    if editing {
        let cursor_x = area.x + 1 + view.input.chars().count() as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_tasks(frame: &mut Frame, app: &App, view: &TaskListState, area: ratatui::layout::Rect) {
    let block = Block::default()
        .title(format!(" Tasks ({}) ", view.tasks.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    if view.loading {
        let loading = Paragraph::new("Loading tasks...")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    if view.tasks.is_empty() {
        let empty = Paragraph::new("No tasks yet. Add one above!")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = view
        .tasks
        .iter()
        .map(|task| {
            let (checkbox, title_style) = if task.completed {
                (
                    "[x] ",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ] ", Style::default())
            };
            ListItem::new(Line::from(vec![
                Span::raw(checkbox),
                Span::styled(task.title.as_str(), title_style),
            ]))
        })
        .collect();

    let highlight = if app.mode == InputMode::Browsing {
        Style::default()
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let list = List::new(items).block(block).highlight_style(highlight);
    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_help(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let hints: &[(&str, &str)] = match app.mode {
        InputMode::Editing => &[("Enter", "add"), ("Esc", "browse"), ("Ctrl-C", "quit")],
        InputMode::Browsing => &[
            ("↑/↓", "select"),
            ("Space", "toggle"),
            ("d", "delete"),
            ("r", "reload"),
            ("Esc", "edit"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::raw(format!(" {}  ", label)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
