use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::app::{App, DisplayItem, InputField, InputMode};
use crate::format;
use crate::models::{Priority, Task, TaskList};
use crate::projection::is_overdue;

fn list_icon(list: TaskList) -> &'static str {
    match list {
        TaskList::Reminders => "≡",
        TaskList::Today => "◷",
        TaskList::Scheduled => "▦",
        TaskList::Flagged => "⚑",
        TaskList::Completed => "✔",
    }
}

fn list_color(list: TaskList) -> Color {
    match list {
        TaskList::Reminders | TaskList::Today => Color::Blue,
        TaskList::Scheduled => Color::Red,
        TaskList::Flagged => Color::LightRed,
        TaskList::Completed => Color::Gray,
    }
}

fn priority_badge(priority: Priority) -> &'static str {
    match priority {
        Priority::None => "",
        Priority::Low => "!",
        Priority::Medium => "!!",
        Priority::High => "!!!",
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::None => Color::Gray,
        Priority::Low => Color::Blue,
        Priority::Medium => Color::LightRed,
        Priority::High => Color::Red,
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let now = Local::now();
    app.sync(now);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // Sidebar
            Constraint::Min(30),    // Tasks
            Constraint::Length(36), // Detail
        ])
        .split(rows[0]);

    render_sidebar(f, app, columns[0], now);
    render_tasks(f, app, columns[1], now);
    render_detail(f, app, columns[2], now);
    render_help(f, app, rows[1]);

    if app.input_mode == InputMode::Editing || app.input_mode == InputMode::Adding {
        render_input(f, app);
    }
}

fn render_sidebar(f: &mut Frame, app: &App, area: Rect, now: DateTime<Local>) {
    let counts = app.store.task_counts(now);
    let selected = app.store.selected_view();
    let items: Vec<ListItem> = TaskList::ALL
        .into_iter()
        .enumerate()
        .map(|(i, list)| {
            let count = counts.get(&list).copied().unwrap_or(0);
            let mut style = Style::default().fg(list_color(list));
            if list == selected {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", i + 1)),
                Span::styled(format!("{} {:<10}", list_icon(list), list.label()), style),
                Span::raw(format!("{:>3}", count)),
            ]))
        })
        .collect();

    let sidebar = List::new(items).block(Block::default().borders(Borders::ALL).title("Lists"));
    f.render_widget(sidebar, area);
}

fn render_tasks(f: &mut Frame, app: &mut App, area: Rect, now: DateTime<Local>) {
    let view = app.store.selected_view();
    let title = if app.store.search_query().is_empty() {
        format!("{} {}", list_icon(view), view.label())
    } else {
        format!("{} {} - search: {}", list_icon(view), view.label(), app.store.search_query())
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if app.display_items.is_empty() {
        let empty = Paragraph::new("No Tasks\n\nPress 'a' to add a new reminder")
            .style(Style::default().fg(Color::Gray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = app
        .display_items
        .iter()
        .map(|item| match item {
            DisplayItem::DateHeader(label, count) => Row::new(vec![
                Cell::from(""),
                Cell::from(format!("{} ({})", label, count)),
                Cell::from(""),
                Cell::from(""),
            ])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            DisplayItem::Task(t) => task_row(t, now),
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(16),
        Constraint::Length(20),
        Constraint::Length(4),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["", "Title", "Due", ""])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn task_row(t: &Task, now: DateTime<Local>) -> Row<'static> {
    let check = if t.is_completed() { "●" } else { "○" };
    let mut title_style = Style::default();
    if t.is_completed() {
        title_style = title_style.fg(Color::Gray).add_modifier(Modifier::CROSSED_OUT);
    }
    let due_style = if is_overdue(t, now) {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Gray)
    };
    Row::new(vec![
        Cell::from(check),
        Cell::from(t.title.clone()).style(title_style),
        Cell::from(format::when(t, now)).style(due_style),
        Cell::from(priority_badge(t.priority)).style(Style::default().fg(priority_color(t.priority))),
    ])
}

fn render_detail(f: &mut Frame, app: &App, area: Rect, now: DateTime<Local>) {
    let block = Block::default().borders(Borders::ALL).title("Reminder");
    let Some(t) = app.selected_task() else {
        f.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let label = Style::default().fg(Color::Gray);
    let mut lines = vec![
        Line::from(Span::styled(t.title.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
    ];
    if !t.notes.is_empty() {
        lines.push(Line::from(t.notes.clone()));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![Span::styled("Date      ", label), Span::raw(format::due_date(t))]));
    lines.push(Line::from(vec![Span::styled("Time      ", label), Span::raw(format::due_time(t))]));
    lines.push(Line::from(vec![
        Span::styled("Priority  ", label),
        Span::styled(t.priority.label(), Style::default().fg(priority_color(t.priority))),
    ]));
    lines.push(Line::from(vec![Span::styled("List      ", label), Span::raw(t.list.label())]));
    if is_overdue(t, now) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " ⚠ This reminder is overdue ",
            Style::default().fg(Color::White).bg(Color::Red),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Created   ", label),
        Span::raw(t.created_at().format("%d/%m/%y %H:%M").to_string()),
    ]));
    if let Some(done) = t.completion_time() {
        lines.push(Line::from(vec![
            Span::styled("Completed ", label),
            Span::styled(done.format("%d/%m/%y %H:%M").to_string(), Style::default().fg(Color::Green)),
        ]));
    }

    let detail = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(detail, area);
}

fn render_help(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.input_mode {
        InputMode::Normal => "q: Quit | Tab/1-5: List | a: Add | e: Title | n: Notes | p: Priority | Space: Done | d: Del | /: Search | X: Clear Done",
        InputMode::Editing => "Enter: Save | Esc: Cancel",
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
        InputMode::Searching => "Type to filter | Enter: Keep | Esc: Clear",
    };
    let text = match (&app.message, app.input_mode) {
        (Some(msg), _) => Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red))),
        (None, InputMode::Searching) => Line::from(format!("/{}", app.input_buffer)),
        (None, _) => Line::from(help_text),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

fn render_input(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 3, f.area());
    f.render_widget(Clear, area);

    let title = match app.input_mode {
        InputMode::Adding => match app.add_state.step {
            0 => "New Reminder: Title",
            1 => "New Reminder: Notes (Optional)",
            2 => "New Reminder: Due dd/mm/yy HH:MM (Optional)",
            3 => "New Reminder: Priority none/low/medium/high",
            _ => "New Reminder",
        },
        InputMode::Editing => match app.input_field {
            InputField::Title => "Edit Title",
            InputField::Notes => "Edit Notes",
            InputField::None => "Edit",
        },
        _ => "",
    };

    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let margin = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(margin),
            Constraint::Length(height),
            Constraint::Length(margin),
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
