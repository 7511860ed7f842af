//! Rendering.
//!
//! Pure view layer: reads `AppState`, draws widgets, mutates nothing.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Paragraph, Wrap};
use tuido_core::TodoList;

use crate::common::truncate_with_ellipsis;
use crate::overlays::Overlay;
use crate::screens::{
    DetailField, DetailPhase, DetailScreen, ListPhase, LoginField, LoginScreen, RegisterField,
    RegisterScreen, Screen, SubmitPhase, TodosScreen,
};
use crate::state::AppState;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(app: &AppState, frame: &mut Frame) {
    match app.active_screen() {
        Some(Screen::Login(screen)) => render_login(screen, app.spinner_frame, frame),
        Some(Screen::Register(screen)) => render_register(screen, app.spinner_frame, frame),
        Some(Screen::Todos(screen)) => render_todos(screen, &app.todos, app.spinner_frame, frame),
        Some(Screen::Detail(screen)) => render_detail(screen, app.spinner_frame, frame),
        None => {}
    }

    if let Some(overlay) = &app.overlay {
        render_overlay(overlay, frame);
    }
}

fn spinner(frame_count: usize) -> &'static str {
    SPINNER_FRAMES[frame_count % SPINNER_FRAMES.len()]
}

/// A centered rect of at most `width` x `height` inside `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![Span::styled(format!("{label:>12}: "), label_style)];
    spans.push(Span::raw(value));
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

fn hint_line(hints: &str) -> Line<'_> {
    Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
}

fn render_login(screen: &LoginScreen, frame_count: usize, frame: &mut Frame) {
    let area = centered(frame.area(), 60, 10);
    let masked = "*".repeat(screen.password.chars().count());

    let mut lines = Vec::new();
    if let Some(notice) = &screen.notice {
        lines.push(Line::from(Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Green),
        )));
    }
    lines.push(field_line(
        "Username",
        &screen.username,
        screen.focus == LoginField::Username && !screen.phase.is_submitting(),
    ));
    lines.push(field_line(
        "Password",
        &masked,
        screen.focus == LoginField::Password && !screen.phase.is_submitting(),
    ));
    lines.push(Line::default());
    if let SubmitPhase::Submitting { .. } = screen.phase {
        lines.push(Line::from(format!("{} Signing in…", spinner(frame_count))));
        lines.push(hint_line("esc cancel"));
    } else {
        lines.push(hint_line(
            "tab switch · enter sign in · ctrl+r register · esc quit",
        ));
    }

    let block = Block::bordered().title(" tuido · sign in ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_register(screen: &RegisterScreen, frame_count: usize, frame: &mut Frame) {
    let area = centered(frame.area(), 60, 11);
    let masked = "*".repeat(screen.password.chars().count());
    let submitting = screen.phase.is_submitting();

    let mut lines = vec![
        field_line(
            "Username",
            &screen.username,
            screen.focus == RegisterField::Username && !submitting,
        ),
        field_line(
            "Email",
            &screen.email,
            screen.focus == RegisterField::Email && !submitting,
        ),
        field_line(
            "Password",
            &masked,
            screen.focus == RegisterField::Password && !submitting,
        ),
        Line::default(),
    ];
    if submitting {
        lines.push(Line::from(format!(
            "{} Creating account…",
            spinner(frame_count)
        )));
        lines.push(hint_line("esc cancel"));
    } else {
        lines.push(hint_line("tab switch · enter create account · esc back"));
    }

    let block = Block::bordered().title(" tuido · register ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_todos(screen: &TodosScreen, todos: &TodoList, frame_count: usize, frame: &mut Frame) {
    let [list_area, footer_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    let block = Block::bordered().title(" tuido · todos ");

    match &screen.phase {
        ListPhase::Loading { .. } => {
            let text = format!("{} Loading todos…", spinner(frame_count));
            frame.render_widget(Paragraph::new(text).block(block), list_area);
        }
        ListPhase::Failed { error } => {
            let lines = vec![
                Line::from(Span::styled(
                    error.as_str(),
                    Style::default().fg(Color::Red),
                )),
                Line::default(),
                hint_line("r retry · q quit"),
            ];
            frame.render_widget(Paragraph::new(lines).block(block), list_area);
        }
        ListPhase::Ready => {
            if todos.is_empty() {
                frame.render_widget(Paragraph::new("No todos yet.").block(block), list_area);
            } else {
                let width = list_area.width.saturating_sub(4) as usize;
                let items: Vec<ListItem> = todos
                    .todos()
                    .iter()
                    .map(|todo| ListItem::new(truncate_with_ellipsis(&todo.title, width)))
                    .collect();
                let list = List::new(items)
                    .block(block)
                    .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                    .highlight_symbol("> ");
                let mut state = ListState::default();
                state.select(Some(screen.selected));
                frame.render_stateful_widget(list, list_area, &mut state);
            }
        }
    }

    frame.render_widget(
        Paragraph::new(hint_line("↑/↓ select · enter open · r reload · q quit")),
        footer_area,
    );
}

fn render_detail(screen: &DetailScreen, frame_count: usize, frame: &mut Frame) {
    let area = centered(frame.area(), 70, 12);
    let block = Block::bordered().title(" tuido · todo ");

    let lines = match &screen.phase {
        DetailPhase::Loading { .. } => vec![
            Line::from(format!("{} Loading…", spinner(frame_count))),
            Line::default(),
            hint_line("esc back"),
        ],
        DetailPhase::LoadFailed { error } => vec![
            Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            )),
            Line::default(),
            hint_line("r retry · esc back"),
        ],
        DetailPhase::Loaded | DetailPhase::Saving { .. } => {
            let saving = matches!(screen.phase, DetailPhase::Saving { .. });
            let mut lines = vec![
                field_line(
                    "Title",
                    &screen.title,
                    screen.focus == DetailField::Title && !saving,
                ),
                field_line(
                    "Description",
                    &screen.description,
                    screen.focus == DetailField::Description && !saving,
                ),
                Line::default(),
            ];
            if saving {
                lines.push(Line::from(format!("{} Saving…", spinner(frame_count))));
                lines.push(hint_line("esc cancel"));
            } else {
                lines.push(hint_line("tab switch · ctrl+s save · esc back (discards edits)"));
            }
            lines
        }
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
}

fn render_overlay(overlay: &Overlay, frame: &mut Frame) {
    let (title, message, color) = match overlay {
        Overlay::Alert { title, message } => (title.as_str(), message.as_str(), Color::Red),
        Overlay::Saved { message } => ("Saved", message.as_str(), Color::Green),
    };

    let area = centered(frame.area(), 50, 7);
    frame.render_widget(Clear, area);
    let block = Block::bordered()
        .title(format!(" {title} "))
        .border_style(Style::default().fg(color));
    let lines = vec![
        Line::from(message),
        Line::default(),
        hint_line("enter dismiss"),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}
