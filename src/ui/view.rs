//! Rendering for the list viewer.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::app::{AppState, DeleteConfirmState, StatusKind};
use super::editor::EditorState;

const HELP_KEY_WIDTH: usize = 10;
const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);

pub fn render(frame: &mut Frame, app: &AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    render_list(frame, app, chunks[0]);
    render_status(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);

    if let Some(editor) = app.editor.as_ref() {
        render_editor_modal(frame, area, editor);
    }
    if let Some(confirm) = app.delete_confirm.as_ref() {
        render_delete_modal(frame, area, confirm);
    }
    if app.show_help {
        render_help_modal(frame, area);
    }
}

fn render_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let items: Vec<ListItem> = app
        .store
        .tasks()
        .iter()
        .map(|task| {
            let marker_style = if task.completed {
                Style::default().fg(COLOR_SUCCESS)
            } else {
                Style::default().fg(COLOR_MUTED)
            };
            let title_style = if task.completed {
                Style::default()
                    .fg(COLOR_MUTED)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(COLOR_TEXT)
            };
            ListItem::new(Line::from(vec![
                Span::styled(task.marker(), marker_style),
                Span::raw(" "),
                Span::styled(task.title.clone(), title_style),
            ]))
        })
        .collect();

    let title = format!(" Tasks ({}) ", app.store.len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER_LIST))
                .title(title),
        )
        .highlight_style(
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status(frame: &mut Frame, app: &AppState, area: Rect) {
    let Some((kind, message)) = app.status_message.as_ref() else {
        return;
    };
    let style = match kind {
        StatusKind::Error => Style::default().fg(COLOR_ERROR),
        StatusKind::Info => Style::default().fg(COLOR_INFO),
    };
    frame.render_widget(Paragraph::new(message.as_str()).style(style), area);
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let unsaved = if app.unsaved { "*" } else { "" };
    let hints = format!(
        "{unsaved} a add  e edit  d delete  space done  s save  r reload  ? help  q quit"
    );
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(COLOR_MUTED)),
        area,
    );
}

fn render_editor_modal(frame: &mut Frame, area: Rect, editor: &EditorState) {
    let modal = centered_rect(area, 50, 5);
    frame.render_widget(Clear, modal);

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{}█", editor.value()), Style::default().fg(COLOR_TEXT)),
    ])];
    if let Some(error) = editor.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(COLOR_ERROR),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter submit, Esc cancel",
            Style::default().fg(COLOR_MUTED),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_ACCENT))
            .title(format!(" {} ", editor.title())),
    );
    frame.render_widget(paragraph, modal);
}

fn render_delete_modal(frame: &mut Frame, area: Rect, confirm: &DeleteConfirmState) {
    let modal = centered_rect(area, 50, 5);
    frame.render_widget(Clear, modal);

    let lines = vec![
        Line::from(Span::styled(
            format!("Delete task: {}?", confirm.title),
            Style::default().fg(COLOR_TEXT),
        )),
        Line::from(Span::styled(
            "y delete, n keep",
            Style::default().fg(COLOR_MUTED),
        )),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_ERROR))
            .title(" Delete Task "),
    );
    frame.render_widget(paragraph, modal);
}

fn render_help_modal(frame: &mut Frame, area: Rect) {
    let entries = [
        ("j / down", "next task"),
        ("k / up", "previous task"),
        ("a", "add a task"),
        ("e", "edit the selected title"),
        ("d", "delete the selected task"),
        ("space / c", "mark the selected task done"),
        ("s", "save to the tasks file"),
        ("r", "reload from the tasks file"),
        ("q / esc", "quit (saves when autosave is on)"),
        ("ctrl+c", "quit without saving"),
    ];

    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{key:>HELP_KEY_WIDTH$}  "),
                    Style::default().fg(COLOR_ACCENT),
                ),
                Span::styled(*action, Style::default().fg(COLOR_TEXT)),
            ])
        })
        .collect();

    let height = lines.len() as u16 + 2;
    let modal = centered_rect(area, 46, height);
    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER_LIST))
                .title(" Help "),
        ),
        modal,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
