//! Browser view: header, breadcrumb, active list, and key hints.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState as RatatuiListState, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::view::{ListBody, ListView, RowTarget, list_view};
use crate::common::truncate_with_ellipsis;
use crate::overlays::render_utils::{InputHint, hint_line};
use crate::render::spinner;
use crate::state::TuiState;

pub fn render_browser(tui: &TuiState, frame: &mut Frame, area: Rect) {
    let view = list_view(&tui.browser, tui.role());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // List
            Constraint::Length(1), // Hints
        ])
        .split(area);

    render_header(tui, &view, frame, chunks[0]);
    render_list(tui, &view, frame, chunks[1]);

    let hints = footer_hints(&view, tui.browser.cursor.depth() > 0);
    frame.render_widget(
        Paragraph::new(hint_line(&hints, Color::Cyan)),
        Rect::new(chunks[2].x + 1, chunks[2].y, chunks[2].width.saturating_sub(2), 1),
    );
}

fn render_header(tui: &TuiState, view: &ListView, frame: &mut Frame, area: Rect) {
    let user = tui
        .session
        .as_ref()
        .map(|s| s.label())
        .unwrap_or_default();
    let user_width = u16::try_from(user.width()).unwrap_or(u16::MAX);
    let crumb_width = usize::from(area.width.saturating_sub(user_width.saturating_add(3)));

    let crumb = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            truncate_with_ellipsis(&view.breadcrumb, crumb_width),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(crumb), area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{user} "),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Right),
        area,
    );
}

fn render_list(tui: &TuiState, view: &ListView, frame: &mut Frame, area: Rect) {
    let title = match &tui.status {
        Some(status) => format!(" {} · {status} ", view.title),
        None => format!(" {} ", view.title),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(title, Style::default().fg(Color::White)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &view.body {
        ListBody::Loading(text) => {
            render_placeholder(
                frame,
                inner,
                vec![Line::from(Span::styled(
                    format!("{} {text}", spinner(tui.spinner_frame)),
                    Style::default().fg(Color::Yellow),
                ))],
            );
        }
        ListBody::Error(text) => {
            render_placeholder(
                frame,
                inner,
                vec![
                    Line::from(Span::styled(text.as_str(), Style::default().fg(Color::Red))),
                    Line::from(Span::styled(
                        "Press r to retry",
                        Style::default().fg(Color::DarkGray),
                    )),
                ],
            );
        }
        ListBody::Empty { title, cta } => {
            let mut lines = vec![Line::from(Span::styled(
                title.as_str(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            ))];
            lines.push(Line::from(Span::styled(
                cta.as_str(),
                Style::default().fg(Color::DarkGray),
            )));
            if let Some(add) = &view.add {
                lines.push(Line::from(vec![
                    Span::styled("a", Style::default().fg(Color::Cyan)),
                    Span::styled(
                        format!(" {}", add.to_lowercase()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            }
            render_placeholder(frame, inner, lines);
        }
        ListBody::Rows(rows) => {
            let width = inner.width.saturating_sub(4) as usize;
            let items: Vec<ListItem> = rows
                .iter()
                .map(|row| {
                    let marker = match row.target {
                        RowTarget::Drill(_) => "›",
                        RowTarget::OpenFile(_) => "▤",
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{marker} "), Style::default().fg(Color::DarkGray)),
                        Span::raw(truncate_with_ellipsis(&row.label, width)),
                    ]))
                })
                .collect();

            let list = List::new(items).highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );
            let mut state = RatatuiListState::default().with_selected(Some(tui.browser.selected));
            frame.render_stateful_widget(list, inner, &mut state);
        }
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, lines: Vec<Line<'_>>) {
    let top = area.height.saturating_sub(lines.len() as u16) / 2;
    let centered = Rect::new(
        area.x,
        area.y + top,
        area.width,
        area.height.saturating_sub(top),
    );
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
}

/// Key hints for the footer. Admin keys only show up when the view offers them.
fn footer_hints(view: &ListView, can_go_back: bool) -> Vec<InputHint<'static>> {
    let rows = matches!(view.body, ListBody::Rows(_));
    let notes = matches!(
        &view.body,
        ListBody::Rows(rows) if rows.iter().any(|r| matches!(r.target, RowTarget::OpenFile(_)))
    );

    let mut hints = vec![InputHint::new("↑↓", "move")];
    if rows {
        hints.push(InputHint::new("Enter", "open"));
    }
    if notes {
        hints.push(InputHint::new("s", "save"));
    }
    if can_go_back {
        hints.push(InputHint::new("Esc", "back"));
    }
    if view.add.is_some() {
        hints.push(InputHint::new("a", "add"));
    }
    if rows && view.add.is_some() {
        hints.push(InputHint::new("d", "delete"));
    }
    hints.push(InputHint::new("r", "refresh"));
    hints.push(InputHint::new("L", "logout"));
    hints.push(InputHint::new("q", "quit"));
    hints
}
