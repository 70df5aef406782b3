use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::state::State;
use super::theme;

pub fn render_input(frame: &mut Frame, state: &State, area: Rect) {
    let inner_area = Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), area.height);

    let is_empty = state.input.is_empty();
    let border_color = if state.is_streaming { theme::TEXT_MUTED } else { theme::BORDER_FOCUS };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme::BG_INPUT))
        .title(Span::styled(
            if state.is_streaming { " Streaming... " } else { " Commit message " },
            Style::default().fg(if state.is_streaming { theme::TEXT_MUTED } else { theme::ACCENT }),
        ));

    let content_area = block.inner(inner_area);
    frame.render_widget(block, inner_area);

    // Input content, ghost completion, or placeholder
    let content = if is_empty && !state.is_streaming && state.ghost_suggestion().is_none() {
        vec![Line::from(Span::styled(
            " Write your commit message...",
            Style::default().fg(theme::TEXT_MUTED).italic(),
        ))]
    } else {
        let mut lines: Vec<Line> = state
            .input
            .split('\n')
            .map(|line| {
                Line::from(vec![
                    Span::styled(" ", Style::default()),
                    Span::styled(line.to_string(), Style::default().fg(theme::TEXT)),
                ])
            })
            .collect();

        // Ghost remainder of the closest prior suggestion, accepted with Tab
        if state.input_cursor == state.input.len()
            && let Some(ghost) = state.ghost_suggestion()
            && let Some(last) = lines.last_mut()
        {
            last.spans.push(Span::styled(
                ghost[state.input.len()..].to_string(),
                Style::default().fg(theme::TEXT_MUTED).italic(),
            ));
        }
        lines
    };

    frame.render_widget(Paragraph::new(content).style(Style::default().bg(theme::BG_INPUT)), content_area);

    // Cursor positioning (column is a display width, not a byte offset)
    if !state.is_streaming {
        let before_cursor = &state.input[..state.input_cursor];
        let line_num = before_cursor.matches('\n').count();
        let line_start = before_cursor.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let col = before_cursor[line_start..].width();

        frame.set_cursor_position(Position::new(
            content_area.x + col as u16 + 1,
            content_area.y + line_num as u16,
        ));
    }
}
