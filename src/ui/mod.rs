mod input;
mod spinner;
mod theme;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::keymap::KeyBinding;
use crate::state::State;

/// Pure function of state: banner, editable buffer, contextual help.
pub fn render(frame: &mut Frame, state: &State) {
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(theme::BG_BASE)), area);

    if let Some(farewell) = &state.farewell {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(format!(" {}", farewell), Style::default().fg(theme::SUCCESS)))),
            area,
        );
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // top padding
            Constraint::Length(1), // banner
            Constraint::Length(4), // input box
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(area);

    render_banner(frame, state, layout[1]);
    input::render_input(frame, state, layout[2]);
    render_help(frame, state, layout[3]);
}

fn render_banner(frame: &mut Frame, state: &State, area: Rect) {
    let line = if let Some(err) = &state.err {
        Line::from(Span::styled(format!(" ERROR: {}", err), Style::default().fg(theme::ERROR)))
    } else if !state.is_streaming {
        Line::from(Span::styled(" Model response:", Style::default().fg(theme::TEXT)))
    } else {
        Line::from(vec![
            Span::styled(format!(" {} ", spinner::spinner(state.spinner_frame)), Style::default().fg(theme::ACCENT)),
            Span::styled("Generating response...", Style::default().fg(theme::TEXT)),
            Span::styled(format!(" ({}s)", state.remaining_secs), Style::default().fg(theme::TEXT_MUTED)),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help(frame: &mut Frame, state: &State, area: Rect) {
    // Only bindings reachable in the current state are shown: commit needs a
    // reviewable non-empty buffer, regenerate needs an ended stream.
    let mut bindings: Vec<&KeyBinding> = Vec::with_capacity(3);
    if !state.is_streaming {
        if !state.commit_message().is_empty() {
            bindings.push(&state.keymap.commit);
        }
        bindings.push(&state.keymap.regen);
    }
    bindings.push(&state.keymap.quit);

    let mut spans = vec![Span::styled(" ", Style::default())];
    for (i, binding) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(theme::BORDER)));
        }
        spans.push(Span::styled(binding.help_key, Style::default().fg(theme::TEXT_MUTED).bold()));
        spans.push(Span::styled(format!(" {}", binding.help_desc), Style::default().fg(theme::TEXT_MUTED)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
