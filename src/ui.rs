//! Terminal drawing of the query screen

use ratatui::{prelude::*, widgets::*};

use crate::constants::{
    APP_SUBTITLE, APP_TITLE, APP_VERSION, EMPTY_RESULT_PLACEHOLDER, INPUT_PLACEHOLDER,
};
use crate::messages::RenderState;
use crate::table::{ResultView, TableGrid};

/// Widest a table column is allowed to get
const MAX_COLUMN_WIDTH: usize = 40;

pub fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(3), // Query input + submit
            Constraint::Min(5),    // Result
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, chunks[0]);
    draw_query_bar(f, state, chunks[1]);
    draw_result(f, state, chunks[2]);
    draw_status_bar(f, state, chunks[3]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(APP_TITLE, Style::default().fg(Color::Cyan).bold())),
        Line::from(Span::styled(APP_SUBTITLE, Style::default().fg(Color::Gray))),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_query_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let label = format!("[ {} ]", state.submit_label());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(label.chars().count() as u16 + 2),
        ])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Question ");

    let input = if state.query_text.is_empty() {
        Paragraph::new(Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray)))
    } else {
        Paragraph::new(state.query_text.as_str())
    };
    f.render_widget(input.block(block), chunks[0]);

    // Cursor
    let cursor_chars = state
        .query_text
        .get(..state.cursor_position)
        .map(|s| s.chars().count())
        .unwrap_or(0) as u16;
    let max_x = chunks[0].x + chunks[0].width.saturating_sub(2);
    let cursor_x = (chunks[0].x + cursor_chars + 1).min(max_x);
    f.set_cursor_position(Position::new(cursor_x, chunks[0].y + 1));

    let button_style = if state.is_submitting() {
        Style::default().fg(Color::DarkGray)
    } else if state.can_submit() {
        Style::default().fg(Color::Black).bg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let button = Paragraph::new(Span::styled(label, button_style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, chunks[1]);
}

fn draw_result(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut block = Block::default().borders(Borders::ALL).title(" Result ");
    if let Some(summary) = result_summary(state) {
        block = block.title_bottom(Line::from(summary).right_aligned());
    }

    let Some(result) = &state.last_result else {
        let hint = Paragraph::new(Span::styled(
            "Type a question and press Enter.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(hint, area);
        return;
    };

    match ResultView::from_result(result) {
        ResultView::Error(text) => {
            let p = Paragraph::new(text)
                .style(Style::default().fg(Color::Red))
                .block(block)
                .wrap(Wrap { trim: false });
            f.render_widget(p, area);
        }
        ResultView::Info(text) => {
            let p = Paragraph::new(text)
                .style(Style::default().fg(Color::Cyan))
                .block(block)
                .wrap(Wrap { trim: false });
            f.render_widget(p, area);
        }
        ResultView::Empty { question, sql } => {
            let inner = block.inner(area);
            f.render_widget(block, area);

            let mut lines = heading_lines(&question, sql.as_deref());
            lines.push(Line::from(EMPTY_RESULT_PLACEHOLDER));
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
        }
        ResultView::Table { question, sql, grid } => {
            let inner = block.inner(area);
            f.render_widget(block, area);

            let lines = heading_lines(&question, sql.as_deref());
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(lines.len() as u16), Constraint::Min(1)])
                .split(inner);

            f.render_widget(Paragraph::new(lines), chunks[0]);
            draw_table(f, &grid, state.result_scroll, chunks[1]);
        }
    }
}

fn heading_lines(question: &str, sql: Option<&str>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if !question.is_empty() {
        lines.push(Line::from(Span::styled(
            question.to_string(),
            Style::default().bold(),
        )));
    }
    if let Some(sql) = sql {
        lines.push(Line::from(Span::styled(
            format!("SQL: {}", sql),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }
    lines
}

fn draw_table(f: &mut Frame, grid: &TableGrid, scroll: usize, area: Rect) {
    let widths: Vec<Constraint> = grid
        .column_widths()
        .into_iter()
        .map(|w| Constraint::Length(w.clamp(1, MAX_COLUMN_WIDTH) as u16))
        .collect();

    let header = Row::new(grid.headers.iter().map(|h| Cell::from(h.as_str())))
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows = grid
        .rows
        .iter()
        .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.as_str()))));

    let table = Table::new(rows, widths).header(header).column_spacing(2);

    let offset = scroll.min(grid.rows.len().saturating_sub(1));
    let mut table_state = TableState::default().with_offset(offset);
    f.render_stateful_widget(table, area, &mut table_state);
}

/// "200 | 35ms | 14:03:22" for the last completed query
fn result_summary(state: &RenderState) -> Option<String> {
    let completed_at = state.completed_at?;
    let mut parts = Vec::new();
    if let Some(status) = state.last_status {
        parts.push(status.to_string());
    }
    parts.push(format!("{}ms", state.last_time_ms));
    parts.push(completed_at.format("%H:%M:%S").to_string());
    Some(format!(" {} ", parts.join(" | ")))
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_submitting() {
        format!(" Waiting for {} ... ", state.endpoint)
    } else {
        String::from(" Enter:search | Up/Down:scroll | Ctrl+U:clear | F1:help | Esc:quit ")
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = format!(
        r#"
 QUERYDESK {} - Keyboard Shortcuts

 QUESTION
   Enter              Search (disabled while processing)
   Left / Right       Move cursor
   Home / End         Start / end of line
   Ctrl+U             Clear question

 RESULTS
   Up / Down          Scroll rows
   PgUp / PgDn        Scroll a page

 GENERAL
   F1                 Toggle this help
   Esc / Ctrl+C       Quit

 Press any key to close...
"#,
        APP_VERSION
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
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
