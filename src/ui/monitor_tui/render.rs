use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};

use super::app::MonitorApp;
use super::widgets::{rate_sparkline, temp_color, visible_history};
use crate::core::system_monitor::DashboardState;

/// Main render function. `state` is borrowed from a held read guard.
pub fn render_ui(frame: &mut Frame, state: &DashboardState, app: &MonitorApp) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35), // Network
            Constraint::Min(5),         // Processes + temperatures
            Constraint::Length(1),      // Footer
        ])
        .split(area);

    render_network_section(frame, chunks[0], state);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);

    render_processes_section(frame, bottom[0], state, app);
    render_temperatures_section(frame, bottom[1], state);
    render_footer(frame, chunks[2]);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_network_section(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let net = &state.network;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let recv = visible_history(&net.history, rows[0].width, true);
    let sent = visible_history(&net.history, rows[1].width, false);

    frame.render_widget(
        rate_sparkline(
            format!("{} │{}", net.recv_total_title, net.recv_rate_title),
            &recv,
            Color::Cyan,
        ),
        rows[0],
    );
    frame.render_widget(
        rate_sparkline(
            format!("{} │{}", net.sent_total_title, net.sent_rate_title),
            &sent,
            Color::LightYellow,
        ),
        rows[1],
    );
}

fn render_processes_section(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    app: &MonitorApp,
) {
    let procs = &state.processes;
    let mode_str = if procs.is_grouped() {
        "Grouped"
    } else {
        "All"
    };

    let block = Block::default()
        .title(format!(" Processes ({}) ", mode_str))
        .borders(Borders::ALL);

    let header = Row::new(
        procs
            .header
            .iter()
            .map(|h| Cell::from(h.as_str()).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .height(1);

    let rows: Vec<Row> = procs
        .rows
        .iter()
        .map(|fields| Row::new(fields.iter().map(|f| Cell::from(f.as_str()))))
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(block)
    .column_spacing(2)
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let mut table_state = TableState::default();
    if !procs.rows.is_empty() {
        table_state.select(Some(app.selected_row.min(procs.rows.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_temperatures_section(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let temps = &state.temperatures;
    let block = Block::default()
        .title(format!(" Temperatures (°{}) ", temps.mode().unit_letter()))
        .borders(Borders::ALL);

    let label_width = area.width.saturating_sub(7) as usize;
    let lines: Vec<Line> = if temps.rows.is_empty() {
        vec![Line::from("No temperature sensors detected")]
    } else {
        temps
            .rows
            .iter()
            .map(|row| {
                let label: String = row.label.chars().take(label_width).collect();
                Line::from(vec![
                    Span::raw(format!("{:<width$}", label, width = label_width)),
                    Span::styled(
                        row.display.clone(),
                        Style::default().fg(temp_color(row.alert)),
                    ),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let help = " q: Quit │ ?: Help │ c/m/p: Sort │ Tab: Group │ dd: Kill ";
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = r#"
    sysdash - Help

    Keyboard Shortcuts:
    ─────────────────────────────────────
    q / Esc     Quit the application
    ?           Toggle this help screen
    c / m / p   Sort by CPU / Memory / PID (count when grouped)
    Tab         Toggle grouping by command name
    j / k       Move selection down / up
    g / G       Jump to top / bottom
    dd          Kill selected process (or every process in the group)

    Press any key to close this help
    "#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::DarkGray));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(paragraph, popup_area);
}

/// Helper function to create a centered rect
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
