use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Sparkline},
};

use crate::core::system_monitor::RateHistory;

/// Color for a temperature row
pub fn temp_color(alert: bool) -> Color {
    if alert {
        Color::Red
    } else {
        Color::Cyan
    }
}

/// Sparkline for one direction of the network history.
///
/// `data` should already be trimmed to the inner width of the block.
pub fn rate_sparkline<'a>(title: String, data: &'a [u64], color: Color) -> Sparkline<'a> {
    Sparkline::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .data(data)
        .style(Style::default().fg(color))
}

/// The samples that fit in a block of `width` columns (borders excluded)
pub fn visible_history(history: &RateHistory, width: u16, recv: bool) -> Vec<u64> {
    let columns = width.saturating_sub(2) as usize;
    if recv {
        history.recv_tail(columns)
    } else {
        history.sent_tail(columns)
    }
}
