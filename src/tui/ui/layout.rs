use crate::tiles::Tile;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Direction, Layout, Modifier, Rect, Span, Style};

pub(super) fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);
    area[1]
}

/// A face-up tile, doubles in bold.
pub(super) fn tile_span(tile: Tile, color: Option<Color>) -> Span<'static> {
    let mut style = Style::default();
    if let Some(c) = color {
        style = style.fg(c);
    }
    if tile.is_double() {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(tile.to_string(), style)
}

pub(super) fn hidden_tile_span() -> Span<'static> {
    Span::styled("[#|#]", Style::default().fg(Color::DarkGray))
}
