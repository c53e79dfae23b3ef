use crate::player::Player;
use crate::tiles::Side;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, hidden_tile_span, inner, tile_span};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let header_height: u16 = 2 + 2;
    let status_height: u16 = 3 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height), // header
            Constraint::Length(6),             // board
            Constraint::Min(6),                // players
            Constraint::Length(5),             // pool
            Constraint::Length(status_height), // status bar
        ])
        .split(size);

    draw_header(f, chunks[0], app);
    draw_board(f, chunks[1], app);
    draw_players(f, chunks[2], app);
    draw_pool(f, chunks[3], app);
    draw_status(f, chunks[4], app);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState) {
    let s = app.game.settings();
    let mut header_lines: Vec<Line> = Vec::new();
    let turn = if app.match_started {
        format!("Turn: P{}", app.game.current_player_index() + 1)
    } else {
        "Turn: --".to_string()
    };
    header_lines.push(Line::from(format!(
        "Players: {} ({} human)   Pips: {}..={}   Tiles: {}   {}",
        s.num_players(),
        s.num_human_players(),
        s.min_dots(),
        s.max_dots(),
        app.game.total_tiles(),
        turn
    )));
    let last = app.moves().last().cloned().unwrap_or_else(|| "--".to_string());
    header_lines.push(Line::from(format!("Last: {last}")));
    let header = Paragraph::new(header_lines)
        .block(Block::default().title("domino-rs").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_board(f: &mut Frame, area: Rect, app: &AppState) {
    let board = app.game.board();
    let title = match board.open_ends() {
        Some((l, r)) => format!("Board ({} tiles, open ends {l} / {r})", board.len()),
        None => "Board (empty)".to_string(),
    };
    let last_idx = match board.last_added_side() {
        Some(Side::Left) => Some(0),
        Some(Side::Right) => board.len().checked_sub(1),
        None => None,
    };
    let mut spans: Vec<Span> = Vec::with_capacity(board.len() * 2);
    for (i, t) in board.tiles().into_iter().enumerate() {
        let color = (Some(i) == last_idx).then_some(Color::Yellow);
        spans.push(tile_span(t, color));
        spans.push(Span::raw(" "));
    }
    let para = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(para, area);
}

fn draw_players(f: &mut Frame, area: Rect, app: &AppState) {
    let players = app.game.players();
    if players.is_empty() {
        let para = Paragraph::new("No match yet.")
            .block(Block::default().title("Players").borders(Borders::ALL));
        f.render_widget(para, area);
        return;
    }
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            players.iter().map(|_| Constraint::Ratio(1, players.len() as u32)).collect::<Vec<_>>(),
        )
        .split(area);
    for (idx, p) in players.iter().enumerate() {
        render_player_card(f, cols[idx], app, idx, p);
    }
}

fn render_player_card(f: &mut Frame, seat_area: Rect, app: &AppState, idx: usize, p: &Player) {
    let over = app.game.is_over();
    let current = app.match_started && !over && idx == app.game.current_player_index();
    let winner = app.game.winner_index() == Some(idx);
    let mut title = format!("{} [{}]", p.name(), p.kind().label());
    if current {
        title.push_str(" [Turn]");
    }
    if winner {
        title.push_str(" [Winner]");
    }
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if winner {
        block = block.border_style(Style::default().fg(Color::Green));
    } else if current {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }

    let mut lines: Vec<Line> = Vec::with_capacity(3);
    let mut count = format!("Tiles: {}", p.tile_count());
    if over {
        count.push_str(&format!("   Sum: {}", p.hand_sum()));
    }
    lines.push(Line::from(count));
    let spans: Vec<Span> = if app.shows_hand(idx) {
        p.tiles().iter().flat_map(|t| [tile_span(*t, None), Span::raw(" ")]).collect()
    } else {
        p.tiles().iter().flat_map(|_| [hidden_tile_span(), Span::raw(" ")]).collect()
    };
    lines.push(Line::from(spans));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    f.render_widget(para, seat_area);
}

fn draw_pool(f: &mut Frame, area: Rect, app: &AppState) {
    let title = format!("Pool ({})", app.game.pool_len());
    let spans: Vec<Span> = if app.shows_pool() {
        app.game
            .pool_tiles()
            .into_iter()
            .flat_map(|t| [tile_span(t, None), Span::raw(" ")])
            .collect()
    } else {
        (0..app.game.pool_len()).flat_map(|_| [hidden_tile_span(), Span::raw(" ")]).collect()
    };
    let para = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(para, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let status_inner = inner(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(status_inner);

    let seat = app.game.current_player_index() + 1;
    let mut left_info: Vec<Line> = if !app.match_started {
        vec![Line::from("No match in progress; press Space to deal.")]
    } else if app.game.is_over() {
        vec![
            Line::from(Span::styled(
                app.outcome_line().unwrap_or_default(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from("Press Space for a new match."),
        ]
    } else if let Some(tile) = app.game.pending_side_tile() {
        if app.human_to_act() {
            vec![Line::from(vec![
                tile_span(tile, Some(Color::Yellow)),
                Span::raw(" fits both ends: "),
                Span::styled("L", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" left / "),
                Span::styled("R", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" right"),
            ])]
        } else {
            vec![Line::from(format!("P{seat} is choosing a side for {tile}"))]
        }
    } else if app.human_to_act() {
        playable_lines(app)
    } else {
        vec![Line::from(format!("P{seat} (CPU) is thinking..."))]
    };

    if let Some(err) = app.action_error() {
        left_info.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let right_keys = vec![Line::from("? help • H history"), Line::from("M menu • Q quit")];
    let left_para = Paragraph::new(left_info).wrap(Wrap { trim: true });
    let right_para =
        Paragraph::new(right_keys).wrap(Wrap { trim: true }).alignment(Alignment::Right);
    f.render_widget(left_para, cols[0]);
    f.render_widget(right_para, cols[1]);
}

/// Numbered legal tiles for the acting human, cursor highlighted.
fn playable_lines(app: &AppState) -> Vec<Line<'static>> {
    let seat = app.game.current_player_index() + 1;
    let legal = app.game.current_player_legal_tiles();
    if legal.is_empty() {
        let what = if app.game.is_pool_empty() { "passing" } else { "drawing" };
        return vec![Line::from(format!("P{seat}: no playable tile, {what}..."))];
    }
    let cursor = app.tile_cursor();
    let mut spans: Vec<Span> = vec![Span::raw(format!("P{seat} plays: "))];
    for (i, t) in legal.into_iter().enumerate() {
        let label = Span::raw(format!("({}) ", i + 1));
        let tile = if i == cursor {
            tile_span(t, Some(Color::Cyan)).reversed()
        } else {
            tile_span(t, None)
        };
        spans.extend([label, tile, Span::raw("  ")]);
    }
    vec![
        Line::from(spans),
        Line::from(Span::styled(
            "1-9 or ←/→ + Enter to play",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ]
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Moves").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries = app.moves_page();
    if entries.is_empty() {
        lines.push(Line::from("No moves yet."));
    } else {
        lines.extend(entries.iter().map(|m| Line::from(m.clone())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let lines = vec![
        Line::from(Span::styled("Table:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("- Space: deal a new match"),
        Line::from("- 1-9: play that playable tile"),
        Line::from("- ← / →, Tab: move selection; Enter: play it"),
        Line::from("- L / R: place a tile that fits both ends"),
        Line::from("- Draws and passes happen on their own"),
        Line::from("- H: move history"),
        Line::from(""),
        Line::from(Span::styled("Menu:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("- M: open settings"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: save"),
        Line::from("- Esc: discard changes"),
        Line::from(""),
        Line::from("Q: quit • Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}
