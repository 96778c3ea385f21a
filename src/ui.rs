//! Terminal UI rendering with ratatui

use crate::game::{Game, Phase};
use crate::tetromino::Color as CellColor;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BLOCK: &str = "██";
const EMPTY: &str = "  ";

/// Render the board and the active piece
pub fn render_game(frame: &mut Frame, game: &Game) {
    let (width, height) = frame_size(game.board().width(), game.board().height());
    let area = center_rect(frame.area(), width, height);

    let title = format!(" {} ", game.score());
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(board_lines(game)), inner);
}

/// Build one line per board row, top to bottom, with the active piece drawn over
/// the locked blocks
fn board_lines(game: &Game) -> Vec<Line<'static>> {
    let active = match game.phase() {
        Phase::NoPieceActive => None,
        Phase::PieceFalling => game.active_cells(),
    };

    game.board()
        .rows()
        .enumerate()
        .map(|(y, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(x, &cell)| {
                    let piece_color = active.and_then(|(cells, color)| {
                        cells
                            .iter()
                            .any(|c| c.x == x as i32 && c.y == y as i32)
                            .then_some(color)
                    });
                    cell_span(piece_color.unwrap_or(cell))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn cell_span(cell: CellColor) -> Span<'static> {
    if cell.is_empty() {
        return Span::raw(EMPTY);
    }
    let (r, g, b) = cell.rgb();
    Span::styled(BLOCK, Style::default().fg(Color::Rgb(r, g, b)))
}

/// Terminal size of the bordered board, two columns per cell
fn frame_size(cols: usize, rows: usize) -> (u16, u16) {
    let width = u16::try_from(cols * 2 + 2).unwrap_or(u16::MAX);
    let height = u16::try_from(rows + 2).unwrap_or(u16::MAX);
    (width, height)
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
