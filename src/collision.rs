//! Collision detection and edge clamping for the active piece

use crate::board::Board;
use crate::piece::Piece;

/// Check whether `piece`, moved by (dx, dy), would leave the board or overlap
/// a filled cell.
///
/// With no active piece there is nothing to collide, so this is `false`.
pub fn would_collide(board: &Board, piece: Option<&Piece>, dx: i32, dy: i32) -> bool {
    let Some(piece) = piece else {
        return false;
    };

    piece.cells(board.origin()).iter().any(|cell| {
        board
            .get(cell.x + dx, cell.y + dy)
            .is_none_or(|color| color.is_filled())
    })
}

/// Shift the piece so its bounding box lies inside the board edges.
///
/// Each axis is corrected independently. Overlap with locked blocks is not
/// resolved here.
pub fn clamp_into_bounds(board: &Board, piece: &mut Piece) {
    let (min, max) = piece.extent();
    let plane = board.origin();
    let width = board.width() as i32;
    let height = board.height() as i32;

    if plane.x + piece.origin.x + min.x < 0 {
        piece.origin.x = -min.x - plane.x;
    } else if plane.x + piece.origin.x + max.x >= width {
        piece.origin.x = width - 1 - max.x - plane.x;
    }

    if plane.y + piece.origin.y + min.y < 0 {
        piece.origin.y = -min.y - plane.y;
    } else if plane.y + piece.origin.y + max.y >= height {
        piece.origin.y = height - 1 - max.y - plane.y;
    }
}
