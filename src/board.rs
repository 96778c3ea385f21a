//! Game board representation and row clearing
//!
//! Cells live in a fixed arena of `height` rows. The visible row order is a
//! permutation of row handles into that arena, so clearing a row moves
//! handles instead of copying cell contents.

use crate::tetromino::{Color, Point};

/// Standard board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// The game board
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    /// Top-left corner of the board plane, added to piece coordinates
    origin: Point,
    /// Row arena, `height * width` cells, addressed by handle
    store: Vec<Color>,
    /// `rows[y]` is the arena handle for visible row y (0 = top)
    rows: Vec<usize>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board must have at least one cell");
        Self {
            width,
            height,
            origin: Point::ZERO,
            store: vec![Color::Empty; width * height],
            rows: (0..height).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Check if (x, y) addresses a cell on the board
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Get the cell at (x, y)
    ///
    /// Panics if out of bounds: callers validate positions with the
    /// collision detector first.
    pub fn cell_at(&self, x: i32, y: i32) -> Color {
        let index = self.index(x, y);
        self.store[index]
    }

    /// Set the cell at (x, y). Panics if out of bounds.
    pub fn set_cell(&mut self, x: i32, y: i32, color: Color) {
        let index = self.index(x, y);
        self.store[index] = color;
    }

    /// Checked lookup, `None` when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.contains(x, y).then(|| self.cell_at(x, y))
    }

    /// Check if every cell in row y is filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).iter().all(|cell| cell.is_filled())
    }

    /// Cells of visible row y, left to right
    pub fn row(&self, y: usize) -> &[Color] {
        assert!(y < self.height, "row {} out of bounds (height {})", y, self.height);
        let start = self.rows[y] * self.width;
        &self.store[start..start + self.width]
    }

    /// Iterate visible rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Remove the given rows and drop everything above them down.
    ///
    /// `rows` holds visible row indices (0 = top) and is sorted in place,
    /// bottom-most first. Every removed row reappears at the top as an empty
    /// row, so the board keeps its height. Duplicate indices are removed once.
    /// Returns the number of rows removed.
    pub fn clear_rows(&mut self, rows: &mut [usize]) -> usize {
        rows.sort_unstable_by(|a, b| b.cmp(a));

        let mut removed = 0;
        let mut previous = None;
        for &row in rows.iter() {
            if previous == Some(row) {
                continue;
            }
            previous = Some(row);
            assert!(row < self.height, "row {} out of bounds (height {})", row, self.height);

            // Everything above a removed row has already slid down `removed` places
            let y = row + removed;
            let handle = self.rows[y];
            self.fill_handle(handle, Color::Empty);
            self.rows[..=y].rotate_right(1);
            removed += 1;
        }
        removed
    }

    /// Check if the board is completely empty
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.store.iter().all(|cell| cell.is_empty())
    }

    /// Empty every cell and restore the identity row order
    pub fn reset(&mut self) {
        self.store.fill(Color::Empty);
        for (y, handle) in self.rows.iter_mut().enumerate() {
            *handle = y;
        }
    }

    fn fill_handle(&mut self, handle: usize, color: Color) {
        let start = handle * self.width;
        self.store[start..start + self.width].fill(color);
    }

    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            self.contains(x, y),
            "cell ({}, {}) out of bounds ({}x{})",
            x,
            y,
            self.width,
            self.height
        );
        self.rows[y as usize] * self.width + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i32, color: Color) {
        for x in 0..board.width() as i32 {
            board.set_cell(x, y, color);
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert!(board.is_empty());
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
        assert_eq!(board.rows().count(), 20);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::default();
        board.set_cell(5, 5, Color::Red);
        assert_eq!(board.cell_at(5, 5), Color::Red);
        assert_eq!(board.get(5, 5), Some(Color::Red));
        assert!(!board.is_empty());
    }

    #[test]
    fn test_out_of_bounds_lookup() {
        let board = Board::default();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
        assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_set_out_of_bounds_panics() {
        let mut board = Board::default();
        board.set_cell(BOARD_WIDTH as i32, 0, Color::Red);
    }

    #[test]
    fn test_row_full_detection() {
        let mut board = Board::default();
        for x in 0..9 {
            board.set_cell(x, 19, Color::Blue);
        }
        assert!(!board.is_row_full(19));
        board.set_cell(9, 19, Color::Green);
        assert!(board.is_row_full(19));
        assert!(!board.is_row_full(18));
    }

    #[test]
    fn test_clear_single_row() {
        let mut board = Board::default();
        fill_row(&mut board, 19, Color::Red);
        board.set_cell(0, 18, Color::Blue);

        let cleared = board.clear_rows(&mut [19]);
        assert_eq!(cleared, 1);
        // The block from row 18 should now be on row 19
        assert_eq!(board.cell_at(0, 19), Color::Blue);
        assert!(board.row(0).iter().all(|c| c.is_empty()));
        assert_eq!(board.height(), 20);
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut board = Board::default();
        // Tag every row that survives with a marker in column 0, row index in color order
        let markers = Color::PALETTE;
        for y in 0..20 {
            board.set_cell(0, y, markers[y as usize % markers.len()]);
        }
        for y in [5, 12, 17] {
            fill_row(&mut board, y, Color::Violet);
        }
        let before: Vec<Color> = (0..20)
            .filter(|y| ![5, 12, 17].contains(y))
            .map(|y| board.cell_at(0, y))
            .collect();

        let cleared = board.clear_rows(&mut [5, 12, 17]);
        assert_eq!(cleared, 3);

        for y in 0..3 {
            assert!(board.row(y).iter().all(|c| c.is_empty()), "row {} not empty", y);
        }
        let after: Vec<Color> = (3..20).map(|y| board.cell_at(0, y)).collect();
        assert_eq!(after, before);

        // Rows below every cleared row stay put; rows above shift by the cleared count below them
        assert_eq!(board.cell_at(0, 19), markers[19 % 7]);
        assert_eq!(board.cell_at(0, 18), markers[18 % 7]);
        assert_eq!(board.cell_at(0, 17), markers[16 % 7]);
        assert_eq!(board.cell_at(0, 12), markers[10 % 7]);
        assert_eq!(board.cell_at(0, 3), markers[0]);
    }

    #[test]
    fn test_clear_adjacent_rows_any_order() {
        let mut board = Board::default();
        fill_row(&mut board, 18, Color::Red);
        fill_row(&mut board, 19, Color::Red);
        board.set_cell(4, 17, Color::Green);
        board.set_cell(2, 16, Color::Yellow);

        let cleared = board.clear_rows(&mut [18, 19]);
        assert_eq!(cleared, 2);
        assert_eq!(board.cell_at(4, 19), Color::Green);
        assert_eq!(board.cell_at(2, 18), Color::Yellow);
        assert!(!board.is_row_full(19));
        assert!(board.row(17).iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_clear_ignores_duplicates() {
        let mut board = Board::default();
        fill_row(&mut board, 19, Color::Red);
        board.set_cell(1, 18, Color::Orange);
        assert_eq!(board.clear_rows(&mut [19, 19]), 1);
        assert_eq!(board.cell_at(1, 19), Color::Orange);
    }

    #[test]
    fn test_clear_top_row() {
        let mut board = Board::default();
        fill_row(&mut board, 0, Color::Indigo);
        assert_eq!(board.clear_rows(&mut [0]), 1);
        assert!(board.is_empty());
    }

    #[test]
    fn test_reset_restores_empty_board() {
        let mut board = Board::default();
        fill_row(&mut board, 19, Color::Red);
        board.set_cell(3, 10, Color::Blue);
        board.clear_rows(&mut [19]);
        board.reset();
        assert!(board.is_empty());
        board.set_cell(0, 0, Color::Green);
        assert_eq!(board.row(0)[0], Color::Green);
    }
}
