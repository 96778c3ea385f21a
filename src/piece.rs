//! Active falling piece

use crate::tetromino::{rotate_ccw, Color, Point, Shape};

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The shape it was spawned as
    pub shape: Shape,
    /// Current offsets relative to the pivot, rotated in place
    pub offsets: [Point; 4],
    /// Pivot position in board coordinates
    pub origin: Point,
    pub color: Color,
}

impl Piece {
    /// Create a piece in its spawn orientation at `origin`
    pub fn new(shape: Shape, color: Color, origin: Point) -> Self {
        Self {
            shape,
            offsets: shape.offsets(),
            origin,
            color,
        }
    }

    /// Absolute positions of all 4 cells, given the board plane origin
    pub fn cells(&self, plane: Point) -> [Point; 4] {
        let base = plane.offset(self.origin.x, self.origin.y);
        self.offsets.map(|p| base.offset(p.x, p.y))
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.origin = self.origin.offset(dx, dy);
    }

    /// Rotate 90° counter-clockwise about the pivot
    pub fn rotate_ccw(&mut self) {
        self.offsets = rotate_ccw(self.offsets);
    }

    /// Bounding box of the offsets as (min, max), piece-local
    pub fn extent(&self) -> (Point, Point) {
        let mut min = self.offsets[0];
        let mut max = self.offsets[0];
        for p in &self.offsets[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_add_origin_and_plane() {
        let piece = Piece::new(Shape::Square, Color::Red, Point::new(4, 2));
        let cells = piece.cells(Point::new(1, 0));
        assert_eq!(
            cells,
            [
                Point::new(5, 2),
                Point::new(5, 3),
                Point::new(6, 2),
                Point::new(6, 3)
            ]
        );
    }

    #[test]
    fn test_translate() {
        let mut piece = Piece::new(Shape::Tee, Color::Blue, Point::new(3, 3));
        piece.translate(-1, 2);
        assert_eq!(piece.origin, Point::new(2, 5));
    }

    #[test]
    fn test_rotate_keeps_origin() {
        let mut piece = Piece::new(Shape::Bar, Color::Green, Point::new(5, 5));
        piece.rotate_ccw();
        assert_eq!(piece.origin, Point::new(5, 5));
        assert_eq!(piece.offsets, rotate_ccw(Shape::Bar.offsets()));
    }

    #[test]
    fn test_extent() {
        let piece = Piece::new(Shape::Bar, Color::Green, Point::ZERO);
        assert_eq!(piece.extent(), (Point::new(-2, 0), Point::new(1, 0)));

        let mut piece = Piece::new(Shape::HookLeft, Color::Green, Point::ZERO);
        piece.rotate_ccw();
        // (0,1) (0,0) (1,0) (2,0) -> (-1,0) (0,0) (0,1) (0,2)
        assert_eq!(piece.extent(), (Point::new(-1, 0), Point::new(0, 2)));
    }
}
