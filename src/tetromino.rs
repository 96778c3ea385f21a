//! Tetromino definitions, cell colors and rotation geometry
//!
//! Offsets live in a piece-local frame: x grows rightward, y grows downward,
//! and the pivot sits at (0, 0).

/// Number of shape variants
pub const SHAPE_COUNT: usize = 7;

/// An integer coordinate, used both for piece offsets and board positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by (dx, dy)
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The 7 tetromino shapes, in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Bar,       // ----
    HookLeft,  // |__
    HookRight, // __|
    Square,    // 88
    StepUp,    // _|-
    Tee,       // _|_
    StepDown,  // -|_
}

impl Shape {
    /// Get all shapes in table order
    pub fn all() -> [Shape; SHAPE_COUNT] {
        [
            Shape::Bar,
            Shape::HookLeft,
            Shape::HookRight,
            Shape::Square,
            Shape::StepUp,
            Shape::Tee,
            Shape::StepDown,
        ]
    }

    /// Look up a shape by its table index (0-6)
    #[cfg(test)]
    pub fn from_index(index: usize) -> Option<Shape> {
        Self::all().get(index).copied()
    }

    /// The 4 defining offsets relative to the pivot
    pub fn offsets(&self) -> [Point; 4] {
        let raw: [(i32, i32); 4] = match self {
            Shape::Bar => [(-2, 0), (-1, 0), (0, 0), (1, 0)],
            Shape::HookLeft => [(0, 1), (0, 0), (1, 0), (2, 0)],
            Shape::HookRight => [(0, 0), (1, 0), (2, 0), (2, 1)],
            Shape::Square => [(0, 0), (0, 1), (1, 0), (1, 1)],
            Shape::StepUp => [(0, 0), (1, 0), (1, 1), (2, 1)],
            Shape::Tee => [(-1, 0), (0, 0), (0, 1), (1, 0)],
            Shape::StepDown => [(0, 1), (1, 1), (1, 0), (2, 0)],
        };
        raw.map(|(x, y)| Point::new(x, y))
    }
}

/// Rotate a single offset 90° counter-clockwise about the pivot
pub const fn rotate_point_ccw(p: Point) -> Point {
    Point { x: -p.y, y: p.x }
}

/// Rotate all 4 offsets 90° counter-clockwise about the pivot
pub fn rotate_ccw(offsets: [Point; 4]) -> [Point; 4] {
    offsets.map(rotate_point_ccw)
}

/// Color held by a board cell. `Empty` marks an unoccupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Empty,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Indigo,
    Violet,
}

impl Color {
    /// The colors a piece may be drawn in
    pub const PALETTE: [Color; 7] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Indigo,
        Color::Violet,
    ];

    pub fn is_empty(&self) -> bool {
        matches!(self, Color::Empty)
    }

    pub fn is_filled(&self) -> bool {
        !self.is_empty()
    }

    /// RGB triple used by renderers
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Empty => (0, 0, 0),
            Color::Red => (150, 28, 0),
            Color::Orange => (235, 61, 0),
            Color::Yellow => (255, 184, 0),
            Color::Green => (96, 139, 50),
            Color::Blue => (1, 111, 222),
            Color::Indigo => (0, 44, 106),
            Color::Violet => (73, 45, 165),
        }
    }
}
