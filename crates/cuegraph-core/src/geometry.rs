//! Editor-space geometry.
//!
//! The graph editor places nodes on an integer grid. X grows to the right and
//! Y grows downwards.

use std::fmt;

/// An integer position on the editor canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    x: i64,
    y: i64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> i64 {
        self.x
    }

    pub fn y(self) -> i64 {
        self.y
    }

    /// Returns a copy of this point with a different Y coordinate.
    pub fn with_y(self, y: i64) -> Self {
        Self { x: self.x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_y_keeps_x() {
        let p = Point::new(840, -125).with_y(50);
        assert_eq!(p.x(), 840);
        assert_eq!(p.y(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(1, -2).to_string(), "(1, -2)");
    }
}
