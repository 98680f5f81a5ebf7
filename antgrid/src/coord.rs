use std::fmt;

/// A cell position on the antenna map.
///
/// Rows grow downwards and columns to the right, both starting at zero.
/// Computed positions such as effect points may fall outside the map and
/// therefore carry negative components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns true when both components are inside a `rows` x `cols` map.
    pub fn is_within(&self, rows: i32, cols: i32) -> bool {
        self.row >= 0 && self.col >= 0 && self.row < rows && self.col < cols
    }

    /// Returns true when the position can be drawn on a dot map.
    pub fn is_non_negative(&self) -> bool {
        self.row >= 0 && self.col >= 0
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Coord::new(3, -1).to_string(), "(3,-1)");
    }

    #[test]
    fn test_bounds() {
        let c = Coord::new(2, 4);
        assert!(c.is_within(3, 5));
        assert!(!c.is_within(2, 5));
        assert!(!Coord::new(-1, 0).is_within(3, 3));
        assert!(!Coord::new(0, -2).is_non_negative());
    }
}
