use serde::{Deserialize, Serialize};
use std::fmt;

/// A signed grid coordinate. Rows grow downwards, columns grow to the right.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { row: 0, column: 0 };

    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Returns the position shifted by `d_column` columns and `d_row` rows.
    pub const fn offset(self, d_column: i32, d_row: i32) -> Self {
        Self {
            row: self.row + d_row,
            column: self.column + d_column,
        }
    }

    pub const fn is_origin(self) -> bool {
        self.row == 0 && self.column == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row {}, column {})", self.row, self.column)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, column): (i32, i32)) -> Self {
        Self { row, column }
    }
}
