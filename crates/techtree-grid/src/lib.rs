#![forbid(unsafe_code)]

//! Sparse, unbounded 2D grid used by `techtree` to place nodes.
//!
//! Rows form a doubly-linked list anchored at row `0`; every row is itself a doubly-linked list
//! of cells anchored at column `0`. Reaching `(row, column)` walks `|row|` row links and then
//! `|column|` cell links away from the anchor, so negative coordinates work the same way as
//! positive ones and nothing has to be pre-sized.

mod axis;
mod grid;
mod position;

pub use grid::SparseGrid;
pub use position::Position;

pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The grid anchor has not been set yet; only `set` at the origin may initialize it.
    #[error("could not find position {position}: grid has no anchor yet")]
    Uninitialized { position: Position },
}
