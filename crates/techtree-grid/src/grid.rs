use crate::axis::Arena;
use crate::{GridError, Position, Result};

/// Slot of row `0` in the row arena, once the grid has been initialized.
const ANCHOR: usize = 0;

/// An unbounded, sparse two-dimensional map from [`Position`] to `T`.
///
/// Access cost is proportional to the distance from the origin. Every position-based operation
/// fails with [`GridError::Uninitialized`] until a value has been stored at the origin.
#[derive(Debug, Clone)]
pub struct SparseGrid<T> {
    /// Row links; each row stores the cell slot of its column `0`, created on first write.
    rows: Arena<usize>,
    cells: Arena<T>,
    len: usize,
}

impl<T> Default for SparseGrid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SparseGrid<T> {
    pub fn new() -> Self {
        Self {
            rows: Arena::default(),
            cells: Arena::default(),
            len: 0,
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn has(&self, pos: Position) -> Result<bool> {
        Ok(self.get(pos)?.is_some())
    }

    pub fn get(&self, pos: Position) -> Result<Option<&T>> {
        Ok(self.locate(pos)?.and_then(|ix| self.cells.value(ix)))
    }

    pub fn get_mut(&mut self, pos: Position) -> Result<Option<&mut T>> {
        match self.locate(pos)? {
            Some(ix) => Ok(self.cells.value_mut(ix)),
            None => Ok(None),
        }
    }

    /// Stores `value` at `pos`, replacing whatever was there.
    ///
    /// On an empty grid only the origin is accepted; it becomes the anchor every later walk
    /// starts from.
    pub fn set(&mut self, pos: Position, value: T) -> Result<()> {
        if self.rows.is_empty() {
            if !pos.is_origin() {
                return Err(GridError::Uninitialized { position: pos });
            }
            let cell = self.cells.push(Some(value));
            self.rows.push(Some(cell));
            self.len = 1;
            return Ok(());
        }

        let row = self.rows.walk_or_grow(ANCHOR, pos.row);
        let origin = match self.rows.value(row).copied() {
            Some(origin) => origin,
            None => {
                let origin = self.cells.push(None);
                self.rows.replace(row, origin);
                origin
            }
        };
        let cell = self.cells.walk_or_grow(origin, pos.column);
        if self.cells.replace(cell, value).is_none() {
            self.len += 1;
        }
        Ok(())
    }

    /// All stored values with their coordinates.
    ///
    /// Rows are visited `0, 1, 2, ..` and then `-1, -2, ..`; cells within a row follow the same
    /// order by column.
    pub fn to_list(&self) -> Vec<(Position, &T)> {
        self.occupied()
            .into_iter()
            .filter_map(|(pos, ix)| self.cells.value(ix).map(|value| (pos, value)))
            .collect()
    }

    /// Consuming variant of [`SparseGrid::to_list`].
    pub fn into_list(mut self) -> Vec<(Position, T)> {
        self.occupied()
            .into_iter()
            .filter_map(|(pos, ix)| self.cells.take(ix).map(|value| (pos, value)))
            .collect()
    }

    fn locate(&self, pos: Position) -> Result<Option<usize>> {
        if self.rows.is_empty() {
            return Err(GridError::Uninitialized { position: pos });
        }
        let Some(row) = self.rows.walk(ANCHOR, pos.row) else {
            return Ok(None);
        };
        let Some(&origin) = self.rows.value(row) else {
            return Ok(None);
        };
        Ok(self.cells.walk(origin, pos.column))
    }

    fn occupied(&self) -> Vec<(Position, usize)> {
        let mut out = Vec::with_capacity(self.len);
        if self.rows.is_empty() {
            return out;
        }
        for (row, row_ix) in self.rows.span(ANCHOR) {
            let Some(&origin) = self.rows.value(row_ix) else {
                continue;
            };
            for (column, cell_ix) in self.cells.span(origin) {
                if self.cells.value(cell_ix).is_some() {
                    out.push((Position::new(row, column), cell_ix));
                }
            }
        }
        out
    }
}
