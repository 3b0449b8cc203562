//! Grid-to-pixel conversion for renderers.

use serde::{Deserialize, Serialize};
use techtree_grid::Position;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PixelScale {
    /// Distance in pixels between neighbouring rows and columns.
    pub spacing: f64,
    /// Offset from a node's top-left corner to where its lines attach.
    pub line_inset: f64,
}

impl Default for PixelScale {
    fn default() -> Self {
        Self {
            spacing: 150.0,
            line_inset: 30.0,
        }
    }
}

impl PixelScale {
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Top-left corner of the node bubble at `pos`.
    pub fn node_origin(&self, pos: Position) -> Point {
        Point {
            x: f64::from(pos.column) * self.spacing,
            y: f64::from(pos.row) * self.spacing,
        }
    }

    pub fn line_endpoint(&self, pos: Position) -> Point {
        let origin = self.node_origin(pos);
        Point {
            x: origin.x + self.line_inset,
            y: origin.y + self.line_inset,
        }
    }
}
