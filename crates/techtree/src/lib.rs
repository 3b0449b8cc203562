#![forbid(unsafe_code)]

//! Automatic grid layout for tech trees.
//!
//! A tech tree is a dependency graph with a single root. [`layout`] assigns every node a cell on
//! an unbounded grid (see [`techtree_grid::SparseGrid`]) and emits one connector line per
//! dependency edge; renderers scale the result with [`PixelScale`].
//!
//! The layout is recomputed from the complete node list on every call.

pub mod error;
pub mod layout;
pub mod model;
pub mod scale;

pub use error::{Error, Result};
pub use layout::{
    ConnectorLine, DEFAULT_MAX_FAN_OUT, Layout, LayoutEngine, LayoutOptions, PlacedNode,
};
pub use model::{Domain, InvalidStatus, Model, Node, Status};
pub use scale::{PixelScale, Point};
pub use techtree_grid::Position;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lays out `nodes` with [`LayoutOptions::default`].
pub fn layout(nodes: &[Node]) -> Result<Layout> {
    LayoutEngine::default().layout(nodes)
}

pub fn layout_with_options(nodes: &[Node], options: LayoutOptions) -> Result<Layout> {
    LayoutEngine::new(options).layout(nodes)
}
