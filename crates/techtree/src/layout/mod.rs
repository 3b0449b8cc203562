//! Grid placement of a tech tree.
//!
//! The root goes to the origin. Every other node is placed one row below the deepest of its
//! dependencies, centred on their mean column, at the first free slot of a fixed list of trial
//! offsets. Nodes whose dependencies are not placed yet are retried on the next pass until a
//! pass makes no progress twice in a row.

pub mod cycles;
pub mod offsets;
mod options;

pub use offsets::{Offset, trial_offsets};
pub use options::{DEFAULT_MAX_FAN_OUT, LayoutOptions};

use crate::error::{Error, Result};
use crate::model::{Node, Status};
use rustc_hash::FxHashMap;
use serde::Serialize;
use techtree_grid::{Position, SparseGrid};

/// A node together with the grid cell it was assigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedNode {
    #[serde(flatten)]
    pub node: Node,
    #[serde(flatten)]
    pub position: Position,
}

/// Edge between a dependency and its dependent, drawn in the dependent's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectorLine {
    pub from: Position,
    pub to: Position,
    pub status: Status,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub nodes: Vec<PlacedNode>,
    pub lines: Vec<ConnectorLine>,
}

impl Layout {
    pub fn position_of(&self, id: &str) -> Option<Position> {
        self.nodes
            .iter()
            .find(|placed| placed.node.id == id)
            .map(|placed| placed.position)
    }
}

/// Reusable layout entry point. Holds configuration only, so one engine can serve any number
/// of independent (also concurrent) calls.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Places every node or fails; there is no partial result.
    pub fn layout(&self, nodes: &[Node]) -> Result<Layout> {
        let _span = tracing::debug_span!("layout", nodes = nodes.len()).entered();

        if self.options.detect_cycles {
            if let Some(path) = cycles::find_cycle(nodes) {
                tracing::debug!(cycle = ?path, "dependency cycle detected");
                return Err(Error::CycleDetected { path });
            }
        }

        let mut placement = Placement::new(nodes, self.options.max_fan_out);

        let mut work: Vec<usize> = (0..nodes.len()).collect();
        let mut last_pending = work.len();
        let mut stalled_passes = 0usize;
        let mut pass = 0usize;
        while !work.is_empty() {
            pass += 1;
            let pending = placement.run_pass(&work)?;
            tracing::debug!(pass, pending = pending.len(), "placement pass finished");

            if pending.len() < last_pending {
                stalled_passes = 0;
            } else {
                stalled_passes += 1;
                if stalled_passes >= 2 {
                    let pending: Vec<String> =
                        pending.iter().map(|&ix| nodes[ix].id.clone()).collect();
                    tracing::debug!(?pending, "placement made no progress");
                    return Err(Error::Unsatisfiable { pending });
                }
            }
            last_pending = pending.len();
            work = pending;
        }

        Ok(placement.finish())
    }
}

struct Placement<'a> {
    nodes: &'a [Node],
    max_fan_out: usize,
    placed: FxHashMap<&'a str, Position>,
    occupied: SparseGrid<usize>,
    lines: Vec<ConnectorLine>,
    root: Option<usize>,
}

impl<'a> Placement<'a> {
    fn new(nodes: &'a [Node], max_fan_out: usize) -> Self {
        Self {
            nodes,
            max_fan_out,
            placed: FxHashMap::default(),
            occupied: SparseGrid::new(),
            lines: Vec::new(),
            root: None,
        }
    }

    /// Tries every node in `work` once, in order. Returns the nodes that have to wait.
    fn run_pass(&mut self, work: &[usize]) -> Result<Vec<usize>> {
        let nodes = self.nodes;
        let mut pending = Vec::new();
        for &ix in work {
            let node = &nodes[ix];
            if node.is_root() {
                self.place_root(ix)?;
                continue;
            }
            match self.resolve(node) {
                Some(dependencies) => self.place_below(ix, &dependencies)?,
                None => {
                    tracing::trace!(id = %node.id, "dependencies not placed yet");
                    pending.push(ix);
                }
            }
        }
        Ok(pending)
    }

    fn place_root(&mut self, ix: usize) -> Result<()> {
        if let Some(first) = self.root {
            return Err(Error::MultipleRoots {
                first: self.nodes[first].id.clone(),
                second: self.nodes[ix].id.clone(),
            });
        }
        self.root = Some(ix);
        self.claim(ix, Position::ORIGIN)
    }

    /// Positions of all dependencies, in declaration order, once every one of them is placed.
    fn resolve(&self, node: &Node) -> Option<Vec<Position>> {
        node.dependencies
            .iter()
            .map(|id| self.placed.get(id.as_str()).copied())
            .collect()
    }

    fn place_below(&mut self, ix: usize, dependencies: &[Position]) -> Result<()> {
        let nodes = self.nodes;
        let node = &nodes[ix];
        let anchor = anchor(dependencies);
        for (d_column, d_row) in trial_offsets(self.max_fan_out) {
            let trial = anchor.offset(d_column, d_row);
            if self.occupied.has(trial)? {
                continue;
            }
            self.claim(ix, trial)?;
            self.lines
                .extend(dependencies.iter().map(|&from| ConnectorLine {
                    from,
                    to: trial,
                    status: node.status,
                }));
            return Ok(());
        }

        tracing::debug!(id = %node.id, %anchor, "no free slot");
        Err(Error::NoFreeSlot {
            id: node.id.clone(),
            anchor,
        })
    }

    fn claim(&mut self, ix: usize, pos: Position) -> Result<()> {
        let nodes = self.nodes;
        let node = &nodes[ix];
        tracing::trace!(id = %node.id, row = pos.row, column = pos.column, "placed");
        self.occupied.set(pos, ix)?;
        self.placed.insert(node.id.as_str(), pos);
        Ok(())
    }

    fn finish(self) -> Layout {
        let nodes = self
            .occupied
            .into_list()
            .into_iter()
            .map(|(position, ix)| PlacedNode {
                node: self.nodes[ix].clone(),
                position,
            })
            .collect();
        Layout {
            nodes,
            lines: self.lines,
        }
    }
}

/// Mean dependency column (rounded towards negative infinity) on the deepest dependency row.
fn anchor(dependencies: &[Position]) -> Position {
    let count = i64::try_from(dependencies.len().max(1)).unwrap_or(i64::MAX);
    let column_sum: i64 = dependencies.iter().map(|p| i64::from(p.column)).sum();
    let column = i32::try_from(column_sum.div_euclid(count)).unwrap_or_default();
    let row = dependencies.iter().map(|p| p.row).max().unwrap_or_default();
    Position::new(row, column)
}
