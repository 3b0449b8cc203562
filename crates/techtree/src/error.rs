use techtree_grid::{GridError, Position};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("multiple root nodes: `{first}` and `{second}` both have no dependencies")]
    MultipleRoots { first: String, second: String },

    #[error("could not place node `{id}`: every slot below {anchor} is taken")]
    NoFreeSlot { id: String, anchor: Position },

    #[error("dependencies can never be satisfied for: {}", pending.join(", "))]
    Unsatisfiable { pending: Vec<String> },

    #[error("dependency cycle: {}", path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    #[error("duplicate node id: {id}")]
    DuplicateNodeId { id: String },

    #[error("duplicate domain id: {id}")]
    DuplicateDomainId { id: String },

    #[error("`{owner}` refers to unknown domain `{domain}`")]
    UnknownDomain { owner: String, domain: String },

    #[error("progress of node `{id}` must be between 0 and 1, found {progress}")]
    InvalidProgress { id: String, progress: f64 },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid model YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
