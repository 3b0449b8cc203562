//! Tech-tree documents: nodes, the domains they belong to, and their status.

use crate::error::{Error, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress state of a node. Serialized as its integer code; any whole number 1-4 is accepted
/// on input, including `2.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u8")]
pub enum Status {
    Planned = 1,
    Soon = 2,
    InProgress = 3,
    /// Lines without an explicit status render as done.
    #[default]
    Done = 4,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidStatus(pub f64);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected status to be between {} and {} but received {} instead",
            Status::Planned as u8,
            Status::Done as u8,
            self.0
        )
    }
}

impl std::error::Error for InvalidStatus {}

impl TryFrom<f64> for Status {
    type Error = InvalidStatus;

    fn try_from(code: f64) -> std::result::Result<Self, Self::Error> {
        if code == 1.0 {
            Ok(Status::Planned)
        } else if code == 2.0 {
            Ok(Status::Soon)
        } else if code == 3.0 {
            Ok(Status::InProgress)
        } else if code == 4.0 {
            Ok(Status::Done)
        } else {
            Err(InvalidStatus(code))
        }
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        status as u8
    }
}

/// A single bubble in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique across the document; referenced by other nodes' `dependencies`.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Ids of the nodes this one builds on. Empty only for the root.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_domain: Option<String>,
    pub status: Status,
    /// Fraction in `[0, 1]`, meaningful for [`Status::InProgress`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

impl Node {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            details: None,
            icon: None,
            dependencies: Vec::new(),
            parent_domain: None,
            status: Status::default(),
            progress: None,
        }
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_parent_domain(mut self, domain: impl Into<String>) -> Self {
        self.parent_domain = Some(domain.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.dependencies.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// A whole tech-tree document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub domains: Vec<Domain>,
    pub nodes: Vec<Node>,
}

impl Model {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Checks the cross-references that deserialization alone cannot.
    ///
    /// Dependencies on unknown ids are left to the layout, which reports them as
    /// [`Error::Unsatisfiable`].
    pub fn validate(&self) -> Result<()> {
        let mut domain_ids: FxHashSet<&str> = FxHashSet::default();
        for domain in &self.domains {
            if !domain_ids.insert(domain.id.as_str()) {
                return Err(Error::DuplicateDomainId {
                    id: domain.id.clone(),
                });
            }
        }
        for domain in &self.domains {
            if let Some(parent) = &domain.parent {
                if !domain_ids.contains(parent.as_str()) {
                    return Err(Error::UnknownDomain {
                        owner: domain.id.clone(),
                        domain: parent.clone(),
                    });
                }
            }
        }

        let mut node_ids: FxHashSet<&str> = FxHashSet::default();
        for node in &self.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(Error::DuplicateNodeId {
                    id: node.id.clone(),
                });
            }
            if let Some(domain) = &node.parent_domain {
                if !domain_ids.contains(domain.as_str()) {
                    return Err(Error::UnknownDomain {
                        owner: node.id.clone(),
                        domain: domain.clone(),
                    });
                }
            }
            if let Some(progress) = node.progress {
                if !(progress.is_finite() && (0.0..=1.0).contains(&progress)) {
                    return Err(Error::InvalidProgress {
                        id: node.id.clone(),
                        progress,
                    });
                }
            }
        }
        Ok(())
    }
}
