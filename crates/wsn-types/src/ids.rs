//! Node identifiers.
//!
//! Nodes are numbered densely from `0` to `N - 1` when a round generates
//! its field. The id is stable for the duration of that round only; a new
//! round produces a new field and reuses the same numbers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifier of a sensor node within one round.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct NodeId(pub u32);

impl NodeId {
    /// Return the inner index value.
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}
