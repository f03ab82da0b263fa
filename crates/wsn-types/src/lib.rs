//! Shared type definitions for the WSN cluster head simulation.
//!
//! This crate is the single source of truth for the data model exchanged
//! between the round engine and whatever shell displays its output. Types
//! defined here flow downstream to `TypeScript` via `ts-rs` so a dashboard
//! can render round reports without redefining them.
//!
//! # Modules
//!
//! - [`ids`] -- Dense integer node identifiers
//! - [`structs`] -- Points, nodes, scored nodes, and round reports

pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use ids::NodeId;
pub use structs::{Node, NodeRecord, Point, RoundReport, ScoredNode};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the report types.

    #[test]
    fn export_bindings() {
        // ts-rs writes the files into `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::NodeId::export_all();
        let _ = crate::structs::Point::export_all();
        let _ = crate::structs::Node::export_all();
        let _ = crate::structs::ScoredNode::export_all();
        let _ = crate::structs::NodeRecord::export_all();
        let _ = crate::structs::RoundReport::export_all();
    }
}
