//! # Superglue Graph
//!
//! Typed lineage graphs as returned by the lineage service.
//!
//! ## Architecture
//!
//! ```text
//! JSON body {nodes, edges}
//!     │
//!     ├──> Graph (plain snapshot, no validation)
//!     │
//!     ├──> Integrity report
//!     │      ├─ Dangling edge endpoints
//!     │      └─ Duplicate node ids
//!     │
//!     └──> Petgraph view
//!            └─ Upstream / downstream walks with hop distance
//! ```

mod error;
mod graph;
mod integrity;
mod types;

pub use error::{GraphError, Result};
pub use graph::{LineageDiGraph, Reached};
pub use integrity::IntegrityReport;
pub use types::{Edge, Graph, Node, NodeId};
