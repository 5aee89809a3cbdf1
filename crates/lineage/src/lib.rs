//! # Superglue Lineage
//!
//! Fetches precomputed lineage graphs and tracks the loading state of the
//! selection being shown.
//!
//! ## Pipeline
//!
//! ```text
//! LineageQuery {name, type, depth}
//!     │
//!     ├──> status := LOADING
//!     │
//!     ├──> GET lineage/{type}/{name}/{depth}
//!     │
//!     ├──> ok:   graph := body, status := FINISHED_SUCCESS
//!     └──> fail: graph kept,   status := FINISHED_FAILURE
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use superglue_lineage::{HttpTransport, LineageSession};
//! use superglue_protocol::{Depth, LineageQuery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let transport = HttpTransport::new("http://localhost:5000/api/v1/", None)?;
//!     let session = LineageSession::new(Arc::new(transport));
//!     let query = LineageQuery::new("CFG_IOP_ETL_STATE", "table", Depth::Full)?;
//!     let graph = session.fetch_lineage(&query).await?;
//!
//!     println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
//!     Ok(())
//! }
//! ```

mod error;
mod refetch;
mod session;
mod status;
mod transport;
mod view;

pub use error::{LineageError, Result};
pub use refetch::should_refetch;
pub use session::{LineageSession, LineageSnapshot};
pub use status::{FetchOutcome, LoadingStatus};
pub use transport::{HttpTransport, LineageTransport, RequestPath};
pub use view::LineageView;
