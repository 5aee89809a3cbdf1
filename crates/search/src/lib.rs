//! # Superglue Search
//!
//! Search-as-you-type suggestions backed by a full-text index.
//!
//! ## Pipeline
//!
//! ```text
//! search term
//!     │
//!     ├──> search_term := term (immediately)
//!     │
//!     ├──> Query builder
//!     │      ├─ blank      -> match_none
//!     │      └─ otherwise  -> must: fuzzy AND match on name
//!     │                       should: exact term, boost 20
//!     │                       size: 50
//!     │
//!     └──> Index response
//!            └─ hits[]._source -> SuggestionRecord (index order kept)
//! ```

mod error;
mod hits;
mod index;
mod query;
mod session;

pub use error::{Result, SearchError};
pub use hits::suggestions_from_response;
pub use index::{ElasticsearchIndex, SearchIndex};
pub use query::{
    build_query, IndexQuery, EXACT_MATCH_BOOST, LINEAGE_INDEX, NAME_FIELD, NAME_FUZZINESS,
    SUGGESTION_LIMIT,
};
pub use session::SearchSession;
