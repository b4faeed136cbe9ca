pub mod collation;
pub mod facets;
pub mod filter;
pub mod session_sweeper;
pub mod store;

pub use facets::{FacetIndex, index_facets};
pub use session_sweeper::SessionSweeper;
pub use store::RecordStore;
