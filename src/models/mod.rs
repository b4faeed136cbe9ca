pub mod criteria;
pub mod record;

pub use criteria::{FilterCriteria, SearchForm};
pub use record::{IndexedRecord, Record};
