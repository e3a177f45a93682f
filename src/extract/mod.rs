pub mod doi;
pub mod journals;
pub mod pubmed;

pub use doi::*;
pub use journals::extract_journal_names;
pub use pubmed::*;
