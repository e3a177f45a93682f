pub mod abstracts;
pub mod count;
pub mod fulltext;
pub mod journals;

pub use abstracts::run_abstracts;
pub use count::run_count;
pub use fulltext::run_fulltext;
pub use journals::run_journals;
