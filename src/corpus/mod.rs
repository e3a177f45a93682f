pub mod journal_list;
pub mod layout;
pub mod listing;
pub mod writer;

pub use journal_list::JournalList;
pub use layout::{CorpusLayout, DocumentKind};
pub use listing::{read_record, Listing};
pub use writer::CorpusWriter;
