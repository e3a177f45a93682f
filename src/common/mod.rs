pub mod logging;
pub mod progress;
pub mod types;
pub mod utils;

pub use logging::*;
pub use progress::{create_journal_progress_bar, create_spinner};
pub use types::*;
pub use utils::*;
