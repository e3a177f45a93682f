pub mod eutils;
pub mod fulltext;
pub mod http;
pub mod journals;

pub use eutils::*;
pub use fulltext::*;
pub use http::*;
pub use journals::*;
