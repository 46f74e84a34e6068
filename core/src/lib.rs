pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
pub mod index;
pub mod persist;
pub mod query;
pub mod rank;
pub mod snippet;
pub mod source;
pub mod text;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use index::{Document, Index};
pub use query::{QueryEngine, SearchResult};
pub use rank::{Bm25Params, RankingMode};
