pub mod eval;
pub mod search;

pub use eval::{DEFAULT_CORNER_MULTIPLIER, Evaluator, MAX_CORNER_MULTIPLIER, Score};
pub use search::{SearchOutcome, SearchReport, Searcher};
