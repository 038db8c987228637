pub mod fit;
pub mod fuzzy;
pub mod rank;

pub use fit::{score_fit, FitScore};
pub use fuzzy::fuzzy_match;
pub use rank::{recommend, Recommendation};
