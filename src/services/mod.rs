pub mod recommendations;
pub mod similarity;
pub mod title_matcher;
pub mod vectorizer;

pub use recommendations::{Ranking, Recommender};
