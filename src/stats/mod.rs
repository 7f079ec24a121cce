//! Stats module - frequency counting

mod ranking;

pub use ranking::{FrequencyRanking, DEFAULT_TOP_N};
