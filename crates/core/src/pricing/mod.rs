//! Area geometry and market price classification

pub mod geometry;
pub mod market;

pub use geometry::{compute_unit_area, line_total_area, unit_area};
pub use market::MarketClassifier;
