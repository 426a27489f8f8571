//! Charts: descriptor model, the five dashboard figures, and their statistics.

pub mod figure;
pub mod render;
pub mod stats;

pub use figure::{Figure, Trace};
pub use render::{render, ChartId, Dashboard};
