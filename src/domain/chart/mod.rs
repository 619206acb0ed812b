//! Chart data, unit semantics and ECharts option building.

pub mod options;
pub mod quadrant;
pub mod units;
pub mod value_objects;

pub use options::ChartOptionsBuilder;
pub use quadrant::{Quadrant, QuadrantFrame, classify};
pub use value_objects::*;
