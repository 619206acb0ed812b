//! Pure dashboard model: no browser APIs, testable natively.

pub mod analysis;
pub mod chart;
pub mod directory;
pub mod errors;
pub mod events;
pub mod logging;
