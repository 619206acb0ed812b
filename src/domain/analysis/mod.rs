//! AI commentary and indicator interpretation frames.

pub mod interpretation;
pub mod report;

pub use interpretation::{Interpretation, InterpretationFrame, InterpretationSource};
pub use report::{AnalysisReport, AnalysisResult, OverallAssessment};
