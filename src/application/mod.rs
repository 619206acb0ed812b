pub mod directory_service;
pub mod display;
pub mod fetcher;
pub mod orchestrator;
pub mod selection;

pub use directory_service::DirectoryService;
pub use display::{ChartPanel, ContentView, DisplayModel, RawDataView};
pub use fetcher::DashboardFetcher;
pub use orchestrator::{ContentOrchestrator, LoadOutcome};
pub use selection::{Selection, SelectionPhase};
