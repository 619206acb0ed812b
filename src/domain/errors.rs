use derive_more::{Display, From};

/// Failure of a single HTTP fetch.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum FetchError {
    #[display(fmt = "HTTP {} from {}", status, url)]
    Http { status: u16, url: String },
    #[display(fmt = "Network error: {}", _0)]
    Network(String),
    #[display(fmt = "Parse error: {}", _0)]
    Parse(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Preconditions of mounting a chart that were not met.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum RenderError {
    #[display(fmt = "Browser window or document unavailable")]
    BrowserUnavailable,
    #[display(fmt = "ECharts library not loaded")]
    ChartLibraryMissing,
    #[display(fmt = "Chart container '{}' not found", _0)]
    ContainerMissing(String),
    #[display(fmt = "Chart script error: {}", _0)]
    ScriptError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SelectionError {
    #[display(fmt = "Unknown company code: {}", _0)]
    UnknownCompany(String),
    #[display(fmt = "Unknown indicator code: {}", _0)]
    UnknownIndicator(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigError {
    #[display(fmt = "Invalid dashboard config: {}", _0)]
    Parse(String),
}

/// Root error of the dashboard.
#[derive(Debug, Clone, PartialEq, Display, From)]
pub enum DashboardError {
    #[display(fmt = "{}", _0)]
    Fetch(FetchError),
    #[display(fmt = "{}", _0)]
    Render(RenderError),
    #[display(fmt = "{}", _0)]
    Selection(SelectionError),
    #[display(fmt = "{}", _0)]
    Config(ConfigError),
}

impl std::error::Error for FetchError {}
impl std::error::Error for RenderError {}
impl std::error::Error for SelectionError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for DashboardError {}

pub type FetchResult<T> = Result<T, FetchError>;
