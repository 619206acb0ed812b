use crate::domain::{
    analysis::{AnalysisResult, InterpretationFrame},
    chart::{ChartData, RawDataRow},
    directory::{Company, IndicatorCatalog, IndicatorSelection},
    errors::FetchResult,
};

/// Backend access used by the directory and the orchestrator.
///
/// Futures are not `Send`: everything runs on the browser event loop.
#[allow(async_fn_in_trait)]
pub trait DashboardFetcher {
    async fn fetch_companies(&self) -> FetchResult<Vec<Company>>;

    async fn fetch_indicator_catalog(&self) -> FetchResult<IndicatorCatalog>;

    async fn fetch_chart_data(
        &self,
        company: &Company,
        indicator: &IndicatorSelection,
    ) -> FetchResult<ChartData>;

    async fn fetch_analysis(&self, company: &Company) -> FetchResult<AnalysisResult>;

    /// Always yields a frame, falling back to built-in text.
    async fn fetch_interpretation(&self, indicator: &IndicatorSelection) -> InterpretationFrame;

    async fn fetch_raw_rows(
        &self,
        company: &Company,
        indicator: &IndicatorSelection,
    ) -> FetchResult<Vec<RawDataRow>>;
}
