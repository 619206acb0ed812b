#![allow(dead_code)]

use finance_dashboard_wasm::application::DashboardFetcher;
use finance_dashboard_wasm::domain::analysis::{AnalysisResult, InterpretationFrame};
use finance_dashboard_wasm::domain::chart::{ChartData, RawDataRow};
use finance_dashboard_wasm::domain::directory::{
    Company, IndicatorCatalog, IndicatorSelection, default_catalog, default_companies,
};
use finance_dashboard_wasm::domain::errors::{FetchError, FetchResult};
use serde_json::json;
use std::cell::Cell;

/// In-memory fetcher with canned payloads and per-endpoint call counters.
pub struct ScriptedFetcher {
    pub companies: FetchResult<Vec<Company>>,
    pub catalog: FetchResult<IndicatorCatalog>,
    pub chart: FetchResult<ChartData>,
    pub raw_rows: FetchResult<Vec<RawDataRow>>,
    pub chart_calls: Cell<usize>,
    pub analysis_calls: Cell<usize>,
    pub interpretation_calls: Cell<usize>,
    pub raw_calls: Cell<usize>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self {
            companies: Ok(default_companies()),
            catalog: Ok(default_catalog()),
            chart: Ok(sample_chart_data()),
            raw_rows: Ok(vec![sample_raw_row()]),
            chart_calls: Cell::new(0),
            analysis_calls: Cell::new(0),
            interpretation_calls: Cell::new(0),
            raw_calls: Cell::new(0),
        }
    }

    pub fn failing_chart(status: u16) -> Self {
        Self {
            chart: Err(FetchError::Http { status, url: "/api/chart/600519.SH/7.11?period=past_10_years".into() }),
            ..Self::new()
        }
    }

    pub fn offline() -> Self {
        Self {
            companies: Err(FetchError::Network("connection refused".into())),
            catalog: Err(FetchError::Network("connection refused".into())),
            ..Self::new()
        }
    }

    pub fn total_fetches(&self) -> usize {
        self.chart_calls.get() + self.analysis_calls.get() + self.interpretation_calls.get() + self.raw_calls.get()
    }
}

impl DashboardFetcher for ScriptedFetcher {
    async fn fetch_companies(&self) -> FetchResult<Vec<Company>> {
        self.companies.clone()
    }

    async fn fetch_indicator_catalog(&self) -> FetchResult<IndicatorCatalog> {
        self.catalog.clone()
    }

    async fn fetch_chart_data(&self, _company: &Company, _indicator: &IndicatorSelection) -> FetchResult<ChartData> {
        self.chart_calls.set(self.chart_calls.get() + 1);
        self.chart.clone()
    }

    async fn fetch_analysis(&self, _company: &Company) -> FetchResult<AnalysisResult> {
        self.analysis_calls.set(self.analysis_calls.get() + 1);
        Ok(AnalysisResult {
            found: true,
            analysis: json!({
                "analysis_report_json": {
                    "overall_assessment": { "score": "85", "level": "优秀" },
                    "strength_areas": ["品牌护城河"],
                    "risk_factors": ["估值偏高"]
                }
            }),
            summary: None,
            recommendations: vec!["长期持有".to_string()],
        })
    }

    async fn fetch_interpretation(&self, indicator: &IndicatorSelection) -> InterpretationFrame {
        self.interpretation_calls.set(self.interpretation_calls.get() + 1);
        InterpretationFrame::fallback(indicator.code(), indicator.name())
    }

    async fn fetch_raw_rows(&self, _company: &Company, _indicator: &IndicatorSelection) -> FetchResult<Vec<RawDataRow>> {
        self.raw_calls.set(self.raw_calls.get() + 1);
        self.raw_rows.clone()
    }
}

pub fn moutai() -> Company {
    Company::new("600519.SH", "贵州茅台", Some("白酒"))
}

pub fn sample_chart_data() -> ChartData {
    serde_json::from_value(json!({
        "success": true,
        "real_data": true,
        "chart_type": "line",
        "data": [
            { "period": "2023", "value": 30_000_000.0 },
            { "period": 2022, "value": 25_000_000.0 }
        ]
    }))
    .unwrap()
}

pub fn sample_raw_row() -> RawDataRow {
    serde_json::from_value(json!({
        "year": 2023,
        "field": "core_profit",
        "value": 30_000_000.0,
        "unit": "元"
    }))
    .unwrap()
}
