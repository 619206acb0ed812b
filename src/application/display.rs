use crate::domain::{
    analysis::{AnalysisReport, AnalysisResult, InterpretationFrame},
    chart::{ChartData, ChartOptionsBuilder, ChartSpec, RawDataRow, sort_chronologically},
    directory::{Company, IndicatorSelection},
};
use serde_json::Value;

/// One chart to mount into the element with `container_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel {
    pub container_id: String,
    pub title: String,
    pub option: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataStatus {
    pub success: bool,
    pub real_data: bool,
    pub point_count: usize,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawDataView {
    Pending,
    Loaded(Vec<RawDataRow>),
    Failed(String),
}

/// Everything shown once the three fetches of a cycle succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    pub title: String,
    pub company: Company,
    pub indicator: IndicatorSelection,
    pub charts: Vec<ChartPanel>,
    pub analysis: AnalysisReport,
    pub interpretation: InterpretationFrame,
    pub status: DataStatus,
    pub raw_data: RawDataView,
}

/// What the content area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentView {
    Welcome,
    CompanyInfo(Company),
    IndicatorInfo(IndicatorSelection),
    Loading { company: Company, indicator: IndicatorSelection },
    Loaded(Box<DisplayModel>),
    Error { title: String, message: String },
}

impl ContentView {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ContentView::Loaded(_))
    }

    pub fn charts(&self) -> &[ChartPanel] {
        match self {
            ContentView::Loaded(model) => &model.charts,
            _ => &[],
        }
    }
}

pub fn content_title(company: &Company, indicator: &IndicatorSelection) -> String {
    format!("{} - {}", company.name, indicator.name())
}

impl DisplayModel {
    pub fn build(
        company: Company,
        indicator: IndicatorSelection,
        chart_data: ChartData,
        analysis: &AnalysisResult,
        interpretation: InterpretationFrame,
        generation: u64,
        period: &str,
    ) -> Self {
        let mut points = chart_data.data.clone();
        sort_chronologically(&mut points);

        let charts = indicator
            .chart_indicators()
            .iter()
            .enumerate()
            .map(|(index, child)| {
                let mut spec = ChartSpec::for_indicator(child, chart_data.chart_type, index);
                if let Some(config) = chart_data.config(index) {
                    spec = spec.apply_config(config);
                }
                ChartPanel {
                    container_id: format!("chart-{}-{}", generation, index),
                    title: spec.title.clone(),
                    option: ChartOptionsBuilder::new(&points, &spec).build(),
                }
            })
            .collect();

        Self {
            title: content_title(&company, &indicator),
            company,
            indicator,
            charts,
            analysis: AnalysisReport::from_result(analysis),
            interpretation,
            status: DataStatus {
                success: chart_data.success,
                real_data: chart_data.real_data,
                point_count: points.len(),
                period: period.to_string(),
            },
            raw_data: RawDataView::Pending,
        }
    }
}
