use crate::domain::directory::{ChartType, Indicator};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Value Object - Y value of a chart point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointValue {
    Scalar(f64),
    Xy { x: f64, y: f64 },
}

/// Value Object - One period of an indicator series
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ChartDataPoint {
    #[serde(default, deserialize_with = "string_or_number")]
    pub period: String,
    #[serde(default)]
    pub value: Option<PointValue>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub values: Option<Map<String, Value>>,
}

impl ChartDataPoint {
    pub fn scalar(period: &str, value: f64) -> Self {
        Self { period: period.to_string(), value: Some(PointValue::Scalar(value)), ..Default::default() }
    }

    pub fn xy(period: &str, x: f64, y: f64) -> Self {
        Self { period: period.to_string(), value: Some(PointValue::Xy { x, y }), ..Default::default() }
    }

    pub fn with_values(mut self, values: Value) -> Self {
        if let Value::Object(map) = values {
            self.values = Some(map);
        }
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn scalar_value(&self) -> Option<f64> {
        match self.value {
            Some(PointValue::Scalar(v)) => Some(v),
            _ => None,
        }
    }

    /// Coordinates from either `value: {x, y}` or top-level `x`/`y`.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.value, self.x, self.y) {
            (Some(PointValue::Xy { x, y }), _, _) => Some((x, y)),
            (_, Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }

    pub fn numeric_field(&self, key: &str) -> Option<f64> {
        self.values.as_ref()?.get(key)?.as_f64()
    }

    /// Keys of `values` holding numbers, in document order.
    pub fn numeric_keys(&self) -> Vec<String> {
        self.values
            .as_ref()
            .map(|values| {
                values
                    .iter()
                    .filter(|(_, value)| value.is_number())
                    .map(|(key, _)| key.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Leading four-digit year of `period`, if any.
    pub fn year(&self) -> Option<i32> {
        let digits: String = self.period.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.len() >= 4 { digits[..4].parse().ok() } else { None }
    }
}

/// Stable sort by parsed year; points without a year keep their place at the end.
pub fn sort_chronologically(points: &mut [ChartDataPoint]) {
    points.sort_by_key(|point| point.year().unwrap_or(i32::MAX));
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Value Object - Named, optionally colored series
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesStyle {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Per-chart overrides sent by the backend alongside the data.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ChartConfig {
    #[serde(default, rename = "type")]
    pub chart_type: Option<ChartType>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub indicator_code: Option<String>,
    #[serde(default, rename = "yAxisName")]
    pub y_axis_name: Option<String>,
    #[serde(default)]
    pub series: Vec<SeriesStyle>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChartConfigs {
    Many(Vec<ChartConfig>),
    One(ChartConfig),
}

impl ChartConfigs {
    pub fn get(&self, index: usize) -> Option<&ChartConfig> {
        match self {
            ChartConfigs::Many(configs) => configs.get(index),
            ChartConfigs::One(config) if index == 0 => Some(config),
            ChartConfigs::One(_) => None,
        }
    }
}

/// Payload of the chart-data endpoint.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub real_data: bool,
    #[serde(default)]
    pub chart_type: Option<ChartType>,
    #[serde(default)]
    pub data: Vec<ChartDataPoint>,
    #[serde(default)]
    pub chart_config: Option<ChartConfigs>,
    #[serde(default)]
    pub chart_count: Option<usize>,
}

impl ChartData {
    pub fn config(&self, index: usize) -> Option<&ChartConfig> {
        self.chart_config.as_ref()?.get(index)
    }
}

/// Value Object - Everything needed to build one chart option
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub chart_type: ChartType,
    pub title: String,
    pub unit: Option<String>,
    pub indicator_code: String,
    pub series_index: usize,
    pub series: Vec<SeriesStyle>,
    pub y_axis_name: Option<String>,
}

impl ChartSpec {
    pub fn new(chart_type: ChartType, title: &str, indicator_code: &str) -> Self {
        Self {
            chart_type,
            title: title.to_string(),
            unit: None,
            indicator_code: indicator_code.to_string(),
            series_index: 0,
            series: Vec::new(),
            y_axis_name: None,
        }
    }

    /// Spec for the `index`-th charted indicator of a selection.
    pub fn for_indicator(indicator: &Indicator, fallback: Option<ChartType>, index: usize) -> Self {
        let chart_type = indicator.chart_type.or(fallback).unwrap_or(ChartType::Line);
        let mut spec = Self::new(chart_type, &indicator.name, &indicator.code);
        spec.unit = indicator.unit.clone();
        spec.series_index = index;
        spec
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_series(mut self, series: Vec<SeriesStyle>) -> Self {
        self.series = series;
        self
    }

    /// Backend overrides win over catalog metadata.
    pub fn apply_config(mut self, config: &ChartConfig) -> Self {
        if let Some(chart_type) = config.chart_type {
            self.chart_type = chart_type;
        }
        if let Some(title) = config.title.as_ref().or(config.name.as_ref()) {
            self.title = title.clone();
        }
        if config.unit.is_some() {
            self.unit = config.unit.clone();
        }
        if let Some(code) = &config.indicator_code {
            self.indicator_code = code.clone();
        }
        if config.y_axis_name.is_some() {
            self.y_axis_name = config.y_axis_name.clone();
        }
        if !config.series.is_empty() {
            self.series = config.series.clone();
        }
        self
    }

    pub fn is_three_pillar(&self) -> bool {
        self.indicator_code == "7.12"
            || (self.chart_type == ChartType::Bar && self.title.contains("三支柱"))
    }
}

/// One row of the raw-data table under the chart.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RawDataRow {
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub period: String,
    #[serde(default)]
    pub indicator_code: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub unit: Option<String>,
}

impl RawDataRow {
    pub const HEADERS: [&'static str; 6] = ["年份", "期间", "指标代码", "字段", "数值", "单位"];

    /// Cells in `HEADERS` order; absent fields render empty.
    pub fn cells(&self) -> [String; 6] {
        [
            self.year.clone(),
            self.period.clone(),
            self.indicator_code.clone().unwrap_or_default(),
            self.field.clone().unwrap_or_default(),
            self.display_value(),
            self.unit.clone().unwrap_or_default(),
        ]
    }

    pub fn display_value(&self) -> String {
        match &self.value {
            Value::Number(n) => n.as_f64().map(super::units::format_table_value).unwrap_or_default(),
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}
