use super::quadrant::{Quadrant, QuadrantFrame};
use super::units::{self, axis_label, decimal_places, needs_wan_conversion, round_to};
use super::value_objects::{ChartDataPoint, ChartSpec};
use crate::domain::directory::ChartType;
use crate::domain::logging::{LogComponent, get_logger};
use serde_json::{Value, json};
use strum::IntoEnumIterator;

pub const PALETTE: [&str; 5] = ["#5470c6", "#91cc75", "#fac858", "#ee6666", "#73c0de"];

const PILLAR_FIELDS: [(&str, &str); 3] = [
    ("core_profit_ratio", "核心利润占比"),
    ("other_income_ratio", "其他收益占比"),
    ("miscellaneous_income_ratio", "杂项收益占比"),
];
const NON_METRIC_FIELDS: [&str; 3] = ["components", "data_quality", "calculation_notes"];

/// Builds ECharts options from chart points.
///
/// Tooltips use string templates only: labels that need formatting are
/// precomputed into each data item's `name`.
pub struct ChartOptionsBuilder<'a> {
    points: &'a [ChartDataPoint],
    spec: &'a ChartSpec,
}

impl<'a> ChartOptionsBuilder<'a> {
    pub fn new(points: &'a [ChartDataPoint], spec: &'a ChartSpec) -> Self {
        Self { points, spec }
    }

    pub fn build(&self) -> Value {
        if self.spec.is_three_pillar() {
            return self.three_pillars();
        }
        match self.spec.chart_type {
            ChartType::Line => self.single_series("line"),
            ChartType::Bar => self.single_series("bar"),
            ChartType::StackedBar => self.stacked_bar(),
            ChartType::Scatter => self.quadrant(),
        }
    }

    fn unit(&self) -> Option<&'a str> {
        self.spec
            .unit
            .as_deref()
            .or_else(|| self.points.iter().find_map(|point| point.unit.as_deref()))
            .filter(|unit| !unit.is_empty())
    }

    /// Conversion and precision shared by every plotted series.
    fn scale(&self) -> ValueScale<'a> {
        let unit = self.unit();
        let convert = needs_wan_conversion(
            &self.spec.indicator_code,
            unit,
            self.spec.y_axis_name.as_deref(),
        );
        let display_unit = if convert { Some(units::WAN_UNIT) } else { unit };
        ValueScale { convert, display_unit, decimals: decimal_places(display_unit) }
    }

    fn y_axis_name(&self, scale: &ValueScale) -> String {
        self.spec.y_axis_name.clone().unwrap_or_else(|| axis_label(scale.display_unit))
    }

    /// Points carrying a coordinate pair, which only scatter charts accept.
    fn categorical_points(&self) -> Vec<&'a ChartDataPoint> {
        let (kept, skipped): (Vec<_>, Vec<_>) =
            self.points.iter().partition(|point| point.coordinates().is_none());
        if !skipped.is_empty() {
            get_logger().warn(
                LogComponent::Domain("ChartOptions"),
                &format!(
                    "{}: skipped {} coordinate points in a {} chart",
                    self.spec.indicator_code,
                    skipped.len(),
                    self.spec.chart_type
                ),
            );
        }
        kept
    }

    fn title(&self) -> Value {
        json!({ "text": self.spec.title, "left": "center" })
    }

    fn single_series(&self, kind: &str) -> Value {
        let points = self.categorical_points();
        let periods: Vec<&str> = points.iter().map(|point| point.period.as_str()).collect();
        let scale = self.scale();

        let (series_name, data): (String, Vec<f64>) =
            if points.iter().any(|point| point.scalar_value().is_some()) {
                let data = points
                    .iter()
                    .map(|point| scale.apply(point.scalar_value().unwrap_or(0.0)))
                    .collect();
                (self.spec.title.clone(), data)
            } else {
                let key = points.first().and_then(|first| {
                    let keys = first.numeric_keys();
                    keys.get(self.spec.series_index).or(keys.first()).cloned()
                });
                match key {
                    Some(key) => {
                        let data = points
                            .iter()
                            .map(|point| scale.apply(point.numeric_field(&key).unwrap_or(0.0)))
                            .collect();
                        (key, data)
                    }
                    None => (format!("系列{}", self.spec.series_index + 1), Vec::new()),
                }
            };

        let suffix = match scale.display_unit {
            Some("%") => "%".to_string(),
            Some(unit) => format!(" {}", unit),
            None => String::new(),
        };
        let mut series = json!({
            "name": series_name,
            "type": kind,
            "data": data,
            "itemStyle": { "color": PALETTE[0] },
        });
        if kind == "line" {
            series["smooth"] = json!(true);
        }

        json!({
            "title": self.title(),
            "tooltip": { "trigger": "axis", "formatter": format!("{{b}}<br/>{{a}}: {{c}}{}", suffix) },
            "grid": { "left": "3%", "right": "4%", "bottom": "3%", "containLabel": true },
            "xAxis": { "type": "category", "data": periods, "name": "期间" },
            "yAxis": {
                "type": "value",
                "name": self.y_axis_name(&scale),
            },
            "series": [series],
        })
    }

    fn stacked_bar(&self) -> Value {
        let points = self.categorical_points();
        let periods: Vec<&str> = points.iter().map(|point| point.period.as_str()).collect();
        let keys = points.first().map(|first| first.numeric_keys()).unwrap_or_default();
        let scale = self.scale();
        let series_count = if self.spec.series.is_empty() { keys.len() } else { self.spec.series.len() };

        let series: Vec<Value> = (0..series_count)
            .map(|i| {
                let style = self.spec.series.get(i);
                let key = keys.get(i).or(keys.first());
                let name = style
                    .and_then(|style| style.name.clone())
                    .or_else(|| key.cloned())
                    .unwrap_or_else(|| format!("系列{}", i + 1));
                let color = style
                    .and_then(|style| style.color.clone())
                    .unwrap_or_else(|| PALETTE[i % PALETTE.len()].to_string());
                let data: Vec<f64> = match key {
                    Some(key) => points.iter().map(|p| scale.apply(p.numeric_field(key).unwrap_or(0.0))).collect(),
                    None => Vec::new(),
                };
                json!({
                    "name": name,
                    "type": "bar",
                    "stack": "total",
                    "data": data,
                    "itemStyle": { "color": color },
                })
            })
            .collect();
        let legend: Vec<Value> = series.iter().map(|s| s["name"].clone()).collect();

        json!({
            "title": self.title(),
            "tooltip": { "trigger": "axis", "axisPointer": { "type": "shadow" } },
            "legend": { "data": legend, "bottom": 0 },
            "grid": { "left": "3%", "right": "4%", "bottom": "12%", "containLabel": true },
            "xAxis": { "type": "category", "data": periods, "name": "期间" },
            "yAxis": { "type": "value", "name": self.y_axis_name(&scale) },
            "series": series,
        })
    }

    fn three_pillars(&self) -> Value {
        let points = self.categorical_points();
        let periods: Vec<&str> = points.iter().map(|point| point.period.as_str()).collect();
        let columns: Vec<Vec<f64>> = PILLAR_FIELDS
            .iter()
            .map(|(field, _)| points.iter().map(|p| p.numeric_field(field).unwrap_or(0.0)).collect())
            .collect();

        if columns.iter().flatten().all(|ratio| *ratio == 0.0) {
            return self.pillar_fallback(&points);
        }

        let y_max = columns.iter().flatten().fold(100.0_f64, |acc, v| acc.max(*v)) * 1.1;
        let series: Vec<Value> = PILLAR_FIELDS
            .iter()
            .zip(columns)
            .enumerate()
            .map(|(i, ((_, label), data))| {
                json!({
                    "name": label,
                    "type": "bar",
                    "stack": "total",
                    "data": data,
                    "itemStyle": { "color": PALETTE[i] },
                })
            })
            .collect();

        json!({
            "title": self.title(),
            "tooltip": { "trigger": "axis", "axisPointer": { "type": "shadow" } },
            "legend": { "data": PILLAR_FIELDS.iter().map(|(_, label)| *label).collect::<Vec<_>>(), "top": 30 },
            "grid": { "left": "3%", "right": "4%", "bottom": "3%", "containLabel": true },
            "xAxis": { "type": "category", "data": periods, "name": "年份" },
            "yAxis": { "type": "value", "name": "占比", "min": 0, "max": round_to(y_max, 2) },
            "series": series,
        })
    }

    /// Pie of whatever numeric fields the first point has, else a placeholder.
    fn pillar_fallback(&self, points: &[&ChartDataPoint]) -> Value {
        let slices: Vec<Value> = points
            .first()
            .and_then(|first| first.values.as_ref())
            .map(|values| {
                values
                    .iter()
                    .filter(|(key, value)| value.is_number() && !NON_METRIC_FIELDS.contains(&key.as_str()))
                    .map(|(key, value)| json!({ "name": key, "value": value }))
                    .collect()
            })
            .unwrap_or_default();

        if !slices.is_empty() {
            return json!({
                "title": self.title(),
                "tooltip": { "trigger": "item", "formatter": "{a} <br/>{b}: {c} ({d}%)" },
                "legend": { "orient": "vertical", "left": "left" },
                "series": [{ "name": "利润结构", "type": "pie", "radius": "50%", "data": slices }],
            });
        }

        json!({
            "title": {
                "text": format!("{} (数据不完整)", self.spec.title),
                "left": "center",
                "subtext": "缺少其他收益和杂项收益数据",
                "subtextStyle": { "color": "#999", "fontSize": 12 },
            },
            "graphic": {
                "type": "text",
                "left": "center",
                "top": "middle",
                "style": { "text": "数据不完整，无法显示三支柱图表", "fill": "#999", "fontSize": 14 },
            },
        })
    }

    fn quadrant(&self) -> Value {
        let frame = QuadrantFrame::for_indicator(&self.spec.indicator_code, &self.spec.title);
        let mut coordinates = Vec::with_capacity(self.points.len());
        let mut items = Vec::with_capacity(self.points.len());
        for point in self.points {
            let Some((x, y)) = point.coordinates() else {
                get_logger().warn(
                    LogComponent::Domain("ChartOptions"),
                    &format!(
                        "{}: period {} has no x/y pair, skipped",
                        self.spec.indicator_code, point.period
                    ),
                );
                continue;
            };
            let quadrant = frame.classify(x, y);
            let label = format!(
                "{}<br/>{}: {:.2}<br/>{}: {:.2}<br/>象限: {} ({})",
                point.period,
                frame.x_axis_name,
                x,
                frame.y_axis_name,
                y,
                quadrant,
                frame.quadrant_name(quadrant)
            );
            coordinates.push((x, y));
            items.push(json!({
                "name": label,
                "value": [x, y],
                "itemStyle": { "color": quadrant.color() },
            }));
        }

        let bounds = frame.bounds(&coordinates);
        let labels: Vec<Value> = frame
            .label_positions(&bounds)
            .iter()
            .zip(Quadrant::iter())
            .map(|((x, y), quadrant)| json!({ "name": frame.quadrant_name(quadrant), "value": [x, y] }))
            .collect();
        let axis = |name: &str, min: f64, max: f64, gap: u32| {
            json!({
                "name": name,
                "nameLocation": "middle",
                "nameGap": gap,
                "min": min,
                "max": max,
                "axisLine": { "onZero": frame.axis_on_zero(), "lineStyle": { "color": "#666" } },
                "splitLine": { "lineStyle": { "type": "dashed", "color": "#e0e0e0" } },
            })
        };

        json!({
            "title": self.title(),
            "tooltip": { "trigger": "item", "formatter": "{b}" },
            "grid": { "left": "10%", "right": "10%", "bottom": "15%", "top": "15%", "containLabel": true },
            "xAxis": axis(frame.x_axis_name, bounds.x_min, bounds.x_max, 30),
            "yAxis": axis(frame.y_axis_name, bounds.y_min, bounds.y_max, 40),
            "series": [
                {
                    "name": "数据点",
                    "type": "scatter",
                    "symbolSize": 12,
                    "data": items,
                    "markLine": {
                        "silent": true,
                        "symbol": "none",
                        "lineStyle": { "color": "#999", "type": "solid" },
                        "data": [{ "xAxis": frame.center.0 }, { "yAxis": frame.center.1 }],
                    },
                },
                {
                    "name": "象限",
                    "type": "scatter",
                    "symbolSize": 0,
                    "silent": true,
                    "tooltip": { "show": false },
                    "label": { "show": true, "formatter": "{b}", "color": "#999", "fontSize": 12 },
                    "data": labels,
                },
            ],
        })
    }
}

struct ValueScale<'a> {
    convert: bool,
    display_unit: Option<&'a str>,
    decimals: usize,
}

impl ValueScale<'_> {
    fn apply(&self, raw: f64) -> f64 {
        let value = if self.convert { units::convert_yuan_to_wan(raw) } else { raw };
        round_to(value, self.decimals)
    }
}
