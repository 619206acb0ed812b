use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Rendering family of an indicator chart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    #[display(fmt = "line")]
    #[strum(serialize = "line", serialize = "折线图")]
    Line,
    #[display(fmt = "bar")]
    #[strum(serialize = "bar", serialize = "柱状图")]
    Bar,
    #[display(fmt = "stacked_bar")]
    #[strum(serialize = "stacked_bar", serialize = "堆叠柱状图")]
    StackedBar,
    #[display(fmt = "scatter")]
    #[strum(serialize = "scatter", serialize = "象限点阵图")]
    Scatter,
}

impl ChartType {
    /// Unknown labels render as a line chart.
    pub fn parse_or_line(label: &str) -> Self {
        label.trim().parse().unwrap_or(ChartType::Line)
    }
}

impl<'de> Deserialize<'de> for ChartType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(ChartType::parse_or_line(&label))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    #[display(fmt = "盈利能力")]
    Profitability,
    #[display(fmt = "现金流")]
    Growth,
    #[display(fmt = "运营效率")]
    Efficiency,
    #[display(fmt = "财务稳健")]
    Stability,
    #[display(fmt = "估值水平")]
    Valuation,
    #[display(fmt = "其他")]
    Other,
}

impl IndicatorCategory {
    /// Category from the first two components of a dotted code (`7.33.1` -> `7.33`).
    pub fn from_code(code: &str) -> Self {
        let mut parts = code.split('.');
        let (Some("7"), Some(minor)) = (parts.next(), parts.next()) else {
            return IndicatorCategory::Other;
        };
        match minor.parse::<u32>() {
            Ok(11..=14) => IndicatorCategory::Profitability,
            Ok(21..=25) => IndicatorCategory::Growth,
            Ok(31..=33) => IndicatorCategory::Efficiency,
            Ok(41..=44) => IndicatorCategory::Stability,
            Ok(51..=53) => IndicatorCategory::Valuation,
            _ => IndicatorCategory::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicator {
    pub code: String,
    pub name: String,
    pub category: IndicatorCategory,
    pub chart_type: Option<ChartType>,
    pub unit: Option<String>,
}

impl Indicator {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            category: IndicatorCategory::from_code(code),
            chart_type: None,
            unit: None,
        }
    }

    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = Some(chart_type);
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = (!unit.is_empty()).then(|| unit.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorGroup {
    pub code: String,
    pub name: String,
    pub category: IndicatorCategory,
    pub indicators: Vec<Indicator>,
}

impl IndicatorGroup {
    pub fn new(code: &str, name: &str, indicators: Vec<Indicator>) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            category: IndicatorCategory::from_code(code),
            indicators,
        }
    }
}

/// What a directory click selects: one indicator or a whole group.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorSelection {
    Single(Indicator),
    Group(IndicatorGroup),
}

impl IndicatorSelection {
    pub fn code(&self) -> &str {
        match self {
            IndicatorSelection::Single(indicator) => &indicator.code,
            IndicatorSelection::Group(group) => &group.code,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            IndicatorSelection::Single(indicator) => &indicator.name,
            IndicatorSelection::Group(group) => &group.name,
        }
    }

    pub fn category(&self) -> IndicatorCategory {
        match self {
            IndicatorSelection::Single(indicator) => indicator.category,
            IndicatorSelection::Group(group) => group.category,
        }
    }

    /// Indicators charted for this selection. A childless group charts itself.
    pub fn chart_indicators(&self) -> Vec<Indicator> {
        match self {
            IndicatorSelection::Single(indicator) => vec![indicator.clone()],
            IndicatorSelection::Group(group) if group.indicators.is_empty() => {
                vec![Indicator::new(&group.code, &group.name)]
            }
            IndicatorSelection::Group(group) => group.indicators.clone(),
        }
    }
}

/// Ordered indicator groups shown in the directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorCatalog {
    groups: Vec<IndicatorGroup>,
}

impl IndicatorCatalog {
    pub fn new(groups: Vec<IndicatorGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[IndicatorGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups bucketed by category in category order, empty buckets omitted.
    pub fn by_category(&self) -> Vec<(IndicatorCategory, Vec<&IndicatorGroup>)> {
        use strum::IntoEnumIterator;
        IndicatorCategory::iter()
            .filter_map(|category| {
                let groups: Vec<_> =
                    self.groups.iter().filter(|group| group.category == category).collect();
                (!groups.is_empty()).then_some((category, groups))
            })
            .collect()
    }

    /// Group codes match before child codes.
    pub fn find(&self, code: &str) -> Option<IndicatorSelection> {
        if let Some(group) = self.groups.iter().find(|group| group.code == code) {
            return Some(IndicatorSelection::Group(group.clone()));
        }
        self.groups
            .iter()
            .flat_map(|group| group.indicators.iter())
            .find(|indicator| indicator.code == code)
            .map(|indicator| IndicatorSelection::Single(indicator.clone()))
    }

    pub fn find_indicator(&self, code: &str) -> Option<&Indicator> {
        self.groups
            .iter()
            .flat_map(|group| group.indicators.iter())
            .find(|indicator| indicator.code == code)
    }
}

/// Embedded catalog used when neither the API nor the static file answers.
pub fn default_catalog() -> IndicatorCatalog {
    const GROUPS: [(&str, &str); 19] = [
        ("7.11", "核心利润与核心利润率"),
        ("7.12", "利润结构健康度（三支柱分析）"),
        ("7.13", "费用控制能力"),
        ("7.14", "盈利质量"),
        ("7.21", "核心利润获现率"),
        ("7.22", "利润现金保障倍数"),
        ("7.23", "经营现金流增长率"),
        ("7.24", "自由现金流分析"),
        ("7.25", "现金流结构分析"),
        ("7.31", "总资产周转率"),
        ("7.32", "存货周转率"),
        ("7.33", "应收账款周转率"),
        ("7.41", "资产负债率"),
        ("7.42", "流动比率"),
        ("7.43", "速动比率"),
        ("7.44", "利息保障倍数"),
        ("7.51", "市盈率"),
        ("7.52", "市净率"),
        ("7.53", "市销率"),
    ];
    IndicatorCatalog::new(
        GROUPS.iter().map(|(code, name)| IndicatorGroup::new(code, name, Vec::new())).collect(),
    )
}
