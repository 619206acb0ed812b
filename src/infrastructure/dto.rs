use crate::domain::{
    chart::RawDataRow,
    directory::{ChartType, Company, Indicator, IndicatorCatalog, IndicatorGroup},
};
use serde::Deserialize;

/// `/api/companies`: a bare array or `{ companies: [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CompaniesDto {
    Bare(Vec<Company>),
    Wrapped { companies: Vec<Company> },
}

impl CompaniesDto {
    pub fn into_domain(self) -> Vec<Company> {
        match self {
            CompaniesDto::Bare(companies) | CompaniesDto::Wrapped { companies } => companies,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorDto {
    pub indicator_code: String,
    pub indicator_name: String,
    #[serde(default)]
    pub chart_type: Option<ChartType>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl IndicatorDto {
    pub fn to_domain_indicator(&self) -> Indicator {
        let mut indicator = Indicator::new(&self.indicator_code, &self.indicator_name);
        indicator.chart_type = self.chart_type;
        if let Some(unit) = &self.unit {
            indicator = indicator.with_unit(unit);
        }
        indicator
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorGroupDto {
    pub group_code: String,
    pub group_name: String,
    #[serde(default)]
    pub indicators: Vec<IndicatorDto>,
}

impl IndicatorGroupDto {
    pub fn to_domain_group(&self) -> IndicatorGroup {
        IndicatorGroup::new(
            &self.group_code,
            &self.group_name,
            self.indicators.iter().map(IndicatorDto::to_domain_indicator).collect(),
        )
    }
}

/// `/api/indicators` and the static specification share this shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IndicatorGroupsDto {
    Bare(Vec<IndicatorGroupDto>),
    Wrapped { indicators_groups: Vec<IndicatorGroupDto> },
}

impl IndicatorGroupsDto {
    pub fn to_domain_catalog(&self) -> IndicatorCatalog {
        let groups = match self {
            IndicatorGroupsDto::Bare(groups) | IndicatorGroupsDto::Wrapped { indicators_groups: groups } => groups,
        };
        IndicatorCatalog::new(groups.iter().map(IndicatorGroupDto::to_domain_group).collect())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawRowsDto {
    Bare(Vec<RawDataRow>),
    Wrapped { data: Vec<RawDataRow> },
}

impl RawRowsDto {
    pub fn into_domain(self) -> Vec<RawDataRow> {
        match self {
            RawRowsDto::Bare(rows) | RawRowsDto::Wrapped { data: rows } => rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn companies_accept_both_shapes() {
        let bare: CompaniesDto = serde_json::from_str(r#"[{"ts_code":"000858.SZ","name":"五粮液"}]"#).unwrap();
        let wrapped: CompaniesDto =
            serde_json::from_str(r#"{"companies":[{"ts_code":"000858.SZ","name":"五粮液","industry":"白酒"}]}"#).unwrap();
        assert_eq!(bare.into_domain()[0].code, "000858.SZ");
        assert_eq!(wrapped.into_domain()[0].industry.as_deref(), Some("白酒"));
    }

    #[test]
    fn indicator_groups_map_chart_types_and_units() {
        let dto: IndicatorGroupsDto = serde_json::from_str(
            r#"{"indicators_groups":[{"group_code":"7.33","group_name":"资本结构","indicators":[
                {"indicator_code":"7.33.1","indicator_name":"资本结构定位","chart_type":"象限点阵图","unit":""}
            ]}]}"#,
        )
        .unwrap();
        let catalog = dto.to_domain_catalog();
        let indicator = catalog.find_indicator("7.33.1").unwrap();
        assert_eq!(indicator.chart_type, Some(ChartType::Scatter));
        assert_eq!(indicator.unit, None);
    }
}
